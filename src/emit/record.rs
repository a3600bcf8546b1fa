//! One `vss_signal_t` initializer per node.
//!
//! Field order follows `vss_signal_t`:
//! index, parent_index, name, uuid, element_type, data_type, unit_type,
//! min_val, max_val, description, enum_values, sensor, actuator.

use crate::emit::c_string;
use crate::error::{CompileError, Notice};
use crate::spec::Bound;
use crate::tree::IndexedNode;
use crate::vocab::{ElementKind, ValueType};

use std::fmt;

/// Emitted in place of a bound that is absent or ignored.
pub const UNDEFINED_BOUND: &str = "INT64_MIN";

/// A validated record, ready to print.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    pub index: usize,
    pub parent_index: i64,
    pub name: &'a str,
    pub uuid: &'a str,
    pub kind: ElementKind,
    pub value_type: ValueType,
    pub unit: &'a str,
    pub min: String,
    pub max: String,
    pub description: &'a str,
    pub enum_values: &'a [String],
    pub sensor: &'a str,
    pub actuator: &'a str,
}

impl<'a> Record<'a> {
    /// Validate a node and resolve its vocabulary.
    ///
    /// Fails on a missing `type`/`uuid` or an unknown kind/data type. Dropped
    /// bounds and branch attributes are reported through `notify`.
    pub fn from_node(
        node: &IndexedNode<'a>,
        notify: &mut dyn FnMut(Notice),
    ) -> Result<Self, CompileError> {
        let spec = node.spec;
        let missing = |key| CompileError::StructuralKeyMissing {
            path: node.path.clone(),
            key,
        };

        let uuid = spec.uuid.as_deref().ok_or_else(|| missing("uuid"))?;
        let kind_name = spec.kind.as_deref().ok_or_else(|| missing("type"))?;
        let kind = ElementKind::from_name(kind_name).ok_or_else(|| CompileError::UnknownKind {
            path: node.path.clone(),
            name: kind_name.to_string(),
        })?;

        let declared_type = match spec.value_type.as_deref() {
            Some(name) => Some((
                name,
                ValueType::from_name(name).ok_or_else(|| CompileError::UnknownValueType {
                    path: node.path.clone(),
                    name: name.to_string(),
                })?,
            )),
            None => None,
        };

        let (value_type, min, max) = if kind.is_branch() {
            // Branches carry no data: always VSS_NA with undefined bounds.
            for (key, present) in [
                ("datatype", declared_type.is_some()),
                ("min", spec.min.is_some()),
                ("max", spec.max.is_some()),
            ] {
                if present {
                    notify(Notice::BranchAttributeIgnored {
                        path: node.path.clone(),
                        key,
                    });
                }
            }
            (
                ValueType::NotApplicable,
                UNDEFINED_BOUND.to_string(),
                UNDEFINED_BOUND.to_string(),
            )
        } else {
            let value_type = declared_type.map_or(ValueType::NotApplicable, |(_, ty)| ty);
            let type_name = declared_type.map_or("na", |(name, _)| name);
            let min = bound_text(node, "min", spec.min.as_ref(), value_type, type_name, notify);
            let max = bound_text(node, "max", spec.max.as_ref(), value_type, type_name, notify);
            (value_type, min, max)
        };

        Ok(Self {
            index: node.index,
            parent_index: node.parent_index_c(),
            name: node.name,
            uuid,
            kind,
            value_type,
            unit: spec.unit.as_deref().unwrap_or(""),
            min,
            max,
            description: spec.description.as_deref().unwrap_or(""),
            enum_values: spec.enum_values.as_deref().unwrap_or(&[]),
            sensor: spec.sensor_ref.as_deref().unwrap_or(""),
            actuator: spec.actuator_ref.as_deref().unwrap_or(""),
        })
    }

    /// `{ 0 }` or `{ "a", "b", 0 }`: always a NULL-terminated array.
    fn enum_literal(&self) -> String {
        let mut out = String::from("{ ");
        for value in self.enum_values {
            out.push_str(&c_string(value));
            out.push_str(", ");
        }
        out.push_str("0 }");
        out
    }
}

fn bound_text(
    node: &IndexedNode<'_>,
    bound: &'static str,
    value: Option<&Bound>,
    value_type: ValueType,
    type_name: &str,
    notify: &mut dyn FnMut(Notice),
) -> String {
    match value {
        None => UNDEFINED_BOUND.to_string(),
        Some(_) if value_type.ignores_bounds() => {
            notify(Notice::BoundsIgnored {
                path: node.path.clone(),
                bound,
                value_type: type_name.to_ascii_lowercase(),
            });
            UNDEFINED_BOUND.to_string()
        }
        Some(Bound(text)) => text.clone(),
    }
}

impl fmt::Display for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "    {{ {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, (const char*[]) {}, {}, {} }},",
            self.index,
            self.parent_index,
            c_string(self.name),
            c_string(self.uuid),
            self.kind.c_tag(),
            self.value_type.c_tag(),
            c_string(self.unit),
            self.min,
            self.max,
            c_string(self.description),
            self.enum_literal(),
            c_string(self.sensor),
            c_string(self.actuator),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::SpecTree;
    use crate::tree::IndexedTree;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> SpecTree {
        serde_json::from_str(json).unwrap()
    }

    /// Emit every record of a tree, collecting notices.
    fn emit(spec: &SpecTree) -> (Result<Vec<String>, CompileError>, Vec<Notice>) {
        let tree = IndexedTree::build(spec);
        let mut notices = Vec::new();
        let mut notify = |n| notices.push(n);
        let lines = tree
            .nodes()
            .iter()
            .map(|node| Record::from_node(node, &mut notify).map(|r| r.to_string()))
            .collect();
        (lines, notices)
    }

    #[test]
    fn leaf_with_every_field() {
        let spec = parse(
            r#"{ "Seat": { "type": "actuator", "datatype": "int64", "uuid": "u-1",
                 "unit": "mm", "min": -100, "max": 800, "description": "Seat \"fore/aft\"",
                 "sensor": "seat.pos", "actuator": "seat.motor" } }"#,
        );
        let (lines, notices) = emit(&spec);

        assert_eq!(
            lines.unwrap(),
            vec![concat!(
                r#"    { 0, -1, "Seat", "u-1", VSS_ACTUATOR, VSS_INT64, "mm", -100, 800, "#,
                r#""Seat \"fore/aft\"", (const char*[]) { 0 }, "seat.pos", "seat.motor" },"#,
                "\n"
            )
            .to_string()]
        );
        assert!(notices.is_empty());
    }

    #[test]
    fn defaults_for_absent_optionals() {
        let spec = parse(r#"{ "Id": { "type": "attribute", "uuid": "u" } }"#);
        let (lines, notices) = emit(&spec);

        assert_eq!(
            lines.unwrap(),
            vec![concat!(
                r#"    { 0, -1, "Id", "u", VSS_ATTRIBUTE, VSS_NA, "", INT64_MIN, INT64_MIN, "", "#,
                r#"(const char*[]) { 0 }, "", "" },"#,
                "\n"
            )
            .to_string()]
        );
        assert!(notices.is_empty());
    }

    #[test]
    fn bounds_ignored_for_small_numeric_types() {
        let spec = parse(
            r#"{ "Gear": { "type": "sensor", "datatype": "int8", "uuid": "u", "min": 5 } }"#,
        );
        let (lines, notices) = emit(&spec);

        let line = &lines.unwrap()[0];
        assert!(
            line.contains("VSS_INT8, \"\", INT64_MIN, INT64_MIN,"),
            "{}",
            line
        );
        assert_eq!(
            notices,
            vec![Notice::BoundsIgnored {
                path: "Gear".to_string(),
                bound: "min",
                value_type: "int8".to_string(),
            }]
        );
    }

    #[test]
    fn bounds_kept_for_other_types() {
        let spec = parse(
            r#"{ "Odo": { "type": "sensor", "datatype": "UInt64", "uuid": "u",
                          "min": 0, "max": "UINT64_MAX" } }"#,
        );
        let (lines, notices) = emit(&spec);

        let line = &lines.unwrap()[0];
        assert!(line.contains("VSS_UINT64, \"\", 0, UINT64_MAX,"), "{}", line);
        assert!(notices.is_empty());
    }

    #[test]
    fn enum_values_are_null_terminated() {
        let spec = parse(
            r#"{ "Level": { "type": "sensor", "datatype": "string", "uuid": "u",
                            "enum": ["low", "high"] } }"#,
        );
        let (lines, _) = emit(&spec);

        let line = &lines.unwrap()[0];
        assert!(
            line.contains(r#"(const char*[]) { "low", "high", 0 },"#),
            "{}",
            line
        );
    }

    #[test]
    fn branch_is_always_not_applicable() {
        let spec = parse(
            r#"{ "Cabin": { "type": "branch", "uuid": "u", "datatype": "int64",
                            "min": 1, "max": 2, "children": {} } }"#,
        );
        let (lines, notices) = emit(&spec);

        let line = &lines.unwrap()[0];
        assert!(
            line.contains("VSS_BRANCH, VSS_NA, \"\", INT64_MIN, INT64_MIN,"),
            "{}",
            line
        );
        let keys: Vec<&str> = notices
            .iter()
            .map(|n| match n {
                Notice::BranchAttributeIgnored { key, .. } => *key,
                other => panic!("unexpected notice {:?}", other),
            })
            .collect();
        assert_eq!(keys, vec!["datatype", "min", "max"]);
    }

    #[test]
    fn missing_uuid_is_fatal() {
        let spec = parse(
            r#"{ "root": { "type": "branch", "uuid": "u0", "children": {
                    "a": { "type": "sensor" } } } }"#,
        );
        let (lines, _) = emit(&spec);

        assert_eq!(
            lines.unwrap_err(),
            CompileError::StructuralKeyMissing {
                path: "root.a".to_string(),
                key: "uuid",
            }
        );
    }

    #[test]
    fn missing_type_is_fatal() {
        let spec = parse(r#"{ "x": { "uuid": "u" } }"#);
        let (lines, _) = emit(&spec);

        assert_eq!(
            lines.unwrap_err(),
            CompileError::StructuralKeyMissing {
                path: "x".to_string(),
                key: "type",
            }
        );
    }

    #[test]
    fn unknown_vocabulary_is_fatal() {
        let spec = parse(r#"{ "x": { "type": "signal", "uuid": "u" } }"#);
        assert_eq!(
            emit(&spec).0.unwrap_err(),
            CompileError::UnknownKind {
                path: "x".to_string(),
                name: "signal".to_string(),
            }
        );

        let spec = parse(r#"{ "y": { "type": "sensor", "datatype": "int128", "uuid": "u" } }"#);
        assert_eq!(
            emit(&spec).0.unwrap_err(),
            CompileError::UnknownValueType {
                path: "y".to_string(),
                name: "int128".to_string(),
            }
        );
    }
}
