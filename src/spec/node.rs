//! Signal tree as it appears in a `.json` vspec file.
//!
//! JSON shape:
//! {
//!   "Vehicle": {
//!     "type": "branch",
//!     "uuid": "1c72453e738511e9b29ad46a6a4b77e9",
//!     "description": "High-level vehicle data.",
//!     "$include": ["body.json"],          // optional, spliced into children
//!     "children": {
//!       "Speed": {
//!         "type": "sensor",
//!         "datatype": "int32",
//!         "unit": "km/h",
//!         "min": 0,
//!         "max": 250,
//!         "uuid": "efe50798638d55fab18ab7d43cc3c1b3"
//!       }
//!     }
//!   }
//! }
//!
//! Every key except `children` is optional at load time; the compiler decides
//! which ones are mandatory. Map order is declaration order and is kept.

use crate::vocab::ElementKind;

use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Ordered name -> node mapping. Used for both the root level and children.
pub type SpecTree = IndexMap<String, SpecNode>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecNode {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(rename = "datatype", default)]
    pub value_type: Option<String>,

    #[serde(default)]
    pub unit: Option<String>,

    #[serde(default)]
    pub min: Option<Bound>,

    #[serde(default)]
    pub max: Option<Bound>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<String>>,

    #[serde(rename = "sensor", default)]
    pub sensor_ref: Option<String>,

    #[serde(rename = "actuator", default)]
    pub actuator_ref: Option<String>,

    #[serde(default)]
    pub uuid: Option<String>,

    #[serde(default, deserialize_with = "unique_entries")]
    pub children: SpecTree,

    /// Files whose top-level entries are appended to `children` by the loader.
    #[serde(rename = "$include", default, deserialize_with = "one_or_many")]
    pub includes: Vec<String>,
}

impl SpecNode {
    /// Only branch-like nodes own children; every tree walk stops elsewhere.
    /// A missing or unknown kind counts as a leaf.
    pub fn is_branch(&self) -> bool {
        self.kind
            .as_deref()
            .and_then(ElementKind::from_name)
            .is_some_and(ElementKind::is_branch)
    }
}

/// Dotted path of `name` under `parent`; root-level entries are just `name`.
///
/// Decided by having a parent, not by the parent's path being non-empty, so
/// an empty root name still prefixes its children.
pub fn child_path(parent: Option<&str>, name: &str) -> String {
    match parent {
        Some(parent) => format!("{}.{}", parent, name),
        None => name.to_string(),
    }
}

/// Parse a whole vspec document, rejecting repeated names at every level.
pub fn parse_tree(text: &str) -> serde_json::Result<SpecTree> {
    let mut de = serde_json::Deserializer::from_str(text);
    let tree = unique_entries(&mut de)?;
    de.end()?;
    Ok(tree)
}

/// Deserialize a name -> node map, failing on a repeated name.
///
/// Errors from a nested node are re-scoped so the message carries the full
/// dotted path: `signal Vehicle.Speed: ...`.
fn unique_entries<'de, D>(deserializer: D) -> std::result::Result<SpecTree, D::Error>
where
    D: Deserializer<'de>,
{
    struct UniqueEntries;

    impl<'de> Visitor<'de> for UniqueEntries {
        type Value = SpecTree;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of signal names to nodes")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<SpecTree, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut tree = SpecTree::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(name) = map.next_key::<String>()? {
                if tree.contains_key(&name) {
                    return Err(<A::Error as de::Error>::custom(format!(
                        "signal {}: defined more than once",
                        name
                    )));
                }
                let node = map
                    .next_value::<SpecNode>()
                    .map_err(|e| {
                        <A::Error as de::Error>::custom(scope_message(&name, &e.to_string()))
                    })?;
                tree.insert(name, node);
            }
            Ok(tree)
        }
    }

    deserializer.deserialize_map(UniqueEntries)
}

fn scope_message(name: &str, msg: &str) -> String {
    match msg
        .strip_prefix("signal ")
        .and_then(|rest| rest.split_once(": "))
    {
        Some((path, rest)) => format!("signal {}.{}: {}", name, path, rest),
        None => format!("signal {}: {}", name, msg),
    }
}

/// A min/max bound, kept as the literal text to emit.
///
/// Numbers keep their JSON spelling; strings (e.g. `"DBL_MAX"`) are emitted
/// as-is so they can name C constants.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawBound")]
pub struct Bound(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBound {
    Number(serde_json::Number),
    Text(String),
}

impl From<RawBound> for Bound {
    fn from(raw: RawBound) -> Self {
        match raw {
            RawBound::Number(n) => Bound(n.to_string()),
            RawBound::Text(s) => Bound(s),
        }
    }
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}
