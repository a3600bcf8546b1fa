//! Compilation failures and non-fatal notices.

use std::fmt;
use thiserror::Error;

/// A fatal problem with one node. Compilation stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("missing in vspec element key: '{key}' (path: {path})")]
    StructuralKeyMissing { path: String, key: &'static str },

    #[error("illegal element type '{name}' (signal: {path})")]
    UnknownKind { path: String, name: String },

    #[error(
        "illegal data type '{name}' (signal: {path}); try: int8 uint8 int16 uint16 int32 uint32 int64 uint64 float double string boolean stream"
    )]
    UnknownValueType { path: String, name: String },

    #[error("signals {first} and {second} both map to macro {name}()")]
    MacroNameCollision {
        name: String,
        first: String,
        second: String,
    },
}

/// Something the compiler dropped on purpose. Reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    BoundsIgnored {
        path: String,
        bound: &'static str,
        value_type: String,
    },
    BranchAttributeIgnored {
        path: String,
        key: &'static str,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::BoundsIgnored {
                path,
                bound,
                value_type,
            } => write!(
                f,
                "signal {}: ignoring specified {} value for type {}",
                path, bound, value_type
            ),
            Notice::BranchAttributeIgnored { path, key } => {
                write!(f, "branch {}: ignoring '{}' on a branch", path, key)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn messages_name_the_signal() {
        let err = CompileError::UnknownKind {
            path: "Vehicle.Speed".to_string(),
            name: "signal".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "illegal element type 'signal' (signal: Vehicle.Speed)"
        );

        let notice = Notice::BoundsIgnored {
            path: "Vehicle.Speed".to_string(),
            bound: "min",
            value_type: "int8".to_string(),
        };
        assert_eq!(
            notice.to_string(),
            "signal Vehicle.Speed: ignoring specified min value for type int8"
        );
    }
}
