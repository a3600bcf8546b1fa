//! Mapping from specification kind/type names to the C output vocabulary.
//!
//! Both lookups are case-insensitive. Anything outside the tables is rejected
//! by the caller with the node path attached.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Attribute,
    Branch,
    Sensor,
    Actuator,
    RestrictedBranch,
    Element,
}

impl ElementKind {
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name.to_ascii_lowercase().as_str() {
            "attribute" => Self::Attribute,
            "branch" => Self::Branch,
            "sensor" => Self::Sensor,
            "actuator" => Self::Actuator,
            "rbranch" | "restricted-branch" => Self::RestrictedBranch,
            "element" | "generic-element" => Self::Element,
            _ => return None,
        };
        Some(kind)
    }

    /// Only branch-like kinds own children.
    pub fn is_branch(self) -> bool {
        matches!(self, Self::Branch | Self::RestrictedBranch)
    }

    pub fn c_tag(self) -> &'static str {
        match self {
            Self::Attribute => "VSS_ATTRIBUTE",
            Self::Branch => "VSS_BRANCH",
            Self::Sensor => "VSS_SENSOR",
            Self::Actuator => "VSS_ACTUATOR",
            Self::RestrictedBranch => "VSS_RBRANCH",
            Self::Element => "VSS_ELEMENT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float,
    Double,
    Boolean,
    String,
    Stream,
    NotApplicable,
}

impl ValueType {
    pub fn from_name(name: &str) -> Option<Self> {
        let ty = match name.to_ascii_lowercase().as_str() {
            "int8" => Self::Int8,
            "uint8" => Self::Uint8,
            "int16" => Self::Int16,
            "uint16" => Self::Uint16,
            "int32" => Self::Int32,
            "uint32" => Self::Uint32,
            "int64" => Self::Int64,
            "uint64" => Self::Uint64,
            "float" => Self::Float,
            "double" => Self::Double,
            "bool" | "boolean" => Self::Boolean,
            "string" => Self::String,
            "stream" => Self::Stream,
            "na" | "n/a" => Self::NotApplicable,
            _ => return None,
        };
        Some(ty)
    }

    /// Types whose declared min/max are dropped in favour of the sentinel.
    pub fn ignores_bounds(self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Uint8
                | Self::Int16
                | Self::Uint16
                | Self::Int32
                | Self::Uint32
                | Self::Double
                | Self::Float
        )
    }

    pub fn c_tag(self) -> &'static str {
        match self {
            Self::Int8 => "VSS_INT8",
            Self::Uint8 => "VSS_UINT8",
            Self::Int16 => "VSS_INT16",
            Self::Uint16 => "VSS_UINT16",
            Self::Int32 => "VSS_INT32",
            Self::Uint32 => "VSS_UINT32",
            Self::Int64 => "VSS_INT64",
            Self::Uint64 => "VSS_UINT64",
            Self::Float => "VSS_FLOAT",
            Self::Double => "VSS_DOUBLE",
            Self::Boolean => "VSS_BOOLEAN",
            Self::String => "VSS_STRING",
            Self::Stream => "VSS_STREAM",
            Self::NotApplicable => "VSS_NA",
        }
    }
}
