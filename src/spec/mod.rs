//! Spec layer: JSON vspec schema, loading and UUID databases.
//!
//! This module is intentionally separate from compilation and rendering.
//! It owns:
//! - SpecNode/SpecTree (the signal tree as written)
//! - Loader (search paths + `$include`)
//! - UuidDb (`-i prefix:file` collaborator)

pub mod load;
pub mod node;
pub mod uuid_db;

pub use load::Loader;
pub use node::{Bound, SpecNode, SpecTree, child_path, parse_tree};
pub use uuid_db::{UuidDb, UuidDbArg, assign_uuids};
