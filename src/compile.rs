//! Compile a loaded SpecTree into the C header and source text.
//!
//! Phases:
//! 1) Index the tree (pre-order indices, parent links, paths).
//! 2) Emit one record and one macro per node, in index order.
//! 3) Assemble both artifacts.
//!
//! Nothing touches the filesystem here; the caller writes the artifacts only
//! after this returns Ok.

use crate::Result;
use crate::emit::{MacroEmitter, Record};
use crate::error::{CompileError, Notice};
use crate::render;
use crate::spec::SpecTree;
use crate::tree::IndexedTree;

use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Artifacts {
    pub header: String,
    pub source: String,
    /// Number of nodes, i.e. records and macros each.
    pub signals: usize,
}

/// `header_file_name` is what the source `#include`s (a basename).
pub fn compile(
    tree: &SpecTree,
    header_file_name: &str,
    notify: &mut dyn FnMut(Notice),
) -> Result<Artifacts> {
    let indexed = IndexedTree::build(tree);
    let macro_emitter = MacroEmitter::new()?;

    let mut records = String::new();
    let mut macros = String::new();
    // macro name -> path of the node that claimed it
    let mut claimed: BTreeMap<String, &str> = BTreeMap::new();
    for node in indexed.nodes() {
        let record = Record::from_node(node, notify)?;

        let name = macro_emitter.macro_name(&node.path);
        if let Some(first) = claimed.get(&name) {
            return Err(CompileError::MacroNameCollision {
                name,
                first: first.to_string(),
                second: node.path.clone(),
            }
            .into());
        }
        claimed.insert(name, &node.path);

        records.push_str(&record.to_string());
        macros.push_str(&macro_emitter.emit(node));
    }

    Ok(Artifacts {
        header: render::render_header(&macros),
        source: render::render_source(&records, header_file_name),
        signals: indexed.len(),
    })
}
