//! Flattened, indexed view of a SpecTree.
//!
//! Nodes live in an arena in pre-order. A node's index is its arena position,
//! its parent is referenced by index, and its path is the dotted chain of
//! names from the root level.

use crate::spec::{SpecNode, SpecTree, child_path};

#[derive(Debug, Clone)]
pub struct IndexedNode<'a> {
    pub index: usize,
    /// None for root-level entries.
    pub parent_index: Option<usize>,
    pub name: &'a str,
    pub path: String,
    pub spec: &'a SpecNode,
}

impl IndexedNode<'_> {
    /// Parent index as written into the generated record (-1 for no parent).
    pub fn parent_index_c(&self) -> i64 {
        self.parent_index.map_or(-1, |p| p as i64)
    }
}

#[derive(Debug, Clone, Default)]
pub struct IndexedTree<'a> {
    nodes: Vec<IndexedNode<'a>>,
}

impl<'a> IndexedTree<'a> {
    /// Index the whole tree and build every node's path in one walk.
    pub fn build(tree: &'a SpecTree) -> Self {
        let mut indexed = Self::default();
        indexed.visit(tree, None);
        indexed
    }

    // The arena length is the running counter: a sibling is numbered only
    // after the previous sibling's whole subtree has been pushed.
    fn visit(&mut self, entries: &'a SpecTree, parent_index: Option<usize>) {
        for (name, spec) in entries {
            let index = self.nodes.len();
            let parent_path = parent_index.map(|p| self.nodes[p].path.as_str());
            let path = child_path(parent_path, name);

            self.nodes.push(IndexedNode {
                index,
                parent_index,
                name,
                path,
                spec,
            });

            if spec.is_branch() {
                self.visit(&spec.children, Some(index));
            }
        }
    }

    /// All nodes in ascending index order.
    pub fn nodes(&self) -> &[IndexedNode<'a>] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}
