use crate::Result;
use crate::tree::IndexedNode;

use regex::Regex;

/// Renders `#define VSS_<PATH>() vss_signal_by_index(<index>)` lines.
pub struct MacroEmitter {
    non_ident: Regex,
}

impl MacroEmitter {
    pub fn new() -> Result<Self> {
        // Path separators and anything else a C identifier cannot hold.
        const NON_IDENT_RE: &str = r"[^A-Za-z0-9_]";
        Ok(Self {
            non_ident: Regex::new(NON_IDENT_RE)?,
        })
    }

    pub fn macro_name(&self, path: &str) -> String {
        let ident = self.non_ident.replace_all(path, "_");
        format!("VSS_{}", ident.to_ascii_uppercase())
    }

    pub fn emit(&self, node: &IndexedNode<'_>) -> String {
        format!(
            "#define {}() vss_signal_by_index({})\n",
            self.macro_name(&node.path),
            node.index
        )
    }
}
