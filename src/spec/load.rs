//! Load a vspec tree from JSON, resolving `$include` directives.
//!
//! Files are looked up in the current directory first, then in each include
//! directory in the order given on the command line. An included file's
//! top-level entries are appended to the including branch's children.

use crate::Result;
use crate::spec::node::{SpecTree, child_path, parse_tree};

use anyhow::{Context, bail};
use std::fs;
use std::path::{Path, PathBuf};

pub struct Loader {
    search_dirs: Vec<PathBuf>,
}

impl Loader {
    /// `include_dirs` are searched after the current directory.
    pub fn new(include_dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut search_dirs = vec![PathBuf::from(".")];
        search_dirs.extend(include_dirs);
        Self { search_dirs }
    }

    pub fn load(&self, file: &str) -> Result<SpecTree> {
        let mut stack = Vec::new();
        self.load_file(file, &mut stack)
    }

    /// Find `file` in the search directories. Absolute paths are taken as-is.
    pub fn resolve(&self, file: &str) -> Result<PathBuf> {
        let candidate = Path::new(file);
        if candidate.is_absolute() {
            if candidate.is_file() {
                return Ok(candidate.to_path_buf());
            }
            bail!("vspec file not found: {}", file);
        }

        for dir in &self.search_dirs {
            let path = dir.join(candidate);
            if path.is_file() {
                return Ok(path);
            }
        }

        let searched: Vec<String> = self
            .search_dirs
            .iter()
            .map(|d| d.display().to_string())
            .collect();
        bail!(
            "vspec file {} not found in include dirs [{}]",
            file,
            searched.join(", ")
        );
    }

    fn load_file(&self, file: &str, stack: &mut Vec<PathBuf>) -> Result<SpecTree> {
        let path = self.resolve(file)?;
        let canonical = fs::canonicalize(&path)
            .with_context(|| format!("resolve vspec file {}", path.display()))?;

        if stack.contains(&canonical) {
            let chain: Vec<String> = stack
                .iter()
                .chain(std::iter::once(&canonical))
                .map(|p| p.display().to_string())
                .collect();
            bail!("include cycle: {}", chain.join(" -> "));
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("read vspec file {}", path.display()))?;
        let mut tree = parse_tree(&text)
            .with_context(|| format!("parse vspec file {}", path.display()))?;

        stack.push(canonical);
        self.splice_includes(&mut tree, None, stack)
            .with_context(|| format!("while loading {}", path.display()))?;
        stack.pop();

        Ok(tree)
    }

    fn splice_includes(
        &self,
        entries: &mut SpecTree,
        parent_path: Option<&str>,
        stack: &mut Vec<PathBuf>,
    ) -> Result<()> {
        for (name, node) in entries.iter_mut() {
            let path = child_path(parent_path, name);

            if !node.includes.is_empty() {
                if !node.is_branch() {
                    bail!("{}: $include is only allowed on branch nodes", path);
                }
                for file in std::mem::take(&mut node.includes) {
                    let included = self.load_file(&file, stack)?;
                    for (child_name, child) in included {
                        if node.children.contains_key(&child_name) {
                            bail!(
                                "{}: include {} redefines child '{}'",
                                path,
                                file,
                                child_name
                            );
                        }
                        node.children.insert(child_name, child);
                    }
                }
            }

            // Leaves may carry a children-shaped attribute; it is never walked.
            if node.is_branch() {
                self.splice_includes(&mut node.children, Some(path.as_str()), stack)?;
            }
        }
        Ok(())
    }
}
