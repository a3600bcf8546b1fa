//! UUID databases registered with `-i prefix:file`.
//!
//! A database is a JSON object mapping a signal path to its UUID. Signals
//! that lack a `uuid` and fall under a registered prefix get the recorded
//! UUID, or a fresh one that is recorded for the next run.

use crate::Result;
use crate::spec::node::{SpecTree, child_path};

use anyhow::{Context, bail};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Parsed form of a `prefix:file` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UuidDbArg {
    pub prefix: String,
    pub file: PathBuf,
}

impl FromStr for UuidDbArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.split(':').collect::<Vec<_>>().as_slice() {
            [prefix, file] if !file.is_empty() => Ok(Self {
                prefix: prefix.to_string(),
                file: PathBuf::from(file),
            }),
            _ => Err(format!("expected 'prefix:id_file', got '{}'", s)),
        }
    }
}

#[derive(Debug)]
pub struct UuidDb {
    prefix: String,
    file: PathBuf,
    entries: BTreeMap<String, String>,
    dirty: bool,
}

impl UuidDb {
    /// Open a database, starting empty if the file does not exist yet.
    pub fn open(arg: &UuidDbArg) -> Result<Self> {
        let entries = if arg.file.exists() {
            let text = fs::read_to_string(&arg.file)
                .with_context(|| format!("read uuid database {}", arg.file.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parse uuid database {}", arg.file.display()))?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            prefix: arg.prefix.clone(),
            file: arg.file.clone(),
            entries,
            dirty: false,
        })
    }

    /// Whole-segment prefix match; an empty prefix covers every path.
    pub fn covers(&self, path: &str) -> bool {
        if self.prefix.is_empty() || path == self.prefix {
            return true;
        }
        path.strip_prefix(self.prefix.as_str())
            .is_some_and(|rest| rest.starts_with('.'))
    }

    pub fn uuid_for(&mut self, path: &str) -> String {
        if let Some(existing) = self.entries.get(path) {
            return existing.clone();
        }
        let fresh = uuid::Uuid::new_v4().simple().to_string();
        self.entries.insert(path.to_string(), fresh.clone());
        self.dirty = true;
        fresh
    }

    pub fn save(&self) -> Result<()> {
        if !self.dirty && self.file.exists() {
            return Ok(());
        }
        let text = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.file, text)
            .with_context(|| format!("write uuid database {}", self.file.display()))?;
        Ok(())
    }
}

/// Fill in missing UUIDs from the registered databases.
///
/// The longest matching prefix wins when databases overlap.
pub fn assign_uuids(tree: &mut SpecTree, dbs: &mut [UuidDb]) -> Result<()> {
    if dbs.is_empty() {
        return Ok(());
    }
    let mut seen = Vec::new();
    for db in dbs.iter() {
        if seen.contains(&&db.prefix) {
            bail!("uuid database prefix '{}' registered twice", db.prefix);
        }
        seen.push(&db.prefix);
    }
    visit(tree, None, dbs);
    Ok(())
}

fn visit(entries: &mut SpecTree, parent_path: Option<&str>, dbs: &mut [UuidDb]) {
    for (name, node) in entries.iter_mut() {
        let path = child_path(parent_path, name);

        if node.uuid.is_none() {
            let owner = dbs
                .iter_mut()
                .filter(|db| db.covers(&path))
                .max_by_key(|db| db.prefix.len());
            if let Some(db) = owner {
                node.uuid = Some(db.uuid_for(&path));
            }
        }

        // Only nodes the compiler will emit get database entries.
        if node.is_branch() {
            visit(&mut node.children, Some(path.as_str()), dbs);
        }
    }
}
