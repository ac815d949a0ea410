//! ACL name ⇄ dataplane index mapping.
//!
//! The dataplane only knows ACLs by index and rules by position. The
//! context remembers the names they were written under, and invents stable
//! names for anything read back that was not written through it.

use std::collections::HashMap;

use tracing::debug;

/// Default prefix of invented ACL and ACE names.
pub const DEFAULT_ARTIFICIAL_PREFIX: &str = "vpp-acl-";

#[derive(Debug, Clone, Default)]
struct AclEntry {
    index: u32,
    ace_names: Vec<String>,
}

/// Naming context for one kind of ACL.
#[derive(Debug, Clone)]
pub struct AclContextManager {
    prefix: String,
    by_name: HashMap<String, AclEntry>,
    by_index: HashMap<u32, String>,
}

impl Default for AclContextManager {
    fn default() -> Self {
        Self::new(DEFAULT_ARTIFICIAL_PREFIX)
    }
}

impl AclContextManager {
    /// Creates an empty context inventing names under `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            by_name: HashMap::new(),
            by_index: HashMap::new(),
        }
    }

    /// Stores the mapping of an ACL and the names of its entries in order.
    ///
    /// A previous mapping of the same name or index is replaced.
    pub fn add_acl(&mut self, index: u32, name: &str, ace_names: Vec<String>) {
        if let Some(old) = self.by_name.remove(name) {
            self.by_index.remove(&old.index);
        }
        if let Some(old_name) = self.by_index.insert(index, name.to_string()) {
            if old_name != name {
                self.by_name.remove(&old_name);
            }
        }
        debug!(acl = name, index, aces = ace_names.len(), "Stored ACL mapping");
        self.by_name
            .insert(name.to_string(), AclEntry { index, ace_names });
    }

    pub fn contains_acl(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn acl_index(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).map(|entry| entry.index)
    }

    /// Returns the name of the ACL at `index`, inventing one if none is
    /// stored.
    pub fn acl_name(&mut self, index: u32) -> String {
        if let Some(name) = self.by_index.get(&index) {
            return name.clone();
        }
        let name = format!("{}{}", self.prefix, index);
        debug!(acl = %name, index, "Invented ACL name");
        self.add_acl(index, &name, Vec::new());
        name
    }

    /// Removes the mapping of an ACL and returns its index.
    pub fn remove_acl(&mut self, name: &str) -> Option<u32> {
        let entry = self.by_name.remove(name)?;
        self.by_index.remove(&entry.index);
        Some(entry.index)
    }

    /// Returns the name of the entry at `ace_index` of an ACL, inventing one
    /// if none is stored.
    ///
    /// Invented names are only remembered for ACLs this context knows.
    pub fn ace_name(&mut self, acl_name: &str, ace_index: usize) -> String {
        let artificial = format!("{}rule{}", self.prefix, ace_index);
        let Some(entry) = self.by_name.get_mut(acl_name) else {
            return artificial;
        };
        if let Some(name) = entry.ace_names.get(ace_index) {
            return name.clone();
        }
        while entry.ace_names.len() < ace_index {
            let position = entry.ace_names.len();
            entry
                .ace_names
                .push(format!("{}rule{}", self.prefix, position));
        }
        entry.ace_names.push(artificial.clone());
        artificial
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
