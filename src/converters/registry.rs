//! The tracked-value registry of generated scripts
//!
//! Generated scripts keep one module-level object mapping a logical name
//! (a path parameter name, or `franchiseId`) to the last value captured from
//! a response. It lives for one k6 execution and is shared by every virtual
//! user without synchronization: reads and writes are plain property
//! accesses and concurrent users may overwrite each other's values.

use super::js;

/// Registry key that franchise creation responses are always stored under
pub const FRANCHISE_KEY: &str = "franchiseId";

/// Renders declaration, lookup and store code for the registry object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registry {
    ident: &'static str,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            ident: "trackedValues",
        }
    }
}

impl Registry {
    pub fn new(ident: &'static str) -> Self {
        Self { ident }
    }

    pub fn ident(&self) -> &'static str {
        self.ident
    }

    /// Module-level declaration, preceded by its comment line
    pub fn declaration(&self) -> Vec<String> {
        vec![
            "// Shared state for tracked values across VUs (unsynchronized)".to_string(),
            format!("const {} = {{}};", self.ident),
        ]
    }

    /// Read expression for one key
    pub fn lookup(&self, key: &str) -> String {
        js::member(self.ident, key)
    }

    /// Lookup chain ending in a fallback expression (`a || b || 'c'`)
    pub fn lookup_chain(&self, keys: &[&str], fallback: &str) -> String {
        let mut parts: Vec<String> = keys.iter().map(|key| self.lookup(key)).collect();
        parts.push(fallback.to_string());
        parts.join(" || ")
    }

    /// Assignment statement storing `value_expr` under `key`
    pub fn store(&self, key: &str, value_expr: &str) -> String {
        format!("{}[{}] = {};", self.ident, js::string_literal(key), value_expr)
    }
}
