//! Route catalog: an ordered, append-only record of every registered endpoint.
//!
//! The catalog backs both runtime introspection and generated documentation,
//! so its ordering is part of the contract: entries come back exactly in the
//! order they were added.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Width the method column is padded to in [`RouteCatalog::render`].
pub const METHOD_COLUMN_WIDTH: usize = 7;

/// One registered endpoint.
///
/// Entries are created once, at registration time, and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    method: String,
    path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    module: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl RouteEntry {
    pub fn new(
        method: impl AsRef<str>,
        path: impl Into<String>,
        module: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            method: method.as_ref().trim().to_ascii_uppercase(),
            path: path.into(),
            module,
            description,
        }
    }

    /// Upper-cased verb.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Externally visible path, mount prefix included.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Provenance label of the module that registered this entry.
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// One human-readable listing line.
    pub fn render_line(&self) -> String {
        let mut line = format!(
            "{:<width$} {}",
            self.method,
            self.path,
            width = METHOD_COLUMN_WIDTH
        );
        if let Some(module) = &self.module {
            line.push_str("  [");
            line.push_str(module);
            line.push(']');
        }
        line
    }
}

/// Ordered store of [`RouteEntry`] values.
#[derive(Debug, Default, Clone)]
pub struct RouteCatalog {
    entries: Vec<RouteEntry>,
}

impl RouteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return a copy of it. Never rejects and never
    /// deduplicates.
    pub fn add(
        &mut self,
        method: impl AsRef<str>,
        path: impl Into<String>,
        module: Option<String>,
        description: Option<String>,
    ) -> RouteEntry {
        let entry = RouteEntry::new(method, path, module, description);
        self.entries.push(entry.clone());
        entry
    }

    /// Entries in registration order.
    pub fn list(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Human-readable listing, one line per entry, in registration order.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(RouteEntry::render_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Emit the listing through `tracing`, one event per entry.
    pub fn log(&self) {
        tracing::info!(count = self.entries.len(), "registered routes");
        for entry in &self.entries {
            tracing::info!("{}", entry.render_line());
        }
    }

    /// `(method, path)` pairs recorded more than once, in first-seen order.
    ///
    /// Later registrations shadow earlier ones on the router.
    pub fn duplicates(&self) -> Vec<(String, String)> {
        let mut seen: HashMap<(&str, &str), usize> = HashMap::new();
        let mut order = Vec::new();

        for entry in &self.entries {
            let key = (entry.method.as_str(), entry.path.as_str());
            let count = seen.entry(key).or_insert(0);
            *count += 1;
            if *count == 2 {
                order.push((key.0.to_string(), key.1.to_string()));
            }
        }

        order
    }
}
