// Cross-class attribute consistency audit
//
// Indexes every attribute name against the normalized core types it is
// declared with across the whole class set. A name bound to more than one
// distinct core type is an inconsistency.

use crate::analysis::types;
use crate::analysis::ModelSet;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Types and defining files observed for one attribute name
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AttributeSummary {
    /// Distinct normalized core types
    pub types: BTreeSet<String>,
    /// Distinct files where classes using the name are defined
    pub files: BTreeSet<PathBuf>,
}

/// The audit result: attribute names bound to conflicting core types
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct InconsistencyReport {
    /// Per-name summaries, only for inconsistent names
    pub summaries: BTreeMap<String, AttributeSummary>,
}

impl InconsistencyReport {
    /// Whether the given attribute name is inconsistent
    pub fn is_inconsistent(&self, name: &str) -> bool {
        self.summaries.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }
}

/// Audit all classes in the set for attribute-type conflicts
///
/// Pure aggregation: the outcome does not depend on traversal order beyond
/// which file won a class-name collision upstream.
pub fn find_inconsistencies(models: &ModelSet) -> InconsistencyReport {
    let mut index: BTreeMap<String, AttributeSummary> = BTreeMap::new();

    for class in models.classes() {
        for field in &class.fields {
            let entry = index.entry(field.name.clone()).or_default();
            entry
                .types
                .insert(types::normalize(&field.type_name).to_string());
            if let Some(file) = models.file_of(&class.name) {
                entry.files.insert(file.to_path_buf());
            }
        }
    }

    let summaries = index
        .into_iter()
        .filter(|(_, summary)| summary.types.len() > 1)
        .collect();

    InconsistencyReport { summaries }
}
