//! Schemalens - audit data-model classes across a Python codebase
//!
//! Statically extracts class definitions, typed fields and nested references
//! from a folder of Python sources, detects attribute names bound to
//! conflicting core types, and renders the results as Graphviz diagrams and
//! an HTML report.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;

// Re-export main types
pub use analysis::{find_inconsistencies, Analysis, Analyzer, InconsistencyReport, ModelSet};
pub use config::Config;
pub use error::{Error, Result};
