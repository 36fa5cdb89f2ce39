// Folder-wide model aggregation

pub mod consistency;
pub mod extract;
pub mod types;

pub use consistency::{find_inconsistencies, AttributeSummary, InconsistencyReport};
pub use extract::{extract, ClassRecord, FieldRecord, FileModels, NestedReference};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::parser::PythonParser;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The aggregated class table for one analysis run
///
/// Merging is an explicit ordered step: classes keep their first-seen table
/// position, and a later definition under the same name overwrites the
/// earlier one (last write wins) and repoints the defining file. Class names
/// are assumed unique across the analyzed folder; the overwrite is the
/// documented behavior when they are not.
#[derive(Debug, Default)]
pub struct ModelSet {
    classes: Vec<ClassRecord>,
    index: HashMap<String, usize>,
    class_files: HashMap<String, PathBuf>,
    nested: Vec<NestedReference>,
}

impl ModelSet {
    /// Merge one file's extraction output into the set
    pub fn merge_file(&mut self, file: FileModels) {
        for class in file.classes {
            self.class_files.insert(class.name.clone(), file.path.clone());
            match self.index.get(&class.name) {
                Some(&slot) => self.classes[slot] = class,
                None => {
                    self.index.insert(class.name.clone(), self.classes.len());
                    self.classes.push(class);
                }
            }
        }
        self.nested.extend(file.nested);
    }

    /// Classes in insertion order
    pub fn classes(&self) -> impl Iterator<Item = &ClassRecord> {
        self.classes.iter()
    }

    /// Look up a class by name
    pub fn get(&self, name: &str) -> Option<&ClassRecord> {
        self.index.get(name).map(|&slot| &self.classes[slot])
    }

    /// The file a class was defined in
    pub fn file_of(&self, name: &str) -> Option<&Path> {
        self.class_files.get(name).map(PathBuf::as_path)
    }

    /// All containment edges, in extraction order
    pub fn nested_references(&self) -> &[NestedReference] {
        &self.nested
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// How many classes carry the base-model flag
    pub fn base_model_count(&self) -> usize {
        self.classes.iter().filter(|c| c.is_base).count()
    }
}

/// Result of analyzing a folder
#[derive(Debug)]
pub struct Analysis {
    /// The merged class table
    pub models: ModelSet,
    /// Discovered source files, in processing order
    pub files: Vec<PathBuf>,
}

/// Orchestrates discovery, extraction and aggregation
pub struct Analyzer {
    config: Config,
    parser: PythonParser,
}

impl Analyzer {
    /// Create a new analyzer with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        let parser = PythonParser::new()?;
        Ok(Self { config, parser })
    }

    /// Analyze every Python file under the root directory
    ///
    /// A file that fails to parse aborts the whole run; aggregation has no
    /// per-file recovery path.
    pub fn analyze(&mut self, root: &Path) -> Result<Analysis> {
        if !root.exists() {
            return Err(Error::PathNotFound(root.to_path_buf()));
        }

        let files = self.discover_files(root)?;
        if files.is_empty() {
            return Err(Error::analysis("No Python files found"));
        }

        let progress = ProgressBar::new(files.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );

        let mut models = ModelSet::default();
        for path in &files {
            let msg = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            progress.set_message(msg);
            progress.inc(1);

            let module = self.parser.parse_file(path)?;
            models.merge_file(extract(&module, &self.config.analysis.base_model));
        }
        progress.finish_and_clear();

        Ok(Analysis { models, files })
    }

    /// Discover all Python files under the root
    ///
    /// Sorted lexicographically so duplicate-class resolution does not depend
    /// on filesystem traversal order.
    fn discover_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if path.is_dir() {
                continue;
            }

            match path.extension() {
                Some(ext) if ext == "py" => {}
                _ => continue,
            }

            if self.should_exclude(path, root) {
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Check if a path matches an exclude pattern
    fn should_exclude(&self, path: &Path, root: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        let relative_str = relative.to_string_lossy();

        self.config
            .analysis
            .exclude
            .iter()
            .any(|pattern| relative_str.contains(pattern.as_str()))
    }
}
