// Diagram graph construction
//
// Builds the node/edge descriptions consumed by the rendering backend. Pure
// data producers: nothing here touches the filesystem or the renderer.

use crate::analysis::{InconsistencyReport, ModelSet};
use crate::parser::ModuleAst;
use serde::Serialize;
use std::collections::HashSet;

/// Visual classification of one label row
///
/// Exactly one applies per row: inconsistent wins over nested, nested over
/// plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowKind {
    Inconsistent,
    Nested,
    Plain,
}

/// One row of a multi-row node label
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LabelRow {
    pub text: String,
    pub kind: RowKind,
}

impl LabelRow {
    pub fn new(text: impl Into<String>, kind: RowKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Node label shape
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum NodeShape {
    /// Header row plus zero or more classified rows
    Record { header: String, rows: Vec<LabelRow> },
    /// Folder-style node for a source file
    Folder { title: String },
}

/// One diagram node
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiagramNode {
    pub id: String,
    pub shape: NodeShape,
}

/// Edge line style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EdgeStyle {
    Solid,
    Dashed,
}

/// Edge arrowhead shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArrowHead {
    Vee,
    Empty,
}

/// One directed diagram edge
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiagramEdge {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    pub style: EdgeStyle,
    pub arrow: ArrowHead,
}

/// A complete diagram description
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Diagram {
    pub name: String,
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
}

/// Build the folder-wide model diagram
///
/// One record node per class with a row per field, classified against the
/// inconsistency report; one labeled containment edge per nested reference.
pub fn folder_overview(models: &ModelSet, report: &InconsistencyReport) -> Diagram {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    for class in models.classes() {
        let rows = class
            .fields
            .iter()
            .map(|field| {
                let kind = if report.is_inconsistent(&field.name) {
                    RowKind::Inconsistent
                } else if field.nested {
                    RowKind::Nested
                } else {
                    RowKind::Plain
                };
                LabelRow::new(format!("{}: {}", field.name, field.type_name), kind)
            })
            .collect();

        nodes.push(DiagramNode {
            id: sanitize_id(&class.name),
            shape: NodeShape::Record {
                header: class.name.clone(),
                rows,
            },
        });
    }

    for reference in models.nested_references() {
        edges.push(DiagramEdge {
            from: sanitize_id(&reference.class),
            to: sanitize_id(&reference.target),
            label: Some(reference.field.clone()),
            style: EdgeStyle::Solid,
            arrow: ArrowHead::Vee,
        });
    }

    Diagram {
        name: "model_diagram".to_string(),
        nodes,
        edges,
    }
}

/// Build the structure diagram for one file
///
/// A folder-shaped root node, one record node per top-level class listing
/// its methods, one node per standalone function, and dashed inheritance
/// edges between classes of the same file.
pub fn file_structure(module: &ModuleAst) -> Diagram {
    let stem = module
        .path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "module".to_string());
    let root_id = sanitize_id(&stem);

    let mut nodes = vec![DiagramNode {
        id: root_id.clone(),
        shape: NodeShape::Folder {
            title: format!("{}.py", stem),
        },
    }];
    let mut edges = Vec::new();

    for class in &module.classes {
        let id = format!("class_{}", sanitize_id(&class.name));
        let rows = class
            .methods
            .iter()
            .map(|m| LabelRow::new(format!("{}()", m), RowKind::Nested))
            .collect();

        nodes.push(DiagramNode {
            id: id.clone(),
            shape: NodeShape::Record {
                header: class.name.clone(),
                rows,
            },
        });
        edges.push(DiagramEdge {
            from: root_id.clone(),
            to: id,
            label: None,
            style: EdgeStyle::Solid,
            arrow: ArrowHead::Vee,
        });
    }

    for function in &module.functions {
        let id = format!("func_{}", sanitize_id(&function.name));
        nodes.push(DiagramNode {
            id: id.clone(),
            shape: NodeShape::Record {
                header: format!("{}()", function.name),
                rows: Vec::new(),
            },
        });
        edges.push(DiagramEdge {
            from: root_id.clone(),
            to: id,
            label: None,
            style: EdgeStyle::Solid,
            arrow: ArrowHead::Vee,
        });
    }

    // Inheritance edges only between classes of this same file
    let local: HashSet<&str> = module.classes.iter().map(|c| c.name.as_str()).collect();
    for class in &module.classes {
        for base in class.bare_bases() {
            if local.contains(base) {
                edges.push(DiagramEdge {
                    from: format!("class_{}", sanitize_id(base)),
                    to: format!("class_{}", sanitize_id(&class.name)),
                    label: None,
                    style: EdgeStyle::Dashed,
                    arrow: ArrowHead::Empty,
                });
            }
        }
    }

    Diagram {
        name: format!("file_{}", stem),
        nodes,
        edges,
    }
}

/// Sanitize a string for use as a node ID
fn sanitize_id(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}
