// Graphviz rendering backend
//
// Thin collaborator around the `dot` executable: turns a diagram description
// into DOT source and hands it off for image rendering. Failures surface as
// errors for the caller to report; nothing is retried.

use crate::config::DiagramFormat;
use crate::error::{Error, Result};
use crate::output::diagram::{ArrowHead, Diagram, EdgeStyle, NodeShape, RowKind};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Renders diagram descriptions to image files via Graphviz
pub struct GraphvizRenderer {
    format: DiagramFormat,
}

impl GraphvizRenderer {
    pub fn new(format: DiagramFormat) -> Self {
        Self { format }
    }

    /// Render a diagram into `output_dir`, returning the image path
    pub fn render(&self, diagram: &Diagram, output_dir: &Path) -> Result<PathBuf> {
        let output_path = output_dir.join(format!("{}.{}", diagram.name, self.format.as_str()));
        let source = to_dot(diagram);

        let mut child = Command::new("dot")
            .arg(format!("-T{}", self.format.as_str()))
            .arg("-o")
            .arg(&output_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::render(&output_path, format!("failed to run dot: {}", e)))?;

        if let Some(stdin) = child.stdin.as_mut() {
            stdin
                .write_all(source.as_bytes())
                .map_err(|e| Error::render(&output_path, format!("failed to write dot input: {}", e)))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| Error::render(&output_path, format!("dot did not finish: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::render(
                &output_path,
                format!("dot exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        Ok(output_path)
    }
}

/// Emit DOT source for a diagram description
pub fn to_dot(diagram: &Diagram) -> String {
    let mut lines = Vec::new();
    lines.push(format!("digraph {} {{", diagram.name));
    lines.push("    rankdir=LR;".to_string());
    lines.push("    splines=spline;".to_string());
    lines.push("    nodesep=1;".to_string());
    lines.push("    ranksep=1.2;".to_string());

    for node in &diagram.nodes {
        match &node.shape {
            NodeShape::Record { header, rows } => {
                let mut label = String::from("<TABLE BORDER='0' CELLBORDER='1' CELLSPACING='0'>");
                label.push_str(&format!(
                    "<TR><TD BGCOLOR='lightblue'><B>{}</B></TD></TR>",
                    html_escape(header)
                ));
                for row in rows {
                    let text = html_escape(&row.text);
                    let cell = match row.kind {
                        RowKind::Inconsistent => format!(
                            "<TD ALIGN='LEFT' BGCOLOR='#FFC0C0'><B>{}</B></TD>",
                            text
                        ),
                        RowKind::Nested => {
                            format!("<TD ALIGN='LEFT' BGCOLOR='lightyellow'>{}</TD>", text)
                        }
                        RowKind::Plain => format!("<TD ALIGN='LEFT'>{}</TD>", text),
                    };
                    label.push_str(&format!("<TR>{}</TR>", cell));
                }
                label.push_str("</TABLE>");
                lines.push(format!(
                    "    {} [shape=plaintext, label=<{}>];",
                    node.id, label
                ));
            }
            NodeShape::Folder { title } => {
                lines.push(format!(
                    "    {} [shape=folder, style=filled, fillcolor=lightgrey, label=<<B>{}</B>>];",
                    node.id,
                    html_escape(title)
                ));
            }
        }
    }

    for edge in &diagram.edges {
        let mut attrs = vec!["color=darkgreen".to_string()];
        match edge.arrow {
            ArrowHead::Vee => attrs.push("arrowhead=vee".to_string()),
            ArrowHead::Empty => attrs.push("arrowhead=empty".to_string()),
        }
        if edge.style == EdgeStyle::Dashed {
            attrs.push("style=dashed".to_string());
        }
        if let Some(label) = &edge.label {
            attrs.push(format!("label=\"{}\"", label.replace('"', "\\\"")));
        }
        lines.push(format!(
            "    {} -> {} [{}];",
            edge.from,
            edge.to,
            attrs.join(", ")
        ));
    }

    lines.push("}".to_string());
    lines.join("\n")
}

/// Escape HTML special characters inside label markup
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
