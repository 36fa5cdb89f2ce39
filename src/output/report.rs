// Inconsistency report generation
//
// Renders the audit summary through a Tera template into a self-contained
// HTML document and opens it in the default viewer. The template is looked
// up on disk; if it is missing the report step is skipped, not failed.

use crate::analysis::InconsistencyReport;
use crate::config::ReportConfig;
use crate::error::Result;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};

/// Chart colors, cycled per type label
const DATASET_COLORS: [&str; 5] = [
    "rgba(75, 192, 192, 0.7)",
    "rgba(255, 99, 132, 0.7)",
    "rgba(54, 162, 235, 0.7)",
    "rgba(255, 206, 86, 0.7)",
    "rgba(153, 102, 255, 0.7)",
];

/// One table row of the report
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportRow {
    pub attribute: String,
    pub types: String,
    pub files: Vec<String>,
}

/// One Chart.js dataset: occurrence of a type label per attribute
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<u32>,
    #[serde(rename = "backgroundColor")]
    pub background_color: String,
}

/// Writes the HTML inconsistency report
pub struct ReportWriter {
    template_path: PathBuf,
    open_in_viewer: bool,
}

impl ReportWriter {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            template_path: config.template.clone(),
            open_in_viewer: config.open_in_viewer,
        }
    }

    /// Render the report into `output_dir`
    ///
    /// Returns `None` when the template cannot be located; the caller reports
    /// the skip and the rest of the run continues.
    pub fn write(
        &self,
        report: &InconsistencyReport,
        output_dir: &Path,
    ) -> Result<Option<PathBuf>> {
        if !self.template_path.exists() {
            return Ok(None);
        }

        let template = fs::read_to_string(&self.template_path)?;
        let mut tera = Tera::default();
        tera.add_raw_template("report.html", &template)?;

        let html = tera.render("report.html", &build_context(report))?;

        let output_path = output_dir.join("inconsistency_report.html");
        fs::write(&output_path, html)?;

        if self.open_in_viewer {
            // Best effort; a headless environment has no viewer to open
            let _ = webbrowser::open(&output_path.to_string_lossy());
        }

        Ok(Some(output_path))
    }
}

/// Build the template context: table rows plus chart labels and datasets
fn build_context(report: &InconsistencyReport) -> Context {
    let rows: Vec<ReportRow> = report
        .summaries
        .iter()
        .map(|(name, summary)| ReportRow {
            attribute: name.clone(),
            types: summary
                .types
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
            files: summary
                .files
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        })
        .collect();

    let labels: Vec<&String> = report.summaries.keys().collect();

    let mut type_labels: Vec<String> = report
        .summaries
        .values()
        .flat_map(|s| s.types.iter().cloned())
        .collect();
    type_labels.sort();
    type_labels.dedup();

    let datasets: Vec<ChartDataset> = type_labels
        .iter()
        .enumerate()
        .map(|(i, type_label)| {
            let data = report
                .summaries
                .values()
                .map(|summary| u32::from(summary.types.contains(type_label)))
                .collect();
            ChartDataset {
                label: type_label.clone(),
                data,
                background_color: DATASET_COLORS[i % DATASET_COLORS.len()].to_string(),
            }
        })
        .collect();

    let mut context = Context::new();
    context.insert("rows", &rows);
    context.insert("chart_labels", &labels);
    context.insert("chart_datasets", &datasets);
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AttributeSummary;
    use std::collections::{BTreeMap, BTreeSet};
    use tempfile::TempDir;

    fn sample_report() -> InconsistencyReport {
        let mut summaries = BTreeMap::new();
        summaries.insert(
            "name".to_string(),
            AttributeSummary {
                types: BTreeSet::from(["int".to_string(), "str".to_string()]),
                files: BTreeSet::from([PathBuf::from("order.py"), PathBuf::from("user.py")]),
            },
        );
        summaries.insert(
            "total".to_string(),
            AttributeSummary {
                types: BTreeSet::from(["float".to_string(), "int".to_string()]),
                files: BTreeSet::from([PathBuf::from("order.py")]),
            },
        );
        InconsistencyReport { summaries }
    }

    #[test]
    fn test_build_context_rows() {
        let context = build_context(&sample_report());
        let rows = context.get("rows").unwrap().as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["attribute"], "name");
        assert_eq!(rows[0]["types"], "int, str");
    }

    #[test]
    fn test_build_context_datasets() {
        let context = build_context(&sample_report());
        let datasets = context.get("chart_datasets").unwrap().as_array().unwrap();
        // Distinct types across the report: float, int, str
        assert_eq!(datasets.len(), 3);

        let int_set = datasets
            .iter()
            .find(|d| d["label"] == "int")
            .expect("int dataset");
        // "int" occurs for both attributes
        assert_eq!(int_set["data"].as_array().unwrap().len(), 2);
        assert_eq!(int_set["data"][0], 1);
        assert_eq!(int_set["data"][1], 1);

        let str_set = datasets.iter().find(|d| d["label"] == "str").unwrap();
        assert_eq!(str_set["data"][0], 1);
        assert_eq!(str_set["data"][1], 0);
        assert!(str_set["backgroundColor"].as_str().unwrap().starts_with("rgba("));
    }

    #[test]
    fn test_write_skips_when_template_missing() {
        let out = TempDir::new().unwrap();
        let writer = ReportWriter {
            template_path: PathBuf::from("/nonexistent/report.html.tera"),
            open_in_viewer: false,
        };

        let result = writer.write(&sample_report(), out.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_write_renders_report() {
        let dir = TempDir::new().unwrap();
        let template_path = dir.path().join("report.html.tera");
        fs::write(
            &template_path,
            "<table>{% for row in rows %}<tr><td>{{ row.attribute }}</td><td>{{ row.types }}</td></tr>{% endfor %}</table>\
             <script>const data = {{ chart_datasets | json_encode() }};</script>",
        )
        .unwrap();

        let writer = ReportWriter {
            template_path,
            open_in_viewer: false,
        };

        let path = writer
            .write(&sample_report(), dir.path())
            .unwrap()
            .expect("report written");
        let html = fs::read_to_string(&path).unwrap();
        assert!(html.contains("<td>name</td>"));
        assert!(html.contains("int, str"));
        assert!(html.contains("backgroundColor"));
        assert!(path.ends_with("inconsistency_report.html"));
    }

    #[test]
    fn test_empty_report_renders_empty_table() {
        let dir = TempDir::new().unwrap();
        let template_path = dir.path().join("report.html.tera");
        fs::write(
            &template_path,
            "{% for row in rows %}{{ row.attribute }}{% endfor %}done",
        )
        .unwrap();

        let writer = ReportWriter {
            template_path,
            open_in_viewer: false,
        };

        let path = writer
            .write(&InconsistencyReport::default(), dir.path())
            .unwrap()
            .unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "done");
    }
}
