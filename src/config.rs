use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
    pub report: ReportConfig,
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: String,
    pub description: Option<String>,
}

/// Analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Path patterns excluded from the directory walk
    pub exclude: Vec<String>,
    /// Base-class name marking a class as a data-model schema
    pub base_model: String,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub diagram_format: DiagramFormat,
}

/// Report settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Template the report is rendered from; if missing, the report step is skipped
    pub template: PathBuf,
    /// Open the finished report in the default viewer
    pub open_in_viewer: bool,
}

/// Image format passed to the rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiagramFormat {
    #[default]
    Png,
    Svg,
}

impl DiagramFormat {
    /// File extension and `dot -T` argument
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagramFormat::Png => "png",
            DiagramFormat::Svg => "svg",
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "Untitled Project".to_string(),
            description: None,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            exclude: vec![
                "__pycache__".to_string(),
                ".git".to_string(),
                "venv".to_string(),
                ".venv".to_string(),
                ".tox".to_string(),
                ".eggs".to_string(),
            ],
            base_model: "BaseModel".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./schemalens-out"),
            diagram_format: DiagramFormat::default(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from("templates/report.html.tera"),
            open_in_viewer: true,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.analysis.base_model.is_empty() {
            return Err(Error::config_validation("base_model must not be empty"));
        }

        if self.output.directory.as_os_str().is_empty() {
            return Err(Error::config_validation("output directory must not be empty"));
        }

        if self.report.template.as_os_str().is_empty() {
            return Err(Error::config_validation("report template must not be empty"));
        }

        Ok(())
    }
}
