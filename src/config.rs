//! YAML report configuration.
//!
//! ```yaml
//! title: Opinion analysis
//! layout: 16x9
//! output: report.pptx
//! templates:
//!   - slides/slide1.html
//!   - { id: compare, path: slides/slide5.html }
//! charts:
//!   - template: slide1.html
//!     placeholder: donut-chart
//!     kind: pie
//!     series:
//!       - { name: share, labels: [positive, negative], values: [60, 40] }
//!     style:
//!       colors: ["00CC96", "E33737"]
//!       show_percent: true
//! ```
//!
//! Relative paths resolve against the directory holding the configuration file.

use crate::chart::{ChartKind, ChartSpec, Series, StyleConfig};
use crate::directory::ChartDirectory;
use crate::document::SlideLayout;
use crate::error::ConfigError;
use crate::report::ReportMetadata;
use crate::template::TemplateRef;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// One entry of the `templates` list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TemplateEntry {
    /// Plain path; the id is the file name
    Path(PathBuf),
    /// Path with an explicit id
    Named { id: String, path: PathBuf },
}

/// One entry of the `charts` list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartConfig {
    /// Template id
    pub template: String,
    /// Placeholder id
    pub placeholder: String,
    /// Chart kind
    pub kind: ChartKind,
    /// Series in legend order
    pub series: Vec<Series>,
    /// Styling options
    #[serde(default)]
    pub style: StyleConfig,
}

impl ChartConfig {
    /// Chart spec declared by this entry, not yet validated.
    pub fn spec(&self) -> ChartSpec {
        ChartSpec::new(self.kind, self.series.clone()).with_style(self.style.clone())
    }
}

/// A report run declared in YAML.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Document title
    pub title: String,
    /// Slide size
    #[serde(default)]
    pub layout: SlideLayout,
    /// Author
    #[serde(default)]
    pub author: Option<String>,
    /// Subject
    #[serde(default)]
    pub subject: Option<String>,
    /// Output path
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Templates in slide order
    pub templates: Vec<TemplateEntry>,
    /// Declared charts
    #[serde(default)]
    pub charts: Vec<ChartConfig>,
    /// Directory relative paths resolve against
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl ReportConfig {
    /// Load a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml_str(&yaml)?;
        config.base_dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf);
        Ok(config)
    }

    /// Parse a configuration from YAML text. Relative paths stay relative.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_saphyr::from_str(yaml).map_err(|err| ConfigError::Yaml(err.to_string()))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match self.base_dir {
            Some(ref base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Document metadata.
    pub fn metadata(&self) -> ReportMetadata {
        ReportMetadata {
            title: self.title.clone(),
            layout: self.layout,
            author: self.author.clone(),
            subject: self.subject.clone(),
        }
    }

    /// Template references in slide order, paths resolved.
    pub fn templates(&self) -> Vec<TemplateRef> {
        self.templates
            .iter()
            .map(|entry| match entry {
                TemplateEntry::Path(path) => {
                    let mut template = TemplateRef::new(path.clone());
                    template.path = self.resolve(path);
                    template
                },
                TemplateEntry::Named { id, path } => TemplateRef::with_id(id.clone(), self.resolve(path)),
            })
            .collect()
    }

    /// Chart directory with every spec validated.
    pub fn directory(&self) -> crate::Result<ChartDirectory> {
        let mut directory = ChartDirectory::new();
        for chart in &self.charts {
            directory.insert(chart.template.clone(), chart.placeholder.clone(), chart.spec())?;
        }
        Ok(directory)
    }

    /// Output path: `overridden` if given, else the configured one.
    pub fn output_path(&self, overridden: Option<&Path>) -> Result<PathBuf, ConfigError> {
        match (overridden, self.output.as_deref()) {
            (Some(path), _) => Ok(path.to_path_buf()),
            (None, Some(path)) => Ok(self.resolve(path)),
            (None, None) => Err(ConfigError::MissingOutput),
        }
    }
}
