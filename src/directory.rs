//! Chart directory: which chart goes on which placeholder of which template.

use crate::chart::ChartSpec;
use crate::error::{ConfigError, Error, Result};
use crate::template::TemplateRef;
use std::collections::HashSet;

/// One declared chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartEntry {
    /// Template id
    pub template: String,
    /// Placeholder id on that template
    pub placeholder: String,
    /// Validated chart spec
    pub spec: ChartSpec,
}

/// Static mapping `(template id, placeholder id) -> ChartSpec`.
///
/// Specs are validated on insertion and entries keep declaration order, which
/// is the order charts are added to their slide.
#[derive(Debug, Clone, Default)]
pub struct ChartDirectory {
    entries: Vec<ChartEntry>,
    keys: HashSet<(String, String)>,
}

impl ChartDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `spec` and register it for `placeholder` on `template`.
    pub fn insert(
        &mut self,
        template: impl Into<String>,
        placeholder: impl Into<String>,
        spec: ChartSpec,
    ) -> Result<()> {
        let template = template.into();
        let placeholder = placeholder.into();

        let key = (template.clone(), placeholder.clone());
        if self.keys.contains(&key) {
            return Err(ConfigError::DuplicateChart {
                template,
                placeholder,
            }
            .into());
        }

        let kind = spec.kind;
        let spec = match spec.validate() {
            Ok(spec) => spec,
            Err(source) => {
                return Err(Error::Validation {
                    template,
                    placeholder,
                    kind,
                    source,
                });
            },
        };

        self.keys.insert(key);
        self.entries.push(ChartEntry {
            template,
            placeholder,
            spec,
        });
        Ok(())
    }

    /// Entries declared for `template`, in declaration order.
    pub fn entries_for<'a>(&'a self, template: &'a str) -> impl Iterator<Item = &'a ChartEntry> + 'a {
        self.entries.iter().filter(move |e| e.template == template)
    }

    /// All entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ChartEntry> {
        self.entries.iter()
    }

    /// Number of declared charts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no chart is declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check that every entry names one of `templates`.
    pub fn check_templates(&self, templates: &[TemplateRef]) -> Result<()> {
        let known: HashSet<&str> = templates.iter().map(|t| t.id.as_str()).collect();
        match self.entries.iter().find(|e| !known.contains(e.template.as_str())) {
            Some(entry) => Err(ConfigError::UnknownTemplate {
                template: entry.template.clone(),
                placeholder: entry.placeholder.clone(),
            }
            .into()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartKind, Series, ValidationError};

    fn pie() -> ChartSpec {
        ChartSpec::new(
            ChartKind::Pie,
            vec![Series::new("x", ["a", "b"], vec![60.0, 40.0])],
        )
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut directory = ChartDirectory::new();
        directory.insert("slide1.html", "p1", pie()).unwrap();
        directory.insert("slide1.html", "p2", pie()).unwrap();
        directory.insert("slide2.html", "p1", pie()).unwrap();

        let ids: Vec<&str> = directory
            .entries_for("slide1.html")
            .map(|e| e.placeholder.as_str())
            .collect();
        assert_eq!(ids, ["p1", "p2"]);
        assert_eq!(directory.entries_for("slide3.html").count(), 0);
        assert_eq!(directory.len(), 3);
    }

    #[test]
    fn test_duplicate_entry() {
        let mut directory = ChartDirectory::new();
        directory.insert("slide1.html", "p1", pie()).unwrap();
        let err = directory.insert("slide1.html", "p1", pie()).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::DuplicateChart { .. })
        ));
    }

    #[test]
    fn test_invalid_spec_is_rejected_with_context() {
        let mut directory = ChartDirectory::new();
        let mut spec = pie();
        spec.series.push(Series::new("y", ["a", "b"], vec![1.0, 2.0]));
        let err = directory.insert("slide4.html", "donut", spec).unwrap_err();
        match err {
            Error::Validation {
                template,
                placeholder,
                kind,
                source,
            } => {
                assert_eq!(template, "slide4.html");
                assert_eq!(placeholder, "donut");
                assert_eq!(kind, ChartKind::Pie);
                assert!(matches!(source, ValidationError::TooManySeries { .. }));
            },
            other => panic!("unexpected error: {other}"),
        }
        assert!(directory.is_empty());
    }

    #[test]
    fn test_unknown_template() {
        let mut directory = ChartDirectory::new();
        directory.insert("missing.html", "p1", pie()).unwrap();
        let templates = [TemplateRef::new("slides/slide1.html")];
        let err = directory.check_templates(&templates).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::UnknownTemplate { .. })
        ));
    }
}
