//! Pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::error::{LookupError, Result};

/// Language tag of the sentences that are indexed by default.
pub const DEFAULT_LANGUAGE: &str = "jpn";

/// How a sentence id is derived from its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IdSource {
    /// Parse the first field of the record as an integer.
    #[default]
    Field,

    /// Use the zero-based line index of the record.
    LineNumber,
}

/// Configuration for one pipeline run.
///
/// The value is built once and shared read-only by every stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Records whose language tag differs from this are ignored.
    pub language: String,

    /// Where sentence ids come from.
    pub id_source: IdSource,

    /// Number of tokenizing workers.
    pub workers: usize,

    /// Capacity of the line and sentence queues. Zero makes them rendezvous
    /// channels, so at most one item per worker is in flight.
    pub channel_capacity: usize,

    /// Sort every id list ascending once aggregation is complete.
    pub sort_ids: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            id_source: IdSource::Field,
            workers: num_cpus::get(),
            channel_capacity: 0,
            sort_ids: false,
        }
    }
}

impl PipelineConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target language tag.
    pub fn with_language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = language.into();
        self
    }

    /// Set how sentence ids are derived.
    pub fn with_id_source(mut self, id_source: IdSource) -> Self {
        self.id_source = id_source;
        self
    }

    /// Set the worker pool size.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the queue capacity.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Enable or disable sorting of id lists.
    pub fn with_sort_ids(mut self, sort_ids: bool) -> Self {
        self.sort_ids = sort_ids;
        self
    }

    /// Check the configuration before a run.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(LookupError::invalid_config(
                "worker count must be at least 1",
            ));
        }
        if self.language.is_empty() {
            return Err(LookupError::invalid_config("language tag must not be empty"));
        }
        if self.language.contains('\t') {
            return Err(LookupError::invalid_config(
                "language tag must not contain a tab",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.language, "jpn");
        assert_eq!(config.id_source, IdSource::Field);
        assert_eq!(config.channel_capacity, 0);
        assert!(config.workers >= 1);
        assert!(!config.sort_ids);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = PipelineConfig::new()
            .with_language("eng")
            .with_id_source(IdSource::LineNumber)
            .with_workers(3)
            .with_channel_capacity(16)
            .with_sort_ids(true);

        assert_eq!(config.language, "eng");
        assert_eq!(config.id_source, IdSource::LineNumber);
        assert_eq!(config.workers, 3);
        assert_eq!(config.channel_capacity, 16);
        assert!(config.sort_ids);
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let config = PipelineConfig::new().with_workers(0);
        assert!(matches!(
            config.validate(),
            Err(LookupError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_language() {
        assert!(PipelineConfig::new().with_language("").validate().is_err());
        assert!(PipelineConfig::new().with_language("jp\tn").validate().is_err());
    }
}
