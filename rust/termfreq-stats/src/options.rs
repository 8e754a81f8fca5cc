//! Parameters of a top terms extraction.

use serde::{Deserialize, Serialize};
use termfreq_common::{Result, error::Error, verify_arg};

/// Number of terms reported when the caller does not ask for a specific count.
pub const DEFAULT_NUM_TERMS: usize = 100;

/// Where the total occurrence count of a term comes from during enrichment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TotalFreqSource {
    /// The term's own occurrence count in its field.
    #[default]
    PerTerm,
    /// The field-wide sum of all term occurrences.
    ///
    /// Every term of a field receives the same value, so this is only a
    /// coarse approximation, usable with indexes that record the field sum
    /// but not per-term counts.
    FieldAggregate,
}

/// Describes one extraction: how many terms, from which fields, and whether
/// to re-rank them by total occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopTermsOptions {
    /// Maximum number of terms returned. Must be positive.
    pub num_terms: usize,
    /// Fields to scan, in scan order. `None` scans every field of the index.
    pub fields: Option<Vec<String>>,
    /// Run the enrichment pass and order the result by total occurrence
    /// count instead of document frequency.
    pub include_total_term_freq: bool,
    pub total_freq_source: TotalFreqSource,
}

impl Default for TopTermsOptions {
    fn default() -> Self {
        TopTermsOptions {
            num_terms: DEFAULT_NUM_TERMS,
            fields: None,
            include_total_term_freq: false,
            total_freq_source: TotalFreqSource::default(),
        }
    }
}

impl TopTermsOptions {
    pub fn new(num_terms: usize) -> TopTermsOptions {
        TopTermsOptions {
            num_terms,
            ..Default::default()
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> TopTermsOptions
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_total_term_freq(mut self, source: TotalFreqSource) -> TopTermsOptions {
        self.include_total_term_freq = true;
        self.total_freq_source = source;
        self
    }

    /// Parses options from JSON. Missing keys take their default values.
    pub fn from_json(json: &str) -> Result<TopTermsOptions> {
        let options: TopTermsOptions = serde_json::from_str(json)
            .map_err(|e| Error::invalid_arg("options", e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Checks that the term count is positive and that no selected field
    /// name is empty.
    pub fn validate(&self) -> Result<()> {
        verify_arg!(num_terms, self.num_terms > 0);
        if let Some(fields) = &self.fields {
            verify_arg!(fields, fields.iter().all(|f| !f.is_empty()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termfreq_common::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let options = TopTermsOptions::default();
        assert_eq!(options.num_terms, DEFAULT_NUM_TERMS);
        assert_eq!(options.fields, None);
        assert!(!options.include_total_term_freq);
        assert_eq!(options.total_freq_source, TotalFreqSource::PerTerm);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let options = TopTermsOptions::new(5)
            .with_fields(["title", "body"])
            .with_total_term_freq(TotalFreqSource::FieldAggregate);
        assert_eq!(options.num_terms, 5);
        assert_eq!(
            options.fields,
            Some(vec!["title".to_string(), "body".to_string()])
        );
        assert!(options.include_total_term_freq);
        assert_eq!(options.total_freq_source, TotalFreqSource::FieldAggregate);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let err = TopTermsOptions::new(0).validate().unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));

        let err = TopTermsOptions::new(3)
            .with_fields(["title", ""])
            .validate()
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
    }

    #[test]
    fn test_from_json() {
        let options = TopTermsOptions::from_json(
            r#"{"num_terms": 20, "fields": ["body"], "total_freq_source": "field-aggregate"}"#,
        )
        .unwrap();
        assert_eq!(options.num_terms, 20);
        assert_eq!(options.fields, Some(vec!["body".to_string()]));
        assert!(!options.include_total_term_freq);
        assert_eq!(options.total_freq_source, TotalFreqSource::FieldAggregate);

        let options = TopTermsOptions::from_json("{}").unwrap();
        assert_eq!(options, TopTermsOptions::default());

        let err = TopTermsOptions::from_json(r#"{"num_terms": 0}"#).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));

        let err = TopTermsOptions::from_json(r#"{"total_freq_source": "sometimes"}"#).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
    }
}
