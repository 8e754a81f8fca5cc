//! JSON snapshot format for [`MemoryIndex`].
//!
//! A snapshot lists fields in declaration order, each with its terms and
//! statistics:
//!
//! ```json
//! {
//!   "fields": [
//!     {
//!       "name": "title",
//!       "sum_total_term_freq": 20,
//!       "terms": [
//!         { "term": "apple", "doc_freq": 5, "total_term_freq": 8 },
//!         { "term": [255, 0], "doc_freq": 1 }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Terms that are valid UTF-8 are written as strings, anything else as an
//! array of bytes. Both forms are accepted when reading. Term order in the
//! file does not matter.

use std::path::Path;

use serde::{Deserialize, Serialize};
use termfreq_common::{Result, error::Error};

use crate::memory::MemoryIndex;

/// Serialized form of a whole index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    #[serde(default)]
    pub fields: Vec<FieldSnapshot>,
}

/// Serialized form of one field dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sum_total_term_freq: Option<u64>,
    #[serde(default)]
    pub terms: Vec<TermSnapshot>,
}

/// Serialized statistics of one term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermSnapshot {
    pub term: TermBytes,
    pub doc_freq: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_term_freq: Option<u64>,
}

/// Term bytes, stored as text when possible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TermBytes {
    Text(String),
    Raw(Vec<u8>),
}

impl TermBytes {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            TermBytes::Text(s) => s.as_bytes(),
            TermBytes::Raw(b) => b,
        }
    }
}

impl From<&[u8]> for TermBytes {
    fn from(bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(s) => TermBytes::Text(s.to_string()),
            Err(_) => TermBytes::Raw(bytes.to_vec()),
        }
    }
}

impl IndexSnapshot {
    pub fn from_json(json: &str) -> Result<IndexSnapshot> {
        serde_json::from_str(json).map_err(|e| Error::invalid_format("index snapshot", e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::invalid_format("index snapshot", e.to_string()))
    }

    /// Validates the snapshot and builds the index it describes.
    ///
    /// # Errors
    ///
    /// `InvalidFormat` when a field name is empty or repeated, a field holds
    /// the same term twice, or a term's occurrence count is below its
    /// document frequency.
    pub fn into_index(self) -> Result<MemoryIndex> {
        let mut builder = MemoryIndex::builder();
        let mut seen = ahash::AHashSet::with_capacity(self.fields.len());
        for field in self.fields {
            if field.name.is_empty() {
                return Err(Error::invalid_format("index snapshot", "empty field name"));
            }
            if !seen.insert(field.name.clone()) {
                return Err(Error::invalid_format(
                    "index snapshot",
                    format!("field '{}' listed more than once", field.name),
                ));
            }
            builder.add_field(&field.name)?;
            for term in &field.terms {
                builder.add_term(
                    &field.name,
                    term.term.as_bytes(),
                    term.doc_freq,
                    term.total_term_freq,
                )?;
            }
            if let Some(sum) = field.sum_total_term_freq {
                builder.set_sum_total_term_freq(&field.name, sum)?;
            }
        }
        builder.build()
    }
}

impl From<&MemoryIndex> for IndexSnapshot {
    fn from(index: &MemoryIndex) -> Self {
        let fields = index
            .field_dictionaries()
            .iter()
            .map(|dict| FieldSnapshot {
                name: dict.name().to_string(),
                sum_total_term_freq: dict.sum_total_term_freq(),
                terms: dict
                    .iter()
                    .map(|(term, info)| TermSnapshot {
                        term: TermBytes::from(term),
                        doc_freq: info.doc_freq,
                        total_term_freq: info.total_term_freq,
                    })
                    .collect(),
            })
            .collect();
        IndexSnapshot { fields }
    }
}

impl MemoryIndex {
    /// Parses a JSON snapshot.
    pub fn from_json(json: &str) -> Result<MemoryIndex> {
        IndexSnapshot::from_json(json)?.into_index()
    }

    /// Serializes the index as a pretty-printed JSON snapshot.
    pub fn to_json(&self) -> Result<String> {
        IndexSnapshot::from(self).to_json()
    }

    /// Loads a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<MemoryIndex> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::io(path.display().to_string(), e))?;
        let index = Self::from_json(&json)?;
        log::debug!(
            "loaded index snapshot {} ({} fields)",
            path.display(),
            index.field_dictionaries().len()
        );
        Ok(index)
    }

    /// Writes the index to a snapshot file, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| Error::io(path.display().to_string(), e))
    }
}
