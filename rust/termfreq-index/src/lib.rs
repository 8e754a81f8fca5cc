//! Read-side index interfaces consumed by the term statistics engine.
//!
//! This crate defines the traits through which term statistics are pulled out
//! of an inverted index, and ships one implementation of them, the in-memory
//! [`MemoryIndex`], which can be persisted as a JSON snapshot.
//!
//! # Overview
//!
//! The interfaces mirror how a term dictionary is typically exposed by an
//! inverted index reader:
//!
//! - **Field enumeration**: [`IndexReader::fields`] lists the indexed fields,
//!   reporting an index without any fields as `Ok(None)` rather than an error.
//! - **Dictionary scan**: [`IndexReader::terms`] opens a forward-only
//!   [`TermsEnum`] over a field's dictionary, in dictionary (byte) order.
//!   A field without a dictionary yields `Ok(None)`.
//! - **Occurrence statistics**: [`IndexReader::total_term_freq`] returns the
//!   number of occurrences of one term in one field, and
//!   [`IndexReader::sum_total_term_freq`] the field-wide sum of all term
//!   occurrences. Either may be unknown (`Ok(None)`).
//!
//! Readers are read-only. An index that cannot be read at all reports
//! [`ErrorKind::IndexUnavailable`](termfreq_common::error::ErrorKind::IndexUnavailable);
//! any other error is local to the field or statistic being read.

use termfreq_common::Result;

pub mod memory;
pub mod snapshot;

pub use memory::{FieldDictionary, MemoryIndex, MemoryIndexBuilder, MemoryTermsEnum, TermInfo};
pub use snapshot::{FieldSnapshot, IndexSnapshot, TermBytes, TermSnapshot};

/// A forward-only cursor over the term dictionary of a single field.
///
/// The cursor starts positioned before the first term. Each successful call
/// to [`next_term`](Self::next_term) moves it to the next term in dictionary
/// order; the statistics accessors then describe that current term.
///
/// The returned term slice is only valid until the next call, which lets
/// implementations reuse a single buffer while decoding. Callers keeping a
/// term must copy it.
pub trait TermsEnum {
    /// Advances to the next term and returns its bytes, or `None` once the
    /// dictionary is exhausted.
    fn next_term(&mut self) -> Result<Option<&[u8]>>;

    /// Number of documents containing the current term.
    ///
    /// Only meaningful after `next_term` returned a term.
    fn doc_freq(&self) -> u64;

    /// Total number of occurrences of the current term, if the index records
    /// occurrence counts for this field.
    fn total_term_freq(&self) -> Option<u64>;
}

/// Read access to the term dictionaries of an inverted index.
///
/// Implementations must not mutate the index through any of these methods;
/// the same reader may serve any number of sequential extractions.
pub trait IndexReader {
    /// Dictionary cursor type produced by [`terms`](Self::terms).
    type Terms<'a>: TermsEnum
    where
        Self: 'a;

    /// Lists the names of all indexed fields.
    ///
    /// Returns `Ok(None)` when the index exposes no fields at all, which is
    /// how an empty (or structurally damaged but readable) index presents
    /// itself. No particular order is guaranteed.
    fn fields(&self) -> Result<Option<Vec<String>>>;

    /// Opens a scan over the term dictionary of `field`.
    ///
    /// Returns `Ok(None)` if the field does not exist or has no terms.
    fn terms(&self, field: &str) -> Result<Option<Self::Terms<'_>>>;

    /// Looks up the total number of occurrences of `term` in `field`.
    ///
    /// Returns `Ok(None)` if the term is absent or the field does not record
    /// occurrence counts.
    fn total_term_freq(&self, field: &str, term: &[u8]) -> Result<Option<u64>>;

    /// Sum of the occurrence counts of all terms of `field`.
    ///
    /// Returns `Ok(None)` if the field is absent or the statistic is not
    /// recorded.
    fn sum_total_term_freq(&self, field: &str) -> Result<Option<u64>>;
}

impl<R: IndexReader + ?Sized> IndexReader for &R {
    type Terms<'a>
        = R::Terms<'a>
    where
        Self: 'a;

    fn fields(&self) -> Result<Option<Vec<String>>> {
        (**self).fields()
    }

    fn terms(&self, field: &str) -> Result<Option<Self::Terms<'_>>> {
        (**self).terms(field)
    }

    fn total_term_freq(&self, field: &str, term: &[u8]) -> Result<Option<u64>> {
        (**self).total_term_freq(field, term)
    }

    fn sum_total_term_freq(&self, field: &str) -> Result<Option<u64>> {
        (**self).sum_total_term_freq(field)
    }
}

impl<R: IndexReader + ?Sized> IndexReader for std::sync::Arc<R> {
    type Terms<'a>
        = R::Terms<'a>
    where
        Self: 'a;

    fn fields(&self) -> Result<Option<Vec<String>>> {
        (**self).fields()
    }

    fn terms(&self, field: &str) -> Result<Option<Self::Terms<'_>>> {
        (**self).terms(field)
    }

    fn total_term_freq(&self, field: &str, term: &[u8]) -> Result<Option<u64>> {
        (**self).total_term_freq(field, term)
    }

    fn sum_total_term_freq(&self, field: &str) -> Result<Option<u64>> {
        (**self).sum_total_term_freq(field)
    }
}
