//! High-frequency term extraction over inverted index dictionaries.
//!
//! The crate answers one question: which terms of an index occur in the most
//! documents? It scans the term dictionaries of all (or selected) fields
//! through a single bounded top-K selector, so memory stays proportional to
//! the number of requested terms no matter how large the dictionaries are.
//!
//! # Overview
//!
//! - [`high_freq_terms`] returns the `num_terms` terms with the highest
//!   document frequency, best first. The budget is shared by all scanned
//!   fields.
//! - [`sort_by_total_term_freq`] is an optional second pass over that (small)
//!   result: it fills in each term's total occurrence count and re-sorts by
//!   it.
//! - [`extract_top_terms`] runs both passes as described by a
//!   [`TopTermsOptions`].
//!
//! # Quick Start
//!
//! ```rust
//! use termfreq_index::MemoryIndex;
//! use termfreq_stats::high_freq_terms;
//!
//! let mut builder = MemoryIndex::builder();
//! builder.add_term("title", "rust", 7, Some(9)).unwrap();
//! builder.add_term("body", "index", 3, Some(3)).unwrap();
//! let index = builder.build().unwrap();
//!
//! let top = high_freq_terms(&index, None, 10).unwrap();
//! assert_eq!(top[0].term(), b"rust");
//! assert_eq!(top[0].doc_freq(), 7);
//! ```

mod enrich;
mod extract;
pub mod options;
pub mod term_stat;

pub use enrich::sort_by_total_term_freq;
pub use extract::{extract_top_terms, high_freq_terms};
pub use options::{DEFAULT_NUM_TERMS, TopTermsOptions, TotalFreqSource};
pub use term_stat::TermStat;
