//! In-memory inverted index dictionaries.
//!
//! [`MemoryIndex`] holds, for every field, a term dictionary sorted by term
//! bytes together with per-term document and occurrence counts. It is built
//! through [`MemoryIndexBuilder`] (or decoded from an
//! [`IndexSnapshot`](crate::IndexSnapshot)) and is immutable afterwards,
//! except for [`MemoryIndex::close`], which makes every subsequent read fail
//! with `IndexUnavailable` the way a closed on-disk reader would.

use std::sync::atomic::{AtomicBool, Ordering};

use ahash::AHashMap;
use termfreq_common::{Result, error::Error, verify_arg, verify_data};

use crate::{IndexReader, TermsEnum};

/// Statistics recorded for one term of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermInfo {
    /// Number of documents containing the term.
    pub doc_freq: u64,
    /// Number of occurrences of the term across all documents, if recorded.
    pub total_term_freq: Option<u64>,
}

/// The term dictionary of a single field.
#[derive(Debug, Clone)]
pub struct FieldDictionary {
    name: String,
    /// Terms in ascending byte order, unique.
    terms: Vec<(Box<[u8]>, TermInfo)>,
    sum_total_term_freq: Option<u64>,
    sum_doc_freq: u64,
}

impl FieldDictionary {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterates the dictionary in byte order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &TermInfo)> {
        self.terms.iter().map(|(term, info)| (term.as_ref(), info))
    }

    /// Looks up a single term.
    pub fn get(&self, term: &[u8]) -> Option<&TermInfo> {
        self.terms
            .binary_search_by(|(probe, _)| probe.as_ref().cmp(term))
            .ok()
            .map(|pos| &self.terms[pos].1)
    }

    /// Field-wide sum of term occurrences.
    ///
    /// This is either the value supplied explicitly when the field was built,
    /// or the sum of all per-term totals when every term records one.
    pub fn sum_total_term_freq(&self) -> Option<u64> {
        self.sum_total_term_freq
    }

    /// Sum of the document frequencies of all terms.
    pub fn sum_doc_freq(&self) -> u64 {
        self.sum_doc_freq
    }
}

/// A read-only inverted index whose dictionaries live in memory.
#[derive(Debug)]
pub struct MemoryIndex {
    /// Fields in declaration order.
    fields: Vec<FieldDictionary>,
    by_name: AHashMap<String, usize>,
    closed: AtomicBool,
}

impl MemoryIndex {
    pub fn builder() -> MemoryIndexBuilder {
        MemoryIndexBuilder::default()
    }

    /// Creates an index without any fields.
    pub fn empty() -> MemoryIndex {
        MemoryIndex {
            fields: Vec::new(),
            by_name: AHashMap::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Returns the dictionary of `name`, if the field exists.
    pub fn field(&self, name: &str) -> Option<&FieldDictionary> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    /// All field dictionaries in declaration order.
    pub fn field_dictionaries(&self) -> &[FieldDictionary] {
        &self.fields
    }

    /// Marks the index closed. All later reads fail with `IndexUnavailable`.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            Err(Error::index_unavailable("index reader is closed"))
        } else {
            Ok(())
        }
    }
}

impl IndexReader for MemoryIndex {
    type Terms<'a> = MemoryTermsEnum<'a>;

    fn fields(&self) -> Result<Option<Vec<String>>> {
        self.ensure_open()?;
        if self.fields.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.fields.iter().map(|f| f.name.clone()).collect()))
    }

    fn terms(&self, field: &str) -> Result<Option<MemoryTermsEnum<'_>>> {
        self.ensure_open()?;
        Ok(self
            .field(field)
            .filter(|dict| !dict.is_empty())
            .map(|dict| MemoryTermsEnum::new(&dict.terms)))
    }

    fn total_term_freq(&self, field: &str, term: &[u8]) -> Result<Option<u64>> {
        self.ensure_open()?;
        Ok(self
            .field(field)
            .and_then(|dict| dict.get(term))
            .and_then(|info| info.total_term_freq))
    }

    fn sum_total_term_freq(&self, field: &str) -> Result<Option<u64>> {
        self.ensure_open()?;
        Ok(self.field(field).and_then(|dict| dict.sum_total_term_freq))
    }
}

/// Dictionary cursor over a [`FieldDictionary`].
#[derive(Debug)]
pub struct MemoryTermsEnum<'a> {
    terms: &'a [(Box<[u8]>, TermInfo)],
    /// Index of the next term to return.
    next: usize,
    current: Option<TermInfo>,
}

impl<'a> MemoryTermsEnum<'a> {
    fn new(terms: &'a [(Box<[u8]>, TermInfo)]) -> Self {
        MemoryTermsEnum {
            terms,
            next: 0,
            current: None,
        }
    }
}

impl TermsEnum for MemoryTermsEnum<'_> {
    fn next_term(&mut self) -> Result<Option<&[u8]>> {
        match self.terms.get(self.next) {
            Some((term, info)) => {
                self.next += 1;
                self.current = Some(*info);
                Ok(Some(term.as_ref()))
            }
            None => {
                self.current = None;
                Ok(None)
            }
        }
    }

    fn doc_freq(&self) -> u64 {
        self.current.map_or(0, |info| info.doc_freq)
    }

    fn total_term_freq(&self) -> Option<u64> {
        self.current.and_then(|info| info.total_term_freq)
    }
}

/// Accumulates fields and terms and validates them into a [`MemoryIndex`].
///
/// Terms may be added in any order; `build` sorts every dictionary.
#[derive(Debug, Default)]
pub struct MemoryIndexBuilder {
    fields: Vec<PendingField>,
    by_name: AHashMap<String, usize>,
}

#[derive(Debug)]
struct PendingField {
    name: String,
    terms: Vec<(Box<[u8]>, TermInfo)>,
    sum_total_term_freq: Option<u64>,
}

impl MemoryIndexBuilder {
    /// Declares a field. Declaring the same field twice is a no-op, so fields
    /// without terms can be declared up front.
    pub fn add_field(&mut self, name: &str) -> Result<&mut Self> {
        verify_arg!(name, !name.is_empty());
        self.field_slot(name);
        Ok(self)
    }

    /// Adds a term with its document frequency and optional occurrence count.
    pub fn add_term(
        &mut self,
        field: &str,
        term: impl AsRef<[u8]>,
        doc_freq: u64,
        total_term_freq: Option<u64>,
    ) -> Result<&mut Self> {
        verify_arg!(field, !field.is_empty());
        let slot = self.field_slot(field);
        self.fields[slot].terms.push((
            term.as_ref().into(),
            TermInfo {
                doc_freq,
                total_term_freq,
            },
        ));
        Ok(self)
    }

    /// Overrides the field-wide occurrence sum of `field`.
    pub fn set_sum_total_term_freq(&mut self, field: &str, sum: u64) -> Result<&mut Self> {
        verify_arg!(field, !field.is_empty());
        let slot = self.field_slot(field);
        self.fields[slot].sum_total_term_freq = Some(sum);
        Ok(self)
    }

    /// Sorts and validates all dictionaries.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidFormat` error when a field contains the same term
    /// twice, or when a term's occurrence count is lower than its document
    /// frequency.
    pub fn build(self) -> Result<MemoryIndex> {
        let mut fields = Vec::with_capacity(self.fields.len());
        for pending in self.fields {
            fields.push(Self::seal_field(pending)?);
        }
        Ok(MemoryIndex {
            fields,
            by_name: self.by_name,
            closed: AtomicBool::new(false),
        })
    }

    fn seal_field(pending: PendingField) -> Result<FieldDictionary> {
        let PendingField {
            name,
            mut terms,
            sum_total_term_freq,
        } = pending;
        terms.sort_by(|a, b| a.0.cmp(&b.0));
        for pair in terms.windows(2) {
            if pair[0].0 == pair[1].0 {
                return Err(Error::invalid_format(
                    format!("field '{name}'"),
                    format!(
                        "duplicate term {:?}",
                        String::from_utf8_lossy(&pair[0].0)
                    ),
                ));
            }
        }
        for (_, info) in &terms {
            if let Some(total) = info.total_term_freq {
                verify_data!(total_term_freq, total >= info.doc_freq);
            }
        }
        let sum_doc_freq = terms
            .iter()
            .try_fold(0u64, |sum, (_, info)| sum.checked_add(info.doc_freq))
            .ok_or_else(|| sum_overflow(&name, "document frequency"))?;
        let sum_total_term_freq = match sum_total_term_freq {
            Some(sum) => Some(sum),
            None => Self::sum_term_totals(&name, &terms)?,
        };
        Ok(FieldDictionary {
            name,
            terms,
            sum_total_term_freq,
            sum_doc_freq,
        })
    }

    /// Sum of the per-term totals, `None` if any term lacks one.
    fn sum_term_totals(name: &str, terms: &[(Box<[u8]>, TermInfo)]) -> Result<Option<u64>> {
        let totals: Option<Vec<u64>> = terms.iter().map(|(_, info)| info.total_term_freq).collect();
        let Some(totals) = totals else {
            return Ok(None);
        };
        totals
            .into_iter()
            .try_fold(0u64, u64::checked_add)
            .map(Some)
            .ok_or_else(|| sum_overflow(name, "total term frequency"))
    }

    fn field_slot(&mut self, name: &str) -> usize {
        if let Some(&slot) = self.by_name.get(name) {
            return slot;
        }
        let slot = self.fields.len();
        self.fields.push(PendingField {
            name: name.to_string(),
            terms: Vec::new(),
            sum_total_term_freq: None,
        });
        self.by_name.insert(name.to_string(), slot);
        slot
    }
}

fn sum_overflow(field: &str, statistic: &str) -> Error {
    Error::invalid_format(
        format!("field '{field}'"),
        format!("{statistic} sum overflows u64"),
    )
}
