//! Second pass: total occurrence counts for an already selected term list.

use std::sync::Arc;

use ahash::AHashMap;
use termfreq_common::Result;
use termfreq_index::IndexReader;

use crate::{TermStat, TotalFreqSource};

/// Fills in the total occurrence count of every term in `terms` and returns
/// them ordered by that count, highest first.
///
/// The input is left untouched. Every output element carries the field, term
/// and document frequency of an input element, and the output has the same
/// length as the input. Ties are ordered by document frequency (descending),
/// then by `(field, term)` ascending.
///
/// A count the index cannot provide is recorded as zero, so a partial result
/// is still returned when some statistics are missing.
///
/// With [`TotalFreqSource::FieldAggregate`] every term of a field gets the
/// field-wide occurrence sum, read once per field.
///
/// # Errors
///
/// Only an `IndexUnavailable` error from the reader is returned. Any other
/// lookup failure degrades the affected term to a zero count.
pub fn sort_by_total_term_freq<R>(
    index: &R,
    terms: &[TermStat],
    source: TotalFreqSource,
) -> Result<Vec<TermStat>>
where
    R: IndexReader + ?Sized,
{
    let mut lookup = TotalFreqLookup::new(index, source);
    let mut enriched = Vec::with_capacity(terms.len());
    for stat in terms {
        let total = lookup.total_for(stat)?;
        enriched.push(stat.clone().with_total_term_freq(total));
    }
    if lookup.degraded > 0 {
        log::warn!(
            "{} of {} terms have no total term frequency, reported as 0",
            lookup.degraded,
            terms.len()
        );
    }
    enriched.sort_by(TermStat::cmp_by_total_term_freq_desc);
    Ok(enriched)
}

struct TotalFreqLookup<'a, R: ?Sized> {
    index: &'a R,
    source: TotalFreqSource,
    field_sums: AHashMap<Arc<str>, u64>,
    degraded: usize,
}

impl<'a, R> TotalFreqLookup<'a, R>
where
    R: IndexReader + ?Sized,
{
    fn new(index: &'a R, source: TotalFreqSource) -> Self {
        TotalFreqLookup {
            index,
            source,
            field_sums: AHashMap::new(),
            degraded: 0,
        }
    }

    fn total_for(&mut self, stat: &TermStat) -> Result<u64> {
        match self.source {
            TotalFreqSource::PerTerm => {
                let found = self.index.total_term_freq(stat.field(), stat.term());
                self.resolve(stat, found)
            }
            TotalFreqSource::FieldAggregate => {
                if let Some(sum) = self.field_sums.get(stat.field()) {
                    return Ok(*sum);
                }
                let found = self.index.sum_total_term_freq(stat.field());
                let sum = self.resolve(stat, found)?;
                self.field_sums.insert(Arc::from(stat.field()), sum);
                Ok(sum)
            }
        }
    }

    fn resolve(&mut self, stat: &TermStat, found: Result<Option<u64>>) -> Result<u64> {
        match found {
            Ok(Some(total)) => Ok(total),
            Ok(None) => {
                log::debug!(
                    "no total term frequency for {}:{}",
                    stat.field(),
                    stat.term_display()
                );
                self.degraded += 1;
                Ok(0)
            }
            Err(e) if e.is_index_unavailable() => Err(e),
            Err(e) => {
                log::warn!(
                    "failed to read total term frequency for {}:{}: {e}",
                    stat.field(),
                    stat.term_display()
                );
                self.degraded += 1;
                Ok(0)
            }
        }
    }
}
