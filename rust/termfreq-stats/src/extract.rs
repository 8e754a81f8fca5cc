//! Top-K extraction by document frequency.

use std::sync::Arc;

use ahash::AHashSet;
use termfreq_collections::BoundedTopK;
use termfreq_common::{Result, verify_arg};
use termfreq_index::{IndexReader, TermsEnum};

use crate::{TermStat, TopTermsOptions, enrich::sort_by_total_term_freq};

/// Returns the `num_terms` terms with the highest document frequency,
/// ordered from the highest down.
///
/// When `fields` is `None` every field reported by the index is scanned,
/// otherwise only the listed ones (in the given order; repeated names are
/// scanned once). Fields without a term dictionary contribute nothing. All
/// fields compete for the same `num_terms` slots, so a field with many
/// frequent terms can leave no room for the others.
///
/// Equal document frequencies are ordered by `(field, term)` ascending,
/// which makes the result independent of scan order.
///
/// An index without any fields yields an empty result.
///
/// # Errors
///
/// - `InvalidArgument` if `num_terms` is zero or a field name is empty.
/// - Any error raised while enumerating fields or reading a term dictionary
///   aborts the whole extraction and is returned as is.
pub fn high_freq_terms<R>(
    index: &R,
    fields: Option<&[&str]>,
    num_terms: usize,
) -> Result<Vec<TermStat>>
where
    R: IndexReader + ?Sized,
{
    verify_arg!(num_terms, num_terms > 0);
    if let Some(fields) = fields {
        verify_arg!(fields, fields.iter().all(|f| !f.is_empty()));
    }

    let Some(index_fields) = index.fields()? else {
        log::info!("index with no fields - probably empty or corrupted");
        return Ok(Vec::new());
    };

    let selected: Vec<&str> = match fields {
        Some(fields) => {
            let mut seen = AHashSet::with_capacity(fields.len());
            fields.iter().copied().filter(|f| seen.insert(*f)).collect()
        }
        None => index_fields.iter().map(String::as_str).collect(),
    };

    let mut queue = BoundedTopK::new(num_terms, TermStat::ranks_below_by_doc_freq)?;
    for field in selected {
        fill_queue(index, field, &mut queue)?;
    }
    Ok(queue.drain_descending())
}

/// Runs an extraction as described by `options`.
///
/// The result is ordered by document frequency, or by total occurrence
/// count when `options.include_total_term_freq` is set.
pub fn extract_top_terms<R>(index: &R, options: &TopTermsOptions) -> Result<Vec<TermStat>>
where
    R: IndexReader + ?Sized,
{
    options.validate()?;
    let fields: Option<Vec<&str>> = options
        .fields
        .as_ref()
        .map(|fields| fields.iter().map(String::as_str).collect());
    let top = high_freq_terms(index, fields.as_deref(), options.num_terms)?;
    if options.include_total_term_freq {
        sort_by_total_term_freq(index, &top, options.total_freq_source)
    } else {
        Ok(top)
    }
}

fn fill_queue<R, F>(index: &R, field: &str, queue: &mut BoundedTopK<TermStat, F>) -> Result<()>
where
    R: IndexReader + ?Sized,
    F: Fn(&TermStat, &TermStat) -> bool,
{
    let Some(mut terms) = index.terms(field)? else {
        log::debug!("field '{field}' has no term dictionary, skipping");
        return Ok(());
    };

    let field: Arc<str> = Arc::from(field);
    let mut scanned = 0u64;
    loop {
        let Some(term) = terms.next_term()? else {
            break;
        };
        // The enum reuses its buffer, so the term has to be copied out.
        let term: Box<[u8]> = term.into();
        queue.offer(TermStat::new(Arc::clone(&field), term, terms.doc_freq()));
        scanned += 1;
    }
    log::debug!(
        "scanned {scanned} terms of field '{field}', {} queued",
        queue.len()
    );
    Ok(())
}
