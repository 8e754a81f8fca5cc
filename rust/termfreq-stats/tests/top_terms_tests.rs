use std::cmp::Ordering;

use termfreq_common::{
    Result,
    error::{Error, ErrorKind},
};
use termfreq_index::{IndexReader, MemoryIndex, MemoryTermsEnum, TermsEnum};
use termfreq_stats::{
    TermStat, TopTermsOptions, TotalFreqSource, extract_top_terms, high_freq_terms,
    sort_by_total_term_freq,
};
use termfreq_testkit::{data_gen, fixtures};

/// Every (field, term) pair of the index, ranked best first.
fn brute_force_ranking(index: &MemoryIndex) -> Vec<TermStat> {
    let mut all: Vec<TermStat> = index
        .field_dictionaries()
        .iter()
        .flat_map(|dict| {
            dict.iter()
                .map(move |(term, info)| TermStat::new(dict.name(), term, info.doc_freq))
        })
        .collect();
    all.sort_by(|a, b| b.cmp_by_doc_freq(a));
    all
}

fn pair_count(index: &MemoryIndex) -> usize {
    index.field_dictionaries().iter().map(|d| d.len()).sum()
}

#[test]
fn test_matches_brute_force_on_random_indexes() {
    for seed in 0..20u64 {
        let mut rng = fastrand::Rng::with_seed(seed);
        let index = data_gen::generate_simple_index(seed, rng.usize(1..5), rng.usize(1..120))
            .unwrap();
        let expected = brute_force_ranking(&index);
        for k in [1, 2, 7, 50, 1000] {
            let top = high_freq_terms(&index, None, k).unwrap();
            assert!(top.len() <= k);
            assert_eq!(top.len(), k.min(pair_count(&index)));
            assert_eq!(&top[..], &expected[..top.len()], "seed {seed}, k {k}");
            assert!(
                top.windows(2)
                    .all(|w| w[0].doc_freq() >= w[1].doc_freq())
            );
        }
    }
}

#[test]
fn test_large_budget_returns_every_pair_once() {
    let index = data_gen::generate_simple_index(42, 3, 64).unwrap();
    let top = high_freq_terms(&index, None, 10_000).unwrap();
    assert_eq!(top.len(), 3 * 64);

    let mut identities: Vec<(&str, &[u8])> = top.iter().map(|s| (s.field(), s.term())).collect();
    identities.sort();
    identities.dedup();
    assert_eq!(identities.len(), top.len());
}

#[test]
fn test_field_order_does_not_change_result() {
    let index = fixtures::uniform_index(&["a", "b", "c"], 10, 4);
    let forward = high_freq_terms(&index, Some(&["a", "b", "c"]), 5).unwrap();
    let backward = high_freq_terms(&index, Some(&["c", "b", "a"]), 5).unwrap();
    assert_eq!(forward, backward);
    // All ties: the smallest (field, term) pairs win.
    assert!(forward.iter().all(|s| s.field() == "a"));
    assert_eq!(forward[0].term(), b"t0000");
    assert_eq!(forward[4].term(), b"t0004");
}

#[test]
fn test_budget_is_shared_between_fields() {
    let mut builder = MemoryIndex::builder();
    for i in 0..20 {
        builder
            .add_term("hot", format!("h{i:02}"), 1000 + i, None)
            .unwrap();
    }
    for i in 0..20 {
        builder.add_term("cold", format!("c{i:02}"), 1 + i, None).unwrap();
    }
    let index = builder.build().unwrap();
    let top = high_freq_terms(&index, None, 10).unwrap();
    assert_eq!(top.len(), 10);
    assert!(top.iter().all(|s| s.field() == "hot"));
}

#[test]
fn test_enrichment_keeps_identities_and_is_idempotent() {
    let index = data_gen::generate_simple_index(5, 3, 80).unwrap();
    let top = high_freq_terms(&index, None, 25).unwrap();
    let once = sort_by_total_term_freq(&index, &top, TotalFreqSource::PerTerm).unwrap();
    assert_eq!(once.len(), top.len());

    let key = |s: &TermStat| (s.field().to_string(), s.term().to_vec(), s.doc_freq());
    let mut before: Vec<_> = top.iter().map(key).collect();
    let mut after: Vec<_> = once.iter().map(key).collect();
    before.sort();
    after.sort();
    assert_eq!(before, after);

    for stat in &once {
        let expected = index.total_term_freq(stat.field(), stat.term()).unwrap();
        assert_eq!(stat.total_term_freq(), expected);
    }
    assert!(
        once.windows(2)
            .all(|w| TermStat::cmp_by_total_term_freq_desc(&w[0], &w[1]) != Ordering::Greater)
    );

    let twice = sort_by_total_term_freq(&index, &once, TotalFreqSource::PerTerm).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_extract_with_totals_on_fixture() {
    let index = fixtures::title_body_index();
    let options = TopTermsOptions::new(3).with_total_term_freq(TotalFreqSource::PerTerm);
    let top = extract_top_terms(&index, &options).unwrap();
    let summary: Vec<(&str, &[u8], u64, Option<u64>)> = top
        .iter()
        .map(|s| (s.field(), s.term(), s.doc_freq(), s.total_term_freq()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("title", &b"c"[..], 9, Some(11)),
            ("body", &b"d"[..], 7, Some(8)),
            ("title", &b"a"[..], 5, Some(6)),
        ]
    );
}

#[test]
fn test_totals_missing_from_index() {
    let index = fixtures::doc_freq_only_index();
    let options = TopTermsOptions::new(2).with_total_term_freq(TotalFreqSource::PerTerm);
    let top = extract_top_terms(&index, &options).unwrap();
    assert_eq!(top.len(), 2);
    assert!(top.iter().all(|s| s.total_term_freq() == Some(0)));
    // Zero totals keep the document frequency order.
    assert_eq!(top[0].term(), b"c");
    assert_eq!(top[1].term(), b"d");
}

#[test]
fn test_closed_index_fails_both_passes() {
    let index = fixtures::title_body_index();
    let top = high_freq_terms(&index, None, 3).unwrap();
    index.close();

    let err = high_freq_terms(&index, None, 3).unwrap_err();
    assert!(err.is_index_unavailable());
    let err = sort_by_total_term_freq(&index, &top, TotalFreqSource::PerTerm).unwrap_err();
    assert!(err.is_index_unavailable());
}

/// Wraps an index and fails while reading the dictionary of one field.
struct BrokenField {
    inner: MemoryIndex,
    broken: &'static str,
    readable_terms: usize,
}

struct BrokenTerms<'a> {
    inner: MemoryTermsEnum<'a>,
    field: &'static str,
    remaining: Option<usize>,
}

impl TermsEnum for BrokenTerms<'_> {
    fn next_term(&mut self) -> Result<Option<&[u8]>> {
        match &mut self.remaining {
            Some(0) => Err(Error::field_read(
                self.field,
                std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated dictionary"),
            )),
            Some(n) => {
                *n -= 1;
                self.inner.next_term()
            }
            None => self.inner.next_term(),
        }
    }

    fn doc_freq(&self) -> u64 {
        self.inner.doc_freq()
    }

    fn total_term_freq(&self) -> Option<u64> {
        self.inner.total_term_freq()
    }
}

impl IndexReader for BrokenField {
    type Terms<'a> = BrokenTerms<'a>;

    fn fields(&self) -> Result<Option<Vec<String>>> {
        self.inner.fields()
    }

    fn terms(&self, field: &str) -> Result<Option<BrokenTerms<'_>>> {
        let remaining = (field == self.broken).then_some(self.readable_terms);
        Ok(self.inner.terms(field)?.map(|inner| BrokenTerms {
            inner,
            field: self.broken,
            remaining,
        }))
    }

    fn total_term_freq(&self, field: &str, term: &[u8]) -> Result<Option<u64>> {
        self.inner.total_term_freq(field, term)
    }

    fn sum_total_term_freq(&self, field: &str) -> Result<Option<u64>> {
        self.inner.sum_total_term_freq(field)
    }
}

#[test]
fn test_dictionary_error_aborts_extraction() {
    let index = BrokenField {
        inner: fixtures::title_body_index(),
        broken: "body",
        readable_terms: 1,
    };
    let err = high_freq_terms(&index, None, 10).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::FieldRead { field, .. } if field == "body"));

    // Skipping the broken field avoids the failure.
    let top = high_freq_terms(&index, Some(&["title"]), 10).unwrap();
    assert_eq!(top.len(), 3);
}

#[test]
fn test_reader_behind_arc() {
    let index = std::sync::Arc::new(fixtures::title_body_index());
    let top = high_freq_terms(&index, None, 1).unwrap();
    assert_eq!(top[0].term(), b"c");
}
