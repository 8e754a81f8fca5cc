//! Synthetic index generation.
//!
//! Generated dictionaries follow a Zipf-like shape: a handful of terms appear
//! in most documents and a long tail appears in only a few, which is the
//! distribution top-K extraction is meant for.

use std::io::Write;

use termfreq_index::MemoryIndex;

/// Shape of a generated index.
#[derive(Debug, Clone)]
pub struct IndexShape {
    pub fields: Vec<String>,
    pub terms_per_field: usize,
    /// Document frequency of the most frequent term of each field.
    pub max_doc_freq: u64,
    /// Maximum number of occurrences of a term within one document.
    pub max_occurrences_per_doc: u64,
    /// Record per-term occurrence counts. When `false` only document
    /// frequencies are stored.
    pub with_totals: bool,
}

impl Default for IndexShape {
    fn default() -> Self {
        IndexShape {
            fields: vec!["title".into(), "body".into(), "tags".into()],
            terms_per_field: 200,
            max_doc_freq: 10_000,
            max_occurrences_per_doc: 4,
            with_totals: true,
        }
    }
}

/// Generates an index with the given shape. The same seed always produces
/// the same index.
pub fn generate_index(seed: u64, shape: &IndexShape) -> anyhow::Result<MemoryIndex> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut builder = MemoryIndex::builder();
    for field in &shape.fields {
        builder.add_field(field)?;
        for rank in 1..=shape.terms_per_field {
            let base = (shape.max_doc_freq / rank as u64).max(1);
            // Jitter keeps ties possible but not systematic.
            let doc_freq = rng.u64(base.div_ceil(2)..=base);
            let total = shape.with_totals.then(|| {
                doc_freq * rng.u64(1..=shape.max_occurrences_per_doc.max(1))
            });
            builder.add_term(field, random_term(&mut rng, rank), doc_freq, total)?;
        }
    }
    Ok(builder.build()?)
}

/// Generates an index with `fields` fields named `f0`, `f1`, ... and
/// `terms_per_field` terms each, using the default shape otherwise.
pub fn generate_simple_index(
    seed: u64,
    fields: usize,
    terms_per_field: usize,
) -> anyhow::Result<MemoryIndex> {
    let shape = IndexShape {
        fields: (0..fields).map(|i| format!("f{i}")).collect(),
        terms_per_field,
        ..Default::default()
    };
    generate_index(seed, &shape)
}

/// Writes `index` as a JSON snapshot to a temporary file, positioned at the
/// end of the written data.
pub fn write_snapshot(index: &MemoryIndex) -> anyhow::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("termfreq-")
        .suffix(".json")
        .tempfile()?;
    file.write_all(index.to_json()?.as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// Lowercase term, unique within a field thanks to the rank suffix.
fn random_term(rng: &mut fastrand::Rng, rank: usize) -> String {
    let len = rng.usize(2..8);
    let mut term: String = (0..len).map(|_| rng.lowercase()).collect();
    term.push_str(&rank.to_string());
    term
}
