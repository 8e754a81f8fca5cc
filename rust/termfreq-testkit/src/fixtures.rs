//! Hand-written indexes with known top terms.

use termfreq_index::MemoryIndex;

/// Two fields sharing some terms:
///
/// | field   | term | doc freq | total term freq |
/// |---------|------|----------|-----------------|
/// | `title` | `a`  | 5        | 6               |
/// | `title` | `b`  | 2        | 2               |
/// | `title` | `c`  | 9        | 11              |
/// | `body`  | `a`  | 1        | 40              |
/// | `body`  | `c`  | 3        | 3               |
/// | `body`  | `d`  | 7        | 8               |
///
/// The top three by document frequency are `title:c`, `body:d`, `title:a`.
pub fn title_body_index() -> MemoryIndex {
    let mut builder = MemoryIndex::builder();
    for (term, df, total) in [("a", 5, 6), ("b", 2, 2), ("c", 9, 11)] {
        builder
            .add_term("title", term, df, Some(total))
            .expect("add_term");
    }
    for (term, df, total) in [("a", 1, 40), ("c", 3, 3), ("d", 7, 8)] {
        builder
            .add_term("body", term, df, Some(total))
            .expect("add_term");
    }
    builder.build().expect("build")
}

/// Same terms as [`title_body_index`], without any occurrence counts.
pub fn doc_freq_only_index() -> MemoryIndex {
    let mut builder = MemoryIndex::builder();
    for (field, term, df) in [
        ("title", "a", 5),
        ("title", "b", 2),
        ("title", "c", 9),
        ("body", "a", 1),
        ("body", "c", 3),
        ("body", "d", 7),
    ] {
        builder.add_term(field, term, df, None).expect("add_term");
    }
    builder.build().expect("build")
}

/// An index where every term of every field has the same document
/// frequency, so only the tie-break decides the ranking.
pub fn uniform_index(fields: &[&str], terms_per_field: usize, doc_freq: u64) -> MemoryIndex {
    let mut builder = MemoryIndex::builder();
    for field in fields {
        builder.add_field(field).expect("add_field");
        for i in 0..terms_per_field {
            builder
                .add_term(field, format!("t{i:04}"), doc_freq, Some(doc_freq))
                .expect("add_term");
        }
    }
    builder.build().expect("build")
}
