//! The per-term statistics record and its ranking orders.

use std::cmp::Ordering;
use std::fmt::Write;
use std::sync::Arc;

/// Statistics of one term in one field.
///
/// A `TermStat` produced by extraction always carries the document
/// frequency; the total occurrence count stays `None` until
/// [`sort_by_total_term_freq`](crate::sort_by_total_term_freq) fills it in.
///
/// The field name is shared (`Arc<str>`) between all statistics produced from
/// the same field, so cloning a `TermStat` copies the term bytes only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TermStat {
    field: Arc<str>,
    term: Box<[u8]>,
    doc_freq: u64,
    total_term_freq: Option<u64>,
}

impl TermStat {
    /// Creates the statistics of `term` in `field`, without a total
    /// occurrence count.
    ///
    /// `field` must not be empty.
    pub fn new(field: impl Into<Arc<str>>, term: impl Into<Box<[u8]>>, doc_freq: u64) -> TermStat {
        let field = field.into();
        debug_assert!(!field.is_empty(), "term statistics need a field name");
        TermStat {
            field,
            term: term.into(),
            doc_freq,
            total_term_freq: None,
        }
    }

    /// Returns a copy of `self` with the total occurrence count set.
    pub fn with_total_term_freq(mut self, total_term_freq: u64) -> TermStat {
        self.total_term_freq = Some(total_term_freq);
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// The raw term bytes, as stored in the dictionary.
    pub fn term(&self) -> &[u8] {
        &self.term
    }

    pub fn doc_freq(&self) -> u64 {
        self.doc_freq
    }

    pub fn total_term_freq(&self) -> Option<u64> {
        self.total_term_freq
    }

    /// The term decoded as UTF-8, with invalid sequences replaced.
    ///
    /// Terms are opaque bytes; this is a best-effort rendering for display.
    pub fn term_text(&self) -> String {
        String::from_utf8_lossy(&self.term).into_owned()
    }

    /// The term as UTF-8 if it is valid, otherwise as space-separated hex
    /// bytes (`"c3 28"`).
    pub fn term_display(&self) -> String {
        match std::str::from_utf8(&self.term) {
            Ok(text) => text.to_string(),
            Err(_) => bytes_to_hex(&self.term),
        }
    }

    /// Ranking by document frequency, higher first.
    ///
    /// `Ordering::Greater` means `self` ranks above `other`. Equal document
    /// frequencies are ranked by `(field, term)`, the smaller pair ranking
    /// higher, which makes the order total.
    pub fn cmp_by_doc_freq(&self, other: &TermStat) -> Ordering {
        self.doc_freq
            .cmp(&other.doc_freq)
            .then_with(|| other.identity().cmp(&self.identity()))
    }

    /// `true` if `a` ranks strictly below `b` by document frequency.
    ///
    /// This is the admission order of the top-K selector during extraction.
    pub fn ranks_below_by_doc_freq(a: &TermStat, b: &TermStat) -> bool {
        a.cmp_by_doc_freq(b) == Ordering::Less
    }

    /// Sort order for the enriched result: descending total occurrence
    /// count, then descending document frequency, then ascending
    /// `(field, term)`.
    ///
    /// An unknown total sorts as zero.
    pub fn cmp_by_total_term_freq_desc(a: &TermStat, b: &TermStat) -> Ordering {
        let a_total = a.total_term_freq.unwrap_or(0);
        let b_total = b.total_term_freq.unwrap_or(0);
        b_total
            .cmp(&a_total)
            .then_with(|| b.doc_freq.cmp(&a.doc_freq))
            .then_with(|| a.identity().cmp(&b.identity()))
    }

    fn identity(&self) -> (&str, &[u8]) {
        (&*self.field, &*self.term)
    }
}

fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{b:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let stat = TermStat::new("title", &b"rust"[..], 4);
        assert_eq!(stat.field(), "title");
        assert_eq!(stat.term(), b"rust");
        assert_eq!(stat.doc_freq(), 4);
        assert_eq!(stat.total_term_freq(), None);

        let stat = stat.with_total_term_freq(11);
        assert_eq!(stat.total_term_freq(), Some(11));
        assert_eq!(stat.doc_freq(), 4);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "field name")]
    fn test_empty_field_name_panics() {
        let _ = TermStat::new("", &b"x"[..], 1);
    }

    #[test]
    fn test_term_rendering() {
        let text = TermStat::new("f", &b"caf\xc3\xa9"[..], 1);
        assert_eq!(text.term_text(), "café");
        assert_eq!(text.term_display(), "café");

        let binary = TermStat::new("f", vec![0xc3u8, 0x28, 0x0a], 1);
        assert_eq!(binary.term_text(), "\u{fffd}(\n");
        assert_eq!(binary.term_display(), "c3 28 0a");
    }

    #[test]
    fn test_doc_freq_order() {
        let high = TermStat::new("body", &b"z"[..], 9);
        let low = TermStat::new("body", &b"a"[..], 3);
        assert!(TermStat::ranks_below_by_doc_freq(&low, &high));
        assert!(!TermStat::ranks_below_by_doc_freq(&high, &low));

        // Ties rank the smaller (field, term) higher.
        let body_a = TermStat::new("body", &b"a"[..], 5);
        let body_b = TermStat::new("body", &b"b"[..], 5);
        let title_a = TermStat::new("title", &b"a"[..], 5);
        assert!(TermStat::ranks_below_by_doc_freq(&body_b, &body_a));
        assert!(TermStat::ranks_below_by_doc_freq(&title_a, &body_b));
        assert!(!TermStat::ranks_below_by_doc_freq(&body_a, &body_a));
    }

    #[test]
    fn test_total_term_freq_order() {
        let mut stats = vec![
            TermStat::new("f", &b"a"[..], 1).with_total_term_freq(3),
            TermStat::new("f", &b"b"[..], 2).with_total_term_freq(10),
            TermStat::new("f", &b"c"[..], 1),
            TermStat::new("f", &b"d"[..], 3).with_total_term_freq(3),
            TermStat::new("e", &b"d"[..], 3).with_total_term_freq(3),
        ];
        stats.sort_by(TermStat::cmp_by_total_term_freq_desc);
        let order: Vec<(&str, &[u8])> = stats.iter().map(|s| (s.field(), s.term())).collect();
        assert_eq!(
            order,
            vec![
                ("f", &b"b"[..]),
                ("e", &b"d"[..]),
                ("f", &b"d"[..]),
                ("f", &b"a"[..]),
                ("f", &b"c"[..]),
            ]
        );
    }
}
