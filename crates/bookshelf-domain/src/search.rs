//! Relevance-ranked catalog search.
//!
//! Pure, synchronous, infallible. `rank` orders an already-fetched candidate
//! set by an additive field-match score; `match_count` backs the "N found"
//! display and the no-reorder policy; `highlight` splits text into plain and
//! matched segments for rendering. None of these touch I/O or mutate their
//! inputs.

/// Record shape the engine can score. Implemented by the catalog `Book` type.
pub trait Searchable {
    fn title(&self) -> &str;
    fn author(&self) -> &str;
    fn description(&self) -> &str;
    fn publication_year(&self) -> Option<i32>;
}

/// Additive relevance score for one record against a query.
///
/// All comparisons are case-insensitive substring checks. Title matches
/// dominate (contains +100, equals +50, prefix +25), then author (+50/+25),
/// then publication year as a string (+40/+20), then description (+10).
/// A record matching nothing scores 0.
pub fn score<T: Searchable + ?Sized>(book: &T, query: &str) -> u32 {
    if query.is_empty() {
        return 0;
    }
    let term = query.to_lowercase();
    let title = book.title().to_lowercase();
    let author = book.author().to_lowercase();
    let description = book.description().to_lowercase();
    // A missing year behaves as an empty string: it can never match.
    let year = book
        .publication_year()
        .map(|y| y.to_string())
        .unwrap_or_default();

    let mut score = 0;
    if title.contains(&term) {
        score += 100;
        if title == term {
            score += 50;
        }
        if title.starts_with(&term) {
            score += 25;
        }
    }
    if author.contains(&term) {
        score += 50;
        if author == term {
            score += 25;
        }
    }
    if !year.is_empty() && year.contains(&term) {
        score += 40;
        if year == term {
            score += 20;
        }
    }
    if description.contains(&term) {
        score += 10;
    }
    score
}

fn matches<T: Searchable + ?Sized>(book: &T, term: &str) -> bool {
    book.title().to_lowercase().contains(term)
        || book.author().to_lowercase().contains(term)
        || book.description().to_lowercase().contains(term)
        || book
            .publication_year()
            .is_some_and(|y| y.to_string().contains(term))
}

/// Count of records where any field contains the query as a substring.
///
/// This is deliberately a plain predicate, independent of `score`: it drives
/// the zero-match no-reorder policy in `rank` and the "N found" count in the
/// UI. A blank query counts nothing.
pub fn match_count<T: Searchable>(books: &[T], query: &str) -> usize {
    if query.trim().is_empty() {
        return 0;
    }
    let term = query.to_lowercase();
    books.iter().filter(|b| matches(*b, &term)).count()
}

/// Rank records by descending relevance score.
///
/// Returns a sorted copy; the input slice is never reordered. A blank query
/// returns the records in their original order, as does a query that matches
/// nothing — reshuffling a list with zero actual matches would only present
/// noise, so the original order is kept.
///
/// Ties preserve original relative order (the sort is stable).
pub fn rank<T: Searchable + Clone>(books: &[T], query: &str) -> Vec<T> {
    if query.trim().is_empty() || match_count(books, query) == 0 {
        return books.to_vec();
    }
    let mut ranked = books.to_vec();
    ranked.sort_by_key(|b| std::cmp::Reverse(score(b, query)));
    ranked
}

/// One piece of highlighted text: either outside any match or inside one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Matched(String),
}

/// If `needle` is a case-insensitive prefix of `haystack`, returns the byte
/// length of the matched prefix in `haystack`.
fn match_prefix_ci(haystack: &str, needle: &str) -> Option<usize> {
    let mut h = haystack.char_indices();
    let mut n = needle.chars();
    loop {
        let Some(nc) = n.next() else {
            return Some(h.next().map_or(haystack.len(), |(i, _)| i));
        };
        let (_, hc) = h.next()?;
        if !hc.to_lowercase().eq(nc.to_lowercase()) {
            return None;
        }
    }
}

/// Split `text` on case-insensitive occurrences of `query`, preserving every
/// character of the input in order.
///
/// The query is always treated as a literal substring, never as a pattern,
/// so metacharacters like `(` or `*` need no escaping. An empty query (or a
/// text with no occurrence) yields the whole text as one plain segment.
pub fn highlight(text: &str, query: &str) -> Vec<Segment> {
    if query.is_empty() {
        return vec![Segment::Plain(text.to_owned())];
    }
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;
    while pos < text.len() {
        match match_prefix_ci(&text[pos..], query) {
            Some(len) if len > 0 => {
                if plain_start < pos {
                    segments.push(Segment::Plain(text[plain_start..pos].to_owned()));
                }
                segments.push(Segment::Matched(text[pos..pos + len].to_owned()));
                pos += len;
                plain_start = pos;
            }
            _ => {
                pos += text[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    if plain_start < text.len() {
        segments.push(Segment::Plain(text[plain_start..].to_owned()));
    }
    if segments.is_empty() {
        segments.push(Segment::Plain(String::new()));
    }
    segments
}
