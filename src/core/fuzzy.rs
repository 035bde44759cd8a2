//! Fuzzy subsequence matching and ranking.
//!
//! A query matches a candidate when every query character appears in the
//! candidate in the same order, ignoring case. Scores are lower-is-better:
//! a literal substring scores 0, other matches score the total gap between
//! consecutive matched characters.

/// Score returned when the query is not a subsequence of the candidate.
pub const NO_MATCH: usize = usize::MAX;

fn lowercase_chars(text: &str) -> Vec<char> {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Check if `query` is a case-insensitive subsequence of `item`.
pub fn fuzzy_match(item: &str, query: &str) -> bool {
    let mut needle = query.chars().flat_map(char::to_lowercase).peekable();
    for c in item.chars().flat_map(char::to_lowercase) {
        if needle.peek() == Some(&c) {
            needle.next();
        }
    }
    needle.peek().is_none()
}

/// Keep items that fuzzy-match `query`, in their original order.
///
/// An empty query returns every item.
pub fn filter<'a, S: AsRef<str>>(items: &'a [S], query: &str) -> Vec<&'a S> {
    items
        .iter()
        .filter(|item| query.is_empty() || fuzzy_match(S::as_ref(item), query))
        .collect()
}

/// Score how well `item` matches `query`. Lower is better.
pub fn score(item: &str, query: &str) -> usize {
    if query.is_empty() {
        return 0;
    }

    let item = lowercase_chars(item);
    let query = lowercase_chars(query);

    if item.windows(query.len()).any(|window| window == query.as_slice()) {
        return 0;
    }

    let mut total = 0;
    let mut last: Option<usize> = None;
    let mut remaining = query.iter().peekable();

    for (i, c) in item.iter().enumerate() {
        if remaining.peek() == Some(&c) {
            if let Some(prev) = last {
                total += i - prev - 1;
            }
            last = Some(i);
            remaining.next();
        }
    }

    if remaining.peek().is_some() {
        return NO_MATCH;
    }
    total
}

/// Rank candidate indices by score, dropping non-matches.
///
/// The sort is stable, so equally scored candidates keep the order they
/// were given in.
pub fn rank<'a, I>(candidates: I, query: &str) -> Vec<usize>
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    let mut scored: Vec<(usize, usize)> = candidates
        .into_iter()
        .map(|(index, text)| (index, score(text, query)))
        .filter(|&(_, score)| score != NO_MATCH)
        .collect();

    scored.sort_by_key(|&(_, score)| score);
    scored.into_iter().map(|(index, _)| index).collect()
}

/// Filter items by fuzzy match and sort them best-first.
///
/// An empty query returns every item in its original order.
pub fn filter_with_scores<'a, S: AsRef<str>>(items: &'a [S], query: &str) -> Vec<&'a S> {
    if query.is_empty() {
        return items.iter().collect();
    }
    rank(items.iter().map(S::as_ref).enumerate(), query)
        .into_iter()
        .map(|i| &items[i])
        .collect()
}
