//! Stateless string-matching functions.
//!
//! Search and filter primitives for use over keys held in the containers:
//! subsequence ("fuzzy") matching, normalized edit-distance similarity,
//! regex search, case-insensitive substring search, and whole-word
//! matching. All functions are pure; invalid regular expressions are
//! absorbed into the negative result rather than surfaced as errors, so
//! callers can feed user input straight through.
//!
//! # Examples
//!
//! ```rust
//! use containerkit::matcher;
//!
//! assert!(matcher::fuzzy_match("abc", "aXbXc"));
//! assert!(matcher::similarity("kitten", "sitting") > 0.5);
//! assert!(matcher::word_match("world", "hello world"));
//! assert!(!matcher::regex_match("([", "anything")); // invalid, not an error
//! ```

use regex::Regex;
use smallvec::SmallVec;

/// Test whether `pattern` is an in-order subsequence of `text`.
///
/// Pattern characters must appear in `text` in the same relative order but
/// need not be contiguous. The empty pattern matches any text; a non-empty
/// pattern never matches empty text.
///
/// # Examples
///
/// ```rust
/// use containerkit::matcher::fuzzy_match;
///
/// assert!(fuzzy_match("abc", "aabbcc"));
/// assert!(!fuzzy_match("abc", "acb")); // order matters
/// assert!(fuzzy_match("", "anything"));
/// ```
pub fn fuzzy_match(pattern: &str, text: &str) -> bool {
    let mut pending = pattern.chars().peekable();
    for ch in text.chars() {
        if pending.peek() == Some(&ch) {
            pending.next();
        }
    }
    pending.peek().is_none()
}

/// Compute the Levenshtein edit distance between two strings.
///
/// Minimum number of single-character insertions, deletions, and
/// substitutions transforming `source` into `target`. Space-optimized
/// two-row dynamic programming over characters, not bytes.
///
/// # Examples
///
/// ```rust
/// use containerkit::matcher::levenshtein;
///
/// assert_eq!(levenshtein("kitten", "sitting"), 3);
/// assert_eq!(levenshtein("test", "test"), 0);
/// ```
pub fn levenshtein(source: &str, target: &str) -> usize {
    let source_chars: SmallVec<[char; 32]> = source.chars().collect();
    let target_chars: SmallVec<[char; 32]> = target.chars().collect();

    let m = source_chars.len();
    let n = target_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev_row = vec![0; n + 1];
    let mut curr_row = vec![0; n + 1];

    for (j, item) in prev_row.iter_mut().enumerate().take(n + 1) {
        *item = j;
    }

    for i in 1..=m {
        curr_row[0] = i;

        for j in 1..=n {
            let cost = if source_chars[i - 1] == target_chars[j - 1] {
                0
            } else {
                1
            };

            curr_row[j] = (prev_row[j] + 1) // deletion
                .min(curr_row[j - 1] + 1) // insertion
                .min(prev_row[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}

/// Score how similar two strings are, in `[0, 1]`.
///
/// Normalized edit distance: `1 - d(a, b) / max(|a|, |b|)`. Identical
/// strings score `1.0`; two empty strings score `1.0`; one empty and one
/// non-empty score `0.0`.
///
/// # Examples
///
/// ```rust
/// use containerkit::matcher::similarity;
///
/// assert_eq!(similarity("hello", "hello"), 1.0);
/// assert_eq!(similarity("", ""), 1.0);
/// assert_eq!(similarity("", "hello"), 0.0);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();

    if len_a == 0 && len_b == 0 {
        return 1.0;
    }
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let distance = levenshtein(a, b);
    1.0 - distance as f64 / len_a.max(len_b) as f64
}

/// Test whether `pattern` matches anywhere in `text`.
///
/// An invalid pattern returns `false` instead of raising, so untrusted
/// patterns need no pre-validation.
pub fn regex_match(pattern: &str, text: &str) -> bool {
    match Regex::new(pattern) {
        Ok(re) => re.is_match(text),
        Err(_) => false,
    }
}

/// Collect every non-overlapping substring of `text` matching `pattern`.
///
/// An invalid pattern yields an empty sequence.
///
/// # Examples
///
/// ```rust
/// use containerkit::matcher::find_matches;
///
/// assert_eq!(find_matches(r"\d+", "a1b22c333"), vec!["1", "22", "333"]);
/// assert!(find_matches("([", "anything").is_empty());
/// ```
pub fn find_matches(pattern: &str, text: &str) -> Vec<String> {
    match Regex::new(pattern) {
        Ok(re) => re.find_iter(text).map(|m| m.as_str().to_string()).collect(),
        Err(_) => Vec::new(),
    }
}

/// Case-insensitive substring test.
///
/// An empty needle matches any haystack, including the empty one.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Test whether `word` occurs in `text` as a whole word.
///
/// An occurrence counts only when bounded by non-alphanumeric characters
/// or the string edges, never as a fragment of a larger token. The empty
/// word matches nothing.
///
/// # Examples
///
/// ```rust
/// use containerkit::matcher::word_match;
///
/// assert!(word_match("or", "black or white"));
/// assert!(!word_match("or", "hello world")); // inside "world"
/// assert!(word_match("save", "save!"));
/// ```
pub fn word_match(word: &str, text: &str) -> bool {
    if word.is_empty() {
        return false;
    }

    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find(word) {
        let begin = search_from + offset;
        let end = begin + word.len();

        let bounded_left = text[..begin]
            .chars()
            .next_back()
            .map_or(true, |ch| !ch.is_alphanumeric());
        let bounded_right = text[end..]
            .chars()
            .next()
            .map_or(true, |ch| !ch.is_alphanumeric());
        if bounded_left && bounded_right {
            return true;
        }

        // Step past the first character of this occurrence so overlapping
        // candidates are still examined
        search_from = begin
            + word
                .chars()
                .next()
                .map_or(1, |ch| ch.len_utf8());
    }
    false
}
