use serde::Serialize;

/// A single match as a half-open char range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Match {
    pub start: usize,
    pub end: usize,
}

impl Match {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Match> for (usize, usize) {
    fn from(m: Match) -> Self {
        (m.start, m.end)
    }
}

fn chars_match(a: char, b: char, case_insensitive: bool) -> bool {
    a == b || (case_insensitive && a.to_lowercase().eq(b.to_lowercase()))
}

/// Find every non-overlapping occurrence of `query`, scanning left to right.
/// A match consumes its full length before the scan resumes.
pub fn find_all(content: &str, query: &str, case_insensitive: bool) -> Vec<Match> {
    let needle: Vec<char> = query.chars().collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let haystack: Vec<char> = content.chars().collect();
    let mut matches = Vec::new();
    let mut i = 0;

    while i + needle.len() <= haystack.len() {
        let hit = haystack[i..i + needle.len()]
            .iter()
            .zip(&needle)
            .all(|(&h, &n)| chars_match(h, n, case_insensitive));

        if hit {
            matches.push(Match {
                start: i,
                end: i + needle.len(),
            });
            i += needle.len();
        } else {
            i += 1;
        }
    }

    matches
}

/// Replace every non-overlapping occurrence of `find` (case-sensitive).
/// Returns the new content and the number of replacements.
pub fn replace_all(content: &str, find: &str, replace: &str) -> (String, usize) {
    if find.is_empty() {
        return (content.to_string(), 0);
    }

    let count = content.matches(find).count();
    if count == 0 {
        return (content.to_string(), 0);
    }

    (content.replace(find, replace), count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(matches: Vec<Match>) -> Vec<(usize, usize)> {
        matches.into_iter().map(Into::into).collect()
    }

    #[test]
    fn find_all_does_not_overlap() {
        assert_eq!(spans(find_all("aaa", "aa", true)), vec![(0, 2)]);
        assert_eq!(spans(find_all("aaaa", "aa", true)), vec![(0, 2), (2, 4)]);
    }

    #[test]
    fn find_all_ignores_case_by_default() {
        let found = find_all("Hello hello HELLO", "hello", true);
        assert_eq!(spans(found), vec![(0, 5), (6, 11), (12, 17)]);
    }

    #[test]
    fn find_all_can_match_case() {
        let found = find_all("Hello hello HELLO", "hello", false);
        assert_eq!(spans(found), vec![(6, 11)]);
    }

    #[test]
    fn find_all_uses_char_offsets() {
        let found = find_all("héllo wörld wörld", "wörld", true);
        assert_eq!(spans(found), vec![(6, 11), (12, 17)]);
    }

    #[test]
    fn find_all_with_empty_query_finds_nothing() {
        assert!(find_all("abc", "", true).is_empty());
        assert!(find_all("", "a", true).is_empty());
        assert!(find_all("abc", "abcd", true).is_empty());
    }

    #[test]
    fn find_all_spans_lines() {
        let found = find_all("ab\ncd", "b\nc", true);
        assert_eq!(spans(found), vec![(1, 4)]);
    }

    #[test]
    fn replace_all_counts_replacements() {
        assert_eq!(
            replace_all("foo bar foo", "foo", "baz"),
            ("baz bar baz".to_string(), 2)
        );
    }

    #[test]
    fn replace_all_with_empty_find_is_noop() {
        assert_eq!(replace_all("abc", "", "x"), ("abc".to_string(), 0));
    }

    #[test]
    fn replace_all_is_non_overlapping() {
        assert_eq!(replace_all("aaa", "aa", "b"), ("ba".to_string(), 1));
    }

    #[test]
    fn replace_all_is_case_sensitive() {
        assert_eq!(replace_all("Foo foo", "foo", "x"), ("Foo x".to_string(), 1));
    }

    #[test]
    fn replace_all_without_match_returns_original() {
        assert_eq!(replace_all("abc", "z", "y"), ("abc".to_string(), 0));
    }
}
