//! Partial-ratio string similarity (0–100), substring tolerant and case-insensitive.
//!
//! The shorter string is aligned against every window of the longer one, including
//! the shorter windows hanging off either end, and the best Indel ratio wins.
//! Each window is scored with `rapidfuzz`'s normalized Indel similarity.

use std::collections::HashSet;

use rapidfuzz::fuzz;

/// Score at or above which a requirement counts as matched.
pub const MATCH_THRESHOLD: f64 = 80.0;

pub fn meets_threshold(score: f64) -> bool {
    score >= MATCH_THRESHOLD
}

/// Best Indel ratio of the shorter string against any alignment in the longer one.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let (needle, haystack) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if needle.is_empty() {
        return if haystack.is_empty() { 100.0 } else { 0.0 };
    }

    let best = best_window_ratio(&needle, &haystack);
    if best < 100.0 && needle.len() == haystack.len() {
        best.max(best_window_ratio(&haystack, &needle))
    } else {
        best
    }
}

fn best_window_ratio(needle: &[char], haystack: &[char]) -> f64 {
    let needle_chars: HashSet<char> = needle.iter().copied().collect();
    let m = needle.len();
    let n = haystack.len();
    let mut best = 0.0_f64;

    let mut consider = |window: &[char]| -> bool {
        let score = window_ratio(needle, window);
        if score > best {
            best = score;
        }
        best >= 100.0
    };

    // Windows growing from the left edge. A window whose new last char is not in
    // the needle cannot beat the window one char shorter.
    for end in 1..m {
        if needle_chars.contains(&haystack[end - 1]) && consider(&haystack[..end]) {
            return 100.0;
        }
    }

    // Full-length windows.
    for start in 0..=n - m {
        if needle_chars.contains(&haystack[start + m - 1]) && consider(&haystack[start..start + m])
        {
            return 100.0;
        }
    }

    // Windows shrinking toward the right edge.
    for start in (n - m + 1)..n {
        if needle_chars.contains(&haystack[start]) && consider(&haystack[start..]) {
            return 100.0;
        }
    }

    best
}

fn window_ratio(needle: &[char], window: &[char]) -> f64 {
    fuzz::ratio(needle.iter().copied(), window.iter().copied()) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_scores_100() {
        assert_eq!(partial_ratio("Python", "python developer"), 100.0);
        assert_eq!(partial_ratio("sql database admin", "SQL"), 100.0);
    }

    #[test]
    fn test_exact_80_boundary_pair() {
        // Best alignment shares 4 of 5 chars in a 5-char window.
        let score = partial_ratio("abcde", "abxde");
        assert!((score - 80.0).abs() < 1e-9, "got {score}");
        assert!(meets_threshold(score));
    }

    #[test]
    fn test_threshold_is_inclusive_at_80() {
        assert!(meets_threshold(80.0));
        assert!(!meets_threshold(79.0));
        assert!(!meets_threshold(79.99));
    }

    #[test]
    fn test_dissimilar_strings_score_low() {
        let score = partial_ratio("abcde", "abxye");
        assert!((score - 60.0).abs() < 1e-9, "got {score}");
        assert!(!meets_threshold(score));
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(partial_ratio("", ""), 100.0);
        assert_eq!(partial_ratio("", "rust"), 0.0);
        assert_eq!(partial_ratio("rust", ""), 0.0);
    }

    #[test]
    fn test_equal_length_pair_is_case_insensitive() {
        assert_eq!(partial_ratio("Rust", "rUST"), 100.0);
        assert_eq!(partial_ratio("abcd", "abce"), partial_ratio("abce", "abcd"));
    }

    #[test]
    fn test_edge_windows_are_considered() {
        // "kuber" hangs off the end of the haystack; the 5-char suffix window is best.
        let score = partial_ratio("kubernetes", "i love kuber");
        assert!(score >= 66.0, "got {score}");
    }
}
