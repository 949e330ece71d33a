//! Fuzzy similarity scoring on a 0-100 scale
//!
//! `ratio` is the indel similarity of two strings: matched characters
//! weighted against the combined length, insertions and deletions each
//! costing one. `prefix_ratio` compares only the leading characters both
//! strings have room for, so a typed prefix token must line up with the
//! stored prefix token character by character, not merely occur somewhere
//! inside it.

/// Indel similarity of two strings, 0-100
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Indel similarity of the aligned prefixes of two strings, 0-100.
///
/// Both strings are truncated to the length of the shorter before
/// scoring. "n" against "north" scores 100, while "state" against
/// "estate" scores 80: the extra leading character shifts every
/// alignment, which is exactly the mismatch this gate exists to catch.
pub fn prefix_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let len = a.len().min(b.len());
    ratio_chars(&a[..len], &b[..len])
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

/// Longest common subsequence length, rolling-row DP
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            current[j + 1] = if ca == cb {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}
