//! Fuzzy matching of free-text values onto controlled vocabularies.
//!
//! Similarity is the Ratcliff/Obershelp ratio: twice the total length of the
//! recursively found longest common blocks, divided by the combined length of
//! both strings. Comparison is case-insensitive at the character level.

use std::collections::HashMap;

/// Similarity between two strings in `[0.0, 1.0]`. Two empty strings are
/// identical (`1.0`).
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.to_uppercase().chars().collect();
    let b_chars: Vec<char> = b.to_uppercase().chars().collect();

    let combined = a_chars.len() + b_chars.len();
    if combined == 0 {
        return 1.0;
    }

    let matched = total_match_size(&a_chars, &b_chars);
    2.0 * matched as f64 / combined as f64
}

/// Picks the vocabulary term most similar to `candidate`, provided the
/// similarity reaches `threshold`. Ties keep the earliest term. Returns
/// `None` for an empty candidate, an empty vocabulary, or when nothing
/// reaches the threshold.
pub fn best_match<'a, S: AsRef<str>>(
    candidate: &str,
    vocabulary: &'a [S],
    threshold: f64,
) -> Option<&'a str> {
    if candidate.is_empty() {
        return None;
    }

    let mut best: Option<&'a str> = None;
    let mut best_score = 0.0;
    for term in vocabulary {
        let score = similarity_ratio(candidate, term.as_ref());
        if score > best_score && score >= threshold {
            best_score = score;
            best = Some(term.as_ref());
        }
    }
    best
}

/// Total length of the matching blocks between `a` and `b`: the longest
/// common block is found, then the regions to its left and right are matched
/// recursively (iterative here, via an explicit stack).
fn total_match_size(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut regions = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = regions.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        total += size;
        if alo < i && blo < j {
            regions.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            regions.push((i + size, ahi, j + size, bhi));
        }
    }

    total
}

/// Longest block of consecutive equal characters between `a[alo..ahi]` and
/// `b[blo..bhi]`, as `(start_in_a, start_in_b, length)`. Among equally long
/// blocks the one starting earliest in `a`, then earliest in `b`, wins.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best_i = alo;
    let mut best_j = blo;
    let mut best_size = 0;

    // run_ends[j] is the length of the common run ending at (i, j); rebuilt
    // row by row from the previous row's value at j - 1.
    let mut run_ends: HashMap<usize, usize> = HashMap::new();
    for i in alo..ahi {
        let mut next_run_ends = HashMap::new();
        for j in blo..bhi {
            if b[j] != a[i] {
                continue;
            }
            let length = if j > blo {
                run_ends.get(&(j - 1)).copied().unwrap_or(0) + 1
            } else {
                1
            };
            next_run_ends.insert(j, length);
            if length > best_size {
                best_i = i + 1 - length;
                best_j = j + 1 - length;
                best_size = length;
            }
        }
        run_ends = next_run_ends;
    }

    (best_i, best_j, best_size)
}
