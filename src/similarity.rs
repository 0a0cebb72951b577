/*!
 * Edit-distance based string similarity.
 *
 * Both scores are on a 0-100 scale. The distance is the insertion/deletion
 * ("indel") edit distance, so a single substitution costs two edits and the
 * score normalizes by the combined length of both strings.
 *
 * Comparisons are case sensitive; callers lowercase first when they want
 * case-insensitive scores.
 */

/// Similarity of two whole strings (0.0-100.0)
///
/// Two empty strings are identical and score 100. An empty string against a
/// non-empty one scores 0.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    char_ratio(&a_chars, &b_chars)
}

/// Best similarity of the shorter string against any aligned substring of
/// the longer string (0.0-100.0)
///
/// Candidate substrings are every window as long as the shorter string, plus
/// the shorter prefixes and suffixes of the longer string, so an alignment
/// that runs off either edge is still scored. A string contained verbatim in
/// the other one scores 100, which lets a short address match a longer, more
/// detailed one.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.len() == b_chars.len() {
        if a_chars.is_empty() {
            return 100.0;
        }
        // Equal lengths: either side may be the needle
        let forward = aligned_ratio(&a_chars, &b_chars);
        if forward >= 100.0 {
            return forward;
        }
        return forward.max(aligned_ratio(&b_chars, &a_chars));
    }

    let (shorter, longer) = if a_chars.len() < b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };
    if shorter.is_empty() {
        return 0.0;
    }
    aligned_ratio(&shorter, &longer)
}

/// Best ratio of `needle` against the edge prefixes, full windows and edge
/// suffixes of `haystack`, which is at least as long as `needle`
fn aligned_ratio(needle: &[char], haystack: &[char]) -> f64 {
    let width = needle.len();
    let last = haystack.len();

    let prefixes = (1..width).map(|k| &haystack[..k]);
    let windows = haystack.windows(width);
    let suffixes = (1..width).rev().map(|k| &haystack[last - k..]);

    let mut best = 0.0_f64;
    for candidate in prefixes.chain(windows).chain(suffixes) {
        let score = char_ratio(needle, candidate);
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }
    best
}

fn char_ratio(a: &[char], b: &[char]) -> f64 {
    let total_len = a.len() + b.len();
    if total_len == 0 {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let distance = indel_distance(a, b);
    100.0 * (1.0 - distance as f64 / total_len as f64)
}

/// Number of single character insertions and deletions turning `a` into `b`
fn indel_distance(a: &[char], b: &[char]) -> usize {
    a.len() + b.len() - 2 * longest_common_subsequence(a, b)
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // Use two-row optimization for space efficiency
    let mut prev_row: Vec<usize> = vec![0; b.len() + 1];
    let mut curr_row: Vec<usize> = vec![0; b.len() + 1];

    for a_char in a {
        for (j, b_char) in b.iter().enumerate() {
            curr_row[j + 1] = if a_char == b_char {
                prev_row[j] + 1
            } else {
                prev_row[j + 1].max(curr_row[j])
            };
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}
