//! Fuzzy affinity scoring between a typed query (the needle) and a
//! candidate label (the haystack).
//!
//! Matching is segment-aware: separator characters split the haystack into
//! segments, and recovery from a mismatch only ever retries from the next
//! segment boundary, never mid-segment. That makes "pyx" match "python"
//! (trailing unmatched needle characters are accepted) while "xpy" does
//! not. The asymmetry is a deliberate limitation.

/// Characters that split a label into segments.
const SEPARATORS: &[char] = &[' ', '-', '_', '.', '/', '\\', '"', '\''];

/// Longest candidate prefix the scorer looks at. Recursion uses one frame
/// per consumed or skipped haystack character, so this also bounds stack
/// depth.
const MAX_HAYSTACK: usize = 1024;

pub fn is_separator(c: char) -> bool {
    SEPARATORS.contains(&c)
}

/// Fuzzy affinity of `needle` against `haystack`. Higher is better; 0
/// means the needle could not be fully consumed in order. Both sides are
/// case-folded, so scoring is case-insensitive.
pub fn score(needle: &str, haystack: &str) -> u32 {
    let needle = casefold(needle);
    let mut haystack = casefold(haystack);
    haystack.truncate(MAX_HAYSTACK);
    score_suffix(&needle, &haystack)
}

fn casefold(s: &str) -> Vec<char> {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Core recursion over the remaining suffixes of needle and haystack.
///
/// Every match consumed scores 1, plus 1 more when it lands on the last
/// character of a segment. The end of the haystack counts as a boundary
/// too, so completing a whole word outranks a partial prefix of it.
fn score_suffix(needle: &[char], haystack: &[char]) -> u32 {
    // A fully consumed needle always matches; a non-empty one cannot
    // match nothing.
    if needle.is_empty() {
        return 1;
    }
    if haystack.is_empty() {
        return 0;
    }

    // Haystack separators are always skipped; a needle separator may
    // align with one as it goes by.
    if is_separator(haystack[0]) {
        let needle = if is_separator(needle[0]) {
            &needle[1..]
        } else {
            needle
        };
        return score_suffix(needle, &haystack[1..]);
    }

    // A needle boundary mid-segment forces a jump to the next haystack
    // segment.
    if is_separator(needle[0]) {
        return match next_separator(haystack) {
            Some(rest) => score_suffix(&needle[1..], rest),
            None => 0,
        };
    }

    if needle[0] == haystack[0] {
        // Consume the match here...
        let segment_end = haystack.len() == 1 || is_separator(haystack[1]);
        let consume =
            score_suffix(&needle[1..], &haystack[1..]) + 1 + u32::from(segment_end);
        // ...or defer this needle character to a later segment, whichever
        // scores better.
        let defer = match next_separator(haystack) {
            Some(rest) => score_suffix(needle, rest),
            None => 0,
        };
        consume.max(defer)
    } else {
        match next_separator(haystack) {
            Some(rest) => score_suffix(needle, rest),
            None => 0,
        }
    }
}

/// The haystack suffix starting at its next separator, or `None` when the
/// rest of the haystack is a single segment. Callers only invoke this with
/// a non-separator first character, so the suffix is strictly shorter.
fn next_separator(haystack: &[char]) -> Option<&[char]> {
    haystack
        .iter()
        .position(|&c| is_separator(c))
        .map(|at| &haystack[at..])
}
