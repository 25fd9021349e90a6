//! String similarity used to rank catalog phrases against free-form input.
//!
//! All lengths are counted in Unicode scalar values, so a Hangul syllable or a
//! Han character counts as one unit regardless of its UTF-8 width.

const BASE_WEIGHT: f64 = 0.6;
const CONTAINMENT_BONUS_CAP: f64 = 0.3;
const CONTAINMENT_BONUS_RATIO: f64 = 0.5;
const SHARED_BIGRAM_BONUS: f64 = 0.1;
const LENGTH_PENALTY_CAP: f64 = 0.2;
const LENGTH_PENALTY_RATIO: f64 = 0.2;

/// Levenshtein distance with unit costs, no transpositions
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    distance(&a, &b)
}

fn distance(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        cur[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            cur[j + 1] = (prev[j + 1] + 1).min(cur[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev[b.len()]
}

/// Normalized similarity in [0, 1]
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio(&a, &b)
}

fn ratio(a: &[char], b: &[char]) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let longest = a.len().max(b.len()) as f64;
    (1.0 - distance(a, b) as f64 / longest).max(0.0)
}

fn shares_bigram(a: &[char], b: &[char]) -> bool {
    if a.len() < 2 || b.len() < 2 {
        return false;
    }
    a.windows(2).any(|w| b.windows(2).any(|v| v == w))
}

/// Composite score of `input` against a catalog `candidate`, clamped to [0, 1].
///
/// Edit similarity carries most of the weight. A candidate that contains the
/// input gets a bonus proportional to how much of it the input covers, a
/// shared two-character run gets a flat bonus, and a length mismatch is
/// penalized.
pub fn match_score(input: &str, candidate: &str) -> f64 {
    if input.is_empty() || candidate.is_empty() {
        return 0.0;
    }

    let a: Vec<char> = input.chars().collect();
    let b: Vec<char> = candidate.chars().collect();
    let input_len = a.len() as f64;
    let candidate_len = b.len() as f64;

    let base = ratio(&a, &b) * BASE_WEIGHT;

    let bonus = if candidate.to_lowercase().contains(&input.to_lowercase()) {
        (input_len / candidate_len * CONTAINMENT_BONUS_RATIO).min(CONTAINMENT_BONUS_CAP)
    } else if shares_bigram(&a, &b) {
        SHARED_BIGRAM_BONUS
    } else {
        0.0
    };

    let longest = input_len.max(candidate_len);
    let penalty =
        ((input_len - candidate_len).abs() / longest * LENGTH_PENALTY_RATIO).min(LENGTH_PENALTY_CAP);

    (base + bonus - penalty).clamp(0.0, 1.0)
}
