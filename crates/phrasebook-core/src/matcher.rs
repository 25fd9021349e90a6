use phrasebook_types::{Language, PhraseEntry};

use crate::index::PhraseIndex;
use crate::similarity::match_score;

pub const DEFAULT_THRESHOLD: f64 = 0.8;
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Scores at or below this never show up as suggestions
const SUGGESTION_FLOOR: f64 = 0.3;
/// A threshold above this gets a second, relaxed pass
const RELAX_ABOVE: f64 = 0.5;
const RELAX_FACTOR: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    pub entry: &'a PhraseEntry,
    pub similarity: f64,
    pub language: Language,
}

fn best_match<'a>(
    candidates: &[&'a PhraseEntry],
    input: &str,
    lang: Language,
    threshold: f64,
) -> Option<MatchResult<'a>> {
    let mut best: Option<MatchResult<'a>> = None;

    for &entry in candidates {
        let score = match_score(input, entry.text_for(lang));
        if score < threshold {
            continue;
        }
        // Strictly greater keeps the earliest entry on ties
        if best.is_none_or(|b| score > b.similarity) {
            best = Some(MatchResult {
                entry,
                similarity: score,
                language: lang,
            });
        }
    }

    best
}

/// Best catalog phrase for `input` scoring at least `threshold`.
///
/// When nothing qualifies and the threshold is above 0.5, one more pass runs
/// at 80% of it.
pub fn fuzzy_match<'a>(
    index: &'a PhraseIndex,
    input: &str,
    source_lang: Language,
    threshold: f64,
) -> Option<MatchResult<'a>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let candidates = index.candidates_for(source_lang, input);
    let mut threshold = threshold;

    for pass in 0..2 {
        if pass > 0 {
            if threshold <= RELAX_ABOVE {
                break;
            }
            threshold *= RELAX_FACTOR;
            tracing::trace!("No match for {:?}, relaxing threshold to {:.3}", input, threshold);
        }

        if let Some(found) = best_match(&candidates, input, source_lang, threshold) {
            tracing::debug!(
                "Matched {:?} to {} ({:.3})",
                input,
                found.entry.id,
                found.similarity
            );
            return Some(found);
        }
    }

    None
}

pub fn batch_fuzzy_match<'a, S: AsRef<str>>(
    index: &'a PhraseIndex,
    inputs: &[S],
    source_lang: Language,
    threshold: f64,
) -> Vec<Option<MatchResult<'a>>> {
    inputs
        .iter()
        .map(|input| fuzzy_match(index, input.as_ref(), source_lang, threshold))
        .collect()
}

/// Phrases loosely resembling `input`, best first, at most `limit` of them
pub fn find_similar<'a>(
    index: &'a PhraseIndex,
    input: &str,
    source_lang: Language,
    limit: usize,
) -> Vec<MatchResult<'a>> {
    let input = input.trim();
    if input.is_empty() {
        return Vec::new();
    }

    let mut found: Vec<MatchResult<'a>> = index
        .entries()
        .iter()
        .filter_map(|entry| {
            let score = match_score(input, entry.text_for(source_lang));
            (score > SUGGESTION_FLOOR).then_some(MatchResult {
                entry,
                similarity: score,
                language: source_lang,
            })
        })
        .collect();

    // sort_by is stable, equal scores keep catalog order
    found.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    found.truncate(limit);
    found
}
