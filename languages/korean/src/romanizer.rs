//! Revised Romanization of Hangul syllables.
//!
//! Each precomposed syllable is split into initial, medial and final jamo. The
//! final consonant is rendered according to what follows it: carried over as
//! the onset of a following vowel-initial syllable, nasalized before ㄴ/ㅁ,
//! and doubled to `ll` before ㄹ.

use phrasebook_core::language::Romanizer;

const SYLLABLE_BASE: u32 = 0xAC00;
const SYLLABLE_LAST: u32 = 0xD7A3;
const VOWEL_COUNT: u32 = 21;
const FINAL_COUNT: u32 = 28;

const INITIAL_NIEUN: usize = 2;
const INITIAL_RIEUL: usize = 5;
const INITIAL_MIEUM: usize = 6;
const INITIAL_IEUNG: usize = 11;

const INITIALS: [&str; 19] = [
    "g", "kk", "n", "d", "tt", "r", "m", "b", "pp", "s", "ss", "", "j", "jj", "ch", "k", "t", "p",
    "h",
];

const VOWELS: [&str; 21] = [
    "a", "ae", "ya", "yae", "eo", "e", "yeo", "ye", "o", "wa", "wae", "oe", "yo", "u", "wo", "we",
    "wi", "yu", "eu", "ui", "i",
];

/// Final consonant before a consonant or at the end of a word
const FINALS: [&str; 28] = [
    "", "k", "k", "k", "n", "n", "n", "t", "l", "k", "m", "l", "l", "l", "p", "l", "m", "p", "p",
    "t", "t", "ng", "t", "t", "k", "t", "p", "t",
];

/// Final consonant when the next syllable starts with a silent ㅇ
const LIAISON: [&str; 28] = [
    "", "g", "kk", "gs", "n", "nj", "n", "d", "r", "lg", "lm", "lb", "ls", "lt", "lp", "r", "m",
    "b", "bs", "s", "ss", "ng", "j", "ch", "k", "t", "p", "",
];

#[derive(Debug, Clone, Copy)]
struct Syllable {
    initial: usize,
    vowel: usize,
    coda: usize,
}

impl Syllable {
    fn decompose(c: char) -> Option<Self> {
        let code = c as u32;
        if !(SYLLABLE_BASE..=SYLLABLE_LAST).contains(&code) {
            return None;
        }
        let offset = code - SYLLABLE_BASE;
        Some(Self {
            initial: (offset / (VOWEL_COUNT * FINAL_COUNT)) as usize,
            vowel: ((offset % (VOWEL_COUNT * FINAL_COUNT)) / FINAL_COUNT) as usize,
            coda: (offset % FINAL_COUNT) as usize,
        })
    }
}

/// Rendered final, plus an override for the next syllable's initial
fn render_coda(coda: usize, next_initial: Option<usize>) -> (&'static str, Option<&'static str>) {
    if coda == 0 {
        return ("", None);
    }

    let plain = FINALS[coda];
    match next_initial {
        Some(INITIAL_IEUNG) => (LIAISON[coda], None),
        Some(INITIAL_NIEUN | INITIAL_MIEUM) => {
            let nasal = match plain {
                "k" => "ng",
                "t" => "n",
                "p" => "m",
                other => other,
            };
            (nasal, None)
        }
        Some(INITIAL_RIEUL) if plain == "l" => ("l", Some("l")),
        _ => (plain, None),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HangulRomanizer;

impl HangulRomanizer {
    pub fn new() -> Self {
        Self
    }
}

impl Romanizer for HangulRomanizer {
    fn romanize(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut out = String::with_capacity(text.len());
        let mut initial_override: Option<&'static str> = None;

        for (i, &c) in chars.iter().enumerate() {
            let Some(syllable) = Syllable::decompose(c) else {
                initial_override = None;
                out.push(c);
                continue;
            };

            out.push_str(initial_override.take().unwrap_or(INITIALS[syllable.initial]));
            out.push_str(VOWELS[syllable.vowel]);

            let next_initial = chars
                .get(i + 1)
                .copied()
                .and_then(Syllable::decompose)
                .map(|s| s.initial);
            let (coda, next_override) = render_coda(syllable.coda, next_initial);
            out.push_str(coda);
            initial_override = next_override;
        }

        out
    }
}
