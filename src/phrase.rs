// ru-morph Phrase Concordance
// Declension of whole phrases with adjective–noun agreement

use rustc_hash::FxHashSet;

use crate::analyzer::MorphAnalyzer;
use crate::tags::{tag_grammeme, tag_pos, ANIMACIES, CASES, GENDERS, NUMBERS};

/// Russian prepositions, conjunctions, and particles that are copied
/// verbatim, never declined.
pub const SERVICE_WORDS: &[&str] = &[
    "в", "во", "на", "по", "из", "за", "от", "до", "об", "обо", "при", "про", "над", "под", "без",
    "для", "через", "между", "среди", "около", "после", "перед", "вокруг", "против", "вместо",
    "кроме", "с", "со", "к", "ко", "о", "и", "или", "но", "а", "не", "ни", "как", "что", "это",
];

/// Whether `word` is a service word (already lowercased).
pub fn is_service_word(word: &str) -> bool {
    SERVICE_WORDS.contains(&word)
}

#[derive(Clone, Default)]
struct TokenInfo {
    pos: String,
    animacy: &'static str,
    gender: &'static str,
}

/// Russian accusative agreement: the adjective's accusative coincides
/// with the nominative for inanimate heads and with the genitive for
/// animate ones, except the feminine singular, whose ending is
/// unambiguous.
fn adj_effective_case<'a>(case: &'a str, number: &str, gender: &str, animacy: &str) -> &'a str {
    if case != "accs" {
        return case;
    }
    match (number, gender) {
        ("plur", _) | ("sing", "masc") => {
            if animacy == "inan" {
                "nomn"
            } else {
                "gent"
            }
        }
        ("sing", "neut") => "nomn",
        // femn sing keeps accs: the -ую ending is unambiguous.
        _ => case,
    }
}

impl MorphAnalyzer {
    /// All grammatical forms of a phrase, with adjective–noun agreement
    /// kept intact.
    ///
    /// The rightmost noun (or pronoun) is the grammatical head. For
    /// every number × case combination the head is declined and any
    /// adjectives/participles are agreed in case, number, gender, and
    /// animacy. Service words and words not found in the dictionary are
    /// copied verbatim. The normalized original phrase is always the
    /// first element; duplicates are suppressed.
    pub fn phrase_forms_concordant(&self, phrase: &str) -> Vec<String> {
        let phrase = crate::analyzer::normalize(phrase);
        let words: Vec<&str> = phrase.split_whitespace().collect();
        if words.is_empty() {
            return Vec::new();
        }

        if words.len() == 1 {
            let forms = self.word_forms(words[0]);
            if forms.is_empty() {
                return vec![words[0].to_owned()];
            }
            return forms;
        }

        let mut infos = vec![TokenInfo::default(); words.len()];
        let mut head = None;
        for (i, word) in words.iter().enumerate() {
            if is_service_word(word) {
                continue;
            }
            let tag = self.tag(word);
            if tag.is_empty() {
                continue;
            }
            infos[i] = TokenInfo {
                pos: tag_pos(&tag).to_owned(),
                animacy: tag_grammeme(&tag, &ANIMACIES),
                gender: tag_grammeme(&tag, &GENDERS),
            };
            if infos[i].pos == "NOUN" || infos[i].pos == "NPRO" {
                head = Some(i);
            }
        }

        let mut seen = FxHashSet::default();
        seen.insert(phrase.clone());
        let mut result = vec![phrase.clone()];

        let Some(head) = head else {
            // No noun to agree with: flatten individual word forms.
            for word in &words {
                if is_service_word(word) {
                    continue;
                }
                for form in self.word_forms(word) {
                    if seen.insert(form.clone()) {
                        result.push(form);
                    }
                }
            }
            return result;
        };

        let head_gender = infos[head].gender;
        let head_animacy = infos[head].animacy;

        for number in NUMBERS {
            for case in CASES {
                let declined: Vec<String> = words
                    .iter()
                    .enumerate()
                    .map(|(i, word)| {
                        if is_service_word(word) {
                            return (*word).to_owned();
                        }
                        match infos[i].pos.as_str() {
                            "NOUN" | "NPRO" => self.inflect(word, case, number, "", ""),
                            "ADJF" | "PRTF" => {
                                self.inflect_adj(word, case, number, head_gender, head_animacy)
                            }
                            _ => (*word).to_owned(),
                        }
                    })
                    .collect();
                let form = declined.join(" ");
                if seen.insert(form.clone()) {
                    result.push(form);
                }
            }
        }
        result
    }

    /// Inflect an adjective or participle, resolving the accusative
    /// against the head's animacy first. Plural adjective forms are
    /// gender-neutral, so the gender constraint is cleared for `plur`.
    fn inflect_adj(&self, word: &str, case: &str, number: &str, gender: &str, animacy: &str) -> String {
        let case = adj_effective_case(case, number, gender, animacy);
        let gender = if number == "plur" { "" } else { gender };
        self.inflect(word, case, number, gender, "")
    }
}
