// ru-morph Morphology Engine
// Word → forms, word → tag, targeted inflection, shared-instance façade

use std::path::Path;
use std::sync::OnceLock;

use rustc_hash::FxHashSet;
use serde_json::Value;
use tracing::{debug, info};

use crate::data::{dict_dir, DictBundle};
use crate::paradigms::{Paradigm, ParadigmStore, PARADIGM_PREFIXES};
use crate::tags::tag_matches;
use crate::types::LoadError;
use crate::words::WordsDawg;

/// Russian morphological analyzer backed by pymorphy (OpenCorpora)
/// binary dictionaries.
///
/// All tables are read-only after construction, so a single instance is
/// safe for unsynchronised concurrent use. Obtain the shared instance
/// via [`default`], or construct one explicitly with
/// [`MorphAnalyzer::from_dir`] / [`MorphAnalyzer::from_bundle`].
pub struct MorphAnalyzer {
    words: WordsDawg,
    paradigms: ParadigmStore,
    suffixes: Vec<String>,
    gramtab: Vec<String>,
}

static SHARED: OnceLock<Result<MorphAnalyzer, LoadError>> = OnceLock::new();

/// The shared analyzer, loaded on first call from the directory named
/// by `RU_MORPH_DICT_DIR` (falling back to `./data`) and cached for the
/// process lifetime. The load runs exactly once; concurrent first
/// callers all observe the same outcome, including a failed one.
pub fn default() -> Result<&'static MorphAnalyzer, LoadError> {
    SHARED
        .get_or_init(|| MorphAnalyzer::from_dir(dict_dir()))
        .as_ref()
        .map_err(Clone::clone)
}

impl MorphAnalyzer {
    /// Load a dictionary set from a directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::from_bundle(&DictBundle::from_dir(dir)?)
    }

    /// Build an analyzer from raw dictionary bytes.
    pub fn from_bundle(bundle: &DictBundle) -> Result<Self, LoadError> {
        check_meta(&bundle.meta)?;

        let words = WordsDawg::parse(&bundle.words)?;
        debug!(
            units = words.unit_count(),
            nodes = words.node_count(),
            "parsed words DAWG"
        );

        let paradigms = ParadigmStore::parse(&bundle.paradigms)?;
        let suffixes = parse_string_table(&bundle.suffixes, "suffixes.json")?;
        let gramtab = parse_string_table(&bundle.gramtab, "gramtab-opencorpora-int.json")?;
        info!(
            paradigms = paradigms.len(),
            suffixes = suffixes.len(),
            tags = gramtab.len(),
            "dictionary loaded"
        );

        Ok(Self {
            words,
            paradigms,
            suffixes,
            gramtab,
        })
    }

    /// All grammatical forms of `word`, which may be supplied in any
    /// grammatical form and any letter case. The forms are generated
    /// from the first (most probable) parse, de-duplicated, in paradigm
    /// order. Empty when the word is not in the dictionary.
    pub fn word_forms(&self, word: &str) -> Vec<String> {
        let word = normalize(word);
        if word.is_empty() {
            return Vec::new();
        }

        let entries = self.words.get(&word);
        let Some(entry) = entries.first() else {
            return Vec::new();
        };
        let Some(para) = self.paradigms.get(entry.paradigm_id) else {
            return Vec::new();
        };
        let Some(stem) = self.extract_stem(&word, para, entry.form_idx as usize) else {
            return Vec::new();
        };

        let count = para.form_count();
        let mut seen = FxHashSet::default();
        let mut forms = Vec::with_capacity(count);
        for form in 0..count {
            let Some(built) = self.build_form(para, form, &stem) else {
                continue;
            };
            if seen.insert(built.clone()) {
                forms.push(built);
            }
        }
        forms
    }

    /// OpenCorpora tag string of the first parse of `word`, e.g.
    /// `"NOUN,inan,masc sing,nomn"`. Empty when the word is unknown.
    pub fn tag(&self, word: &str) -> String {
        let word = normalize(word);
        let entries = self.words.get(&word);
        let Some(entry) = entries.first() else {
            return String::new();
        };
        let Some(para) = self.paradigms.get(entry.paradigm_id) else {
            return String::new();
        };
        let Some(tag_id) = para.tag_idx(entry.form_idx as usize) else {
            return String::new();
        };
        self.gramtab
            .get(tag_id as usize)
            .cloned()
            .unwrap_or_default()
    }

    /// Decline `word` to the requested case/number/gender. The first
    /// form of the word's paradigm whose tag carries all requested
    /// grammemes wins; the word is returned unchanged (normalized) when
    /// nothing matches. Empty strings mean "don't care". `animacy` is
    /// reserved: callers resolve animacy before inflecting (see the
    /// adjective accusative rule) and pass `""`.
    pub fn inflect(
        &self,
        word: &str,
        case: &str,
        number: &str,
        gender: &str,
        animacy: &str,
    ) -> String {
        let word = normalize(word);
        let entries = self.words.get(&word);
        let Some(entry) = entries.first() else {
            return word;
        };
        let Some(para) = self.paradigms.get(entry.paradigm_id) else {
            return word;
        };
        let Some(stem) = self.extract_stem(&word, para, entry.form_idx as usize) else {
            return word;
        };

        for form in 0..para.form_count() {
            let Some(tag_id) = para.tag_idx(form) else {
                continue;
            };
            let Some(tag) = self.gramtab.get(tag_id as usize) else {
                continue;
            };
            if tag_matches(tag, case, number, gender, animacy) {
                if let Some(built) = self.build_form(para, form, &stem) {
                    return built;
                }
            }
        }
        word
    }

    /// Strip the paradigm prefix and suffix of form `form_idx` from
    /// `word`, leaving the bare stem shared by every form of the
    /// lexeme. `None` when the word does not carry the expected
    /// affixes, or any id is out of range.
    fn extract_stem(&self, word: &str, para: Paradigm<'_>, form_idx: usize) -> Option<String> {
        let prefix = *PARADIGM_PREFIXES.get(para.prefix_idx(form_idx)? as usize)?;
        let suffix = self.suffixes.get(para.suffix_idx(form_idx)? as usize)?;
        let stem = word.strip_prefix(prefix)?.strip_suffix(suffix.as_str())?;
        Some(stem.to_owned())
    }

    fn build_form(&self, para: Paradigm<'_>, form: usize, stem: &str) -> Option<String> {
        let prefix = *PARADIGM_PREFIXES.get(para.prefix_idx(form)? as usize)?;
        let suffix = self.suffixes.get(para.suffix_idx(form)? as usize)?;
        Some(format!("{prefix}{stem}{suffix}"))
    }
}

pub(crate) fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

fn parse_string_table(raw: &[u8], file: &'static str) -> Result<Vec<String>, LoadError> {
    serde_json::from_slice(raw).map_err(|e| LoadError::Json {
        file,
        message: e.to_string(),
    })
}

/// Confirm that the dictionary was compiled with the paradigm prefixes
/// this engine hard-codes. meta.json is either a JSON object or a list
/// of `[key, value]` pairs depending on the dictionary generation; the
/// check passes when `compile_options.paradigm_prefixes` is absent.
fn check_meta(raw: &[u8]) -> Result<(), LoadError> {
    let meta: Value = serde_json::from_slice(raw).map_err(|e| LoadError::Json {
        file: "meta.json",
        message: e.to_string(),
    })?;

    let Some(prefixes) = meta_paradigm_prefixes(&meta) else {
        return Ok(());
    };
    let found: Vec<String> = prefixes
        .iter()
        .map(|v| v.as_str().unwrap_or_default().to_owned())
        .collect();
    if found == PARADIGM_PREFIXES {
        Ok(())
    } else {
        Err(LoadError::ParadigmPrefixes {
            found,
            expected: PARADIGM_PREFIXES,
        })
    }
}

fn meta_paradigm_prefixes(meta: &Value) -> Option<&Vec<Value>> {
    let options = match meta {
        Value::Object(map) => map.get("compile_options"),
        Value::Array(pairs) => pairs.iter().find_map(|pair| {
            let pair = pair.as_array()?;
            if pair.first()?.as_str()? == "compile_options" {
                pair.get(1)
            } else {
                None
            }
        }),
        _ => None,
    }?;
    options.get("paradigm_prefixes")?.as_array()
}
