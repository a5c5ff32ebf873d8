//! # ru-morph: Russian Morphological Analyzer
//!
//! Paradigm-based Russian morphology on top of pymorphy (OpenCorpora)
//! binary dictionaries. The analyzer answers three questions:
//!
//! 1. **Word forms** - every inflected form of a word's lexeme, from
//!    any grammatical form of the word
//! 2. **Tag** - the primary OpenCorpora morphological tag of a word
//! 3. **Phrase forms** - all declensions of a short phrase with
//!    adjective–noun agreement (case, number, gender, animacy) kept
//!    intact, service words left unchanged
//!
//! ## Example Usage
//!
//! ```ignore
//! let morph = ru_morph::default()?;
//!
//! let forms = morph.word_forms("кошка");   // кошка, кошки, кошке, ...
//! let tag = morph.tag("кошка");            // "NOUN,inan,femn sing,nomn"
//! let phrases = morph.phrase_forms_concordant("красивая кошка");
//! # Ok::<(), ru_morph::LoadError>(())
//! ```
//!
//! ## Architecture
//!
//! - **DAWG reader** - decodes the dawg/dawg-python 32-bit-unit binary
//!   graph format with guide-driven completion enumeration
//! - **Words index** - surface form → (paradigm, form) entries through
//!   a base64 payload convention
//! - **Paradigm store** - per-form (suffix, tag, prefix) triples;
//!   forms are rebuilt as `prefix + stem + suffix`
//! - **Morphology engine** - stem extraction, form generation, targeted
//!   inflection over OpenCorpora tags
//! - **Phrase concordance** - head selection and the Russian
//!   animacy-dependent accusative agreement rule
//!
//! The dictionary files (`words.dawg`, `paradigms.array`,
//! `suffixes.json`, `gramtab-opencorpora-int.json`, `meta.json`) are
//! read once from the directory named by `RU_MORPH_DICT_DIR` (default
//! `./data`); after that every operation is lock-free and read-only.

pub mod analyzer;
pub mod data;
pub mod dawg;
pub mod paradigms;
pub mod phrase;
pub mod tags;
pub mod types;
pub mod words;

// Re-export main types and functions for convenience
pub use analyzer::{default, MorphAnalyzer};
pub use data::{dict_dir, DictBundle, DictInfo, DICT_DIR_ENV};
pub use paradigms::{Paradigm, ParadigmStore, PARADIGM_PREFIXES};
pub use phrase::{is_service_word, SERVICE_WORDS};
pub use tags::{tag_grammeme, tag_matches, tag_pos, ANIMACIES, CASES, GENDERS, NUMBERS};
pub use types::{LoadError, WordEntry, PAYLOAD_SEPARATOR};
pub use words::WordsDawg;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
