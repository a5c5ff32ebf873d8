// ru-morph Type Definitions
// Core types shared by the dictionary reader and the analyzer

use thiserror::Error;

/// Separator byte between a word and its payload keys in the words DAWG.
///
/// The words index stores `word + 0x01 + base64(payload)` as DAWG keys;
/// following this byte after the word bytes positions the completer at
/// the start of the payload subtree.
pub const PAYLOAD_SEPARATOR: u8 = 0x01;

/// A single parse from the words index: which paradigm the surface form
/// belongs to, and which row of that paradigm it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordEntry {
    /// Index into the paradigm store.
    pub paradigm_id: u16,

    /// Form row within the paradigm (0 is the lemma).
    pub form_idx: u16,
}

/// Errors raised while loading dictionary data.
///
/// Query methods never fail: absence is reported through empty results.
/// `LoadError` is `Clone` so the shared-instance façade can cache a
/// failed load and hand the same outcome to every caller.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("cannot read dictionary file {path}: {message}")]
    File { path: String, message: String },

    #[error("truncated {file}: {needed} bytes needed for {what}, {available} available")]
    Truncated {
        file: &'static str,
        what: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("paradigm {index} has length {length}, not a multiple of 3")]
    ParadigmShape { index: usize, length: usize },

    #[error("malformed {file}: {message}")]
    Json { file: &'static str, message: String },

    #[error("unsupported dictionary: paradigm prefixes {found:?}, expected {expected:?}")]
    ParadigmPrefixes {
        found: Vec<String>,
        expected: [&'static str; 3],
    },
}
