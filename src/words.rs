// ru-morph Words Index
// Surface form → (paradigm, form) entries via the words DAWG

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::dawg::{Completer, Dictionary, Guide};
use crate::types::{LoadError, WordEntry, PAYLOAD_SEPARATOR};

/// The words index: a DAWG whose keys are `word + 0x01 + base64(payload)`,
/// where each payload is a big-endian `(paradigm_id, form_idx)` pair.
/// One word can carry several payloads (homonyms and coinciding forms);
/// the first entry in enumeration order is the primary parse.
pub struct WordsDawg {
    dict: Dictionary,
    guide: Guide,
}

impl WordsDawg {
    /// Parse a words.dawg blob: the dictionary blob immediately followed
    /// by the guide blob, both self-delimited.
    pub fn parse(input: &[u8]) -> Result<Self, LoadError> {
        let (dict, rest) = Dictionary::parse(input)?;
        let (guide, _) = Guide::parse(rest)?;
        Ok(Self { dict, guide })
    }

    /// All `(paradigm_id, form_idx)` entries for `word`, in stable
    /// enumeration order. Empty when the word is not in the dictionary.
    pub fn get(&self, word: &str) -> Vec<WordEntry> {
        let mut entries = Vec::new();

        let Some(index) = self.dict.follow_bytes(word.as_bytes(), 0) else {
            return entries;
        };
        let Some(index) = self.dict.follow_char(PAYLOAD_SEPARATOR, index) else {
            return entries;
        };

        let mut completer = Completer::new(&self.dict, &self.guide);
        completer.start(index, b"");

        while completer.next_key() {
            let mut key = completer.key();
            // Python's b2a_base64 appends a newline to every payload.
            if key.last() == Some(&b'\n') {
                key = &key[..key.len() - 1];
            }
            let Ok(payload) = STANDARD.decode(key) else {
                continue;
            };
            if payload.len() < 4 {
                continue;
            }
            entries.push(WordEntry {
                paradigm_id: u16::from_be_bytes([payload[0], payload[1]]),
                form_idx: u16::from_be_bytes([payload[2], payload[3]]),
            });
        }
        entries
    }

    /// Number of 32-bit units in the underlying DAWG.
    pub fn unit_count(&self) -> usize {
        self.dict.len()
    }

    /// Number of nodes covered by the completion guide.
    pub fn node_count(&self) -> usize {
        self.guide.node_count()
    }
}
