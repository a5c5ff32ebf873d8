// ru-morph DAWG Reader
// Decodes the dawg/dawg-python 32-bit-unit binary graph format

use crate::types::LoadError;

// Unit bit layout: bits 0-7 label, bit 8 has-leaf, bit 9 extension,
// bits 10-30 offset payload, bit 31 is-leaf.
const IS_LEAF_BIT: u32 = 1 << 31;
const HAS_LEAF_BIT: u32 = 1 << 8;
const EXTENSION_BIT: u32 = 1 << 9;

fn unit_has_leaf(unit: u32) -> bool {
    unit & HAS_LEAF_BIT != 0
}

fn unit_value(unit: u32) -> u32 {
    unit & !IS_LEAF_BIT
}

// Keeps the leaf bit so a value unit can never masquerade as a byte label.
fn unit_label(unit: u32) -> u32 {
    unit & (IS_LEAF_BIT | 0xFF)
}

// The extension bit scales the 21-bit offset payload by << 8.
fn unit_offset(unit: u32) -> u32 {
    (unit >> 10) << ((unit & EXTENSION_BIT) >> 6)
}

pub(crate) fn read_u32_le<'a>(
    input: &'a [u8],
    file: &'static str,
    what: &'static str,
) -> Result<(u32, &'a [u8]), LoadError> {
    if input.len() < 4 {
        return Err(LoadError::Truncated {
            file,
            what,
            needed: 4,
            available: input.len(),
        });
    }
    let value = u32::from_le_bytes([input[0], input[1], input[2], input[3]]);
    Ok((value, &input[4..]))
}

/// Read-only DAWG dictionary: an array of 32-bit transition units.
///
/// From state `index` with byte `label`, the next state is
/// `index ^ offset(units[index]) ^ label`; the transition exists iff the
/// unit found there carries `label`. The root state is index 0. Every
/// unit read is bounds-checked, so an index pointing past the array is
/// a miss, never a panic.
pub struct Dictionary {
    units: Vec<u32>,
}

impl Dictionary {
    /// Parse a dictionary blob: `u32` unit count, then that many `u32`
    /// units, all little-endian. Returns the unconsumed remainder of
    /// the input.
    pub fn parse(input: &[u8]) -> Result<(Self, &[u8]), LoadError> {
        let (count, rest) = read_u32_le(input, "words.dawg", "unit count")?;
        let needed = count as usize * 4;
        if rest.len() < needed {
            return Err(LoadError::Truncated {
                file: "words.dawg",
                what: "unit array",
                needed,
                available: rest.len(),
            });
        }
        let units = rest[..needed]
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        Ok((Self { units }, &rest[needed..]))
    }

    /// Number of 32-bit units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    fn unit(&self, index: u32) -> Option<u32> {
        self.units.get(index as usize).copied()
    }

    /// Follow a single byte transition from `index`.
    pub fn follow_char(&self, label: u8, index: u32) -> Option<u32> {
        let unit = self.unit(index)?;
        let next = index ^ unit_offset(unit) ^ label as u32;
        let next_unit = self.unit(next)?;
        (unit_label(next_unit) == label as u32).then_some(next)
    }

    /// Follow a byte sequence from `index`, failing on the first
    /// missing transition.
    pub fn follow_bytes(&self, bytes: &[u8], index: u32) -> Option<u32> {
        bytes
            .iter()
            .try_fold(index, |idx, &label| self.follow_char(label, idx))
    }

    /// Whether the state at `index` terminates a key.
    pub fn has_value(&self, index: u32) -> bool {
        self.unit(index).is_some_and(unit_has_leaf)
    }

    /// The 31-bit value attached to the state at `index`.
    pub fn value(&self, index: u32) -> Option<u32> {
        let unit = self.unit(index)?;
        let leaf = self.unit(index ^ unit_offset(unit))?;
        Some(unit_value(leaf))
    }
}

/// Completion metadata: for each DAWG node, the label of its first
/// child and of its next sibling in enumeration order. The guide is
/// what lets the completer walk a node's children without probing all
/// 256 possible transition bytes.
pub struct Guide {
    units: Vec<u8>,
}

impl Guide {
    /// Parse a guide blob: `u32` node count, then `2 * count` bytes of
    /// interleaved (child, sibling) labels. Returns the remainder.
    pub fn parse(input: &[u8]) -> Result<(Self, &[u8]), LoadError> {
        let (count, rest) = read_u32_le(input, "words.dawg", "guide size")?;
        let needed = count as usize * 2;
        if rest.len() < needed {
            return Err(LoadError::Truncated {
                file: "words.dawg",
                what: "guide table",
                needed,
                available: rest.len(),
            });
        }
        Ok((
            Self {
                units: rest[..needed].to_vec(),
            },
            &rest[needed..],
        ))
    }

    /// First outgoing label of node `index`; 0 when the node has no
    /// children (or the index is out of range).
    pub fn child(&self, index: u32) -> u8 {
        self.units.get(index as usize * 2).copied().unwrap_or(0)
    }

    /// Label of the next sibling of node `index`; 0 when it is the last
    /// child of its parent.
    pub fn sibling(&self, index: u32) -> u8 {
        self.units.get(index as usize * 2 + 1).copied().unwrap_or(0)
    }

    /// Number of nodes covered by the guide.
    pub fn node_count(&self) -> usize {
        self.units.len() / 2
    }
}

/// Depth-first enumeration of all keys reachable from a DAWG node.
///
/// After each successful [`next_key`](Completer::next_key) call,
/// [`key`](Completer::key) holds the bytes of the current completion
/// (including the starting prefix). The completer carries per-call
/// scratch; reuse within one thread amortises allocations, but it must
/// not be shared across concurrent lookups.
pub struct Completer<'a> {
    dict: &'a Dictionary,
    guide: &'a Guide,
    key: Vec<u8>,
    index_stack: Vec<u32>,
    last_index: Option<u32>,
}

impl<'a> Completer<'a> {
    pub fn new(dict: &'a Dictionary, guide: &'a Guide) -> Self {
        Self {
            dict,
            guide,
            key: Vec::new(),
            index_stack: Vec::new(),
            last_index: None,
        }
    }

    /// Position the completer at `index` with the given key prefix.
    pub fn start(&mut self, index: u32, prefix: &[u8]) {
        self.key.clear();
        self.key.extend_from_slice(prefix);
        self.index_stack.clear();
        self.index_stack.push(index);
        self.last_index = None;
    }

    /// Bytes of the completion produced by the last `next_key` call.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Advance to the next completion. Returns `false` when exhausted.
    ///
    /// The first call only descends to the nearest terminal below the
    /// start index; subsequent calls move the cursor (first child if
    /// any, otherwise up and across to the next sibling) before
    /// descending again.
    pub fn next_key(&mut self) -> bool {
        let Some(&top) = self.index_stack.last() else {
            return false;
        };
        let mut index = top;

        if self.last_index.is_some() {
            let child_label = self.guide.child(index);
            if child_label != 0 {
                match self.follow(child_label, index) {
                    Some(next) => index = next,
                    None => return false,
                }
            } else {
                loop {
                    let sibling_label = self.guide.sibling(index);
                    self.key.pop();
                    self.index_stack.pop();
                    let Some(&parent) = self.index_stack.last() else {
                        return false;
                    };
                    index = parent;
                    if sibling_label != 0 {
                        match self.follow(sibling_label, index) {
                            Some(next) => {
                                index = next;
                                break;
                            }
                            None => return false,
                        }
                    }
                }
            }
        }
        self.find_terminal(index)
    }

    fn follow(&mut self, label: u8, index: u32) -> Option<u32> {
        let next = self.dict.follow_char(label, index)?;
        self.key.push(label);
        self.index_stack.push(next);
        Some(next)
    }

    fn find_terminal(&mut self, mut index: u32) -> bool {
        while !self.dict.has_value(index) {
            let label = self.guide.child(index);
            // A non-terminal node must record a child; label 0 here
            // means malformed input, and following it would cycle.
            if label == 0 {
                return false;
            }
            match self.dict.follow_char(label, index) {
                Some(next) => {
                    self.key.push(label);
                    self.index_stack.push(next);
                    index = next;
                }
                None => return false,
            }
        }
        self.last_index = Some(index);
        true
    }
}
