// ru-morph Paradigm Store
// Fixed-layout inflection tables: (suffix, tag, prefix) ids per form

use crate::types::LoadError;

/// The three paradigm prefixes used by pymorphy dictionaries. Indices
/// match `meta.json → compile_options → paradigm_prefixes`.
pub const PARADIGM_PREFIXES: [&str; 3] = ["", "по", "наи"];

/// A paradigm is a flat `u16` array of length `3N` for `N` forms:
/// `[0..N]` suffix ids, `[N..2N]` gramtab tag ids, `[2N..3N]` indices
/// into [`PARADIGM_PREFIXES`].
#[derive(Debug, Clone, Copy)]
pub struct Paradigm<'a> {
    data: &'a [u16],
}

impl<'a> Paradigm<'a> {
    /// Number of forms in the paradigm.
    pub fn form_count(&self) -> usize {
        self.data.len() / 3
    }

    /// Suffix-table id of form `form`.
    pub fn suffix_idx(&self, form: usize) -> Option<u16> {
        (form < self.form_count()).then(|| self.data[form])
    }

    /// Gramtab id of form `form`.
    pub fn tag_idx(&self, form: usize) -> Option<u16> {
        (form < self.form_count()).then(|| self.data[self.form_count() + form])
    }

    /// [`PARADIGM_PREFIXES`] index of form `form`.
    pub fn prefix_idx(&self, form: usize) -> Option<u16> {
        (form < self.form_count()).then(|| self.data[2 * self.form_count() + form])
    }
}

/// Indexed collection of paradigms loaded from paradigms.array.
pub struct ParadigmStore {
    paradigms: Vec<Vec<u16>>,
}

impl ParadigmStore {
    /// Parse a paradigms.array blob: `u16 LE` paradigm count, then for
    /// each paradigm a `u16 LE` length followed by that many `u16 LE`
    /// values. A paradigm whose length is not a multiple of 3 is
    /// rejected.
    pub fn parse(input: &[u8]) -> Result<Self, LoadError> {
        let (count, mut rest) = read_u16_le(input, "paradigm count")?;
        let mut paradigms = Vec::with_capacity(count as usize);

        for index in 0..count as usize {
            let (length, after) = read_u16_le(rest, "paradigm length")?;
            rest = after;

            let needed = length as usize * 2;
            if rest.len() < needed {
                return Err(LoadError::Truncated {
                    file: "paradigms.array",
                    what: "paradigm data",
                    needed,
                    available: rest.len(),
                });
            }
            if length % 3 != 0 {
                return Err(LoadError::ParadigmShape {
                    index,
                    length: length as usize,
                });
            }

            let data = rest[..needed]
                .chunks_exact(2)
                .map(|c| u16::from_le_bytes([c[0], c[1]]))
                .collect();
            paradigms.push(data);
            rest = &rest[needed..];
        }

        Ok(Self { paradigms })
    }

    /// Number of paradigms in the store.
    pub fn len(&self) -> usize {
        self.paradigms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paradigms.is_empty()
    }

    pub fn get(&self, id: u16) -> Option<Paradigm<'_>> {
        self.paradigms
            .get(id as usize)
            .map(|data| Paradigm { data })
    }
}

fn read_u16_le<'a>(
    input: &'a [u8],
    what: &'static str,
) -> Result<(u16, &'a [u8]), LoadError> {
    if input.len() < 2 {
        return Err(LoadError::Truncated {
            file: "paradigms.array",
            what,
            needed: 2,
            available: input.len(),
        });
    }
    Ok((u16::from_le_bytes([input[0], input[1]]), &input[2..]))
}
