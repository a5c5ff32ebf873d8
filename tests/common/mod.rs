#![allow(dead_code)]

// Shared test support: synthetic dictionary construction.
//
// `DawgBuilder` lays a key set out as XOR-addressed 32-bit units plus a
// child/sibling guide - the exact binary format the crate's loaders
// parse - and `Lexicon` assembles a complete dictionary bundle (words
// DAWG, paradigms.array, suffix/gramtab tables, meta.json) for a small
// hand-checked Russian vocabulary.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ru_morph::{DictBundle, MorphAnalyzer, PARADIGM_PREFIXES};

const IS_LEAF_BIT: u32 = 1 << 31;
const HAS_LEAF_BIT: u32 = 1 << 8;
const OFFSET_MAX: u32 = 1 << 21;
const FREE_UNIT: u32 = 0xFFFF_FFFF;

#[derive(Default)]
struct TrieNode {
    children: BTreeMap<u8, TrieNode>,
    value: Option<u32>,
}

/// Builds a DAWG blob (units + guide, words.dawg framing) from a set of
/// byte keys with attached values.
#[derive(Default)]
pub struct DawgBuilder {
    root: TrieNode,
}

impl DawgBuilder {
    pub fn insert(&mut self, key: &[u8], value: u32) {
        let mut node = &mut self.root;
        for &label in key {
            assert_ne!(label, 0, "label 0 is reserved for value arcs");
            node = node.children.entry(label).or_default();
        }
        node.value = Some(value);
    }

    /// Serialise as `u32 LE` unit count + units, then `u32 LE` node
    /// count + `2 * count` guide bytes.
    pub fn build(&self) -> Vec<u8> {
        let mut units: Vec<u32> = vec![0];
        let mut used: Vec<bool> = vec![true];
        // Each state's base (index ^ offset) must be globally unique:
        // transitions validate labels only, so two states sharing a
        // base would see each other's children.
        let mut used_bases: HashSet<u32> = HashSet::new();
        // (slot, label) pairs recorded while laying out the trie.
        let mut child_arcs: Vec<(u32, u8)> = Vec::new();
        let mut sibling_arcs: Vec<(u32, u8)> = Vec::new();

        let mut queue: VecDeque<(&TrieNode, u32)> = VecDeque::new();
        queue.push_back((&self.root, 0));

        while let Some((node, index)) = queue.pop_front() {
            let mut arc_labels: Vec<u8> = Vec::new();
            if node.value.is_some() {
                arc_labels.push(0);
            }
            arc_labels.extend(node.children.keys().copied());
            if arc_labels.is_empty() {
                continue;
            }

            // Pick the smallest offset whose slots are all free.
            let mut offset = 1u32;
            loop {
                assert!(offset < OFFSET_MAX, "test dictionary too dense");
                let base_free = !used_bases.contains(&(index ^ offset));
                let fits = base_free
                    && arc_labels.iter().all(|&label| {
                        let slot = (index ^ offset ^ label as u32) as usize;
                        slot >= used.len() || !used[slot]
                    });
                if fits {
                    break;
                }
                offset += 1;
            }
            used_bases.insert(index ^ offset);

            for &label in &arc_labels {
                let slot = (index ^ offset ^ label as u32) as usize;
                if slot >= units.len() {
                    units.resize(slot + 1, FREE_UNIT);
                    used.resize(slot + 1, false);
                }
                used[slot] = true;
            }

            let own_label = units[index as usize] & 0xFF;
            let has_leaf = if node.value.is_some() { HAS_LEAF_BIT } else { 0 };
            units[index as usize] = (offset << 10) | has_leaf | own_label;

            if let Some(value) = node.value {
                let slot = (index ^ offset) as usize;
                units[slot] = IS_LEAF_BIT | (value & !IS_LEAF_BIT);
            }

            let child_labels: Vec<u8> = node.children.keys().copied().collect();
            for (pos, (&label, child)) in node.children.iter().enumerate() {
                let slot = index ^ offset ^ label as u32;
                units[slot as usize] = label as u32;
                queue.push_back((child, slot));
                if pos + 1 < child_labels.len() {
                    sibling_arcs.push((slot, child_labels[pos + 1]));
                }
            }
            if let Some(&first) = child_labels.first() {
                child_arcs.push((index, first));
            }
        }

        let mut guide = vec![0u8; units.len() * 2];
        for (slot, label) in child_arcs {
            guide[slot as usize * 2] = label;
        }
        for (slot, label) in sibling_arcs {
            guide[slot as usize * 2 + 1] = label;
        }

        let mut blob = Vec::new();
        blob.extend_from_slice(&(units.len() as u32).to_le_bytes());
        for unit in &units {
            blob.extend_from_slice(&unit.to_le_bytes());
        }
        blob.extend_from_slice(&(units.len() as u32).to_le_bytes());
        blob.extend_from_slice(&guide);
        blob
    }
}

/// Assembles a complete dictionary bundle from paradigms and words.
#[derive(Default)]
pub struct Lexicon {
    suffixes: Vec<String>,
    suffix_ids: HashMap<String, u16>,
    gramtab: Vec<String>,
    tag_ids: HashMap<String, u16>,
    paradigms: Vec<Vec<u16>>,
    words: Vec<(String, u16, u16)>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a paradigm; each form is `(prefix_idx, suffix, tag)`.
    pub fn add_paradigm(&mut self, forms: &[(u16, &str, &str)]) -> u16 {
        let count = forms.len();
        let mut para = vec![0u16; count * 3];
        for (i, &(prefix_idx, suffix, tag)) in forms.iter().enumerate() {
            para[i] = self.suffix_id(suffix);
            para[count + i] = self.tag_id(tag);
            para[2 * count + i] = prefix_idx;
        }
        self.paradigms.push(para);
        (self.paradigms.len() - 1) as u16
    }

    /// Register one surface form explicitly.
    pub fn add_word(&mut self, surface: &str, paradigm_id: u16, form_idx: u16) {
        self.words
            .push((surface.to_owned(), paradigm_id, form_idx));
    }

    /// Materialise every form of the paradigm over `stem` and register
    /// each one under its own surface.
    pub fn add_lexeme(&mut self, stem: &str, paradigm_id: u16) {
        let para = self.paradigms[paradigm_id as usize].clone();
        let count = para.len() / 3;
        for form in 0..count {
            let suffix = &self.suffixes[para[form] as usize];
            let prefix = PARADIGM_PREFIXES[para[2 * count + form] as usize];
            let surface = format!("{prefix}{stem}{suffix}");
            self.words.push((surface, paradigm_id, form as u16));
        }
    }

    pub fn build(&self) -> DictBundle {
        let mut builder = DawgBuilder::default();
        for (record, (surface, paradigm_id, form_idx)) in self.words.iter().enumerate() {
            let mut payload = Vec::with_capacity(4);
            payload.extend_from_slice(&paradigm_id.to_be_bytes());
            payload.extend_from_slice(&form_idx.to_be_bytes());

            let mut key = surface.as_bytes().to_vec();
            key.push(0x01);
            key.extend_from_slice(STANDARD.encode(&payload).as_bytes());
            key.push(b'\n');
            builder.insert(&key, record as u32);
        }

        let mut paradigms = Vec::new();
        paradigms.extend_from_slice(&(self.paradigms.len() as u16).to_le_bytes());
        for para in &self.paradigms {
            paradigms.extend_from_slice(&(para.len() as u16).to_le_bytes());
            for value in para {
                paradigms.extend_from_slice(&value.to_le_bytes());
            }
        }

        DictBundle {
            words: builder.build(),
            paradigms,
            suffixes: serde_json::to_vec(&self.suffixes).unwrap(),
            gramtab: serde_json::to_vec(&self.gramtab).unwrap(),
            meta: r#"[["format_version", "2.4"],
                ["compile_options", {"paradigm_prefixes": ["", "по", "наи"]}]]"#
                .as_bytes()
                .to_vec(),
        }
    }

    pub fn analyzer(&self) -> MorphAnalyzer {
        MorphAnalyzer::from_bundle(&self.build()).expect("synthetic dictionary must load")
    }

    fn suffix_id(&mut self, suffix: &str) -> u16 {
        if let Some(&id) = self.suffix_ids.get(suffix) {
            return id;
        }
        let id = self.suffixes.len() as u16;
        self.suffixes.push(suffix.to_owned());
        self.suffix_ids.insert(suffix.to_owned(), id);
        id
    }

    fn tag_id(&mut self, tag: &str) -> u16 {
        if let Some(&id) = self.tag_ids.get(tag) {
            return id;
        }
        let id = self.gramtab.len() as u16;
        self.gramtab.push(tag.to_owned());
        self.tag_ids.insert(tag.to_owned(), id);
        id
    }
}

/// Paradigm ids of the mini lexicon, in registration order.
pub struct MiniLexicon {
    pub lexicon: Lexicon,
    pub cat: u16,
    pub table: u16,
    pub city: u16,
    pub big: u16,
    pub pretty: u16,
    pub read: u16,
    pub quickly: u16,
    pub stove: u16,
    pub bake: u16,
    pub bigger: u16,
}

/// A small hand-checked Russian vocabulary covering nouns of all three
/// genders' agreement partners, adjectives, a verb, an adverb, a
/// noun/infinitive homonym, and a comparative with the "по" paradigm
/// prefix.
pub fn mini_russian() -> MiniLexicon {
    let mut lex = Lexicon::new();

    // кошка: feminine inanimate noun, stem "кош" (fleeting vowel in
    // the genitive plural keeps the stem short).
    let cat = lex.add_paradigm(&[
        (0, "ка", "NOUN,inan,femn sing,nomn"),
        (0, "ки", "NOUN,inan,femn sing,gent"),
        (0, "ке", "NOUN,inan,femn sing,datv"),
        (0, "ку", "NOUN,inan,femn sing,accs"),
        (0, "кой", "NOUN,inan,femn sing,ablt"),
        (0, "ке", "NOUN,inan,femn sing,loct"),
        (0, "ки", "NOUN,inan,femn plur,nomn"),
        (0, "ек", "NOUN,inan,femn plur,gent"),
        (0, "кам", "NOUN,inan,femn plur,datv"),
        (0, "ки", "NOUN,inan,femn plur,accs"),
        (0, "ками", "NOUN,inan,femn plur,ablt"),
        (0, "ках", "NOUN,inan,femn plur,loct"),
    ]);
    lex.add_lexeme("кош", cat);

    // стол: masculine inanimate noun, stem "стол".
    let table = lex.add_paradigm(&[
        (0, "", "NOUN,inan,masc sing,nomn"),
        (0, "а", "NOUN,inan,masc sing,gent"),
        (0, "у", "NOUN,inan,masc sing,datv"),
        (0, "", "NOUN,inan,masc sing,accs"),
        (0, "ом", "NOUN,inan,masc sing,ablt"),
        (0, "е", "NOUN,inan,masc sing,loct"),
        (0, "ы", "NOUN,inan,masc plur,nomn"),
        (0, "ов", "NOUN,inan,masc plur,gent"),
        (0, "ам", "NOUN,inan,masc plur,datv"),
        (0, "ы", "NOUN,inan,masc plur,accs"),
        (0, "ами", "NOUN,inan,masc plur,ablt"),
        (0, "ах", "NOUN,inan,masc plur,loct"),
    ]);
    lex.add_lexeme("стол", table);

    // город: masculine inanimate noun with the -а plural.
    let city = lex.add_paradigm(&[
        (0, "", "NOUN,inan,masc sing,nomn"),
        (0, "а", "NOUN,inan,masc sing,gent"),
        (0, "у", "NOUN,inan,masc sing,datv"),
        (0, "", "NOUN,inan,masc sing,accs"),
        (0, "ом", "NOUN,inan,masc sing,ablt"),
        (0, "е", "NOUN,inan,masc sing,loct"),
        (0, "а", "NOUN,inan,masc plur,nomn"),
        (0, "ов", "NOUN,inan,masc plur,gent"),
        (0, "ам", "NOUN,inan,masc plur,datv"),
        (0, "а", "NOUN,inan,masc plur,accs"),
        (0, "ами", "NOUN,inan,masc plur,ablt"),
        (0, "ах", "NOUN,inan,masc plur,loct"),
    ]);
    lex.add_lexeme("город", city);

    // большой: stressed-ending adjective, stem "больш".
    let big = lex.add_paradigm(&[
        (0, "ой", "ADJF,Qual masc,sing,nomn"),
        (0, "ого", "ADJF,Qual masc,sing,gent"),
        (0, "ому", "ADJF,Qual masc,sing,datv"),
        (0, "им", "ADJF,Qual masc,sing,ablt"),
        (0, "ом", "ADJF,Qual masc,sing,loct"),
        (0, "ая", "ADJF,Qual femn,sing,nomn"),
        (0, "ой", "ADJF,Qual femn,sing,gent"),
        (0, "ой", "ADJF,Qual femn,sing,datv"),
        (0, "ую", "ADJF,Qual femn,sing,accs"),
        (0, "ой", "ADJF,Qual femn,sing,ablt"),
        (0, "ой", "ADJF,Qual femn,sing,loct"),
        (0, "ое", "ADJF,Qual neut,sing,nomn"),
        (0, "ого", "ADJF,Qual neut,sing,gent"),
        (0, "ие", "ADJF,Qual plur,nomn"),
        (0, "их", "ADJF,Qual plur,gent"),
        (0, "им", "ADJF,Qual plur,datv"),
        (0, "ими", "ADJF,Qual plur,ablt"),
        (0, "их", "ADJF,Qual plur,loct"),
    ]);
    lex.add_lexeme("больш", big);

    // красивый: hard-stem adjective, stem "красив".
    let pretty = lex.add_paradigm(&[
        (0, "ый", "ADJF,Qual masc,sing,nomn"),
        (0, "ого", "ADJF,Qual masc,sing,gent"),
        (0, "ому", "ADJF,Qual masc,sing,datv"),
        (0, "ым", "ADJF,Qual masc,sing,ablt"),
        (0, "ом", "ADJF,Qual masc,sing,loct"),
        (0, "ая", "ADJF,Qual femn,sing,nomn"),
        (0, "ой", "ADJF,Qual femn,sing,gent"),
        (0, "ой", "ADJF,Qual femn,sing,datv"),
        (0, "ую", "ADJF,Qual femn,sing,accs"),
        (0, "ой", "ADJF,Qual femn,sing,ablt"),
        (0, "ой", "ADJF,Qual femn,sing,loct"),
        (0, "ое", "ADJF,Qual neut,sing,nomn"),
        (0, "ые", "ADJF,Qual plur,nomn"),
        (0, "ых", "ADJF,Qual plur,gent"),
        (0, "ым", "ADJF,Qual plur,datv"),
        (0, "ыми", "ADJF,Qual plur,ablt"),
        (0, "ых", "ADJF,Qual plur,loct"),
    ]);
    lex.add_lexeme("красив", pretty);

    // читать: imperfective verb, present tense rows, stem "чита".
    let read = lex.add_paradigm(&[
        (0, "ть", "INFN,impf,tran"),
        (0, "ю", "VERB,impf,tran sing,1per,pres,indc"),
        (0, "ешь", "VERB,impf,tran sing,2per,pres,indc"),
        (0, "ет", "VERB,impf,tran sing,3per,pres,indc"),
        (0, "ем", "VERB,impf,tran plur,1per,pres,indc"),
        (0, "ете", "VERB,impf,tran plur,2per,pres,indc"),
        (0, "ют", "VERB,impf,tran plur,3per,pres,indc"),
    ]);
    lex.add_lexeme("чита", read);

    // быстро: indeclinable adverb.
    let quickly = lex.add_paradigm(&[(0, "", "ADVB")]);
    lex.add_lexeme("быстро", quickly);

    // печь the noun (registered first, so it is the primary parse)...
    let stove = lex.add_paradigm(&[
        (0, "ь", "NOUN,inan,femn sing,nomn"),
        (0, "и", "NOUN,inan,femn sing,gent"),
        (0, "и", "NOUN,inan,femn sing,datv"),
        (0, "ь", "NOUN,inan,femn sing,accs"),
        (0, "ью", "NOUN,inan,femn sing,ablt"),
        (0, "и", "NOUN,inan,femn sing,loct"),
    ]);
    lex.add_lexeme("печ", stove);

    // ...and печь the infinitive, sharing the surface.
    let bake = lex.add_paradigm(&[
        (0, "чь", "INFN,impf,tran"),
        (0, "ку", "VERB,impf,tran sing,1per,pres,indc"),
        (0, "чёт", "VERB,impf,tran sing,3per,pres,indc"),
    ]);
    lex.add_lexeme("пе", bake);

    // больше / побольше: comparative with the "по" paradigm prefix.
    let bigger = lex.add_paradigm(&[(0, "е", "COMP,Qual"), (1, "е", "COMP,Qual Cmp2")]);
    lex.add_lexeme("больш", bigger);

    MiniLexicon {
        lexicon: lex,
        cat,
        table,
        city,
        big,
        pretty,
        read,
        quickly,
        stove,
        bake,
        bigger,
    }
}

/// Analyzer over the mini lexicon.
pub fn mini_analyzer() -> MorphAnalyzer {
    mini_russian().lexicon.analyzer()
}
