// ru-morph Dictionary Data
// Byte bundle of the five pymorphy dictionary files

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::LoadError;

/// File names of the pymorphy dictionary set, as shipped by
/// pymorphy3-dicts-ru inside its `data/` directory.
pub const WORDS_FILE: &str = "words.dawg";
pub const PARADIGMS_FILE: &str = "paradigms.array";
pub const SUFFIXES_FILE: &str = "suffixes.json";
pub const GRAMTAB_FILE: &str = "gramtab-opencorpora-int.json";
pub const META_FILE: &str = "meta.json";

/// Environment variable overriding the dictionary directory used by
/// [`crate::default`].
pub const DICT_DIR_ENV: &str = "RU_MORPH_DICT_DIR";

const DEFAULT_DICT_DIR: &str = "data";

/// Raw bytes of one complete dictionary set.
///
/// The analyzer consumes the bundle; where the bytes come from is the
/// caller's concern. [`DictBundle::from_dir`] reads them from a
/// directory; embedders can fill the fields from any other source.
#[derive(Debug)]
pub struct DictBundle {
    pub words: Vec<u8>,
    pub paradigms: Vec<u8>,
    pub suffixes: Vec<u8>,
    pub gramtab: Vec<u8>,
    pub meta: Vec<u8>,
}

impl DictBundle {
    /// Read all five dictionary files from `dir`.
    ///
    /// # Errors
    /// [`LoadError::File`] naming the first file that cannot be read.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        let dir = dir.as_ref();
        Ok(Self {
            words: read_file(&dir.join(WORDS_FILE))?,
            paradigms: read_file(&dir.join(PARADIGMS_FILE))?,
            suffixes: read_file(&dir.join(SUFFIXES_FILE))?,
            gramtab: read_file(&dir.join(GRAMTAB_FILE))?,
            meta: read_file(&dir.join(META_FILE))?,
        })
    }

    /// Byte sizes of the loaded blobs.
    pub fn info(&self) -> DictInfo {
        DictInfo {
            words_size: self.words.len(),
            paradigms_size: self.paradigms.len(),
            suffixes_size: self.suffixes.len(),
            gramtab_size: self.gramtab.len(),
            meta_size: self.meta.len(),
            total_size: self.words.len()
                + self.paradigms.len()
                + self.suffixes.len()
                + self.gramtab.len()
                + self.meta.len(),
        }
    }
}

/// Information about a loaded dictionary bundle.
#[derive(Debug, Clone)]
pub struct DictInfo {
    /// Size of words.dawg (DAWG units + guide) in bytes
    pub words_size: usize,
    /// Size of paradigms.array in bytes
    pub paradigms_size: usize,
    /// Size of suffixes.json in bytes
    pub suffixes_size: usize,
    /// Size of the gramtab JSON in bytes
    pub gramtab_size: usize,
    /// Size of meta.json in bytes
    pub meta_size: usize,
    /// Total size of all five files
    pub total_size: usize,
}

/// Directory the shared analyzer loads its dictionary from:
/// `$RU_MORPH_DICT_DIR`, or `./data` when the variable is unset.
pub fn dict_dir() -> PathBuf {
    match env::var_os(DICT_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(DEFAULT_DICT_DIR),
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    fs::read(path).map_err(|e| LoadError::File {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
