//! Pattern catalog searched by the pattern matcher.
//!
//! Catalog order matters: entry `i` tags matched cells with identifier
//! `i + 1`, and later entries overwrite earlier tags at the same anchor.
//! Tag `0` is reserved for "no pattern".

use serde::{Deserialize, Serialize};

/// Largest number of entries a catalog can hold (tags are stored in one byte).
pub const MAX_CATALOG_ENTRIES: usize = u8::MAX as usize;

/// An RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Fallback colors indexed by tag.
pub const PATTERN_COLORS: [Rgb; 8] = [
    Rgb(0, 0, 0),
    Rgb(255, 0, 0),
    Rgb(0, 255, 0),
    Rgb(0, 0, 255),
    Rgb(255, 255, 0),
    Rgb(255, 0, 255),
    Rgb(0, 255, 255),
    Rgb(255, 255, 255),
];

/// A single named shape in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Human readable name.
    pub name: String,
    /// Shape width in cells.
    pub width: u32,
    /// Shape height in cells.
    pub height: u32,
    /// Row-major 0/1 cells, exactly `width * height` long.
    pub cells: Vec<u8>,
    /// Optional color used when rendering cells tagged by this entry.
    #[serde(default)]
    pub display_color: Option<Rgb>,
}

impl CatalogEntry {
    /// Build an entry from ASCII rows where `O` marks a live cell and `.` a dead one.
    pub fn from_rows(name: &str, rows: &[&str], display_color: Option<Rgb>) -> Self {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut cells = vec![0u8; (width * height) as usize];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.bytes().enumerate() {
                if ch == b'O' {
                    cells[y * width as usize + x] = 1;
                }
            }
        }
        Self {
            name: name.to_string(),
            width,
            height,
            cells,
            display_color,
        }
    }

    /// Cell value at (x, y) inside the shape.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.cells[(y * self.width + x) as usize]
    }

    fn validate(&self, index: usize) -> Result<(), CatalogError> {
        if self.width == 0 || self.height == 0 {
            return Err(CatalogError::EmptyPattern { index });
        }
        let expected = self.width as usize * self.height as usize;
        if self.cells.len() != expected {
            return Err(CatalogError::ShapeMismatch {
                index,
                expected,
                actual: self.cells.len(),
            });
        }
        if self.cells.iter().any(|&c| c > 1) {
            return Err(CatalogError::InvalidCell { index });
        }
        Ok(())
    }
}

/// Ordered, immutable list of known shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<CatalogEntry>", into = "Vec<CatalogEntry>")]
pub struct PatternCatalog {
    entries: Vec<CatalogEntry>,
}

impl PatternCatalog {
    /// Create a catalog from entries, validating every shape.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        if entries.len() > MAX_CATALOG_ENTRIES {
            return Err(CatalogError::TooManyEntries(entries.len()));
        }
        for (i, entry) in entries.iter().enumerate() {
            entry.validate(i)?;
        }
        Ok(Self { entries })
    }

    /// Catalog with no entries. Pattern detection becomes a no-op.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Entries in catalog order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(tag, entry)` pairs in catalog order.
    pub fn tagged(&self) -> impl Iterator<Item = (u8, &CatalogEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| ((i + 1) as u8, e))
    }

    /// Entry tagged with `tag`, if any.
    pub fn by_tag(&self, tag: u8) -> Option<&CatalogEntry> {
        (tag as usize)
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
    }

    /// Look up an entry by name (case-insensitive).
    pub fn by_name(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Display color for a tag: the entry's own color, else the tag-indexed palette.
    pub fn color_for(&self, tag: u8) -> Rgb {
        self.by_tag(tag)
            .and_then(|e| e.display_color)
            .unwrap_or(PATTERN_COLORS[tag as usize % PATTERN_COLORS.len()])
    }
}

impl Default for PatternCatalog {
    /// Beehive, glider, block, blinker and R-pentomino, in that order.
    fn default() -> Self {
        let entries = vec![
            CatalogEntry::from_rows("beehive", &[".OO.", "O..O", ".OO."], Some(PATTERN_COLORS[1])),
            CatalogEntry::from_rows("glider", &[".O.", "..O", "OOO"], Some(PATTERN_COLORS[2])),
            CatalogEntry::from_rows("block", &["OO", "OO"], Some(PATTERN_COLORS[3])),
            CatalogEntry::from_rows("blinker", &["OOO"], Some(PATTERN_COLORS[4])),
            CatalogEntry::from_rows("r-pentomino", &[".OO", "OO.", ".O."], Some(PATTERN_COLORS[5])),
        ];
        Self { entries }
    }
}

impl TryFrom<Vec<CatalogEntry>> for PatternCatalog {
    type Error = CatalogError;

    fn try_from(entries: Vec<CatalogEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<PatternCatalog> for Vec<CatalogEntry> {
    fn from(catalog: PatternCatalog) -> Self {
        catalog.entries
    }
}

/// Catalog validation errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog entry {index} has zero width or height")]
    EmptyPattern { index: usize },
    #[error("Catalog entry {index} declares {expected} cells but has {actual}")]
    ShapeMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Catalog entry {index} contains a cell value other than 0 or 1")]
    InvalidCell { index: usize },
    #[error("Catalog has {0} entries, at most 255 are supported")]
    TooManyEntries(usize),
}
