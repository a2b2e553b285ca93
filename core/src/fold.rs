//! Script-aware diacritic folding.
//!
//! Folding lowercases the input and then maps every character through a
//! `FoldTable` onto a canonical base Latin letter. Latin letters carrying
//! diacritics, plus Greek and Cyrillic glyphs that look or sound like a Latin
//! letter, are covered. Characters without an entry pass through unchanged.
//!
//! The transform is strictly one-to-one per character: the output always has
//! the same number of `char`s as the input.

use ahash::AHashMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Built-in variant groups, in table-construction order.
///
/// Order matters: when a character appears in more than one group, the later
/// group's canonical letter wins.
const BUILTIN_GROUPS: &[(&str, char)] = &[
    ("ÀÁÂÃÄÅǺĀĂĄǍΑΆẢẠẦẪẨẬẰẮẴẲẶА", 'A'),
    ("àáâãåǻāăąǎªαάảạầấẫẩậằắẵẳặа", 'a'),
    ("ÇĆĈĊČ", 'C'),
    ("çćĉċč", 'c'),
    ("ÐĎĐΔ", 'D'),
    ("ðďđδ", 'd'),
    ("ÈÉÊËĒĔĖĘĚΕΈẼẺẸỀẾỄỂỆЕЭ", 'E'),
    ("èéêëēĕėęěέεẽẻẹềếễểệеэ", 'e'),
    ("ÌÍÎÏĨĪĬǏĮİΗΉΊΙΪỈỊИЫ", 'I'),
    ("ìíîïĩīĭǐįıηήίιϊỉịиыї", 'i'),
    ("ĹĻĽĿŁΛЛ", 'L'),
    ("ĺļľŀłλл", 'l'),
    ("ÑŃŅŇΝН", 'N'),
    ("ñńņňŉνн", 'n'),
    ("ÒÓÔÕŌŎǑŐƠØǾΟΌΩΏỎỌỒỐỖỔỘỜỚỠỞỢО", 'O'),
    ("òóôõōŏǒőơøǿºοόωώỏọồốỗổộờớỡởợо", 'o'),
    ("ŔŖŘΡР", 'R'),
    ("ŕŗřρр", 'r'),
    ("ŚŜŞȘŠΣС", 'S'),
    ("śŝşșšſσςс", 's'),
    ("ȚŢŤŦτТ", 'T'),
    ("țţťŧт", 't'),
    ("ÙÚÛŨŪŬŮŰŲƯǓǕǗǙǛŨỦỤỪỨỮỬỰУ", 'U'),
    ("ùúûũūŭůűųưǔǖǘǚǜυύϋủụừứữửựу", 'u'),
    ("ÝŸŶΥΎΫỲỸỶỴЙ", 'Y'),
    ("ýÿŷỳỹỷỵй", 'y'),
    ("ŹŻŽΖЗ", 'Z'),
    ("źżžζз", 'z'),
];

static BUILTIN_TABLE: Lazy<FoldTable> = Lazy::new(|| {
    FoldTable::from_groups(
        BUILTIN_GROUPS
            .iter()
            .map(|(variants, canonical)| FoldGroup::new(*variants, *canonical)),
    )
});

/// One canonical letter together with all the glyphs that fold onto it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldGroup {
    /// Every character in this string maps to `canonical`
    pub variants: String,
    pub canonical: char,
}

impl FoldGroup {
    pub fn new<V: Into<String>>(variants: V, canonical: char) -> Self {
        Self {
            variants: variants.into(),
            canonical,
        }
    }

    /// Parse a textual group rule of the form `"variants=c"`.
    ///
    /// Returns `None` when the rule has no `=`, no variants, or a canonical
    /// side that is not exactly one character.
    pub fn parse(rule: &str) -> Option<Self> {
        let (variants, canonical) = rule.rsplit_once('=')?;
        let variants = variants.trim();
        let mut canonical_chars = canonical.trim().chars();
        let canonical = canonical_chars.next()?;
        if canonical_chars.next().is_some() || variants.is_empty() {
            return None;
        }
        Some(Self::new(variants, canonical))
    }
}

/// Immutable character → canonical letter lookup table.
#[derive(Debug, Clone, Default)]
pub struct FoldTable {
    map: AHashMap<char, char>,
}

impl FoldTable {
    /// The process-wide table built from the built-in groups.
    pub fn builtin() -> &'static FoldTable {
        &BUILTIN_TABLE
    }

    /// The built-in groups in construction order.
    pub fn builtin_groups() -> Vec<FoldGroup> {
        BUILTIN_GROUPS
            .iter()
            .map(|(variants, canonical)| FoldGroup::new(*variants, *canonical))
            .collect()
    }

    /// Build a table from groups applied in order; later groups override
    /// earlier ones for characters they share.
    pub fn from_groups<I>(groups: I) -> Self
    where
        I: IntoIterator<Item = FoldGroup>,
    {
        let mut map = AHashMap::new();
        for group in groups {
            for ch in group.variants.chars() {
                map.insert(ch, group.canonical);
            }
        }
        Self { map }
    }

    /// Built-in groups followed by `extra`, so `extra` takes precedence.
    pub fn with_extra_groups(extra: &[FoldGroup]) -> Self {
        if extra.is_empty() {
            return Self::builtin().clone();
        }
        Self::from_groups(Self::builtin_groups().into_iter().chain(extra.iter().cloned()))
    }

    pub fn lookup(&self, ch: char) -> Option<char> {
        self.map.get(&ch).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// All mappings sorted by source character.
    pub fn entries(&self) -> Vec<(char, char)> {
        let mut entries: Vec<_> = self.map.iter().map(|(&k, &v)| (k, v)).collect();
        entries.sort_unstable();
        entries
    }

    /// Lowercase `input` and fold every character through this table.
    pub fn fold(&self, input: &str) -> String {
        input
            .chars()
            .map(|ch| {
                let lower = lowercase_char(ch);
                match self.lookup(lower) {
                    Some(canonical) => lowercase_char(canonical),
                    None => lower,
                }
            })
            .collect()
    }
}

/// Fold `input` with the built-in table.
///
/// # Examples
/// ```
/// use keyboard_extension_core::fold::normalize;
///
/// assert_eq!(normalize("Café"), "cafe");
/// assert_eq!(normalize("Δelta"), "delta");
/// ```
pub fn normalize(input: &str) -> String {
    FoldTable::builtin().fold(input)
}

/// Single-character lowercase. Expansions (`İ` → `i̇`) keep only their first
/// character so folding never changes the character count.
fn lowercase_char(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}
