// core/tests/fold_properties.rs
//
// Properties of the folding transform over a mixed-script corpus.

use keyboard_extension_core::{normalize, FoldTable};

const CORPUS: &[&str] = &[
    "",
    "Hello, World!",
    "ÀÁÂÃÄÅ àáâãäå",
    "Crème Brûlée à la carte",
    "Tiếng Việt có dấu",
    "Łódź Kraków Gdańsk",
    "İstanbul Iğdır",
    "ΑΒΓΔΕΖΗΘΙΚΛΜΝΞΟΠΡΣΤΥΦΧΨΩ",
    "αβγδεζηθικλμνξοπρστυφχψω ς",
    "АБВГДЕЁЖЗИЙКЛМНОПРСТУФХЦЧШЩЪЫЬЭЮЯ",
    "абвгдеёжзийклмнопрстуфхцчшщъыьэюя ї",
    "日本語のテキスト 🎹 emoji",
    "ǅ ǈ ǋ titlecase digraphs",
    "ŉ ſ ª º",
];

#[test]
fn test_normalize_is_idempotent() {
    for input in CORPUS {
        let once = normalize(input);
        assert_eq!(normalize(&once), once, "not idempotent for {:?}", input);
    }
}

#[test]
fn test_normalize_preserves_length() {
    for input in CORPUS {
        assert_eq!(
            normalize(input).chars().count(),
            input.chars().count(),
            "length changed for {:?}",
            input
        );
    }
}

#[test]
fn test_every_table_entry_folds_to_ascii() {
    // Each mapped glyph ends up as a lowercase ASCII letter once its own
    // lowercase form is also mapped
    let table = FoldTable::builtin();
    for (ch, canonical) in table.entries() {
        assert!(canonical.is_ascii_alphabetic(), "{} -> {}", ch, canonical);
        let folded = normalize(&ch.to_string());
        let lower = ch.to_lowercase().next().unwrap_or(ch);
        if table.lookup(lower).is_some() {
            assert!(
                folded.chars().all(|c| c.is_ascii_lowercase()),
                "{} folded to {}",
                ch,
                folded
            );
        }
    }
}

#[test]
fn test_ascii_is_only_lowercased() {
    let ascii: String = (0x20u8..0x7f).map(char::from).collect();
    assert_eq!(normalize(&ascii), ascii.to_ascii_lowercase());
}
