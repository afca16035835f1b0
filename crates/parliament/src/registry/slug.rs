//! URL slugs for representative pages.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::transpose::is_georgian_char;

/// National romanization of the modern Georgian alphabet, ა through ჰ.
const MKHEDRULI_LATIN: [&str; 33] = [
    "a", "b", "g", "d", "e", "v", "z", "t", "i", "k", "l", "m", "n", "o", "p", "zh", "r", "s",
    "t", "u", "p", "k", "gh", "q", "sh", "ch", "ts", "dz", "ts", "ch", "kh", "j", "h",
];

const MKHEDRULI_START: u32 = 0x10D0;
const MTAVRULI_START: u32 = 0x1C90;

/// Romanizes Georgian letters and passes everything else through.
pub fn transliterate(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    for c in value.chars() {
        match georgian_latin(c) {
            Some(latin) => output.push_str(latin),
            None => output.push(c),
        }
    }
    output
}

fn georgian_latin(c: char) -> Option<&'static str> {
    if !is_georgian_char(c) {
        return None;
    }
    let code = c as u32;
    let offset = if code >= MTAVRULI_START {
        code - MTAVRULI_START
    } else {
        code.checked_sub(MKHEDRULI_START)?
    };
    MKHEDRULI_LATIN.get(offset as usize).copied()
}

/// Strips diacritics from Latin text: `Šengelia` becomes `Sengelia`.
pub fn fold_ascii(value: &str) -> String {
    value.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Lowercase ASCII slug. Georgian is romanized and accented letters lose their
/// marks. Whitespace, `-` and `_` separate words; other symbols and letters
/// with no ASCII form are dropped.
pub fn slugify(value: &str) -> String {
    let folded = fold_ascii(&transliterate(value));
    let mut slug = String::with_capacity(folded.len());
    let mut pending_separator = false;

    for c in folded.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_separator = true;
        }
    }

    slug
}
