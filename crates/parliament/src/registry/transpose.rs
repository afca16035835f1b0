//! Name order transposition between firstname-first and lastname-first forms.

/// Reorders the tokens of a personal name. Implementations may apply
/// script-specific conventions; the resolver only relies on the two orderings.
pub trait NameTransposer: Send + Sync {
    fn firstname_first(&self, name: &str) -> String;
    fn lastname_first(&self, name: &str) -> String;
}

/// Surname endings that identify a Georgian family name on their own.
const STRONG_SURNAME_SUFFIXES: [&str; 2] = ["ძე", "შვილი"];

/// Endings common in surnames but also found in given names (ნათია, მაია).
const WEAK_SURNAME_SUFFIXES: [&str; 8] = ["ია", "უა", "ავა", "ური", "ული", "ანი", "ელი", "ენი"];

/// Default transposer: suffix-driven surname detection for Georgian script,
/// first/last token swap for everything else.
#[derive(Debug, Default, Clone, Copy)]
pub struct GeorgianNameOrder;

impl NameTransposer for GeorgianNameOrder {
    fn firstname_first(&self, name: &str) -> String {
        let tokens: Vec<&str> = name.split_whitespace().collect();
        match georgian_surname_index(&tokens) {
            Some(index) => move_token(&tokens, index, tokens.len() - 1),
            None => swap_outer(&tokens),
        }
    }

    fn lastname_first(&self, name: &str) -> String {
        let tokens: Vec<&str> = name.split_whitespace().collect();
        match georgian_surname_index(&tokens) {
            Some(index) => move_token(&tokens, index, 0),
            None => swap_outer(&tokens),
        }
    }
}

pub fn is_georgian_char(c: char) -> bool {
    matches!(c, '\u{10A0}'..='\u{10FF}' | '\u{1C90}'..='\u{1CBF}')
}

pub fn is_georgian(text: &str) -> bool {
    text.chars().any(is_georgian_char)
}

fn georgian_surname_index(tokens: &[&str]) -> Option<usize> {
    if tokens.len() < 2 || !tokens.iter().any(|token| is_georgian(token)) {
        return None;
    }

    let strong: Vec<usize> = suffix_matches(tokens, &STRONG_SURNAME_SUFFIXES);
    if strong.len() == 1 {
        return strong.first().copied();
    }
    if strong.len() > 1 {
        return None;
    }

    let weak = suffix_matches(tokens, &WEAK_SURNAME_SUFFIXES);
    if weak.len() == 1 {
        weak.first().copied()
    } else {
        None
    }
}

fn suffix_matches(tokens: &[&str], suffixes: &[&str]) -> Vec<usize> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| {
            suffixes
                .iter()
                .any(|suffix| token.ends_with(suffix) && token.len() > suffix.len())
        })
        .map(|(index, _)| index)
        .collect()
}

fn move_token(tokens: &[&str], from: usize, to: usize) -> String {
    let mut reordered = tokens.to_vec();
    let token = reordered.remove(from);
    reordered.insert(to, token);
    reordered.join(" ")
}

fn swap_outer(tokens: &[&str]) -> String {
    let mut swapped = tokens.to_vec();
    if swapped.len() > 1 {
        let last = swapped.len() - 1;
        swapped.swap(0, last);
    }
    swapped.join(" ")
}
