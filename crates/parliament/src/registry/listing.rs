//! Roster projections sorted by lastname.
//!
//! The lastname is the last whitespace token of the display name in the
//! requested language, falling back to the generic name. Records without any
//! usable name sort first under an empty key.

use serde::Serialize;

use super::domain::{Representative, RepresentativeId};
use super::locale::Language;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FirstnameFirstEntry {
    pub id: RepresentativeId,
    pub slug: String,
    pub party_acronym: Option<String>,
    pub faction_short: Option<String>,
    pub is_majoritarian: bool,
    pub photo: Option<String>,
    pub name: Option<String>,
    pub localized_name: Option<String>,
    pub firstname_first: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LastnameFirstEntry {
    pub id: RepresentativeId,
    pub slug: String,
    pub name: Option<String>,
    pub localized_name: Option<String>,
    pub lastname_first: String,
}

/// A roster tile: the firstname-first entry with its name broken over two lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberCard {
    #[serde(flatten)]
    pub entry: FirstnameFirstEntry,
    pub display_name: String,
}

fn display_name(representative: &Representative, language: Language) -> Option<&str> {
    language
        .localized_name(&representative.names)
        .or(representative.names.name.as_deref())
}

fn lastname_of(display: Option<&str>) -> String {
    display
        .and_then(|name| name.split_whitespace().last())
        .unwrap_or_default()
        .to_string()
}

pub fn by_lastname_firstname_first(
    representatives: &[Representative],
    language: Language,
) -> Vec<FirstnameFirstEntry> {
    let mut keyed: Vec<(String, FirstnameFirstEntry)> = representatives
        .iter()
        .map(|representative| {
            let display = display_name(representative, language);
            let entry = FirstnameFirstEntry {
                id: representative.id.clone(),
                slug: representative.slug.clone(),
                party_acronym: representative.affiliation.party_acronym.clone(),
                faction_short: representative.affiliation.faction_short.clone(),
                is_majoritarian: representative.is_majoritarian,
                photo: representative.photo.clone(),
                name: representative.names.name.clone(),
                localized_name: language
                    .localized_name(&representative.names)
                    .map(str::to_string),
                firstname_first: display.unwrap_or_default().to_string(),
            };
            (lastname_of(display), entry)
        })
        .collect();

    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, entry)| entry).collect()
}

pub fn by_lastname_lastname_first(
    representatives: &[Representative],
    language: Language,
) -> Vec<LastnameFirstEntry> {
    let mut keyed: Vec<(String, LastnameFirstEntry)> = representatives
        .iter()
        .map(|representative| {
            let mut tokens: Vec<&str> = display_name(representative, language)
                .map(|name| name.split_whitespace().collect())
                .unwrap_or_default();
            let lastname = tokens.pop().unwrap_or_default().to_string();
            let lastname_first = if tokens.is_empty() {
                lastname.clone()
            } else {
                format!("{lastname} {}", tokens.join(" "))
            };

            let entry = LastnameFirstEntry {
                id: representative.id.clone(),
                slug: representative.slug.clone(),
                name: representative.names.name.clone(),
                localized_name: language
                    .localized_name(&representative.names)
                    .map(str::to_string),
                lastname_first,
            };
            (lastname, entry)
        })
        .collect();

    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, entry)| entry).collect()
}

/// `(id, label)` pairs for a selection list, lastname first.
pub fn lastname_first_choices(
    representatives: &[Representative],
    language: Language,
) -> Vec<(RepresentativeId, String)> {
    by_lastname_lastname_first(representatives, language)
        .into_iter()
        .map(|entry| (entry.id, entry.lastname_first))
        .collect()
}

/// Every third entry starting at `row`, for a three-row roster grid.
pub fn row_of_three(entries: &[FirstnameFirstEntry], row: usize) -> Vec<MemberCard> {
    entries
        .iter()
        .skip(row)
        .step_by(3)
        .map(|entry| MemberCard {
            display_name: entry.firstname_first.replacen(' ', "\n", 1),
            entry: entry.clone(),
        })
        .collect()
}
