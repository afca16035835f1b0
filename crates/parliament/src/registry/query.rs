//! Discrete name predicates understood by every record store.

use serde::Serialize;

use super::domain::PersonName;

/// Name columns that take part in lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameField {
    Name,
    NameKa,
    NameEn,
}

impl NameField {
    pub const ALL: [NameField; 3] = [NameField::Name, NameField::NameKa, NameField::NameEn];

    pub fn value(self, names: &PersonName) -> Option<&str> {
        match self {
            NameField::Name => names.name.as_deref(),
            NameField::NameKa => names.name_ka.as_deref(),
            NameField::NameEn => names.name_en.as_deref(),
        }
    }
}

/// A single filter on one name field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NamePredicate {
    /// Case-insensitive substring match.
    Contains { field: NameField, needle: String },
    /// Case-sensitive: the field starts with `prefix` and ends with `suffix`.
    StartsAndEndsWith {
        field: NameField,
        prefix: String,
        suffix: String,
    },
    /// Case-insensitive prefix match.
    StartsWith { field: NameField, prefix: String },
}

impl NamePredicate {
    pub fn field(&self) -> NameField {
        match self {
            NamePredicate::Contains { field, .. }
            | NamePredicate::StartsAndEndsWith { field, .. }
            | NamePredicate::StartsWith { field, .. } => *field,
        }
    }

    pub fn matches(&self, names: &PersonName) -> bool {
        let Some(value) = self.field().value(names) else {
            return false;
        };

        match self {
            NamePredicate::Contains { needle, .. } => {
                value.to_lowercase().contains(&needle.to_lowercase())
            }
            NamePredicate::StartsAndEndsWith { prefix, suffix, .. } => {
                value.starts_with(prefix.as_str()) && value.ends_with(suffix.as_str())
            }
            NamePredicate::StartsWith { prefix, .. } => {
                value.to_lowercase().starts_with(&prefix.to_lowercase())
            }
        }
    }

    /// The same predicate applied to every name field, in column order.
    pub fn contains_any(needle: &str) -> Vec<NamePredicate> {
        NameField::ALL
            .iter()
            .map(|&field| NamePredicate::Contains {
                field,
                needle: needle.to_string(),
            })
            .collect()
    }

    pub fn starts_with_any(prefix: &str) -> Vec<NamePredicate> {
        NameField::ALL
            .iter()
            .map(|&field| NamePredicate::StartsWith {
                field,
                prefix: prefix.to_string(),
            })
            .collect()
    }

    pub fn bounded_any(prefix: &str, suffix: &str) -> Vec<NamePredicate> {
        NameField::ALL
            .iter()
            .map(|&field| NamePredicate::StartsAndEndsWith {
                field,
                prefix: prefix.to_string(),
                suffix: suffix.to_string(),
            })
            .collect()
    }
}

/// True when any predicate accepts the name: predicates in one lookup are alternatives.
pub fn matches_any(predicates: &[NamePredicate], names: &PersonName) -> bool {
    predicates.iter().any(|predicate| predicate.matches(names))
}
