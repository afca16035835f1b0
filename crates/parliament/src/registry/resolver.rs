//! Free-text representative lookup.
//!
//! Input is normalized, then a fixed sequence of lookups is tried against the
//! record store until one returns a row:
//!
//! 1. the whole name as a substring of any name field
//! 2. the name transposed according to the caller's order hint, or both
//!    orderings (lastname-first, then firstname-first) without a hint
//! 3. a four character prefix of the name, then of its last token
//!
//! Within a lookup the predicates are alternatives and the store decides which
//! matching row comes first. Nothing is scored.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::Representative;
use super::query::NamePredicate;
use super::repository::{RepositoryError, RepresentativeRepository};
use super::transpose::NameTransposer;

/// Minimum length of a usable name, in characters.
pub const NAME_MINLEN: usize = 4;

/// Which token of the input comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameOrder {
    FirstnameFirst,
    LastnameFirst,
}

impl FromStr for NameOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "firstname" | "firstname-first" | "firstname_first" => Ok(Self::FirstnameFirst),
            "lastname" | "lastname-first" | "lastname_first" => Ok(Self::LastnameFirst),
            other => Err(format!(
                "unknown name order '{other}' (expected firstname or lastname)"
            )),
        }
    }
}

/// A single lookup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameQuery {
    pub name: String,
    pub order: Option<NameOrder>,
}

impl NameQuery {
    pub fn new(name: impl Into<String>, order: Option<NameOrder>) -> Self {
        Self {
            name: name.into(),
            order,
        }
    }

    pub fn normalized(&self) -> String {
        filter_name(&self.name)
    }
}

/// Drops every token containing a parenthesis, so `Giorgi (gia) Giorgadze`
/// becomes `Giorgi Giorgadze`.
pub fn filter_name(name: &str) -> String {
    name.split_whitespace()
        .filter(|token| !token.contains(['(', ')']))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Direct,
    FirstnameFirst,
    LastnameFirst,
    Prefix,
    LastTokenPrefix,
}

impl Strategy {
    pub const fn label(self) -> &'static str {
        match self {
            Strategy::Direct => "direct",
            Strategy::FirstnameFirst => "firstname_first",
            Strategy::LastnameFirst => "lastname_first",
            Strategy::Prefix => "prefix",
            Strategy::LastTokenPrefix => "last_token_prefix",
        }
    }
}

/// One store query in the resolution plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupStep {
    pub strategy: Strategy,
    pub predicates: Vec<NamePredicate>,
}

/// A matched representative together with the lookup that found it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub representative: Representative,
    pub strategy: Strategy,
}

pub struct NameResolver<R, T> {
    repository: Arc<R>,
    transposer: Arc<T>,
}

impl<R, T> NameResolver<R, T>
where
    R: RepresentativeRepository,
    T: NameTransposer,
{
    pub fn new(repository: Arc<R>, transposer: Arc<T>) -> Self {
        Self {
            repository,
            transposer,
        }
    }

    /// Lookups to run for `query`, in order. Empty when the normalized name is too short.
    pub fn plan(&self, query: &NameQuery) -> Vec<LookupStep> {
        let name = query.normalized();
        if name.chars().count() < NAME_MINLEN {
            return Vec::new();
        }

        let mut steps = vec![LookupStep {
            strategy: Strategy::Direct,
            predicates: NamePredicate::contains_any(&name),
        }];

        match query.order {
            Some(NameOrder::LastnameFirst) => {
                steps.push(self.firstname_first_step(&name));
            }
            Some(NameOrder::FirstnameFirst) => {
                steps.push(self.lastname_first_step(&name));
            }
            None => {
                steps.push(self.lastname_first_step(&name));
                steps.push(self.firstname_first_step(&name));
            }
        }

        steps.push(LookupStep {
            strategy: Strategy::Prefix,
            predicates: NamePredicate::starts_with_any(&char_prefix(&name)),
        });

        let tokens: Vec<&str> = name.split_whitespace().collect();
        let last_token = tokens
            .last()
            .filter(|last| tokens.len() > 1 && last.chars().count() >= NAME_MINLEN);
        if let Some(last) = last_token {
            steps.push(LookupStep {
                strategy: Strategy::LastTokenPrefix,
                predicates: NamePredicate::starts_with_any(&char_prefix(last)),
            });
        }

        steps
    }

    fn firstname_first_step(&self, name: &str) -> LookupStep {
        transposed_step(
            Strategy::FirstnameFirst,
            &self.transposer.firstname_first(name),
        )
    }

    fn lastname_first_step(&self, name: &str) -> LookupStep {
        transposed_step(
            Strategy::LastnameFirst,
            &self.transposer.lastname_first(name),
        )
    }

    /// Runs the plan, surfacing store failures.
    pub fn try_find(&self, query: &NameQuery) -> Result<Option<Resolution>, RepositoryError> {
        for step in self.plan(query) {
            if let Some(representative) = self.repository.first_match(&step.predicates)? {
                debug!(
                    strategy = step.strategy.label(),
                    id = %representative.id,
                    "representative resolved"
                );
                return Ok(Some(Resolution {
                    representative,
                    strategy: step.strategy,
                }));
            }
        }

        debug!(name = %query.name, "no representative matched");
        Ok(None)
    }

    /// Best-effort lookup: a store failure is logged and reported as no match.
    pub fn find(&self, name: &str, order: Option<NameOrder>) -> Option<Representative> {
        let query = NameQuery::new(name, order);
        match self.try_find(&query) {
            Ok(resolution) => resolution.map(|found| found.representative),
            Err(error) => {
                warn!(%error, name, "representative lookup failed");
                None
            }
        }
    }
}

fn transposed_step(strategy: Strategy, transposed: &str) -> LookupStep {
    let tokens: Vec<&str> = transposed.split_whitespace().collect();
    let mut predicates = match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => NamePredicate::bounded_any(first, last),
        _ => Vec::new(),
    };
    predicates.extend(NamePredicate::contains_any(transposed));

    LookupStep {
        strategy,
        predicates,
    }
}

fn char_prefix(value: &str) -> String {
    value.chars().take(NAME_MINLEN).collect()
}
