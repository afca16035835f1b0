use super::domain::{Representative, RepresentativeId, TermId, Unit};
use super::query::NamePredicate;

/// Record store abstraction so the resolver and listings can be exercised in isolation.
///
/// Implementations return records in a stable, store-defined order; the resolver
/// takes the first row and never ranks.
pub trait RepresentativeRepository: Send + Sync {
    /// First record satisfying any of `predicates`, or `None`.
    fn first_match(
        &self,
        predicates: &[NamePredicate],
    ) -> Result<Option<Representative>, RepositoryError>;

    /// Every record satisfying any of `predicates`.
    fn filter(&self, predicates: &[NamePredicate]) -> Result<Vec<Representative>, RepositoryError>;

    fn all(&self) -> Result<Vec<Representative>, RepositoryError>;
    fn fetch(&self, id: &RepresentativeId) -> Result<Option<Representative>, RepositoryError>;
    fn fetch_by_slug(&self, slug: &str) -> Result<Option<Representative>, RepositoryError>;
    fn unit_by_short(&self, short: &str) -> Result<Option<Unit>, RepositoryError>;
    fn term_members(&self, term: &TermId) -> Result<Vec<Representative>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists: {0}")]
    Conflict(String),
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
