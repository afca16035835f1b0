use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::daily::RepresentativeOfTheDay;
use super::domain::{Representative, RepresentativeId};
use super::listing::{
    by_lastname_firstname_first, by_lastname_lastname_first, lastname_first_choices, row_of_three,
    FirstnameFirstEntry, LastnameFirstEntry, MemberCard,
};
use super::locale::Language;
use super::repository::{RepositoryError, RepresentativeRepository};
use super::resolver::{NameOrder, NameQuery, NameResolver, Resolution};
use super::transpose::NameTransposer;

pub const DEFAULT_PARLIAMENT_UNIT: &str = "parliament";

/// Service composing the record store, name resolver, roster listings and the
/// daily pick.
pub struct RegistryService<R, T> {
    repository: Arc<R>,
    resolver: NameResolver<R, T>,
    daily: RepresentativeOfTheDay,
    parliament_unit: String,
}

impl<R, T> RegistryService<R, T>
where
    R: RepresentativeRepository + 'static,
    T: NameTransposer + 'static,
{
    pub fn new(repository: Arc<R>, transposer: Arc<T>) -> Self {
        let resolver = NameResolver::new(repository.clone(), transposer);
        Self {
            repository,
            resolver,
            daily: RepresentativeOfTheDay::new(),
            parliament_unit: DEFAULT_PARLIAMENT_UNIT.to_string(),
        }
    }

    pub fn with_parliament_unit(mut self, short: impl Into<String>) -> Self {
        self.parliament_unit = short.into();
        self
    }

    pub fn resolver(&self) -> &NameResolver<R, T> {
        &self.resolver
    }

    /// Best matching representative for a free-text name, or `None`.
    pub fn find(&self, name: &str, order: Option<NameOrder>) -> Option<Representative> {
        self.resolver.find(name, order)
    }

    /// Like [`find`](Self::find) but reports the winning lookup and store failures.
    pub fn resolve(
        &self,
        name: &str,
        order: Option<NameOrder>,
    ) -> Result<Option<Resolution>, RegistryServiceError> {
        Ok(self.resolver.try_find(&NameQuery::new(name, order))?)
    }

    pub fn by_slug(&self, slug: &str) -> Result<Representative, RegistryServiceError> {
        self.repository
            .fetch_by_slug(slug)?
            .ok_or_else(|| RegistryServiceError::UnknownSlug(slug.to_string()))
    }

    fn collection(
        &self,
        representatives: Option<&[Representative]>,
    ) -> Result<Vec<Representative>, RegistryServiceError> {
        match representatives {
            Some(given) => Ok(given.to_vec()),
            None => Ok(self.repository.all()?),
        }
    }

    /// Sorted by lastname, shown firstname first. Uses every record when `representatives` is `None`.
    pub fn by_lastname_firstname_first(
        &self,
        representatives: Option<&[Representative]>,
        language: Language,
    ) -> Result<Vec<FirstnameFirstEntry>, RegistryServiceError> {
        let representatives = self.collection(representatives)?;
        Ok(by_lastname_firstname_first(&representatives, language))
    }

    /// Sorted by lastname, shown lastname first. Uses every record when `representatives` is `None`.
    pub fn by_lastname_lastname_first(
        &self,
        representatives: Option<&[Representative]>,
        language: Language,
    ) -> Result<Vec<LastnameFirstEntry>, RegistryServiceError> {
        let representatives = self.collection(representatives)?;
        Ok(by_lastname_lastname_first(&representatives, language))
    }

    pub fn lastname_first_choices(
        &self,
        representatives: Option<&[Representative]>,
        language: Language,
    ) -> Result<Vec<(RepresentativeId, String)>, RegistryServiceError> {
        let representatives = self.collection(representatives)?;
        Ok(lastname_first_choices(&representatives, language))
    }

    /// Representatives serving in the unit's active term. Unknown units and
    /// units without an active term have no members.
    pub fn unit_members(&self, short: &str) -> Result<Vec<Representative>, RegistryServiceError> {
        let Some(unit) = self.repository.unit_by_short(short)? else {
            debug!(unit = short, "unknown unit");
            return Ok(Vec::new());
        };
        match unit.active_term {
            Some(term) => Ok(self.repository.term_members(&term)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn parliament_members(&self) -> Result<Vec<Representative>, RegistryServiceError> {
        self.unit_members(&self.parliament_unit)
    }

    /// One row of the three-row parliament grid.
    pub fn member_row(
        &self,
        row: usize,
        language: Language,
    ) -> Result<Vec<MemberCard>, RegistryServiceError> {
        let members = self.parliament_members()?;
        let sorted = by_lastname_firstname_first(&members, language);
        Ok(row_of_three(&sorted, row))
    }

    pub fn representative_of_the_day(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Option<Representative>, RegistryServiceError> {
        let candidates = self.parliament_members()?;
        match self.daily.get(now, &candidates) {
            Some(id) => Ok(self.repository.fetch(&id)?),
            None => Ok(None),
        }
    }
}

/// Error raised by the registry service.
#[derive(Debug, thiserror::Error)]
pub enum RegistryServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("no representative with slug '{0}'")]
    UnknownSlug(String),
}
