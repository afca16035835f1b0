use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::registry::domain::{
    PersonName, Representative, RepresentativeId, Term, TermId, Unit, UnitId,
};
use crate::registry::memory::InMemoryRegistry;
use crate::registry::query::NamePredicate;
use crate::registry::repository::{RepositoryError, RepresentativeRepository};
use crate::registry::resolver::NameResolver;
use crate::registry::transpose::GeorgianNameOrder;

pub(super) fn representative(id: &str, names: PersonName) -> Representative {
    Representative::new(RepresentativeId(id.to_string()), names)
}

pub(super) fn named(id: &str, name: &str) -> Representative {
    representative(id, PersonName::new(name))
}

pub(super) fn nino() -> Representative {
    representative(
        "rep-nino",
        PersonName::new("Nino Ninidze")
            .with_ka("ნინო ნინიძე")
            .with_en("Nino Ninidze"),
    )
}

pub(super) fn registry_with(representatives: Vec<Representative>) -> Arc<InMemoryRegistry> {
    let registry = InMemoryRegistry::new();
    for representative in representatives {
        registry.insert(representative).expect("unique ids");
    }
    Arc::new(registry)
}

pub(super) fn resolver_for<R>(repository: Arc<R>) -> NameResolver<R, GeorgianNameOrder>
where
    R: RepresentativeRepository,
{
    NameResolver::new(repository, Arc::new(GeorgianNameOrder))
}

pub(super) fn term(id: &str, start_year: i32) -> Term {
    Term {
        id: TermId(id.to_string()),
        name: format!("Convocation {id}"),
        start: NaiveDate::from_ymd_opt(start_year, 10, 1).expect("valid"),
        end: NaiveDate::from_ymd_opt(start_year + 4, 10, 1).expect("valid"),
    }
}

pub(super) fn unit(short: &str, active_term: Option<&str>) -> Unit {
    Unit {
        id: UnitId(short.to_string()),
        name: short.to_string(),
        short: short.to_string(),
        parties: Vec::new(),
        active_term: active_term.map(|id| TermId(id.to_string())),
        inactive_terms: Vec::new(),
    }
}

pub(super) fn serving(mut representative: Representative, term_id: &str) -> Representative {
    representative.terms.push(TermId(term_id.to_string()));
    representative
}

/// Parliament (active term "2020") with three sitting members, a former member
/// and a city assembly member.
pub(super) fn parliament_registry() -> Arc<InMemoryRegistry> {
    let registry = registry_with(vec![
        serving(named("rep-1", "Ana Maria Beridze"), "2020"),
        serving(named("rep-2", "Zura Abashidze"), "2020"),
        serving(named("rep-3", "Levan Chikovani"), "2020"),
        serving(named("rep-4", "Davit Darchiashvili"), "2016"),
        serving(named("rep-5", "Mamuka Tsereteli"), "tbilisi-2021"),
    ]);
    registry.insert_term(term("2016", 2016)).expect("term");
    registry.insert_term(term("2020", 2020)).expect("term");
    registry
        .insert_unit(unit("parliament", Some("2020")))
        .expect("unit");
    registry.insert_unit(unit("ajara", None)).expect("unit");
    registry
}

/// Store wrapper that records every query it receives.
#[derive(Default)]
pub(super) struct RecordingRepository {
    pub(super) inner: InMemoryRegistry,
    pub(super) queries: Mutex<Vec<Vec<NamePredicate>>>,
}

impl RecordingRepository {
    pub(super) fn queries(&self) -> Vec<Vec<NamePredicate>> {
        self.queries.lock().expect("queries mutex poisoned").clone()
    }
}

impl RepresentativeRepository for RecordingRepository {
    fn first_match(
        &self,
        predicates: &[NamePredicate],
    ) -> Result<Option<Representative>, RepositoryError> {
        self.queries
            .lock()
            .expect("queries mutex poisoned")
            .push(predicates.to_vec());
        self.inner.first_match(predicates)
    }

    fn filter(&self, predicates: &[NamePredicate]) -> Result<Vec<Representative>, RepositoryError> {
        self.inner.filter(predicates)
    }

    fn all(&self) -> Result<Vec<Representative>, RepositoryError> {
        self.inner.all()
    }

    fn fetch(&self, id: &RepresentativeId) -> Result<Option<Representative>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn fetch_by_slug(&self, slug: &str) -> Result<Option<Representative>, RepositoryError> {
        self.inner.fetch_by_slug(slug)
    }

    fn unit_by_short(&self, short: &str) -> Result<Option<Unit>, RepositoryError> {
        self.inner.unit_by_short(short)
    }

    fn term_members(&self, term: &TermId) -> Result<Vec<Representative>, RepositoryError> {
        self.inner.term_members(term)
    }
}

pub(super) struct UnavailableRepository;

impl UnavailableRepository {
    fn error() -> RepositoryError {
        RepositoryError::Unavailable("database offline".to_string())
    }
}

impl RepresentativeRepository for UnavailableRepository {
    fn first_match(
        &self,
        _predicates: &[NamePredicate],
    ) -> Result<Option<Representative>, RepositoryError> {
        Err(Self::error())
    }

    fn filter(
        &self,
        _predicates: &[NamePredicate],
    ) -> Result<Vec<Representative>, RepositoryError> {
        Err(Self::error())
    }

    fn all(&self) -> Result<Vec<Representative>, RepositoryError> {
        Err(Self::error())
    }

    fn fetch(&self, _id: &RepresentativeId) -> Result<Option<Representative>, RepositoryError> {
        Err(Self::error())
    }

    fn fetch_by_slug(&self, _slug: &str) -> Result<Option<Representative>, RepositoryError> {
        Err(Self::error())
    }

    fn unit_by_short(&self, _short: &str) -> Result<Option<Unit>, RepositoryError> {
        Err(Self::error())
    }

    fn term_members(&self, _term: &TermId) -> Result<Vec<Representative>, RepositoryError> {
        Err(Self::error())
    }
}
