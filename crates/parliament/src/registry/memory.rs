use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::domain::{
    Cabinet, Faction, Party, Representative, RepresentativeId, Term, TermId, Unit,
};
use super::query::{matches_any, NamePredicate};
use super::repository::{RepositoryError, RepresentativeRepository};

#[derive(Debug, Default)]
struct Tables {
    // insertion order is the store order
    representatives: Vec<Representative>,
    units: Vec<Unit>,
    terms: HashMap<TermId, Term>,
    parties: Vec<Party>,
    factions: Vec<Faction>,
    cabinets: Vec<Cabinet>,
}

/// Record store kept entirely in memory, ordered by insertion.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    tables: RwLock<Tables>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, RepositoryError> {
        self.tables
            .read()
            .map_err(|_| RepositoryError::Unavailable("registry lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, RepositoryError> {
        self.tables
            .write()
            .map_err(|_| RepositoryError::Unavailable("registry lock poisoned".to_string()))
    }

    /// Store a new representative. The slug is recomputed from its name.
    pub fn insert(&self, mut representative: Representative) -> Result<(), RepositoryError> {
        representative.refresh_slug();
        let mut tables = self.write()?;
        if tables
            .representatives
            .iter()
            .any(|existing| existing.id == representative.id)
        {
            return Err(RepositoryError::Conflict(representative.id.to_string()));
        }
        tables.representatives.push(representative);
        Ok(())
    }

    /// Replace a stored representative, keeping its place in the store order.
    pub fn update(&self, mut representative: Representative) -> Result<(), RepositoryError> {
        representative.refresh_slug();
        let mut tables = self.write()?;
        let slot = tables
            .representatives
            .iter_mut()
            .find(|existing| existing.id == representative.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = representative;
        Ok(())
    }

    pub fn insert_term(&self, term: Term) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;
        if tables.terms.contains_key(&term.id) {
            return Err(RepositoryError::Conflict(term.id.0.clone()));
        }
        tables.terms.insert(term.id.clone(), term);
        Ok(())
    }

    pub fn insert_unit(&self, unit: Unit) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;
        if tables.units.iter().any(|existing| existing.short == unit.short) {
            return Err(RepositoryError::Conflict(unit.short));
        }
        tables.units.push(unit);
        Ok(())
    }

    /// Make `term` the unit's active term. The previous active term moves to
    /// the unit's inactive terms.
    pub fn activate_term(&self, short: &str, term: TermId) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;
        let unit = tables
            .units
            .iter_mut()
            .find(|existing| existing.short == short)
            .ok_or(RepositoryError::NotFound)?;
        if unit.active_term.as_ref() == Some(&term) {
            return Ok(());
        }
        if let Some(previous) = unit.active_term.replace(term) {
            if !unit.inactive_terms.contains(&previous) {
                unit.inactive_terms.push(previous);
            }
        }
        Ok(())
    }

    pub fn insert_party(&self, party: Party) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;
        if tables
            .parties
            .iter()
            .any(|existing| existing.acronym == party.acronym)
        {
            return Err(RepositoryError::Conflict(party.acronym));
        }
        tables.parties.push(party);
        Ok(())
    }

    pub fn insert_faction(&self, faction: Faction) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;
        if tables
            .factions
            .iter()
            .any(|existing| existing.short == faction.short)
        {
            return Err(RepositoryError::Conflict(faction.short));
        }
        tables.factions.push(faction);
        Ok(())
    }

    /// Store a cabinet, assigning the next free position when none is set.
    pub fn insert_cabinet(&self, mut cabinet: Cabinet) -> Result<Cabinet, RepositoryError> {
        let mut tables = self.write()?;
        if cabinet.position.is_none() {
            cabinet.position = Some(Cabinet::next_position(&tables.cabinets));
        }
        tables.cabinets.push(cabinet.clone());
        Ok(cabinet)
    }

    pub fn term(&self, id: &TermId) -> Result<Option<Term>, RepositoryError> {
        Ok(self.read()?.terms.get(id).cloned())
    }

    pub fn units(&self) -> Result<Vec<Unit>, RepositoryError> {
        Ok(self.read()?.units.clone())
    }

    pub fn parties(&self) -> Result<Vec<Party>, RepositoryError> {
        Ok(self.read()?.parties.clone())
    }

    pub fn factions(&self) -> Result<Vec<Faction>, RepositoryError> {
        Ok(self.read()?.factions.clone())
    }

    /// Cabinets ordered by position.
    pub fn cabinets(&self) -> Result<Vec<Cabinet>, RepositoryError> {
        let mut cabinets = self.read()?.cabinets.clone();
        cabinets.sort_by_key(|cabinet| cabinet.position);
        Ok(cabinets)
    }

    pub fn len(&self) -> usize {
        self.read()
            .map(|tables| tables.representatives.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RepresentativeRepository for InMemoryRegistry {
    fn first_match(
        &self,
        predicates: &[NamePredicate],
    ) -> Result<Option<Representative>, RepositoryError> {
        let tables = self.read()?;
        Ok(tables
            .representatives
            .iter()
            .find(|representative| matches_any(predicates, &representative.names))
            .cloned())
    }

    fn filter(&self, predicates: &[NamePredicate]) -> Result<Vec<Representative>, RepositoryError> {
        let tables = self.read()?;
        Ok(tables
            .representatives
            .iter()
            .filter(|representative| matches_any(predicates, &representative.names))
            .cloned()
            .collect())
    }

    fn all(&self) -> Result<Vec<Representative>, RepositoryError> {
        Ok(self.read()?.representatives.clone())
    }

    fn fetch(&self, id: &RepresentativeId) -> Result<Option<Representative>, RepositoryError> {
        let tables = self.read()?;
        Ok(tables
            .representatives
            .iter()
            .find(|representative| &representative.id == id)
            .cloned())
    }

    fn fetch_by_slug(&self, slug: &str) -> Result<Option<Representative>, RepositoryError> {
        let tables = self.read()?;
        Ok(tables
            .representatives
            .iter()
            .find(|representative| representative.slug == slug)
            .cloned())
    }

    fn unit_by_short(&self, short: &str) -> Result<Option<Unit>, RepositoryError> {
        let tables = self.read()?;
        Ok(tables.units.iter().find(|unit| unit.short == short).cloned())
    }

    fn term_members(&self, term: &TermId) -> Result<Vec<Representative>, RepositoryError> {
        let tables = self.read()?;
        Ok(tables
            .representatives
            .iter()
            .filter(|representative| representative.serves_in(term))
            .cloned()
            .collect())
    }
}
