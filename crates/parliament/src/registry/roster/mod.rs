//! CSV roster import into an [`InMemoryRegistry`].
//!
//! Each row becomes a representative serving in the supplied term. Units,
//! parties and factions are created from the distinct values found in the
//! `Unit`, `Party` and `Faction` columns; every imported unit takes the term
//! as its active term.
//!
//! Rows whose id is already stored are returning members: their roster fields
//! are refreshed and the term is added to the terms they served. Ids generated
//! for rows without an `Id` are prefixed with the term id. The roster is
//! validated in full before anything is written.

mod normalizer;
mod parser;

use crate::registry::domain::{
    Affiliation, Faction, IncomeDisclosure, Party, Representative, RepresentativeId, Term, Unit,
    UnitId,
};
use crate::registry::memory::InMemoryRegistry;
use crate::registry::repository::{RepositoryError, RepresentativeRepository};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

use parser::RosterRecord;

pub use parser::parse_date;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingName { row: usize },
    Registry(RepositoryError),
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::MissingName { row } => {
                write!(f, "roster row {} has no name", row)
            }
            RosterImportError::Registry(err) => {
                write!(f, "could not store roster records: {}", err)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::MissingName { .. } => None,
            RosterImportError::Registry(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<RepositoryError> for RosterImportError {
    fn from(err: RepositoryError) -> Self {
        Self::Registry(err)
    }
}

/// Counts of what an import added to the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RosterImportSummary {
    pub representatives: usize,
    pub units: usize,
    pub parties: usize,
    pub factions: usize,
    /// Rows matching a representative already in the registry.
    pub returning: usize,
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        term: Term,
    ) -> Result<InMemoryRegistry, RosterImportError> {
        let file = File::open(path)?;
        Self::from_reader(file, term)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        term: Term,
    ) -> Result<InMemoryRegistry, RosterImportError> {
        let registry = InMemoryRegistry::new();
        Self::import_into(&registry, reader, term)?;
        Ok(registry)
    }

    pub fn import_into<R: Read>(
        registry: &InMemoryRegistry,
        reader: R,
        term: Term,
    ) -> Result<RosterImportSummary, RosterImportError> {
        let records = parser::parse_records(reader)?;
        let mut summary = RosterImportSummary::default();

        let mut unit_parties: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut parties: Vec<String> = Vec::new();
        let mut factions: Vec<String> = Vec::new();
        let mut representatives: Vec<Representative> = Vec::with_capacity(records.len());

        // Validate the whole roster before the registry is touched.
        for (index, record) in records.into_iter().enumerate() {
            // header is line 1
            let row = index + 2;
            if let Some(unit) = &record.unit {
                let members = unit_parties.entry(unit.clone()).or_default();
                if let Some(party) = &record.party {
                    if !members.contains(party) {
                        members.push(party.clone());
                    }
                }
            }
            if let Some(party) = &record.party {
                if !parties.contains(party) {
                    parties.push(party.clone());
                }
            }
            if let Some(faction) = &record.faction {
                if !factions.contains(faction) {
                    factions.push(faction.clone());
                }
            }

            let representative = build_representative(record, row, &term)?;
            if representatives
                .iter()
                .any(|existing| existing.id == representative.id)
            {
                return Err(RepositoryError::Conflict(representative.id.to_string()).into());
            }
            representatives.push(representative);
        }

        if registry.term(&term.id)?.is_none() {
            registry.insert_term(term.clone())?;
        }

        for representative in representatives {
            match registry.fetch(&representative.id)? {
                Some(existing) => {
                    registry.update(reelect(existing, representative, &term))?;
                    summary.returning += 1;
                }
                None => registry.insert(representative)?,
            }
            summary.representatives += 1;
        }

        let known_parties = registry.parties()?;
        for acronym in parties {
            if known_parties.iter().any(|party| party.acronym == acronym) {
                continue;
            }
            registry.insert_party(Party {
                name: acronym.clone(),
                acronym,
                url: None,
                logo: None,
            })?;
            summary.parties += 1;
        }

        let known_factions = registry.factions()?;
        for short in factions {
            if known_factions.iter().any(|faction| faction.short == short) {
                continue;
            }
            registry.insert_faction(Faction {
                name: short.clone(),
                short,
                cabinet: None,
            })?;
            summary.factions += 1;
        }

        let known_units = registry.units()?;
        for (short, parties) in unit_parties {
            if known_units.iter().any(|unit| unit.short == short) {
                registry.activate_term(&short, term.id.clone())?;
                continue;
            }
            registry.insert_unit(Unit {
                id: UnitId(short.clone()),
                name: short.clone(),
                short,
                parties,
                active_term: Some(term.id.clone()),
                inactive_terms: Vec::new(),
            })?;
            summary.units += 1;
        }

        info!(
            representatives = summary.representatives,
            units = summary.units,
            parties = summary.parties,
            factions = summary.factions,
            returning = summary.returning,
            term = %term,
            "roster imported"
        );

        Ok(summary)
    }
}

fn build_representative(
    record: RosterRecord,
    row: usize,
    term: &Term,
) -> Result<Representative, RosterImportError> {
    if record.names.name.is_none() {
        return Err(RosterImportError::MissingName { row });
    }

    let id = record
        .id
        .map(RepresentativeId)
        .unwrap_or_else(|| RepresentativeId(format!("{}-rep-{:04}", term.id.0, row - 1)));

    let mut representative = Representative::new(id, record.names);
    representative.photo = record.photo;
    representative.is_majoritarian = record.majoritarian;
    representative.affiliation = Affiliation {
        party_acronym: record.party,
        faction_short: record.faction,
        unit_short: record.unit,
        committee: String::new(),
    };
    representative.disclosure = IncomeDisclosure {
        main_salary: record.main_salary,
        entrepreneurial_salary: record.entrepreneurial_salary,
        submission_date: record.submission_date,
        declaration_id: record.declaration_id,
        property_assets: record.property_assets,
        ..IncomeDisclosure::default()
    };
    representative.terms = vec![term.id.clone()];

    Ok(representative)
}

/// Refreshes a stored representative from a later roster row and adds the
/// new term. Fields the roster does not carry are kept.
fn reelect(mut existing: Representative, row: Representative, term: &Term) -> Representative {
    existing.names = row.names;
    existing.photo = row.photo.or(existing.photo);
    existing.is_majoritarian = row.is_majoritarian;
    existing.affiliation = Affiliation {
        committee: existing.affiliation.committee,
        ..row.affiliation
    };
    existing.disclosure = row.disclosure;
    if !existing.terms.contains(&term.id) {
        existing.terms.push(term.id.clone());
    }
    existing
}
