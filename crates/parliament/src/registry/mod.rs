//! Representatives, their units and terms, and the lookups built on them.

pub mod daily;
pub mod domain;
pub mod listing;
pub mod locale;
pub mod memory;
pub mod query;
pub mod repository;
pub mod resolver;
pub mod roster;
pub mod service;
pub mod slug;
pub mod transpose;

#[cfg(test)]
mod tests;

pub use daily::{DailySelection, RepresentativeOfTheDay};
pub use domain::{
    Affiliation, Attendance, AttendanceGroup, Cabinet, Faction, FamilyIncome, Gender,
    IncomeDisclosure, IncomeSummary, Party, PersonName, Representative, RepresentativeId, Term,
    TermId, Unit, UnitId, Url,
};
pub use listing::{FirstnameFirstEntry, LastnameFirstEntry, MemberCard};
pub use locale::Language;
pub use memory::InMemoryRegistry;
pub use query::{NameField, NamePredicate};
pub use repository::{RepositoryError, RepresentativeRepository};
pub use resolver::{
    filter_name, LookupStep, NameOrder, NameQuery, NameResolver, Resolution, Strategy, NAME_MINLEN,
};
pub use roster::{RosterImportError, RosterImportSummary, RosterImporter};
pub use service::{RegistryService, RegistryServiceError};
pub use transpose::{GeorgianNameOrder, NameTransposer};
