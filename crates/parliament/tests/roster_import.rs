use std::io::Write;
use std::sync::Arc;

use chrono::NaiveDate;
use parliament::registry::{
    GeorgianNameOrder, InMemoryRegistry, Language, RegistryService, RepresentativeId,
    RepresentativeRepository, RosterImportError, RosterImporter, Term, TermId,
};

fn term(id: &str, start_year: i32) -> Term {
    Term {
        id: TermId(id.to_string()),
        name: format!("Convocation {id}"),
        start: NaiveDate::from_ymd_opt(start_year, 12, 11).expect("valid start"),
        end: NaiveDate::from_ymd_opt(start_year + 4, 11, 25).expect("valid end"),
    }
}

fn fixture() -> &'static [u8] {
    include_bytes!("fixtures/parliament_roster.csv")
}

#[test]
fn fixture_roster_imports_people_and_organisations() {
    let registry = InMemoryRegistry::new();
    let summary = RosterImporter::import_into(&registry, fixture(), term("2020", 2020))
        .expect("roster imports");

    assert_eq!(summary.representatives, 5);
    assert_eq!(summary.units, 1);
    assert_eq!(summary.parties, 3);
    assert_eq!(summary.factions, 4);

    let nino = registry
        .fetch(&RepresentativeId("mp-001".to_string()))
        .expect("fetch")
        .expect("present");
    assert_eq!(nino.slug, "nino-ninidze");
    assert!(nino.is_majoritarian);
    assert_eq!(nino.affiliation.party_acronym.as_deref(), Some("GD"));
    assert_eq!(
        nino.assets_list(),
        Some(vec![
            "Apartment in Tbilisi".to_string(),
            "Toyota Prius".to_string()
        ])
    );

    let income = nino.income();
    assert_eq!(income.total, 53200);
    assert_eq!(income.income_year, 2023);
    assert_eq!(income.declaration_id, 88123);

    let giorgi = registry
        .fetch(&RepresentativeId("mp-002".to_string()))
        .expect("fetch")
        .expect("present");
    assert_eq!(
        giorgi.disclosure.submission_date,
        NaiveDate::from_ymd_opt(2023, 4, 1)
    );

    let levan = registry
        .fetch(&RepresentativeId("mp-004".to_string()))
        .expect("fetch")
        .expect("present");
    assert_eq!(levan.names.name.as_deref(), Some("Levan Gogichaishvili"));
    assert_eq!(levan.names.name_en, None);
}

#[test]
fn reimport_of_a_unit_rolls_its_active_term() {
    let registry = Arc::new(InMemoryRegistry::new());
    let older = "Id,Name,Unit\nold-1,Davit Darchiashvili,parliament\n";
    RosterImporter::import_into(&registry, older.as_bytes(), term("2016", 2016))
        .expect("older roster imports");
    let summary = RosterImporter::import_into(&registry, fixture(), term("2020", 2020))
        .expect("current roster imports");
    assert_eq!(summary.units, 0);

    let parliament = registry
        .unit_by_short("parliament")
        .expect("lookup")
        .expect("unit present");
    assert_eq!(parliament.active_term, Some(TermId("2020".to_string())));
    assert_eq!(parliament.inactive_terms, vec![TermId("2016".to_string())]);

    let service = RegistryService::new(registry, Arc::new(GeorgianNameOrder));
    let members = service.parliament_members().expect("members");
    assert_eq!(members.len(), 5);
    assert!(members.iter().all(|member| member.id.0.starts_with("mp-")));

    let choices = service
        .lastname_first_choices(None, Language::English)
        .expect("choices");
    assert_eq!(choices.len(), 6);
    assert_eq!(choices[0].1, "Beselia Eka");
}

#[test]
fn separate_units_keep_separate_members() {
    let registry = Arc::new(InMemoryRegistry::new());
    RosterImporter::import_into(&registry, fixture(), term("2020", 2020))
        .expect("parliament imports");
    let ajara = "Id,Name,Unit\naj-1,Nana Kakabadze,ajara\n";
    RosterImporter::import_into(&registry, ajara.as_bytes(), term("ajara-2020", 2020))
        .expect("ajara imports");

    let service = RegistryService::new(registry, Arc::new(GeorgianNameOrder));
    assert_eq!(service.parliament_members().expect("members").len(), 5);
    let ajara_members = service.unit_members("ajara").expect("members");
    assert_eq!(ajara_members.len(), 1);
    assert_eq!(ajara_members[0].id.0, "aj-1");
}

#[test]
fn roster_can_be_read_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(fixture()).expect("write roster");

    let registry =
        RosterImporter::from_path(file.path(), term("2020", 2020)).expect("roster imports");
    assert_eq!(registry.len(), 5);
}

#[test]
fn rows_without_names_are_rejected_with_their_line() {
    let csv = "Id,Name\nmp-1,Nino Ninidze\nmp-2,\u{200b}\n";
    let error = RosterImporter::from_reader(csv.as_bytes(), term("2020", 2020))
        .expect_err("blank name rejected");
    assert!(matches!(error, RosterImportError::MissingName { row: 3 }));
    assert_eq!(error.to_string(), "roster row 3 has no name");
}

#[test]
fn rosters_without_ids_share_one_registry() {
    let registry = Arc::new(InMemoryRegistry::new());
    RosterImporter::import_into(
        &registry,
        "Name,Unit\nNino Ninidze,parliament\n".as_bytes(),
        term("2020", 2020),
    )
    .expect("parliament imports");
    RosterImporter::import_into(
        &registry,
        "Name,Unit\nNana Kakabadze,ajara\n".as_bytes(),
        term("ajara-2020", 2020),
    )
    .expect("ajara imports");

    let ids: Vec<String> = registry
        .all()
        .expect("list")
        .into_iter()
        .map(|representative| representative.id.0)
        .collect();
    assert_eq!(ids, vec!["2020-rep-0001", "ajara-2020-rep-0001"]);

    let service = RegistryService::new(registry, Arc::new(GeorgianNameOrder));
    assert_eq!(service.unit_members("ajara").expect("members").len(), 1);
    assert_eq!(service.parliament_members().expect("members").len(), 1);
}

#[test]
fn reelected_members_join_the_new_term() {
    let registry = Arc::new(InMemoryRegistry::new());
    RosterImporter::import_into(
        &registry,
        "Id,Name,Unit,Party\nmp-1,Nino Ninidze,parliament,UNM\n".as_bytes(),
        term("2016", 2016),
    )
    .expect("2016 roster imports");
    let summary = RosterImporter::import_into(
        &registry,
        "Id,Name,Unit,Party\nmp-1,Nino Ninidze,parliament,GD\nmp-2,Ana Beridze,parliament,GD\n"
            .as_bytes(),
        term("2020", 2020),
    )
    .expect("2020 roster imports");

    assert_eq!(summary.representatives, 2);
    assert_eq!(summary.returning, 1);
    assert_eq!(registry.len(), 2);

    let parliament = registry
        .unit_by_short("parliament")
        .expect("lookup")
        .expect("unit present");
    assert_eq!(parliament.active_term, Some(TermId("2020".to_string())));
    assert_eq!(parliament.inactive_terms, vec![TermId("2016".to_string())]);

    let nino = registry
        .fetch(&RepresentativeId("mp-1".to_string()))
        .expect("fetch")
        .expect("present");
    assert_eq!(
        nino.terms,
        vec![TermId("2016".to_string()), TermId("2020".to_string())]
    );
    assert_eq!(nino.affiliation.party_acronym.as_deref(), Some("GD"));

    let service = RegistryService::new(registry, Arc::new(GeorgianNameOrder));
    let members: Vec<String> = service
        .parliament_members()
        .expect("members")
        .into_iter()
        .map(|member| member.id.0)
        .collect();
    assert_eq!(members, vec!["mp-1", "mp-2"]);
}

#[test]
fn rejected_rosters_write_nothing() {
    let registry = InMemoryRegistry::new();
    let csv = "Id,Name,Unit\nmp-1,Nino Ninidze,parliament\nmp-2,,parliament\n";

    RosterImporter::import_into(&registry, csv.as_bytes(), term("2020", 2020))
        .expect_err("blank name rejected");

    assert_eq!(registry.len(), 0);
    assert!(registry.units().expect("units").is_empty());
    assert!(registry.term(&TermId("2020".to_string())).expect("term").is_none());
}
