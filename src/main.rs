use chrono::{Datelike, Local, Months, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use parliament::config::{AppConfig, ConfigError};
use parliament::error::AppError;
use parliament::registry::{
    GeorgianNameOrder, InMemoryRegistry, Language, NameOrder, RegistryService, Representative,
    RosterImporter, Term, TermId,
};
use parliament::telemetry;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

type Service = RegistryService<InMemoryRegistry, GeorgianNameOrder>;

#[derive(Parser, Debug)]
#[command(
    name = "parliament",
    about = "Look up representatives and browse the parliament roster",
    version
)]
struct Cli {
    /// Roster CSV export (defaults to APP_ROSTER_PATH)
    #[arg(long, global = true)]
    roster: Option<PathBuf>,
    /// Display language, ka or en (defaults to APP_LANGUAGE)
    #[arg(long, global = true)]
    language: Option<Language>,
    #[command(flatten)]
    term: TermArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct TermArgs {
    /// Name of the term the roster belongs to
    #[arg(long, global = true, default_value = "Current convocation")]
    term_name: String,
    /// Term start date (YYYY-MM-DD, defaults to today)
    #[arg(long, global = true, value_parser = parse_date)]
    term_start: Option<NaiveDate>,
    /// Term end date (YYYY-MM-DD, defaults to four years after the start)
    #[arg(long, global = true, value_parser = parse_date)]
    term_end: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a free-text name to a single representative
    Find(FindArgs),
    /// List representatives sorted by lastname
    Roster(RosterArgs),
    /// Print one row of the three-row parliament grid
    Rows(RowsArgs),
    /// Show the representative of the day
    Today,
    /// Show a representative by slug
    Show {
        slug: String,
    },
}

#[derive(Args, Debug)]
struct FindArgs {
    name: String,
    /// Word order of the given name: firstname or lastname
    #[arg(long)]
    order: Option<NameOrder>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct RosterArgs {
    /// Show names lastname first
    #[arg(long)]
    lastname_first: bool,
    /// Print `id<TAB>label` selection choices
    #[arg(long, conflicts_with = "lastname_first")]
    choices: bool,
    /// Only list active members of this unit
    #[arg(long)]
    unit: Option<String>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct RowsArgs {
    #[arg(long, default_value_t = 0)]
    row: usize,
}

#[derive(Debug, Serialize)]
struct FindResponse<'a> {
    query: &'a str,
    strategy: Option<&'static str>,
    representative: Option<Representative>,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(roster) = cli.roster {
        config.registry.roster_path = Some(roster);
    }
    if let Some(language) = cli.language {
        config.registry.language = language;
    }

    telemetry::init(&config.telemetry)?;

    let roster_path = config
        .registry
        .roster_path
        .clone()
        .ok_or(ConfigError::MissingRoster)?;
    let term = build_term(cli.term);
    let registry = RosterImporter::from_path(&roster_path, term)?;
    info!(?config.environment, roster = %roster_path.display(), "registry loaded");

    let service = RegistryService::new(Arc::new(registry), Arc::new(GeorgianNameOrder))
        .with_parliament_unit(config.registry.parliament_unit.clone());
    let language = config.registry.language;

    match cli.command {
        Command::Find(args) => run_find(&service, args),
        Command::Roster(args) => run_roster(&service, args, language),
        Command::Rows(args) => run_rows(&service, args, language),
        Command::Today => run_today(&service, language),
        Command::Show { slug } => {
            let representative = service.by_slug(&slug)?;
            render_representative(&representative, language);
            Ok(())
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn build_term(args: TermArgs) -> Term {
    let start = args.term_start.unwrap_or_else(|| Local::now().date_naive());
    let end = args
        .term_end
        .or_else(|| start.checked_add_months(Months::new(48)))
        .unwrap_or(start);

    Term {
        id: TermId(format!("{}-{}", start.year(), end.year())),
        name: args.term_name,
        start,
        end,
    }
}

fn run_find(service: &Service, args: FindArgs) -> Result<(), AppError> {
    let resolution = service.resolve(&args.name, args.order)?;

    if args.json {
        let response = FindResponse {
            query: &args.name,
            strategy: resolution.as_ref().map(|found| found.strategy.label()),
            representative: resolution.map(|found| found.representative),
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    match resolution {
        Some(found) => println!(
            "{} ({}) matched by {}",
            found.representative.display_name(),
            found.representative.slug,
            found.strategy.label()
        ),
        None => println!("no representative matches '{}'", args.name),
    }
    Ok(())
}

fn run_roster(service: &Service, args: RosterArgs, language: Language) -> Result<(), AppError> {
    let members = match &args.unit {
        Some(unit) => Some(service.unit_members(unit)?),
        None => None,
    };
    let members = members.as_deref();

    if args.choices {
        let choices = service.lastname_first_choices(members, language)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&choices)?);
        } else {
            for (id, label) in choices {
                println!("{id}\t{label}");
            }
        }
        return Ok(());
    }

    if args.lastname_first {
        let entries = service.by_lastname_lastname_first(members, language)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        } else {
            for entry in entries {
                println!("{} ({})", entry.lastname_first, entry.slug);
            }
        }
        return Ok(());
    }

    let entries = service.by_lastname_firstname_first(members, language)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for entry in entries {
            let party = entry.party_acronym.as_deref().unwrap_or("-");
            println!("{} [{}] ({})", entry.firstname_first, party, entry.slug);
        }
    }
    Ok(())
}

fn run_rows(service: &Service, args: RowsArgs, language: Language) -> Result<(), AppError> {
    for card in service.member_row(args.row, language)? {
        println!("{}", card.display_name);
        println!();
    }
    Ok(())
}

fn run_today(service: &Service, language: Language) -> Result<(), AppError> {
    match service.representative_of_the_day(Utc::now())? {
        Some(representative) => render_representative(&representative, language),
        None => println!("parliament has no sitting members"),
    }
    Ok(())
}

fn render_representative(representative: &Representative, language: Language) {
    let name = language
        .localized_name(&representative.names)
        .unwrap_or_else(|| representative.display_name());
    println!("{name}");
    println!("Slug: {}", representative.slug);

    let affiliation = &representative.affiliation;
    if let Some(party) = &affiliation.party_acronym {
        println!("Party: {party}");
    }
    if let Some(faction) = &affiliation.faction_short {
        println!("Faction: {faction}");
    }
    if representative.is_majoritarian {
        println!("Elected: majoritarian");
    }

    let income = representative.income();
    if income.declaration_id != 0 {
        println!(
            "Declared income {}: {} (main {}, entrepreneurial {}), declaration {}",
            income.income_year, income.total, income.main, income.entrepreneurial,
            income.declaration_id
        );
    }
    if let Some(assets) = representative.assets_list() {
        println!("Property & assets");
        for asset in assets {
            println!("- {}", asset.trim());
        }
    }
    if let Some(attendance) = &representative.attendance {
        println!("Attendance: {}", attendance.summary());
    }
}
