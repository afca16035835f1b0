use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::slug::slugify;

/// Identifier wrapper for representatives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepresentativeId(pub String);

impl std::fmt::Display for RepresentativeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TermId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub String);

/// A term during which representatives are part of a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: TermId,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} - {})", self.name, self.start, self.end)
    }
}

/// A political party sitting in one or more units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub acronym: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

/// Grouping of factions, e.g. majority or minority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cabinet {
    pub name: String,
    pub short: String,
    pub position: Option<i32>,
}

impl Cabinet {
    /// Position a new cabinet takes when stored without one: 0 for the first,
    /// otherwise one past the highest existing position.
    pub fn next_position<'a, I>(existing: I) -> i32
    where
        I: IntoIterator<Item = &'a Cabinet>,
    {
        existing
            .into_iter()
            .filter_map(|cabinet| cabinet.position)
            .max()
            .map_or(0, |last| last + 1)
    }
}

impl std::fmt::Display for Cabinet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faction {
    pub name: String,
    pub short: String,
    #[serde(default)]
    pub cabinet: Option<String>,
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A unit/house, like Parliament or a city assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub short: String,
    #[serde(default)]
    pub parties: Vec<String>,
    pub active_term: Option<TermId>,
    #[serde(default)]
    pub inactive_terms: Vec<TermId>,
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Generic name plus its script-specific variants. Any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub name: Option<String>,
    pub name_ka: Option<String>,
    pub name_en: Option<String>,
}

impl PersonName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_ka(mut self, name_ka: impl Into<String>) -> Self {
        self.name_ka = Some(name_ka.into());
        self
    }

    pub fn with_en(mut self, name_en: impl Into<String>) -> Self {
        self.name_en = Some(name_en.into());
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// Denormalized membership data carried on each representative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliation {
    pub party_acronym: Option<String>,
    pub faction_short: Option<String>,
    pub unit_short: Option<String>,
    #[serde(default)]
    pub committee: String,
}

/// Figures from the most recent asset declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeDisclosure {
    pub salary: Option<f64>,
    pub other_income: Option<f64>,
    pub main_salary: Option<f64>,
    pub entrepreneurial_salary: Option<f64>,
    #[serde(default)]
    pub expenses: String,
    #[serde(default)]
    pub property_assets: String,
    pub declaration_id: Option<i64>,
    pub submission_date: Option<NaiveDate>,
}

/// Income figures as shown on a representative's page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeSummary {
    pub total: i64,
    pub base: i64,
    pub entrepreneurial: f64,
    pub main: f64,
    pub income_year: i32,
    pub latest_submission_year: i32,
    pub declaration_id: i64,
}

/// One family member listed in an asset declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyIncome {
    pub declaration_id: Option<i64>,
    pub submission_date: Option<NaiveDate>,
    pub name: String,
    pub role: String,
    pub gender: String,
    pub date_of_birth: Option<NaiveDate>,
    /// Paid work plus entrepreneurial income, in GEL.
    pub income: i64,
    pub cars: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Url {
    #[serde(default = "Url::default_label")]
    pub label: String,
    pub url: String,
}

impl Url {
    fn default_label() -> String {
        "Homepage".to_string()
    }

    pub fn homepage(url: impl Into<String>) -> Self {
        Self {
            label: Self::default_label(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceGroup {
    VeryLow,
    Low,
    #[default]
    Ordinary,
    High,
    VeryHigh,
}

impl AttendanceGroup {
    pub const fn label(self) -> &'static str {
        match self {
            AttendanceGroup::VeryLow => "very low",
            AttendanceGroup::Low => "low",
            AttendanceGroup::Ordinary => "ordinary",
            AttendanceGroup::High => "high",
            AttendanceGroup::VeryHigh => "very high",
        }
    }
}

/// Voting attendance with pre-calculated totals and percentages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub attended: u32,
    pub percentage_attended: u32,
    pub absent: u32,
    pub percentage_absent: u32,
    pub total: u32,
    pub group: AttendanceGroup,
}

impl Attendance {
    pub fn from_counts(attended: u32, absent: u32, group: AttendanceGroup) -> Self {
        let total = attended + absent;
        let percentage = |part: u32| {
            if total == 0 {
                0
            } else {
                (u64::from(part) * 100 / u64::from(total)) as u32
            }
        };

        Self {
            attended,
            percentage_attended: percentage(attended),
            absent,
            percentage_absent: percentage(absent),
            total,
            group,
        }
    }

    pub fn summary(&self) -> String {
        format!("{}/{}", self.attended, self.total)
    }
}

/// A representative and everything published about them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Representative {
    pub id: RepresentativeId,
    pub names: PersonName,
    pub slug: String,
    pub photo: Option<String>,
    #[serde(default)]
    pub affiliation: Affiliation,
    #[serde(default)]
    pub is_majoritarian: bool,
    #[serde(default)]
    pub electoral_district: String,
    #[serde(default)]
    pub elected: String,
    #[serde(default)]
    pub place_of_birth: String,
    pub family_status: Option<String>,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub contact_address_phone: String,
    /// Percentage of answered questions on the public Q&A site.
    pub answered: Option<f64>,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub terms: Vec<TermId>,
    #[serde(default)]
    pub disclosure: IncomeDisclosure,
    #[serde(default)]
    pub family_income: Vec<FamilyIncome>,
    #[serde(default)]
    pub urls: Vec<Url>,
    #[serde(default)]
    pub additional_information: Vec<String>,
    pub attendance: Option<Attendance>,
}

impl Representative {
    pub fn new(id: RepresentativeId, names: PersonName) -> Self {
        let mut representative = Self {
            id,
            names,
            slug: String::new(),
            photo: None,
            affiliation: Affiliation::default(),
            is_majoritarian: false,
            electoral_district: String::new(),
            elected: String::new(),
            place_of_birth: String::new(),
            family_status: None,
            education: String::new(),
            contact_address_phone: String::new(),
            answered: None,
            gender: Gender::default(),
            terms: Vec::new(),
            disclosure: IncomeDisclosure::default(),
            family_income: Vec::new(),
            urls: Vec::new(),
            additional_information: Vec::new(),
            attendance: None,
        };
        representative.refresh_slug();
        representative
    }

    /// Replace the names and keep the slug in sync with the canonical name.
    pub fn rename(&mut self, names: PersonName) {
        self.names = names;
        self.refresh_slug();
    }

    /// Slugs always follow the canonical name, never a localized variant.
    pub fn refresh_slug(&mut self) {
        self.slug = self.names.name.as_deref().map(slugify).unwrap_or_default();
    }

    pub fn display_name(&self) -> &str {
        self.names.name.as_deref().unwrap_or_default()
    }

    pub fn serves_in(&self, term: &TermId) -> bool {
        self.terms.contains(term)
    }

    pub fn income(&self) -> IncomeSummary {
        let main = self.disclosure.main_salary.unwrap_or(0.0);
        let entrepreneurial = self.disclosure.entrepreneurial_salary.unwrap_or(0.0);
        let submission_year = self
            .disclosure
            .submission_date
            .map_or(0, |date| date.year());

        IncomeSummary {
            total: (main + entrepreneurial) as i64,
            base: 0,
            entrepreneurial,
            main,
            income_year: submission_year,
            latest_submission_year: submission_year,
            declaration_id: self.disclosure.declaration_id.unwrap_or(0),
        }
    }

    pub fn assets_list(&self) -> Option<Vec<String>> {
        if self.disclosure.property_assets.is_empty() {
            return None;
        }
        Some(
            self.disclosure
                .property_assets
                .split(';')
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn family_income_total(&self) -> i64 {
        self.family_income.iter().map(|member| member.income).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn representative(name: &str) -> Representative {
        Representative::new(RepresentativeId("rep-1".to_string()), PersonName::new(name))
    }

    #[test]
    fn slug_follows_canonical_name() {
        let mut rep = representative("Nino Ninidze");
        assert_eq!(rep.slug, "nino-ninidze");

        rep.rename(PersonName::new("Ana Beridze").with_ka("ანა ბერიძე"));
        assert_eq!(rep.slug, "ana-beridze");

        rep.rename(PersonName::default().with_ka("ანა ბერიძე"));
        assert_eq!(rep.slug, "");
    }

    #[test]
    fn income_truncates_total_and_uses_submission_year() {
        let mut rep = representative("Nino Ninidze");
        rep.disclosure.main_salary = Some(1200.75);
        rep.disclosure.entrepreneurial_salary = Some(300.5);
        rep.disclosure.declaration_id = Some(4411);
        rep.disclosure.submission_date = NaiveDate::from_ymd_opt(2012, 11, 3);

        let income = rep.income();
        assert_eq!(income.total, 1501);
        assert_eq!(income.base, 0);
        assert_eq!(income.income_year, 2012);
        assert_eq!(income.latest_submission_year, 2012);
        assert_eq!(income.declaration_id, 4411);
    }

    #[test]
    fn slug_keeps_accented_letters_as_ascii() {
        assert_eq!(representative("Zaal Šengelia").slug, "zaal-sengelia");
        assert_eq!(representative("Élise Müller").slug, "elise-muller");
    }

    #[test]
    fn income_defaults_when_nothing_declared() {
        let income = representative("Nino Ninidze").income();
        assert_eq!(income.total, 0);
        assert_eq!(income.income_year, 0);
        assert_eq!(income.declaration_id, 0);
    }

    #[test]
    fn assets_list_splits_on_semicolons() {
        let mut rep = representative("Nino Ninidze");
        assert_eq!(rep.assets_list(), None);

        rep.disclosure.property_assets = "House, Tbilisi;Car;Land plot".to_string();
        assert_eq!(
            rep.assets_list(),
            Some(vec![
                "House, Tbilisi".to_string(),
                "Car".to_string(),
                "Land plot".to_string()
            ])
        );
    }

    #[test]
    fn family_income_sums_members() {
        let mut rep = representative("Nino Ninidze");
        assert_eq!(rep.family_income_total(), 0);

        for (name, income) in [("Giorgi Ninidze", 24_000), ("Mariam Ninidze", 1_500)] {
            rep.family_income.push(FamilyIncome {
                declaration_id: Some(88123),
                submission_date: None,
                name: name.to_string(),
                role: "spouse".to_string(),
                gender: String::new(),
                date_of_birth: None,
                income,
                cars: String::new(),
            });
        }
        assert_eq!(rep.family_income_total(), 25_500);
    }

    #[test]
    fn cabinet_positions_continue_after_highest() {
        let cabinet = |position| Cabinet {
            name: "Majority".to_string(),
            short: "majority".to_string(),
            position,
        };
        assert_eq!(Cabinet::next_position(&Vec::<Cabinet>::new()), 0);
        assert_eq!(
            Cabinet::next_position(&[cabinet(Some(0)), cabinet(None), cabinet(Some(3))]),
            4
        );
        assert_eq!(Cabinet::next_position(&[cabinet(None)]), 0);
    }

    #[test]
    fn attendance_from_counts_computes_percentages() {
        let attendance = Attendance::from_counts(75, 25, AttendanceGroup::High);
        assert_eq!(attendance.total, 100);
        assert_eq!(attendance.percentage_attended, 75);
        assert_eq!(attendance.percentage_absent, 25);
        assert_eq!(attendance.group.label(), "high");
        assert_eq!(attendance.summary(), "75/100");

        let empty = Attendance::from_counts(0, 0, AttendanceGroup::VeryLow);
        assert_eq!(empty.percentage_attended, 0);
    }

    #[test]
    fn term_display_includes_dates() {
        let term = Term {
            id: TermId("2012".to_string()),
            name: "8th convocation".to_string(),
            start: NaiveDate::from_ymd_opt(2012, 10, 21).expect("valid"),
            end: NaiveDate::from_ymd_opt(2016, 11, 18).expect("valid"),
        };
        assert_eq!(term.to_string(), "8th convocation (2012-10-21 - 2016-11-18)");
    }
}
