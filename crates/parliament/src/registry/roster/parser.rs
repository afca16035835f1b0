use super::normalizer::clean_name;
use crate::registry::domain::PersonName;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::str::FromStr;

#[derive(Debug)]
pub(crate) struct RosterRecord {
    pub(crate) id: Option<String>,
    pub(crate) names: PersonName,
    pub(crate) party: Option<String>,
    pub(crate) faction: Option<String>,
    pub(crate) unit: Option<String>,
    pub(crate) majoritarian: bool,
    pub(crate) photo: Option<String>,
    pub(crate) main_salary: Option<f64>,
    pub(crate) entrepreneurial_salary: Option<f64>,
    pub(crate) submission_date: Option<NaiveDate>,
    pub(crate) declaration_id: Option<i64>,
    pub(crate) property_assets: String,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<RosterRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<RosterRow>() {
        let row = record?;
        records.push(row.into_record());
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Id", default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(rename = "Name", default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(rename = "Name (ka)", default, deserialize_with = "empty_string_as_none")]
    name_ka: Option<String>,
    #[serde(rename = "Name (en)", default, deserialize_with = "empty_string_as_none")]
    name_en: Option<String>,
    #[serde(rename = "Party", default, deserialize_with = "empty_string_as_none")]
    party: Option<String>,
    #[serde(rename = "Faction", default, deserialize_with = "empty_string_as_none")]
    faction: Option<String>,
    #[serde(rename = "Unit", default, deserialize_with = "empty_string_as_none")]
    unit: Option<String>,
    #[serde(rename = "Majoritarian", default, deserialize_with = "flag")]
    majoritarian: bool,
    #[serde(rename = "Photo", default, deserialize_with = "empty_string_as_none")]
    photo: Option<String>,
    #[serde(rename = "Main Salary", default, deserialize_with = "parsed")]
    main_salary: Option<f64>,
    #[serde(
        rename = "Entrepreneurial Salary",
        default,
        deserialize_with = "parsed"
    )]
    entrepreneurial_salary: Option<f64>,
    #[serde(rename = "Submission Date", default, deserialize_with = "date")]
    submission_date: Option<NaiveDate>,
    #[serde(rename = "Declaration Id", default, deserialize_with = "parsed")]
    declaration_id: Option<i64>,
    #[serde(
        rename = "Property & Assets",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    property_assets: Option<String>,
}

impl RosterRow {
    fn into_record(self) -> RosterRecord {
        let clean = |value: Option<String>| {
            value
                .map(|raw| clean_name(&raw))
                .filter(|cleaned| !cleaned.is_empty())
        };

        RosterRecord {
            id: self.id,
            names: PersonName {
                name: clean(self.name),
                name_ka: clean(self.name_ka),
                name_en: clean(self.name_en),
            },
            party: self.party,
            faction: self.faction,
            unit: self.unit,
            majoritarian: self.majoritarian,
            photo: self.photo,
            main_salary: self.main_salary,
            entrepreneurial_salary: self.entrepreneurial_salary,
            submission_date: self.submission_date,
            declaration_id: self.declaration_id,
            property_assets: self.property_assets.unwrap_or_default(),
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parsed<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    empty_string_as_none(deserializer)?
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|err| serde::de::Error::custom(format!("invalid number '{raw}': {err}")))
        })
        .transpose()
}

fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    empty_string_as_none(deserializer)?
        .map(|raw| parse_date(&raw).map_err(serde::de::Error::custom))
        .transpose()
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = empty_string_as_none(deserializer)?;
    Ok(matches!(
        raw.as_deref().map(|value| value.trim().to_ascii_lowercase()).as_deref(),
        Some("yes" | "y" | "true" | "1" | "x")
    ))
}

pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d.%m.%Y"))
        .map_err(|err| format!("failed to parse '{trimmed}' as YYYY-MM-DD or DD.MM.YYYY ({err})"))
}
