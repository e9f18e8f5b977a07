use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::parse_range;
use crate::models::NewUniversity;
use crate::services::postgres::{PostgresClient, PostgresError};

/// Ratings the `universities` table accepts
const RATING_SCALE: std::ops::RangeInclusive<i32> = 1..=5;

/// Errors that can occur while loading the university catalog
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Postgres(#[from] PostgresError),
}

/// Outcome of parsing a catalog file
#[derive(Debug, Default)]
pub struct ParsedCatalog {
    pub universities: Vec<NewUniversity>,
    /// Rows dropped for a missing or duplicate name, or malformed content
    pub skipped: usize,
}

/// Outcome of a catalog load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub inserted: u64,
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
struct UniversityRow {
    #[serde(rename = "university_name", default)]
    name: Option<String>,
    #[serde(default)]
    geopolitical_region: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    specialty: Option<String>,
    #[serde(default)]
    ownership: Option<String>,
    #[serde(rename = "type", default)]
    university_type: Option<String>,
    #[serde(default)]
    academic_rigor: Option<String>,
    #[serde(default)]
    sports_facilities: Option<String>,
    #[serde(default)]
    hostel_quality: Option<String>,
    #[serde(rename = "Social Life", default)]
    social_life: Option<String>,
    #[serde(rename = "tuition_fees_category", default)]
    tuition: Option<String>,
    #[serde(rename = "cost_of_living_category", default)]
    cost_of_living: Option<String>,
    #[serde(rename = "source_urls__001", default)]
    source_url_1: Option<String>,
    #[serde(rename = "source_urls__002", default)]
    source_url_2: Option<String>,
}

impl UniversityRow {
    fn into_new_university(self, name: String) -> NewUniversity {
        let rating = |field: &str, value: Option<String>| parse_rating(&name, field, value);

        NewUniversity {
            academic_rigor: rating("academic_rigor", self.academic_rigor),
            sports_facilities: rating("sports_facilities", self.sports_facilities),
            hostel_quality: rating("hostel_quality", self.hostel_quality),
            social_life: rating("social_life", self.social_life),
            tuition: parse_range(self.tuition.as_deref()),
            cost_of_living: parse_range(self.cost_of_living.as_deref()),
            geopolitical_region: text_or_empty(self.geopolitical_region),
            state: text_or_empty(self.state),
            specialty: text_or_empty(self.specialty),
            ownership: text_or_empty(self.ownership),
            university_type: non_empty(self.university_type),
            tuition_display: non_empty(self.tuition),
            cost_of_living_display: non_empty(self.cost_of_living),
            source_url_1: non_empty(self.source_url_1),
            source_url_2: non_empty(self.source_url_2),
            name,
        }
    }
}

/// Parse catalog CSV rows into insertable universities
///
/// Rows whose name is blank, already in `existing_names`, or repeated earlier
/// in the file are skipped, as are rows that fail to deserialize. Ratings that
/// are not integers, or fall outside 1-5, are stored as absent.
pub fn parse_catalog<R: Read>(
    reader: R,
    existing_names: &HashSet<String>,
) -> Result<ParsedCatalog, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    // Surface an unreadable header once instead of failing every row
    csv_reader.headers()?;

    let mut catalog = ParsedCatalog::default();
    let mut seen_names = existing_names.clone();

    for (index, record) in csv_reader.deserialize::<UniversityRow>().enumerate() {
        // header is line 1
        let line = index + 2;

        let row = match record {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!("Skipping row {}: {}", line, e);
                catalog.skipped += 1;
                continue;
            }
        };

        let Some(name) = non_empty(row.name.clone()) else {
            tracing::warn!("Skipping row {} due to missing university name", line);
            catalog.skipped += 1;
            continue;
        };

        if !seen_names.insert(name.clone()) {
            tracing::debug!("Skipping already known university: {}", name);
            catalog.skipped += 1;
            continue;
        }

        catalog.universities.push(row.into_new_university(name));
    }

    Ok(catalog)
}

/// Load a catalog CSV file into the database
pub async fn load_catalog(client: &PostgresClient, path: &Path) -> Result<LoadReport, LoaderError> {
    let file = File::open(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let existing_names = client.existing_university_names().await?;
    tracing::info!(
        "Reading catalog from {} ({} universities already loaded)",
        path.display(),
        existing_names.len()
    );

    let catalog = parse_catalog(file, &existing_names)?;

    let inserted = if catalog.universities.is_empty() {
        tracing::info!("No new universities to add");
        0
    } else {
        client.insert_universities(&catalog.universities).await?
    };

    if catalog.skipped > 0 {
        tracing::info!("Skipped {} rows (missing names, duplicates or malformed rows)", catalog.skipped);
    }

    Ok(LoadReport {
        inserted,
        skipped: catalog.skipped,
    })
}

fn parse_rating(name: &str, field: &str, value: Option<String>) -> Option<i32> {
    let value = non_empty(value)?;
    match value.parse::<i32>() {
        Ok(rating) if RATING_SCALE.contains(&rating) => Some(rating),
        Ok(rating) => {
            tracing::warn!(
                "{} {} for '{}' is outside {}..={}, leaving it empty",
                field,
                rating,
                name,
                RATING_SCALE.start(),
                RATING_SCALE.end()
            );
            None
        }
        Err(_) => {
            tracing::warn!("Could not convert {} '{}' to int for '{}', leaving it empty", field, value, name);
            None
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn text_or_empty(value: Option<String>) -> String {
    non_empty(value).unwrap_or_default()
}
