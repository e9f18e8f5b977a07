use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

use crate::models::{NewUniversity, ParsedRange, UniversityRecord};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

const SELECT_UNIVERSITIES: &str = r#"
    SELECT id, name, geopolitical_region, state, specialty, ownership, type,
           academic_rigor, sports_facilities, hostel_quality, social_life,
           tuition_min, tuition_max, cost_of_living_min, cost_of_living_max,
           tuition_category_str, cost_category_str, source_url_1, source_url_2
    FROM universities
    ORDER BY id
"#;

const INSERT_UNIVERSITY: &str = r#"
    INSERT INTO universities (
        name, geopolitical_region, state, specialty, ownership, type,
        academic_rigor, sports_facilities, hostel_quality, social_life,
        tuition_min, tuition_max, cost_of_living_min, cost_of_living_max,
        tuition_category_str, cost_category_str, source_url_1, source_url_2
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
"#;

/// PostgreSQL client holding the university catalog
///
/// Supplies the candidate pool for matching and receives rows from the
/// catalog loader.
#[derive(Clone)]
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self::from_pool(pool))
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL at {}", redact_url(url));

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Wrap an existing pool; no migrations are run
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the whole catalog, ordered by id
    ///
    /// The order is the stable pool order used to break score ties.
    pub async fn fetch_universities(&self) -> Result<Vec<UniversityRecord>, PostgresError> {
        let rows = sqlx::query(SELECT_UNIVERSITIES).fetch_all(&self.pool).await?;

        let universities = rows
            .iter()
            .map(university_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Fetched {} universities", universities.len());

        Ok(universities)
    }

    /// Names already present in the catalog
    pub async fn existing_university_names(&self) -> Result<HashSet<String>, PostgresError> {
        let rows = sqlx::query("SELECT name FROM universities")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("name").map_err(PostgresError::from))
            .collect()
    }

    /// Insert a batch of universities in a single transaction
    ///
    /// Either every row is inserted or none is.
    pub async fn insert_universities(&self, universities: &[NewUniversity]) -> Result<u64, PostgresError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for uni in universities {
            let result = sqlx::query(INSERT_UNIVERSITY)
                .bind(&uni.name)
                .bind(&uni.geopolitical_region)
                .bind(&uni.state)
                .bind(&uni.specialty)
                .bind(&uni.ownership)
                .bind(&uni.university_type)
                .bind(uni.academic_rigor)
                .bind(uni.sports_facilities)
                .bind(uni.hostel_quality)
                .bind(uni.social_life)
                .bind(uni.tuition.min)
                .bind(uni.tuition.max)
                .bind(uni.cost_of_living.min)
                .bind(uni.cost_of_living.max)
                .bind(&uni.tuition_display)
                .bind(&uni.cost_of_living_display)
                .bind(&uni.source_url_1)
                .bind(&uni.source_url_2)
                .execute(&mut *tx)
                .await?;

            inserted += result.rows_affected();
        }

        tx.commit().await?;

        tracing::info!("Inserted {} universities", inserted);

        Ok(inserted)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn university_from_row(row: &PgRow) -> Result<UniversityRecord, sqlx::Error> {
    Ok(UniversityRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        geopolitical_region: row.try_get("geopolitical_region")?,
        state: row.try_get("state")?,
        specialty: row.try_get("specialty")?,
        ownership: row.try_get("ownership")?,
        university_type: row.try_get("type")?,
        academic_rigor: row.try_get("academic_rigor")?,
        sports_facilities: row.try_get("sports_facilities")?,
        hostel_quality: row.try_get("hostel_quality")?,
        social_life: row.try_get("social_life")?,
        tuition: ParsedRange::new(row.try_get("tuition_min")?, row.try_get("tuition_max")?),
        cost_of_living: ParsedRange::new(
            row.try_get("cost_of_living_min")?,
            row.try_get("cost_of_living_max")?,
        ),
        tuition_display: row.try_get("tuition_category_str")?,
        cost_of_living_display: row.try_get("cost_category_str")?,
        source_url_1: row.try_get("source_url_1")?,
        source_url_2: row.try_get("source_url_2")?,
    })
}

/// Strip credentials from a connection URL before logging it
pub fn redact_url(url: &str) -> &str {
    url.rsplit('@').next().unwrap_or(url)
}
