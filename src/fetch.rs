use std::time::Instant;

use anyhow::Context;
use postgres::NoTls;
use tracing::info;

use crate::config::DbConfig;
use crate::error::FetchError;

const PROJECT_NAMES_QUERY: &str = "SELECT DISTINCT value \
     FROM str_values \
     WHERE property_id = $1 \
     ORDER BY value ASC";

/// Source of today's project name set. The production implementation talks
/// to Postgres; tests substitute a fake.
pub trait NameSource {
    fn fetch_names(&mut self) -> Result<Vec<String>, FetchError>;
}

/// Fetches the distinct project names for one attribute id, ascending.
/// Read-only; one connection per run, opened lazily at fetch time.
pub struct PgNameSource {
    db: DbConfig,
    property_id: i32,
}

impl PgNameSource {
    pub fn new(db: DbConfig, property_id: i32) -> Self {
        PgNameSource { db, property_id }
    }
}

impl NameSource for PgNameSource {
    fn fetch_names(&mut self) -> Result<Vec<String>, FetchError> {
        let start = Instant::now();
        info!(
            action = "start",
            component = "fetch",
            host = %self.db.host,
            dbname = %self.db.dbname,
            property_id = self.property_id,
            "Fetching project names from database"
        );

        let mut client = postgres::Config::new()
            .host(&self.db.host)
            .port(self.db.port)
            .dbname(&self.db.dbname)
            .user(&self.db.user)
            .password(&self.db.password)
            .connect(NoTls)
            .context("database connection failed")?;

        let rows = client
            .query(PROJECT_NAMES_QUERY, &[&self.property_id])
            .context("project name query failed")?;

        let mut names = Vec::with_capacity(rows.len());
        for row in &rows {
            // NULL attribute values carry no name; drop them.
            let value: Option<String> = row
                .try_get(0)
                .context("unexpected row shape in project name query")?;
            if let Some(value) = value {
                names.push(value);
            }
        }

        info!(
            action = "complete",
            component = "fetch",
            name_count = names.len(),
            duration_ms = start.elapsed().as_millis(),
            "Project names fetched"
        );
        Ok(names)
    }
}
