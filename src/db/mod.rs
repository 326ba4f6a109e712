use anyhow::{Context, Result};
use rusqlite::{Connection, ErrorCode};
use std::path::PathBuf;
use tracing::{debug, info};

mod contacts;
mod groups;
mod schema;

#[cfg(test)]
pub(crate) mod fixtures;

pub use schema::SCHEMA;

/// Outcome of a write that the storage constraints may reject.
///
/// Constraint violations are an expected result, not an error: callers
/// branch on this value instead of inspecting `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied,
    ConstraintViolation,
    /// The row to update does not exist.
    NotFound,
}

impl WriteOutcome {
    #[inline]
    pub fn is_applied(self) -> bool {
        self == WriteOutcome::Applied
    }
}

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the per-user database, creating it if needed
    pub fn open() -> Result<Self> {
        let path = Self::default_path()?;
        Self::open_at(path)
    }

    pub fn open_at(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }

        let conn = Connection::open(&path)
            .with_context(|| format!("Could not open database at {}", path.display()))?;
        debug!(path = %path.display(), "opened contact database");

        Self::init(conn)
    }

    /// Open in-memory database for testing
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    #[cfg(test)]
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn default_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join("cbook").join("contacts.db"))
    }

    fn init(conn: Connection) -> Result<Self> {
        // Foreign keys are per-connection in SQLite and off by default
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(schema::SCHEMA)?;
        Ok(Self { conn })
    }
}

/// Turn a failed write into `WriteOutcome::ConstraintViolation` when the
/// storage engine rejected it, passing every other failure through.
fn constraint_outcome(err: rusqlite::Error) -> Result<WriteOutcome> {
    if is_constraint_violation(&err) {
        info!(error = %err, "write rejected by storage constraint");
        Ok(WriteOutcome::ConstraintViolation)
    } else {
        Err(err.into())
    }
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

/// Escape LIKE metacharacters (% _ \) for use with `ESCAPE '\'`
fn escape_like(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' | '_' | '\\' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
