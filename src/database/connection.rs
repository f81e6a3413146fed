//! SQLite connection management for Smartmarks.
//!
//! [`Database`] owns the single `rusqlite::Connection` shared by the
//! bookmark store and the auth session cache. Opening a database always
//! brings the schema up to date, so callers never see a partially
//! migrated file.

use rusqlite::Connection;
use std::path::Path;

use super::migrations;

/// Owner of the SQLite connection backing the bookmark and session tables.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database file at `path` and applies any
    /// pending migrations.
    ///
    /// # Errors
    /// Returns `rusqlite::Error` if the connection cannot be established or
    /// a migration statement fails.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        Self::migrated(Connection::open(path)?)
    }

    /// Opens an in-memory database with the full schema applied. The data
    /// is discarded when the `Database` is dropped; tests use this to get a
    /// fresh store per case.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::migrated(Connection::open_in_memory()?)
    }

    fn migrated(conn: Connection) -> Result<Self, rusqlite::Error> {
        migrations::run_all(&conn)?;
        Ok(Self { conn })
    }

    /// The schema version currently recorded in this database.
    pub fn schema_version(&self) -> i32 {
        migrations::get_schema_version(&self.conn)
    }

    /// The underlying connection, for the store and auth provider to run
    /// queries against.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
