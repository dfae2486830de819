use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::model::{AuthSession, FavoriteSite};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("failed to create store directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS favorite (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        url TEXT NOT NULL,
        keywords TEXT,
        position INTEGER NOT NULL
    );
    CREATE TABLE IF NOT EXISTS session (
        singleton INTEGER PRIMARY KEY CHECK (singleton = 1),
        token TEXT NOT NULL,
        username TEXT NOT NULL
    );
";

pub fn open_memory() -> Result<Connection, StoreError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}

pub fn open(path: &Path) -> Result<Connection, StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let conn = Connection::open(path)?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}

pub fn load_favorites(db: &Connection) -> Result<Vec<FavoriteSite>, StoreError> {
    let mut stmt =
        db.prepare("SELECT id, name, url, keywords FROM favorite ORDER BY position, rowid")?;
    let rows = stmt.query_map([], |row| {
        Ok(FavoriteSite {
            id: row.get(0)?,
            name: row.get(1)?,
            url: row.get(2)?,
            keywords: row.get(3)?,
        })
    })?;
    let favorites = rows.collect::<Result<Vec<_>, _>>()?;
    Ok(favorites)
}

/// Replaces the cached collection wholesale, preserving order.
pub fn replace_favorites(db: &mut Connection, sites: &[FavoriteSite]) -> Result<(), StoreError> {
    let tx = db.transaction()?;
    tx.execute("DELETE FROM favorite", [])?;
    {
        let mut insert = tx.prepare(
            "INSERT INTO favorite (id, name, url, keywords, position) VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET name=excluded.name, url=excluded.url,
                 keywords=excluded.keywords, position=excluded.position",
        )?;
        for (position, site) in sites.iter().enumerate() {
            insert.execute(params![
                site.id,
                site.name,
                site.url,
                site.keywords,
                position as i64
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}

pub fn load_session(db: &Connection) -> Result<Option<AuthSession>, StoreError> {
    let session = db
        .query_row(
            "SELECT token, username FROM session WHERE singleton = 1",
            [],
            |row| {
                Ok(AuthSession {
                    token: row.get(0)?,
                    username: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(session)
}

pub fn save_session(db: &Connection, session: Option<&AuthSession>) -> Result<(), StoreError> {
    match session {
        Some(session) => {
            db.execute(
                "INSERT INTO session (singleton, token, username) VALUES (1, ?1, ?2)
                 ON CONFLICT(singleton) DO UPDATE SET token=excluded.token, username=excluded.username",
                params![session.token, session.username],
            )?;
        }
        None => {
            db.execute("DELETE FROM session", [])?;
        }
    }
    Ok(())
}
