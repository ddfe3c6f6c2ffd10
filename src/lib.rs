// Declare modules
pub mod db;
pub mod error;
pub mod models;

// Re-export key types for easier use
pub use error::{MedlexError, Result};
pub use models::{EnglishTerm, Example, ExampleLanguage, Gender, Meaning, PartOfSpeech, SpanishTerm};

use directories_next::ProjectDirs;
use log::{debug, error, info};
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

// --- Constants ---

/// Subdirectory name within the user's data directory
pub const MEDLEX_SUBDIR: &str = "medlex-rs";
const DB_FILENAME: &str = "medlex.db";

/// Options for opening the dictionary store.
#[derive(Debug, Default, Clone)]
pub struct LoadOptions {
    /// Optional path to a specific database file to use or create.
    /// If None, the default location based on ProjectDirs will be used.
    pub db_path: Option<PathBuf>,
}

/// The main dictionary interface.
///
/// Operations are stateless request handlers over a shared connection: each
/// one acquires the connection, runs inside its own transaction where more
/// than one table is touched, and releases it. Graphs returned by lookups
/// are disconnected from the store; mutating them has no persistence effect.
#[derive(Clone)] // Clone is cheap due to Arc<Mutex<...>>
pub struct Dictionary {
    conn: Arc<Mutex<Connection>>,
    #[allow(dead_code)]
    db_file_path: Arc<PathBuf>,
}

// Helper function to open/create the database connection
// This encapsulates the logic of setting flags and pragmas
fn open_db_connection(path: &Path) -> Result<Connection> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    // Open the connection with flags for read/write/create
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
    )?;

    // WAL mode for better concurrency (readers don't block writers)
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    // The example and join tables rely on ON DELETE CASCADE
    conn.pragma_update(None, "foreign_keys", "ON")?;

    Ok(conn)
}

impl Dictionary {
    /// Opens the dictionary using the default database path.
    ///
    /// Creates the database and schema if absent, and seeds the canonical
    /// "lesion" entry on first run.
    pub fn load() -> Result<Self> {
        Self::load_with_options(LoadOptions::default())
    }

    /// Opens the dictionary with specific options.
    pub fn load_with_options(options: LoadOptions) -> Result<Self> {
        let db_path = match options.db_path {
            Some(path) => {
                info!("Using provided database path: {:?}", path);
                path
            }
            None => Self::get_default_db_path()?,
        };
        info!("Using database path: {:?}", db_path);

        let mut conn = open_db_connection(&db_path)?;
        db::initialize_database(&mut conn)?;

        Ok(Dictionary {
            conn: Arc::new(Mutex::new(conn)),
            db_file_path: Arc::new(db_path),
        })
    }

    /// Gets the default path for the SQLite database file.
    pub fn get_default_db_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("org", "MedlexRs", MEDLEX_SUBDIR)
            .ok_or(MedlexError::DataDirNotFound)?;
        let data_dir = project_dirs.data_dir();
        fs::create_dir_all(data_dir)?;
        Ok(data_dir.join(DB_FILENAME))
    }

    /// Deletes the dictionary database file(s).
    ///
    /// If `db_path_override` is `Some`, it attempts to delete that specific file.
    /// Otherwise the default database path is cleared.
    pub fn clear_database(db_path_override: Option<PathBuf>) -> Result<()> {
        let path_to_clear = match db_path_override {
            Some(path) => {
                info!("Attempting to clear specified database file: {:?}", path);
                path
            }
            None => {
                let default_path = Self::get_default_db_path()?;
                info!("Attempting to clear default database file: {:?}", default_path);
                default_path
            }
        };

        if path_to_clear.exists() {
            match fs::remove_file(&path_to_clear) {
                Ok(_) => {
                    info!("Successfully deleted database file: {:?}", path_to_clear);
                    // Also attempt to delete WAL and SHM files if they exist
                    let wal_path = path_to_clear.with_extension("db-wal");
                    let shm_path = path_to_clear.with_extension("db-shm");
                    if wal_path.exists() {
                        let _ = fs::remove_file(wal_path);
                    }
                    if shm_path.exists() {
                        let _ = fs::remove_file(shm_path);
                    }
                    Ok(())
                }
                Err(e) => {
                    error!("Failed to delete database file {:?}: {}", path_to_clear, e);
                    Err(MedlexError::Io(e))
                }
            }
        } else {
            info!(
                "Database file not found, nothing to clear: {:?}",
                path_to_clear
            );
            Ok(()) // Not an error if the file doesn't exist
        }
    }

    // --- Service-Facing Operations ---

    /// Looks up an English term by exact, case-sensitive lemma and returns
    /// its fully populated graph. `Ok(None)` for an absent lemma; not-found
    /// is an empty result, never an error.
    pub fn lookup_english(&self, lemma: &str) -> Result<Option<EnglishTerm>> {
        let lemma = require_nonblank(lemma, "lemma")?;
        debug!("lookup_english: lemma='{}'", lemma);

        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;
        let graph = fetch_term_graph(&tx, lemma)?;
        tx.commit()?;

        if graph.is_none() {
            debug!("No entry found for lemma '{}'", lemma);
        }
        Ok(graph)
    }

    /// Adds a new entry: one fresh meaning under the (possibly existing)
    /// lemma, one Spanish translation, and zero-or-more examples.
    ///
    /// All fields are validated before any store access. Returns the
    /// committed graph as reloaded from the store, so identifiers reflect
    /// whatever rows actually won the upserts.
    pub fn add_entry(
        &self,
        lemma: &str,
        pos: PartOfSpeech,
        meaning_desc: &str,
        spanish_term: &str,
        gender: Gender,
        examples: &[(String, String)],
    ) -> Result<EnglishTerm> {
        let lemma = require_nonblank(lemma, "lemma")?;
        let meaning_desc = require_nonblank(meaning_desc, "meaning description")?;
        let spanish_term = require_nonblank(spanish_term, "spanish term")?;

        let mut example_models = Vec::with_capacity(examples.len());
        for (lang, text) in examples {
            let language: ExampleLanguage =
                lang.trim().parse().map_err(MedlexError::Validation)?;
            let text = require_nonblank(text, "example text")?;
            example_models.push(Example::new(language, text));
        }

        let mut english = EnglishTerm::new(lemma, pos);
        let meaning = Meaning::new(meaning_desc);
        let mut spanish = SpanishTerm::new(spanish_term, gender);

        let mut conn = self.lock_conn()?;
        db::persist_entry(&mut conn, &mut english, &meaning, &mut spanish, &example_models)?;

        let tx = conn.transaction()?;
        let reloaded = fetch_term_graph(&tx, lemma)?;
        tx.commit()?;
        reloaded.ok_or_else(|| {
            MedlexError::Internal(format!("Entry '{}' vanished after commit", lemma))
        })
    }

    /// Removes an English term and any part of its graph nothing else
    /// reaches. Meanings shared with other terms are only unlinked.
    /// No-op if the lemma does not exist. Maintenance/test path.
    pub fn delete_entry(&self, lemma: &str) -> Result<()> {
        let lemma = require_nonblank(lemma, "lemma")?;
        let mut conn = self.lock_conn()?;
        db::delete_entry_by_lemma(&mut conn, lemma)
    }

    // --- Internal Helpers ---

    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| MedlexError::Internal("Mutex poisoned".to_string()))
    }
}

/// Trims and rejects empty required fields before any store access.
fn require_nonblank<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(MedlexError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed)
}

// --- Query Reconstructor ---

/// Rebuilds the full term graph from joined rows, attaching Spanish terms
/// and examples to their own parent meaning, never flattening across
/// meanings. Rows come back in insertion (rowid) order.
fn fetch_term_graph(conn: &Connection, lemma: &str) -> Result<Option<EnglishTerm>> {
    let term_row: Option<(String, String, String)> = conn
        .query_row(
            "SELECT id, lemma, pos FROM english_term WHERE lemma = ?1",
            params![lemma],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()?;
    let Some((term_id, term, pos_str)) = term_row else {
        return Ok(None);
    };

    let mut english = EnglishTerm {
        term_id: db::parse_stored_uuid(&term_id)?,
        term,
        pos: db::string_to_pos(&pos_str)?,
        meanings: Vec::new(),
    };

    let meaning_rows: Vec<(String, String)> = {
        let mut stmt = conn.prepare(
            "SELECT m.id, m.description
             FROM meaning m
             JOIN meaning_english me ON me.meaning_id = m.id
             WHERE me.english_term_id = ?1
             ORDER BY m.rowid",
        )?;
        let rows = stmt.query_map(params![term_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        rows.collect::<std::result::Result<Vec<_>, _>>()?
    };

    for (meaning_id, description) in meaning_rows {
        let meaning = Meaning {
            meaning_id: db::parse_stored_uuid(&meaning_id)?,
            description,
            spanish_terms: fetch_spanish_for_meaning(conn, &meaning_id)?,
            examples: fetch_examples_for_meaning(conn, &meaning_id)?,
        };
        english.meanings.push(meaning);
    }

    Ok(Some(english))
}

fn fetch_spanish_for_meaning(conn: &Connection, meaning_id: &str) -> Result<Vec<SpanishTerm>> {
    let mut stmt = conn.prepare(
        "SELECT s.id, s.term, s.gender
         FROM spanish_term s
         JOIN meaning_spanish ms ON ms.spanish_term_id = s.id
         WHERE ms.meaning_id = ?1
         ORDER BY s.rowid",
    )?;
    let rows = stmt.query_map(params![meaning_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut terms = Vec::new();
    for row in rows {
        let (id, term, gender_str) = row?;
        terms.push(SpanishTerm {
            term_id: db::parse_stored_uuid(&id)?,
            term,
            gender: db::string_to_gender(&gender_str)?,
        });
    }
    Ok(terms)
}

fn fetch_examples_for_meaning(conn: &Connection, meaning_id: &str) -> Result<Vec<Example>> {
    let mut stmt = conn.prepare(
        "SELECT id, language, text FROM example WHERE meaning_id = ?1 ORDER BY rowid",
    )?;
    let rows = stmt.query_map(params![meaning_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut examples = Vec::new();
    for row in rows {
        let (id, language_str, text) = row?;
        examples.push(Example {
            example_id: db::parse_stored_uuid(&id)?,
            language: db::string_to_language(&language_str)?,
            text,
        });
    }
    Ok(examples)
}
