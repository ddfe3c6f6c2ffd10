use crate::error::{MedlexError, Result};
use crate::models::{
    EnglishTerm, Example, ExampleLanguage, Gender, Meaning, PartOfSpeech, SpanishTerm,
};
use log::{debug, info, warn};
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use uuid::Uuid;

// --- Schema Definition ---

const SCHEMA_VERSION: u32 = 1;

const CREATE_METADATA_TABLE: &str = "
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);";

const CREATE_ENGLISH_TERM_TABLE: &str = "
CREATE TABLE IF NOT EXISTS english_term (
    id TEXT PRIMARY KEY,
    lemma TEXT NOT NULL UNIQUE,
    pos TEXT NOT NULL -- Stored as TEXT (e.g., 'noun', 'verb')
);";

const CREATE_SPANISH_TERM_TABLE: &str = "
CREATE TABLE IF NOT EXISTS spanish_term (
    id TEXT PRIMARY KEY,
    term TEXT NOT NULL UNIQUE,
    gender TEXT NOT NULL -- Stored as TEXT ('m', 'f', 'inv')
);";

const CREATE_MEANING_TABLE: &str = "
CREATE TABLE IF NOT EXISTS meaning (
    id TEXT PRIMARY KEY,
    description TEXT NOT NULL
);";

const CREATE_EXAMPLE_TABLE: &str = "
CREATE TABLE IF NOT EXISTS example (
    id TEXT PRIMARY KEY,
    language TEXT NOT NULL, -- 'en' or 'es'
    text TEXT NOT NULL,
    meaning_id TEXT NOT NULL,
    FOREIGN KEY (meaning_id) REFERENCES meaning(id) ON DELETE CASCADE
);";

const CREATE_MEANING_ENGLISH_TABLE: &str = "
CREATE TABLE IF NOT EXISTS meaning_english (
    meaning_id TEXT NOT NULL,
    english_term_id TEXT NOT NULL,
    PRIMARY KEY (meaning_id, english_term_id),
    FOREIGN KEY (meaning_id) REFERENCES meaning(id) ON DELETE CASCADE,
    FOREIGN KEY (english_term_id) REFERENCES english_term(id) ON DELETE CASCADE
);";

const CREATE_MEANING_SPANISH_TABLE: &str = "
CREATE TABLE IF NOT EXISTS meaning_spanish (
    meaning_id TEXT NOT NULL,
    spanish_term_id TEXT NOT NULL,
    PRIMARY KEY (meaning_id, spanish_term_id),
    FOREIGN KEY (meaning_id) REFERENCES meaning(id) ON DELETE CASCADE,
    FOREIGN KEY (spanish_term_id) REFERENCES spanish_term(id) ON DELETE CASCADE
);";

// --- Indices ---

const CREATE_EXAMPLE_MEANING_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_example_meaning ON example (meaning_id);";
const CREATE_ME_ENGLISH_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_me_english ON meaning_english (english_term_id);";
const CREATE_MS_SPANISH_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_ms_spanish ON meaning_spanish (spanish_term_id);";

// --- Initialization Function ---

/// Creates all necessary tables and indices in the database if they don't exist.
/// Also checks and sets the schema version, and seeds the canonical "lesion"
/// entry on first run so lookups have a known-good fixture.
///
/// Safe to call on every process start. Fatal if the store is unreachable;
/// the error is surfaced to the caller, never retried here.
pub fn initialize_database(conn: &mut Connection) -> Result<()> {
    info!(
        "Initializing database schema (version {})...",
        SCHEMA_VERSION
    );
    let tx = conn.transaction()?;

    // Create tables
    tx.execute(CREATE_METADATA_TABLE, [])?;
    tx.execute(CREATE_ENGLISH_TERM_TABLE, [])?;
    tx.execute(CREATE_SPANISH_TERM_TABLE, [])?;
    tx.execute(CREATE_MEANING_TABLE, [])?;
    tx.execute(CREATE_EXAMPLE_TABLE, [])?;
    tx.execute(CREATE_MEANING_ENGLISH_TABLE, [])?;
    tx.execute(CREATE_MEANING_SPANISH_TABLE, [])?;

    // Create indices
    tx.execute(CREATE_EXAMPLE_MEANING_INDEX, [])?;
    tx.execute(CREATE_ME_ENGLISH_INDEX, [])?;
    tx.execute(CREATE_MS_SPANISH_INDEX, [])?;

    // Check schema version
    let existing_version_str: Option<String> = tx
        .query_row(
            "SELECT value FROM metadata WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )
        .optional()?;

    match existing_version_str {
        Some(v_str) => {
            let existing_version: u32 = v_str.parse().map_err(|e| {
                MedlexError::Internal(format!(
                    "Failed to parse existing schema version '{}': {}",
                    v_str, e
                ))
            })?;
            match existing_version.cmp(&SCHEMA_VERSION) {
                std::cmp::Ordering::Less => {
                    warn!(
                        "Database schema version ({}) is older than expected ({}). Migration needed.",
                        existing_version, SCHEMA_VERSION
                    );
                    // For now, just update the version
                    tx.execute(
                        "UPDATE metadata SET value = ?1 WHERE key = 'schema_version'",
                        params![SCHEMA_VERSION.to_string()],
                    )?;
                    info!("Updated schema version in metadata table.");
                }
                std::cmp::Ordering::Greater => {
                    warn!(
                        "Database schema version ({}) is newer than expected ({}). Using potentially incompatible schema.",
                        existing_version, SCHEMA_VERSION
                    );
                }
                std::cmp::Ordering::Equal => {
                    debug!(
                        "Database schema version ({}) matches expected version.",
                        existing_version
                    );
                }
            }
        }
        None => {
            // No version found, insert current version
            tx.execute(
                "INSERT INTO metadata (key, value) VALUES ('schema_version', ?1)",
                params![SCHEMA_VERSION.to_string()],
            )?;
            info!("Set initial schema version in metadata table.");
        }
    }

    tx.commit()?;

    seed_if_missing(conn)?;
    info!("Database schema initialization complete.");
    Ok(())
}

/// Inserts the canonical "lesion" fixture unless its lemma already exists.
fn seed_if_missing(conn: &mut Connection) -> Result<()> {
    let exists: Option<String> = conn
        .query_row(
            "SELECT id FROM english_term WHERE lemma = 'lesion'",
            [],
            |row| row.get(0),
        )
        .optional()?;
    if exists.is_some() {
        debug!("Seed entry 'lesion' already present.");
        return Ok(());
    }

    info!("Seeding canonical entry 'lesion'...");
    let mut english = EnglishTerm::new("lesion", PartOfSpeech::Noun);
    let meaning = Meaning::new("Pathological change; abnormal tissue");
    let mut spanish = SpanishTerm::new("lesión", Gender::Feminine);
    let examples = [
        Example::new(ExampleLanguage::En, "The MRI showed a brain lesion."),
        Example::new(
            ExampleLanguage::Es,
            "La resonancia mostró una lesión cerebral.",
        ),
    ];
    persist_entry(conn, &mut english, &meaning, &mut spanish, &examples)
}

// --- Graph Mapper ---

/// Persists a freshly constructed entry graph in a single transaction.
///
/// English and Spanish terms are upserted on their unique text: an existing
/// row keeps its identifier (written back into the passed struct) and only
/// its mutable attribute (`pos` / `gender`) is updated. The meaning is always
/// inserted fresh; a lemma may carry several independent meanings. Join edges
/// use insert-if-absent semantics, so re-running never duplicates an edge.
///
/// On any failure the transaction rolls back and no partial graph is ever
/// visible. An unresolved unique-constraint violation surfaces as
/// `MedlexError::Conflict`.
pub fn persist_entry(
    conn: &mut Connection,
    english: &mut EnglishTerm,
    meaning: &Meaning,
    spanish: &mut SpanishTerm,
    examples: &[Example],
) -> Result<()> {
    debug!(
        "persist_entry: lemma='{}', spanish='{}', {} example(s)",
        english.term,
        spanish.term,
        examples.len()
    );
    let tx = conn.transaction()?;

    upsert_english_term(&tx, english)?;

    tx.execute(
        "INSERT INTO meaning (id, description) VALUES (?1, ?2)",
        params![meaning.meaning_id.to_string(), meaning.description],
    )?;

    upsert_spanish_term(&tx, spanish)?;

    tx.execute(
        "INSERT OR IGNORE INTO meaning_english (meaning_id, english_term_id)
         VALUES (?1, ?2)",
        params![
            meaning.meaning_id.to_string(),
            english.term_id.to_string()
        ],
    )?;
    tx.execute(
        "INSERT OR IGNORE INTO meaning_spanish (meaning_id, spanish_term_id)
         VALUES (?1, ?2)",
        params![
            meaning.meaning_id.to_string(),
            spanish.term_id.to_string()
        ],
    )?;

    for example in examples {
        tx.execute(
            "INSERT INTO example (id, language, text, meaning_id)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                example.example_id.to_string(),
                language_to_string(example.language),
                example.text,
                meaning.meaning_id.to_string()
            ],
        )?;
    }

    tx.commit()?;
    Ok(())
}

/// Insert-or-update on the unique lemma. The surviving row's id is written
/// back into `term` so join edges always reference the persisted row.
fn upsert_english_term(tx: &Transaction, term: &mut EnglishTerm) -> Result<()> {
    let existing: Option<String> = tx
        .query_row(
            "SELECT id FROM english_term WHERE lemma = ?1",
            params![term.term],
            |row| row.get(0),
        )
        .optional()?;

    match existing {
        Some(id) => {
            tx.execute(
                "UPDATE english_term SET pos = ?1 WHERE id = ?2",
                params![pos_to_string(term.pos), id],
            )?;
            term.term_id = parse_stored_uuid(&id)?;
        }
        None => {
            // A concurrent writer may claim the lemma between the lookup and
            // this insert; ON CONFLICT lets the existing row win, after which
            // the re-read below picks up its id.
            tx.execute(
                "INSERT INTO english_term (id, lemma, pos) VALUES (?1, ?2, ?3)
                 ON CONFLICT(lemma) DO UPDATE SET pos = excluded.pos",
                params![
                    term.term_id.to_string(),
                    term.term,
                    pos_to_string(term.pos)
                ],
            )?;
            let id: String = tx.query_row(
                "SELECT id FROM english_term WHERE lemma = ?1",
                params![term.term],
                |row| row.get(0),
            )?;
            term.term_id = parse_stored_uuid(&id)?;
        }
    }
    Ok(())
}

/// Insert-or-update on the unique Spanish text; mirrors `upsert_english_term`.
fn upsert_spanish_term(tx: &Transaction, term: &mut SpanishTerm) -> Result<()> {
    let existing: Option<String> = tx
        .query_row(
            "SELECT id FROM spanish_term WHERE term = ?1",
            params![term.term],
            |row| row.get(0),
        )
        .optional()?;

    match existing {
        Some(id) => {
            tx.execute(
                "UPDATE spanish_term SET gender = ?1 WHERE id = ?2",
                params![gender_to_string(term.gender), id],
            )?;
            term.term_id = parse_stored_uuid(&id)?;
        }
        None => {
            tx.execute(
                "INSERT INTO spanish_term (id, term, gender) VALUES (?1, ?2, ?3)
                 ON CONFLICT(term) DO UPDATE SET gender = excluded.gender",
                params![
                    term.term_id.to_string(),
                    term.term,
                    gender_to_string(term.gender)
                ],
            )?;
            let id: String = tx.query_row(
                "SELECT id FROM spanish_term WHERE term = ?1",
                params![term.term],
                |row| row.get(0),
            )?;
            term.term_id = parse_stored_uuid(&id)?;
        }
    }
    Ok(())
}

// --- Cascade Deleter ---

/// Removes an English term and the parts of its graph nothing else reaches.
///
/// Meanings linked only from this term are fully removed (examples, Spanish
/// join edges, the meaning row, then any Spanish term left with zero
/// remaining links). Meanings still shared by another English term are only
/// unlinked, never deleted. No-op if the lemma does not exist.
pub fn delete_entry_by_lemma(conn: &mut Connection, lemma: &str) -> Result<()> {
    let tx = conn.transaction()?;

    let english_id: Option<String> = tx
        .query_row(
            "SELECT id FROM english_term WHERE lemma = ?1",
            params![lemma],
            |row| row.get(0),
        )
        .optional()?;
    let Some(english_id) = english_id else {
        debug!("delete_entry_by_lemma: lemma '{}' not found, no-op", lemma);
        return Ok(());
    };

    let meaning_ids: Vec<String> = {
        let mut stmt = tx.prepare(
            "SELECT m.id
             FROM meaning m
             JOIN meaning_english me ON me.meaning_id = m.id
             WHERE me.english_term_id = ?1",
        )?;
        let rows = stmt.query_map(params![english_id], |row| row.get::<_, String>(0))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()?
    };

    for meaning_id in &meaning_ids {
        let other_links: i64 = tx.query_row(
            "SELECT COUNT(*) FROM meaning_english
             WHERE meaning_id = ?1 AND english_term_id <> ?2",
            params![meaning_id, english_id],
            |row| row.get(0),
        )?;

        if other_links == 0 {
            // Sole linker: the whole sub-graph goes, then any Spanish term
            // orphaned by it.
            let spanish_ids: Vec<String> = {
                let mut stmt = tx.prepare(
                    "SELECT spanish_term_id FROM meaning_spanish WHERE meaning_id = ?1",
                )?;
                let rows = stmt.query_map(params![meaning_id], |row| row.get::<_, String>(0))?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            };

            tx.execute(
                "DELETE FROM example WHERE meaning_id = ?1",
                params![meaning_id],
            )?;
            tx.execute(
                "DELETE FROM meaning_spanish WHERE meaning_id = ?1",
                params![meaning_id],
            )?;
            tx.execute(
                "DELETE FROM meaning_english WHERE meaning_id = ?1 AND english_term_id = ?2",
                params![meaning_id, english_id],
            )?;
            tx.execute("DELETE FROM meaning WHERE id = ?1", params![meaning_id])?;

            for spanish_id in &spanish_ids {
                tx.execute(
                    "DELETE FROM spanish_term
                     WHERE id = ?1
                       AND NOT EXISTS (
                           SELECT 1 FROM meaning_spanish WHERE spanish_term_id = ?1
                       )",
                    params![spanish_id],
                )?;
            }
        } else {
            // Shared meaning: unlink this term only.
            tx.execute(
                "DELETE FROM meaning_english WHERE meaning_id = ?1 AND english_term_id = ?2",
                params![meaning_id, english_id],
            )?;
        }
    }

    tx.execute(
        "DELETE FROM english_term WHERE id = ?1",
        params![english_id],
    )?;
    tx.commit()?;
    info!("Deleted English entry '{}'.", lemma);
    Ok(())
}

// --- Enum to String Conversion Helpers ---

pub(crate) fn pos_to_string(pos: PartOfSpeech) -> &'static str {
    match pos {
        PartOfSpeech::Noun => "noun",
        PartOfSpeech::Verb => "verb",
        PartOfSpeech::Adjective => "adjective",
        PartOfSpeech::Adverb => "adverb",
        PartOfSpeech::Other => "other",
    }
}

pub fn string_to_pos(s: &str) -> Result<PartOfSpeech> {
    match s {
        "noun" => Ok(PartOfSpeech::Noun),
        "verb" => Ok(PartOfSpeech::Verb),
        "adjective" => Ok(PartOfSpeech::Adjective),
        "adverb" => Ok(PartOfSpeech::Adverb),
        "other" => Ok(PartOfSpeech::Other),
        _ => Err(MedlexError::Internal(format!(
            "Invalid part of speech in DB: {}",
            s
        ))),
    }
}

pub(crate) fn gender_to_string(gender: Gender) -> &'static str {
    match gender {
        Gender::Masculine => "m",
        Gender::Feminine => "f",
        Gender::Invariable => "inv",
    }
}

pub fn string_to_gender(s: &str) -> Result<Gender> {
    match s {
        "m" => Ok(Gender::Masculine),
        "f" => Ok(Gender::Feminine),
        "inv" => Ok(Gender::Invariable),
        _ => Err(MedlexError::Internal(format!("Invalid gender in DB: {}", s))),
    }
}

pub(crate) fn language_to_string(language: ExampleLanguage) -> &'static str {
    match language {
        ExampleLanguage::En => "en",
        ExampleLanguage::Es => "es",
    }
}

pub fn string_to_language(s: &str) -> Result<ExampleLanguage> {
    match s {
        "en" => Ok(ExampleLanguage::En),
        "es" => Ok(ExampleLanguage::Es),
        _ => Err(MedlexError::Internal(format!(
            "Invalid example language in DB: {}",
            s
        ))),
    }
}

pub(crate) fn parse_stored_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s)
        .map_err(|e| MedlexError::Internal(format!("Invalid UUID in DB ('{}'): {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_conn() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "foreign_keys", "ON").unwrap();
        initialize_database(&mut conn).unwrap();
        conn
    }

    fn count(conn: &Connection, sql: &str) -> i64 {
        conn.query_row(sql, [], |row| row.get(0)).unwrap()
    }

    fn sample_entry(
        lemma: &str,
        spanish: &str,
    ) -> (EnglishTerm, Meaning, SpanishTerm, Vec<Example>) {
        (
            EnglishTerm::new(lemma, PartOfSpeech::Noun),
            Meaning::new("Injury causing discoloration of the skin"),
            SpanishTerm::new(spanish, Gender::Masculine),
            vec![
                Example::new(ExampleLanguage::En, "He had a bruise on his arm."),
                Example::new(ExampleLanguage::Es, "Tenía un moretón en el brazo."),
            ],
        )
    }

    #[test]
    fn initialize_is_idempotent_and_seeds_once() {
        let mut conn = test_conn();
        initialize_database(&mut conn).unwrap();
        initialize_database(&mut conn).unwrap();

        assert_eq!(
            count(
                &conn,
                "SELECT COUNT(*) FROM english_term WHERE lemma = 'lesion'"
            ),
            1
        );
        // The seed carries one meaning with two examples
        assert_eq!(count(&conn, "SELECT COUNT(*) FROM meaning"), 1);
        assert_eq!(count(&conn, "SELECT COUNT(*) FROM example"), 2);
    }

    #[test]
    fn persist_writes_full_graph() {
        let mut conn = test_conn();
        let (mut en, m, mut es, exs) = sample_entry("bruise", "moretón");
        persist_entry(&mut conn, &mut en, &m, &mut es, &exs).unwrap();

        assert_eq!(
            count(
                &conn,
                "SELECT COUNT(*) FROM english_term WHERE lemma = 'bruise'"
            ),
            1
        );
        assert_eq!(
            count(
                &conn,
                "SELECT COUNT(*) FROM spanish_term WHERE term = 'moretón'"
            ),
            1
        );
        assert_eq!(count(&conn, "SELECT COUNT(*) FROM meaning_english"), 2); // seed + bruise
        assert_eq!(count(&conn, "SELECT COUNT(*) FROM meaning_spanish"), 2);
    }

    #[test]
    fn readd_same_texts_keeps_single_term_rows() {
        let mut conn = test_conn();
        let (mut en1, m1, mut es1, exs1) = sample_entry("bruise", "moretón");
        persist_entry(&mut conn, &mut en1, &m1, &mut es1, &exs1).unwrap();

        // Second add with the same lemma and translation but a new meaning
        let mut en2 = EnglishTerm::new("bruise", PartOfSpeech::Verb);
        let m2 = Meaning::new("To injure without breaking the skin");
        let mut es2 = SpanishTerm::new("moretón", Gender::Masculine);
        persist_entry(&mut conn, &mut en2, &m2, &mut es2, &[]).unwrap();

        // Surviving ids were reused, not duplicated
        assert_eq!(en1.term_id, en2.term_id);
        assert_eq!(es1.term_id, es2.term_id);
        assert_eq!(
            count(
                &conn,
                "SELECT COUNT(*) FROM english_term WHERE lemma = 'bruise'"
            ),
            1
        );
        assert_eq!(
            count(
                &conn,
                "SELECT COUNT(*) FROM spanish_term WHERE term = 'moretón'"
            ),
            1
        );
        // Two fresh meanings under the one term, and pos was updated in place
        assert_eq!(
            count(
                &conn,
                "SELECT COUNT(*) FROM meaning_english me
                 JOIN english_term et ON et.id = me.english_term_id
                 WHERE et.lemma = 'bruise'"
            ),
            2
        );
        let pos: String = conn
            .query_row(
                "SELECT pos FROM english_term WHERE lemma = 'bruise'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(pos, "verb");
    }

    #[test]
    fn failed_persist_leaves_no_partial_graph() {
        let mut conn = test_conn();
        let (mut en, m, mut es, mut exs) = sample_entry("bruise", "moretón");
        // Duplicate example id forces a primary-key conflict on the final step
        exs.push(exs[0].clone());

        let err = persist_entry(&mut conn, &mut en, &m, &mut es, &exs).unwrap_err();
        assert!(matches!(err, MedlexError::Conflict(_)));

        // Everything rolled back: neither the term nor the meaning exists
        assert_eq!(
            count(
                &conn,
                "SELECT COUNT(*) FROM english_term WHERE lemma = 'bruise'"
            ),
            0
        );
        assert_eq!(
            count(
                &conn,
                "SELECT COUNT(*) FROM meaning WHERE description LIKE 'Injury%'"
            ),
            0
        );
        assert_eq!(
            count(
                &conn,
                "SELECT COUNT(*) FROM spanish_term WHERE term = 'moretón'"
            ),
            0
        );
    }

    #[test]
    fn delete_unknown_lemma_is_a_noop() {
        let mut conn = test_conn();
        delete_entry_by_lemma(&mut conn, "nonexistent-word").unwrap();
    }

    #[test]
    fn delete_removes_sole_linked_graph() {
        let mut conn = test_conn();
        let (mut en, m, mut es, exs) = sample_entry("bruise", "moretón");
        persist_entry(&mut conn, &mut en, &m, &mut es, &exs).unwrap();

        delete_entry_by_lemma(&mut conn, "bruise").unwrap();

        assert_eq!(
            count(
                &conn,
                "SELECT COUNT(*) FROM english_term WHERE lemma = 'bruise'"
            ),
            0
        );
        assert_eq!(
            count(
                &conn,
                "SELECT COUNT(*) FROM spanish_term WHERE term = 'moretón'"
            ),
            0
        );
        // The seed graph is untouched
        assert_eq!(count(&conn, "SELECT COUNT(*) FROM meaning"), 1);
        assert_eq!(count(&conn, "SELECT COUNT(*) FROM example"), 2);
    }

    #[test]
    fn delete_unlinks_but_keeps_shared_meaning() {
        let mut conn = test_conn();
        let (mut en_a, m, mut es, exs) = sample_entry("contusion", "moretón");
        persist_entry(&mut conn, &mut en_a, &m, &mut es, &exs).unwrap();

        // Second English term sharing the same meaning through the join table
        let mut en_b = EnglishTerm::new("bruise", PartOfSpeech::Noun);
        let m_b = Meaning::new("To injure without breaking the skin");
        let mut es_b = SpanishTerm::new("magullar", Gender::Invariable);
        persist_entry(&mut conn, &mut en_b, &m_b, &mut es_b, &[]).unwrap();
        conn.execute(
            "INSERT OR IGNORE INTO meaning_english (meaning_id, english_term_id)
             VALUES (?1, ?2)",
            params![m.meaning_id.to_string(), en_b.term_id.to_string()],
        )
        .unwrap();

        delete_entry_by_lemma(&mut conn, "contusion").unwrap();

        // The shared meaning, its examples, and its Spanish term all survive
        assert_eq!(
            count(
                &conn,
                &format!(
                    "SELECT COUNT(*) FROM meaning WHERE id = '{}'",
                    m.meaning_id
                )
            ),
            1
        );
        assert_eq!(
            count(
                &conn,
                &format!(
                    "SELECT COUNT(*) FROM example WHERE meaning_id = '{}'",
                    m.meaning_id
                )
            ),
            2
        );
        assert_eq!(
            count(
                &conn,
                "SELECT COUNT(*) FROM spanish_term WHERE term = 'moretón'"
            ),
            1
        );
        // Only the deleted term's edge is gone
        assert_eq!(
            count(
                &conn,
                &format!(
                    "SELECT COUNT(*) FROM meaning_english WHERE meaning_id = '{}'",
                    m.meaning_id
                )
            ),
            1
        );
    }

    #[test]
    fn storage_enum_round_trips() {
        for pos in [
            PartOfSpeech::Noun,
            PartOfSpeech::Verb,
            PartOfSpeech::Adjective,
            PartOfSpeech::Adverb,
            PartOfSpeech::Other,
        ] {
            assert_eq!(string_to_pos(pos_to_string(pos)).unwrap(), pos);
        }
        assert!(string_to_gender("neuter").is_err());
        assert!(string_to_language("fr").is_err());
    }
}
