//! Command-line interface for the medlex bilingual medical dictionary.
//!
//! This CLI provides commands for looking up English medical terms, adding
//! new entries with their Spanish translations, and managing the database.

use clap::{Parser, Subcommand};
use colored::*;
use log::{LevelFilter, error, info};
use medlex_rs::{
    Dictionary, EnglishTerm, Gender, LoadOptions, MedlexError, PartOfSpeech, error::Result,
};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Bilingual medical-terminology dictionary CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a custom database file (optional)
    #[arg(long, global = true)]
    db_path: Option<String>,

    /// Set verbosity level (use -v, -vv, or -vvv for increasing verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up an English lemma and show its meanings, translations, and examples
    Lookup {
        /// The English lemma to look up (exact, case-sensitive)
        lemma: String,
        /// Emit the entry as JSON instead of formatted text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Add an entry: one meaning, one Spanish translation, optional examples
    Add {
        /// The English lemma
        lemma: String,
        /// Part of speech (noun, verb, adjective, adverb, other)
        pos: PartOfSpeech,
        /// Description of the meaning
        meaning: String,
        /// The Spanish translation
        spanish: String,
        /// Gender of the Spanish term (masculine, feminine, invariable)
        gender: Gender,
        /// Example sentence as "lang:text", e.g. "en:He had a bruise." (repeatable)
        #[arg(long = "example", value_name = "LANG:TEXT")]
        examples: Vec<String>,
    },
    /// Delete an English entry and any part of its graph nothing else shares
    Delete {
        /// The English lemma to delete
        lemma: String,
    },
    /// Show the fixed "Basic Medical Terms" lesson
    Lesson {
        /// Emit the lesson as JSON instead of formatted text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Clear the dictionary database
    ClearDb,
}

/// Sets up logging based on verbosity level.
fn setup_logging(verbose: u8) {
    let log_level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter(None, log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if let Commands::ClearDb = cli.command {
        info!("Clearing database...");
        let db_path_to_clear = if let Some(custom_path) = cli.db_path {
            Some(PathBuf::from(custom_path))
        } else {
            Dictionary::get_default_db_path().ok()
        };

        match Dictionary::clear_database(db_path_to_clear) {
            Ok(_) => println!("{}", "Database cleared successfully.".green()),
            Err(e) => {
                error!("Failed to clear database: {}", e);
                eprintln!("{}", format!("Error clearing database: {}", e).red());
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let load_options = LoadOptions {
        db_path: cli.db_path.as_ref().map(PathBuf::from),
    };

    let dict = match Dictionary::load_with_options(load_options) {
        Ok(dict) => dict,
        Err(e) => {
            error!("Failed to open dictionary database: {}", e);
            eprintln!("{}", format!("Error: {}", e).red());
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Lookup { lemma, json } => {
            if let Err(e) = handle_lookup(&dict, &lemma, json) {
                error!("Error during lookup command: {}", e);
                eprintln!("{}", format!("Error looking up '{}': {}", lemma, e).red());
                std::process::exit(1);
            }
        }
        Commands::Add {
            lemma,
            pos,
            meaning,
            spanish,
            gender,
            examples,
        } => {
            if let Err(e) = handle_add(&dict, &lemma, pos, &meaning, &spanish, gender, &examples) {
                error!("Error during add command: {}", e);
                eprintln!("{}", format!("Error adding '{}': {}", lemma, e).red());
                std::process::exit(1);
            }
        }
        Commands::Delete { lemma } => {
            if let Err(e) = dict.delete_entry(&lemma) {
                error!("Error during delete command: {}", e);
                eprintln!("{}", format!("Error deleting '{}': {}", lemma, e).red());
                std::process::exit(1);
            }
            println!("Deleted entry '{}' (if it existed).", lemma.cyan());
        }
        Commands::Lesson { json } => handle_lesson(json),
        Commands::ClearDb => unreachable!(), // handled before the database is opened
    }

    Ok(())
}

/// Handles the lookup command by fetching and displaying an entry graph.
fn handle_lookup(dict: &Dictionary, lemma: &str, json: bool) -> Result<()> {
    info!("Looking up lemma: '{}'", lemma);
    match dict.lookup_english(lemma)? {
        Some(entry) => print_entry(&entry, json),
        None => {
            println!("No entry found for '{}'.", lemma.yellow());
            Ok(())
        }
    }
}

/// Handles the add command and displays the committed graph.
fn handle_add(
    dict: &Dictionary,
    lemma: &str,
    pos: PartOfSpeech,
    meaning: &str,
    spanish: &str,
    gender: Gender,
    raw_examples: &[String],
) -> Result<()> {
    let mut examples = Vec::with_capacity(raw_examples.len());
    for raw in raw_examples {
        let Some((lang, text)) = raw.split_once(':') else {
            return Err(MedlexError::Validation(format!(
                "example must be \"lang:text\", got '{}'",
                raw
            )));
        };
        examples.push((lang.to_string(), text.to_string()));
    }

    let entry = dict.add_entry(lemma, pos, meaning, spanish, gender, &examples)?;
    println!("{}", "Entry added.".green());
    print_entry(&entry, false)
}

/// Prints an entry graph, either as colored text or as the JSON projection.
fn print_entry(entry: &EnglishTerm, json: bool) -> Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(entry)
            .map_err(|e| MedlexError::Internal(format!("JSON serialization failed: {}", e)))?;
        println!("{}", rendered);
        return Ok(());
    }

    println!(
        "\n{} ~ {}",
        entry.term.bold().cyan(),
        entry.pos.to_string().italic()
    );
    for (i, meaning) in entry.meanings.iter().enumerate() {
        println!("  {}: {}", (i + 1).to_string().bold(), meaning.description);
        for spanish in &meaning.spanish_terms {
            println!(
                "        {}: {} ({})",
                "es".magenta(),
                spanish.term.green(),
                spanish.gender
            );
        }
        for example in &meaning.examples {
            println!("        [{}] {}", example.language, example.text.italic());
        }
    }
    println!();
    Ok(())
}

/// Prints the fixed starter lesson. Content is static by design; it lives
/// outside the persistence core.
fn handle_lesson(json: bool) {
    let terms = [
        ("fever", "fiebre", "noun"),
        ("cough", "tos", "noun"),
        ("headache", "dolor de cabeza", "noun"),
    ];

    if json {
        let lesson = serde_json::json!({
            "lesson_title": "Basic Medical Terms",
            "terms": terms
                .iter()
                .map(|(english, spanish, pos)| {
                    serde_json::json!({
                        "english": english,
                        "spanish": spanish,
                        "pos": pos,
                    })
                })
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&lesson).unwrap());
        return;
    }

    println!("\n{}", "Basic Medical Terms".bold().cyan());
    for (english, spanish, pos) in terms {
        println!(
            "  {} ~ {} ({})",
            english.bold(),
            spanish.green(),
            pos.italic()
        );
    }
    println!();
}
