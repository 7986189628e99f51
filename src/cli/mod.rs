//! Command-line interface for claimcause.
//!
//! Provides commands for extracting a claim from a model answer,
//! inspecting the extraction record log, and showing configuration.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};

use crate::claims::{classify_answer, Extraction};
use crate::records::{ExtractionRecord, RecordStore};

pub mod records;

/// claimcause - Claim attribution via logit causality
#[derive(Parser, Debug)]
#[command(name = "claimcause")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract the factual claim from a model answer
    Extract {
        /// Answer file (reads from stdin if not provided)
        #[arg(short, long, conflicts_with = "text")]
        input: Option<PathBuf>,

        /// Answer text given inline
        #[arg(short, long)]
        text: Option<String>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,

        /// Append the outcome to the record log
        #[arg(short, long)]
        record: bool,
    },

    /// Inspect recorded extractions
    Records {
        #[command(subcommand)]
        command: records::RecordCommands,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Extract {
                input,
                text,
                json,
                record,
            } => extract(input, text, json, record).await,
            Commands::Records { command } => records::execute(command).await,
            Commands::Config => show_config().await,
        }
    }
}

/// Read the answer from a file, inline text, or piped stdin
async fn read_answer(input_file: Option<PathBuf>, text: Option<String>) -> Result<String> {
    let answer = if let Some(text) = text {
        text
    } else if let Some(path) = input_file {
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read input file: {}", path.display()))?
    } else if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else {
        anyhow::bail!("No answer provided. Use --text, --input <file>, or pipe to stdin");
    };

    let limit = crate::config::config()?.max_input_size_bytes;
    if answer.len() > limit {
        anyhow::bail!(
            "Answer too large: {} bytes exceeds limit of {} bytes",
            answer.len(),
            limit
        );
    }

    Ok(answer)
}

/// Execute the `extract` command
async fn extract(
    input_file: Option<PathBuf>,
    text: Option<String>,
    json: bool,
    record: bool,
) -> Result<()> {
    let answer = read_answer(input_file, text).await?;
    let extraction = classify_answer(&answer);

    if record {
        let store = RecordStore::open_default()?;
        let entry = ExtractionRecord::new(&answer, &extraction, Utc::now().to_rfc3339());
        if store.append(&entry)? {
            eprintln!("[Recorded {}]", entry.id);
        } else {
            eprintln!("[Already recorded {}]", entry.id);
        }
    }

    if json {
        let out = serde_json::to_string_pretty(&extraction)
            .context("Failed to serialize extraction")?;
        println!("{}", out);
        return Ok(());
    }

    // Refusal is an expected outcome, so it exits successfully
    match &extraction {
        Extraction::Accepted { claim, rule } => {
            println!("{}", claim.text());
            eprintln!("[{} claim via {} rule]", claim.claim_type(), rule.as_str());
        }
        Extraction::Refused { reason } => {
            println!("no claim ({})", reason.as_str());
        }
    }

    Ok(())
}

/// Execute the `config` command
async fn show_config() -> Result<()> {
    let cfg = crate::config::config()?;

    println!("claimcause configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:        {}", cfg.home.display());
    println!("  Record log:  {}", cfg.records_path().display());
    println!();
    println!("Limits:");
    println!("  Max input size: {} bytes", cfg.max_input_size_bytes);
    println!();
    println!("Extraction rules (fixed):");
    println!(
        "  Short answer: <= {} tokens",
        crate::claims::SHORT_ANSWER_MAX_TOKENS
    );
    println!(
        "  Declarative:  ends with '{}'",
        crate::claims::DECLARATIVE_TERMINATOR
    );

    Ok(())
}
