//! Record CLI subcommands for inspecting the extraction log.
//!
//! Provides commands to:
//! - `show`: Display one record in detail
//! - `list`: List recent records

use anyhow::Result;
use clap::Subcommand;

use crate::records::{ExtractionRecord, RecordStore};

/// Record-related subcommands
#[derive(Subcommand, Debug)]
pub enum RecordCommands {
    /// Show details of a record
    Show {
        /// Record ID (or prefix)
        record_id: String,
    },

    /// List recent records
    List {
        /// Maximum number of records to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}

/// Execute record subcommands
pub async fn execute(command: RecordCommands) -> Result<()> {
    let store = RecordStore::open_default()?;

    match command {
        RecordCommands::Show { record_id } => match store.find(&record_id)? {
            Some(record) => {
                display_record(&record);
                Ok(())
            }
            None => anyhow::bail!("Record not found: {}", record_id),
        },
        RecordCommands::List { limit } => {
            let records = store.recent(limit)?;
            if records.is_empty() {
                println!("No records in {}", store.path().display());
                return Ok(());
            }

            for record in &records {
                println!("{}", summary_line(record));
            }
            Ok(())
        }
    }
}

fn summary_line(record: &ExtractionRecord) -> String {
    let detail = match (&record.claim, record.reason) {
        (Some(claim), _) => claim.text().to_string(),
        (None, Some(reason)) => format!("({})", reason.as_str()),
        (None, None) => String::new(),
    };

    format!(
        "{}  {:<8}  {}  {}",
        record.id,
        record.status.as_str(),
        record.ts,
        detail
    )
}

fn display_record(record: &ExtractionRecord) {
    println!("Record ID:   {}", record.id);
    println!("Status:      {}", record.status.as_str());
    println!("Answer hash: {}", record.answer_sha256);
    println!("Timestamp:   {}", record.ts);

    if let Some(rule) = record.rule {
        println!("Rule:        {}", rule.as_str());
    }
    if let Some(reason) = record.reason {
        println!("Reason:      {}", reason.as_str());
    }

    if let Some(claim) = &record.claim {
        println!();
        println!("Claim:");
        println!("  {}", claim.text());
        println!("  type: {}", claim.claim_type());
        if claim.is_tokenized() {
            println!("  token ids: {:?}", claim.token_ids());
        } else {
            println!("  token ids: (not tokenized)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::classify_answer;

    #[test]
    fn test_summary_line() {
        let accepted = ExtractionRecord::new("Paris", &classify_answer("Paris"), "t".into());
        let line = summary_line(&accepted);
        assert!(line.starts_with(&accepted.id));
        assert!(line.contains("accepted"));
        assert!(line.ends_with("Paris"));

        let refused = ExtractionRecord::new("  ", &classify_answer("  "), "t".into());
        assert!(summary_line(&refused).ends_with("(empty)"));
    }
}
