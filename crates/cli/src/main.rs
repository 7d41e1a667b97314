//! CLI tool for generating the Impact3 AI audit presentation.

mod audit;

use anyhow::{Context, Result};
use clap::Parser;
use deck_pptx::PptxWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Generate the Impact3 AI & Automation Audit deck as a .pptx file.
#[derive(Parser, Debug)]
#[command(name = "audit-deck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output file (default: ~/Documents/Impact3_AI_Audit_Presentation.pptx)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the deck as JSON instead of writing a file
    #[arg(long)]
    outline: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if args.outline {
        return match print_outline() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e:#}");
                ExitCode::FAILURE
            }
        };
    }

    match run(&args) {
        Ok(path) => {
            println!("✓ Presentation saved successfully!");
            println!("  Location: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("✗ Error creating presentation: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Build the deck and save it, returning where it was written.
fn run(args: &Args) -> Result<PathBuf> {
    let output_path = match &args.output {
        Some(path) => path.clone(),
        None => default_output_path()?,
    };

    let deck = audit::build_deck();
    log::debug!("Built {} slides", deck.slide_count());

    save_deck(&deck, &output_path)?;

    Ok(output_path)
}

/// `~/Documents/<DEFAULT_FILE_NAME>`.
fn default_output_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join("Documents").join(audit::DEFAULT_FILE_NAME))
}

fn save_deck(deck: &deck_core::Deck, path: &Path) -> Result<()> {
    PptxWriter::new()
        .save(deck, path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn print_outline() -> Result<()> {
    let deck = audit::build_deck();
    let json = serde_json::to_string_pretty(&deck).context("Failed to serialize deck")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_pptx::PptxReader;
    use tempfile::TempDir;

    fn args_with_output(path: PathBuf) -> Args {
        Args {
            output: Some(path),
            outline: false,
            verbose: false,
        }
    }

    #[test]
    fn test_default_path_is_in_documents() {
        let Ok(path) = default_output_path() else {
            // no home directory in this environment
            return;
        };
        assert!(path.ends_with("Documents/Impact3_AI_Audit_Presentation.pptx"));
    }

    #[test]
    fn test_run_writes_readable_deck() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("audit.pptx");

        let written = run(&args_with_output(path.clone())).unwrap();
        assert_eq!(written, path);

        let outline = PptxReader::new().open(&path).unwrap();
        assert_eq!(outline.slides.len(), audit::SLIDE_COUNT);
        assert_eq!(outline.metadata.author, "Reprise AI");
        assert_eq!(
            outline.slides[0].title(),
            Some("Impact3 AI & Automation Audit")
        );
        assert_eq!(outline.slides[27].title(), Some("Ready to Scale Impact3 Intelligently"));
    }

    #[test]
    fn test_run_reports_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("audit.pptx");

        let err = run(&args_with_output(path.clone())).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to write"));
        assert!(!path.exists());
    }

    #[test]
    fn test_outline_serializes() {
        let json = serde_json::to_value(audit::build_deck()).unwrap();
        assert_eq!(json["slides"].as_array().map(Vec::len), Some(28));
        assert_eq!(json["metadata"]["title"], "Impact3 AI & Automation Audit");
    }
}
