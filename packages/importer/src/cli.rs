//! Command-line interface for the importer.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use sqlx::{Connection, PgConnection};

use crate::config::{expand_inputs, ImportConfig};
use crate::diagnostics::{DiagnosticSink, LogFileSink, TracingSink};
use crate::error::{ImportError, Result};
use crate::importer::{dry_run_file, import_file, ImportReport};

/// RÚIAN Import - Load exchange format (VFR) documents into PostgreSQL.
#[derive(Parser)]
#[command(name = "ruian-import")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import documents, each in its own transaction.
    Import {
        /// Document files or directories containing them
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// PostgreSQL connection string (default: $DATABASE_URL)
        #[arg(long)]
        database_url: Option<String>,

        /// Write unknown-element diagnostics to this file instead of the log
        #[arg(short, long)]
        log_file: Option<PathBuf>,

        /// Convert without connecting to a database
        #[arg(long)]
        dry_run: bool,
    },
}

/// Run the CLI.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Import {
            inputs,
            database_url,
            log_file,
            dry_run,
        } => import_command(&inputs, database_url, log_file, dry_run).await,
    }
}

/// Execute the import command.
async fn import_command(
    inputs: &[PathBuf],
    database_url: Option<String>,
    log_file: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    // Validate inputs before connecting
    let files = expand_inputs(inputs)?;
    if files.is_empty() {
        return Err(ImportError::InvalidInput(format!(
            "{} (no documents found)",
            inputs
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    let mut connection = if dry_run {
        None
    } else {
        let config = match database_url {
            Some(url) => ImportConfig::new(url),
            None => ImportConfig::from_env()?,
        };
        Some(PgConnection::connect(&config.database_url).await?)
    };

    match log_file {
        Some(path) => {
            let mut sink = LogFileSink::create(&path)?;
            let result = import_files(&files, connection.as_mut(), &mut sink).await;
            sink.flush();
            result
        }
        None => {
            let mut sink = TracingSink::new();
            import_files(&files, connection.as_mut(), &mut sink).await
        }
    }
}

async fn import_files(
    files: &[PathBuf],
    mut connection: Option<&mut PgConnection>,
    sink: &mut dyn DiagnosticSink,
) -> Result<()> {
    let verb = if connection.is_some() {
        "Importing"
    } else {
        "Converting (dry run)"
    };
    println!(
        "{} {} document(s)",
        style(verb).bold(),
        style(files.len()).cyan()
    );
    println!();

    // Create progress spinner
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    for file in files {
        pb.set_message(format!("{}", file.display()));

        let result = match connection.as_deref_mut() {
            Some(conn) => import_file(file, conn, sink).await,
            None => dry_run_file(file, sink).await,
        };

        match result {
            Ok(report) => pb.suspend(|| println!("{}", report_line(&report))),
            Err(e) => {
                pb.finish_and_clear();
                eprintln!("{} {}", style("Failed:").red().bold(), file.display());
                return Err(e);
            }
        }
    }

    pb.finish_and_clear();

    println!();
    println!(
        "{} {} document(s)",
        style("Done:").green().bold(),
        files.len()
    );

    Ok(())
}

fn report_line(report: &ImportReport) -> String {
    let mut line = format!(
        "  {} {} statements in {:.1?}",
        style(file_name(&report.file)).green(),
        report.statements,
        report.elapsed
    );
    if report.diagnostics > 0 {
        line.push_str(&format!(
            ", unknown elements: {}",
            style(report.diagnostics).yellow().bold()
        ));
    }
    line
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_import() {
        let cli = Cli::parse_from(["ruian-import", "import", "20240131_ST_UZSZ.xml"]);

        let Commands::Import {
            inputs,
            database_url,
            log_file,
            dry_run,
        } = cli.command;
        assert_eq!(inputs, vec![PathBuf::from("20240131_ST_UZSZ.xml")]);
        assert!(database_url.is_none());
        assert!(log_file.is_none());
        assert!(!dry_run);
    }

    #[test]
    fn test_cli_parse_import_with_options() {
        let cli = Cli::parse_from([
            "ruian-import",
            "import",
            "a.xml",
            "changes/",
            "--database-url",
            "postgres://localhost/ruian",
            "--log-file",
            "import.log",
            "--dry-run",
        ]);

        let Commands::Import {
            inputs,
            database_url,
            log_file,
            dry_run,
        } = cli.command;
        assert_eq!(inputs.len(), 2);
        assert_eq!(database_url, Some("postgres://localhost/ruian".to_string()));
        assert_eq!(log_file, Some(PathBuf::from("import.log")));
        assert!(dry_run);
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["ruian-import", "import"]).is_err());
    }
}
