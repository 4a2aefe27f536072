mod cli;
mod config;
mod dictionary;
mod error;
mod matching;
mod report;
mod scoring;
mod session;
mod topics;
mod types;

use crate::error::CovcheckError;
use crate::session::CoverageSession;
use crate::topics::SemanticInput;
use clap::Parser;
use std::io::BufRead;
use std::path::{Path, PathBuf};

pub mod exit_code {
    pub const COMPLETE: i32 = 0;
    pub const PARTIAL: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 2;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_session(
    config_path: Option<&Path>,
    checklist: Option<cli::ChecklistArg>,
    policy: Option<cli::PolicyArg>,
) -> Result<CoverageSession, CovcheckError> {
    let loaded = config::load_config(Path::new("."), config_path)?;
    let checklist = config::resolve_checklist(loaded.as_ref(), checklist.map(Into::into))?;
    let policy = config::resolve_policy(loaded.as_ref(), policy.map(Into::into));
    let settings = loaded
        .as_ref()
        .map(|cfg| cfg.scoring_settings())
        .unwrap_or_default();
    Ok(CoverageSession::new(checklist, policy, settings))
}

fn apply_topics_file(session: &mut CoverageSession, path: Option<&PathBuf>) -> Result<(), CovcheckError> {
    let input = match path {
        Some(path) => {
            let payload = std::fs::read_to_string(path)?;
            SemanticInput::Topics(topics::parse_signals(&payload)?)
        }
        None => SemanticInput::NoSignal,
    };
    session.apply_topics(input);
    Ok(())
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn run() -> Result<i32, CovcheckError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Score(cmd) => {
            if !cmd.path.exists() {
                return Err(CovcheckError::PathNotFound(cmd.path.display().to_string()));
            }
            let mut session =
                build_session(cmd.config.as_deref(), cmd.checklist, cmd.policy)?;
            let transcript = std::fs::read_to_string(&cmd.path)?;
            session.ingest(&transcript, true);
            apply_topics_file(&mut session, cmd.topics.as_ref())?;

            let coverage = session.report();
            let rendered = report::render(&coverage, output_format(&cmd.format))?;
            println!("{rendered}");

            if coverage.fully_complete() {
                Ok(exit_code::COMPLETE)
            } else {
                Ok(exit_code::PARTIAL)
            }
        }
        cli::Commands::Stream(cmd) => {
            let mut session =
                build_session(cmd.config.as_deref(), cmd.checklist, cmd.policy)?;

            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = line?;
                session.ingest(&line, true);
            }
            apply_topics_file(&mut session, cmd.topics.as_ref())?;

            let coverage = session.report();
            let rendered = report::render(&coverage, output_format(&cmd.format))?;
            println!("{rendered}");

            if coverage.fully_complete() {
                Ok(exit_code::COMPLETE)
            } else {
                Ok(exit_code::PARTIAL)
            }
        }
        cli::Commands::Checklists(cmd) => {
            let kinds: Vec<types::checklist::ChecklistKind> = match cmd.checklist {
                Some(kind) => vec![kind.into()],
                None => types::checklist::ChecklistKind::all().to_vec(),
            };
            for kind in kinds {
                let checklist = dictionary::builtin(kind);
                println!("{} ({} items)", checklist.name, checklist.items.len());
                for item in &checklist.items {
                    println!(
                        "  - {}: {} [{} keywords]",
                        item.id,
                        item.text,
                        item.keywords.len()
                    );
                }
            }
            Ok(exit_code::COMPLETE)
        }
        cli::Commands::Validate(cmd) => {
            config::load_config(Path::new("."), Some(&cmd.path))?;
            println!("config ok: {}", cmd.path.display());
            Ok(exit_code::COMPLETE)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(error) => {
            eprintln!("error: {}", error);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
