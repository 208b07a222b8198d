//! Non-interactive command dispatcher behind `cheque_core_cli`.

use colored::Colorize;
use std::{fmt, fs, io::Write, path::Path};

use crate::{
    config::{Config, ConfigManager},
    core::services::{
        AccountingService, EntryOutcome, EntryPlan, LifecycleValidator, ServiceError,
    },
    core::ChequeManager,
    domain::{cheque::Cheque, ChequeStatus, Displayable},
    errors::StoreError,
    storage::{JsonStore, TracingNotifier},
    utils::build_info,
};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Invalid cheque document: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("{0}")]
    Rejected(String),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum MessageKind {
    Success,
    Warning,
    Section,
}

fn styled(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Success => format!("OK: {text}").green().to_string(),
        MessageKind::Warning => format!("WARNING: {text}").yellow().to_string(),
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
    }
}

pub const USAGE: &str = "Usage: cheque_core_cli <command>\n\
Commands:\n  \
validate <cheque.json> [previous.json]\n  \
entries <cheque.json>\n  \
save <cheque.json>\n  \
post <cheque-name>\n  \
transitions <status>\n  \
version";

/// Entry point used by the binary: reads process arguments and the stored configuration.
pub fn run_cli() -> CliResult<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = ConfigManager::new()?.load()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_args(&args, &config, &mut out)
}

pub fn run_with_args<W: Write>(args: &[String], config: &Config, out: &mut W) -> CliResult<()> {
    let mut args = args.iter().map(String::as_str);
    let command = args.next().ok_or_else(usage)?;

    match command {
        "validate" => {
            let path = args.next().ok_or_else(usage)?;
            let cheque = read_cheque(Path::new(path))?;
            let previous = args.next().map(|p| read_cheque(Path::new(p))).transpose()?;
            match LifecycleValidator::validate(
                previous.as_ref(),
                &cheque,
                &config.cash_location_keywords,
            ) {
                Ok(()) => {
                    writeln!(out, "{}", styled(MessageKind::Success, cheque.display_label()))?;
                }
                Err(err) => return Err(CliError::Rejected(err.to_string())),
            }
        }
        "entries" => {
            let path = args.next().ok_or_else(usage)?;
            let cheque = read_cheque(Path::new(path))?;
            writeln!(out, "{}", styled(MessageKind::Section, cheque.display_label()))?;
            match AccountingService::plan(&cheque, &config.accounts, &config.cash_location_keywords)
            {
                EntryPlan::Entries(entries) => {
                    for entry in &entries {
                        writeln!(
                            out,
                            "{:<28} {:>14} {:>14}",
                            entry.account,
                            format_amount(entry.debit),
                            format_amount(entry.credit)
                        )?;
                    }
                }
                EntryPlan::Unhandled {
                    category,
                    status,
                    cheque_type,
                } => {
                    writeln!(
                        out,
                        "{}",
                        styled(
                            MessageKind::Warning,
                            format!("no accounting rule for {category} {cheque_type} cheque in {status}")
                        )
                    )?;
                }
            }
        }
        "save" => {
            let path = args.next().ok_or_else(usage)?;
            let mut cheque = read_cheque(Path::new(path))?;
            let mut manager = open_manager(config)?;
            let name = manager.save_cheque(&mut cheque)?;
            let saved = format!("{name} saved as {}", cheque.current_status);
            writeln!(out, "{}", styled(MessageKind::Success, saved))?;
        }
        "post" => {
            let name = args.next().ok_or_else(usage)?;
            let mut manager = open_manager(config)?;
            let message = match manager.create_accounting_entries(name)? {
                EntryOutcome::Created(rows) => styled(
                    MessageKind::Success,
                    format!("{rows} accounting entries created for {name}"),
                ),
                EntryOutcome::AlreadyPresent => styled(
                    MessageKind::Warning,
                    format!("{name} already has accounting entries"),
                ),
                EntryOutcome::Unhandled {
                    category,
                    status,
                    cheque_type,
                } => styled(
                    MessageKind::Warning,
                    format!("no accounting rule for {category} {cheque_type} cheque in {status}"),
                ),
            };
            writeln!(out, "{message}")?;
        }
        "transitions" => {
            let raw: Vec<&str> = args.collect();
            if raw.is_empty() {
                return Err(usage());
            }
            let status: ChequeStatus = raw.join(" ").parse().map_err(CliError::Usage)?;
            let next = status.successors();
            if next.is_empty() {
                writeln!(out, "{status}: terminal")?;
            } else {
                let labels: Vec<&str> = next.iter().map(ChequeStatus::label).collect();
                writeln!(out, "{status} -> {}", labels.join(", "))?;
            }
        }
        "version" => {
            writeln!(out, "{}", build_info::current().summary())?;
        }
        _ => return Err(usage()),
    }

    Ok(())
}

/// Manager over the JSON store in the data directory (`CHEQUE_CORE_HOME` or `~/.cheque_core`).
fn open_manager(config: &Config) -> CliResult<ChequeManager> {
    let store = JsonStore::new(None)?;
    Ok(ChequeManager::new(
        Box::new(store),
        Box::new(TracingNotifier),
        config.clone(),
    ))
}

fn usage() -> CliError {
    CliError::Usage(USAGE.to_string())
}

fn read_cheque(path: &Path) -> CliResult<Cheque> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn format_amount(value: rust_decimal::Decimal) -> String {
    if value.is_zero() {
        "-".into()
    } else {
        format!("{:.2}", value)
    }
}
