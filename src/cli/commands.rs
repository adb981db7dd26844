//! CLI command implementations
//!
//! Each command returns its report as a JSON value; `run_command` prints
//! it. Errors go to the caller and end the process.

use std::path::Path;

use serde_json::{json, Value};

use crate::config::DtausConfig;
use crate::container::{ByteContainer, FileContainer};
use crate::diagnostics::Diagnostics;
use crate::layout::Format;
use crate::observability::{Logger, Severity};
use crate::physical::{Collaborators, PhysicalFile};
use crate::types::{Header, Transaction};

use super::args::{Cli, Command};
use super::errors::CliResult;
use super::io::{read_document, write_response};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    if cli.verbose {
        Logger::set_min_severity(Severity::Info);
    }
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let report = match cmd {
        Command::Info { file, config } => info(&file, config.as_deref())?,
        Command::Check {
            file,
            lenient,
            config,
        } => check(&file, lenient, config.as_deref())?,
        Command::Create {
            file,
            format,
            header,
            config,
        } => create(&file, format.into(), &header, config.as_deref())?,
        Command::Add {
            file,
            transaction,
            logical_file,
            config,
        } => add(&file, &transaction, logical_file, config.as_deref())?,
    };
    write_response(report)
}

fn collaborators(config: Option<&Path>) -> CliResult<Collaborators> {
    let config = match config {
        Some(path) => DtausConfig::load(path)?,
        None => DtausConfig::default(),
    };
    Ok(Collaborators::default().with_config(config))
}

fn describe<C: ByteContainer>(physical: &mut PhysicalFile<C>) -> CliResult<Value> {
    let mut files = Vec::with_capacity(physical.logical_file_count());
    for i in 0..physical.logical_file_count() {
        let logical = physical.logical_file(i)?;
        files.push(json!({
            "index": i,
            "header_position": logical.header_position(),
            "checksum_position": logical.checksum_position(),
            "header": logical.header(),
            "checksum": logical.checksum(),
            "currencies": logical
                .currency_counter()
                .currencies()
                .map(|c| c.to_string())
                .collect::<Vec<_>>(),
        }));
    }
    Ok(json!({
        "format": physical.format().as_str(),
        "length": physical.container().len(),
        "logical_files": files,
    }))
}

/// Format, headers and checksums of every logical file
pub fn info(path: &Path, config: Option<&Path>) -> CliResult<Value> {
    let container = FileContainer::open_read_only(path)?;
    let mut diagnostics = Diagnostics::strict();
    let mut physical = PhysicalFile::open_with(container, collaborators(config)?, &mut diagnostics)?;
    describe(&mut physical)
}

/// Full scan of a file.
///
/// Strict mode fails on the first problem. Lenient mode reads every
/// transaction and reports all collected messages.
pub fn check(path: &Path, lenient: bool, config: Option<&Path>) -> CliResult<Value> {
    let container = FileContainer::open_read_only(path)?;
    let mut diagnostics = if lenient {
        Diagnostics::lenient()
    } else {
        Diagnostics::strict()
    };
    let mut physical = PhysicalFile::open_with(container, collaborators(config)?, &mut diagnostics)?;

    let mut transactions = 0;
    for i in 0..physical.logical_file_count() {
        let logical = physical.logical_file(i)?;
        transactions += logical.transaction_count();
    }

    Ok(json!({
        "format": physical.format().as_str(),
        "logical_files": physical.logical_file_count(),
        "transactions": transactions,
        "valid": diagnostics.is_empty(),
        "messages": diagnostics.messages(),
        "dropped": diagnostics.dropped(),
    }))
}

/// New file with one logical file
pub fn create(path: &Path, format: Format, header: &Path, config: Option<&Path>) -> CliResult<Value> {
    let header: Header = read_document(header)?;
    let collaborators = collaborators(config)?;
    let container = FileContainer::create(path)?;
    let mut physical = PhysicalFile::create_with(container, format, collaborators)?;
    let mut diagnostics = Diagnostics::strict();
    physical.add_logical_file(&mut diagnostics, header)?;
    physical.commit()?;
    describe(&mut physical)
}

/// Appends one transaction to logical file `logical_file`
pub fn add(path: &Path, transaction: &Path, logical_file: usize, config: Option<&Path>) -> CliResult<Value> {
    let transaction: Transaction = read_document(transaction)?;
    let container = FileContainer::open(path)?;
    let mut diagnostics = Diagnostics::strict();
    let mut physical = PhysicalFile::open_with(container, collaborators(config)?, &mut diagnostics)?;
    let index = physical
        .logical_file(logical_file)?
        .add_transaction(transaction)?;
    physical.commit()?;

    let logical = physical.logical_file(logical_file)?;
    Ok(json!({
        "logical_file": logical_file,
        "index": index,
        "position": logical.transaction_position(index),
        "checksum": logical.checksum(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    use crate::validation::fixtures;

    fn write_json(dir: &TempDir, name: &str, value: &impl serde::Serialize) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_create_add_info_check() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("pay.dta");
        let header = write_json(&dir, "header.json", &fixtures::header());
        let transaction = write_json(&dir, "transaction.json", &fixtures::transaction());

        let created = create(&file, Format::Disk, &header, None).unwrap();
        assert_eq!(created["length"], 256);

        let added = add(&file, &transaction, 0, None).unwrap();
        assert_eq!(added["index"], 0);
        assert_eq!(added["position"], 128);
        assert_eq!(added["checksum"]["sum_amount"], 1000);

        let report = info(&file, None).unwrap();
        assert_eq!(report["format"], "disk");
        assert_eq!(report["logical_files"][0]["checksum"]["transaction_count"], 1);
        assert_eq!(report["logical_files"][0]["currencies"][0], "EUR");

        let report = check(&file, false, None).unwrap();
        assert_eq!(report["valid"], true);
        assert_eq!(report["transactions"], 1);
    }

    #[test]
    fn test_add_to_missing_logical_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("pay.dta");
        let header = write_json(&dir, "header.json", &fixtures::header());
        let transaction = write_json(&dir, "transaction.json", &fixtures::transaction());
        create(&file, Format::Tape, &header, None).unwrap();

        let err = add(&file, &transaction, 3, None).unwrap_err();
        assert_eq!(err.code_str(), "DTAUS_INDEX_OUT_OF_BOUNDS");
    }

    #[test]
    fn test_create_refuses_existing_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("pay.dta");
        fs::write(&file, b"x").unwrap();
        let header = write_json(&dir, "header.json", &fixtures::header());
        assert_eq!(
            create(&file, Format::Disk, &header, None).unwrap_err().code_str(),
            "DTAUS_CLI_IO_ERROR"
        );
    }
}
