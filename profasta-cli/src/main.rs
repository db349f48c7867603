//! profasta - command-line tools for protein FASTA files.
//!
//! ## Usage
//!
//! ```bash
//! profasta check proteins.fasta --strict
//! profasta headers proteins.fasta --parser uniprot
//! profasta convert in.fasta out.fasta --parser uniprot_like --writer uniprot
//! profasta decoy in.fasta decoy.fasta --prefix rev_
//! ```
//!
//! Logging goes to stderr; `RUST_LOG` overrides the level set by `-v`.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::{debug, warn};

use profasta_core::decoy::{create_decoy_db, DecoyOptions};
use profasta_core::io::fasta::read_fasta_path;
use profasta_core::io::OnError;
use profasta_core::{AddFastaOptions, ParserRegistry, ProteinDatabase, WriteFastaOptions};

/// Parse, check and rewrite protein FASTA files
#[derive(Parser, Debug)]
#[command(name = "profasta", version, about)]
struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count valid and invalid records
    Check {
        fasta: PathBuf,

        /// Fail if any sequence is invalid
        #[arg(long)]
        strict: bool,
    },

    /// Print the parsed header fields of every record as TSV
    Headers {
        fasta: PathBuf,

        /// Header parser name
        #[arg(short, long, default_value = "default")]
        parser: String,

        /// Skip records with invalid sequences or unparsable headers
        #[arg(long)]
        skip_invalid: bool,
    },

    /// Import a FASTA file and write it back out
    Convert {
        input: PathBuf,
        output: PathBuf,

        /// Header parser name
        #[arg(short, long, default_value = "default")]
        parser: String,

        /// Regenerate headers with this parser instead of keeping the originals
        #[arg(short, long)]
        writer: Option<String>,

        /// Sequence characters per line, -1 for no wrapping
        #[arg(long, default_value_t = 60, allow_negative_numbers = true)]
        line_width: i64,

        /// Append to the output file
        #[arg(long)]
        append: bool,

        /// Skip records with invalid sequences or unparsable headers
        #[arg(long)]
        skip_invalid: bool,
    },

    /// Write reversed decoy sequences
    Decoy {
        input: PathBuf,
        output: PathBuf,

        /// Header parser name
        #[arg(short, long, default_value = "default")]
        parser: String,

        /// Keep the N-terminal residue in place
        #[arg(long)]
        keep_nterm: bool,

        /// Also reverse an N-terminal methionine
        #[arg(long)]
        no_keep_nterm_methionine: bool,

        /// Prefix for decoy identifiers and headers
        #[arg(long)]
        prefix: Option<String>,

        /// Sequence characters per line, -1 for no wrapping
        #[arg(long, default_value_t = 60, allow_negative_numbers = true)]
        line_width: i64,
    },
}

fn line_width(width: i64) -> Option<usize> {
    usize::try_from(width).ok().filter(|&w| w > 0)
}

fn on_error(skip_invalid: bool) -> OnError {
    if skip_invalid {
        OnError::Skip
    } else {
        OnError::Raise
    }
}

fn load_db(
    path: &Path,
    parser: &str,
    registry: &ParserRegistry,
    skip_invalid: bool,
) -> Result<ProteinDatabase> {
    let mut db = ProteinDatabase::new();
    let options = AddFastaOptions {
        on_error: on_error(skip_invalid),
        ..Default::default()
    };
    db.add_fasta(path, parser, registry, &options)
        .with_context(|| format!("Failed to import {}", path.display()))?;
    Ok(db)
}

fn run_check(fasta: &Path, strict: bool) -> Result<()> {
    let records = read_fasta_path(fasta, strict)
        .with_context(|| format!("Failed to read {}", fasta.display()))?;
    let total = records.total();
    let invalid = records.skipped().len();
    println!(
        "{}: {} valid, {} invalid of {} records",
        fasta.display(),
        total - invalid,
        invalid,
        total
    );
    Ok(())
}

fn run_headers(
    fasta: &Path,
    parser_name: &str,
    registry: &ParserRegistry,
    skip_invalid: bool,
) -> Result<()> {
    let parser = registry.get(parser_name)?;
    let records = read_fasta_path(fasta, !skip_invalid)
        .with_context(|| format!("Failed to read {}", fasta.display()))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for record in records {
        let parsed = match parser.parse(record.header()) {
            Ok(parsed) => parsed,
            Err(err) if skip_invalid => {
                warn!("{err}");
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        write!(out, "{}", parsed.identifier)?;
        for (key, value) in parsed.fields.iter() {
            write!(out, "\t{key}={value}")?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let registry = ParserRegistry::new();
    debug!("header parsers: {:?}", registry.names());

    match cli.command {
        Command::Check { fasta, strict } => run_check(&fasta, strict),
        Command::Headers {
            fasta,
            parser,
            skip_invalid,
        } => run_headers(&fasta, &parser, &registry, skip_invalid),
        Command::Convert {
            input,
            output,
            parser,
            writer,
            line_width: width,
            append,
            skip_invalid,
        } => {
            let db = load_db(&input, &parser, &registry, skip_invalid)?;
            let options = WriteFastaOptions {
                append,
                header_writer: writer,
                line_width: line_width(width),
            };
            db.write_fasta(&output, &registry, &options)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            eprintln!("Wrote {} entries to {}", db.len(), output.display());
            Ok(())
        }
        Command::Decoy {
            input,
            output,
            parser,
            keep_nterm,
            no_keep_nterm_methionine,
            prefix,
            line_width: width,
        } => {
            let db = load_db(&input, &parser, &registry, false)?;
            let options = DecoyOptions {
                keep_nterm,
                keep_nterm_methionine: !no_keep_nterm_methionine,
                prefix,
            };
            let decoy = create_decoy_db(&db, &options)?;
            let write_options = WriteFastaOptions {
                line_width: line_width(width),
                ..Default::default()
            };
            decoy
                .write_fasta(&output, &registry, &write_options)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            eprintln!("Wrote {} decoy entries to {}", decoy.len(), output.display());
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    run(cli)
}
