use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use highest_scores::{parse_limit, render, scan_path, ErrorClass, OutputStyle, ScoresError};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_USAGE: u8 = 1;
const EXIT_NOT_FOUND: u8 = 1;
const EXIT_INVALID_INPUT: u8 = 2;
const EXIT_UNEXPECTED: u8 = 3;

#[derive(Parser)]
#[command(name = "highest")]
#[command(about = "Print the N highest-scoring records of a file as JSON", long_about = None)]
#[command(version)]
struct Cli {
    /// Input file with one `<score>: <JSON object>` record per line.
    /// `-` reads stdin; use `./-` for a file literally named `-`.
    input_file: PathBuf,

    /// Number of records to keep (positive integer)
    #[arg(value_name = "N", allow_negative_numbers = true)]
    n: String,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Quiet mode: log only errors (stdout is reserved for JSON)
    #[arg(short, long)]
    quiet: bool,

    /// Print the result on a single line
    #[arg(long, conflicts_with = "indent")]
    compact: bool,

    /// Indentation width for pretty-printed output
    #[arg(long, value_name = "WIDTH", default_value_t = highest_scores::DEFAULT_INDENT)]
    indent: usize,
}

impl Cli {
    fn output_style(&self) -> OutputStyle {
        if self.compact {
            OutputStyle::Compact
        } else {
            OutputStyle::Pretty {
                indent: self.indent,
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version also land here and are not failures.
            let code = if err.use_stderr() { EXIT_USAGE } else { 0 };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn run(cli: &Cli) -> Result<()> {
    let limit = parse_limit(&cli.n)?;
    let selection = scan_path(&cli.input_file, limit)?;
    log::info!(
        "selected {} of {} records from {}",
        selection.records.len(),
        selection.stats.offered,
        cli.input_file.display()
    );
    let rendered = render(&selection.records, cli.output_style())?;
    print_stdout(&rendered).context("failed to write result to stdout")
}

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

/// The one place where failures become process exit codes.
fn exit_code(err: &anyhow::Error) -> u8 {
    let Some(err) = err.downcast_ref::<ScoresError>() else {
        return EXIT_UNEXPECTED;
    };
    match err.class() {
        ErrorClass::Usage => EXIT_USAGE,
        ErrorClass::NotFound => EXIT_NOT_FOUND,
        ErrorClass::Format | ErrorClass::Schema => EXIT_INVALID_INPUT,
        ErrorClass::Unexpected => EXIT_UNEXPECTED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn maps_error_classes_to_exit_codes() {
        let usage = anyhow::Error::from(ScoresError::InvalidLimit("0".to_string()));
        assert_eq!(exit_code(&usage), 1);

        let schema = anyhow::Error::from(ScoresError::Line {
            line: 1,
            source: highest_scores::LineError::MissingId,
        });
        assert_eq!(exit_code(&schema), 2);

        let io = anyhow::Error::from(ScoresError::Io(io::Error::other("boom")));
        assert_eq!(exit_code(&io), 3);

        assert_eq!(exit_code(&anyhow::anyhow!("something else")), 3);
    }

    #[test]
    fn compact_flag_selects_compact_style() {
        let cli = Cli::try_parse_from(["highest", "in.txt", "3", "--compact"]).unwrap();
        assert_eq!(cli.output_style(), OutputStyle::Compact);

        let cli = Cli::try_parse_from(["highest", "in.txt", "3", "--indent", "5"]).unwrap();
        assert_eq!(cli.output_style(), OutputStyle::Pretty { indent: 5 });
    }

    #[test]
    fn negative_limit_reaches_validation() {
        let cli = Cli::try_parse_from(["highest", "in.txt", "-2"]).unwrap();
        assert_eq!(cli.n, "-2");
    }
}
