use clap::{Parser as ClapParser, Subcommand};
use kmatch::cli::{self, CheckOptions, CheckResult, CliError};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "kmatch")]
#[command(about = "kmatch - match, validate, and filter JSON dictionaries with patterns")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match a JSON object against a kmatch pattern
    Check {
        /// The pattern to match, as JSON (e.g. '["<=", "f", 0]')
        pattern: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Treat missing keys as a non-match instead of an error
        #[arg(long)]
        suppress_missing_keys: bool,

        /// Treat incomparable-type comparisons as a non-match instead of an error
        #[arg(long)]
        suppress_type_errors: bool,

        /// Only validate the pattern, don't match
        #[arg(long)]
        pattern_only: bool,
    },

    /// List the field keys a pattern dereferences
    Keys {
        /// The pattern to inspect, as JSON
        pattern: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            pattern,
            input,
            suppress_missing_keys,
            suppress_type_errors,
            pattern_only,
        } => run_check(
            pattern,
            input,
            suppress_missing_keys,
            suppress_type_errors,
            pattern_only,
        ),
        Commands::Keys { pattern } => run_keys(pattern),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(
    pattern: String,
    input: Option<String>,
    suppress_missing_keys: bool,
    suppress_type_errors: bool,
    pattern_only: bool,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let options = CheckOptions {
        pattern,
        input,
        suppress_missing_keys,
        suppress_type_errors,
        pattern_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::PatternValid => println!("Pattern is valid"),
        CheckResult::Matched(matched) => println!("{}", matched),
    }
    Ok(())
}

fn run_keys(pattern: String) -> Result<(), CliError> {
    let keys = cli::list_keys(&pattern)?;
    let json = serde_json::to_string(&keys).unwrap();
    println!("{}", json);
    Ok(())
}
