use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use colored::Colorize;
use go_motion::config;
use go_motion::output::{render_error, render_result, ErrorResult, Format};
use go_motion::{Input, MotionError, ParserOptions, Query, Snapshot};
use std::env;
use std::path::PathBuf;
use std::process;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "motion")]
#[command(about = "Navigation and insight in Go source for editors", long_about = None)]
#[command(version)]
struct Cli {
    /// Filename to be parsed
    #[arg(long, conflicts_with = "dir")]
    file: Option<PathBuf>,

    /// Directory to be parsed
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Byte offset of the cursor position
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    offset: i64,

    /// Running mode. One of {enclosing, next, prev, decls, comment}
    #[arg(long)]
    mode: String,

    /// Shift value for the modes {next, prev}
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    shift: i64,

    /// Included declarations for mode {decls}, comma separated. One of {func, type}
    #[arg(long, value_delimiter = ',')]
    include: Option<Vec<String>>,

    /// Parse comments and attach docs to declarations
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    parse_comments: Option<bool>,

    /// Parse the directory recursively
    #[arg(short, long)]
    recursive: bool,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Config file (defaults to .motion.toml in the working or home directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity, repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_tracing(cli.verbose) {
        eprintln!("{} {}", "warning:".yellow(), err);
    }

    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) -> Result<()> {
    let log_level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let cwd = env::current_dir().ok();
    let config = config::load(cli.config.as_deref(), cwd.as_deref())?;

    let options = ParserOptions {
        comments: cli.parse_comments.unwrap_or(config.parse_comments),
        recursive: cli.recursive || config.recursive,
    };
    let format = cli.format.unwrap_or(config.format);

    let input = match (cli.file, cli.dir) {
        (Some(file), _) => Input::File(file),
        (None, Some(dir)) => Input::Dir(dir),
        (None, None) => Input::None,
    };
    let snapshot = Snapshot::open(&input, options)?;

    let query = Query {
        mode: cli.mode,
        offset: cli.offset,
        shift: cli.shift,
        includes: cli.include.unwrap_or(config.includes),
    };

    // Query failures go to the editor on stdout; only parse failures abort.
    let out = match snapshot.run(&query) {
        Ok(result) => render_result(&result, format).context("failed to encode result")?,
        Err(MotionError::Parse(err)) => return Err(err.into()),
        Err(err) => {
            debug!(mode = %query.mode, error = %err, "query failed");
            render_error(&ErrorResult::new(query.mode.as_str(), &err), format)
                .context("failed to encode error")?
        }
    };

    println!("{out}");
    Ok(())
}
