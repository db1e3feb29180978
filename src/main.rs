//! @ai:module:intent CLI entry point for whodo
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on config, extractor, output

use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use whodo::{extractor, output, Config, OutputFormat};

#[derive(Parser)]
#[command(name = "whodo")]
#[command(author, version, about = "List TODO(author) annotations in a package, by author")]
struct Cli {
    /// Package directory to inspect
    #[arg(conflicts_with = "pkg")]
    package: Option<PathBuf>,

    /// Package directory to inspect (same as the positional argument)
    #[arg(long, short)]
    pkg: Option<PathBuf>,

    /// Print the number of TODOs per person
    #[arg(long = "count", short = 'n')]
    count: bool,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: Format,

    /// Path to a TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Directory relative package paths are resolved against
    #[arg(long, env = "WHODO_ROOT")]
    root: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(package) = cli.package.clone().or_else(|| cli.pkg.clone()) else {
        return match Cli::command().print_help() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                ExitCode::from(2)
            }
        };
    };

    match run(&cli, &package) {
        Ok(report) => {
            match cli.format {
                Format::Text => print!("{}", report),
                Format::Json | Format::JsonPretty => println!("{}", report),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli, package: &Path) -> whodo::Result<String> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(root) = &cli.root {
        config.root = Some(root.clone());
    }

    let path = config.package_path(package);
    let scan = extractor::todos_in(&path, &config.parse_options()?)?;

    let report = if cli.count {
        let counts = output::count_by_author(&scan.todos);
        output::format_counts(&counts, cli.format.into())?
    } else {
        let rows = output::listing_rows(&scan.todos, &scan.sources);
        output::format_listing(&rows, cli.format.into(), config.line_width)?
    };

    Ok(report)
}

fn init_logging(verbose: u8) {
    let default_directive = match verbose {
        0 => "whodo=warn",
        1 => "whodo=info",
        _ => "whodo=debug",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
