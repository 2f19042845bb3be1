//! Command-line interface for the collective actions table
//! This binary keeps the table embedded in the README and its CSV export in sync.
//!
//! Usage:
//!   actions to-csv [--document `<path>`] [--csv `<path>`]          - Export the README table as CSV
//!   actions show [--document `<path>`] [--format json|csv]       - Print the canonical table
//!   actions clean [--document `<path>`]                          - Rewrite the README table canonically
//!   actions render-sources [--sources `<dir>`] [--document `<path>`] - Render per-action files into the README
//!   actions render-csv [--csv `<path>`] [--document `<path>`]      - Render the CSV into the README
//!
//! Every command accepts `--config <file>` and `--id <container id>`. Without `--config`,
//! `actions.toml` in the working directory is layered over the defaults when present.

mod commands;

use actions_config::{ActionsConfig, ConfigError, Loader, LOCAL_CONFIG_FILE};
use clap::{Arg, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("actions")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Keeps the collective actions table in the README and its CSV export in sync")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults (default: ./actions.toml if present)"),
        )
        .arg(
            Arg::new("id")
                .long("id")
                .global(true)
                .help("Id of the container holding the table"),
        )
        .subcommand(
            Command::new("to-csv")
                .about("Export the README table as CSV")
                .arg(document_arg())
                .arg(csv_arg()),
        )
        .subcommand(
            Command::new("show")
                .about("Print the canonical table")
                .arg(document_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(commands::SHOW_FORMATS.to_vec())
                        .default_value("json"),
                ),
        )
        .subcommand(
            Command::new("clean")
                .about("Rewrite the README table in canonical form")
                .arg(document_arg()),
        )
        .subcommand(
            Command::new("render-sources")
                .about("Merge the per-action files and render them into the README")
                .arg(
                    Arg::new("sources")
                        .long("sources")
                        .help("Directory holding one fragment per file"),
                )
                .arg(document_arg()),
        )
        .subcommand(
            Command::new("render-csv")
                .about("Render the CSV export into the README")
                .arg(csv_arg())
                .arg(document_arg()),
        )
        .get_matches();

    let (name, sub_matches) = matches
        .subcommand()
        .expect("subcommand is required");

    let config = load_config(sub_matches).unwrap_or_else(|e| {
        eprintln!("error: invalid configuration: {}", e);
        std::process::exit(1);
    });
    init_logging(&config);

    let format = sub_matches
        .try_get_one::<String>("format")
        .ok()
        .flatten()
        .map(String::as_str)
        .unwrap_or("json");

    match commands::execute_command(name, &config, format) {
        Ok(Some(output)) => println!("{}", output),
        Ok(None) => {}
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

fn document_arg() -> Arg {
    Arg::new("document")
        .long("document")
        .short('d')
        .help("Markdown document holding the table")
}

fn csv_arg() -> Arg {
    Arg::new("csv").long("csv").help("CSV export of the table")
}

/// Layer the optional config file and command-line values over the defaults
fn load_config(sub_matches: &ArgMatches) -> Result<ActionsConfig, ConfigError> {
    let mut loader = Loader::new();
    loader = match sub_matches.get_one::<String>("config") {
        Some(path) => loader.with_file(path),
        None => loader.with_optional_file(LOCAL_CONFIG_FILE),
    };
    if let Some(id) = sub_matches.get_one::<String>("id") {
        loader = loader.set_override("project.id", id.as_str())?;
    }
    for (arg, key) in [
        ("document", "paths.document"),
        ("csv", "paths.csv"),
        ("sources", "paths.sources"),
    ] {
        if let Ok(Some(value)) = sub_matches.try_get_one::<String>(arg) {
            loader = loader.set_override(key, value.as_str())?;
        }
    }
    loader.build()
}

fn init_logging(config: &ActionsConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
