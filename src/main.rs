use clap::{Parser as ClapParser, Subcommand};
use log_filter_sql::cli::{self, CheckOptions, CheckResult, CliError};
use log_filter_sql::output::{to_json, translation_json};
use log_filter_sql::{CompilerConfig, DialectKind, engine};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "logfilter")]
#[command(about = "logfilter - compile log filter expressions into SQL predicates")]
#[command(version)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a filter into a SQL predicate
    Translate {
        /// The filter (reads from stdin if omitted or '-')
        filter: Option<String>,

        /// SQL dialect
        #[arg(long, value_enum)]
        dialect: Option<DialectKind>,

        /// Name of the property table
        #[arg(long)]
        property_table: Option<String>,

        /// JSON config file with "dialect" and "property_table"
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print a JSON object instead of the bare SQL
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Only validate syntax, don't translate
    Check {
        /// The filter (reads from stdin if omitted or '-')
        filter: Option<String>,
    },

    /// Print the token stream of a filter
    Tokens {
        /// The filter (reads from stdin if omitted or '-')
        filter: Option<String>,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'logfilter docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Commands::Translate {
            filter,
            dialect,
            property_table,
            config,
            json,
            pretty,
        } => run_translate(filter, dialect, property_table, config, json, pretty),
        Commands::Check { filter } => run_check(filter),
        Commands::Tokens { filter } => read_filter(filter)
            .and_then(|f| cli::render_tokens(&f))
            .map(|tokens| println!("{}", tokens)),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_filter(filter: Option<String>) -> Result<String, CliError> {
    match filter {
        Some(f) if f != "-" => Ok(f),
        _ if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
        }
        _ => Err(CliError::NoInput),
    }
}

fn run_translate(
    filter: Option<String>,
    dialect: Option<DialectKind>,
    property_table: Option<String>,
    config: Option<PathBuf>,
    json: bool,
    pretty: bool,
) -> Result<(), CliError> {
    let filter = read_filter(filter)?;

    let mut settings = match config {
        Some(path) => CompilerConfig::load(&path)?,
        None => CompilerConfig::default(),
    }
    .with_env_overrides()?;
    if let Some(kind) = dialect {
        settings.dialect = kind;
    }
    if property_table.is_some() {
        settings.property_table = property_table;
    }
    let dialect = settings.dialect()?;

    if !json {
        println!("{}", cli::execute_translate(&filter, dialect.as_ref())?);
        return Ok(());
    }

    let result = engine::translate(&filter, dialect.as_ref());
    println!(
        "{}",
        to_json(&translation_json(&filter, dialect.as_ref(), &result), pretty)?
    );
    if result.is_err() {
        std::process::exit(1);
    }
    Ok(())
}

fn run_check(filter: Option<String>) -> Result<(), CliError> {
    let options = CheckOptions {
        filter: read_filter(filter)?,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::FreeText => println!("Free text search"),
    }
    Ok(())
}
