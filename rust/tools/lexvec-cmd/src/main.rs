use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

mod commands;

#[derive(Parser)]
#[command(name = "lexvec-cmd")]
#[command(about = "Command-line utility for encoded lexeme vectors")]
#[command(version)]
struct Cli {
    /// Log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG applies otherwise
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a JSON token list into a vector file
    Encode {
        /// JSON array of {"lexeme", "position"?, "weight"?} objects
        #[arg(short, long)]
        input: String,

        /// Output vector path
        output: String,
    },

    /// Decode a vector file and print its contents as JSON
    Inspect {
        /// Include every entry with its positions
        #[arg(long)]
        entries: bool,

        /// Vector path
        vector: String,
    },

    /// Concatenate two vectors, shifting the positions of the second
    Concat {
        first: String,
        second: String,
        output: String,
    },

    /// Remove all positions and weights
    Strip { input: String, output: String },

    /// Keep only positions with the given weights
    Filter {
        /// Weight letters to keep, e.g. "ab"
        #[arg(short, long)]
        weights: String,

        input: String,
        output: String,
    },

    /// Delete lexemes
    Delete {
        /// Lexeme to delete (can be specified multiple times)
        #[arg(short, long, required = true)]
        lexeme: Vec<String>,

        input: String,
        output: String,
    },

    /// Assign a weight to all positions, or to the positions of some lexemes
    #[command(name = "setweight")]
    SetWeight {
        /// Weight letter: a, b, c or d
        #[arg(short, long)]
        weight: char,

        /// Restrict to these lexemes (can be specified multiple times)
        #[arg(short, long)]
        lexeme: Vec<String>,

        input: String,
        output: String,
    },

    /// Evaluate a JSON query tree against a vector
    Match {
        /// Path to the JSON query tree
        #[arg(short, long)]
        query: String,

        /// Path to JSON match options
        #[arg(short, long)]
        options: Option<String>,

        /// Vector path
        vector: String,
    },
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Encode { input, output } => commands::encode::run(input, output),
        Commands::Inspect { entries, vector } => commands::inspect::run(entries, vector),
        Commands::Concat {
            first,
            second,
            output,
        } => commands::transform::concat(first, second, output),
        Commands::Strip { input, output } => commands::transform::strip(input, output),
        Commands::Filter {
            weights,
            input,
            output,
        } => commands::transform::filter(weights, input, output),
        Commands::Delete {
            lexeme,
            input,
            output,
        } => commands::transform::delete(lexeme, input, output),
        Commands::SetWeight {
            weight,
            lexeme,
            input,
            output,
        } => commands::transform::set_weight(weight, lexeme, input, output),
        Commands::Match {
            query,
            options,
            vector,
        } => commands::match_query::run(query, options, vector),
    }
}
