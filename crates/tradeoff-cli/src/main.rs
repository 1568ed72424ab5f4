use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use tradeoff::MatchMode;

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "tradeoff", about = "Explain why one alternative outscores another")]
#[command(version)]
struct Cli {
    /// Suppress lifecycle logging
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Explain one comparison, or prove that no explanation exists
    Compare(CompareArgs),

    /// List alternatives ranked by weighted total
    List {
        #[command(flatten)]
        data: DataArgs,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Compare every ordered pair of alternatives
    Matrix {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        search: SearchArgs,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Args)]
struct CompareArgs {
    /// Alternative expected to score higher
    a: String,

    /// Alternative it is compared against
    b: String,

    #[command(flatten)]
    data: DataArgs,

    #[command(flatten)]
    search: SearchArgs,

    /// Directory for certificate files, overriding the configuration
    #[arg(long)]
    output_dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Args)]
struct DataArgs {
    /// Weights and grades (TOML, or YAML by extension)
    #[arg(short, long, default_value = "data/grades.toml")]
    data: PathBuf,
}

#[derive(Args)]
struct SearchArgs {
    /// Match mode; defaults to the configured mode
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Explainer configuration; defaults apply if the file is missing
    #[arg(short, long, default_value = "explainer.toml")]
    config: PathBuf,

    /// Search nodes per solve, overriding the configuration
    #[arg(long)]
    step_limit: Option<u64>,

    /// Seconds per solve, overriding the configuration
    #[arg(long)]
    time_limit: Option<u64>,
}

impl SearchArgs {
    fn modes(&self, configured: MatchMode) -> Vec<MatchMode> {
        match self.mode {
            None => vec![configured],
            Some(ModeArg::All) => MatchMode::ALL.to_vec(),
            Some(ModeArg::OneToOne) => vec![MatchMode::OneToOne],
            Some(ModeArg::OneToMany) => vec![MatchMode::OneToMany],
            Some(ModeArg::ManyToOne) => vec![MatchMode::ManyToOne],
            Some(ModeArg::Combined) => vec![MatchMode::Combined],
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    #[value(name = "1-1", alias = "one-to-one")]
    OneToOne,
    #[value(name = "1-m", alias = "one-to-many")]
    OneToMany,
    #[value(name = "m-1", alias = "many-to-one")]
    ManyToOne,
    #[value(name = "combined")]
    Combined,
    #[value(name = "all")]
    All,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl Commands {
    /// JSON goes to stdout unmixed with log lines.
    fn wants_console(&self) -> bool {
        let format = match self {
            Commands::Compare(args) => args.format,
            Commands::List { format, .. } | Commands::Matrix { format, .. } => *format,
        };
        format == Format::Text
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if !cli.quiet && cli.command.wants_console() {
        tradeoff::console::init();
    }

    let stdout = std::io::stdout();
    match commands::run(&cli.command, &mut stdout.lock()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {}", "error:".bright_red().bold(), err);
            ExitCode::from(2)
        }
    }
}
