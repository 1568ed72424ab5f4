//! Subcommand implementations.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use thiserror::Error;
use tradeoff::{
    report, Alternative, Comparison, ConfigError, Dataset, Explainer, ExplainerConfig,
    TradeoffError, Verdict,
};

use crate::output::{ComparisonJson, MatrixEntryJson, RankingJson};
use crate::{CompareArgs, Commands, Format, SearchArgs};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Tradeoff(#[from] TradeoffError),

    #[error("{}: {source}", path.display())]
    Dataset {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Whether every requested comparison was explained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Explained,
    NotExplained,
}

impl Status {
    fn of<'a>(mut verdicts: impl Iterator<Item = &'a Verdict>) -> Self {
        if verdicts.all(|v| v.is_feasible()) {
            Status::Explained
        } else {
            Status::NotExplained
        }
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Explained => ExitCode::SUCCESS,
            Status::NotExplained => ExitCode::from(1),
        }
    }
}

pub(crate) fn run(command: &Commands, out: &mut impl Write) -> Result<ExitCode, CliError> {
    execute(command, out).map(ExitCode::from)
}

pub(crate) fn execute(command: &Commands, out: &mut impl Write) -> Result<Status, CliError> {
    match command {
        Commands::Compare(args) => compare(args, out),
        Commands::List { data, format } => list(&data.data, *format, out),
        Commands::Matrix {
            data,
            search,
            format,
        } => matrix(&data.data, search, *format, out),
    }
}

fn compare(args: &CompareArgs, out: &mut impl Write) -> Result<Status, CliError> {
    let dataset = load_dataset(&args.data.data)?;
    let explainer = explainer(&args.search, args.output_dir.as_deref())?;

    let comparisons = args
        .search
        .modes(explainer.config().mode)
        .into_iter()
        .map(|mode| explainer.compare_in_with_mode(&dataset, &args.a, &args.b, mode))
        .collect::<Result<Vec<Comparison>, _>>()?;

    let mut written = Vec::new();
    for comparison in &comparisons {
        if let Some(path) = explainer.write_certificate(comparison)? {
            written.push(path);
        }
    }

    match args.format {
        Format::Text => {
            for comparison in &comparisons {
                writeln!(out, "{}", report::render(comparison))?;
            }
            for path in &written {
                writeln!(out, "Certificate written to {}", path.display())?;
            }
        }
        Format::Json => {
            let json: Vec<_> = comparisons.iter().map(ComparisonJson::from).collect();
            serde_json::to_writer_pretty(&mut *out, &json)?;
            writeln!(out)?;
        }
    }

    Ok(Status::of(comparisons.iter().map(Comparison::verdict)))
}

fn list(path: &Path, format: Format, out: &mut impl Write) -> Result<Status, CliError> {
    let dataset = load_dataset(path)?;
    let weights = dataset.weight_table();

    let mut ranking = dataset
        .alternative_names()
        .map(|name| {
            let alternative = dataset.alternative(name)?;
            let score = weights.weighted_score(&alternative)?;
            Ok(RankingJson {
                name: name.to_string(),
                score,
            })
        })
        .collect::<Result<Vec<_>, TradeoffError>>()?;
    ranking.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));

    match format {
        Format::Text => {
            let width = ranking.iter().map(|r| r.name.len()).max().unwrap_or(0);
            for (rank, entry) in ranking.iter().enumerate() {
                writeln!(
                    out,
                    "{:>3}. {:<width$}  {}",
                    rank + 1,
                    entry.name,
                    entry.score.normalize(),
                    width = width
                )?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, &ranking)?;
            writeln!(out)?;
        }
    }
    Ok(Status::Explained)
}

fn matrix(
    path: &Path,
    search: &SearchArgs,
    format: Format,
    out: &mut impl Write,
) -> Result<Status, CliError> {
    let dataset = load_dataset(path)?;
    let explainer = explainer(search, None)?;
    let weights = dataset.weight_table();

    let names = dataset.pairs();
    let pairs = names
        .iter()
        .map(|(a, b)| Ok((dataset.alternative(a)?, dataset.alternative(b)?)))
        .collect::<Result<Vec<(Alternative, Alternative)>, TradeoffError>>()?;

    let mut entries = Vec::new();
    for mode in search.modes(explainer.config().mode) {
        let results = pairs
            .iter()
            .zip(explainer.compare_batch_with_mode(&weights, &pairs, mode))
            .map(|((a, b), result)| MatrixEntryJson::new(a.name(), b.name(), mode, result));
        entries.extend(results);
    }

    match format {
        Format::Text => {
            for entry in &entries {
                writeln!(out, "{}", entry.line())?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, &entries)?;
            writeln!(out)?;
        }
    }

    if entries.iter().all(|e| e.verdict == "feasible") {
        Ok(Status::Explained)
    } else {
        Ok(Status::NotExplained)
    }
}

fn load_dataset(path: &Path) -> Result<Dataset, CliError> {
    Dataset::load(path).map_err(|source| CliError::Dataset {
        path: path.to_path_buf(),
        source,
    })
}

fn explainer(search: &SearchArgs, output_dir: Option<&Path>) -> Result<Explainer, CliError> {
    let mut config = ExplainerConfig::load_or_default(&search.config)?;
    if let Some(steps) = search.step_limit {
        config = config.with_step_count_limit(steps);
    }
    if let Some(seconds) = search.time_limit {
        config = config.with_termination_seconds(seconds);
    }
    if let Some(dir) = output_dir {
        config.certificate.output_dir = Some(dir.to_path_buf());
    }
    Ok(Explainer::new(config))
}
