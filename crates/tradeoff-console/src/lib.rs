//! Colorful console output for comparison lifecycle events.
//!
//! Provides a custom `tracing` layer that formats engine events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (comparison start/end, certificates)
//! - **DEBUG**: Search details (deepening budgets, deletion probes)
//! - **WARN**: Exhausted budgets

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect.
/// `RUST_LOG` overrides the default `tradeoff_solver=info,tradeoff=info`.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let mut filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy();
        for directive in ["tradeoff_solver=info", "tradeoff=info"] {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(TradeoffConsoleLayer)
            .try_init();
    });
}

fn elapsed_secs() -> f64 {
    EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64()
}

fn print_banner() {
    let banner = r#"
 _                 _            __  __
| |_ _ __ __ _  __| | ___  ___ / _|/ _|
| __| '__/ _` |/ _` |/ _ \/ _ \ |_| |_
| |_| | | (_| | (_| |  __/ (_) |  _|  _|
 \__|_|  \__,_|\__,_|\___|\___/|_| |_|
"#;

    let version_line = format!("        v{} - Exact Trade-off Explanations\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats engine events with colors.
pub struct TradeoffConsoleLayer;

impl<S: Subscriber> Layer<S> for TradeoffConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        let accepted = target == "tradeoff"
            || target.starts_with("tradeoff::")
            || target.starts_with("tradeoff_solver")
            || target.starts_with("tradeoff_cli");
        if !accepted {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    mode: Option<String>,
    alternative_a: Option<String>,
    alternative_b: Option<String>,
    verdict: Option<String>,
    element: Option<String>,
    outcome: Option<String>,
    message: Option<String>,
    pro_count: Option<u64>,
    con_count: Option<u64>,
    group_count: Option<u64>,
    nodes: Option<u64>,
    budget: Option<u64>,
    size: Option<u64>,
    duration_ms: Option<u64>,
    irreducible: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_str(field, s.trim_matches('"'));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "pro_count" => self.pro_count = Some(value),
            "con_count" => self.con_count = Some(value),
            "group_count" => self.group_count = Some(value),
            "nodes" => self.nodes = Some(value),
            "budget" => self.budget = Some(value),
            "size" => self.size = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "irreducible" {
            self.irreducible = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let slot = match field.name() {
            "event" => &mut self.event,
            "mode" => &mut self.mode,
            "alternative_a" => &mut self.alternative_a,
            "alternative_b" => &mut self.alternative_b,
            "verdict" => &mut self.verdict,
            "element" => &mut self.element,
            "outcome" => &mut self.outcome,
            "message" => &mut self.message,
            _ => return,
        };
        *slot = Some(value.to_string());
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "compare_start" => format_compare_start(v),
        "compare_end" => format_compare_end(v),
        "certificate_end" => format_certificate_end(v),
        "deepening" => format_deepening(v),
        "certificate_trial" => format_trial(v, level),
        "budget_exhausted" => format_budget_exhausted(v),
        "invariant_violation" => format_violation(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_compare_start(v: &EventVisitor) -> String {
    let a = v.alternative_a.as_deref().unwrap_or("?");
    let b = v.alternative_b.as_deref().unwrap_or("?");
    let mode = v.mode.as_deref().unwrap_or("?");

    format!(
        "{} {} Comparing {} vs {} │ {} │ {} pros │ {} cons",
        format_elapsed(),
        "▶".bright_green().bold(),
        a.white().bold(),
        b.white().bold(),
        mode.bright_magenta(),
        v.pro_count
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_yellow(),
        v.con_count
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_yellow(),
    )
}

fn format_compare_end(v: &EventVisitor) -> String {
    let verdict = v.verdict.as_deref().unwrap_or("unknown");
    let status = match verdict {
        "feasible" => "EXPLAINED".bright_green().bold().to_string(),
        "infeasible" => "NO EXPLANATION".bright_red().bold().to_string(),
        _ => "UNDECIDED".yellow().bold().to_string(),
    };

    let mut output = format!(
        "{} {} Comparison complete │ {} │ {} │ {} nodes",
        format_elapsed(),
        "■".bright_cyan().bold(),
        status,
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        v.nodes
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_magenta(),
    );
    if let Some(groups) = v.group_count {
        output.push_str(&format!(" │ {} groups", groups.to_formatted_string(&Locale::en).white()));
    }
    output
}

fn format_certificate_end(v: &EventVisitor) -> String {
    let proven = if v.irreducible.unwrap_or(false) {
        "irreducible".bright_green().to_string()
    } else {
        "not proven irreducible".yellow().to_string()
    };
    format!(
        "{} {} Certificate │ {} constraints │ {}",
        format_elapsed(),
        "✗".bright_red(),
        v.size.unwrap_or(0).to_formatted_string(&Locale::en).white(),
        proven,
    )
}

fn format_deepening(v: &EventVisitor) -> String {
    format!(
        "{} {} {} budget {}",
        format_elapsed(),
        "↓".bright_blue(),
        v.mode.as_deref().unwrap_or("?").white(),
        v.budget.unwrap_or(0).to_formatted_string(&Locale::en).bright_yellow(),
    )
}

fn format_trial(v: &EventVisitor, level: Level) -> String {
    if level < Level::DEBUG {
        return String::new();
    }
    let outcome = v.outcome.as_deref().unwrap_or("?");
    let icon = match outcome {
        "unsat" => "✗".bright_red().to_string(),
        "sat" => "✓".bright_green().to_string(),
        _ => "?".yellow().to_string(),
    };
    format!(
        "{} {} probe {} │ {}",
        format_elapsed(),
        icon,
        v.element.as_deref().unwrap_or("?").bright_black(),
        outcome.bright_black(),
    )
}

fn format_budget_exhausted(v: &EventVisitor) -> String {
    format!(
        "{} {} {} budget exhausted: {}",
        format_elapsed(),
        "⚠".yellow().bold(),
        v.mode.as_deref().unwrap_or("?"),
        v.message.as_deref().unwrap_or(""),
    )
}

fn format_violation(v: &EventVisitor) -> String {
    format!(
        "{} {} invariant violation: {}",
        format_elapsed(),
        "!".bright_red().bold(),
        v.message.as_deref().unwrap_or("").bright_red(),
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_formatting() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_events_are_silent() {
        let visitor = EventVisitor {
            event: Some("solve_start".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor, Level::INFO).is_empty());
    }

    #[test]
    fn test_compare_end_mentions_nodes() {
        let visitor = EventVisitor {
            event: Some("compare_end".to_string()),
            verdict: Some("infeasible".to_string()),
            nodes: Some(12_345),
            ..EventVisitor::default()
        };
        let output = format_event(&visitor, Level::INFO);
        assert!(output.contains("12,345"));
        assert!(output.contains("NO EXPLANATION"));
    }

    #[test]
    fn test_trials_hidden_above_debug() {
        let visitor = EventVisitor {
            event: Some("certificate_trial".to_string()),
            outcome: Some("sat".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor, Level::INFO).is_empty());
        assert!(!format_event(&visitor, Level::DEBUG).is_empty());
    }
}
