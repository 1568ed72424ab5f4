//! Plain-text rendering of comparisons and certificate files.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tradeoff_core::{
    CertificateOrigin, Contribution, Group, InfeasibilityCertificate, MatchMode, Solution,
};

use crate::compare::{Comparison, Verdict};

/// Renders scores, contributions and the verdict of a comparison.
pub fn render(comparison: &Comparison) -> String {
    let mut out = render_summary(comparison);
    out.push('\n');
    match comparison.verdict() {
        Verdict::Feasible(solution) => out.push_str(&render_solution(solution)),
        Verdict::Infeasible(certificate) => out.push_str(&render_certificate(certificate)),
        Verdict::Unknown => {
            let _ = writeln!(
                out,
                "Search budget exhausted before a ({}) explanation was found or ruled out.",
                comparison.mode().label()
            );
        }
    }
    out
}

/// Header block: both weighted totals, the delta and the classification.
pub fn render_summary(comparison: &Comparison) -> String {
    let a = comparison.alternative_a();
    let b = comparison.alternative_b();
    let mut out = String::new();
    let _ = writeln!(out, "--- Comparing {} vs {} ---", a, b);
    let _ = writeln!(out, "Total Score {}: {}", a, comparison.score_a().normalize());
    let _ = writeln!(out, "Total Score {}: {}", b, comparison.score_b().normalize());
    let _ = writeln!(out, "Total Delta: {:+}", comparison.total_delta());
    let _ = writeln!(out, "Pros: [{}]", list(comparison.pros()));
    let _ = writeln!(out, "Cons: [{}]", list(comparison.cons()));
    if !comparison.neutrals().is_empty() {
        let _ = writeln!(out, "Neutral: [{}]", list(comparison.neutrals()));
    }
    out
}

/// Renders the groups of a solution as trade-off sentences.
///
/// Combined solutions are split into their many-to-one and one-to-many
/// sections.
pub fn render_solution(solution: &Solution) -> String {
    let mut out = String::new();
    if solution.is_empty() {
        out.push_str("The alternatives tie on every criterion; nothing to explain.\n");
        return out;
    }

    match solution.mode() {
        MatchMode::Combined => {
            out.push_str("--- Explanation Found (Combined 1-m and m-1) ---\n");
            section(
                &mut out,
                "M-1",
                "m-1",
                solution
                    .groups()
                    .iter()
                    .filter(|g| matches!(g, Group::Absorbed { .. })),
            );
            section(
                &mut out,
                "1-M",
                "1-m",
                solution
                    .groups()
                    .iter()
                    .filter(|g| matches!(g, Group::Leader { .. })),
            );
        }
        mode => {
            let _ = writeln!(out, "--- Explanation Found (Type {}) ---", mode.label());
            for group in solution.groups() {
                render_group(&mut out, group, None);
            }
        }
    }

    if !solution.is_proven_minimal() {
        out.push_str("(Search budget exhausted before this explanation was proven minimal.)\n");
    }
    out
}

fn section<'a>(
    out: &mut String,
    title: &str,
    tag: &str,
    groups: impl Iterator<Item = &'a Group>,
) {
    let _ = writeln!(out, "\n--- {} Trade-offs ---", title);
    let mut any = false;
    for group in groups {
        render_group(out, group, Some(tag));
        any = true;
    }
    if !any {
        let _ = writeln!(out, "No ({}) trade-offs used.", tag);
    }
}

fn render_group(out: &mut String, group: &Group, tag: Option<&str>) {
    let prefix = match tag {
        Some(tag) => format!("Trade-off ({})", tag),
        None => "Trade-off".to_string(),
    };
    match group {
        Group::Pair { pro, con } => {
            let _ = writeln!(
                out,
                "{}: Because {} compensates for {}",
                prefix,
                spaced(pro),
                spaced(con)
            );
        }
        Group::Leader { pro, cons } => {
            let _ = writeln!(out, "{}: Pro {} covers [{}]", prefix, spaced(pro), list(cons));
            let _ = writeln!(out, "  Balance: {} >= 0", group.balance());
        }
        Group::Absorbed { pros, con } => {
            let _ = writeln!(
                out,
                "{}: Con {} is covered by [{}]",
                prefix,
                spaced(con),
                list(pros)
            );
            let _ = writeln!(out, "  Balance: {} >= 0", group.balance());
        }
    }
}

/// Renders a certificate as a listing of named constraints.
///
/// `cover_<id>` asks for a Con to be offset. Pro constraints are named
/// after the limit they impose under the certificate's mode.
pub fn render_certificate(certificate: &InfeasibilityCertificate) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "No ({}) explanation exists for this comparison.",
        certificate.mode().label()
    );
    let _ = writeln!(
        out,
        "Certificate of infeasibility: {} ({} constraints)",
        origin(certificate),
        certificate.len()
    );

    let members = certificate.pros().iter().chain(certificate.cons());
    let names = certificate.constraint_names();
    let width = names.iter().map(String::len).max().unwrap_or(0);
    for (name, member) in names.iter().zip(members) {
        let _ = writeln!(
            out,
            "  {:<width$}  {}",
            name,
            meaning(certificate.mode(), member),
            width = width
        );
    }
    let _ = writeln!(
        out,
        "Supply {} against demand {}",
        certificate.supply(),
        certificate.demand()
    );
    out
}

fn origin(certificate: &InfeasibilityCertificate) -> &'static str {
    match (certificate.origin(), certificate.is_irreducible()) {
        (CertificateOrigin::OneSided, _) => "one side is empty",
        (CertificateOrigin::DeletionFilter, true) => "irreducible infeasible subsystem",
        (CertificateOrigin::DeletionFilter, false) => {
            "infeasible subsystem, not proven irreducible"
        }
        (CertificateOrigin::Unfiltered, _) => "whole instance, not reduced",
    }
}

fn meaning(mode: MatchMode, member: &Contribution) -> String {
    if member.value().is_con() {
        return format!("Con {} must be offset", spaced(member));
    }
    match mode {
        MatchMode::OneToOne => format!("Pro {} offsets at most one Con", spaced(member)),
        MatchMode::OneToMany => format!(
            "Pro {} covers Cons totalling at most {}",
            spaced(member),
            member.value()
        ),
        MatchMode::ManyToOne | MatchMode::Combined => {
            format!("Pro {} joins at most one group", spaced(member))
        }
    }
}

/// File name of a certificate: `<a>_<b>_<mode>.iis.txt`.
pub fn certificate_file_name(a: &str, b: &str, mode: MatchMode) -> String {
    format!("{}_{}_{}.iis.txt", a, b, mode.label())
}

/// Writes the certificate of an infeasible comparison into `dir`.
///
/// Creates `dir` if needed. Returns `None` without touching the file
/// system when the verdict is not `Infeasible`.
pub fn write_certificate(dir: &Path, comparison: &Comparison) -> io::Result<Option<PathBuf>> {
    let Verdict::Infeasible(certificate) = comparison.verdict() else {
        return Ok(None);
    };

    fs::create_dir_all(dir)?;
    let path = dir.join(certificate_file_name(
        comparison.alternative_a(),
        comparison.alternative_b(),
        certificate.mode(),
    ));
    let contents = format!(
        "{} vs {}\n{}",
        comparison.alternative_a(),
        comparison.alternative_b(),
        render_certificate(certificate)
    );
    fs::write(&path, contents)?;
    Ok(Some(path))
}

fn spaced(c: &Contribution) -> String {
    format!("{} ({:+})", c.criterion(), c.value())
}

fn list(items: &[Contribution]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(id: &str, v: i64) -> Contribution {
        Contribution::new(id, v)
    }

    #[test]
    fn test_pair_sentence() {
        let solution = Solution::new(
            MatchMode::OneToOne,
            vec![Group::Pair {
                pro: c("A", 32),
                con: c("C", -28),
            }],
        );
        let text = render_solution(&solution);
        assert!(text.contains("--- Explanation Found (Type 1-1) ---"));
        assert!(text.contains("Trade-off: Because A (+32) compensates for C (-28)"));
    }

    #[test]
    fn test_combined_sections() {
        let solution = Solution::new(
            MatchMode::Combined,
            vec![Group::Leader {
                pro: c("E", 48),
                cons: vec![c("C", -28), c("F", -15)],
            }],
        );
        let text = render_solution(&solution);
        assert!(text.contains("No (m-1) trade-offs used."));
        assert!(text.contains("Trade-off (1-m): Pro E (+48) covers [C(-28), F(-15)]"));
        assert!(text.contains("  Balance: 5 >= 0"));
    }

    #[test]
    fn test_empty_solution() {
        let text = render_solution(&Solution::empty(MatchMode::ManyToOne));
        assert!(text.contains("tie on every criterion"));
    }

    #[test]
    fn test_unproven_minimality_is_flagged() {
        let solution = Solution::new(
            MatchMode::ManyToOne,
            vec![Group::Absorbed {
                pros: vec![c("A", 32), c("D", 36)],
                con: c("G", -42),
            }],
        )
        .with_proven_minimal(false);
        let text = render_solution(&solution);
        assert!(text.contains("Trade-off: Con G (-42) is covered by [A(+32), D(+36)]"));
        assert!(text.contains("before this explanation was proven minimal"));
    }

    #[test]
    fn test_certificate_listing() {
        let certificate = InfeasibilityCertificate::new(
            MatchMode::OneToMany,
            vec![c("A", 10)],
            vec![c("C", -6), c("F", -6)],
            CertificateOrigin::DeletionFilter,
            true,
        );
        let text = render_certificate(&certificate);
        assert!(text.contains("No (1-m) explanation exists"));
        assert!(text.contains("irreducible infeasible subsystem (3 constraints)"));
        assert!(text.contains("strength_A  Pro A (+10) covers Cons totalling at most 10"));
        assert!(text.contains("cover_C     Con C (-6) must be offset"));
        assert!(text.contains("Supply 10 against demand 12"));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            certificate_file_name("z", "t", MatchMode::ManyToOne),
            "z_t_m-1.iis.txt"
        );
        assert_eq!(
            certificate_file_name("y", "z", MatchMode::Combined),
            "y_z_combined.iis.txt"
        );
    }
}
