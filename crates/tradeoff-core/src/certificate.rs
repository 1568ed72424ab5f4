//! Infeasibility certificates.
//!
//! A certificate lists the constraints of an irreducible infeasible
//! subsystem: each Con stands for its coverage requirement and each Pro for
//! its per-mode resource limit. Keeping only the listed constraints (every
//! other Con needs no coverage, every other Pro has its limit lifted) leaves
//! no feasible explanation, and lifting any single listed constraint
//! restores one.

use std::fmt;

use crate::delta::Delta;
use crate::domain::Contribution;
use crate::mode::MatchMode;

/// How a certificate was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CertificateOrigin {
    /// One side of the instance was empty; the other side is the certificate.
    OneSided,
    /// Produced by deletion filtering over the exact search.
    DeletionFilter,
    /// Every Pro and Con of the instance, with no filtering applied.
    Unfiltered,
}

/// Proof that no explanation exists under a given mode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfeasibilityCertificate {
    mode: MatchMode,
    pros: Vec<Contribution>,
    cons: Vec<Contribution>,
    origin: CertificateOrigin,
    irreducible: bool,
}

impl InfeasibilityCertificate {
    pub fn new(
        mode: MatchMode,
        pros: Vec<Contribution>,
        cons: Vec<Contribution>,
        origin: CertificateOrigin,
        irreducible: bool,
    ) -> Self {
        Self {
            mode,
            pros,
            cons,
            origin,
            irreducible,
        }
    }

    /// Certificate for an instance with exactly one empty side.
    pub fn one_sided(mode: MatchMode, pros: &[Contribution], cons: &[Contribution]) -> Self {
        Self::new(
            mode,
            pros.to_vec(),
            cons.to_vec(),
            CertificateOrigin::OneSided,
            pros.len() + cons.len() == 1,
        )
    }

    /// Certificate listing the whole instance, for when filtering is off.
    ///
    /// Infeasible but not reduced, so never marked irreducible unless the
    /// instance has a single element.
    pub fn unfiltered(mode: MatchMode, pros: &[Contribution], cons: &[Contribution]) -> Self {
        Self::new(
            mode,
            pros.to_vec(),
            cons.to_vec(),
            CertificateOrigin::Unfiltered,
            pros.len() + cons.len() == 1,
        )
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn pros(&self) -> &[Contribution] {
        &self.pros
    }

    pub fn cons(&self) -> &[Contribution] {
        &self.cons
    }

    pub fn origin(&self) -> CertificateOrigin {
        self.origin
    }

    /// False when a deletion probe ran out of budget and its element was
    /// kept without proof of necessity.
    pub fn is_irreducible(&self) -> bool {
        self.irreducible
    }

    pub fn len(&self) -> usize {
        self.pros.len() + self.cons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, criterion: &str) -> bool {
        self.pros
            .iter()
            .chain(&self.cons)
            .any(|c| c.criterion() == criterion)
    }

    /// Total surplus of the listed Pros.
    pub fn supply(&self) -> Delta {
        self.pros.iter().map(Contribution::value).sum()
    }

    /// Total deficit of the listed Cons, as a non-negative delta.
    pub fn demand(&self) -> Delta {
        -self.cons.iter().map(Contribution::value).sum::<Delta>()
    }

    /// Names of the listed constraints.
    ///
    /// Cons map to `cover_<id>`; Pros map to the mode's resource limit:
    /// `use_once_<id>`, `strength_<id>` or `pro_disjoint_<id>`.
    pub fn constraint_names(&self) -> Vec<String> {
        let pro_prefix = match self.mode {
            MatchMode::OneToOne => "use_once",
            MatchMode::OneToMany => "strength",
            MatchMode::ManyToOne | MatchMode::Combined => "pro_disjoint",
        };
        self.pros
            .iter()
            .map(|p| format!("{}_{}", pro_prefix, p.criterion()))
            .chain(self.cons.iter().map(|c| format!("cover_{}", c.criterion())))
            .collect()
    }
}

impl fmt::Display for InfeasibilityCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No {} explanation: ", self.mode.label())?;
        write!(f, "{}", self.constraint_names().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_names() {
        let cert = InfeasibilityCertificate::new(
            MatchMode::OneToOne,
            vec![Contribution::new("A", 10)],
            vec![Contribution::new("C", -5), Contribution::new("F", -5)],
            CertificateOrigin::DeletionFilter,
            true,
        );

        assert_eq!(
            cert.constraint_names(),
            vec!["use_once_A", "cover_C", "cover_F"]
        );
        assert_eq!(cert.supply(), Delta::of(10));
        assert_eq!(cert.demand(), Delta::of(10));
        assert!(cert.contains("F"));
        assert!(!cert.contains("B"));
        assert_eq!(
            cert.to_string(),
            "No 1-1 explanation: use_once_A, cover_C, cover_F"
        );
    }

    #[test]
    fn test_one_sided() {
        let cons = vec![Contribution::new("C", -5), Contribution::new("F", -1)];
        let cert = InfeasibilityCertificate::one_sided(MatchMode::ManyToOne, &[], &cons);

        assert_eq!(cert.origin(), CertificateOrigin::OneSided);
        assert_eq!(cert.cons(), cons.as_slice());
        assert!(cert.pros().is_empty());
        assert!(!cert.is_irreducible());
    }
}
