//! Invariant checks on returned solutions.

use std::collections::HashMap;

use tradeoff_core::{Contribution, Delta, Group, Instance, MatchMode, Result, Solution, TradeoffError};

/// Checks that `solution` is a valid explanation of `instance`.
///
/// Every group must be non-empty, balanced and shaped for the solution's
/// mode. Every Con is covered exactly once, no Pro is used twice, and only
/// the instance's own Pros and Cons appear.
pub fn verify_solution(instance: &Instance, solution: &Solution) -> Result<()> {
    let mode = solution.mode();
    let mut pros = Ledger::new(instance.pros());
    let mut cons = Ledger::new(instance.cons());

    for group in solution.groups() {
        let shape_ok = matches!(
            (mode, group),
            (MatchMode::OneToOne, Group::Pair { .. })
                | (MatchMode::OneToMany, Group::Leader { .. })
                | (MatchMode::ManyToOne, Group::Absorbed { .. })
                | (MatchMode::Combined, Group::Leader { .. } | Group::Absorbed { .. })
        );
        if !shape_ok {
            return violation(format!("group `{}` is not allowed in {} mode", group, mode.label()));
        }
        if group.pros().next().is_none() || group.cons().next().is_none() {
            return violation(format!("group `{}` is empty on one side", group));
        }
        if !group.is_balanced() {
            return violation(format!("group `{}` has a negative balance", group));
        }
        for pro in group.pros() {
            pros.record(pro, "Pro")?;
        }
        for con in group.cons() {
            cons.record(con, "Con")?;
        }
    }

    if let Some(pro) = pros.reused() {
        return violation(format!("Pro {} appears in more than one group", pro));
    }
    if let Some(con) = cons.reused() {
        return violation(format!("Con {} appears in more than one group", con));
    }
    if let Some(con) = cons.unused() {
        return violation(format!("Con {} is not covered", con));
    }
    Ok(())
}

fn violation(message: String) -> Result<()> {
    Err(TradeoffError::InvariantViolation(message))
}

/// Use counts of one side of the instance.
struct Ledger<'a> {
    values: HashMap<&'a str, Delta>,
    uses: HashMap<&'a str, usize>,
}

impl<'a> Ledger<'a> {
    fn new(side: &'a [Contribution]) -> Self {
        Self {
            values: side.iter().map(|c| (c.criterion(), c.value())).collect(),
            uses: side.iter().map(|c| (c.criterion(), 0)).collect(),
        }
    }

    fn record(&mut self, contribution: &Contribution, side: &str) -> Result<()> {
        match self.values.get(contribution.criterion()) {
            Some(&value) if value == contribution.value() => {}
            _ => {
                return violation(format!("{} is not a {} of the instance", contribution, side));
            }
        }
        if let Some(count) = self.uses.get_mut(contribution.criterion()) {
            *count += 1;
        }
        Ok(())
    }

    fn reused(&self) -> Option<&'a str> {
        self.uses.iter().find(|(_, &n)| n > 1).map(|(&id, _)| id)
    }

    fn unused(&self) -> Option<&'a str> {
        self.uses.iter().find(|(_, &n)| n == 0).map(|(&id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(id: &str, v: i64) -> Contribution {
        Contribution::new(id, v)
    }

    fn instance() -> Instance {
        Instance::from_contributions([c("A", 32), c("D", 36), c("C", -28), c("F", -35)])
    }

    #[test]
    fn test_accepts_valid_solution() {
        let solution = Solution::new(
            MatchMode::OneToOne,
            vec![
                Group::Pair { pro: c("A", 32), con: c("C", -28) },
                Group::Pair { pro: c("D", 36), con: c("F", -35) },
            ],
        );
        assert!(verify_solution(&instance(), &solution).is_ok());
    }

    #[test]
    fn test_rejects_negative_balance() {
        let solution = Solution::new(
            MatchMode::OneToOne,
            vec![
                Group::Pair { pro: c("A", 32), con: c("F", -35) },
                Group::Pair { pro: c("D", 36), con: c("C", -28) },
            ],
        );
        let err = verify_solution(&instance(), &solution).unwrap_err();
        assert!(matches!(err, TradeoffError::InvariantViolation(_)));
    }

    #[test]
    fn test_rejects_uncovered_con() {
        let solution = Solution::new(
            MatchMode::OneToMany,
            vec![Group::Leader { pro: c("D", 36), cons: vec![c("C", -28)] }],
        );
        assert!(verify_solution(&instance(), &solution).is_err());
    }

    #[test]
    fn test_rejects_reused_pro() {
        let solution = Solution::new(
            MatchMode::Combined,
            vec![
                Group::Leader { pro: c("D", 36), cons: vec![c("C", -28)] },
                Group::Absorbed { pros: vec![c("A", 32), c("D", 36)], con: c("F", -35) },
            ],
        );
        assert!(verify_solution(&instance(), &solution).is_err());
    }

    #[test]
    fn test_rejects_wrong_shape() {
        let solution = Solution::new(
            MatchMode::OneToOne,
            vec![Group::Leader { pro: c("D", 36), cons: vec![c("C", -28)] }],
        );
        assert!(verify_solution(&instance(), &solution).is_err());
    }

    #[test]
    fn test_rejects_foreign_contribution() {
        let solution = Solution::new(
            MatchMode::ManyToOne,
            vec![
                Group::Absorbed { pros: vec![c("E", 48)], con: c("C", -28) },
                Group::Absorbed { pros: vec![c("A", 32), c("D", 36)], con: c("F", -35) },
            ],
        );
        assert!(verify_solution(&instance(), &solution).is_err());
    }
}
