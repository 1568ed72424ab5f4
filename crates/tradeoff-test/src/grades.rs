//! Reference weight and grade table: seven criteria, eight alternatives.

use tradeoff_core::{Alternative, Contribution, Instance, WeightTable};

/// Names of the graded alternatives.
pub const ALTERNATIVES: [&str; 8] = ["x", "y", "z", "t", "u", "v", "w", "w_prime"];

const CRITERIA: [&str; 7] = ["A", "B", "C", "D", "E", "F", "G"];

const WEIGHTS: [i64; 7] = [8, 7, 7, 6, 6, 5, 6];

const GRADES: [(&str, [i64; 7]); 8] = [
    ("x", [85, 81, 71, 69, 75, 81, 88]),
    ("y", [81, 81, 75, 63, 67, 88, 95]),
    ("z", [74, 89, 74, 81, 68, 84, 79]),
    ("t", [74, 71, 84, 91, 77, 76, 73]),
    ("u", [72, 66, 75, 85, 88, 66, 93]),
    ("v", [71, 73, 63, 92, 76, 79, 93]),
    ("w", [79, 69, 78, 76, 67, 84, 79]),
    ("w_prime", [57, 76, 81, 76, 82, 86, 77]),
];

pub fn weights() -> WeightTable {
    CRITERIA
        .iter()
        .zip(WEIGHTS)
        .fold(WeightTable::new(), |table, (id, w)| table.with(*id, w))
}

/// Looks up a reference alternative.
///
/// # Panics
///
/// Panics if `name` is not one of [`ALTERNATIVES`].
pub fn alternative(name: &str) -> Alternative {
    let (_, grades) = GRADES
        .iter()
        .find(|(n, _)| *n == name)
        .unwrap_or_else(|| panic!("unknown alternative {name}"));
    CRITERIA
        .iter()
        .zip(grades)
        .fold(Alternative::new(name), |alt, (id, g)| alt.with_grade(*id, *g))
}

/// Contribution instance of `a` against `b`.
pub fn instance(a: &str, b: &str) -> Instance {
    Instance::from_alternatives(&weights(), &alternative(a), &alternative(b))
        .unwrap_or_else(|e| panic!("reference table is consistent: {e}"))
}

/// Instance from bare `(criterion, value)` pairs.
pub fn instance_of(values: &[(&str, i64)]) -> Instance {
    Instance::from_contributions(values.iter().map(|&(id, v)| Contribution::new(id, v)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradeoff_core::Delta;

    #[test]
    fn test_x_against_y() {
        let instance = instance("x", "y");
        let pros: Vec<_> = instance.pros().iter().map(|c| c.criterion()).collect();
        assert_eq!(pros, vec!["A", "D", "E"]);
        assert_eq!(instance.total(), Delta::of(11));
    }
}
