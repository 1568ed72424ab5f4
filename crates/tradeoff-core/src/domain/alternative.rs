//! Graded alternatives.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

/// A named alternative with one grade per criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alternative {
    name: String,
    grades: BTreeMap<String, Decimal>,
}

impl Alternative {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            grades: BTreeMap::new(),
        }
    }

    pub fn with_grades(name: impl Into<String>, grades: BTreeMap<String, Decimal>) -> Self {
        Self {
            name: name.into(),
            grades,
        }
    }

    pub fn with_grade(mut self, criterion: impl Into<String>, grade: impl Into<Decimal>) -> Self {
        self.grades.insert(criterion.into(), grade.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grade(&self, criterion: &str) -> Option<Decimal> {
        self.grades.get(criterion).copied()
    }

    /// Criterion ids graded by this alternative, in sorted order.
    pub fn criteria(&self) -> impl Iterator<Item = &str> {
        self.grades.keys().map(String::as_str)
    }

    pub fn grades(&self) -> &BTreeMap<String, Decimal> {
        &self.grades
    }
}
