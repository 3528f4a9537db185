//! Saved loan plans
//!
//! An ordered, in-memory list the caller owns for the duration of a session.
//! Ids are generated by the book and never reused, even after removal.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::loan::LoanScenario;

/// Identifier handed out by `PlanBook::add`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(pub u64);

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "plan-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPlan {
    pub id: PlanId,
    pub name: String,
    pub scenario: LoanScenario,
}

/// Insertion-ordered collection of saved plans
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanBook {
    next_id: u64,
    plans: Vec<SavedPlan>,
}

impl PlanBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a scenario under `name` and return its new id
    pub fn add(&mut self, name: impl Into<String>, scenario: LoanScenario) -> PlanId {
        self.next_id += 1;
        let id = PlanId(self.next_id);
        self.plans.push(SavedPlan {
            id,
            name: name.into(),
            scenario,
        });
        id
    }

    pub fn remove(&mut self, id: PlanId) -> Option<SavedPlan> {
        let index = self.plans.iter().position(|p| p.id == id)?;
        Some(self.plans.remove(index))
    }

    pub fn get(&self, id: PlanId) -> Option<&SavedPlan> {
        self.plans.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SavedPlan> {
        self.plans.iter()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restore a snapshot; the id counter resumes past the largest saved id
    pub fn from_json(json: &str) -> Result<Self> {
        let mut book: PlanBook = serde_json::from_str(json)?;
        let max_id = book.plans.iter().map(|p| p.id.0).max().unwrap_or(0);
        book.next_id = book.next_id.max(max_id);
        Ok(book)
    }
}

impl<'a> IntoIterator for &'a PlanBook {
    type Item = &'a SavedPlan;
    type IntoIter = std::slice::Iter<'a, SavedPlan>;

    fn into_iter(self) -> Self::IntoIter {
        self.plans.iter()
    }
}
