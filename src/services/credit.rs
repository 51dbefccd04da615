//! Credit score simulator

use serde::Serialize;

use crate::error::{DrainerError, DrainerResult};
use crate::models::credit::{MAX_SCORE, MIN_SCORE};
use crate::models::{CreditAction, CreditScore, ScoreBand};

/// Projected score after taking some actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Simulation {
    pub current: i32,
    pub projected: i32,
    pub band: ScoreBand,
    pub applied: Vec<CreditAction>,
}

impl Simulation {
    pub fn gain(&self) -> i32 {
        self.projected - self.current
    }
}

pub struct CreditSimulator<'a> {
    score: &'a CreditScore,
}

impl<'a> CreditSimulator<'a> {
    pub fn new(score: &'a CreditScore) -> Self {
        Self { score }
    }

    /// Add the impact of the selected actions, staying within the scoring range
    pub fn simulate(&self, selected: &[usize]) -> DrainerResult<Simulation> {
        let mut applied = Vec::with_capacity(selected.len());
        for &index in selected {
            let action = self.score.actions.get(index).ok_or_else(|| {
                DrainerError::Validation(format!(
                    "No credit action #{} (there are {})",
                    index + 1,
                    self.score.actions.len()
                ))
            })?;
            if !applied.contains(action) {
                applied.push(action.clone());
            }
        }

        let boost: i32 = applied.iter().map(|a| a.impact_points).sum();
        let projected = (self.score.score + boost).clamp(MIN_SCORE, MAX_SCORE);

        Ok(Simulation {
            current: self.score.score,
            projected,
            band: ScoreBand::for_score(projected),
            applied,
        })
    }

    /// Every action at once
    pub fn best_case(&self) -> Simulation {
        let boost: i32 = self.score.actions.iter().map(|a| a.impact_points).sum();
        let projected = (self.score.score + boost).clamp(MIN_SCORE, MAX_SCORE);
        Simulation {
            current: self.score.score,
            projected,
            band: ScoreBand::for_score(projected),
            applied: self.score.actions.clone(),
        }
    }
}
