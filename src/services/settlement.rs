//! Settlement operation
//!
//! Moves participant shares from unpaid to paid. Paid is terminal. Every
//! settlement is applied to a working copy and persisted in one atomic
//! write; the returned expense is re-read from the store afterwards.

use crate::audit::EntityType;
use crate::error::{DrainerError, DrainerResult};
use crate::models::{Expense, ExpenseId, ParticipantId, UserId};
use crate::storage::Storage;

/// Result of a settlement call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementOutcome {
    /// State of the expense as stored after the call
    pub expense: Expense,
    /// Participants flipped to paid by this call
    pub settled: Vec<ParticipantId>,
}

impl SettlementOutcome {
    /// Nothing was left to settle
    pub fn is_noop(&self) -> bool {
        self.settled.is_empty()
    }
}

pub struct SettlementService<'a> {
    storage: &'a Storage,
}

impl<'a> SettlementService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Mark the viewer's own share as paid
    ///
    /// A viewer without an unpaid share gets a no-op outcome.
    pub fn settle_own_share(
        &self,
        expense_id: ExpenseId,
        viewer: &UserId,
    ) -> DrainerResult<SettlementOutcome> {
        let expense = self.fetch(expense_id)?;
        let target: Vec<ParticipantId> = expense
            .share_of(viewer)
            .filter(|p| !p.paid)
            .map(|p| p.id)
            .into_iter()
            .collect();
        self.apply(expense, &target)
    }

    /// Payer closes out every outstanding share at once
    pub fn settle_all(
        &self,
        expense_id: ExpenseId,
        payer: &UserId,
    ) -> DrainerResult<SettlementOutcome> {
        let expense = self.fetch(expense_id)?;
        if !expense.is_payer(payer) {
            return Err(DrainerError::Validation(format!(
                "Only the payer can settle all shares of '{}'",
                expense.title
            )));
        }
        let targets: Vec<ParticipantId> = expense.unpaid_others().map(|p| p.id).collect();
        self.apply(expense, &targets)
    }

    /// Mark one participant's share as paid
    ///
    /// Only the payer or the participant themselves may do this.
    pub fn settle_participant(
        &self,
        expense_id: ExpenseId,
        participant_id: ParticipantId,
        viewer: &UserId,
    ) -> DrainerResult<SettlementOutcome> {
        let expense = self.fetch(expense_id)?;
        let participant = expense
            .participant(participant_id)
            .ok_or_else(|| DrainerError::participant_not_found(participant_id.to_string()))?;
        if !expense.is_payer(viewer) && &participant.user_id != viewer {
            return Err(DrainerError::Validation(format!(
                "Only the payer or {} can settle that share of '{}'",
                participant.name, expense.title
            )));
        }
        self.apply(expense, &[participant_id])
    }

    /// Own unpaid share first, otherwise everything when the viewer paid
    pub fn settle(
        &self,
        expense_id: ExpenseId,
        viewer: &UserId,
    ) -> DrainerResult<SettlementOutcome> {
        let expense = self.fetch(expense_id)?;

        if let Some(own) = expense.share_of(viewer).filter(|p| !p.paid) {
            let own_id = own.id;
            return self.apply(expense, &[own_id]);
        }

        if expense.is_payer(viewer) {
            let targets: Vec<ParticipantId> = expense.unpaid_others().map(|p| p.id).collect();
            return self.apply(expense, &targets);
        }

        self.apply(expense, &[])
    }

    fn fetch(&self, expense_id: ExpenseId) -> DrainerResult<Expense> {
        self.storage
            .expenses
            .get(expense_id)?
            .ok_or_else(|| DrainerError::expense_not_found(expense_id.to_string()))
    }

    fn apply(
        &self,
        before: Expense,
        targets: &[ParticipantId],
    ) -> DrainerResult<SettlementOutcome> {
        let mut working = before.clone();
        let mut settled = Vec::new();
        for &participant_id in targets {
            if let Some(participant) = working.participant_mut(participant_id) {
                if participant.mark_paid() {
                    settled.push(participant_id);
                }
            }
        }

        if settled.is_empty() {
            return Ok(SettlementOutcome {
                expense: before,
                settled,
            });
        }

        working.touch();
        self.storage.expenses.commit(working.clone())?;

        self.storage.log_update(
            EntityType::Expense,
            working.id.to_string(),
            Some(working.title.clone()),
            &before,
            &working,
        )?;

        let expense = self.fetch(working.id)?;
        Ok(SettlementOutcome { expense, settled })
    }
}
