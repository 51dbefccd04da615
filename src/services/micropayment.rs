//! Micropayment scheduling
//!
//! `PaymentScheduler` is the seam to a payment provider. The bundled
//! `LocalScheduler` keeps scheduled payments in the local store and reads
//! the subscription flag from settings; a remote implementation would map
//! provider failures to `DrainerError::Upstream`.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::config::Settings;
use crate::error::{DrainerError, DrainerResult};
use crate::models::{
    DebtId, MicroPayment, MicroPaymentId, Money, PaymentFrequency, PaymentStatus, UserId,
};
use crate::storage::Storage;

/// A request to pay `amount` toward a debt on `date`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub user_id: UserId,
    pub debt_id: DebtId,
    pub amount: Money,
    pub date: NaiveDate,
    pub frequency: PaymentFrequency,
}

pub trait PaymentScheduler {
    /// Whether `user` has the credit bureau reporting add-on
    fn is_subscribed(&self, user: &UserId) -> DrainerResult<bool>;

    /// Hand a payment to the provider, returning the recorded payment
    fn schedule(&self, request: PaymentRequest) -> DrainerResult<MicroPayment>;
}

/// Scheduler backed by the local JSON store
pub struct LocalScheduler<'a> {
    storage: &'a Storage,
    subscribed: bool,
}

impl<'a> LocalScheduler<'a> {
    pub fn new(storage: &'a Storage, settings: &Settings) -> Self {
        Self {
            storage,
            subscribed: settings.subscribed,
        }
    }
}

impl PaymentScheduler for LocalScheduler<'_> {
    fn is_subscribed(&self, _user: &UserId) -> DrainerResult<bool> {
        Ok(self.subscribed)
    }

    fn schedule(&self, request: PaymentRequest) -> DrainerResult<MicroPayment> {
        let mut payment = MicroPayment::new(
            request.user_id,
            request.debt_id,
            request.amount,
            request.date,
            request.frequency,
        );
        payment.provider_ref = Some(format!("local-{}", payment.id.as_uuid().simple()));

        self.storage.micropayments.commit(payment.clone())?;

        self.storage.log_create(
            EntityType::MicroPayment,
            payment.id.to_string(),
            None,
            &payment,
        )?;

        Ok(payment)
    }
}

pub struct MicroPaymentService<'a, S: PaymentScheduler> {
    storage: &'a Storage,
    scheduler: S,
}

impl<'a, S: PaymentScheduler> MicroPaymentService<'a, S> {
    pub fn new(storage: &'a Storage, scheduler: S) -> Self {
        Self { storage, scheduler }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Schedule a payment toward `debt_id`
    ///
    /// Without an explicit amount the debt's daily micropayment is used.
    pub fn schedule(
        &self,
        user: &UserId,
        debt_id: DebtId,
        amount: Option<Money>,
        date: NaiveDate,
        frequency: PaymentFrequency,
    ) -> DrainerResult<MicroPayment> {
        let debt = self
            .storage
            .debts
            .get(debt_id)?
            .ok_or_else(|| DrainerError::debt_not_found(debt_id.to_string()))?;

        let amount = amount.unwrap_or_else(|| debt.daily_micropayment());
        if !amount.is_positive() {
            return Err(DrainerError::Validation(format!(
                "Payment toward '{}' must be positive; set a micropayment or pass an amount",
                debt.name
            )));
        }

        self.scheduler.schedule(PaymentRequest {
            user_id: user.clone(),
            debt_id,
            amount,
            date,
            frequency,
        })
    }

    /// Payments for `user`, newest first
    pub fn history(&self, user: &UserId) -> DrainerResult<Vec<MicroPayment>> {
        self.storage.micropayments.get_for_user(user)
    }

    pub fn find(&self, identifier: &str) -> DrainerResult<Option<MicroPayment>> {
        if let Ok(id) = identifier.trim().parse::<MicroPaymentId>() {
            return self.storage.micropayments.get(id);
        }
        Ok(self
            .storage
            .micropayments
            .get_all()?
            .into_iter()
            .find(|p| p.id.matches(identifier)))
    }

    /// Move a payment along pending -> processing -> completed | failed
    pub fn update_status(
        &self,
        id: MicroPaymentId,
        status: PaymentStatus,
    ) -> DrainerResult<MicroPayment> {
        let mut payment = self
            .storage
            .micropayments
            .get(id)?
            .ok_or_else(|| DrainerError::micropayment_not_found(id.to_string()))?;

        if payment.status == status {
            return Ok(payment);
        }
        if !payment.status.can_transition_to(status) {
            return Err(DrainerError::Validation(format!(
                "Cannot move payment {} from {} to {}",
                payment.id, payment.status, status
            )));
        }

        let before = payment.clone();
        payment.set_status(status);

        self.storage.micropayments.commit(payment.clone())?;

        self.storage.log_update(
            EntityType::MicroPayment,
            payment.id.to_string(),
            None,
            &before,
            &payment,
        )?;

        Ok(payment)
    }
}
