//! Micropayment record repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::DrainerError;
use crate::models::{DebtId, MicroPayment, MicroPaymentId, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::{lock_error, persist_or_reload};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct MicroPaymentData {
    payments: Vec<MicroPayment>,
}

pub struct MicroPaymentRepository {
    path: PathBuf,
    data: RwLock<HashMap<MicroPaymentId, MicroPayment>>,
}

impl MicroPaymentRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), DrainerError> {
        let file_data: MicroPaymentData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;
        data.clear();
        for payment in file_data.payments {
            data.insert(payment.id, payment);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), DrainerError> {
        let payments = self.get_all()?;
        write_json_atomic(&self.path, &MicroPaymentData { payments })
    }

    pub fn get(&self, id: MicroPaymentId) -> Result<Option<MicroPayment>, DrainerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// All payments, newest payment date first
    pub fn get_all(&self) -> Result<Vec<MicroPayment>, DrainerError> {
        let data = self.data.read().map_err(lock_error)?;
        let mut payments: Vec<_> = data.values().cloned().collect();
        payments.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(payments)
    }

    pub fn get_for_user(&self, user: &UserId) -> Result<Vec<MicroPayment>, DrainerError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|p| &p.user_id == user)
            .collect())
    }

    pub fn get_for_debt(&self, debt_id: DebtId) -> Result<Vec<MicroPayment>, DrainerError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|p| p.debt_id == debt_id)
            .collect())
    }

    /// Upsert and persist as one unit
    pub fn commit(&self, payment: MicroPayment) -> Result<(), DrainerError> {
        self.upsert(payment)?;
        persist_or_reload("micropayments", || self.save(), || self.load())
    }

    pub fn upsert(&self, payment: MicroPayment) -> Result<(), DrainerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(payment.id, payment);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, PaymentFrequency};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_filters_and_ordering() {
        let temp_dir = TempDir::new().unwrap();
        let repo = MicroPaymentRepository::new(temp_dir.path().join("micropayments.json"));
        let visa = DebtId::new();
        let loan = DebtId::new();

        for (debt, day) in [(visa, 1), (visa, 3), (loan, 2)] {
            repo.upsert(MicroPayment::new(
                "u1".into(),
                debt,
                Money::from_cents(150),
                NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
                PaymentFrequency::Daily,
            ))
            .unwrap();
        }

        let for_visa = repo.get_for_debt(visa).unwrap();
        assert_eq!(for_visa.len(), 2);
        assert_eq!(for_visa[0].date.to_string(), "2024-04-03");
        assert_eq!(repo.get_for_user(&"u1".into()).unwrap().len(), 3);
        assert!(repo.get_for_user(&"u2".into()).unwrap().is_empty());
    }
}
