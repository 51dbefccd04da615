//! Split calculator
//!
//! Divides an expense amount across participants in whole cents using
//! largest-remainder allocation, so shares always add up to the total.

use crate::error::{DrainerError, DrainerResult};
use crate::models::{Money, Participant, UserId};

/// A person taking a share of an expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitMember {
    pub user_id: UserId,
    pub name: String,
}

impl SplitMember {
    pub fn new(user_id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
        }
    }

    fn display_name(&self) -> String {
        let name = self.name.trim();
        if name.is_empty() {
            self.user_id.to_string()
        } else {
            name.to_string()
        }
    }
}

/// Allocate `total` proportionally to `weights`
///
/// Each slot first gets the floor of its exact share. The cents left over go
/// one at a time to the slots with the largest remainders; ties go to the
/// earliest slot.
pub fn allocate(total: Money, weights: &[u32]) -> DrainerResult<Vec<Money>> {
    if total.is_negative() {
        return Err(DrainerError::Validation(format!(
            "Cannot allocate a negative amount: {}",
            total
        )));
    }
    if weights.is_empty() {
        return Err(DrainerError::Validation(
            "Cannot allocate across zero shares".into(),
        ));
    }

    let weight_sum: i128 = weights.iter().map(|&w| i128::from(w)).sum();
    if weight_sum == 0 {
        return Err(DrainerError::Validation(
            "At least one share weight must be non-zero".into(),
        ));
    }

    let total_cents = i128::from(total.cents());
    let mut shares = Vec::with_capacity(weights.len());
    let mut remainders = Vec::with_capacity(weights.len());
    for (index, &weight) in weights.iter().enumerate() {
        let exact = total_cents * i128::from(weight);
        shares.push(exact / weight_sum);
        remainders.push((exact % weight_sum, index));
    }

    let mut leftover = total_cents - shares.iter().sum::<i128>();
    // Largest remainder first, earliest index on ties
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for (_, index) in remainders {
        if leftover == 0 {
            break;
        }
        shares[index] += 1;
        leftover -= 1;
    }

    // Every share is bounded by `total`, which came from an i64
    Ok(shares
        .into_iter()
        .map(|cents| Money::from_cents(cents as i64))
        .collect())
}

/// Split `amount` equally between the payer and `others`
///
/// The payer comes first and gets a paid share. Anyone in `others` who is the
/// payer or who already appears earlier is ignored. With nobody else left
/// the payer owns the whole amount.
pub fn split_equally(
    amount: Money,
    payer: &SplitMember,
    others: &[SplitMember],
) -> DrainerResult<Vec<Participant>> {
    if !amount.is_positive() {
        return Err(DrainerError::Validation(format!(
            "Expense amount must be positive, got {}",
            amount
        )));
    }

    let mut members = vec![payer];
    for member in others {
        if !members.iter().any(|m| m.user_id == member.user_id) {
            members.push(member);
        }
    }

    let shares = allocate(amount, &vec![1; members.len()])?;

    Ok(members
        .into_iter()
        .zip(shares)
        .map(|(member, share)| {
            let is_payer = member.user_id == payer.user_id;
            Participant::new(member.user_id.clone(), member.display_name(), share, is_payer)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(ids: &[&str]) -> Vec<SplitMember> {
        ids.iter().map(|id| SplitMember::new(*id, "")).collect()
    }

    #[test]
    fn test_allocate_exact_division() {
        let shares = allocate(Money::from_cents(900), &[1, 1, 1]).unwrap();
        assert_eq!(shares, vec![Money::from_cents(300); 3]);
    }

    #[test]
    fn test_allocate_ties_go_to_earliest() {
        let shares = allocate(Money::from_cents(12050), &[1, 1, 1, 1]).unwrap();
        let cents: Vec<i64> = shares.iter().map(|m| m.cents()).collect();
        assert_eq!(cents, vec![3013, 3013, 3012, 3012]);
    }

    #[test]
    fn test_allocate_weighted_largest_remainder() {
        // 1000 * 1/6 = 166.67, 1000 * 2/6 = 333.33, 1000 * 3/6 = 500
        let shares = allocate(Money::from_cents(1000), &[1, 2, 3]).unwrap();
        let cents: Vec<i64> = shares.iter().map(|m| m.cents()).collect();
        assert_eq!(cents, vec![167, 333, 500]);
    }

    #[test]
    fn test_allocate_rejects_bad_input() {
        assert!(allocate(Money::from_cents(-1), &[1]).unwrap_err().is_validation());
        assert!(allocate(Money::from_cents(100), &[]).unwrap_err().is_validation());
        assert!(allocate(Money::from_cents(100), &[0, 0]).unwrap_err().is_validation());
    }

    #[test]
    fn test_split_sums_exactly_for_many_sizes() {
        let payer = SplitMember::new("payer", "Payer");
        for cents in [1, 2, 99, 100, 101, 12050, 33333, 1_000_001] {
            for n in 0..12 {
                let others: Vec<SplitMember> = (0..n)
                    .map(|i| SplitMember::new(format!("u{}", i), ""))
                    .collect();
                let amount = Money::from_cents(cents);
                let participants = split_equally(amount, &payer, &others).unwrap();

                let total: Money = participants.iter().map(|p| p.amount).sum();
                assert_eq!(total, amount, "{} cents across {}", cents, n + 1);

                let max = participants.iter().map(|p| p.amount).max().unwrap();
                let min = participants.iter().map(|p| p.amount).min().unwrap();
                assert!((max - min).cents() <= 1);
            }
        }
    }

    #[test]
    fn test_split_payer_first_and_paid() {
        let payer = SplitMember::new("u1", "Alex");
        let participants =
            split_equally(Money::from_cents(12050), &payer, &members(&["u2", "u3", "u4"])).unwrap();

        assert_eq!(participants.len(), 4);
        assert_eq!(participants[0].user_id, UserId::from("u1"));
        assert_eq!(participants[0].name, "Alex");
        assert!(participants[0].paid);
        assert_eq!(participants[0].amount, Money::from_cents(3013));
        assert!(participants[1..].iter().all(|p| !p.paid));
        assert_eq!(participants[1].name, "u2");
    }

    #[test]
    fn test_split_without_others_is_payer_only() {
        let payer = SplitMember::new("u1", "Alex");
        let participants = split_equally(Money::from_cents(4599), &payer, &[]).unwrap();

        assert_eq!(participants.len(), 1);
        assert!(participants[0].paid);
        assert_eq!(participants[0].amount, Money::from_cents(4599));
    }

    #[test]
    fn test_split_ignores_payer_and_duplicates_in_others() {
        let payer = SplitMember::new("u1", "Alex");
        let participants =
            split_equally(Money::from_cents(1000), &payer, &members(&["u1", "u2", "u2"])).unwrap();

        assert_eq!(participants.len(), 2);
        assert_eq!(participants[1].amount, Money::from_cents(500));
    }

    #[test]
    fn test_split_rejects_non_positive_amount() {
        let payer = SplitMember::new("u1", "");
        assert!(split_equally(Money::zero(), &payer, &[]).unwrap_err().is_validation());
        assert!(split_equally(Money::from_cents(-5), &payer, &[])
            .unwrap_err()
            .is_validation());
    }
}
