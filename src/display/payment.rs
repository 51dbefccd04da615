//! Micropayment and credit display formatting

use std::collections::HashMap;

use crate::models::{CreditScore, DebtId, MicroPayment};
use crate::services::credit::Simulation;

/// Format payment history; `debt_names` resolves debt ids for display
pub fn format_payment_history(
    payments: &[MicroPayment],
    debt_names: &HashMap<DebtId, String>,
) -> String {
    if payments.is_empty() {
        return "No payments scheduled.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<15}  {:<10}  {:<20}  {:>10}  {:<8}  {:<10}\n",
        "ID", "Date", "Debt", "Amount", "Every", "Status"
    ));
    output.push_str(&format!(
        "{:-<15}  {:-<10}  {:-<20}  {:->10}  {:-<8}  {:-<10}\n",
        "", "", "", "", "", ""
    ));

    for payment in payments {
        let debt = debt_names
            .get(&payment.debt_id)
            .cloned()
            .unwrap_or_else(|| payment.debt_id.to_string());
        output.push_str(&format!(
            "{:<15}  {:<10}  {:<20}  {:>10}  {:<8}  {:<10}\n",
            payment.id.to_string(),
            payment.date.format("%Y-%m-%d").to_string(),
            debt,
            payment.amount,
            payment.frequency.to_string(),
            payment.status.to_string(),
        ));
    }

    output
}

pub fn format_credit_score(score: &CreditScore, subscribed: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("Credit Score: {} ({})\n", score.score, score.band()));
    output.push_str(&format!(
        "  Last updated: {}\n",
        score.last_updated.format("%Y-%m-%d")
    ));
    output.push_str(&format!(
        "  Bureau reporting: {}\n",
        if subscribed { "active" } else { "not subscribed" }
    ));

    let f = &score.factors;
    output.push_str("\n  Factors:\n");
    output.push_str(&format!("    Payment history:    {}%\n", f.payment_history));
    output.push_str(&format!("    Credit utilization: {}%\n", f.credit_utilization));
    output.push_str(&format!(
        "    Credit age:         {}y {}m\n",
        f.credit_age_months / 12,
        f.credit_age_months % 12
    ));
    output.push_str(&format!("    New credit:         {}\n", f.new_credit));
    output.push_str(&format!("    Credit mix:         {}\n", f.credit_mix));

    if !score.actions.is_empty() {
        output.push_str("\n  Ways to improve:\n");
        for (i, action) in score.actions.iter().enumerate() {
            output.push_str(&format!(
                "    {}. {} (+{} pts, {})\n",
                i + 1,
                action.description,
                action.impact_points,
                action.time_period
            ));
        }
    }

    output
}

pub fn format_simulation(sim: &Simulation) -> String {
    let mut output = format!(
        "Projected score: {} -> {} ({:+}) {}\n",
        sim.current,
        sim.projected,
        sim.gain(),
        sim.band
    );
    for action in &sim.applied {
        output.push_str(&format!("  + {} ({:+})\n", action.description, action.impact_points));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, PaymentFrequency};
    use crate::services::credit::CreditSimulator;
    use chrono::NaiveDate;

    #[test]
    fn test_history_uses_debt_names() {
        let debt_id = DebtId::new();
        let payment = MicroPayment::new(
            "me".into(),
            debt_id,
            Money::from_cents(300),
            NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
            PaymentFrequency::Daily,
        );
        let names = HashMap::from([(debt_id, "Visa".to_string())]);

        let output = format_payment_history(&[payment], &names);
        assert!(output.contains("Visa"));
        assert!(output.contains("$3.00"));
        assert!(output.contains("pending"));
    }

    #[test]
    fn test_credit_output() {
        let score = CreditScore::default();
        let output = format_credit_score(&score, false);
        assert!(output.contains("680 (Good)"));
        assert!(output.contains("1. Pay revolving balances"));

        let sim = CreditSimulator::new(&score).simulate(&[0]).unwrap();
        assert!(format_simulation(&sim).contains("680 -> 698 (+18)"));
    }
}
