//! Ledger consistency checks
//!
//! Neither check is an assertion. Both report what they find and log a
//! warning on mismatch; callers decide what to do with the result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::account_balance;
use crate::models::Ledger;
use crate::period::Period;
use crate::statements::{CashFlowSummary, StatementSettings};

/// Global double-entry totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerBalance {
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    /// Debit minus credit
    pub difference: Decimal,
    pub balanced: bool,
}

/// Σdebit against Σcredit over the whole ledger
pub fn check_balance(ledger: &Ledger) -> LedgerBalance {
    let total_debit: Decimal = ledger.entries().iter().map(|e| e.debit).sum();
    let total_credit: Decimal = ledger.entries().iter().map(|e| e.credit).sum();
    let difference = total_debit - total_credit;
    let balanced = difference.is_zero();

    if !balanced {
        log::warn!(
            "Ledger does not balance: debits {} vs credits {} (difference {})",
            total_debit,
            total_credit,
            difference
        );
    }

    LedgerBalance {
        total_debit,
        total_credit,
        difference,
        balanced,
    }
}

/// Computed ending cash against the cash account's own balance for a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashReconciliation {
    pub period: Period,
    /// Beginning cash plus net activities
    pub computed_ending: Decimal,
    /// Σdebit − Σcredit of the cash account within the period
    pub ledger_balance: Decimal,
    /// Computed minus ledger
    pub discrepancy: Decimal,
}

impl CashReconciliation {
    pub fn is_reconciled(&self) -> bool {
        self.discrepancy.is_zero()
    }
}

/// Reconcile both columns of a cash flow summary, current first
pub fn reconcile_cash(
    ledger: &Ledger,
    summary: &CashFlowSummary,
    settings: &StatementSettings,
) -> [CashReconciliation; 2] {
    let reconcile = |period: Period, computed_ending: Decimal| {
        let ledger_balance = account_balance(ledger, period, &settings.cash_account);
        let result = CashReconciliation {
            period,
            computed_ending,
            ledger_balance,
            discrepancy: computed_ending - ledger_balance,
        };
        if !result.is_reconciled() {
            log::warn!(
                "{} for {}: computed {} but the ledger shows {} (off by {})",
                settings.ending_label(),
                period,
                computed_ending,
                ledger_balance,
                result.discrepancy
            );
        }
        result
    };

    [
        reconcile(summary.comparison.current(), summary.ending_cash.current),
        reconcile(summary.comparison.previous(), summary.ending_cash.previous),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::Comparison;
    use crate::statements::cash_flow_summary;
    use crate::test_support::{entry, ledger};
    use rust_decimal_macros::dec;

    #[test]
    fn test_balanced_ledger() {
        let ledger = ledger(vec![
            entry("2025-05-01", "Asset", "Cash at Bank", dec!(1000), dec!(0)),
            entry("2025-05-01", "Revenue", "Service Revenue", dec!(0), dec!(1000)),
        ]);
        let balance = check_balance(&ledger);
        assert!(balance.balanced);
        assert_eq!(balance.total_debit, dec!(1000));
        assert_eq!(balance.difference, Decimal::ZERO);
    }

    #[test]
    fn test_unbalanced_ledger() {
        let ledger = ledger(vec![
            entry("2025-05-01", "Asset", "Cash at Bank", dec!(1000), dec!(0)),
            entry("2025-05-01", "Revenue", "Service Revenue", dec!(0), dec!(900)),
        ]);
        let balance = check_balance(&ledger);
        assert!(!balance.balanced);
        assert_eq!(balance.difference, dec!(100));
    }

    #[test]
    fn test_empty_ledger_balances() {
        assert!(check_balance(&Ledger::default()).balanced);
    }

    #[test]
    fn test_reconcile_cash() {
        // Monthly trial balance rows: the cash line is the month's balance
        let ledger = ledger(vec![
            entry("2025-04-30", "Asset", "Cash at Bank", dec!(1000), dec!(0)),
            entry("2025-04-30", "Revenue", "Service Revenue", dec!(0), dec!(1000)),
            entry("2025-05-31", "Asset", "Cash at Bank", dec!(1600), dec!(0)),
            entry("2025-05-31", "Revenue", "Service Revenue", dec!(0), dec!(600)),
        ]);
        let comparison =
            Comparison::new(Period::month(2025, 5).unwrap(), Period::month(2025, 4).unwrap()).unwrap();
        let settings = StatementSettings::default();
        let summary = cash_flow_summary(&ledger, comparison, &settings);

        let [current, previous] = reconcile_cash(&ledger, &summary, &settings);
        assert_eq!(current.period, comparison.current());
        assert_eq!(current.computed_ending, dec!(1600));
        assert_eq!(current.ledger_balance, dec!(1600));
        assert!(current.is_reconciled());

        assert_eq!(previous.computed_ending, dec!(1000));
        assert!(previous.is_reconciled());
    }

    #[test]
    fn test_reconcile_reports_discrepancy() {
        let ledger = ledger(vec![
            entry("2025-04-30", "Asset", "Cash at Bank", dec!(1000), dec!(0)),
            entry("2025-05-31", "Asset", "Cash at Bank", dec!(1200), dec!(0)),
            entry("2025-05-31", "Revenue", "Service Revenue", dec!(0), dec!(100)),
        ]);
        let comparison =
            Comparison::new(Period::month(2025, 5).unwrap(), Period::month(2025, 4).unwrap()).unwrap();
        let settings = StatementSettings::default();
        let summary = cash_flow_summary(&ledger, comparison, &settings);

        let [current, _] = reconcile_cash(&ledger, &summary, &settings);
        assert_eq!(current.computed_ending, dec!(1100));
        assert_eq!(current.discrepancy, dec!(-100));
        assert!(!current.is_reconciled());
    }
}
