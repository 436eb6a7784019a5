//! Pure arithmetic for the order payment ledger.
//!
//! Invariant maintained by every mutation: `balance_due == total - amount_paid`
//! and `amount_paid >= 0`. The functions here are side-effect free so the
//! invariants are testable without a database; the repository applies their
//! results inside a single transaction.

use rust_decimal::Decimal;

use super::status::PaymentStatus;

/// Recomputed aggregate fields for an order after a ledger mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerTotals {
    /// Total collected so far.
    pub amount_paid: Decimal,
    /// Remaining amount owed.
    pub balance_due: Decimal,
    /// Derived payment status.
    pub payment_status: PaymentStatus,
}

/// Derive the payment status from collected vs. owed amounts.
///
/// Paid when everything (or more) is collected, pending when nothing is,
/// partial otherwise.
pub fn payment_status_for(amount_paid: Decimal, total: Decimal) -> PaymentStatus {
    if amount_paid >= total {
        PaymentStatus::Paid
    } else if amount_paid.is_zero() {
        PaymentStatus::Pending
    } else {
        PaymentStatus::Partial
    }
}

/// Totals after adding a payment of `amount` to an order.
pub fn apply_payment(total: Decimal, current_paid: Decimal, amount: Decimal) -> LedgerTotals {
    let amount_paid = current_paid + amount;
    LedgerTotals {
        amount_paid,
        balance_due: total - amount_paid,
        payment_status: payment_status_for(amount_paid, total),
    }
}

/// Totals after removing a payment of `amount` from an order.
///
/// The collected amount is floored at zero to guard against deleting a
/// payment larger than what the order currently records.
pub fn remove_payment(total: Decimal, current_paid: Decimal, amount: Decimal) -> LedgerTotals {
    let amount_paid = (current_paid - amount).max(Decimal::ZERO);
    LedgerTotals {
        amount_paid,
        balance_due: total - amount_paid,
        payment_status: payment_status_for(amount_paid, total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn test_partial_then_paid_then_reverted() {
        let total = dec(10_000);

        let after_first = apply_payment(total, Decimal::ZERO, dec(4_000));
        assert_eq!(after_first.amount_paid, dec(4_000));
        assert_eq!(after_first.balance_due, dec(6_000));
        assert_eq!(after_first.payment_status, PaymentStatus::Partial);

        let after_second = apply_payment(total, after_first.amount_paid, dec(6_000));
        assert_eq!(after_second.amount_paid, dec(10_000));
        assert_eq!(after_second.balance_due, Decimal::ZERO);
        assert_eq!(after_second.payment_status, PaymentStatus::Paid);

        let after_delete = remove_payment(total, after_second.amount_paid, dec(6_000));
        assert_eq!(after_delete.amount_paid, dec(4_000));
        assert_eq!(after_delete.balance_due, dec(6_000));
        assert_eq!(after_delete.payment_status, PaymentStatus::Partial);
    }

    #[test]
    fn test_remove_floors_at_zero() {
        let totals = remove_payment(dec(10_000), dec(3_000), dec(5_000));
        assert_eq!(totals.amount_paid, Decimal::ZERO);
        assert_eq!(totals.balance_due, dec(10_000));
        assert_eq!(totals.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn test_balance_invariant_holds_over_sequence() {
        let total = dec(25_500);
        let mut paid = Decimal::ZERO;
        for amount in [dec(500), dec(12_000), dec(13_000), dec(1)] {
            let totals = apply_payment(total, paid, amount);
            assert_eq!(totals.balance_due, total - totals.amount_paid);
            assert!(totals.amount_paid >= Decimal::ZERO);
            paid = totals.amount_paid;
        }
        for amount in [dec(13_000), dec(20_000)] {
            let totals = remove_payment(total, paid, amount);
            assert_eq!(totals.balance_due, total - totals.amount_paid);
            assert!(totals.amount_paid >= Decimal::ZERO);
            paid = totals.amount_paid;
        }
    }

    #[test]
    fn test_overpayment_is_paid() {
        let totals = apply_payment(dec(1_000), dec(900), dec(500));
        assert_eq!(totals.payment_status, PaymentStatus::Paid);
        assert_eq!(totals.balance_due, dec(-400));
    }

    #[test]
    fn test_status_three_way_rule() {
        assert_eq!(
            payment_status_for(Decimal::ZERO, dec(100)),
            PaymentStatus::Pending
        );
        assert_eq!(
            payment_status_for(dec(50), dec(100)),
            PaymentStatus::Partial
        );
        assert_eq!(payment_status_for(dec(100), dec(100)), PaymentStatus::Paid);
    }
}
