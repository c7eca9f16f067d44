//! Admissibility checks for user-entered payments.
//!
//! A payment goes from the acting user (who must currently owe money) to a
//! named recipient (who must currently be owed money) and can never exceed
//! either side's outstanding magnitude. All checks run against the current
//! balance snapshot; nothing here mutates state or issues optimistic
//! updates, the caller forwards an admitted intent to the payment ledger and
//! refreshes the snapshot afterwards.

use crate::core::errors::PaymentRejection;
use crate::core::models::balance::Balance;
use crate::core::models::payment::PaymentIntent;
use crate::core::money::{EPSILON, is_negative, is_positive, round2};

/// The most the acting user can currently pay the given recipient, or `0.0`
/// when either side fails its sign precondition. Used to pre-fill and cap
/// the payment amount field.
pub fn max_payable_for(acting_user_id: &str, to_user_id: &str, balances: &[Balance]) -> f64 {
    let acting = balances.iter().find(|b| b.user_id == acting_user_id);
    let recipient = balances.iter().find(|b| b.user_id == to_user_id);
    match (acting, recipient) {
        (Some(a), Some(r)) if is_negative(a.balance) && is_positive(r.balance) => {
            round2(a.balance.abs().min(r.balance))
        }
        _ => 0.0,
    }
}

/// Decide whether `intent` is admissible against the current snapshot.
///
/// Checks run in a fixed order and short-circuit on the first failure; each
/// failure carries its own rejection reason. On success, returns the maximum
/// amount payable between this pair (≥ the intent's amount up to tolerance).
pub fn validate_payment(
    acting_user_id: &str,
    balances: &[Balance],
    intent: &PaymentIntent,
) -> Result<f64, PaymentRejection> {
    let acting = balances
        .iter()
        .find(|b| b.user_id == acting_user_id)
        .filter(|b| is_negative(b.balance))
        .ok_or(PaymentRejection::NoCurrentUserBalance)?;

    let recipient = balances
        .iter()
        .find(|b| b.user_id == intent.to_user_id)
        .filter(|b| is_positive(b.balance))
        .ok_or(PaymentRejection::NoRecipientCreditBalance)?;

    if intent.to_user_id.is_empty() || intent.amount <= 0.0 {
        return Err(PaymentRejection::InvalidIntent);
    }

    let max_payable = round2(acting.balance.abs().min(recipient.balance));

    // Both sides are rounded before the tolerance is applied, so paying
    // exactly the displayed maximum is never spuriously rejected.
    if round2(intent.amount) > max_payable + EPSILON {
        return Err(PaymentRejection::ExceedsPayableLimit { max_payable });
    }

    Ok(max_payable)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(user_id: &str, amount: f64) -> Balance {
        Balance {
            user_id: user_id.to_string(),
            username: user_id.to_string(),
            balance: amount,
        }
    }

    fn intent(to: &str, amount: f64) -> PaymentIntent {
        PaymentIntent {
            to_user_id: to.to_string(),
            amount,
        }
    }

    #[test]
    fn debt_sized_payment_is_admissible() {
        let balances = vec![balance("a", -30.0), balance("b", 10.0), balance("c", 20.0)];
        assert_eq!(validate_payment("a", &balances, &intent("b", 10.0)), Ok(10.0));
        assert_eq!(max_payable_for("a", "b", &balances), 10.0);
    }

    #[test]
    fn one_cent_over_the_tolerance_window_is_rejected() {
        let balances = vec![balance("a", -30.0), balance("b", 10.0)];
        // 10.01 is within max + EPSILON, 10.02 is not.
        assert!(validate_payment("a", &balances, &intent("b", 10.01)).is_ok());
        assert_eq!(
            validate_payment("a", &balances, &intent("b", 10.02)),
            Err(PaymentRejection::ExceedsPayableLimit { max_payable: 10.0 })
        );
    }

    #[test]
    fn settled_user_cannot_pay() {
        // 0.005 is within EPSILON of zero, so the acting user is not a debtor.
        let balances = vec![balance("a", 0.005), balance("b", 10.0)];
        assert_eq!(
            validate_payment("a", &balances, &intent("b", 5.0)),
            Err(PaymentRejection::NoCurrentUserBalance)
        );
    }

    #[test]
    fn creditor_cannot_initiate_a_payment() {
        let balances = vec![balance("a", 10.0), balance("b", -10.0)];
        assert_eq!(
            validate_payment("a", &balances, &intent("b", 5.0)),
            Err(PaymentRejection::NoCurrentUserBalance)
        );
    }

    #[test]
    fn recipient_must_be_owed_money() {
        let balances = vec![balance("a", -10.0), balance("b", -5.0), balance("c", 15.0)];
        assert_eq!(
            validate_payment("a", &balances, &intent("b", 5.0)),
            Err(PaymentRejection::NoRecipientCreditBalance)
        );
    }

    #[test]
    fn empty_recipient_id_fails_the_recipient_lookup() {
        // The recipient is resolved before the intent's fields are inspected,
        // so a blank id surfaces as a missing credit balance rather than an
        // invalid intent.
        let balances = vec![balance("a", -10.0), balance("b", 10.0)];
        assert_eq!(
            validate_payment("a", &balances, &intent("", 5.0)),
            Err(PaymentRejection::NoRecipientCreditBalance)
        );
    }

    #[test]
    fn unknown_parties_are_rejected() {
        let balances = vec![balance("a", -10.0), balance("b", 10.0)];
        assert_eq!(
            validate_payment("ghost", &balances, &intent("b", 5.0)),
            Err(PaymentRejection::NoCurrentUserBalance)
        );
        assert_eq!(
            validate_payment("a", &balances, &intent("ghost", 5.0)),
            Err(PaymentRejection::NoRecipientCreditBalance)
        );
    }

    #[test]
    fn non_positive_amount_is_an_invalid_intent() {
        let balances = vec![balance("a", -10.0), balance("b", 10.0)];
        assert_eq!(
            validate_payment("a", &balances, &intent("b", 0.0)),
            Err(PaymentRejection::InvalidIntent)
        );
        assert_eq!(
            validate_payment("a", &balances, &intent("b", -3.0)),
            Err(PaymentRejection::InvalidIntent)
        );
    }

    #[test]
    fn max_payable_is_bounded_by_the_smaller_side() {
        let balances = vec![balance("a", -30.0), balance("b", 10.0)];
        assert_eq!(max_payable_for("a", "b", &balances), 10.0);

        let balances = vec![balance("a", -5.0), balance("b", 10.0)];
        assert_eq!(max_payable_for("a", "b", &balances), 5.0);
    }

    #[test]
    fn max_payable_defaults_to_zero_on_failed_preconditions() {
        let balances = vec![balance("a", 10.0), balance("b", -10.0)];
        assert_eq!(max_payable_for("a", "b", &balances), 0.0);
        assert_eq!(max_payable_for("missing", "b", &balances), 0.0);
        assert_eq!(max_payable_for("a", "b", &[]), 0.0);
    }

    #[test]
    fn max_payable_grows_with_either_sides_magnitude() {
        let mut previous = 0.0;
        for debt in [1.0, 5.0, 20.0, 50.0] {
            let balances = vec![balance("a", -debt), balance("b", 25.0)];
            let max = max_payable_for("a", "b", &balances);
            assert!(max >= previous);
            previous = max;
        }

        let mut previous = 0.0;
        for credit in [1.0, 5.0, 20.0, 50.0] {
            let balances = vec![balance("a", -25.0), balance("b", credit)];
            let max = max_payable_for("a", "b", &balances);
            assert!(max >= previous);
            previous = max;
        }
    }
}
