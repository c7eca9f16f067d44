use crate::DivvyError;
use crate::core::models::expense::CreateExpense;
use crate::core::money::is_zero;
use crate::core::settle::settlement_suggestions;
use crate::tests::{create_test_service, register_test_user, session_for};

#[tokio::test]
async fn equal_split_expense_produces_a_zero_sum_snapshot() {
    let _ = env_logger::try_init();
    let service = create_test_service();

    let alice = register_test_user(&service, "alice").await;
    let bob = register_test_user(&service, "bob").await;
    let carol = register_test_user(&service, "carol").await;
    let session = session_for(&alice);

    let group = service
        .create_group("Flat", vec![alice.id.clone(), bob.id.clone(), carol.id.clone()], &session)
        .await
        .unwrap();

    service
        .add_expense(
            &group.id,
            CreateExpense {
                amount: 30.0,
                description: "Groceries".to_string(),
            },
            &session,
        )
        .await
        .unwrap();

    let balances = service.group_balances(&group.id, &session).await.unwrap();
    assert_eq!(balances.len(), 3);
    // Snapshot keeps member order: payer first, then the two debtors.
    assert_eq!(balances[0].user_id, alice.id);
    assert_eq!(balances[0].balance, 20.0);
    assert_eq!(balances[1].balance, -10.0);
    assert_eq!(balances[2].balance, -10.0);

    let total: f64 = balances.iter().map(|b| b.balance).sum();
    assert!(is_zero(total));
}

#[tokio::test]
async fn suggestions_walk_debtors_against_creditors_in_snapshot_order() {
    let service = create_test_service();

    let alice = register_test_user(&service, "alice").await;
    let bob = register_test_user(&service, "bob").await;
    let carol = register_test_user(&service, "carol").await;
    let session = session_for(&alice);

    let group = service
        .create_group("Flat", vec![alice.id.clone(), bob.id.clone(), carol.id.clone()], &session)
        .await
        .unwrap();

    service
        .add_expense(
            &group.id,
            CreateExpense {
                amount: 30.0,
                description: "Groceries".to_string(),
            },
            &session,
        )
        .await
        .unwrap();

    let suggestions = service.settlement_suggestions(&group.id, &session).await.unwrap();
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].from.user_id, bob.id);
    assert_eq!(suggestions[0].to.user_id, alice.id);
    assert_eq!(suggestions[0].amount, 10.0);
    assert_eq!(suggestions[1].from.user_id, carol.id);
    assert_eq!(suggestions[1].to.user_id, alice.id);
    assert_eq!(suggestions[1].amount, 10.0);
}

#[tokio::test]
async fn expense_write_invalidates_the_cached_snapshot() {
    let service = create_test_service();

    let alice = register_test_user(&service, "alice").await;
    let bob = register_test_user(&service, "bob").await;
    let session = session_for(&alice);

    let group = service
        .create_group("Flat", vec![alice.id.clone(), bob.id.clone()], &session)
        .await
        .unwrap();

    let before = service.group_balances(&group.id, &session).await.unwrap();
    assert!(before.iter().all(|b| is_zero(b.balance)));

    service
        .add_expense(
            &group.id,
            CreateExpense {
                amount: 10.0,
                description: "Coffee".to_string(),
            },
            &session,
        )
        .await
        .unwrap();

    let after = service.group_balances(&group.id, &session).await.unwrap();
    assert_eq!(after[0].balance, 5.0);
    assert_eq!(after[1].balance, -5.0);
}

#[tokio::test]
async fn expense_input_validation_rejects_bad_amounts() {
    let service = create_test_service();
    let alice = register_test_user(&service, "alice").await;
    let session = session_for(&alice);
    let group = service.create_group("Flat", vec![], &session).await.unwrap();

    for (amount, description) in [
        (0.0, "zero"),
        (-5.0, "negative"),
        (1_000_001.0, "too large"),
        (10.123, "sub-cent precision"),
    ] {
        let result = service
            .add_expense(
                &group.id,
                CreateExpense {
                    amount,
                    description: description.to_string(),
                },
                &session,
            )
            .await;
        assert!(
            matches!(result, Err(DivvyError::InvalidInput(_, _))),
            "amount {amount} should be rejected"
        );
    }

    let result = service
        .add_expense(
            &group.id,
            CreateExpense {
                amount: 10.0,
                description: "   ".to_string(),
            },
            &session,
        )
        .await;
    assert!(matches!(result, Err(DivvyError::InvalidInput(_, _))));
}

#[tokio::test]
async fn concurrent_suggestion_runs_over_independent_snapshots() {
    use crate::core::models::balance::Balance;

    let snapshots: Vec<Vec<Balance>> = (1..=4)
        .map(|i| {
            let amount = 10.0 * i as f64;
            vec![
                Balance {
                    user_id: "a".to_string(),
                    username: "a".to_string(),
                    balance: -amount,
                },
                Balance {
                    user_id: "b".to_string(),
                    username: "b".to_string(),
                    balance: amount,
                },
            ]
        })
        .collect();

    let handles: Vec<_> = snapshots
        .iter()
        .cloned()
        .map(|snapshot| tokio::spawn(async move { settlement_suggestions(&snapshot) }))
        .collect();
    let results = futures::future::join_all(handles).await;

    for (i, result) in results.into_iter().enumerate() {
        let suggestions = result.unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].amount, 10.0 * (i + 1) as f64);
    }
}
