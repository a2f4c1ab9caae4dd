mod common;

use common::{escrow, owner, Harness, DAY, STARTING_BALANCE};
use tanda_core::{Address, TandaError, TandaEvent, TokenId, TokenLedger};
use tokio::sync::broadcast::error::TryRecvError;

#[tokio::test]
async fn test_five_player_month_cycle() {
    let h = Harness::new(5);
    let month = DAY * 30;
    let game_id = h.ready_game(1, month).await;

    h.fund_current_period(game_id, 1).await;
    assert_eq!(h.tanda.get_prize(game_id, 0).await, 5);

    h.clock.advance(month);
    let winner = h.tanda.get_winner(game_id, 0).await.unwrap();
    assert_eq!(winner, h.players[1]);

    let paid = h.tanda.claim_prize(&winner, game_id, 0).await.unwrap();
    assert_eq!(paid, 5);
    assert_eq!(h.balance(&winner), STARTING_BALANCE - 1 + 5);
    assert_eq!(h.tanda.get_prize(game_id, 0).await, 0);
    assert_eq!(h.tanda.get_revenue(&h.token).await, 0);
    assert_eq!(h.balance(&escrow()), 0);

    let again = h.tanda.claim_prize(&winner, game_id, 0).await;
    assert!(matches!(again, Err(TandaError::NotAllPlayersHaveDeposited)));
}

#[tokio::test]
async fn test_claim_requires_turn_and_full_funding() {
    let h = Harness::new(3);
    let game_id = h.ready_game(10, DAY).await;
    let winner = h.tanda.get_winner(game_id, 0).await.unwrap();
    let other = h.players.iter().find(|p| **p != winner).unwrap().clone();

    h.tanda.deposit(&h.players[0], game_id, 10).await.unwrap();
    h.tanda.deposit(&h.players[1], game_id, 10).await.unwrap();

    let early = h.tanda.claim_prize(&winner, game_id, 0).await;
    assert!(matches!(early, Err(TandaError::NotAllPlayersHaveDeposited)));

    h.tanda.deposit(&h.players[2], game_id, 10).await.unwrap();

    let wrong = h.tanda.claim_prize(&other, game_id, 0).await;
    assert!(matches!(wrong, Err(TandaError::IsNotPlayerTurnToWithdraw)));

    let stranger = h.tanda.claim_prize(&Address::from("x"), game_id, 7).await;
    assert!(matches!(stranger, Err(TandaError::IsNotPlayerTurnToWithdraw)));

    assert_eq!(h.tanda.claim_prize(&winner, game_id, 0).await.unwrap(), 30);
}

#[tokio::test]
async fn test_fee_accumulates_and_is_withdrawn() {
    let h = Harness::new(5);
    let mut events = h.tanda.subscribe();

    for _ in 0..2 {
        let game_id = h.ready_game(100, DAY).await;
        h.fund_current_period(game_id, 100).await;

        let winner = h.tanda.get_winner(game_id, 0).await.unwrap();
        let paid = h.tanda.claim_prize(&winner, game_id, 0).await.unwrap();
        assert_eq!(paid, 490);
    }
    assert_eq!(h.tanda.get_revenue(&h.token).await, 20);
    assert_eq!(h.balance(&escrow()), 20);

    let denied = h.tanda.withdraw_revenue(&h.players[0], &[h.token.clone()]).await;
    assert!(matches!(denied, Err(TandaError::Unauthorized)));
    assert_eq!(h.tanda.get_revenue(&h.token).await, 20);

    let withdrawn = h
        .tanda
        .withdraw_revenue(&owner(), &[h.token.clone(), h.token.clone()])
        .await
        .unwrap();
    assert_eq!(withdrawn, vec![(h.token.clone(), 20)]);
    assert_eq!(h.tanda.get_revenue(&h.token).await, 0);
    assert_eq!(h.balance(&owner()), 20);
    assert_eq!(h.balance(&escrow()), 0);

    let mut saw_withdrawal = false;
    while let Ok(event) = events.try_recv() {
        if let TandaEvent::RevenueWithdrawn { amount, .. } = event {
            assert_eq!(amount, 20);
            saw_withdrawal = true;
        }
    }
    assert!(saw_withdrawal);
}

#[tokio::test]
async fn test_withdraw_of_untouched_token_is_zero() {
    let h = Harness::new(2);
    let other = TokenId::from("dai");

    let withdrawn = h.tanda.withdraw_revenue(&owner(), &[other.clone()]).await.unwrap();
    assert_eq!(withdrawn, vec![(other, 0)]);
    assert_eq!(h.balance(&owner()), 0);
}

#[tokio::test]
async fn test_each_period_pays_its_own_turn_holder() {
    let h = Harness::new(3);
    let game_id = h.ready_game(10, DAY).await;
    let order = h.tanda.get_turn_order(game_id).await;

    for period in 0..3u64 {
        h.fund_current_period(game_id, 10).await;
        h.clock.advance(DAY);
        let holder = &order[period as usize];
        assert_eq!(h.tanda.claim_prize(holder, game_id, period).await.unwrap(), 30);
    }

    // everyone paid 30 and received 30
    for player in &h.players {
        assert_eq!(h.balance(player), STARTING_BALANCE);
    }
    assert!(h.tanda.is_ended(game_id).await.unwrap());
}

#[tokio::test]
async fn test_ownership_transfer_moves_withdraw_rights() {
    let h = Harness::new(2);
    let successor = Address::from("successor");

    let denied = h
        .tanda
        .transfer_ownership(&h.players[0], successor.clone())
        .await;
    assert!(matches!(denied, Err(TandaError::Unauthorized)));

    h.tanda
        .transfer_ownership(&owner(), successor.clone())
        .await
        .unwrap();
    assert_eq!(h.tanda.owner().await, successor);

    let old = h.tanda.withdraw_revenue(&owner(), &[h.token.clone()]).await;
    assert!(matches!(old, Err(TandaError::Unauthorized)));
    assert!(h
        .tanda
        .withdraw_revenue(&successor, &[h.token.clone()])
        .await
        .is_ok());
}

#[tokio::test]
async fn test_fee_percent_is_exposed() {
    let h = Harness::new(1);
    assert_eq!(h.tanda.get_fee(), 2);
}

#[tokio::test]
async fn test_failed_payout_rolls_claim_back() {
    let h = Harness::new(3);
    let game_id = h.ready_game(100, DAY).await;
    h.fund_current_period(game_id, 100).await;
    let winner = h.tanda.get_winner(game_id, 0).await.unwrap();

    // escrow can no longer cover the payout
    h.tokens
        .transfer(&h.token, &escrow(), &Address::from("drain"), 300)
        .await
        .unwrap();
    let mut events = h.tanda.subscribe();

    let result = h.tanda.claim_prize(&winner, game_id, 0).await;
    assert!(matches!(
        result,
        Err(TandaError::InsufficientBalance { need: 294, available: 0 })
    ));

    assert_eq!(h.tanda.get_prize(game_id, 0).await, 300);
    assert_eq!(h.tanda.get_revenue(&h.token).await, 0);
    assert_eq!(h.balance(&winner), STARTING_BALANCE - 100);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

    // once escrow is refilled the same claim goes through
    h.tokens
        .transfer(&h.token, &Address::from("drain"), &escrow(), 300)
        .await
        .unwrap();
    assert_eq!(h.tanda.claim_prize(&winner, game_id, 0).await.unwrap(), 294);
    assert_eq!(h.tanda.get_revenue(&h.token).await, 6);
}

#[tokio::test]
async fn test_failed_withdrawal_restores_every_token() {
    let h = Harness::new(5);
    let dai = TokenId::from("dai");

    let usdc_game = h.ready_game(100, DAY).await;
    let dai_game = h.ready_game_in(&dai, 100, DAY).await;
    for (game_id, token) in [(usdc_game, &h.token), (dai_game, &dai)] {
        for player in &h.players {
            h.tanda.deposit(player, game_id, 100).await.unwrap();
        }
        let winner = h.tanda.get_winner(game_id, 0).await.unwrap();
        h.tanda.claim_prize(&winner, game_id, 0).await.unwrap();
        assert_eq!(h.tanda.get_revenue(token).await, 10);
    }

    h.tokens
        .transfer(&dai, &escrow(), &Address::from("drain"), 10)
        .await
        .unwrap();
    let mut events = h.tanda.subscribe();

    let result = h
        .tanda
        .withdraw_revenue(&owner(), &[h.token.clone(), dai.clone()])
        .await;
    assert!(matches!(
        result,
        Err(TandaError::InsufficientBalance { need: 10, available: 0 })
    ));

    // the usdc payout made before the failure went back to escrow
    assert_eq!(h.balance(&owner()), 0);
    assert_eq!(h.balance(&escrow()), 10);
    assert_eq!(h.tanda.get_revenue(&h.token).await, 10);
    assert_eq!(h.tanda.get_revenue(&dai).await, 10);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}
