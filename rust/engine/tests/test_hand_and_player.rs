use blackjack_engine::cards::{Card, Rank, Suit};
use blackjack_engine::errors::GameError;
use blackjack_engine::hand::Hand;
use blackjack_engine::player::{Player, PlayerStatus, Role};

fn c(rank: Rank) -> Card {
    Card::new(rank, Suit::Spades)
}

#[test]
fn ace_nine_counts_twenty_with_usable_ace() {
    let hand = Hand::from_cards(&[c(Rank::Ace), c(Rank::Nine)]);
    assert_eq!(hand.points(), 20);
    assert!(hand.usable_ace());
    assert_eq!(hand.base_points(), 10);
}

#[test]
fn only_one_ace_is_usable() {
    let hand = Hand::from_cards(&[c(Rank::Ace), c(Rank::Ace), c(Rank::Nine)]);
    assert_eq!(hand.base_points(), 11);
    assert_eq!(hand.points(), 21);
    assert!(hand.usable_ace());
    let marked: Vec<bool> = hand.cards().iter().map(|hc| hc.usable_ace).collect();
    assert_eq!(marked, vec![true, false, false]);
}

#[test]
fn ace_loses_bonus_when_it_would_bust() {
    let mut hand = Hand::from_cards(&[c(Rank::Ace), c(Rank::Six)]);
    assert_eq!(hand.points(), 17);
    assert!(hand.usable_ace());
    hand.draw(&[c(Rank::King)]);
    assert_eq!(hand.points(), 17);
    assert!(!hand.usable_ace());
    assert!(hand.cards().iter().all(|hc| !hc.usable_ace));
}

#[test]
fn usable_ace_marker_does_not_touch_the_card() {
    let ace = c(Rank::Ace);
    let soft = Hand::from_cards(&[ace, c(Rank::Five)]);
    let hard = Hand::from_cards(&[ace, c(Rank::Five), c(Rank::Nine)]);
    assert!(soft.cards()[0].usable_ace);
    assert!(!hard.cards()[0].usable_ace);
    assert_eq!(soft.cards()[0].card, hard.cards()[0].card);
    assert_eq!(soft.cards()[0].card, ace);
}

#[test]
fn face_cards_count_ten() {
    let hand = Hand::from_cards(&[c(Rank::Jack), c(Rank::Queen)]);
    assert_eq!(hand.points(), 20);
    assert!(!hand.usable_ace());
}

#[test]
fn two_card_twenty_one_with_ace_is_natural() {
    let mut p = Player::new(0, Role::Gambler);
    p.draw(&[c(Rank::Ace), c(Rank::King)]);
    assert_eq!(p.points(), 21);
    assert_eq!(p.status(), PlayerStatus::Natural);
}

#[test]
fn three_card_twenty_one_is_not_natural() {
    let mut p = Player::new(0, Role::Gambler);
    p.draw(&[c(Rank::Ace), c(Rank::Five)]);
    p.draw(&[c(Rank::Five)]);
    assert_eq!(p.points(), 21);
    assert_eq!(p.status(), PlayerStatus::Playing);
}

#[test]
fn going_over_twenty_one_busts() {
    let mut p = Player::new(1, Role::Dealer);
    p.draw(&[c(Rank::King), c(Rank::Six)]);
    assert_eq!(p.status(), PlayerStatus::Playing);
    p.draw(&[c(Rank::Nine)]);
    assert_eq!(p.points(), 25);
    assert_eq!(p.status(), PlayerStatus::LoseBust);
}

#[test]
fn stick_after_bust_is_rejected() {
    let mut p = Player::new(3, Role::Gambler);
    p.draw(&[c(Rank::King), c(Rank::Queen), c(Rank::Two)]);
    assert_eq!(p.status(), PlayerStatus::LoseBust);
    assert_eq!(p.stick(), Err(GameError::StickAfterBust { seat: 3 }));
    assert_eq!(p.status(), PlayerStatus::LoseBust);
}

#[test]
fn stick_sets_status() {
    let mut p = Player::new(0, Role::Gambler);
    p.draw(&[c(Rank::King), c(Rank::Eight)]);
    p.stick().expect("playing seat can stick");
    assert_eq!(p.status(), PlayerStatus::Stick);
}

#[test]
fn reset_clears_hand_and_status() {
    let mut p = Player::new(0, Role::Gambler);
    p.draw(&[c(Rank::Ace), c(Rank::Ten)]);
    p.reset();
    assert!(p.hand().is_empty());
    assert_eq!(p.points(), 0);
    assert!(!p.usable_ace());
    assert_eq!(p.status(), PlayerStatus::Playing);
}
