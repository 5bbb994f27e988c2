use std::collections::HashMap;

use pazaak_engine::cards::CardKind;
use pazaak_engine::deck::DrawPile;

#[test]
fn full_pile_holds_four_of_each_value() {
    let mut pile = DrawPile::new_with_seed(3);
    assert_eq!(pile.remaining(), 40);
    let mut counts: HashMap<u8, usize> = HashMap::new();
    for _ in 0..40 {
        let card = pile.draw();
        assert_eq!(card.kind, CardKind::Main);
        *counts.entry(card.value).or_insert(0) += 1;
    }
    assert_eq!(counts.len(), 10);
    assert!(counts.values().all(|&n| n == 4), "{counts:?}");
    assert_eq!(pile.remaining(), 0);
    assert_eq!(pile.refills(), 0);
}

#[test]
fn drawing_from_an_empty_pile_refills_it() {
    let mut pile = DrawPile::new_with_seed(11);
    for _ in 0..95 {
        let card = pile.draw();
        assert!((1..=10).contains(&card.value));
    }
    assert!(pile.refills() >= 1);
    assert_eq!(pile.refills(), 2);
    assert_eq!(pile.remaining(), 25);
}

#[test]
fn same_seed_same_order() {
    let mut a = DrawPile::new_with_seed(12345);
    let mut b = DrawPile::new_with_seed(12345);
    let xs: Vec<u8> = (0..60).map(|_| a.draw().value).collect();
    let ys: Vec<u8> = (0..60).map(|_| b.draw().value).collect();
    assert_eq!(xs, ys, "same seed must yield identical order");
}

#[test]
fn different_seeds_usually_differ() {
    let mut a = DrawPile::new_with_seed(1);
    let mut b = DrawPile::new_with_seed(2);
    let xs: Vec<u8> = (0..40).map(|_| a.draw().value).collect();
    let ys: Vec<u8> = (0..40).map(|_| b.draw().value).collect();
    assert_ne!(xs, ys);
}

#[test]
fn stacked_pile_deals_in_order_then_shuffles() {
    let mut pile = DrawPile::with_order(5, &[7, 2, 9]);
    assert_eq!(pile.remaining(), 3);
    assert_eq!(pile.draw().value, 7);
    assert_eq!(pile.draw().value, 2);
    assert_eq!(pile.draw().value, 9);
    let next = pile.draw();
    assert!((1..=10).contains(&next.value));
    assert_eq!(pile.refills(), 1);
    assert_eq!(pile.remaining(), 39);
}
