use klondike::{Game, GameConfig, Move, PileGroup, Rank, Snapshot, StockAction, Suit};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

const GROUPS: [PileGroup; 4] = [
    PileGroup::Tableau,
    PileGroup::Foundation,
    PileGroup::Stock,
    PileGroup::Waste,
];

fn assert_full_population(snapshot: &Snapshot) {
    let unique: HashSet<(Suit, Rank)> = snapshot.cards().map(|c| (c.suit(), c.rank())).collect();
    assert_eq!(snapshot.cards().count(), 52);
    assert_eq!(unique.len(), 52);
}

fn assert_piles_well_formed(snapshot: &Snapshot) {
    for pile in snapshot.tableau() {
        // no face-down card above a face-up one
        let first_up = pile.iter().position(|c| c.is_face_up()).unwrap_or(pile.len());
        assert!(pile[first_up..].iter().all(|c| c.is_face_up()));
        if let Some(top) = pile.last() {
            assert!(top.is_face_up());
        }
    }
    for pile in snapshot.foundation() {
        for (i, card) in pile.iter().enumerate() {
            assert_eq!(card.rank().number() as usize, i + 1);
            assert_eq!(card.suit(), pile[0].suit());
        }
    }
    assert!(snapshot.waste().iter().all(|c| c.is_face_up()));
    assert!(snapshot.stock().iter().all(|c| !c.is_face_up()));
}

fn random_request<R: Rng>(rng: &mut R) -> Move {
    Move::new(
        GROUPS[rng.random_range(0..GROUPS.len())],
        rng.random_range(0..8),
        GROUPS[rng.random_range(0..GROUPS.len())],
        rng.random_range(0..8),
        rng.random_range(0..4),
    )
}

#[test]
fn random_play_keeps_every_invariant() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::deal_with(GameConfig::default(), &mut rng);

        for _ in 0..300 {
            let before = game.snapshot();

            // arbitrary requests either succeed or leave everything alone
            let request = random_request(&mut rng);
            let history = game.history_len();
            if game.apply_move(&request).is_err() {
                assert_eq!(game.snapshot(), before);
                assert_eq!(game.history_len(), history);
            } else {
                assert!(game.undo());
                assert_eq!(game.snapshot(), before);
            }

            let moves = game.legal_moves();
            if !moves.is_empty() && rng.random_bool(0.7) {
                let mv = moves[rng.random_range(0..moves.len())];
                game.apply_move(&mv).unwrap();
                assert_eq!(game.history_len(), history + 1);
            } else {
                game.draw_from_stock();
            }

            let after = game.snapshot();
            assert_full_population(&after);
            assert_piles_well_formed(&after);
        }
    }
}

#[test]
fn undo_walks_back_through_every_move() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut game = Game::deal_with(GameConfig { undoable_draws: true }, &mut rng);
    let start = game.snapshot();

    let mut states = vec![start.clone()];
    for _ in 0..60 {
        let moves = game.legal_moves();
        let changed = if let Some(mv) = moves.first() {
            game.apply_move(mv).is_ok()
        } else {
            game.draw_from_stock() != StockAction::Empty
        };
        if changed {
            states.push(game.snapshot());
        }
    }

    states.pop();
    while let Some(expected) = states.pop() {
        assert!(game.undo());
        assert_eq!(game.snapshot(), expected);
    }
    assert!(!game.undo());
    assert_eq!(game.snapshot(), start);
}

#[test]
fn stock_cycles_back_through_the_waste() {
    let mut game = Game::deal_with(GameConfig::default(), &mut StdRng::seed_from_u64(3));
    let stock = game.stock().size();

    for _ in 0..stock {
        assert!(matches!(game.draw_from_stock(), StockAction::Drawn(_)));
    }
    assert!(game.stock().is_empty());
    assert_eq!(game.waste().size(), stock);

    assert_eq!(game.draw_from_stock(), StockAction::Recycled(stock));
    assert!(game.waste().is_empty());
    assert_eq!(game.stock().size(), stock);
    assert!(game.stock().display().iter().all(|c| !c.is_face_up()));
    assert_eq!(game.history_len(), 0);
}

#[test]
fn hints_are_always_playable() {
    for seed in 0..30 {
        let mut game = Game::deal_with(GameConfig::default(), &mut StdRng::seed_from_u64(seed));
        for _ in 0..100 {
            match game.find_hint() {
                Some(hint) => {
                    assert!(game.legal_moves().contains(&hint));
                    game.apply_move(&hint).unwrap();
                }
                None => {
                    if game.draw_from_stock() == StockAction::Empty {
                        break;
                    }
                }
            }
        }
        assert_full_population(&game.snapshot());
    }
}

#[test]
fn locate_agrees_with_the_piles() {
    let game = Game::deal_with(GameConfig::default(), &mut StdRng::seed_from_u64(11));
    for (i, pile) in game.snapshot().tableau().iter().enumerate() {
        for card in pile {
            assert_eq!(game.locate(card.suit(), card.rank()), Some((PileGroup::Tableau, i)));
        }
    }
    for card in game.stock().display() {
        assert_eq!(game.locate(card.suit(), card.rank()), Some((PileGroup::Stock, 0)));
    }
}
