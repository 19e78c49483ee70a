use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

pub const DECK_SIZE: usize = 52;

#[derive(Eq, Hash, Clone, Copy, PartialEq, Debug)]
pub enum Color {
    Red,
    Black,
}

#[derive(Eq, Hash, Clone, Copy, PartialEq, Debug)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

#[derive(Eq, Hash, Clone, Copy, PartialEq, PartialOrd, Ord, Debug)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

/// A playing card. Suit and rank are fixed at construction; only the
/// orientation changes during play.
#[derive(Eq, Hash, Clone, Copy, PartialEq, Debug)]
pub struct Card {
    suit: Suit,
    rank: Rank,
    face_up: bool,
}

/// The 52-card population used while dealing.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Suit {
    pub fn symbol(&self) -> &'static str {
        match *self {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
    }

    pub fn color(&self) -> Color {
        match *self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black,
        }
    }

    pub fn all() -> [Suit; 4] {
        return [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];
    }
}

impl Rank {
    pub fn symbol(&self) -> &'static str {
        match *self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// True when `self` sits directly below `other` in Ace..King order.
    /// There is no wrap from King back to Ace.
    pub fn is_one_below(&self, other: Rank) -> bool {
        self.number() + 1 == other.number()
    }

    pub fn all() -> [Rank; 13] {
        return [
            Rank::Ace,
            Rank::Two,
            Rank::Three,
            Rank::Four,
            Rank::Five,
            Rank::Six,
            Rank::Seven,
            Rank::Eight,
            Rank::Nine,
            Rank::Ten,
            Rank::Jack,
            Rank::Queen,
            Rank::King,
        ];
    }
}

impl Card {
    /// New cards start face-down.
    pub fn new(suit: Suit, rank: Rank) -> Card {
        Card {
            suit,
            rank,
            face_up: false,
        }
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn color(&self) -> Color {
        self.suit.color()
    }

    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    pub fn flip(&mut self) {
        self.face_up = !self.face_up;
    }

    pub fn set_face_up(&mut self, face_up: bool) {
        self.face_up = face_up;
    }

    pub fn is_opposite_color(&self, other: &Card) -> bool {
        self.color() != other.color()
    }

    /// Same identity, ignoring orientation.
    pub fn is(&self, suit: Suit, rank: Rank) -> bool {
        self.suit == suit && self.rank == rank
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

impl Deck {
    /// Suit-major, rank-minor order, all face-down.
    pub fn standard() -> Deck {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for s in Suit::all() {
            for r in Rank::all() {
                cards.push(Card::new(s, r));
            }
        }
        return Deck { cards };
    }

    pub fn new() -> Deck {
        let mut deck = Deck::standard();
        deck.shuffle();
        deck
    }

    pub fn shuffled_with<R: Rng + ?Sized>(rng: &mut R) -> Deck {
        let mut deck = Deck::standard();
        deck.cards.shuffle(rng);
        deck
    }

    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut rand::rng());
    }

    /// Takes up to `count` cards off the end of the deck, in the order they
    /// come off. Returns fewer when the deck runs out.
    pub fn draw(&mut self, count: usize) -> Vec<Card> {
        let take = count.min(self.cards.len());
        let split = self.cards.len() - take;
        let mut drawn = self.cards.split_off(split);
        drawn.reverse();
        drawn
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }
}

impl Default for Deck {
    fn default() -> Deck {
        Deck::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_every_card_once() {
        let deck = Deck::standard();
        let unique: HashSet<(Suit, Rank)> =
            deck.cards.iter().map(|c| (c.suit(), c.rank())).collect();
        assert_eq!(deck.len(), DECK_SIZE);
        assert_eq!(unique.len(), DECK_SIZE);
        assert!(deck.cards.iter().all(|c| !c.is_face_up()));
    }

    #[test]
    fn shuffle_keeps_the_population() {
        let mut deck = Deck::new();
        deck.shuffle();
        let unique: HashSet<(Suit, Rank)> =
            deck.cards.iter().map(|c| (c.suit(), c.rank())).collect();
        assert_eq!(unique.len(), DECK_SIZE);
    }

    #[test]
    fn draw_returns_fewer_when_exhausted() {
        let mut deck = Deck::standard();
        let last = deck.cards[DECK_SIZE - 1];
        let first = deck.draw(1);
        assert_eq!(first, vec![last]);

        let rest = deck.draw(100);
        assert_eq!(rest.len(), DECK_SIZE - 1);
        assert!(deck.is_empty());
        assert!(deck.draw(3).is_empty());
    }

    #[test]
    fn colors_and_adjacency() {
        assert_eq!(Suit::Hearts.color(), Color::Red);
        assert_eq!(Suit::Diamonds.color(), Color::Red);
        assert_eq!(Suit::Clubs.color(), Color::Black);
        assert_eq!(Suit::Spades.color(), Color::Black);

        assert!(Rank::Ace.is_one_below(Rank::Two));
        assert!(Rank::Queen.is_one_below(Rank::King));
        assert!(!Rank::King.is_one_below(Rank::Ace));
        assert!(!Rank::Five.is_one_below(Rank::Five));
    }

    #[test]
    fn flip_toggles_orientation() {
        let mut card = Card::new(Suit::Spades, Rank::Ten);
        assert!(!card.is_face_up());
        card.flip();
        assert!(card.is_face_up());
        assert_eq!(card.to_string(), "10♠");
    }
}
