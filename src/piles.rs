use super::card::Card;
use super::error::PileError;
use super::stack::{Queue, Sequence, Stack};

pub const TABLEAU_PILES: usize = 7;
pub const FOUNDATION_PILES: usize = 4;

/// The seven play piles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tableau {
    piles: [Sequence<Card>; TABLEAU_PILES],
}

/// The four ascending same-suit piles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Foundation {
    piles: [Stack<Card>; FOUNDATION_PILES],
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Waste {
    cards: Stack<Card>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stock {
    cards: Queue<Card>,
}

fn check_index(index: usize, size: usize) -> Result<(), PileError> {
    if index < size {
        Ok(())
    } else {
        Err(PileError::IndexOutOfRange { index, size })
    }
}

impl Tableau {
    pub fn new() -> Tableau {
        Tableau::default()
    }

    pub fn pile(&self, index: usize) -> Result<&Sequence<Card>, PileError> {
        check_index(index, TABLEAU_PILES)?;
        Ok(&self.piles[index])
    }

    pub(crate) fn pile_mut(&mut self, index: usize) -> Result<&mut Sequence<Card>, PileError> {
        check_index(index, TABLEAU_PILES)?;
        Ok(&mut self.piles[index])
    }

    pub fn piles(&self) -> &[Sequence<Card>; TABLEAU_PILES] {
        &self.piles
    }

    pub(crate) fn piles_mut(&mut self) -> &mut [Sequence<Card>; TABLEAU_PILES] {
        &mut self.piles
    }

    /// Raw append; legality is the engine's concern.
    pub fn add_card_to_pile(&mut self, pile_index: usize, card: Card) -> Result<(), PileError> {
        self.pile_mut(pile_index)?.insert_at_tail(card);
        Ok(())
    }

    /// Turns up every face-down top card. Returns the indices of the piles
    /// that changed.
    pub fn reveal_bottom_face_down(&mut self) -> Vec<usize> {
        let mut revealed = Vec::new();
        for (i, pile) in self.piles.iter_mut().enumerate() {
            if let Ok(top) = pile.get_last_mut() {
                if !top.is_face_up() {
                    top.flip();
                    log::trace!("revealed {} on tableau pile {}", top, i);
                    revealed.push(i);
                }
            }
        }
        revealed
    }

    pub fn size(&self) -> usize {
        self.piles.iter().map(|pile| pile.size()).sum()
    }

    pub fn clear(&mut self) {
        for pile in self.piles.iter_mut() {
            pile.clear();
        }
    }
}

impl Foundation {
    pub fn new() -> Foundation {
        Foundation::default()
    }

    pub fn pile(&self, index: usize) -> Result<&Stack<Card>, PileError> {
        check_index(index, FOUNDATION_PILES)?;
        Ok(&self.piles[index])
    }

    pub fn piles(&self) -> &[Stack<Card>; FOUNDATION_PILES] {
        &self.piles
    }

    pub(crate) fn piles_mut(&mut self) -> &mut [Stack<Card>; FOUNDATION_PILES] {
        &mut self.piles
    }

    pub fn add_card_to_foundation(&mut self, pile_index: usize, card: Card) -> Result<(), PileError> {
        check_index(pile_index, FOUNDATION_PILES)?;
        self.piles[pile_index].push(card);
        Ok(())
    }

    pub fn move_card_from_foundation(&mut self, pile_index: usize) -> Result<Card, PileError> {
        check_index(pile_index, FOUNDATION_PILES)?;
        self.piles[pile_index].pop()
    }

    pub fn size(&self) -> usize {
        self.piles.iter().map(|pile| pile.size()).sum()
    }

    pub fn clear(&mut self) {
        for pile in self.piles.iter_mut() {
            pile.clear();
        }
    }
}

impl Waste {
    pub fn new() -> Waste {
        Waste::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn size(&self) -> usize {
        self.cards.size()
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn remove_card(&mut self) -> Result<Card, PileError> {
        self.cards.pop()
    }

    pub fn top_card(&self) -> Option<&Card> {
        self.cards.peek()
    }

    /// Oldest draw first, top card last.
    pub fn display(&self) -> &[Card] {
        self.cards.display()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

impl Stock {
    pub fn new() -> Stock {
        Stock::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn size(&self) -> usize {
        self.cards.size()
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.enqueue(card);
    }

    pub fn remove_card(&mut self) -> Result<Card, PileError> {
        self.cards.dequeue()
    }

    pub fn top_card(&self) -> Result<&Card, PileError> {
        self.cards.peek()
    }

    /// Next card to be drawn first.
    pub fn display(&self) -> Vec<Card> {
        self.cards.display()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn up(suit: Suit, rank: Rank) -> Card {
        let mut card = Card::new(suit, rank);
        card.flip();
        card
    }

    #[test]
    fn reveal_flips_only_face_down_tops() {
        let mut tableau = Tableau::new();
        tableau.add_card_to_pile(0, Card::new(Suit::Diamonds, Rank::Two)).unwrap();
        tableau.add_card_to_pile(1, Card::new(Suit::Clubs, Rank::Nine)).unwrap();
        tableau.add_card_to_pile(1, up(Suit::Hearts, Rank::Four)).unwrap();

        assert_eq!(tableau.reveal_bottom_face_down(), vec![0]);
        assert!(tableau.pile(0).unwrap().get_last().unwrap().is_face_up());
        assert!(!tableau.pile(1).unwrap().get_node_at_index(0).unwrap().is_face_up());
        assert!(tableau.reveal_bottom_face_down().is_empty());
    }

    #[test]
    fn pile_indices_are_checked() {
        let mut tableau = Tableau::new();
        let card = Card::new(Suit::Spades, Rank::Ace);
        assert_eq!(
            tableau.add_card_to_pile(7, card),
            Err(PileError::IndexOutOfRange { index: 7, size: 7 })
        );

        let mut foundation = Foundation::new();
        assert!(foundation.add_card_to_foundation(4, card).is_err());
        assert_eq!(
            foundation.move_card_from_foundation(0),
            Err(PileError::EmptyContainer)
        );
        foundation.add_card_to_foundation(0, card).unwrap();
        assert_eq!(foundation.move_card_from_foundation(0), Ok(card));
    }

    #[test]
    fn stock_and_waste_wrappers() {
        let mut stock = Stock::new();
        let mut waste = Waste::new();
        let a = Card::new(Suit::Hearts, Rank::Ace);
        let b = Card::new(Suit::Hearts, Rank::Two);
        stock.add_card(a);
        stock.add_card(b);
        assert_eq!(stock.top_card(), Ok(&a));

        waste.add_card(stock.remove_card().unwrap());
        waste.add_card(stock.remove_card().unwrap());
        assert!(stock.is_empty());
        assert_eq!(waste.top_card(), Some(&b));
        assert_eq!(waste.display(), &[a, b]);
        assert_eq!(waste.remove_card(), Ok(b));
    }
}
