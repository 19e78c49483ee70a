use rand::Rng;
use std::fmt;

use super::card::{Card, Deck, Rank, Suit};
use super::error::{MoveError, PileError};
use super::piles::{Foundation, Stock, Tableau, Waste, FOUNDATION_PILES, TABLEAU_PILES};
use super::stack::{Sequence, Stack};

const REASON_WASTE_EMPTY: &str = "illegal move: waste is empty";
const REASON_PILE_EMPTY: &str = "illegal move: pile is empty";
const REASON_SAME_PILE: &str = "illegal move: source and destination are the same pile";
const REASON_NO_CARDS: &str = "illegal move: no cards selected";
const REASON_SINGLE_CARD: &str = "illegal move: only one card can be moved at a time from there";
const REASON_RUN_TOO_LARGE: &str = "illegal move: pile does not hold that many cards";
const REASON_FACE_DOWN: &str = "illegal move: card is not visible";
const REASON_NOT_PLACABLE_ON_TABLEAU: &str = "illegal move: card not placable on tableau pile";
const REASON_NOT_PLACABLE_ON_FOUNDATION: &str =
    "illegal move: card not placable on foundation pile";

const CARDS_PER_SUIT: usize = 13;

/// Which group of piles a move reads from or writes to.
#[derive(Eq, Hash, Clone, Copy, PartialEq, Debug)]
pub enum PileGroup {
    Tableau,
    Foundation,
    Stock,
    Waste,
}

impl fmt::Display for PileGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            PileGroup::Tableau => "tableau",
            PileGroup::Foundation => "foundation",
            PileGroup::Stock => "stock",
            PileGroup::Waste => "waste",
        };
        f.write_str(name)
    }
}

/// A pile-to-pile move request. `from_index` is ignored for the waste,
/// which has a single pile.
#[derive(Eq, Hash, Clone, Copy, PartialEq, Debug)]
pub struct Move {
    pub from: PileGroup,
    pub from_index: usize,
    pub to: PileGroup,
    pub to_index: usize,
    pub count: usize,
}

impl Move {
    pub fn new(from: PileGroup, from_index: usize, to: PileGroup, to_index: usize, count: usize) -> Move {
        Move {
            from,
            from_index,
            to,
            to_index,
            count,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} {} ({} card{})",
            self.from,
            self.from_index,
            self.to,
            self.to_index,
            self.count,
            if self.count == 1 { "" } else { "s" }
        )
    }
}

/// What a stock click did.
#[derive(Eq, Clone, Copy, PartialEq, Debug)]
pub enum StockAction {
    Drawn(Card),
    Recycled(usize),
    Empty,
}

#[derive(Eq, Clone, Copy, PartialEq, Debug, Default)]
pub struct GameConfig {
    /// Snapshot before stock draws and recycles so undo can reverse them.
    /// Off by default: only pile-to-pile moves are undoable.
    pub undoable_draws: bool,
}

/// A full, independent copy of every pile, cards with their orientation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    stock: Vec<Card>,
    waste: Vec<Card>,
    tableau: [Vec<Card>; TABLEAU_PILES],
    foundation: [Vec<Card>; FOUNDATION_PILES],
}

impl Snapshot {
    /// Next card to be drawn first.
    pub fn stock(&self) -> &[Card] {
        &self.stock
    }

    /// Top card last.
    pub fn waste(&self) -> &[Card] {
        &self.waste
    }

    /// Bottom card first in every pile.
    pub fn tableau(&self) -> &[Vec<Card>; TABLEAU_PILES] {
        &self.tableau
    }

    pub fn foundation(&self) -> &[Vec<Card>; FOUNDATION_PILES] {
        &self.foundation
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.stock
            .iter()
            .chain(self.waste.iter())
            .chain(self.tableau.iter().flatten())
            .chain(self.foundation.iter().flatten())
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    tableau: Tableau,
    foundation: Foundation,
    stock: Stock,
    waste: Waste,
    history: Stack<Snapshot>,
}

impl Game {
    pub fn new() -> Game {
        Game::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Game {
        Game::deal(config, Deck::new())
    }

    pub fn deal_with<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Game {
        Game::deal(config, Deck::shuffled_with(rng))
    }

    fn deal(config: GameConfig, mut deck: Deck) -> Game {
        let mut game = Game {
            config,
            tableau: Tableau::new(),
            foundation: Foundation::new(),
            stock: Stock::new(),
            waste: Waste::new(),
            history: Stack::new(),
        };

        for (i, pile) in game.tableau.piles_mut().iter_mut().enumerate() {
            let mut cards = deck.draw(i + 1);
            for card in cards.iter_mut() {
                card.set_face_up(false);
            }
            if let Some(top) = cards.last_mut() {
                top.set_face_up(true);
            }
            for card in cards {
                pile.insert_at_tail(card);
            }
        }

        let remaining = deck.len();
        for mut card in deck.draw(remaining) {
            card.set_face_up(false);
            game.stock.add_card(card);
        }

        log::debug!("dealt a new game\n{}", game);
        game
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    pub fn foundation(&self) -> &Foundation {
        &self.foundation
    }

    pub fn stock(&self) -> &Stock {
        &self.stock
    }

    pub fn waste(&self) -> &Waste {
        &self.waste
    }

    /// Number of snapshots available to `undo`.
    pub fn history_len(&self) -> usize {
        self.history.size()
    }

    #[inline]
    fn is_card_placable_on_tableau(card: &Card, pile: &Sequence<Card>) -> bool {
        match pile.get_last() {
            Err(_) => true,
            Ok(dest) => {
                dest.is_face_up()
                    && card.is_opposite_color(dest)
                    && card.rank().is_one_below(dest.rank())
            }
        }
    }

    #[inline]
    fn is_card_placable_on_foundation(card: &Card, pile: &Stack<Card>) -> bool {
        match pile.peek() {
            None => card.rank() == Rank::Ace,
            Some(dest) => card.suit() == dest.suit() && dest.rank().is_one_below(card.rank()),
        }
    }

    fn waste_top(&self, count: usize) -> Result<&Card, MoveError> {
        if count != 1 {
            return Err(MoveError::Invalid(REASON_SINGLE_CARD));
        }
        self.waste
            .top_card()
            .ok_or(MoveError::Invalid(REASON_WASTE_EMPTY))
    }

    fn check_waste_to_tableau(&self, to_index: usize, count: usize) -> Result<(), MoveError> {
        let pile = self.tableau.pile(to_index)?;
        let card = self.waste_top(count)?;
        if !Self::is_card_placable_on_tableau(card, pile) {
            return Err(MoveError::Invalid(REASON_NOT_PLACABLE_ON_TABLEAU));
        }
        Ok(())
    }

    fn check_waste_to_foundation(&self, to_index: usize, count: usize) -> Result<(), MoveError> {
        let pile = self.foundation.pile(to_index)?;
        let card = self.waste_top(count)?;
        if !Self::is_card_placable_on_foundation(card, pile) {
            return Err(MoveError::Invalid(REASON_NOT_PLACABLE_ON_FOUNDATION));
        }
        Ok(())
    }

    fn check_tableau_to_foundation(
        &self,
        from_index: usize,
        to_index: usize,
        count: usize,
    ) -> Result<(), MoveError> {
        let source = self.tableau.pile(from_index)?;
        let dest = self.foundation.pile(to_index)?;
        if count != 1 {
            return Err(MoveError::Invalid(REASON_SINGLE_CARD));
        }
        let card = source
            .get_last()
            .map_err(|_| MoveError::Invalid(REASON_PILE_EMPTY))?;
        if !card.is_face_up() {
            return Err(MoveError::Invalid(REASON_FACE_DOWN));
        }
        if !Self::is_card_placable_on_foundation(card, dest) {
            return Err(MoveError::Invalid(REASON_NOT_PLACABLE_ON_FOUNDATION));
        }
        Ok(())
    }

    fn check_tableau_to_tableau(
        &self,
        from_index: usize,
        to_index: usize,
        count: usize,
    ) -> Result<(), MoveError> {
        let source = self.tableau.pile(from_index)?;
        let dest = self.tableau.pile(to_index)?;
        if from_index == to_index {
            return Err(MoveError::Invalid(REASON_SAME_PILE));
        }
        if source.is_empty() {
            return Err(MoveError::Invalid(REASON_PILE_EMPTY));
        }
        if count == 0 {
            return Err(MoveError::Invalid(REASON_NO_CARDS));
        }
        if count > source.size() {
            return Err(MoveError::Invalid(REASON_RUN_TOO_LARGE));
        }

        // the card that lands on the destination
        let base = source.get_node_at_index(source.size() - count)?;
        if !base.is_face_up() {
            return Err(MoveError::Invalid(REASON_FACE_DOWN));
        }
        if !Self::is_card_placable_on_tableau(base, dest) {
            return Err(MoveError::Invalid(REASON_NOT_PLACABLE_ON_TABLEAU));
        }
        Ok(())
    }

    /// Checks a move against the rules without touching any pile.
    pub fn validate(&self, mv: &Move) -> Result<(), MoveError> {
        match (mv.from, mv.to) {
            (PileGroup::Waste, PileGroup::Tableau) => self.check_waste_to_tableau(mv.to_index, mv.count),
            (PileGroup::Waste, PileGroup::Foundation) => {
                self.check_waste_to_foundation(mv.to_index, mv.count)
            }
            (PileGroup::Tableau, PileGroup::Foundation) => {
                self.check_tableau_to_foundation(mv.from_index, mv.to_index, mv.count)
            }
            (PileGroup::Tableau, PileGroup::Tableau) => {
                self.check_tableau_to_tableau(mv.from_index, mv.to_index, mv.count)
            }
            (from, to) => Err(MoveError::Unsupported { from, to }),
        }
    }

    pub fn is_legal(&self, mv: &Move) -> bool {
        self.validate(mv).is_ok()
    }

    pub fn move_cards(
        &mut self,
        from: PileGroup,
        from_index: usize,
        to: PileGroup,
        to_index: usize,
        count: usize,
    ) -> Result<(), MoveError> {
        self.apply_move(&Move::new(from, from_index, to, to_index, count))
    }

    /// Validates and executes `mv`. On error nothing has changed and no
    /// snapshot was taken.
    pub fn apply_move(&mut self, mv: &Move) -> Result<(), MoveError> {
        if let Err(e) = self.validate(mv) {
            log::trace!("rejected {}: {}", mv, e);
            return Err(e);
        }

        self.save_state();
        self.execute(mv)?;
        log::debug!("moved {}", mv);

        if self.check_win() {
            log::info!("all foundations complete");
        }
        Ok(())
    }

    // Only called after `validate`, so the storage calls below cannot fail.
    fn execute(&mut self, mv: &Move) -> Result<(), PileError> {
        match (mv.from, mv.to) {
            (PileGroup::Waste, PileGroup::Tableau) => {
                let card = self.waste.remove_card()?;
                self.tableau.add_card_to_pile(mv.to_index, card)?;
            }
            (PileGroup::Waste, PileGroup::Foundation) => {
                let card = self.waste.remove_card()?;
                self.foundation.add_card_to_foundation(mv.to_index, card)?;
            }
            (PileGroup::Tableau, PileGroup::Foundation) => {
                let card = self.tableau.pile_mut(mv.from_index)?.remove_tail()?;
                self.foundation.add_card_to_foundation(mv.to_index, card)?;
                self.tableau.reveal_bottom_face_down();
            }
            (PileGroup::Tableau, PileGroup::Tableau) => {
                let run = self.tableau.pile_mut(mv.from_index)?.remove_tail_run(mv.count)?;
                let dest = self.tableau.pile_mut(mv.to_index)?;
                for card in run {
                    dest.insert_at_tail(card);
                }
                self.tableau.reveal_bottom_face_down();
            }
            _ => {}
        }
        Ok(())
    }

    /// Turns the next stock card onto the waste, or recycles the whole waste
    /// back into the stock once the stock has run out.
    pub fn draw_from_stock(&mut self) -> StockAction {
        if self.stock.is_empty() && self.waste.is_empty() {
            return StockAction::Empty;
        }
        if self.config.undoable_draws {
            self.save_state();
        }

        if let Ok(mut card) = self.stock.remove_card() {
            card.set_face_up(true);
            self.waste.add_card(card);
            log::debug!("drew {} from stock", card);
            return StockAction::Drawn(card);
        }

        let mut recycled = 0;
        while let Ok(mut card) = self.waste.remove_card() {
            card.set_face_up(false);
            self.stock.add_card(card);
            recycled += 1;
        }
        log::debug!("recycled {} cards from waste to stock", recycled);
        StockAction::Recycled(recycled)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            stock: self.stock.display(),
            waste: self.waste.display().to_vec(),
            tableau: std::array::from_fn(|i| self.tableau.piles()[i].display().to_vec()),
            foundation: std::array::from_fn(|i| self.foundation.piles()[i].display().to_vec()),
        }
    }

    pub fn save_state(&mut self) {
        let snapshot = self.snapshot();
        self.history.push(snapshot);
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.stock.clear();
        for card in snapshot.stock {
            self.stock.add_card(card);
        }

        self.waste.clear();
        for card in snapshot.waste {
            self.waste.add_card(card);
        }

        for (pile, cards) in self.tableau.piles_mut().iter_mut().zip(snapshot.tableau) {
            pile.clear();
            for card in cards {
                pile.insert_at_tail(card);
            }
        }

        for (pile, cards) in self.foundation.piles_mut().iter_mut().zip(snapshot.foundation) {
            pile.clear();
            for card in cards {
                pile.push(card);
            }
        }
    }

    /// Rolls back to the last snapshot. False when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Ok(snapshot) => {
                self.restore(snapshot);
                log::debug!("undo, {} snapshots left", self.history.size());
                true
            }
            Err(_) => false,
        }
    }

    /// First legal move in a fixed priority order: each tableau top to a
    /// foundation, then to another tableau pile, and finally the waste top to
    /// a tableau pile.
    pub fn find_hint(&self) -> Option<Move> {
        for (src_index, src_pile) in self.tableau.piles().iter().enumerate() {
            if src_pile.is_empty() {
                continue;
            }

            for dst_index in 0..FOUNDATION_PILES {
                let mv = Move::new(PileGroup::Tableau, src_index, PileGroup::Foundation, dst_index, 1);
                if self.is_legal(&mv) {
                    return Some(mv);
                }
            }

            for dst_index in (0..TABLEAU_PILES).filter(|&i| i != src_index) {
                let mv = Move::new(PileGroup::Tableau, src_index, PileGroup::Tableau, dst_index, 1);
                if self.is_legal(&mv) {
                    return Some(mv);
                }
            }
        }

        if !self.waste.is_empty() {
            for dst_index in 0..TABLEAU_PILES {
                let mv = Move::new(PileGroup::Waste, 0, PileGroup::Tableau, dst_index, 1);
                if self.is_legal(&mv) {
                    return Some(mv);
                }
            }
        }

        None
    }

    /// Every legal pile-to-pile move, including each movable run length for
    /// tableau to tableau. Stock draws are not listed.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut candidates = Vec::new();

        for dst_index in 0..FOUNDATION_PILES {
            candidates.push(Move::new(PileGroup::Waste, 0, PileGroup::Foundation, dst_index, 1));
        }
        for dst_index in 0..TABLEAU_PILES {
            candidates.push(Move::new(PileGroup::Waste, 0, PileGroup::Tableau, dst_index, 1));
        }
        for src_index in 0..TABLEAU_PILES {
            for dst_index in 0..FOUNDATION_PILES {
                candidates.push(Move::new(PileGroup::Tableau, src_index, PileGroup::Foundation, dst_index, 1));
            }
        }
        for (src_index, src_pile) in self.tableau.piles().iter().enumerate() {
            for count in 1..=src_pile.size() {
                for dst_index in (0..TABLEAU_PILES).filter(|&i| i != src_index) {
                    candidates.push(Move::new(PileGroup::Tableau, src_index, PileGroup::Tableau, dst_index, count));
                }
            }
        }

        candidates.retain(|mv| self.is_legal(mv));
        candidates
    }

    /// Where a card currently lives, as a group and pile index.
    pub fn locate(&self, suit: Suit, rank: Rank) -> Option<(PileGroup, usize)> {
        for (i, pile) in self.tableau.piles().iter().enumerate() {
            if pile.display().iter().any(|c| c.is(suit, rank)) {
                return Some((PileGroup::Tableau, i));
            }
        }
        for (i, pile) in self.foundation.piles().iter().enumerate() {
            if pile.display().iter().any(|c| c.is(suit, rank)) {
                return Some((PileGroup::Foundation, i));
            }
        }
        if self.waste.display().iter().any(|c| c.is(suit, rank)) {
            return Some((PileGroup::Waste, 0));
        }
        if self.stock.display().iter().any(|c| c.is(suit, rank)) {
            return Some((PileGroup::Stock, 0));
        }
        None
    }

    #[inline]
    pub fn check_win(&self) -> bool {
        self.foundation
            .piles()
            .iter()
            .all(|pile| pile.size() == CARDS_PER_SUIT)
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

fn write_cards(f: &mut fmt::Formatter<'_>, cards: &[Card]) -> fmt::Result {
    if cards.is_empty() {
        return write!(f, " empty");
    }
    for card in cards {
        if card.is_face_up() {
            write!(f, " {}", card)?;
        } else {
            write!(f, " ##")?;
        }
    }
    Ok(())
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stock: {} cards", self.stock.size())?;
        write!(f, "Waste:")?;
        write_cards(f, self.waste.display())?;
        writeln!(f)?;
        for (i, pile) in self.foundation.piles().iter().enumerate() {
            write!(f, "Foundation {}:", i)?;
            write_cards(f, pile.display())?;
            writeln!(f)?;
        }
        for (i, pile) in self.tableau.piles().iter().enumerate() {
            write!(f, "Tableau {}:", i)?;
            write_cards(f, pile.display())?;
            writeln!(f)?;
        }
        Ok(())
    }
}
