//! Encounter session
//!
//! Owns the board for the lifetime of an encounter and sequences player input:
//! selection -> swap -> cascade -> tally hand-off. Combat state is never held
//! here; it is passed into each entry point that needs it.

use std::collections::BTreeSet;

use crate::board::{
    Board, Cascade, Coord, KindSource, PcgKinds, Resolution, Rules, Step, SwapOutcome, find_hint,
    generate, try_swap,
};
use crate::consts::RESHUFFLE_ATTEMPTS;
use crate::error::{ConfigError, InvalidMove};

use super::combat::CombatBridge;
use super::observer::StepObserver;

/// What a tile activation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// First tile picked
    Selected(Coord),
    /// The selected tile was picked again
    Deselected,
    /// Refused; board and selection unchanged unless a swap was attempted
    Rejected(InvalidMove),
    /// Legal swap with no match; already undone
    Reverted { a: Coord, b: Coord },
    /// Swap kept; a cascade is now resolving
    Committed {
        a: Coord,
        b: Coord,
        matched: BTreeSet<Coord>,
    },
}

/// One board plus the bookkeeping around player actions
#[derive(Debug, Clone)]
pub struct Encounter<S: KindSource = PcgKinds> {
    rules: Rules,
    board: Board,
    source: S,
    selected: Option<Coord>,
    /// Set from swap commit until the cascade reaches Stable
    cascade: Option<Cascade>,
    reshuffles: u32,
}

impl Encounter<PcgKinds> {
    /// Seeded encounter with a freshly generated board
    pub fn new(rules: Rules, seed: u64) -> Result<Self, ConfigError> {
        Self::with_source(rules, PcgKinds::new(seed))
    }
}

impl<S: KindSource> Encounter<S> {
    /// Validate rules and generate a playable board
    pub fn with_source(rules: Rules, mut source: S) -> Result<Self, ConfigError> {
        let rules = rules.validate()?;
        let board = generate(&rules, &mut source)?;
        let mut encounter = Self {
            rules,
            board,
            source,
            selected: None,
            cascade: None,
            reshuffles: 0,
        };
        encounter.ensure_playable()?;
        log::info!(
            "Encounter ready on a {}x{} board",
            encounter.rules.rows,
            encounter.rules.cols
        );
        Ok(encounter)
    }

    /// Start from a prepared board. The board may hold runs; the first
    /// committed swap resolves them along with its own.
    pub fn from_board(rules: Rules, board: Board, source: S) -> Result<Self, ConfigError> {
        let rules = rules.validate()?;
        if board.dimensions() != (rules.rows, rules.cols) {
            return Err(ConfigError::Layout(format!(
                "board is {}x{}, rules expect {}x{}",
                board.rows(),
                board.cols(),
                rules.rows,
                rules.cols
            )));
        }
        Ok(Self {
            rules,
            board,
            source,
            selected: None,
            cascade: None,
            reshuffles: 0,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    /// True from swap commit until the Stable step
    pub fn is_resolving(&self) -> bool {
        self.cascade.is_some()
    }

    /// Boards regenerated because no productive swap remained
    pub fn reshuffles(&self) -> u32 {
        self.reshuffles
    }

    /// First productive swap, if any
    pub fn hint(&self) -> Option<(Coord, Coord)> {
        find_hint(&self.board, self.rules.min_run)
    }

    /// Refuse input while resolving, during loot, or off-turn
    fn gate(&self, combat: &impl CombatBridge) -> Result<(), InvalidMove> {
        if self.is_resolving() {
            Err(InvalidMove::Busy)
        } else if combat.loot_pending() {
            Err(InvalidMove::LootPending)
        } else if !combat.is_player_turn() {
            Err(InvalidMove::NotPlayerTurn)
        } else {
            Ok(())
        }
    }

    /// Player tapped a tile
    pub fn activate_tile(&mut self, coord: Coord, combat: &impl CombatBridge) -> Activation {
        if let Err(e) = self.gate(combat) {
            return Activation::Rejected(e);
        }
        if !self.board.in_range(coord.row, coord.col) {
            return Activation::Rejected(InvalidMove::OutOfRange(coord));
        }
        if self.board.at(coord).is_none() {
            return Activation::Rejected(InvalidMove::EmptyTile(coord));
        }

        match self.selected.take() {
            None => {
                self.selected = Some(coord);
                Activation::Selected(coord)
            }
            Some(prev) if prev == coord => Activation::Deselected,
            Some(prev) => match self.swap(prev, coord, combat) {
                Ok(SwapOutcome::Committed(matched)) => Activation::Committed {
                    a: prev,
                    b: coord,
                    matched,
                },
                Ok(SwapOutcome::Reverted) => Activation::Reverted { a: prev, b: coord },
                Err(e) => Activation::Rejected(e),
            },
        }
    }

    /// Attempt a swap. On commit the cascade is armed; drive it with
    /// [`Encounter::advance`] or [`Encounter::resolve_all`].
    pub fn swap(
        &mut self,
        a: Coord,
        b: Coord,
        combat: &impl CombatBridge,
    ) -> Result<SwapOutcome, InvalidMove> {
        self.gate(combat)?;
        let outcome = try_swap(&mut self.board, a, b, self.rules.min_run)?;
        match &outcome {
            SwapOutcome::Committed(matched) => {
                log::info!("Swap {} <-> {} matched {} tiles", a, b, matched.len());
                self.selected = None;
                self.cascade = Some(Cascade::new());
            }
            SwapOutcome::Reverted => {
                log::debug!("Swap {} <-> {} made no match, reverted", a, b);
            }
        }
        Ok(outcome)
    }

    /// Run one cascade step. On Stable the tally goes to `combat` and the
    /// busy flag clears. Returns `None` when nothing is resolving.
    ///
    /// The board is left exactly as the cascade produced it; callers driving
    /// steps by hand follow Stable with [`Encounter::reshuffle_if_dead`].
    pub fn advance(&mut self, combat: &mut impl CombatBridge) -> Option<Step> {
        let cascade = self.cascade.as_mut()?;
        let step = cascade.step(&mut self.board, &self.rules, &mut self.source);

        match &step {
            Some(Step::Stable(res)) => {
                self.cascade = None;
                log::info!(
                    "Resolved in {} generations: {}",
                    res.generations,
                    res.tally
                );
                combat.apply_tally(&res.tally);
            }
            Some(_) => {}
            None => self.cascade = None,
        }
        step
    }

    /// Drain the current cascade, reporting each step. A dead board left
    /// behind is replaced afterwards and reported through
    /// [`StepObserver::on_reshuffle`].
    pub fn resolve_all(
        &mut self,
        combat: &mut impl CombatBridge,
        observer: &mut impl StepObserver,
    ) -> Option<Resolution> {
        while let Some(step) = self.advance(combat) {
            observer.on_step(&self.board, &step);
            if let Step::Stable(res) = step {
                match self.reshuffle_if_dead() {
                    Ok(true) => observer.on_reshuffle(&self.board),
                    Ok(false) => {}
                    Err(e) => log::error!("Could not reshuffle a dead board: {}", e),
                }
                return Some(res);
            }
        }
        None
    }

    /// Swap and resolve in one call. `Ok(None)` means the swap was reverted.
    pub fn play(
        &mut self,
        a: Coord,
        b: Coord,
        combat: &mut impl CombatBridge,
        observer: &mut impl StepObserver,
    ) -> Result<Option<Resolution>, InvalidMove> {
        match self.swap(a, b, &*combat)? {
            SwapOutcome::Committed(_) => Ok(self.resolve_all(combat, observer)),
            SwapOutcome::Reverted => Ok(None),
        }
    }

    /// Replace the board with a fresh one (new mob, or a dead board).
    /// Refused while a cascade is resolving.
    pub fn regenerate(&mut self) -> Result<(), ConfigError> {
        if self.is_resolving() {
            return Err(ConfigError::Resolving);
        }
        self.board = generate(&self.rules, &mut self.source)?;
        self.selected = None;
        self.ensure_playable()?;
        Ok(())
    }

    /// Replace the board if no swap on it produces a match. Returns true if
    /// the board changed. Does nothing while a cascade is resolving.
    pub fn reshuffle_if_dead(&mut self) -> Result<bool, ConfigError> {
        if self.is_resolving() {
            return Ok(false);
        }
        let before = self.reshuffles;
        self.ensure_playable()?;
        if self.reshuffles != before {
            self.selected = None;
        }
        Ok(self.reshuffles != before)
    }

    /// Regenerate until some swap produces a match, within a bounded budget
    fn ensure_playable(&mut self) -> Result<(), ConfigError> {
        for _ in 0..RESHUFFLE_ATTEMPTS {
            if self.hint().is_some() {
                return Ok(());
            }
            self.reshuffles += 1;
            log::info!("No productive swap left, reshuffling (#{})", self.reshuffles);
            self.board = generate(&self.rules, &mut self.source)?;
        }
        if self.hint().is_none() {
            log::warn!(
                "Board still has no productive swap after {} reshuffles",
                RESHUFFLE_ATTEMPTS
            );
        }
        Ok(())
    }
}
