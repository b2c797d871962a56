//! Effect tally: matched tiles per combat effect for one player action

use std::fmt;

use serde::{Deserialize, Serialize};

use super::grid::Tile;

/// Combat effect driven by a tile kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Damage,
    Mana,
    Heal,
    Gold,
    Curse,
}

impl Effect {
    pub const COUNT: usize = 5;
    pub const ALL: [Effect; Effect::COUNT] = [
        Effect::Damage,
        Effect::Mana,
        Effect::Heal,
        Effect::Gold,
        Effect::Curse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Effect::Damage => "damage",
            Effect::Mana => "mana",
            Effect::Heal => "heal",
            Effect::Gold => "gold",
            Effect::Curse => "curse",
        }
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

/// Per-action count of cleared tiles by effect.
///
/// Counters only ever grow; a fresh tally is started for every player action.
/// Rich tiles are counted once in the base counters and additionally in
/// `bonus`, so `total()` always equals the number of distinct tiles cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectTally {
    counts: [u32; Effect::COUNT],
    bonus: [u32; Effect::COUNT],
}

impl EffectTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one cleared tile
    pub fn record(&mut self, tile: &Tile) {
        let slot = tile.kind.effect().slot();
        self.counts[slot] += 1;
        if tile.rich {
            self.bonus[slot] += 1;
        }
    }

    /// Tiles cleared for an effect
    pub fn get(&self, effect: Effect) -> u32 {
        self.counts[effect.slot()]
    }

    /// Rich tiles cleared for an effect
    pub fn bonus(&self, effect: Effect) -> u32 {
        self.bonus[effect.slot()]
    }

    pub fn damage(&self) -> u32 {
        self.get(Effect::Damage)
    }

    pub fn mana(&self) -> u32 {
        self.get(Effect::Mana)
    }

    pub fn heal(&self) -> u32 {
        self.get(Effect::Heal)
    }

    pub fn gold(&self) -> u32 {
        self.get(Effect::Gold)
    }

    pub fn curse(&self) -> u32 {
        self.get(Effect::Curse)
    }

    /// Distinct tiles cleared across all effects
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// (effect, count) pairs in effect order
    pub fn iter(&self) -> impl Iterator<Item = (Effect, u32)> + '_ {
        Effect::ALL.iter().map(|&e| (e, self.get(e)))
    }
}

impl fmt::Display for EffectTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (effect, n) in self.iter().filter(|&(_, n)| n > 0) {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", effect.as_str(), n)?;
            first = false;
        }
        if first {
            write!(f, "nothing")?;
        }
        Ok(())
    }
}
