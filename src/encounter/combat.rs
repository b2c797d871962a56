//! Combat hand-off
//!
//! The engine only produces an [`EffectTally`]. Whatever owns combat state
//! implements [`CombatBridge`] and turns counts into damage, mana and so on.
//! [`CombatState`] is the bundled collaborator: one player against a chain of
//! mobs, alternating turns, with a loot interstitial after each kill.

use serde::{Deserialize, Serialize};

use crate::board::{Effect, EffectTally};
use crate::settings::CombatSettings;

/// What the engine needs from the combat side
pub trait CombatBridge {
    /// Player input is only accepted on the player's turn
    fn is_player_turn(&self) -> bool;

    /// A reward screen blocks input until dismissed
    fn loot_pending(&self) -> bool;

    /// Called exactly once per completed player action with the full tally
    fn apply_tally(&mut self, tally: &EffectTally);
}

/// Whose move it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    Player,
    Mob,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub hp: u32,
    pub max_hp: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub gold: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mob {
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    /// Pending curse damage, dealt at the start of the mob's turn
    pub curse: u32,
}

impl Mob {
    fn spawn(level: u32, settings: &CombatSettings) -> Self {
        let growth = level.saturating_sub(1);
        let hp = settings
            .mob_hp
            .saturating_add(settings.mob_hp_growth.saturating_mul(growth));
        Self {
            level,
            hp,
            max_hp: hp,
            attack: settings
                .mob_attack
                .saturating_add(settings.mob_attack_growth.saturating_mul(growth)),
            curse: 0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }
}

/// Result of the mob's turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobTurn {
    /// Not the mob's turn; nothing happened
    Skipped,
    /// Curse finished the mob before it could act
    Cursed { curse: u32 },
    /// The mob hit the player
    Attacked { curse: u32, damage: u32 },
}

/// Player-versus-mob session state
#[derive(Debug, Clone)]
pub struct CombatState {
    pub player: Player,
    pub mob: Mob,
    pub turn: Turn,
    /// Mob died; waiting for [`CombatState::claim_loot`]
    pub loot: bool,
    pub mobs_defeated: u32,
    settings: CombatSettings,
}

impl CombatState {
    pub fn new(settings: CombatSettings) -> Self {
        Self {
            player: Player {
                hp: settings.player_hp,
                max_hp: settings.player_hp,
                mana: 0,
                max_mana: settings.player_mana,
                gold: 0,
            },
            mob: Mob::spawn(1, &settings),
            turn: Turn::Player,
            loot: false,
            mobs_defeated: 0,
            settings,
        }
    }

    /// Player is out of HP
    pub fn is_over(&self) -> bool {
        self.player.hp == 0
    }

    /// Tiles of an effect after rich bonuses and weights
    fn amount(&self, tally: &EffectTally, effect: Effect) -> u32 {
        let rich_extra = self.settings.rich_multiplier.saturating_sub(1);
        let tiles = tally
            .get(effect)
            .saturating_add(tally.bonus(effect).saturating_mul(rich_extra));
        tiles.saturating_mul(self.settings.weights.weight(effect))
    }

    fn defeat_mob(&mut self) {
        self.loot = true;
        self.mobs_defeated = self.mobs_defeated.saturating_add(1);
        self.turn = Turn::Player;
        log::info!(
            "Mob level {} defeated ({} total)",
            self.mob.level,
            self.mobs_defeated
        );
    }

    /// Run the mob's turn: curse first, then its attack
    pub fn mob_turn(&mut self) -> MobTurn {
        if self.turn != Turn::Mob || self.loot || self.is_over() {
            return MobTurn::Skipped;
        }

        let curse = std::mem::take(&mut self.mob.curse);
        self.mob.hp = self.mob.hp.saturating_sub(curse);
        if self.mob.is_dead() {
            self.defeat_mob();
            return MobTurn::Cursed { curse };
        }

        let damage = self.mob.attack;
        self.player.hp = self.player.hp.saturating_sub(damage);
        self.turn = Turn::Player;
        if self.is_over() {
            log::info!("Player defeated by mob level {}", self.mob.level);
        }
        MobTurn::Attacked { curse, damage }
    }

    /// Dismiss the reward screen and bring in the next mob.
    /// Returns false if there was nothing to claim.
    pub fn claim_loot(&mut self) -> bool {
        if !self.loot {
            return false;
        }
        let reward = self.settings.loot_gold.saturating_mul(self.mob.level);
        self.player.gold = self.player.gold.saturating_add(reward);
        self.mob = Mob::spawn(self.mob.level.saturating_add(1), &self.settings);
        self.loot = false;
        self.turn = Turn::Player;
        log::info!(
            "Claimed {} gold, mob level {} appears ({} hp)",
            reward,
            self.mob.level,
            self.mob.hp
        );
        true
    }
}

impl CombatBridge for CombatState {
    fn is_player_turn(&self) -> bool {
        self.turn == Turn::Player && !self.is_over()
    }

    fn loot_pending(&self) -> bool {
        self.loot
    }

    fn apply_tally(&mut self, tally: &EffectTally) {
        let damage = self.amount(tally, Effect::Damage);
        let mana = self.amount(tally, Effect::Mana);
        let heal = self.amount(tally, Effect::Heal);
        let gold = self.amount(tally, Effect::Gold);
        let curse = self.amount(tally, Effect::Curse);

        self.mob.hp = self.mob.hp.saturating_sub(damage);
        self.mob.curse = self.mob.curse.saturating_add(curse);
        self.player.mana = self.player.mana.saturating_add(mana).min(self.player.max_mana);
        self.player.hp = self.player.hp.saturating_add(heal).min(self.player.max_hp);
        self.player.gold = self.player.gold.saturating_add(gold);

        log::debug!(
            "Applied tally: {} damage, {} mana, {} heal, {} gold, {} curse",
            damage,
            mana,
            heal,
            gold,
            curse
        );

        if self.mob.is_dead() {
            self.defeat_mob();
        } else {
            self.turn = Turn::Mob;
        }
    }
}
