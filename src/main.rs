//! Tilebrawl demo entry point
//!
//! Plays a seeded encounter headlessly: the player always takes the first
//! hinted swap, the mob answers, loot is claimed and the board regenerated
//! until the player falls or enough mobs are down.
//!
//! Usage: `tilebrawl [seed] [settings.json]`

use std::process::ExitCode;

use tilebrawl::encounter::{LogObserver, MobTurn};
use tilebrawl::{CombatBridge, CombatState, ConfigError, Encounter, Settings, Turn};

/// Mobs to defeat before the demo ends
const MOBS_TO_CLEAR: u32 = 5;
/// Upper bound on loop iterations
const MAX_ACTIONS: u32 = 1_000;

fn run(seed_arg: Option<String>, settings_path: Option<String>) -> Result<(), ConfigError> {
    let settings = match settings_path {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    let seed = seed_arg
        .and_then(|s| s.parse().ok())
        .or(settings.board.seed)
        .unwrap_or(0x7117_b4a1);
    log::info!("Tilebrawl starting with seed: {}", seed);

    let mut encounter = Encounter::new(settings.rules()?, seed)?;
    let mut combat = CombatState::new(settings.combat.clone());
    let mut observer = LogObserver;
    let mut actions = 0;

    while !combat.is_over() && combat.mobs_defeated < MOBS_TO_CLEAR && actions < MAX_ACTIONS {
        actions += 1;

        if combat.loot_pending() {
            combat.claim_loot();
            encounter.regenerate()?;
            continue;
        }

        if combat.turn == Turn::Mob {
            if let MobTurn::Attacked { curse, damage } = combat.mob_turn() {
                log::info!(
                    "Mob takes {} curse and hits for {} (player {}/{})",
                    curse,
                    damage,
                    combat.player.hp,
                    combat.player.max_hp
                );
            }
            continue;
        }

        let Some((a, b)) = encounter.hint() else {
            log::warn!("No move available, regenerating");
            encounter.regenerate()?;
            continue;
        };
        match encounter.play(a, b, &mut combat, &mut observer) {
            Ok(Some(res)) => log::info!(
                "{} <-> {}: {} (mob {}/{})",
                a,
                b,
                res.tally,
                combat.mob.hp,
                combat.mob.max_hp
            ),
            Ok(None) => log::warn!("Hinted swap {} <-> {} did not match", a, b),
            Err(e) => log::warn!("Move refused: {}", e),
        }
    }

    println!("{}", encounter.board());
    println!(
        "Mobs defeated: {}  HP: {}/{}  Mana: {}  Gold: {}  Reshuffles: {}",
        combat.mobs_defeated,
        combat.player.hp,
        combat.player.max_hp,
        combat.player.mana,
        combat.player.gold,
        encounter.reshuffles()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    match run(args.next(), args.next()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
