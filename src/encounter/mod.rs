//! Encounter layer
//!
//! Glue between the pure board engine and its collaborators:
//! - `session`: input routing, busy flag, cascade sequencing
//! - `combat`: tally hand-off and the bundled player/mob state
//! - `observer`: per-step notifications for presentation

pub mod combat;
pub mod observer;
pub mod session;

pub use combat::{CombatBridge, CombatState, Mob, MobTurn, Player, Turn};
pub use observer::{LogObserver, StepObserver};
pub use session::{Activation, Encounter};
