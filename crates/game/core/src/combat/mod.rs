//! Combat resolution.
//!
//! Pure arithmetic over [`ActorStats`](crate::state::ActorStats). Nothing here
//! looks at the grid or the scheduler, and no randomness is involved: the same
//! two stat blocks always produce the same outcome.
//!
//! - `calculate_damage`: `strength² / (strength + endurance)`
//! - `apply_damage`: hp reduction clamped to 0
//! - `xp_reward` / `gain_xp`: experience on kill and the level-up loop
//! - `resolve_attack`: all of the above for one swing

pub mod damage;
pub mod experience;
pub mod result;

pub use damage::{apply_damage, attack, calculate_damage};
pub use experience::{gain_xp, level_up, xp_for_level, xp_reward};
pub use result::{AttackResult, resolve_attack};
