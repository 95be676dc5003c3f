//! Runtime hosting for the tactical core.
//!
//! This crate supplies the concrete collaborators `tactics-core` only knows
//! as traits, and the loop that drives it:
//! - [`oracle`] holds the mutable [`GridMap`] and the reference
//!   [`GreedyPathFinder`]
//! - [`session`] owns engine, grid and history and advances turns
//! - [`providers`] sources player intents
//! - [`log`] keeps presentation events in memory and on disk
//! - [`clock`] supplies wall-clock time for real-time frontends
pub mod clock;
pub mod error;
pub mod log;
pub mod oracle;
pub mod providers;
pub mod session;

pub use clock::SystemClock;
pub use error::{Result, RuntimeError};
pub use log::{DEFAULT_LOG_CAPACITY, EventLog, JsonlEventWriter, LoggedEvent, read_events};
pub use oracle::{DEFAULT_TRAP_POTENCY, GreedyPathFinder, GridMap};
pub use providers::{InputProvider, ScriptedInputProvider, WaitInputProvider};
pub use session::{HeadlessSummary, Session, StopReason};
