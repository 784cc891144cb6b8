//! Guided session flow: stages, events, the state machine and snapshots.

pub mod event;
pub mod machine;
pub mod snapshot;
pub mod state;

pub use event::SessionEvent;
pub use machine::{DispatchOutcome, SessionMachine, transition};
pub use snapshot::{SOS_MESSAGE, SessionSnapshot, WEEKLY_GOAL, render_snapshot};
pub use state::{SessionState, Stage};
