// Per-session UI state, the in-memory session store, and the actions that drive
// the Search -> Results -> Search page flow.

pub mod actions;
pub mod state;
pub mod store;

pub use state::{Page, SalaryRange, SessionState, ValidationError};
pub use store::{spawn_sweeper, SessionStore, SharedSession};
