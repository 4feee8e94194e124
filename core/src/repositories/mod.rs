//! Repository traits and test doubles

pub mod session;

pub use session::{MockSessionStore, SessionStore};
