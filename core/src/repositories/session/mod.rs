//! Session store contract and in-memory mock

mod mock;
mod r#trait;

pub use mock::MockSessionStore;
pub use r#trait::SessionStore;
