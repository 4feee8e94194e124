//! Domain entities for token claims and session state

pub mod session;
pub mod token;

pub use session::SessionRecord;
pub use token::Claims;
