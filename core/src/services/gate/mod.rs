//! Request gate policy

mod policy;

pub use policy::{PathExemptions, PathPolicy, INACTIVITY_EXEMPT_PATHS, TOKEN_EXEMPT_PATHS};
