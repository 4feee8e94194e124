//! Token verification

mod verifier;

pub use verifier::TokenVerifier;
