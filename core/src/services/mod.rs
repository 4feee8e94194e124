//! Core services: gate policy, token verification, session sweeping

pub mod gate;
pub mod session;
pub mod token;
