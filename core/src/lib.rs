//! # SessionGuard Core
//!
//! Domain layer for the SessionGuard gateway. It contains everything the
//! request gate and the background sweeper need that is independent of the
//! HTTP framework and of the concrete session store:
//!
//! - **Domain entities**: token claims and session records
//! - **Error taxonomy**: gate rejection kinds and store failures
//! - **Repositories**: the `SessionStore` contract plus an in-memory mock
//! - **Services**: path exemption policy, token verifier, session sweeper

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;
