//! Session lifecycle services

mod sweeper;

pub use sweeper::{Sweeper, SweeperConfig};
