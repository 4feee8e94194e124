//! Domain entities

pub mod entities;
