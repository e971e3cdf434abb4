//! API handlers module

pub mod health;
pub mod movies;
pub mod ratings;
