//! Implementation of tic-tac-toe, its rules and specifics.

pub mod core;
pub mod position;
