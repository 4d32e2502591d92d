pub mod algorithms;
pub mod config;
pub mod error;
pub mod grid;
pub mod opponent;
pub mod pursuit;
pub mod simulation;
pub mod statistics;
pub mod world;
