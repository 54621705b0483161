//! Dino Jockey - two-player split-screen endless runner.
//!
//! This library holds the engine-free game core: jump physics, obstacle
//! spawning and collision, per-player sessions and the match that drives
//! both. Hosts plug in through the traits in [`core::host`] and
//! [`core::input`].

pub mod build_info;
pub mod core;
pub mod runner;
