//! Core types and definitions for the SHADOWLINE stealth simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, options, state snapshots, events, and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod options;
pub mod state;
pub mod types;
