//! Threat AI for SHADOWLINE.
//!
//! Implements the shared perception model and the per-threat behavior
//! state machines. Pure functions over plain data with no ECS dependency.

pub mod fsm;
pub mod perception;

pub use shadowline_core as core;
