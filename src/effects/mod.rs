//! Effect system for on-play card abilities.
//!
//! ## Key Types
//!
//! - `EffectSpec`: Data describing a triggered effect (kind + parameters)
//! - `EffectHandler`: Executes one kind of effect
//! - `EffectRegistry`: Dispatch from kind to handler
//! - `DrawCards`: Built-in "draw N cards" handler

pub mod effect;
pub mod resolver;

pub use effect::{EffectSpec, DRAW_CARDS};
pub use resolver::{DrawCards, EffectContext, EffectHandler, EffectRegistry, ResolveResult};
