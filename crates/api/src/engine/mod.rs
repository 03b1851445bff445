//! Asynchronous mock-generation engine.

pub mod generator;

pub use generator::{GenerationDelays, GenerationEngine, GenerationTarget, PortraitWorkshop};
