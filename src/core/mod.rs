//! Core deterministic primitives.
//!
//! Nothing in this module performs I/O or reads ambient state. Given the same
//! seed and inputs, every function here returns the same output.

pub mod letters;
pub mod rng;

pub use letters::{LetterPool, NotAvailable};
pub use rng::DeterministicRng;
