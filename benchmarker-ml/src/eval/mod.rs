//! Evaluation of fitted models on held-out data.

pub mod evaluator;

pub use evaluator::{Evaluated, Evaluator};
