//! Static evaluation building blocks

pub mod patterns;

pub use patterns::{classify, Pattern, WIN_SCORE};
