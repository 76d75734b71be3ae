pub mod challenge;

pub use challenge::*;
