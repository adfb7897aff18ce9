//! Repository layer: entity-scoped database operations.

mod day;
mod subject;

pub use day::*;
pub use subject::*;
