//! API endpoint handlers.
//!
//! Handlers validate input, open a connection and delegate to the
//! journal, chart, check-in and analysis modules.

pub mod analysis;
pub mod days;
pub mod health;
pub mod subjects;
