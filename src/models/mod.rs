pub mod day;
pub mod enums;
pub mod subject;

pub use day::*;
pub use enums::*;
pub use subject::*;
