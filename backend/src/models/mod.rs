pub mod fields;
pub mod records;

pub use fields::{Record, UNKNOWN_KEY};
pub use records::*;
