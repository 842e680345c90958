// File: ./src/model/mod.rs
pub mod dates;
pub mod error;
pub mod item;
pub mod matcher;
pub mod parser;
pub mod priority;
pub mod recurrence;
pub mod token;

pub use error::TaskError;
pub use item::Task;
pub use priority::Priority;
pub use recurrence::{Recurrence, RecurrenceEngine};
pub use token::{Token, TokenKind, TokenMask};
