pub mod types;

pub use types::{MediaError, TranscodeError};
