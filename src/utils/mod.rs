pub mod error;
pub mod git;

pub use error::{DevxError, Result};
