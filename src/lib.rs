pub mod config;
pub mod error;
pub mod family;
pub mod input;
pub mod pipeline;
pub mod reports;
pub mod types;

pub use error::{FamilyError, Result};
pub use pipeline::FamilyTree;
