pub mod compose;
pub mod config;
pub mod error;

pub use compose::*;
pub use config::*;
pub use error::*;
