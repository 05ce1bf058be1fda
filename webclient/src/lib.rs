// exported modules
pub mod error;
pub mod http;
pub mod model;

// client impls
pub mod aoj;

// re-exports
pub use aoj::{AojClient, AojUrlAnalyzer};
pub use error::*;
pub use model::*;
