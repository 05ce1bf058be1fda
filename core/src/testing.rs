pub mod build;
pub mod result;
pub mod runner;
pub mod summary;
pub mod testcase;

pub use build::*;
pub use result::*;
pub use runner::*;
pub use summary::*;
pub use testcase::*;
