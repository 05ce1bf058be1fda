pub mod client;
pub mod urls;

pub use client::*;
pub use urls::*;
