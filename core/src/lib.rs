pub mod action;
pub mod annotation;
pub mod cache;
pub mod config;
pub mod error_list;
pub mod stopwatch;
pub mod str_interp;
pub mod style;
pub mod testing;

pub use crate::config::Config;
