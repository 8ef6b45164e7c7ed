pub mod vm;
pub mod config;

pub use vm::*;
pub use config::*;
