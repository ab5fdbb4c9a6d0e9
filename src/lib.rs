pub mod api;
pub mod config;
pub mod error;
pub mod grid;
pub mod layouts;
pub mod optimizer;
// cmd and reports are modules of the binary (main.rs).

pub use error::{PfResult, PowerForgeError};
