pub mod cli;
pub mod error;
pub mod init;
pub mod logging;
pub mod mcp;
pub mod models;
pub mod services;
pub mod utils;

pub use error::SvgMakerError;
