pub mod error;
pub mod progress;
pub mod server;
pub mod tools;
pub mod types;

pub use server::{run_mcp_server, SvgMakerServer};
pub use types::*;
