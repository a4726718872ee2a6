pub mod client;
pub mod common;

pub const RESQ_VERSION: &str = env!("CARGO_PKG_VERSION");
