pub(crate) mod error;
pub mod resources;
