pub mod config;
pub mod docket;
pub mod todo;

pub use config::*;
pub use docket::*;
pub use todo::*;
