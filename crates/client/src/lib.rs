mod api;
mod config;
mod logging;
pub mod mock;
mod scope;
mod transport;

pub use api::*;
pub use config::*;
pub use logging::*;
pub use scope::*;
pub use transport::*;
