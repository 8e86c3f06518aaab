pub mod config;
pub mod constants;
pub mod error;
pub mod fx;
pub mod pointer;
pub mod schedule;
pub mod starfield;
pub mod trail;

pub use config::*;
pub use error::ConfigError;
pub use fx::*;
pub use pointer::*;
pub use schedule::*;
pub use starfield::*;
pub use trail::*;
