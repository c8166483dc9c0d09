pub mod config;
pub mod session;

pub use config::{ClientConfig, ConfigError};
pub use session::{Command, Session, SessionError, SessionResult, HELP};
