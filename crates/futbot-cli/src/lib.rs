//! futbot: place market, limit and take-profit/stop-loss orders on the
//! USDT-M futures testnet from the command line.
//!
//! Flow of one invocation:
//! - parse the command line (`cli`)
//! - load configuration and credentials (`config`)
//! - open one probed session and run the command (`app`)
//! - render the result or error (`presenter`)

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod presenter;

pub use app::{Application, Outcome};
pub use cli::{Cli, Command};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use presenter::Presenter;
