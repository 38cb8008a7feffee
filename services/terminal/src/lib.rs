// Library interface for the terminal - exposes modules for testing

pub mod api;
pub mod config;
pub mod countdown;
pub mod domain;
pub mod errors;
pub mod session;

pub use api::{BettingApi, HttpBettingApi};
pub use session::{Reply, Session};
