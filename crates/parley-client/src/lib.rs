//! parley-client: chat endpoint client
//!
//! This crate speaks the single request/reply protocol of the conversational
//! backend and wraps each exchange in a bounded retry with backoff.

pub mod error;
pub mod exchange;
pub mod retry;
pub mod types;

pub use error::{Error, Result};
pub use exchange::{Exchange, HttpExchange};
pub use retry::{Backoff, RetryPolicy, RetryingClient};
pub use types::*;
