//! Chat model clients and provider abstractions.
//!
//! All chat providers implement [`client::ChatClient`], allowing the
//! pipeline chains to swap providers without changing composition code.

pub mod client;
#[cfg(feature = "ollama")]
pub mod ollama;
#[cfg(feature = "openai")]
pub mod openai;

pub use client::{ChatClient, ChatProvider, SamplingConfig};
