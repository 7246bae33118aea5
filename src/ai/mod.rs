//! AI deployment assistant.
//!
//! - [`provider`] - Supported providers and their endpoints
//! - [`chat`] - HTTP plumbing shared by the backends
//! - [`assistant`] - Prompt, key resolution and dispatch
//!
//! Each backend (`openai`, `anthropic`, `google`) turns a [`ChatRequest`]
//! into that provider's wire format.

mod anthropic;
pub mod assistant;
pub mod chat;
mod google;
mod openai;
pub mod provider;

pub use assistant::{resolve_api_key, system_prompt, Assistant, TEST_MESSAGE};
pub use chat::{ChatRequest, MAX_TOKENS, REQUEST_TIMEOUT, TEMPERATURE};
pub use provider::{Endpoint, Provider};
