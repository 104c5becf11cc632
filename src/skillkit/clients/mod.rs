//! Provider specific [`ClientWrapper`](crate::client_wrapper::ClientWrapper) implementations.
//!
//! Only OpenAI-compatible chat endpoints are supported; point
//! [`OpenAIClient::new_with_base_url`](openai::OpenAIClient::new_with_base_url) at any
//! compatible deployment.

pub mod common;

pub mod openai;
