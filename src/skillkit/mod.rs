// src/skillkit/mod.rs

pub mod agent;
pub mod client_wrapper;
pub mod clients;
pub mod config;
pub mod tool_protocol;
pub mod tool_protocols;
pub mod tools;
