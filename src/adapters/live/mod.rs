//! Live adapters that talk to real network endpoints.

pub mod http;
pub mod openai;
