//! API key infrastructure

mod generator;

pub use generator::{KeyGenerator, DEFAULT_KEY_PREFIX};
