// Public API for the binary, integration tests and embedding front ends

pub mod config;
pub mod console;
pub mod engine;
pub mod history;
pub mod state;
pub mod types;
pub mod words;
