// Library surface for headless/integration tests and reuse.
// Terminal setup and the CLI live in main.rs.
pub mod app;
pub mod config;
pub mod error;
pub mod history;
pub mod input;
pub mod logging;
pub mod observer;
pub mod runtime;
pub mod sampler;
pub mod tracker;
pub mod ui;
