//! Error handling for Stakeout.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod event_error;
pub mod pipeline_error;

pub use config_error::ConfigError;
pub use event_error::EventError;
pub use pipeline_error::PipelineError;
