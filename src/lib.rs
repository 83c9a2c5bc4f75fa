pub mod cli;
pub mod completion;
pub mod config;
pub mod data_models;
pub mod error;
pub mod exa;
pub mod pipeline;
pub mod prompt;
pub mod transport;
