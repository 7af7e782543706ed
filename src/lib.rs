pub mod batch;
pub mod cli;
pub mod config;
pub mod discover;
pub mod engine;
pub mod error;
pub mod markdown;
pub mod pipeline;
pub mod postprocess;
pub mod report;
pub mod table;
pub mod text;
pub mod util;
