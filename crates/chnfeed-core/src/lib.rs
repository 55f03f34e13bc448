pub mod config;
pub mod logging;

pub mod client;
pub mod executor;
pub mod indicator;
pub mod job;
pub mod keystore;
pub mod retry;
pub mod scheduler;
pub mod sink;
