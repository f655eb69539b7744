pub mod config;
pub mod dispatch;
pub mod inputs;
pub mod runner;
pub mod tasks;
pub mod workflow;
