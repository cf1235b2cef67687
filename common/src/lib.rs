#[macro_use]
extern crate log;

pub mod classifier;
pub mod config;
pub mod consts;
pub mod errors;
pub mod host;
pub mod instructor;
pub mod ipc;
pub mod sync;
pub mod telemetry;
pub mod types;
pub mod ui;

