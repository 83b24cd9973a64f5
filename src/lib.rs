pub mod config;
pub mod dataset;
pub mod gate;
pub mod ipc;
pub mod session;
pub mod view;
