// Infrastructure module - External dependencies and adapters
pub mod automation;
pub mod config;
pub mod logging;
pub mod storage;
pub mod telegram;
