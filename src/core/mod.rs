// Core module - Session lifecycle and command authorization
pub mod automation;
pub mod command;
pub mod session;
