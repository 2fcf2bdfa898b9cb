// Telegram module - Bot API client and transport
pub mod client;
pub mod transport;

pub use client::TelegramClient;
pub use transport::{TelegramTransport, RESPONSE_INTERNAL_ERROR};
