//! Telegram bot integration and handlers

pub mod bot;
pub mod handlers;
pub mod router;
pub mod session;

// Re-exports for convenience
pub use bot::{create_bot, setup_bot_commands, Command};
pub use handlers::{schema, HandlerDeps, HandlerError};
pub use router::Incoming;
pub use session::TelegramSession;
