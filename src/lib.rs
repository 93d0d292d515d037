//! Tunefetch - Telegram bot that turns a song query into an MP3
//!
//! A query is searched on SoundCloud first and on YouTube once as a fallback;
//! the best match is downloaded with yt-dlp, transcoded to MP3 and uploaded
//! back to the chat.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, process helpers
//! - `download`: providers, extraction backend, orchestration, request pipeline
//! - `telegram`: bot setup, routing and the Telegram chat session
//! - `messages`: user-facing texts

pub mod cli;
pub mod core;
pub mod download;
pub mod messages;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{AppError, AppResult, Config};
pub use crate::download::{process_query, AudioFetcher, DownloadResult, Provider};
