//! Small text helpers shared by the download and Telegram layers

/// Telegram rejects text messages longer than this many UTF-16 code units
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Truncates a string to `max_len` UTF-16 code units, appending "..." when cut.
///
/// Telegram measures message length in UTF-16, so a character outside the
/// BMP (most emoji) counts twice. Characters are never split.
pub fn truncate_string_safe(text: &str, max_len: usize) -> String {
    if text.encode_utf16().count() <= max_len {
        return text.to_string();
    }

    let budget = max_len.saturating_sub(3);
    let mut used = 0;
    let mut result: String = text
        .chars()
        .take_while(|c| {
            used += c.len_utf16();
            used <= budget
        })
        .collect();
    result.push_str("...");
    result
}

/// Extracts the `ERROR:` lines from yt-dlp stderr.
///
/// Falls back to the trimmed stderr when yt-dlp printed no tagged error line
/// (e.g. a Python traceback or a missing ffmpeg message).
pub fn ytdlp_error_summary(stderr: &str) -> String {
    let errors: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("ERROR:"))
        .collect();

    if errors.is_empty() {
        stderr.trim().to_string()
    } else {
        errors.join("\n")
    }
}
