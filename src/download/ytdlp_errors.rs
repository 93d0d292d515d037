//! yt-dlp failure analysis
//!
//! Classifies extractor output so the orchestrator can tell "this provider
//! needs a signed-in session" apart from every other failure.

/// yt-dlp error types the bot reacts to differently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YtDlpErrorType {
    /// The platform asks for a signed-in session (consent or age gate, bot check)
    AuthRequired,
    /// The search returned nothing
    NoResults,
    /// Anything else
    Other,
}

/// Phrase YouTube uses for its sign-in interstitial; matched case-sensitively
pub const SIGN_IN_PHRASE: &str = "Sign in to confirm";

/// Whether a failure text points at missing or stale cookies.
///
/// Matches the sign-in interstitial or any mention of cookies.
pub fn is_auth_gate(text: &str) -> bool {
    text.contains(SIGN_IN_PHRASE) || text.to_lowercase().contains("cookies")
}

/// Analyzes yt-dlp stderr and determines the error type
pub fn analyze_ytdlp_error(stderr: &str) -> YtDlpErrorType {
    if is_auth_gate(stderr) {
        return YtDlpErrorType::AuthRequired;
    }

    let lower = stderr.to_lowercase();
    if lower.contains("no results") || lower.contains("no video results") || lower.contains("no entries") {
        return YtDlpErrorType::NoResults;
    }

    YtDlpErrorType::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_prompt_is_auth_gate() {
        let stderr = "ERROR: [youtube] dQw4w9WgXcQ: Sign in to confirm you're not a bot. Use --cookies-from-browser";
        assert!(is_auth_gate(stderr));
        assert_eq!(analyze_ytdlp_error(stderr), YtDlpErrorType::AuthRequired);
    }

    #[test]
    fn test_cookies_match_is_case_insensitive() {
        assert!(is_auth_gate("The provided YouTube account Cookies are no longer valid"));
    }

    #[test]
    fn test_sign_in_phrase_is_case_sensitive() {
        assert!(!is_auth_gate("please sign in to confirm"));
    }

    #[test]
    fn test_no_results() {
        assert_eq!(
            analyze_ytdlp_error("ERROR: [soundcloud:search] No results found"),
            YtDlpErrorType::NoResults
        );
    }

    #[test]
    fn test_other() {
        assert_eq!(
            analyze_ytdlp_error("ERROR: Postprocessing: ffprobe and ffmpeg not found"),
            YtDlpErrorType::Other
        );
    }
}
