//! Cookie file provisioning for the secondary provider
//!
//! The cookie secret arrives through a single-line environment variable, so
//! line breaks are written as a literal `\n`. They are restored before the
//! content is written to a Netscape cookie file yt-dlp can read.

use secrecy::{ExposeSecret, SecretString};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::config::COOKIES_FILE_NAME;

/// Replaces every literal `\n` sequence with a real newline
pub fn unescape_newlines(content: &str) -> String {
    content.replace("\\n", "\n")
}

/// Writes the cookie file into `dir` if a secret is configured.
///
/// # Returns
/// * `Ok(Some(path))` - cookie file written
/// * `Ok(None)` - no cookie secret configured
/// * `Err(io::Error)` - the file could not be written
pub fn write_cookies_file(secret: Option<&SecretString>, dir: &Path) -> std::io::Result<Option<PathBuf>> {
    let Some(secret) = secret else {
        return Ok(None);
    };

    let path = dir.join(COOKIES_FILE_NAME);
    let content = unescape_newlines(secret.expose_secret());

    let mut file = fs_err::File::create(&path)?;
    file.write_all(content.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs_err::set_permissions(&path, std::fs::Permissions::from_mode(0o600))?;
    }

    log::debug!("Cookie file written to {}", path.display());
    Ok(Some(path))
}
