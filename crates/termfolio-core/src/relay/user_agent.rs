//! Coarse browser/OS detection from a `User-Agent` header.

use regex::Regex;
use std::sync::OnceLock;

static BROWSER_RE: OnceLock<Regex> = OnceLock::new();
static OS_RE: OnceLock<Regex> = OnceLock::new();

fn browser_re() -> &'static Regex {
    BROWSER_RE.get_or_init(|| {
        Regex::new(r"(?i)(edg|chrome|firefox|safari|msie|trident)/?\s*(\d+)")
            .expect("browser pattern is valid")
    })
}

fn os_re() -> &'static Regex {
    OS_RE.get_or_init(|| {
        Regex::new(r"(?i)(android|iphone|ipad|mac|win|linux)")
            .expect("os pattern is valid")
    })
}

/// Browser family and major version, e.g. `Chrome 120`.
///
/// Chromium-based agents also mention Safari, so the first match wins.
pub fn detect_browser(user_agent: &str) -> Option<String> {
    let caps = browser_re().captures(user_agent)?;
    let family = match caps[1].to_lowercase().as_str() {
        "edg" => "Edge",
        "chrome" => "Chrome",
        "firefox" => "Firefox",
        "safari" => "Safari",
        _ => "Internet Explorer",
    };
    Some(format!("{} {}", family, &caps[2]))
}

pub fn detect_os(user_agent: &str) -> Option<String> {
    let caps = os_re().captures(user_agent)?;
    let os = match caps[1].to_lowercase().as_str() {
        "android" => "Android",
        "iphone" | "ipad" => "iOS",
        "mac" => "Mac",
        "win" => "Windows",
        _ => "Linux",
    };
    Some(os.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_ON_LINUX: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const FIREFOX_ON_WINDOWS: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0";

    #[test]
    fn test_detect_browser() {
        assert_eq!(detect_browser(CHROME_ON_LINUX).as_deref(), Some("Chrome 120"));
        assert_eq!(
            detect_browser(FIREFOX_ON_WINDOWS).as_deref(),
            Some("Firefox 121")
        );
        assert_eq!(detect_browser("curl/8.0"), None);
    }

    #[test]
    fn test_detect_os() {
        assert_eq!(detect_os(CHROME_ON_LINUX).as_deref(), Some("Linux"));
        assert_eq!(detect_os(FIREFOX_ON_WINDOWS).as_deref(), Some("Windows"));
        assert_eq!(detect_os("curl/8.0"), None);
    }
}
