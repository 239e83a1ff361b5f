//! Pulling selectors, URLs and expected/received values out of engine text

use regex::Regex;
use std::sync::OnceLock;

/// Shown when the engine text names no selector
pub const UNKNOWN_SELECTOR: &str = "<unknown selector>";

/// Shown when the engine text names no address
pub const UNKNOWN_URL: &str = "<unknown url>";

macro_rules! cached_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> Option<&'static Regex> {
            static CELL: OnceLock<Option<Regex>> = OnceLock::new();
            CELL.get_or_init(|| Regex::new($pattern).ok()).as_ref()
        }
    };
}

cached_regex!(
    quoted_locator,
    r#"locator\('([^'\n]*)'\)|locator\("([^"\n]*)"\)|locator\(`([^`\n]*)`\)"#
);
cached_regex!(
    get_by_call,
    r"getBy(?:Role|Text|Label|Placeholder|AltText|Title|TestId)\([^)\n]*\)"
);
cached_regex!(
    selector_assignment,
    r#"selector\s*[=:]\s*(?:"([^"\n]+)"|'([^'\n]+)')"#
);
cached_regex!(
    waiting_for_selector,
    r#"waiting for selector (?:"([^"\n]+)"|'([^'\n]+)'|`([^`\n]+)`)"#
);
cached_regex!(navigating_to, r#"navigating to "([^"\n]+)""#);
cached_regex!(bare_url, r#"(?:https?|wss?|file)://[^\s'"<>)\]]+"#);
cached_regex!(
    expected_line,
    r"(?m)^\s*Expected(?: string| pattern| value)?:[ \t]*(.*?)\s*$"
);
cached_regex!(
    received_line,
    r"(?m)^\s*Received(?: string| value)?:[ \t]*(.*?)\s*$"
);
cached_regex!(ansi_escape, r"\x1b\[[0-9;]*m");
cached_regex!(
    browser_engine,
    r"(?i)\b(chromium|firefox|webkit|chrome|msedge)\b"
);

/// First capture group that participated in the match
fn first_group(captures: &regex::Captures<'_>) -> Option<String> {
    captures
        .iter()
        .skip(1)
        .flatten()
        .next()
        .map(|m| m.as_str().to_string())
}

/// Selector named in the text, trying the most specific forms first
pub fn extract_selector(text: &str) -> Option<String> {
    if let Some(caps) = quoted_locator().and_then(|re| re.captures(text)) {
        return first_group(&caps);
    }
    if let Some(m) = get_by_call().and_then(|re| re.find(text)) {
        return Some(m.as_str().to_string());
    }
    if let Some(caps) = selector_assignment().and_then(|re| re.captures(text)) {
        return first_group(&caps);
    }
    waiting_for_selector()
        .and_then(|re| re.captures(text))
        .and_then(|caps| first_group(&caps))
}

pub fn selector_or_unknown(text: &str) -> String {
    extract_selector(text).unwrap_or_else(|| UNKNOWN_SELECTOR.to_string())
}

/// Address named in the text: `navigating to "…"` wins over a bare URL
pub fn extract_url(text: &str) -> Option<String> {
    if let Some(url) = navigating_to()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
    {
        return Some(url.as_str().to_string());
    }
    bare_url()
        .and_then(|re| re.find(text))
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';']).to_string())
}

pub fn url_or_unknown(text: &str) -> String {
    extract_url(text).unwrap_or_else(|| UNKNOWN_URL.to_string())
}

/// `Expected: …` / `Received: …` lines, unquoted
pub fn extract_expected_received(text: &str) -> Option<(String, String)> {
    let expected = expected_line()?.captures(text)?.get(1)?.as_str();
    let received = received_line()?.captures(text)?.get(1)?.as_str();
    Some((unquote(expected), unquote(received)))
}

/// Browser engine named in the text
pub fn extract_engine(text: &str) -> Option<String> {
    browser_engine()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
}

/// Remove terminal color codes the engine embeds in assertion output
pub fn strip_ansi(text: &str) -> std::borrow::Cow<'_, str> {
    match ansi_escape() {
        Some(re) => re.replace_all(text, ""),
        None => std::borrow::Cow::Borrowed(text),
    }
}

fn unquote(value: &str) -> String {
    let value = value.trim();
    for quote in ['"', '\'', '`'] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.to_string();
        }
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_selector_forms() {
        assert_eq!(
            extract_selector("strict mode violation: locator('.btn') resolved to 3 elements"),
            Some(".btn".to_string())
        );
        assert_eq!(
            extract_selector(r##"waiting for locator("#login")"##),
            Some("#login".to_string())
        );
        assert_eq!(
            extract_selector("waiting for getByRole('button', { name: 'Save' })"),
            Some("getByRole('button', { name: 'Save' })".to_string())
        );
        assert_eq!(
            extract_selector(r#"selector="text=Sign in""#),
            Some("text=Sign in".to_string())
        );
        assert_eq!(
            extract_selector(r#"waiting for selector "input[name=email]""#),
            Some("input[name=email]".to_string())
        );
        assert_eq!(extract_selector("nothing here"), None);
        assert_eq!(selector_or_unknown("nothing here"), UNKNOWN_SELECTOR);
    }

    #[test]
    fn test_extract_url() {
        assert_eq!(
            extract_url(r#"navigating to "https://example.com/login", waiting until "load""#),
            Some("https://example.com/login".to_string())
        );
        assert_eq!(
            extract_url("net::ERR_CONNECTION_REFUSED at http://localhost:3000/."),
            Some("http://localhost:3000/".to_string())
        );
        assert_eq!(
            extract_url("WebSocket connection to 'wss://example.com/socket' failed"),
            Some("wss://example.com/socket".to_string())
        );
        assert_eq!(url_or_unknown("offline"), UNKNOWN_URL);
    }

    #[test]
    fn test_extract_expected_received() {
        let text = "expect(locator).toHaveText(expected)\n\nExpected string: \"Welcome\"\nReceived string: \"Sign in\"\n";
        assert_eq!(
            extract_expected_received(text),
            Some(("Welcome".to_string(), "Sign in".to_string()))
        );
        assert_eq!(
            extract_expected_received("Expected: 3\nReceived: 5"),
            Some(("3".to_string(), "5".to_string()))
        );
        assert_eq!(extract_expected_received("Expected: 3"), None);
    }

    #[test]
    fn test_strip_ansi_and_engine() {
        assert_eq!(strip_ansi("\u{1b}[31mred\u{1b}[39m"), "red");
        assert_eq!(
            extract_engine("browserType.launch: Executable doesn't exist at /ms-playwright/firefox-1400/firefox"),
            Some("firefox".to_string())
        );
    }
}
