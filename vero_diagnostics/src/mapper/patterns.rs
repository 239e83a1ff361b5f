//! Priority-ordered pattern table
//!
//! Rules are declared once, compiled once and sorted once by descending
//! priority. The sort is stable, so equal priorities keep declaration
//! order. Lookup is first-match, never best-match.

use super::extract::{
    extract_engine, extract_expected_received, extract_selector, extract_url,
    selector_or_unknown, url_or_unknown,
};
use super::MapperError;
use crate::factories::{
    AssertionError, BrowserError, LocatorError, NavigationError, NetworkError, RuntimeSymptom,
    TimeoutError,
};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::{Arc, OnceLock};

/// Turns a match over the engine text into a classified symptom
pub type Classify = fn(&Captures<'_>, &str) -> RuntimeSymptom;

/// One matching rule before compilation
#[derive(Clone)]
pub struct PatternRule {
    pub id: Cow<'static, str>,
    pub priority: i32,
    pub pattern: Cow<'static, str>,
    pub classify: Classify,
}

impl PatternRule {
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        priority: i32,
        pattern: impl Into<Cow<'static, str>>,
        classify: Classify,
    ) -> Self {
        Self {
            id: id.into(),
            priority,
            pattern: pattern.into(),
            classify,
        }
    }
}

impl std::fmt::Debug for PatternRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternRule")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("pattern", &self.pattern)
            .finish()
    }
}

#[derive(Debug)]
pub struct CompiledPattern {
    rule: PatternRule,
    regex: Regex,
}

impl CompiledPattern {
    pub fn id(&self) -> &str {
        &self.rule.id
    }

    pub fn priority(&self) -> i32 {
        self.rule.priority
    }
}

/// Outcome of a successful table lookup
#[derive(Debug)]
pub struct PatternMatch<'a> {
    pub pattern: &'a CompiledPattern,
    pub symptom: RuntimeSymptom,
}

/// Immutable, priority-sorted rule table
#[derive(Debug, Default)]
pub struct PatternTable {
    patterns: Vec<CompiledPattern>,
}

impl PatternTable {
    /// Compile and sort rules; fails on the first invalid regex
    pub fn try_new(rules: Vec<PatternRule>) -> Result<Self, MapperError> {
        let mut patterns = rules
            .into_iter()
            .map(|rule| {
                let regex = Regex::new(&rule.pattern)
                    .map_err(|e| MapperError::invalid_pattern(&rule.id, e))?;
                Ok(CompiledPattern { rule, regex })
            })
            .collect::<Result<Vec<_>, MapperError>>()?;

        patterns.sort_by_key(|p| std::cmp::Reverse(p.rule.priority));
        Ok(Self { patterns })
    }

    /// The built-in table, compiled on first use
    pub fn builtin() -> Arc<PatternTable> {
        static BUILTIN: OnceLock<Arc<PatternTable>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| match PatternTable::try_new(builtin_rules()) {
                Ok(table) => Arc::new(table),
                Err(e) => {
                    log_error!(crate::registry::FALLBACK_CODE, "Built-in pattern table failed to compile",
                        "error" => e
                    );
                    Arc::new(PatternTable::default())
                }
            })
            .clone()
    }

    pub fn first_match<'a>(&'a self, text: &str) -> Option<PatternMatch<'a>> {
        self.patterns.iter().find_map(|pattern| {
            pattern.regex.captures(text).map(|caps| PatternMatch {
                pattern,
                symptom: (pattern.rule.classify)(&caps, text),
            })
        })
    }

    /// True iff some rule matches, without classifying
    pub fn is_match(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.regex.is_match(text))
    }

    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

// ============================================================================
// CAPTURE HELPERS
// ============================================================================

fn group_str<'t>(caps: &Captures<'t>, index: usize) -> Option<&'t str> {
    caps.get(index).map(|m| m.as_str())
}

/// Integer types a numeric capture is read into
trait CaptureNumber: TryFrom<u64> + Default {
    const CEILING: Self;
}

impl CaptureNumber for u16 {
    const CEILING: Self = u16::MAX;
}

impl CaptureNumber for u64 {
    const CEILING: Self = u64::MAX;
}

impl CaptureNumber for usize {
    const CEILING: Self = usize::MAX;
}

/// ASCII digits as a number, saturating instead of overflowing
fn saturating_digits(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    }))
}

/// First numeric group among `indices` that participated; oversized values clamp
fn group_number<T: CaptureNumber>(caps: &Captures<'_>, indices: &[usize]) -> T {
    indices
        .iter()
        .find_map(|&i| group_str(caps, i).and_then(saturating_digits))
        .map(|n| T::try_from(n).unwrap_or(T::CEILING))
        .unwrap_or_default()
}

fn expected_received(text: &str) -> (String, String) {
    extract_expected_received(text)
        .unwrap_or_else(|| ("<unknown>".to_string(), "<unknown>".to_string()))
}

// ============================================================================
// BUILT-IN RULES
// ============================================================================

/// Rules recognized out of the box, in declaration order
pub fn builtin_rules() -> Vec<PatternRule> {
    let mut rules = Vec::new();
    rules.extend(browser_rules());
    rules.extend(locator_rules());
    rules.extend(navigation_rules());
    rules.extend(network_rules());
    rules.extend(timeout_rules());
    rules.extend(assertion_rules());
    rules
}

fn browser_rules() -> Vec<PatternRule> {
    vec![
        PatternRule::new(
            "browser.not_installed",
            92,
            r"(?i)executable doesn't exist|npx playwright install",
            |_, text| {
                let engine = extract_engine(text).unwrap_or_else(|| "browser".to_string());
                BrowserError::not_installed(&engine).into()
            },
        ),
        PatternRule::new(
            "browser.crashed",
            90,
            r"(?i)\b(?:browser|page|target)\s+(?:has\s+)?crashed\b",
            |_, _| BrowserError::crashed().into(),
        ),
        PatternRule::new(
            "browser.frame_detached",
            88,
            r"(?i)\bframe (?:was|has been|got) detached\b",
            |_, _| BrowserError::frame_detached().into(),
        ),
        PatternRule::new(
            "browser.context_closed",
            87,
            r"(?i)target page, context or browser has been closed|\bbrowser has been closed|\bcontext (?:has been |was )?closed\b",
            |_, _| BrowserError::context_closed().into(),
        ),
        PatternRule::new(
            "browser.page_closed",
            86,
            r"(?i)\bpage (?:has been |was )?closed\b|\btarget closed\b",
            |_, _| BrowserError::page_closed().into(),
        ),
        PatternRule::new(
            "browser.popup_not_found",
            76,
            r#"(?i)waiting for event "popup"|\bpopup (?:window )?(?:was )?not found|\bpopup (?:never|did not) open"#,
            |_, _| BrowserError::popup_not_found().into(),
        ),
        PatternRule::new(
            "browser.launch_failed",
            84,
            r"(?i)browserType\.launch(?:PersistentContext)?: ([^\n]+)",
            |caps, _| BrowserError::launch_failed(group_str(caps, 1).unwrap_or_default()).into(),
        ),
    ]
}

fn locator_rules() -> Vec<PatternRule> {
    vec![
        PatternRule::new(
            "locator.strict_mode",
            100,
            r"strict mode violation: ([^\n]+?) resolved to (\d+) elements",
            |caps, _| {
                let target = group_str(caps, 1).unwrap_or_default();
                let selector = extract_selector(target).unwrap_or_else(|| target.to_string());
                LocatorError::ambiguous(&selector, group_number(caps, &[2])).into()
            },
        ),
        PatternRule::new(
            "locator.detached",
            95,
            r"(?i)element is not attached to the DOM|element was detached from the DOM",
            |_, text| LocatorError::detached(&selector_or_unknown(text)).into(),
        ),
        PatternRule::new(
            "locator.covered",
            95,
            r"(?:(<[^>\n]+>)[^\n]*?)?intercepts pointer events",
            |caps, text| {
                LocatorError::covered(&selector_or_unknown(text), group_str(caps, 1)).into()
            },
        ),
        PatternRule::new(
            "locator.outside_viewport",
            95,
            r"(?i)element is outside of the viewport",
            |_, text| LocatorError::outside_viewport(&selector_or_unknown(text)).into(),
        ),
        PatternRule::new(
            "locator.disabled",
            95,
            r"(?i)element is (?:not enabled|disabled)",
            |_, text| LocatorError::disabled(&selector_or_unknown(text)).into(),
        ),
        PatternRule::new(
            "locator.not_editable",
            95,
            r"(?i)element is not (?:editable|an <input>)",
            |_, text| LocatorError::not_editable(&selector_or_unknown(text)).into(),
        ),
        PatternRule::new(
            "locator.not_visible",
            90,
            r"(?i)element is not visible",
            |_, text| LocatorError::not_visible(&selector_or_unknown(text)).into(),
        ),
        PatternRule::new(
            "locator.resolves_count",
            80,
            r"(?i)\blocator resolve[sd] to (0|[1-9][0-9]+|[2-9]) elements?\b",
            |caps, text| {
                let selector = selector_or_unknown(text);
                match group_number::<usize>(caps, &[1]) {
                    0 => LocatorError::not_found(&selector).into(),
                    count => LocatorError::ambiguous(&selector, count).into(),
                }
            },
        ),
        PatternRule::new(
            "locator.not_found",
            80,
            r"(?i)\bno (?:element|node)s? (?:found|matche[sd])|\belement(?:\(s\))? not found",
            |_, text| LocatorError::not_found(&selector_or_unknown(text)).into(),
        ),
    ]
}

fn navigation_rules() -> Vec<PatternRule> {
    vec![
        PatternRule::new(
            "navigation.dns_not_resolved",
            85,
            r"net::ERR_NAME_NOT_RESOLVED",
            |_, text| NavigationError::dns_not_resolved(&url_or_unknown(text)).into(),
        ),
        PatternRule::new(
            "navigation.connection_refused",
            85,
            r"net::ERR_CONNECTION_REFUSED",
            |_, text| NavigationError::connection_refused(&url_or_unknown(text)).into(),
        ),
        PatternRule::new(
            "navigation.ssl",
            85,
            r"net::ERR_(?:CERT|SSL)_[A-Z_]+|SSL_ERROR_[A-Z_]+|SEC_ERROR_[A-Z_]+",
            |_, text| NavigationError::ssl_error(&url_or_unknown(text)).into(),
        ),
        PatternRule::new(
            "navigation.offline",
            85,
            r"net::ERR_INTERNET_DISCONNECTED",
            |_, _| NavigationError::offline().into(),
        ),
        PatternRule::new(
            "navigation.invalid_url",
            85,
            r"(?i)\binvalid url\b",
            |_, text| NavigationError::invalid_url(&url_or_unknown(text)).into(),
        ),
        // Outranks frame detachment: the engine appends "maybe frame was detached?"
        PatternRule::new(
            "navigation.aborted",
            89,
            r"net::ERR_ABORTED|NS_BINDING_ABORTED",
            |_, text| NavigationError::aborted(&url_or_unknown(text)).into(),
        ),
        PatternRule::new(
            "navigation.http_status",
            70,
            r"(?:(?i:\bstatus(?: code)?)|\bHTTP)[:\s]+([45]\d{2})\b[ \t]*([A-Z][A-Za-z]*(?: [A-Z][A-Za-z]*)*)?",
            |caps, text| {
                NavigationError::http_error(
                    &url_or_unknown(text),
                    group_number(caps, &[1]),
                    group_str(caps, 2).unwrap_or_default(),
                )
                .into()
            },
        ),
    ]
}

fn network_rules() -> Vec<PatternRule> {
    vec![
        PatternRule::new(
            "network.cors_url",
            88,
            r"(?i)access to (?:fetch|XMLHttpRequest) at '([^'\n]+)' from origin '[^'\n]*' has been blocked by CORS policy",
            |caps, _| NetworkError::cors_blocked(group_str(caps, 1)).into(),
        ),
        PatternRule::new(
            "network.cors",
            87,
            r"(?i)\bCORS\b|cross-origin request blocked",
            |_, text| NetworkError::cors_blocked(extract_url(text).as_deref()).into(),
        ),
        PatternRule::new(
            "network.request_timeout",
            83,
            r"net::ERR_(?:CONNECTION_)?TIMED_OUT|(?i:\brequest timed out\b)",
            |_, text| NetworkError::request_timeout(extract_url(text).as_deref()).into(),
        ),
        PatternRule::new(
            "network.websocket",
            82,
            r"(?i)\bWebSocket\b[^\n]*\b(?:failed|error|closed)\b",
            |_, text| NetworkError::websocket_error(extract_url(text).as_deref()).into(),
        ),
        PatternRule::new(
            "network.offline",
            82,
            r"net::ERR_NETWORK_CHANGED|net::ERR_NETWORK_IO_SUSPENDED|(?i:\bnetwork (?:is )?offline\b)",
            |_, _| NetworkError::offline().into(),
        ),
        PatternRule::new(
            "network.request_failed",
            78,
            r"net::ERR_FAILED|net::ERR_CONNECTION_RESET|net::ERR_EMPTY_RESPONSE|(?i:\bfetch failed\b|\bfailed to fetch\b|\brequest failed\b|NetworkError when attempting to fetch)",
            |_, text| NetworkError::request_failed(extract_url(text).as_deref()).into(),
        ),
    ]
}

fn timeout_rules() -> Vec<PatternRule> {
    vec![
        PatternRule::new(
            "timeout.page_load",
            75,
            r"(?i)page\.(?:goto|reload|goBack|goForward): Timeout (\d+)\s?ms exceeded",
            |caps, text| {
                TimeoutError::page_load(extract_url(text).as_deref(), group_number(caps, &[1])).into()
            },
        ),
        PatternRule::new(
            "timeout.network_idle",
            74,
            r"(?is)(?:waitForLoadState|networkidle).*?Timeout (\d+)\s?ms exceeded|Timeout (\d+)\s?ms exceeded.*?networkidle",
            |caps, _| TimeoutError::network_idle(group_number(caps, &[1, 2])).into(),
        ),
        PatternRule::new(
            "timeout.navigation",
            73,
            r"(?i)(?:waitForNavigation|waitForURL): Timeout (\d+)\s?ms exceeded",
            |caps, _| TimeoutError::navigation(group_number(caps, &[1])).into(),
        ),
        PatternRule::new(
            "timeout.action",
            72,
            r"(?i)(?:locator|page|frame|elementHandle)\.(click|dblclick|fill|type|press|pressSequentially|check|uncheck|setChecked|hover|selectOption|setInputFiles|tap|focus|dragTo|clear): Timeout (\d+)\s?ms exceeded",
            |caps, text| {
                TimeoutError::action(
                    group_str(caps, 1).unwrap_or("action"),
                    extract_selector(text).as_deref(),
                    group_number(caps, &[2]),
                )
                .into()
            },
        ),
        PatternRule::new(
            "timeout.test",
            71,
            r"(?i)test timeout of (\d+)\s?ms exceeded",
            |caps, _| TimeoutError::test(group_number(caps, &[1])).into(),
        ),
        PatternRule::new(
            "timeout.element_wait",
            60,
            r"(?i)Timeout (\d+)\s?ms exceeded",
            |caps, text| {
                TimeoutError::element_wait(extract_selector(text).as_deref(), group_number(caps, &[1]))
                    .into()
            },
        ),
    ]
}

fn assertion_rules() -> Vec<PatternRule> {
    vec![
        PatternRule::new(
            "assertion.visibility",
            92,
            r"expect\((?:locator|received)\)\.(not\.)?(toBeVisible|toBeHidden)\(",
            |caps, text| {
                let negated = caps.get(1).is_some();
                let wants_visible = (group_str(caps, 2) == Some("toBeVisible")) != negated;
                let (expected, fallback_actual) = if wants_visible {
                    ("visible", "hidden")
                } else {
                    ("hidden", "visible")
                };
                let actual = extract_expected_received(text)
                    .map(|(_, received)| received)
                    .unwrap_or_else(|| fallback_actual.to_string());
                AssertionError::visibility_failed(&selector_or_unknown(text), expected, &actual)
                    .into()
            },
        ),
        PatternRule::new(
            "assertion.text",
            91,
            r"expect\((?:locator|received)\)\.(?:not\.)?(?:toHaveText|toContainText)\(",
            |_, text| {
                let (expected, actual) = expected_received(text);
                AssertionError::text_mismatch(&selector_or_unknown(text), &expected, &actual).into()
            },
        ),
        PatternRule::new(
            "assertion.value",
            91,
            r"expect\((?:locator|received)\)\.(?:not\.)?toHaveValue\(",
            |_, text| {
                let (expected, actual) = expected_received(text);
                AssertionError::value_mismatch(&selector_or_unknown(text), &expected, &actual)
                    .into()
            },
        ),
        PatternRule::new(
            "assertion.count",
            91,
            r"expect\((?:locator|received)\)\.(?:not\.)?toHaveCount\(",
            |_, text| {
                let (expected, actual) = expected_received(text);
                match (expected.parse(), actual.parse()) {
                    (Ok(e), Ok(a)) => {
                        AssertionError::count_mismatch(&selector_or_unknown(text), e, a).into()
                    }
                    _ => AssertionError::mismatch(&expected, &actual).into(),
                }
            },
        ),
        PatternRule::new(
            "assertion.url",
            91,
            r"expect\((?:page|received)\)\.(?:not\.)?toHaveURL\(",
            |_, text| {
                let (expected, actual) = expected_received(text);
                AssertionError::url_mismatch(&expected, &actual).into()
            },
        ),
        PatternRule::new(
            "assertion.title",
            91,
            r"expect\((?:page|received)\)\.(?:not\.)?toHaveTitle\(",
            |_, text| {
                let (expected, actual) = expected_received(text);
                AssertionError::title_mismatch(&expected, &actual).into()
            },
        ),
        PatternRule::new(
            "assertion.attribute",
            91,
            r#"expect\((?:locator|received)\)\.(?:not\.)?toHaveAttribute\((?:\s*['"]([^'"\n]+)['"])?"#,
            |caps, text| {
                let (expected, actual) = expected_received(text);
                AssertionError::attribute_mismatch(
                    &selector_or_unknown(text),
                    group_str(caps, 1).unwrap_or("attribute"),
                    &expected,
                    &actual,
                )
                .into()
            },
        ),
        PatternRule::new(
            "assertion.generic",
            50,
            r"Expected:?\s*([^\n]+?)\s+Received:?\s*([^\n]+)",
            |caps, text| {
                let (expected, actual) = extract_expected_received(text).unwrap_or_else(|| {
                    (
                        group_str(caps, 1).unwrap_or_default().to_string(),
                        group_str(caps, 2).unwrap_or_default().trim().to_string(),
                    )
                });
                AssertionError::mismatch(&expected, &actual).into()
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ErrorCategory;
    use assert_matches::assert_matches;

    /// One representative engine message per built-in rule
    const SAMPLES: &[(&str, &str)] = &[
        ("browser.not_installed", "browserType.launch: Executable doesn't exist at /ms-playwright/chromium-1091/chrome-linux/chrome"),
        ("browser.crashed", "page.click: Page crashed"),
        ("browser.frame_detached", "frame.click: Frame was detached"),
        ("browser.context_closed", "page.goto: Target page, context or browser has been closed"),
        ("browser.page_closed", "page.evaluate: Target closed"),
        ("browser.popup_not_found", "page.waitForEvent: Timeout 30000ms exceeded while waiting for event \"popup\""),
        ("browser.launch_failed", "browserType.launch: Failed to launch chromium because of missing dependencies"),
        ("locator.strict_mode", "strict mode violation: locator('.btn') resolved to 3 elements"),
        ("locator.detached", "elementHandle.click: Element is not attached to the DOM"),
        ("locator.covered", "<div class=\"overlay\"></div> intercepts pointer events"),
        ("locator.outside_viewport", "locator.click: Element is outside of the viewport"),
        ("locator.disabled", "locator.fill: element is not enabled"),
        ("locator.not_editable", "locator.fill: Error: Element is not an <input>, <textarea> or [contenteditable] element"),
        ("locator.not_visible", "locator.click: element is not visible"),
        ("locator.resolves_count", "Locator resolves to 0 elements"),
        ("locator.not_found", "Error: No element found for selector: #missing"),
        ("navigation.dns_not_resolved", "page.goto: net::ERR_NAME_NOT_RESOLVED at https://nope.invalid/"),
        ("navigation.connection_refused", "page.goto: net::ERR_CONNECTION_REFUSED at http://localhost:3000/"),
        ("navigation.ssl", "page.goto: net::ERR_CERT_AUTHORITY_INVALID at https://self-signed.local/"),
        ("navigation.offline", "page.goto: net::ERR_INTERNET_DISCONNECTED at https://example.com/"),
        ("navigation.invalid_url", "page.goto: Protocol error (Page.navigate): Cannot navigate to invalid URL"),
        ("navigation.aborted", "page.goto: net::ERR_ABORTED; maybe frame was detached?"),
        ("navigation.http_status", "Response status: 500 Internal Server Error for https://example.com/api"),
        ("network.cors_url", "Access to fetch at 'https://api.example.com/data' from origin 'http://localhost:3000' has been blocked by CORS policy"),
        ("network.cors", "Cross-Origin Request Blocked: The Same Origin Policy disallows reading the remote resource"),
        ("network.request_timeout", "net::ERR_TIMED_OUT at https://api.example.com/slow"),
        ("network.websocket", "WebSocket connection to 'wss://example.com/socket' failed"),
        ("network.offline", "Network is offline"),
        ("network.request_failed", "TypeError: Failed to fetch"),
        ("timeout.page_load", "page.goto: Timeout 30000ms exceeded.\nCall log:\n  - navigating to \"https://example.com/\", waiting until \"load\""),
        ("timeout.network_idle", "page.waitForLoadState: Timeout 15000ms exceeded."),
        ("timeout.navigation", "page.waitForURL: Timeout 10000ms exceeded."),
        ("timeout.action", "locator.click: Timeout 5000ms exceeded.\nCall log:\n  - waiting for locator('#save')"),
        ("timeout.test", "Test timeout of 60000ms exceeded."),
        ("timeout.element_wait", "Timeout 30000ms exceeded"),
        ("assertion.visibility", "expect(locator).toBeVisible() failed\n\nLocator: locator('.toast')\nExpected: visible\nReceived: hidden"),
        ("assertion.text", "expect(locator).toHaveText(expected) failed\n\nLocator: locator(\"h1\")\nExpected string: \"Welcome\"\nReceived string: \"Sign in\""),
        ("assertion.value", "expect(locator).toHaveValue(expected) failed\n\nExpected string: \"a@b.c\"\nReceived string: \"\""),
        ("assertion.count", "expect(locator).toHaveCount(expected) failed\n\nExpected: 3\nReceived: 2"),
        ("assertion.url", "expect(page).toHaveURL(expected) failed\n\nExpected string: \"https://example.com/home\"\nReceived string: \"https://example.com/login\""),
        ("assertion.title", "expect(page).toHaveTitle(expected) failed\n\nExpected string: \"Home\"\nReceived string: \"Login\""),
        ("assertion.attribute", "expect(locator).toHaveAttribute(expected) failed\n\nExpected string: \"/a\"\nReceived string: \"/b\""),
        ("assertion.generic", "expect(received).toBe(expected)\n\nExpected: 3\nReceived: 5"),
    ];

    fn table() -> Arc<PatternTable> {
        PatternTable::builtin()
    }

    #[test]
    fn test_builtin_rules_compile() {
        let table = PatternTable::try_new(builtin_rules()).unwrap();
        assert_eq!(table.len(), builtin_rules().len());
    }

    #[test]
    fn test_every_rule_has_a_sample_and_ids_are_unique() {
        let mut ids = std::collections::HashSet::new();
        for rule in builtin_rules() {
            assert!(ids.insert(rule.id.clone()), "duplicate id {}", rule.id);
            assert!(
                SAMPLES.iter().any(|(id, _)| *id == rule.id),
                "no sample for {}",
                rule.id
            );
        }
        assert_eq!(SAMPLES.len(), ids.len());
    }

    #[test]
    fn test_each_sample_is_won_by_its_own_rule() {
        let table = table();
        for (id, text) in SAMPLES {
            let hit = table
                .first_match(&format!("{}\n", text))
                .unwrap_or_else(|| panic!("no rule matched sample for {id}"));
            assert_eq!(hit.pattern.id(), *id, "sample: {text}");
        }
    }

    #[test]
    fn test_table_is_sorted_by_descending_priority() {
        let table = table();
        for pair in table.patterns().windows(2) {
            assert!(pair[0].priority() >= pair[1].priority());
        }
    }

    #[test]
    fn test_higher_priority_wins_regardless_of_declaration_order() {
        let table = PatternTable::try_new(vec![
            PatternRule::new("low", 50, "boom", |_, _| BrowserError::crashed().into()),
            PatternRule::new("high", 90, "boom", |_, _| NetworkError::offline().into()),
        ])
        .unwrap();

        let hit = table.first_match("boom").unwrap();
        assert_eq!(hit.pattern.id(), "high");
        assert_eq!(hit.symptom.category(), ErrorCategory::Network);
    }

    #[test]
    fn test_equal_priority_keeps_declaration_order() {
        let table = PatternTable::try_new(vec![
            PatternRule::new("first", 70, "boom", |_, _| BrowserError::crashed().into()),
            PatternRule::new("second", 70, "boom", |_, _| NetworkError::offline().into()),
        ])
        .unwrap();
        assert_eq!(table.first_match("boom").unwrap().pattern.id(), "first");
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let result = PatternTable::try_new(vec![PatternRule::new("broken", 1, "(", |_, _| {
            BrowserError::crashed().into()
        })]);
        assert_matches!(result, Err(MapperError::InvalidPattern { .. }));
    }

    #[test]
    fn test_captures_feed_factory_parameters() {
        let table = table();

        let hit = table
            .first_match("strict mode violation: locator('.btn') resolved to 3 elements")
            .unwrap();
        assert_eq!(
            hit.symptom,
            RuntimeSymptom::Locator(LocatorError::ambiguous(".btn", 3))
        );

        let hit = table.first_match("Timeout 30000ms exceeded").unwrap();
        assert_eq!(
            hit.symptom,
            RuntimeSymptom::Timeout(TimeoutError::element_wait(None, 30000))
        );

        let hit = table.first_match("Locator resolves to 2 elements").unwrap();
        assert_eq!(hit.pattern.id(), "locator.resolves_count");
        assert_matches!(
            hit.symptom,
            RuntimeSymptom::Locator(LocatorError::Ambiguous { count: 2, .. })
        );

        let hit = table
            .first_match("locator.click: Timeout 5000ms exceeded.\n  - waiting for locator('#save')")
            .unwrap();
        assert_eq!(
            hit.symptom,
            RuntimeSymptom::Timeout(TimeoutError::action("click", Some("#save"), 5000))
        );
    }

    #[test]
    fn test_assertion_values_are_extracted() {
        let table = table();

        let text = SAMPLES
            .iter()
            .find(|(id, _)| *id == "assertion.count")
            .map(|(_, text)| *text)
            .unwrap();
        assert_matches!(
            table.first_match(text).unwrap().symptom,
            RuntimeSymptom::Assertion(AssertionError::CountMismatch {
                expected: 3,
                actual: 2,
                ..
            })
        );

        let hit = table
            .first_match("expect(locator).not.toBeVisible() failed\n\nLocator: locator('.spinner')")
            .unwrap();
        assert_eq!(
            hit.symptom,
            RuntimeSymptom::Assertion(AssertionError::visibility_failed(
                ".spinner", "hidden", "visible"
            ))
        );
    }

    #[test]
    fn test_http_status_policy_flows_through() {
        let table = table();
        assert_matches!(
            table.first_match("HTTP 404 Not Found at https://x.test/a").unwrap().symptom,
            RuntimeSymptom::Navigation(NavigationError::NotFound { .. })
        );
        assert_matches!(
            table.first_match("status: 403 Forbidden").unwrap().symptom,
            RuntimeSymptom::Navigation(NavigationError::HttpError { status: 403, .. })
        );
    }

    #[test]
    fn test_single_resolved_element_is_not_ambiguous() {
        let table = table();
        assert!(table.first_match("Locator resolves to 1 element").is_none());

        let hit = table
            .first_match(
                "locator.click: Timeout 30000ms exceeded.\nCall log:\n  - waiting for locator('#save')\n  - locator resolved to 1 element\n  - element is visible, enabled and stable",
            )
            .unwrap();
        assert_eq!(hit.pattern.id(), "timeout.action");
        assert_eq!(
            hit.symptom,
            RuntimeSymptom::Timeout(TimeoutError::action("click", Some("#save"), 30000))
        );

        assert_matches!(
            table.first_match("Locator resolves to 12 elements").unwrap().symptom,
            RuntimeSymptom::Locator(LocatorError::Ambiguous { count: 12, .. })
        );
    }

    #[test]
    fn test_oversized_counts_saturate() {
        let table = table();
        assert_matches!(
            table
                .first_match("strict mode violation: locator('.a') resolved to 99999999999999999999999 elements")
                .unwrap()
                .symptom,
            RuntimeSymptom::Locator(LocatorError::Ambiguous { count: usize::MAX, .. })
        );
        assert_matches!(
            table
                .first_match("Locator resolves to 99999999999999999999999 elements")
                .unwrap()
                .symptom,
            RuntimeSymptom::Locator(LocatorError::Ambiguous { count: usize::MAX, .. })
        );
        assert_matches!(
            table.first_match("Timeout 99999999999999999999999ms exceeded").unwrap().symptom,
            RuntimeSymptom::Timeout(TimeoutError::ElementWait { ms: u64::MAX, .. })
        );
    }

    #[test]
    fn test_saturating_digits() {
        assert_eq!(saturating_digits("42"), Some(42));
        assert_eq!(saturating_digits("99999999999999999999999"), Some(u64::MAX));
        assert_eq!(saturating_digits(""), None);
        assert_eq!(saturating_digits("4x"), None);
    }

    #[test]
    fn test_unmatched_text() {
        let table = table();
        assert!(table.first_match("banana").is_none());
        assert!(!table.is_match("banana"));
        assert!(table.is_match("net::ERR_CONNECTION_REFUSED"));
    }
}
