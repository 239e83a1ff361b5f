//! The code catalog
//!
//! One static per code, grouped by category. [`REGISTRY`] lists every entry
//! in declaration order; `codes_for_category` and the help surfaces rely on
//! that order.

use super::{Code, ErrorCategory, ErrorCodeDefinition, Flakiness};

/// Compile-time entry: always permanent, never retried
const fn compile(
    code: &'static str,
    category: ErrorCategory,
    title: &'static str,
    description: &'static str,
    how_to_fix: &'static str,
) -> ErrorCodeDefinition {
    ErrorCodeDefinition {
        code: Code::new(code),
        category,
        title,
        description,
        how_to_fix,
        flakiness: Flakiness::Permanent,
        retryable: false,
        default_retries: 0,
    }
}

#[allow(clippy::too_many_arguments)]
const fn runtime(
    code: &'static str,
    category: ErrorCategory,
    title: &'static str,
    description: &'static str,
    how_to_fix: &'static str,
    flakiness: Flakiness,
    retryable: bool,
    default_retries: u8,
) -> ErrorCodeDefinition {
    ErrorCodeDefinition {
        code: Code::new(code),
        category,
        title,
        description,
        how_to_fix,
        flakiness,
        retryable,
        default_retries,
    }
}

// ============================================================================
// COMPILE-TIME CODES
// ============================================================================

/// Lexer errors (VERO-1xx)
pub mod lexer {
    use super::*;

    pub static UNEXPECTED_CHARACTER: ErrorCodeDefinition = compile(
        "VERO-101",
        ErrorCategory::Lexer,
        "Unexpected character",
        "The script contains a character that is not part of the Vero language.",
        "Remove the character or wrap it in quotes if it belongs to a text value.",
    );

    pub static UNTERMINATED_STRING: ErrorCodeDefinition = compile(
        "VERO-102",
        ErrorCategory::Lexer,
        "Unterminated string",
        "A quoted text value was opened but never closed.",
        "Add the missing closing quote on the same line.",
    );

    pub static INVALID_NUMBER: ErrorCodeDefinition = compile(
        "VERO-103",
        ErrorCategory::Lexer,
        "Invalid number",
        "A number in the script could not be read.",
        "Write numbers using digits only, for example 30 or 2.5.",
    );

    pub static INVALID_ESCAPE: ErrorCodeDefinition = compile(
        "VERO-104",
        ErrorCategory::Lexer,
        "Invalid escape sequence",
        "A backslash inside a text value is followed by a character that cannot be escaped.",
        "Use \\\" for a quote and \\\\ for a backslash, or remove the backslash.",
    );
}

/// Parser errors (VERO-2xx)
pub mod parser {
    use super::*;

    pub static UNEXPECTED_TOKEN: ErrorCodeDefinition = compile(
        "VERO-201",
        ErrorCategory::Parser,
        "Unexpected token",
        "The script contains a word or symbol where Vero expected something else.",
        "Check the statement against the Vero syntax and fix the highlighted word.",
    );

    pub static UNCLOSED_BLOCK: ErrorCodeDefinition = compile(
        "VERO-202",
        ErrorCategory::Parser,
        "Unclosed block",
        "A block was opened but never closed.",
        "Add the missing closing brace or END keyword for the block.",
    );

    pub static UNEXPECTED_END: ErrorCodeDefinition = compile(
        "VERO-203",
        ErrorCategory::Parser,
        "Unexpected end of input",
        "The script ended in the middle of a statement.",
        "Finish the last statement or remove the incomplete line.",
    );

    pub static INVALID_STATEMENT: ErrorCodeDefinition = compile(
        "VERO-204",
        ErrorCategory::Parser,
        "Invalid statement",
        "The line is not a statement Vero understands.",
        "Start the line with a known action such as click, fill, open or verify.",
    );
}

/// Validation errors (VERO-3xx)
pub mod validation {
    use super::*;

    pub static UNDEFINED_PAGE: ErrorCodeDefinition = compile(
        "VERO-301",
        ErrorCategory::Validation,
        "Undefined page",
        "The script refers to a page that has not been defined.",
        "Define the page first or fix the spelling of its name.",
    );

    pub static UNDEFINED_FIELD: ErrorCodeDefinition = compile(
        "VERO-302",
        ErrorCategory::Validation,
        "Undefined field",
        "The script refers to a field that the page does not define.",
        "Add the field to the page definition or fix the spelling of its name.",
    );

    pub static UNDEFINED_VARIABLE: ErrorCodeDefinition = compile(
        "VERO-303",
        ErrorCategory::Validation,
        "Undefined variable",
        "The script uses a variable before it is defined.",
        "Define the variable before this statement or fix the spelling of its name.",
    );

    pub static DUPLICATE_DEFINITION: ErrorCodeDefinition = compile(
        "VERO-304",
        ErrorCategory::Validation,
        "Duplicate definition",
        "The same name is defined more than once.",
        "Rename or remove one of the definitions.",
    );

    pub static INVALID_SELECTOR: ErrorCodeDefinition = compile(
        "VERO-305",
        ErrorCategory::Validation,
        "Invalid selector",
        "A field's selector is not a valid locator expression.",
        "Fix the selector syntax, or use a text or role based locator instead.",
    );

    pub static UNUSED_DEFINITION: ErrorCodeDefinition = compile(
        "VERO-306",
        ErrorCategory::Validation,
        "Unused definition",
        "A page, field or variable is defined but never used.",
        "Remove the definition or use it in a scenario.",
    );
}

// ============================================================================
// RUNTIME CODES
// ============================================================================

/// Locator errors (VERO-4xx)
pub mod locator {
    use super::*;

    pub static NOT_FOUND: ErrorCodeDefinition = runtime(
        "VERO-401",
        ErrorCategory::Locator,
        "Element not found",
        "No element on the page matches the selector.",
        "Check that the selector is correct and that the element is on the page at this step. Add a wait if the element appears later.",
        Flakiness::Flaky,
        true,
        3,
    );

    pub static AMBIGUOUS: ErrorCodeDefinition = runtime(
        "VERO-402",
        ErrorCategory::Locator,
        "Selector matches multiple elements",
        "The selector matches more than one element, so Vero cannot tell which one to use.",
        "Make the selector more specific, for example by adding text, a role or a parent container.",
        Flakiness::Permanent,
        false,
        0,
    );

    pub static NOT_VISIBLE: ErrorCodeDefinition = runtime(
        "VERO-403",
        ErrorCategory::Locator,
        "Element not visible",
        "The element exists but is hidden.",
        "Make sure the element is shown before interacting with it, for example by opening its menu or dialog first.",
        Flakiness::Flaky,
        true,
        3,
    );

    pub static DISABLED: ErrorCodeDefinition = runtime(
        "VERO-404",
        ErrorCategory::Locator,
        "Element is disabled",
        "The element exists but is disabled and cannot be used.",
        "Complete whatever enables the element first, such as filling required fields.",
        Flakiness::Permanent,
        false,
        0,
    );

    pub static DETACHED: ErrorCodeDefinition = runtime(
        "VERO-405",
        ErrorCategory::Locator,
        "Element detached",
        "The element was removed from the page while Vero was using it.",
        "Wait for the page to settle before interacting, or re-locate the element after the page updates.",
        Flakiness::Flaky,
        true,
        2,
    );

    pub static COVERED: ErrorCodeDefinition = runtime(
        "VERO-406",
        ErrorCategory::Locator,
        "Element covered",
        "Another element is on top of the target and would receive the click.",
        "Close the overlay, banner or dialog covering the element before clicking.",
        Flakiness::Flaky,
        true,
        2,
    );

    pub static OUTSIDE_VIEWPORT: ErrorCodeDefinition = runtime(
        "VERO-407",
        ErrorCategory::Locator,
        "Element outside viewport",
        "The element is outside the visible area of the page and could not be scrolled into view.",
        "Scroll to the element first or check that the page layout fits the browser window.",
        Flakiness::Flaky,
        true,
        2,
    );

    pub static NOT_EDITABLE: ErrorCodeDefinition = runtime(
        "VERO-408",
        ErrorCategory::Locator,
        "Element not editable",
        "The element cannot be typed into.",
        "Point the selector at an input, textarea or editable element.",
        Flakiness::Permanent,
        false,
        0,
    );
}

/// Timeout errors (VERO-5xx)
pub mod timeout {
    use super::*;

    pub static PAGE_LOAD: ErrorCodeDefinition = runtime(
        "VERO-501",
        ErrorCategory::Timeout,
        "Page load timeout",
        "The page did not finish loading in time.",
        "Check that the site is reachable and responsive, or increase the page load timeout.",
        Flakiness::Flaky,
        true,
        2,
    );

    pub static ELEMENT_WAIT: ErrorCodeDefinition = runtime(
        "VERO-502",
        ErrorCategory::Timeout,
        "Element wait timeout",
        "Vero waited for an element but it never became ready.",
        "Check the selector and whether the element appears at this step, or increase the wait time.",
        Flakiness::Flaky,
        true,
        3,
    );

    pub static NAVIGATION: ErrorCodeDefinition = runtime(
        "VERO-503",
        ErrorCategory::Timeout,
        "Navigation timeout",
        "The page did not navigate to the next address in time.",
        "Check that the previous action actually triggers navigation, or increase the navigation timeout.",
        Flakiness::Flaky,
        true,
        2,
    );

    pub static NETWORK_IDLE: ErrorCodeDefinition = runtime(
        "VERO-504",
        ErrorCategory::Timeout,
        "Network idle timeout",
        "The page kept making network requests and never became idle.",
        "Wait for a specific element instead of network idle, since polling pages never go idle.",
        Flakiness::Flaky,
        true,
        2,
    );

    pub static ACTION: ErrorCodeDefinition = runtime(
        "VERO-505",
        ErrorCategory::Timeout,
        "Action timeout",
        "An action on an element did not complete in time.",
        "Check that the element is visible, enabled and not covered, or increase the action timeout.",
        Flakiness::Flaky,
        true,
        2,
    );

    pub static TEST: ErrorCodeDefinition = runtime(
        "VERO-506",
        ErrorCategory::Timeout,
        "Test timeout",
        "The whole scenario took longer than its time limit.",
        "Split the scenario into smaller ones or increase the test timeout.",
        Flakiness::Flaky,
        true,
        1,
    );
}

/// Navigation errors (VERO-6xx)
pub mod navigation {
    use super::*;

    pub static INVALID_URL: ErrorCodeDefinition = runtime(
        "VERO-601",
        ErrorCategory::Navigation,
        "Invalid URL",
        "The address to open is not a valid URL.",
        "Use a full address including the scheme, for example https://example.com.",
        Flakiness::Permanent,
        false,
        0,
    );

    pub static DNS_NOT_RESOLVED: ErrorCodeDefinition = runtime(
        "VERO-602",
        ErrorCategory::Navigation,
        "Host not found",
        "The domain name of the address could not be resolved.",
        "Check the spelling of the domain and that it is reachable from the test machine.",
        Flakiness::Flaky,
        true,
        2,
    );

    pub static CONNECTION_REFUSED: ErrorCodeDefinition = runtime(
        "VERO-603",
        ErrorCategory::Navigation,
        "Connection refused",
        "The server refused the connection.",
        "Make sure the application under test is running and listening on the expected port.",
        Flakiness::Flaky,
        true,
        3,
    );

    pub static SSL_ERROR: ErrorCodeDefinition = runtime(
        "VERO-604",
        ErrorCategory::Navigation,
        "SSL certificate error",
        "The site's security certificate was rejected.",
        "Fix the certificate, or allow insecure certificates for this test environment.",
        Flakiness::Permanent,
        false,
        0,
    );

    pub static HTTP_ERROR: ErrorCodeDefinition = runtime(
        "VERO-605",
        ErrorCategory::Navigation,
        "HTTP error",
        "The server answered with an error status.",
        "Check the server logs for the failing request.",
        Flakiness::Flaky,
        true,
        2,
    );

    pub static NOT_FOUND: ErrorCodeDefinition = runtime(
        "VERO-606",
        ErrorCategory::Navigation,
        "Page not found",
        "The server answered that the page does not exist (404).",
        "Check the address for typos and that the page exists in this environment.",
        Flakiness::Permanent,
        false,
        0,
    );

    pub static OFFLINE: ErrorCodeDefinition = runtime(
        "VERO-607",
        ErrorCategory::Navigation,
        "No internet connection",
        "The browser has no network connection.",
        "Check the test machine's network connection.",
        Flakiness::Flaky,
        true,
        3,
    );

    pub static ABORTED: ErrorCodeDefinition = runtime(
        "VERO-608",
        ErrorCategory::Navigation,
        "Navigation aborted",
        "The navigation was interrupted before it finished, usually by another navigation.",
        "Wait for the current page to finish loading before navigating again.",
        Flakiness::Flaky,
        true,
        2,
    );
}

/// Assertion errors (VERO-7xx)
pub mod assertion {
    use super::*;

    pub static VISIBILITY: ErrorCodeDefinition = runtime(
        "VERO-701",
        ErrorCategory::Assertion,
        "Visibility check failed",
        "The element was not in the expected visibility state.",
        "Check whether the element should be shown at this step, or wait for the page to update first.",
        Flakiness::Flaky,
        true,
        2,
    );

    pub static TEXT_MISMATCH: ErrorCodeDefinition = runtime(
        "VERO-702",
        ErrorCategory::Assertion,
        "Text mismatch",
        "The element's text is not what the script expects.",
        "Update the expected text, or check whether the application shows the wrong text.",
        Flakiness::Unknown,
        true,
        1,
    );

    pub static VALUE_MISMATCH: ErrorCodeDefinition = runtime(
        "VERO-703",
        ErrorCategory::Assertion,
        "Value mismatch",
        "The input's value is not what the script expects.",
        "Check the value that was filled in earlier, or update the expected value.",
        Flakiness::Unknown,
        true,
        1,
    );

    pub static COUNT_MISMATCH: ErrorCodeDefinition = runtime(
        "VERO-704",
        ErrorCategory::Assertion,
        "Count mismatch",
        "The number of matching elements is not what the script expects.",
        "Wait for the list to finish loading, or update the expected count.",
        Flakiness::Flaky,
        true,
        2,
    );

    pub static URL_MISMATCH: ErrorCodeDefinition = runtime(
        "VERO-705",
        ErrorCategory::Assertion,
        "URL mismatch",
        "The page address is not what the script expects.",
        "Check that the previous step navigates to the right page, or update the expected URL.",
        Flakiness::Flaky,
        true,
        2,
    );

    pub static TITLE_MISMATCH: ErrorCodeDefinition = runtime(
        "VERO-706",
        ErrorCategory::Assertion,
        "Title mismatch",
        "The page title is not what the script expects.",
        "Check that the right page is open, or update the expected title.",
        Flakiness::Flaky,
        true,
        1,
    );

    pub static ATTRIBUTE_MISMATCH: ErrorCodeDefinition = runtime(
        "VERO-707",
        ErrorCategory::Assertion,
        "Attribute mismatch",
        "An element attribute does not have the expected value.",
        "Update the expected attribute value, or check the application's markup.",
        Flakiness::Unknown,
        true,
        1,
    );

    pub static MISMATCH: ErrorCodeDefinition = runtime(
        "VERO-708",
        ErrorCategory::Assertion,
        "Assertion failed",
        "A check in the script did not hold.",
        "Compare the expected and received values and update the script or report the bug.",
        Flakiness::Unknown,
        true,
        1,
    );
}

/// Browser errors (VERO-8xx)
pub mod browser {
    use super::*;

    pub static CRASHED: ErrorCodeDefinition = runtime(
        "VERO-801",
        ErrorCategory::Browser,
        "Browser crashed",
        "The browser or page crashed during the test.",
        "Re-run the test. If it keeps crashing, check memory on the test machine.",
        Flakiness::Flaky,
        true,
        2,
    );

    pub static NOT_INSTALLED: ErrorCodeDefinition = runtime(
        "VERO-802",
        ErrorCategory::Browser,
        "Browser not installed",
        "The requested browser is not installed on the test machine.",
        "Install the browsers with `npx playwright install`.",
        Flakiness::Permanent,
        false,
        0,
    );

    pub static CONTEXT_CLOSED: ErrorCodeDefinition = runtime(
        "VERO-803",
        ErrorCategory::Browser,
        "Browser closed",
        "The browser or its context was closed while the test was still running.",
        "Make sure nothing closes the browser before the scenario finishes.",
        Flakiness::Flaky,
        true,
        1,
    );

    pub static PAGE_CLOSED: ErrorCodeDefinition = runtime(
        "VERO-804",
        ErrorCategory::Browser,
        "Page closed",
        "The page was closed while the test was still using it.",
        "Check for steps that close the tab or window too early.",
        Flakiness::Flaky,
        true,
        1,
    );

    pub static FRAME_DETACHED: ErrorCodeDefinition = runtime(
        "VERO-805",
        ErrorCategory::Browser,
        "Frame detached",
        "The frame the test was working in was removed from the page.",
        "Wait for the frame to load again and re-select it.",
        Flakiness::Flaky,
        true,
        2,
    );

    pub static POPUP_NOT_FOUND: ErrorCodeDefinition = runtime(
        "VERO-806",
        ErrorCategory::Browser,
        "Popup not found",
        "The test expected a new window or popup that never opened.",
        "Check that the previous action opens a popup, and that popups are not blocked.",
        Flakiness::Flaky,
        true,
        2,
    );

    pub static LAUNCH_FAILED: ErrorCodeDefinition = runtime(
        "VERO-807",
        ErrorCategory::Browser,
        "Browser failed to start",
        "The browser could not be launched.",
        "Check the browser installation and the launch options of the test machine.",
        Flakiness::Unknown,
        true,
        1,
    );
}

/// Network errors (VERO-9xx)
pub mod network {
    use super::*;

    pub static OFFLINE: ErrorCodeDefinition = runtime(
        "VERO-901",
        ErrorCategory::Network,
        "Network offline",
        "The network connection dropped during the test.",
        "Check the test machine's network connection and re-run.",
        Flakiness::Flaky,
        true,
        3,
    );

    pub static REQUEST_FAILED: ErrorCodeDefinition = runtime(
        "VERO-902",
        ErrorCategory::Network,
        "Request failed",
        "A network request made by the page failed.",
        "Check that the backend services the page calls are running.",
        Flakiness::Flaky,
        true,
        2,
    );

    pub static CORS_BLOCKED: ErrorCodeDefinition = runtime(
        "VERO-903",
        ErrorCategory::Network,
        "Request blocked by CORS",
        "The browser blocked a cross-origin request.",
        "Allow the page's origin in the server's CORS configuration.",
        Flakiness::Permanent,
        false,
        0,
    );

    pub static REQUEST_TIMEOUT: ErrorCodeDefinition = runtime(
        "VERO-904",
        ErrorCategory::Network,
        "Request timed out",
        "A network request made by the page took too long.",
        "Check the responsiveness of the backend services the page calls.",
        Flakiness::Flaky,
        true,
        2,
    );

    pub static WEBSOCKET: ErrorCodeDefinition = runtime(
        "VERO-905",
        ErrorCategory::Network,
        "WebSocket error",
        "A WebSocket connection failed or closed unexpectedly.",
        "Check that the WebSocket server is running and reachable.",
        Flakiness::Flaky,
        true,
        2,
    );
}

// ============================================================================
// DECLARATION-ORDERED TABLE
// ============================================================================

pub static REGISTRY: &[&ErrorCodeDefinition] = &[
    &lexer::UNEXPECTED_CHARACTER,
    &lexer::UNTERMINATED_STRING,
    &lexer::INVALID_NUMBER,
    &lexer::INVALID_ESCAPE,
    &parser::UNEXPECTED_TOKEN,
    &parser::UNCLOSED_BLOCK,
    &parser::UNEXPECTED_END,
    &parser::INVALID_STATEMENT,
    &validation::UNDEFINED_PAGE,
    &validation::UNDEFINED_FIELD,
    &validation::UNDEFINED_VARIABLE,
    &validation::DUPLICATE_DEFINITION,
    &validation::INVALID_SELECTOR,
    &validation::UNUSED_DEFINITION,
    &locator::NOT_FOUND,
    &locator::AMBIGUOUS,
    &locator::NOT_VISIBLE,
    &locator::DISABLED,
    &locator::DETACHED,
    &locator::COVERED,
    &locator::OUTSIDE_VIEWPORT,
    &locator::NOT_EDITABLE,
    &timeout::PAGE_LOAD,
    &timeout::ELEMENT_WAIT,
    &timeout::NAVIGATION,
    &timeout::NETWORK_IDLE,
    &timeout::ACTION,
    &timeout::TEST,
    &navigation::INVALID_URL,
    &navigation::DNS_NOT_RESOLVED,
    &navigation::CONNECTION_REFUSED,
    &navigation::SSL_ERROR,
    &navigation::HTTP_ERROR,
    &navigation::NOT_FOUND,
    &navigation::OFFLINE,
    &navigation::ABORTED,
    &assertion::VISIBILITY,
    &assertion::TEXT_MISMATCH,
    &assertion::VALUE_MISMATCH,
    &assertion::COUNT_MISMATCH,
    &assertion::URL_MISMATCH,
    &assertion::TITLE_MISMATCH,
    &assertion::ATTRIBUTE_MISMATCH,
    &assertion::MISMATCH,
    &browser::CRASHED,
    &browser::NOT_INSTALLED,
    &browser::CONTEXT_CLOSED,
    &browser::PAGE_CLOSED,
    &browser::FRAME_DETACHED,
    &browser::POPUP_NOT_FOUND,
    &browser::LAUNCH_FAILED,
    &network::OFFLINE,
    &network::REQUEST_FAILED,
    &network::CORS_BLOCKED,
    &network::REQUEST_TIMEOUT,
    &network::WEBSOCKET,
];
