//! Typed waits layered on the polling primitive.
//!
//! Each helper re-queries the DOM on every poll, so a handle returned here
//! was located on the same observation that confirmed the condition; there
//! is no second round-trip to fetch what was just checked.

use std::time::Duration;

use chromiumoxide::element::Element;
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;

use crate::error::{Error, Result};
use crate::poll::poll_until;

/// Case rule for text-containment waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCase {
    Sensitive,
    Insensitive,
}

impl MatchCase {
    fn matches(self, haystack: &str, needle: &str) -> bool {
        match self {
            MatchCase::Sensitive => haystack.contains(needle),
            MatchCase::Insensitive => haystack.to_lowercase().contains(&needle.to_lowercase()),
        }
    }
}

/// Wait until an element matching `selector` is present in the DOM.
pub async fn wait_for_element(page: &Page, selector: &str, timeout: Duration) -> Result<Element> {
    poll_until(&format!("element '{selector}'"), timeout, || async move {
        page.find_element(selector).await.ok()
    })
    .await
}

/// Wait until an element matching `selector` is present, visible and enabled.
pub async fn wait_for_clickable(page: &Page, selector: &str, timeout: Duration) -> Result<Element> {
    poll_until(
        &format!("clickable element '{selector}'"),
        timeout,
        || async move {
            let element = page.find_element(selector).await.ok()?;
            if is_visible(&element).await && is_enabled(&element).await {
                Some(element)
            } else {
                None
            }
        },
    )
    .await
}

/// Wait until no element matching `selector` is rendered.
///
/// An element that vanished from the document entirely counts as success,
/// same as one that is merely hidden. A stale handle therefore never turns
/// an invisibility wait into an error, but a transport failure still does.
pub async fn wait_for_gone(page: &Page, selector: &str, timeout: Duration) -> Result<()> {
    poll_until(
        &format!("element '{selector}' to disappear"),
        timeout,
        || async move {
            match page.find_elements(selector).await {
                Ok(elements) => {
                    for element in &elements {
                        if is_visible(element).await {
                            return None;
                        }
                    }
                    Some(Ok(()))
                }
                Err(e) if element_gone(&e) => Some(Ok(())),
                Err(e) => Some(Err(Error::Cdp(e))),
            }
        },
    )
    .await?
}

/// Whether `err` means the queried node left the document, as opposed to a
/// transport or protocol failure that says nothing about the DOM.
fn element_gone(err: &CdpError) -> bool {
    match err {
        CdpError::NotFound => true,
        // A detached node surfaces as a protocol error naming the node id.
        CdpError::Chrome(_) => {
            let msg = err.to_string().to_lowercase();
            msg.contains("could not find node") || msg.contains("node with given id")
        }
        _ => false,
    }
}

/// Wait until some element matching `selector` renders text containing
/// `needle`, and return that element.
pub async fn wait_for_text(
    page: &Page,
    selector: &str,
    needle: &str,
    case: MatchCase,
    timeout: Duration,
) -> Result<Element> {
    poll_until(
        &format!("'{selector}' with text containing '{needle}'"),
        timeout,
        || async move { find_with_text(page, selector, needle, case).await },
    )
    .await
}

/// Wait until at least `min` elements match `selector`.
pub async fn wait_for_count(
    page: &Page,
    selector: &str,
    min: usize,
    timeout: Duration,
) -> Result<Vec<Element>> {
    poll_until(
        &format!("at least {min} of '{selector}'"),
        timeout,
        || async move {
            let elements = page.find_elements(selector).await.ok()?;
            if elements.len() >= min {
                Some(elements)
            } else {
                None
            }
        },
    )
    .await
}

/// Wait until a caller-supplied predicate over the element list holds, and
/// return the matching list. Used by scenarios that assert on the whole
/// result set (e.g. "every visible card belongs to one clinic").
pub async fn wait_for_all<F>(
    page: &Page,
    selector: &str,
    what: &str,
    timeout: Duration,
    accept: F,
) -> Result<Vec<Element>>
where
    F: Fn(&[Element]) -> bool,
{
    let accept = &accept;
    poll_until(what, timeout, || async move {
        let elements = page.find_elements(selector).await.unwrap_or_default();
        if accept(&elements) {
            Some(elements)
        } else {
            None
        }
    })
    .await
}

/// Wait until the document title equals `expected`.
pub async fn wait_for_title(page: &Page, expected: &str, timeout: Duration) -> Result<()> {
    poll_until(
        &format!("document title '{expected}'"),
        timeout,
        || async move {
            let title: Option<String> = page
                .evaluate("document.title")
                .await
                .ok()
                .and_then(|v| v.into_value().ok());
            if title.as_deref() == Some(expected) {
                Some(())
            } else {
                None
            }
        },
    )
    .await
}

/// Wait until the current URL contains `fragment`; returns the URL.
pub async fn wait_for_url_contains(
    page: &Page,
    fragment: &str,
    timeout: Duration,
) -> Result<String> {
    poll_until(
        &format!("URL containing '{fragment}'"),
        timeout,
        || async move {
            let url = page.url().await.ok().flatten()?;
            if url.contains(fragment) {
                Some(url)
            } else {
                None
            }
        },
    )
    .await
}

/// Whether the element currently occupies layout space and is not hidden.
pub async fn is_visible(element: &Element) -> bool {
    js_bool(
        element,
        "function() { \
            const r = this.getBoundingClientRect(); \
            const s = window.getComputedStyle(this); \
            return r.width > 0 && r.height > 0 \
                && s.visibility !== 'hidden' && s.display !== 'none'; \
        }",
    )
    .await
    .unwrap_or(false)
}

/// Whether the element is interactable (not `disabled`).
pub async fn is_enabled(element: &Element) -> bool {
    js_bool(element, "function() { return !this.disabled; }")
        .await
        .unwrap_or(false)
}

async fn js_bool(element: &Element, js: &str) -> Option<bool> {
    element
        .call_js_fn(js, false)
        .await
        .ok()
        .and_then(|ret| ret.result.value)
        .and_then(|value| value.as_bool())
}

async fn find_with_text(
    page: &Page,
    selector: &str,
    needle: &str,
    case: MatchCase,
) -> Option<Element> {
    let elements = page.find_elements(selector).await.ok()?;
    for element in elements {
        if let Some(text) = element.inner_text().await.ok().flatten() {
            if case.matches(&text, needle) {
                return Some(element);
            }
        }
    }
    None
}
