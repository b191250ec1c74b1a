//! Element interaction layer.
//!
//! Clicking a Radix-heavy page fails intermittently when an overlay or a
//! toast still covers the target, so clicks run through an ordered list of
//! strategies: a real pointer click first, one scripted fallback, and after
//! that the failure propagates. Nothing is swallowed beyond that single
//! fallback.

use chromiumoxide::element::Element;
use chromiumoxide::Page;
use tracing::debug;

use crate::error::{Error, Result};

/// One way of delivering a click to an element, tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickStrategy {
    /// Scroll into view, resolve a clickable point, dispatch real mouse input.
    Pointer,
    /// `HTMLElement.click()` from script; ignores overlays that intercept
    /// pointer input.
    Script,
}

impl ClickStrategy {
    async fn apply(self, page: &Page, element: &Element) -> Result<()> {
        match self {
            ClickStrategy::Pointer => {
                element.scroll_into_view().await?;
                let point = element.clickable_point().await?;
                page.click(point).await?;
                Ok(())
            }
            ClickStrategy::Script => {
                element.call_js_fn("function() { this.click(); }", false).await?;
                Ok(())
            }
        }
    }
}

/// Strategies applied by [`click`], in order.
pub const CLICK_STRATEGIES: &[ClickStrategy] = &[ClickStrategy::Pointer, ClickStrategy::Script];

/// Click `element`, falling back through [`CLICK_STRATEGIES`].
pub async fn click(page: &Page, element: &Element) -> Result<()> {
    let mut last_err = None;
    for strategy in CLICK_STRATEGIES {
        match strategy.apply(page, element).await {
            Ok(()) => return Ok(()),
            Err(err) => {
                debug!(?strategy, %err, "click strategy failed");
                last_err = Some(err);
            }
        }
    }
    Err(last_err
        .unwrap_or_else(|| Error::Interaction("no click strategy available".to_string())))
}

/// Focus the element, clear its current value, and type `text`.
///
/// The clear goes through script and fires an `input` event so the app's
/// controlled inputs notice the change; the typing itself is real key
/// input.
pub async fn clear_and_type(element: &Element, text: &str) -> Result<()> {
    element.scroll_into_view().await?;
    element.focus().await?;
    element
        .call_js_fn(
            "function() { \
                this.value = ''; \
                this.dispatchEvent(new Event('input', { bubbles: true })); \
            }",
            false,
        )
        .await?;
    element.type_str(text).await?;
    Ok(())
}

/// Press a named key on the element `times` in a row. Used for keyboard-
/// driven widgets such as the fee range slider.
pub async fn press_key_times(element: &Element, key: &str, times: usize) -> Result<()> {
    for _ in 0..times {
        element.press_key(key).await?;
    }
    Ok(())
}

/// Live `value` property of an input or textarea (not the HTML attribute,
/// which goes stale once the user types).
pub async fn input_value(element: &Element) -> Result<String> {
    let value = element
        .call_js_fn("function() { return this.value; }", false)
        .await?
        .result
        .value
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();
    Ok(value)
}

/// Rendered text of an element, empty string when the node has none.
pub async fn text_of(element: &Element) -> Result<String> {
    Ok(element.inner_text().await?.unwrap_or_default())
}

/// HTML attribute value, `None` when absent.
pub async fn attribute(element: &Element, name: &str) -> Result<Option<String>> {
    Ok(element.attribute(name).await?)
}
