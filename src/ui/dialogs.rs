//! Radix dialog helpers: open, fill by label, submit, wait for close.

use chromiumoxide::element::Element;
use tracing::debug;

use crate::error::Result;
use crate::interact::{self, text_of};
use crate::poll::poll_until;
use crate::session::Session;
use crate::ui::toasts::wait_for_toasts_to_clear;
use crate::wait;

pub const DIALOG_SELECTOR: &str = "div[role='dialog'], div[role='alertdialog']";

/// Radix renders a fixed full-screen overlay while a dialog (or its exit
/// animation) is up; clicks are intercepted until it is gone.
const OVERLAY_SELECTOR: &str = "[data-state='open'].fixed.inset-0";

/// Marker used to hand a JS-located field back to the CDP side.
const FIELD_MARK: &str = "data-e2e-target";

/// Wait until a dialog is open and visible.
pub async fn wait_for_dialog(session: &Session) -> Result<Element> {
    poll_until("open dialog", session.timeout(), || async move {
        let dialog = session.page().find_element(DIALOG_SELECTOR).await.ok()?;
        if wait::is_visible(&dialog).await {
            Some(dialog)
        } else {
            None
        }
    })
    .await
}

/// Wait for the dialog and its overlay to leave the page.
pub async fn wait_for_dialog_closed(session: &Session) -> Result<()> {
    session.wait_for_gone(DIALOG_SELECTOR).await?;
    // The overlay lags the dialog by an animation frame or two; tolerate
    // one that never detaches.
    match wait::wait_for_gone(session.page(), OVERLAY_SELECTOR, std::time::Duration::from_secs(3))
        .await
    {
        Ok(()) => Ok(()),
        Err(e) if e.is_timeout() => {
            debug!("overlay still present after dialog close");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Click the button labelled `button_label` inside `card` and wait for the
/// dialog it opens.
pub async fn open_add_dialog(
    session: &Session,
    card: &Element,
    button_label: &str,
) -> Result<Element> {
    let button = poll_until(
        &format!("'{button_label}' button in card"),
        session.timeout(),
        || async move {
            let buttons = card.find_elements("button").await.ok()?;
            for button in buttons {
                if let Ok(text) = text_of(&button).await {
                    if text.contains(button_label)
                        && wait::is_visible(&button).await
                        && wait::is_enabled(&button).await
                    {
                        return Some(button);
                    }
                }
            }
            None
        },
    )
    .await?;

    // A lingering toast sits right where card buttons live.
    wait_for_toasts_to_clear(session).await?;
    interact::click(session.page(), &button).await?;
    wait_for_dialog(session).await
}

/// Fill the dialog field attached to the label reading `label`.
///
/// The field is resolved in page script (for/id association first, then
/// the first input or textarea after the label in document order), marked
/// with a data attribute, and picked up over CDP for real typing. Returns
/// false when no such label exists, so callers can try a looser fill.
pub async fn fill_field_by_label(session: &Session, label: &str, value: &str) -> Result<bool> {
    let wanted = serde_json::Value::String(label.to_string()).to_string();
    let js = format!(
        "(() => {{\
            const scope = document.querySelector(\"{DIALOG_SELECTOR}\") || document;\
            const wanted = {wanted};\
            const label = Array.from(scope.querySelectorAll('label'))\
                .find(l => l.textContent.trim() === wanted);\
            if (!label) return false;\
            let field = null;\
            if (label.htmlFor) field = document.getElementById(label.htmlFor);\
            if (!field) {{\
                const walker = document.createTreeWalker(scope, NodeFilter.SHOW_ELEMENT);\
                walker.currentNode = label;\
                while (walker.nextNode()) {{\
                    const n = walker.currentNode;\
                    if (n.tagName === 'INPUT' || n.tagName === 'TEXTAREA') {{ field = n; break; }}\
                }}\
            }}\
            if (!field) return false;\
            document.querySelectorAll('[{FIELD_MARK}]')\
                .forEach(n => n.removeAttribute('{FIELD_MARK}'));\
            field.setAttribute('{FIELD_MARK}', '1');\
            return true;\
        }})()"
    );

    let found: bool = session.eval(&js).await?;
    if !found {
        return Ok(false);
    }

    let field = session.wait_for(&format!("[{FIELD_MARK}='1']")).await?;
    interact::clear_and_type(&field, value).await?;
    field
        .call_js_fn(
            &format!("function() {{ this.removeAttribute('{FIELD_MARK}'); }}"),
            false,
        )
        .await?;
    Ok(true)
}

/// Type into the first text input of the open dialog. Fallback for forms
/// whose labels drift between deploys.
pub async fn fill_any_input(session: &Session, value: &str) -> Result<bool> {
    let selector =
        "div[role='dialog'] input[type='text'], div[role='dialog'] input[type='search'], \
         div[role='alertdialog'] input[type='text']";
    let inputs = session.find_all(selector).await;
    match inputs.first() {
        Some(input) => {
            interact::clear_and_type(input, value).await?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Type into the first textarea of the open dialog.
pub async fn fill_any_textarea(session: &Session, value: &str) -> Result<bool> {
    let selector = "div[role='dialog'] textarea, div[role='alertdialog'] textarea";
    let textareas = session.find_all(selector).await;
    match textareas.first() {
        Some(textarea) => {
            interact::clear_and_type(textarea, value).await?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Press the dialog's submit button, whatever the app labelled it.
/// Returns false when no enabled candidate was found.
pub async fn submit_dialog(session: &Session) -> Result<bool> {
    let buttons = session
        .find_all("div[role='dialog'] button, div[role='alertdialog'] button")
        .await;
    for label in ["Create", "Save", "Add", "Submit"] {
        for button in &buttons {
            let text = text_of(button).await.unwrap_or_default();
            if text.contains(label) && wait::is_enabled(button).await {
                interact::click(session.page(), button).await?;
                return Ok(true);
            }
        }
    }
    Ok(false)
}
