//! Sonner toast notifications.

use std::time::Duration;

use chromiumoxide::element::Element;
use tracing::debug;

use crate::error::Result;
use crate::session::Session;
use crate::wait::{self, MatchCase};

pub const TOAST_SELECTOR: &str = "[data-sonner-toast]";
const VISIBLE_TOAST_SELECTOR: &str = "[data-sonner-toast][data-visible='true']";

/// Wait for any toast, or for one whose text contains `contains`
/// (case-insensitive, matching how the app mixes casing in its messages).
pub async fn wait_for_toast(session: &Session, contains: Option<&str>) -> Result<Element> {
    match contains {
        Some(needle) => {
            session
                .wait_for_text(TOAST_SELECTOR, needle, MatchCase::Insensitive)
                .await
        }
        None => session.wait_for(TOAST_SELECTOR).await,
    }
}

/// Wait briefly for visible toasts to clear.
///
/// A toast that outstays the grace period is not a failure; the scripted
/// click fallback still gets through it, so this degrades to a debug note.
pub async fn wait_for_toasts_to_clear(session: &Session) -> Result<()> {
    match wait::wait_for_gone(session.page(), VISIBLE_TOAST_SELECTOR, Duration::from_secs(5)).await
    {
        Ok(()) => Ok(()),
        Err(e) if e.is_timeout() => {
            debug!("toast still visible after grace period");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
