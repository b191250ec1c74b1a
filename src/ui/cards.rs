//! Tailwind card sections ("Diagnoses", "Templates", "Workflow Steps", ...).

use chromiumoxide::element::Element;

use crate::error::Result;
use crate::interact::{self, text_of};
use crate::poll::poll_until;
use crate::session::Session;

/// Card container plus its heading, as the app renders them.
const CARD_SELECTOR: &str = "div.rounded-lg";
const CARD_TITLE_SELECTOR: &str = ".tracking-tight";

/// Locate the card whose heading equals `title`.
pub async fn find_card_by_title(session: &Session, title: &str) -> Result<Element> {
    poll_until(
        &format!("card titled '{title}'"),
        session.timeout(),
        || async move {
            let cards = session.find_all(CARD_SELECTOR).await;
            for card in cards {
                let heading = match card.find_element(CARD_TITLE_SELECTOR).await {
                    Ok(el) => el,
                    Err(_) => continue,
                };
                if let Ok(text) = text_of(&heading).await {
                    if text.trim() == title {
                        return Some(card);
                    }
                }
            }
            None
        },
    )
    .await
}

/// Click the first non-button descendant of `container` whose text
/// contains `text`. List rows in the admin cards are plain spans, so spans
/// are checked first, then generic blocks.
pub async fn select_item_by_text(
    session: &Session,
    container: &Element,
    text: &str,
) -> Result<Element> {
    let item = poll_until(
        &format!("list item containing '{text}'"),
        session.timeout(),
        || async move {
            for selector in ["span", "div", "p", "li"] {
                let candidates = container.find_elements(selector).await.unwrap_or_default();
                for candidate in candidates {
                    if let Ok(candidate_text) = text_of(&candidate).await {
                        if candidate_text.contains(text) {
                            return Some(candidate);
                        }
                    }
                }
            }
            None
        },
    )
    .await?;

    interact::click(session.page(), &item).await?;
    Ok(item)
}
