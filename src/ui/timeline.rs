//! Activity timeline cards.

use chromiumoxide::element::Element;
use chrono::NaiveDateTime;

use crate::error::{Error, Result};
use crate::interact::text_of;
use crate::session::Session;

/// A timeline entry card: a bordered, rounded container with a
/// tight-tracking heading.
pub const TIMELINE_CARD_SELECTOR: &str = "div.rounded-lg.border:has(div.tracking-tight)";

/// The fields a scenario asserts on, extracted in one pass per card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineCard {
    pub title: String,
    pub timestamp_text: String,
    pub status_text: String,
    pub has_attachment: bool,
}

impl TimelineCard {
    pub async fn extract(card: &Element) -> Result<TimelineCard> {
        let title = match card.find_element("div.tracking-tight").await {
            Ok(el) => text_of(&el).await?.trim().to_string(),
            Err(_) => String::new(),
        };
        let timestamp_text = match card.find_element("span.text-xs.text-muted-foreground").await {
            Ok(el) => text_of(&el).await?.trim().to_string(),
            Err(_) => String::new(),
        };
        let status_text = match card
            .find_elements("div.inline-flex.text-xs")
            .await
            .unwrap_or_default()
            .first()
        {
            Some(el) => text_of(el).await?.trim().to_string(),
            None => String::new(),
        };

        let mut has_attachment = false;
        for link in card.find_elements("a").await.unwrap_or_default() {
            if text_of(&link).await?.contains("View Attachment") {
                has_attachment = true;
                break;
            }
        }

        Ok(TimelineCard {
            title,
            timestamp_text,
            status_text,
            has_attachment,
        })
    }
}

/// All timeline cards currently rendered.
pub async fn timeline_cards(session: &Session) -> Vec<Element> {
    session.find_all(TIMELINE_CARD_SELECTOR).await
}

/// Parse a card timestamp like `Jan 05, 03:24 PM`.
///
/// Cards carry no year; pinning one keeps values comparable for the
/// newest-first ordering check, exactly as precise as the rendered text.
pub fn parse_card_timestamp(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&format!("{text} 1900"), "%b %d, %I:%M %p %Y")
        .map_err(|e| Error::Interaction(format!("unparseable card timestamp '{text}': {e}")))
}
