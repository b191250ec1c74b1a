//! react-day-picker range calendar used by the timeline date filter.

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{Error, Result};
use crate::interact::{self, text_of};
use crate::poll::poll_until;
use crate::session::Session;
use crate::wait;

const CALENDAR_SELECTOR: &str = "div[data-slot='calendar']";

/// Open the date-range picker. The trigger reads "Pick a date range" until
/// a range is chosen, after which it renders the dates themselves.
pub async fn open_date_picker(session: &Session) -> Result<()> {
    let trigger = poll_until("date range trigger", session.timeout(), || async move {
        let buttons = session.find_all("button").await;
        for button in buttons {
            let text = text_of(&button).await.unwrap_or_default();
            if (text.contains("Pick a date range") || text.contains("20"))
                && wait::is_visible(&button).await
            {
                return Some(button);
            }
        }
        None
    })
    .await?;

    interact::click(session.page(), &trigger).await?;
    session.wait_for(CALENDAR_SELECTOR).await?;
    Ok(())
}

/// Click a day cell, paging month-by-month towards it when the calendar
/// opened on a different month.
pub async fn select_calendar_day(session: &Session, date: NaiveDate) -> Result<()> {
    // react-day-picker keys cells as M/D/YYYY without zero padding.
    let target = format!("{}/{}/{}", date.month(), date.day(), date.year());
    let day_selector = format!("button[data-day='{target}']");

    if click_first_usable(session, &day_selector).await? {
        return Ok(());
    }

    let today = Local::now().date_naive();
    let months_diff =
        (date.year() - today.year()) * 12 + (date.month() as i32 - today.month() as i32);
    let nav_selector = if months_diff >= 0 {
        "button.rdp-button_next"
    } else {
        "button.rdp-button_previous"
    };
    // A couple of slack steps; the calendar may open mid-range.
    let steps = months_diff.unsigned_abs() as usize + 3;

    for _ in 0..steps {
        let nav = session.wait_for_clickable(nav_selector).await?;
        interact::click(session.page(), &nav).await?;
        session.wait_for("button[data-day]").await?;
        if click_first_usable(session, &day_selector).await? {
            return Ok(());
        }
    }

    Err(Error::Interaction(format!(
        "could not reach calendar day {target}"
    )))
}

/// Escape closes the popover; wait until the calendar detaches.
pub async fn close_calendar_if_open(session: &Session) -> Result<()> {
    let body = session.wait_for("body").await?;
    body.press_key("Escape").await?;
    session.wait_for_gone(CALENDAR_SELECTOR).await
}

async fn click_first_usable(session: &Session, selector: &str) -> Result<bool> {
    for candidate in session.find_all(selector).await {
        if wait::is_visible(&candidate).await && wait::is_enabled(&candidate).await {
            interact::click(session.page(), &candidate).await?;
            return Ok(true);
        }
    }
    Ok(false)
}
