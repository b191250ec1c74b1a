//! Radix combobox (select) interaction.

use crate::error::Result;
use crate::interact::{self, attribute};
use crate::poll::poll_until;
use crate::session::Session;
use crate::wait::MatchCase;

/// Open the combobox behind `trigger_selector`, pick the option whose text
/// contains `option_text`, and wait for the trigger to reflect the choice.
pub async fn select_combobox_option(
    session: &Session,
    trigger_selector: &str,
    option_text: &str,
) -> Result<()> {
    let trigger = session.wait_for_clickable(trigger_selector).await?;
    interact::click(session.page(), &trigger).await?;

    // The option list portals in only once the trigger reports expanded.
    poll_until(
        &format!("combobox '{trigger_selector}' expanded"),
        session.timeout(),
        || async move {
            let trigger = session.page().find_element(trigger_selector).await.ok()?;
            let expanded = attribute(&trigger, "aria-expanded").await.ok()??;
            (expanded == "true").then_some(())
        },
    )
    .await?;

    let option = session
        .wait_for_text("[role='option']", option_text, MatchCase::Sensitive)
        .await?;
    interact::click(session.page(), &option).await?;

    session
        .wait_for_text(trigger_selector, option_text, MatchCase::Sensitive)
        .await?;
    Ok(())
}
