//! Helpers for the MediFollow UI toolkit.
//!
//! The app is built on Radix primitives (dialogs, comboboxes, day picker)
//! plus sonner toasts and Tailwind-styled cards; these modules wrap the
//! selector patterns those widgets render.

pub mod calendar;
pub mod cards;
pub mod combobox;
pub mod dialogs;
pub mod timeline;
pub mod toasts;

pub use calendar::{close_calendar_if_open, open_date_picker, select_calendar_day};
pub use cards::{find_card_by_title, select_item_by_text};
pub use combobox::select_combobox_option;
pub use dialogs::{
    fill_any_input, fill_any_textarea, fill_field_by_label, open_add_dialog, submit_dialog,
    wait_for_dialog, wait_for_dialog_closed, DIALOG_SELECTOR,
};
pub use timeline::{parse_card_timestamp, timeline_cards, TimelineCard, TIMELINE_CARD_SELECTOR};
pub use toasts::{wait_for_toast, wait_for_toasts_to_clear, TOAST_SELECTOR};
