//! Shared fixtures for the live scenarios.
//!
//! Every scenario file is `#[ignore]`d by default because it needs the
//! deployed app plus a local Chromium. Run them with:
//!
//! ```text
//! cargo test -- --ignored --test-threads=1
//! ```

#![allow(dead_code)]

use std::sync::Once;

use medifollow_e2e::{Config, Role, Session};
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// The seeded patient every doctor-side scenario works against.
pub const DOCTOR_PATIENT_PATH: &str = "/doctor/patients/4fa73507-0e87-41e2-a66a-f055b994c260";

/// Clinical notes editor on the doctor's patient detail page.
pub const NOTES_SELECTOR: &str =
    "textarea[placeholder*='Type clinical observations, diagnosis, and treatment plan...']";

/// Result cards on the patient's Find a Doctor page.
pub const DOCTOR_CARDS_SELECTOR: &str = ".grid.gap-4 div.rounded-lg.border.bg-card";

pub fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_test_writer()
            .init();
    });
}

/// Launch a browser and log in as `role`.
pub async fn session_as(role: Role) -> Session {
    init_logging();
    let config = Config::load().expect("config should load");
    Session::launch_as(&config, role)
        .await
        .expect("browser launch and login should succeed")
}

/// Navigate and fail fast if the route 404s instead of rendering the app.
pub async fn goto_checked(session: &Session, path: &str) {
    session.goto(path).await.expect("navigation should succeed");
    let not_found: bool = session
        .eval("document.title.includes('404') || document.body.innerText.includes('This page could not be found')")
        .await
        .unwrap_or(false);
    assert!(!not_found, "route {path} returned a not-found page");
}
