//! Per-scenario browser session.
//!
//! One scenario owns exactly one Chrome instance and one page for its whole
//! duration. `Session` bundles the browser, its CDP handler task and the
//! throwaway profile directory so that every exit path, panic included,
//! tears all three down.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::element::Element;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::wait::{self, MatchCase};
use crate::{browser_setup, interact, Config, APP_TITLE};

/// Which set of credentials to log in with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Patient => write!(f, "patient"),
            Role::Doctor => write!(f, "doctor"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

pub struct Session {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
    profile_dir: Option<PathBuf>,
    base_url: Url,
    config: Config,
}

impl Session {
    /// Launch a fresh browser with its own profile directory.
    pub async fn launch(config: &Config) -> Result<Session> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::Config(format!("invalid base_url '{}': {e}", config.base_url)))?;

        let profile_dir = std::env::temp_dir().join(format!(
            "medifollow_e2e_{}_{}",
            std::process::id(),
            rand::random::<u32>()
        ));

        let (browser, handler, profile_dir) =
            browser_setup::launch_browser(&config.browser, profile_dir)
                .await
                .map_err(|e| Error::Launch(e.to_string()))?;

        let page = browser.new_page("about:blank").await?;

        Ok(Session {
            browser,
            handler,
            page,
            profile_dir: Some(profile_dir),
            base_url,
            config: config.clone(),
        })
    }

    /// Launch and log in as `role` in one step; scenario fixtures use this.
    pub async fn launch_as(config: &Config, role: Role) -> Result<Session> {
        let session = Session::launch(config).await?;
        session.login(role).await?;
        Ok(session)
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Per-wait budget from config.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.wait.timeout_secs)
    }

    /// Navigate to a path under the configured base URL and wait for the
    /// load to settle.
    pub async fn goto(&self, path: &str) -> Result<()> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| Error::Config(format!("invalid path '{path}': {e}")))?;
        self.page.goto(url.as_str()).await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    /// Re-navigate to the page currently shown. Full navigation, so the
    /// app re-fetches its data; used to verify persistence after a save.
    pub async fn reload(&self) -> Result<()> {
        let url = self
            .page
            .url()
            .await?
            .ok_or_else(|| Error::Interaction("page has no URL to reload".to_string()))?;
        self.page.goto(url.as_str()).await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    /// Fill the login form and wait for the app shell to render.
    pub async fn login(&self, role: Role) -> Result<()> {
        let credential = self.config.credential(role).clone();
        self.goto("/login").await?;

        let email = self.wait_for("#email").await?;
        interact::clear_and_type(&email, &credential.email).await?;
        let password = self.wait_for("#password").await?;
        interact::clear_and_type(&password, &credential.password).await?;

        let submit = self.wait_for_clickable("button[type='submit']").await?;
        interact::click(&self.page, &submit).await?;

        wait::wait_for_title(&self.page, APP_TITLE, self.timeout()).await?;
        info!(%role, email = %credential.email, "login successful");
        Ok(())
    }

    // Typed waits with the configured budget.

    pub async fn wait_for(&self, selector: &str) -> Result<Element> {
        wait::wait_for_element(&self.page, selector, self.timeout()).await
    }

    pub async fn wait_for_clickable(&self, selector: &str) -> Result<Element> {
        wait::wait_for_clickable(&self.page, selector, self.timeout()).await
    }

    pub async fn wait_for_gone(&self, selector: &str) -> Result<()> {
        wait::wait_for_gone(&self.page, selector, self.timeout()).await
    }

    pub async fn wait_for_text(
        &self,
        selector: &str,
        needle: &str,
        case: MatchCase,
    ) -> Result<Element> {
        wait::wait_for_text(&self.page, selector, needle, case, self.timeout()).await
    }

    pub async fn wait_for_count(&self, selector: &str, min: usize) -> Result<Vec<Element>> {
        wait::wait_for_count(&self.page, selector, min, self.timeout()).await
    }

    /// All current matches without waiting; empty when none.
    pub async fn find_all(&self, selector: &str) -> Vec<Element> {
        self.page.find_elements(selector).await.unwrap_or_default()
    }

    /// Evaluate an expression and deserialize its result.
    pub async fn eval<T: DeserializeOwned>(&self, js: &str) -> Result<T> {
        self.page
            .evaluate(js)
            .await?
            .into_value()
            .map_err(|e| Error::Interaction(format!("evaluate result: {e}")))
    }

    /// Evaluate a statement for its side effect, discarding the result.
    pub async fn run_js(&self, js: &str) -> Result<()> {
        self.page.evaluate(js).await?;
        Ok(())
    }

    /// Make `window.confirm` accept unconditionally. Native dialogs block
    /// the CDP connection, so finalize-style flows stub them out up front.
    pub async fn accept_confirm_dialogs(&self) -> Result<()> {
        self.run_js("window.confirm = () => true").await
    }

    /// Plant a probe that records whether `window.alert` ever fires.
    /// Paired with [`alert_fired`](Self::alert_fired) to assert injected
    /// markup never executes.
    pub async fn arm_alert_probe(&self) -> Result<()> {
        self.run_js("window.__e2eAlertFired = false; window.alert = () => { window.__e2eAlertFired = true; }")
            .await
    }

    /// Like [`arm_alert_probe`](Self::arm_alert_probe), but installed
    /// before any page script runs on subsequent navigations. Needed when
    /// the markup under test would execute during page load.
    pub async fn arm_alert_probe_on_load(&self) -> Result<()> {
        self.page
            .evaluate_on_new_document(AddScriptToEvaluateOnNewDocumentParams::new(
                "window.__e2eAlertFired = false; window.alert = () => { window.__e2eAlertFired = true; }",
            ))
            .await?;
        Ok(())
    }

    pub async fn alert_fired(&self) -> Result<bool> {
        self.eval("window.__e2eAlertFired === true").await
    }

    /// Number of pages (tabs) currently open in this browser.
    pub async fn open_page_count(&self) -> Result<usize> {
        Ok(self.browser.pages().await?.len())
    }

    /// Scroll the window to the document bottom.
    pub async fn scroll_to_bottom(&self) -> Result<()> {
        self.run_js("window.scrollTo(0, document.body.scrollHeight)")
            .await
    }

    /// Close the browser and release every resource. `Drop` covers the
    /// panic path, but the clean path gets an orderly CDP shutdown.
    pub async fn close(mut self) -> Result<()> {
        self.browser.close().await?;
        let _ = self.browser.wait().await;
        self.handler.abort();
        if let Some(dir) = self.profile_dir.take() {
            if let Err(e) = std::fs::remove_dir_all(&dir) {
                warn!("failed to remove profile dir {}: {e}", dir.display());
            }
        }
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.handler.abort();
        // Browser::drop kills the Chrome process afterwards.
        if let Some(dir) = self.profile_dir.take() {
            if let Err(e) = std::fs::remove_dir_all(&dir) {
                warn!("failed to remove profile dir {}: {e}", dir.display());
            }
        }
    }
}
