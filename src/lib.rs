//! End-to-end browser tests for the MediFollow healthcare platform.
//!
//! Drives the deployed app over CDP via chromiumoxide. The library half is
//! the shared plumbing (condition polling, typed waits, session bootstrap,
//! widget helpers); the scenarios themselves live in `tests/`.

pub mod browser_setup;
mod error;
pub mod interact;
pub mod poll;
pub mod session;
pub mod testdata;
pub mod ui;
pub mod wait;

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use error::{Error, Result};
pub use session::{Role, Session};

/// Rendered `<title>` of every MediFollow page; login waits on it.
pub const APP_TITLE: &str = "MediFollow - Healthcare Management Platform";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Deployment under test.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub credentials: Credentials,

    #[serde(default)]
    pub browser: BrowserOptions,

    #[serde(default)]
    pub wait: WaitOptions,
}

/// One login per role; the test deployment shares a single password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default = "default_patient")]
    pub patient: Credential,

    #[serde(default = "default_doctor")]
    pub doctor: Credential,

    #[serde(default = "default_admin")]
    pub admin: Credential,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

/// Browser launch options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserOptions {
    #[serde(default = "default_headless")]
    pub headless: bool,

    #[serde(default)]
    pub window: WindowOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowOptions {
    #[serde(default = "default_window_width")]
    pub width: u32,

    #[serde(default = "default_window_height")]
    pub height: u32,
}

/// Wait tuning shared by every scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitOptions {
    /// Budget for a single typed wait, seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Gap between predicate evaluations, milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_base_url() -> String {
    "https://medi-follow.vercel.app".to_string()
}

fn default_password() -> String {
    "123456789".to_string()
}

fn default_patient() -> Credential {
    Credential {
        email: "stefanshabbir@gmail.com".to_string(),
        password: default_password(),
    }
}

fn default_doctor() -> Credential {
    Credential {
        email: "hinoseb173@alexida.com".to_string(),
        password: default_password(),
    }
}

fn default_admin() -> Credential {
    Credential {
        email: "admin.medifollow@alexida.com".to_string(),
        password: default_password(),
    }
}

fn default_headless() -> bool {
    true
}

fn default_window_width() -> u32 {
    1920
}

fn default_window_height() -> u32 {
    1080
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_poll_interval_ms() -> u64 {
    250
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            credentials: Credentials::default(),
            browser: BrowserOptions::default(),
            wait: WaitOptions::default(),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            patient: default_patient(),
            doctor: default_doctor(),
            admin: default_admin(),
        }
    }
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: default_headless(),
            window: WindowOptions::default(),
        }
    }
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Config {
    /// Load `config.yaml` from the crate root, falling back to defaults,
    /// then apply environment overrides (`MEDIFOLLOW_BASE_URL`,
    /// `MEDIFOLLOW_PASSWORD`, `MEDIFOLLOW_HEADLESS`) for CI.
    pub fn load() -> Result<Config> {
        let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config.yaml");

        let mut config = if config_path.exists() {
            let contents = fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&contents).map_err(|e| Error::Config(e.to_string()))?
        } else {
            Config::default()
        };

        if let Ok(base_url) = std::env::var("MEDIFOLLOW_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(password) = std::env::var("MEDIFOLLOW_PASSWORD") {
            config.credentials.patient.password = password.clone();
            config.credentials.doctor.password = password.clone();
            config.credentials.admin.password = password;
        }
        if let Ok(headless) = std::env::var("MEDIFOLLOW_HEADLESS") {
            config.browser.headless = headless != "0" && headless != "false";
        }

        Ok(config)
    }

    /// Credential pair for a role.
    pub fn credential(&self, role: Role) -> &Credential {
        match role {
            Role::Patient => &self.credentials.patient,
            Role::Doctor => &self.credentials.doctor,
            Role::Admin => &self.credentials.admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_the_shared_deployment() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://medi-follow.vercel.app");
        assert_eq!(config.wait.timeout_secs, 15);
        assert_eq!(config.wait.poll_interval_ms, 250);
        assert!(config.browser.headless);
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let config: Config = serde_yaml::from_str(
            "base_url: http://localhost:3000\nbrowser:\n  headless: false\n",
        )
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert!(!config.browser.headless);
        assert_eq!(config.browser.window.width, 1920);
        assert_eq!(config.credentials.patient.password, "123456789");
    }
}
