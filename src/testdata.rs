//! Unique names for data created against the shared deployment.
//!
//! Scenarios run repeatedly against one live environment, so anything they
//! create carries a run stamp plus a random suffix to dodge collisions.

use chrono::Utc;
use rand::Rng;

/// Second-resolution stamp identifying this run.
pub fn run_stamp() -> i64 {
    Utc::now().timestamp()
}

/// `prefix-<run stamp>-<4 random digits>`.
pub fn unique_name(prefix: &str) -> String {
    let mut rng = rand::rng();
    format!(
        "{prefix}-{}-{}",
        Utc::now().timestamp(),
        rng.random_range(1000..10000)
    )
}
