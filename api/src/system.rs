use std::env;
use std::time::Instant;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use sysinfo::{CpuRefreshKind, RefreshKind, System};

/// Host facts resolved from the operating environment.
#[derive(Debug, Clone, Serialize)]
pub struct SystemInfo {
    pub hostname: String,
    pub platform: String,
    pub architecture: String,
    pub cpu_count: usize,
    pub runtime_version: String,
}

impl SystemInfo {
    /// Queries the OS for host facts. Never fails: an unresolvable host name
    /// becomes an empty string.
    pub fn collect() -> Self {
        let system =
            System::new_with_specifics(RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing()));

        Self {
            hostname: System::host_name().unwrap_or_default(),
            platform: env::consts::OS.to_string(),
            architecture: env::consts::ARCH.to_string(),
            cpu_count: system.cpus().len().max(1),
            runtime_version: env!("RUSTC_VERSION").to_string(),
        }
    }
}

/// Whole seconds elapsed between `started_at` and `now`, truncating; zero when
/// `now` precedes `started_at`.
pub fn uptime_seconds(started_at: Instant, now: Instant) -> u64 {
    now.duration_since(started_at).as_secs()
}

pub fn format_uptime(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{hours} hours, {minutes} minutes")
}

/// Current UTC time as RFC 3339 with seconds precision, e.g. `2026-08-21T09:15:02Z`.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
