//! Environment readiness check.
//!
//! Verifies that a Chromium binary can be found and started headless, and
//! that the configuration is usable. Every failure comes with a fix hint.

use crate::cli::output::{self, Styled};
use crate::config::ExtractorConfig;
use crate::renderer::chromium::find_chromium;
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run the doctor diagnostic. Fails when the environment is not ready.
///
/// Spawns Chromium and waits on it; call from a blocking thread.
pub fn run(config: &ExtractorConfig, config_path: Option<&Path>) -> Result<()> {
    let chromium_path = config.chromium_path.clone().or_else(find_chromium);

    if output::is_json() {
        return run_json(config, config_path, chromium_path);
    }

    let s = Styled::new();
    let mut ready = true;
    let mut has_warning = false;

    output::print_header(&s);

    // ── System ──────────────────────────────────────────────────────────
    output::print_section(&s, "System");
    output::print_check(
        s.ok_sym(),
        "OS:",
        &format!("{} ({})", format_os(), std::env::consts::ARCH),
    );
    eprintln!();

    // ── Browser ─────────────────────────────────────────────────────────
    output::print_section(&s, "Browser");
    match &chromium_path {
        Some(path) => {
            let version = get_chromium_version(path);
            let ver_str = version.as_deref().unwrap_or("unknown version");
            output::print_check(
                s.ok_sym(),
                "Chromium:",
                &format!("{ver_str} at {}", path.display()),
            );

            match test_headless_launch(path, config.no_sandbox) {
                Ok(ms) => output::print_check(
                    s.ok_sym(),
                    "Headless test:",
                    &format!("launched and closed in {ms}ms"),
                ),
                Err(e) => {
                    output::print_check(s.fail_sym(), "Headless test:", &format!("FAILED: {e}"));
                    if is_docker() && !config.no_sandbox {
                        output::print_detail("Running in Docker? Try HN_FRONT_CHROMIUM_NO_SANDBOX=1");
                    }
                    ready = false;
                }
            }
        }
        None => {
            output::print_check(s.fail_sym(), "Chromium:", "NOT FOUND");
            output::print_detail("Install Google Chrome or Chromium,");
            output::print_detail("or set HN_FRONT_CHROMIUM_PATH=/path/to/chrome");
            ready = false;
        }
    }
    eprintln!();

    // ── Config ──────────────────────────────────────────────────────────
    output::print_section(&s, "Config");
    match config_path {
        Some(path) => output::print_check(s.ok_sym(), "Config file:", &path.display().to_string()),
        None => output::print_check(s.ok_sym(), "Config file:", "none (defaults)"),
    }
    match config.validate() {
        Ok(()) => output::print_check(s.ok_sym(), "Target:", &config.url),
        Err(e) => {
            output::print_check(s.fail_sym(), "Target:", &e.to_string());
            ready = false;
        }
    }
    output::print_check(
        s.ok_sym(),
        "Limit:",
        &format!("{} (timeout {}s)", config.limit, config.navigation_timeout_secs),
    );
    if let Some(proxy) = config.proxy.server_arg() {
        if config.proxy.username.is_some() {
            output::print_check(s.warn_sym(), "Proxy:", &format!("{proxy} (credentials ignored)"));
            has_warning = true;
        } else {
            output::print_check(s.ok_sym(), "Proxy:", &proxy);
        }
    }

    if ready && !has_warning {
        output::print_status(&s, &s.green("READY"), "run 'hn-front'");
    } else if ready {
        output::print_status(&s, &s.yellow("READY"), "some warnings above");
    } else {
        output::print_status(&s, &s.red("NOT READY"), "fix issues above");
        bail!("environment is not ready");
    }

    Ok(())
}

/// JSON output mode for doctor.
fn run_json(
    config: &ExtractorConfig,
    config_path: Option<&Path>,
    chromium_path: Option<PathBuf>,
) -> Result<()> {
    let chromium_version = chromium_path.as_deref().and_then(get_chromium_version);
    let headless_ms = chromium_path
        .as_deref()
        .and_then(|p| test_headless_launch(p, config.no_sandbox).ok());
    let config_error = config.validate().err().map(|e| e.to_string());
    let ready = headless_ms.is_some() && config_error.is_none();

    output::print_json(&serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "os": std::env::consts::OS,
        "arch": std::env::consts::ARCH,
        "chromium_path": chromium_path.map(|p| p.display().to_string()),
        "chromium_version": chromium_version,
        "headless_launch_ms": headless_ms,
        "config_path": config_path.map(|p| p.display().to_string()),
        "config_error": config_error,
        "url": config.url,
        "limit": config.limit,
        "ready": ready,
    }));

    if !ready {
        bail!("environment is not ready");
    }
    Ok(())
}

/// Format OS name nicely.
fn format_os() -> String {
    match std::env::consts::OS {
        "macos" => {
            if let Ok(out) = Command::new("sw_vers").arg("-productVersion").output() {
                if out.status.success() {
                    let ver = String::from_utf8_lossy(&out.stdout).trim().to_string();
                    return format!("macOS {ver}");
                }
            }
            "macOS".to_string()
        }
        "linux" => std::fs::read_to_string("/etc/os-release")
            .ok()
            .and_then(|contents| {
                contents
                    .lines()
                    .find_map(|l| l.strip_prefix("PRETTY_NAME="))
                    .map(|name| name.trim_matches('"').to_string())
            })
            .unwrap_or_else(|| "Linux".to_string()),
        other => other.to_string(),
    }
}

/// Get Chromium version string.
fn get_chromium_version(path: &Path) -> Option<String> {
    let output = Command::new(path).arg("--version").output().ok()?;
    if output.status.success() {
        let raw = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Some(clean_version(&raw))
    } else {
        None
    }
}

fn clean_version(raw: &str) -> String {
    raw.replace("Google Chrome ", "")
        .replace("Chromium ", "")
        .trim()
        .to_string()
}

/// Start Chromium headless against `about:blank` and time it.
fn test_headless_launch(chromium_path: &Path, no_sandbox: bool) -> Result<u64> {
    let start = std::time::Instant::now();
    let mut cmd = Command::new(chromium_path);
    cmd.args(["--headless", "--disable-gpu", "--dump-dom", "about:blank"]);
    if no_sandbox {
        cmd.arg("--no-sandbox");
    }

    let output = cmd
        .output()
        .map_err(|e| anyhow::anyhow!("failed to launch: {e}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("{}", stderr.lines().next().unwrap_or("unknown error"));
    }

    Ok(start.elapsed().as_millis() as u64)
}

/// Check if running inside Docker.
fn is_docker() -> bool {
    Path::new("/.dockerenv").exists()
        || std::fs::read_to_string("/proc/1/cgroup")
            .map(|s| s.contains("docker") || s.contains("containerd"))
            .unwrap_or(false)
}
