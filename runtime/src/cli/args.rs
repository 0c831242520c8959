//! Command-line arguments.

use crate::config::{ExtractorConfig, ProxyConfig};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Print the top stories from the Hacker News front page.
#[derive(Debug, Parser)]
#[command(name = "hn-front", version, about)]
pub struct Cli {
    /// JSON config file (defaults to <config dir>/hn-front/config.json).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Only print the stories.
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Log progress details to stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub top: TopArgs,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract and print the top stories (the default).
    Top(TopArgs),
    /// Check that Chromium and the configuration are usable.
    Doctor,
}

/// Options for one extraction run. Unset options keep the configured value.
#[derive(Debug, Clone, Default, Args)]
pub struct TopArgs {
    /// Number of stories to print.
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Page to extract from.
    #[arg(long)]
    pub url: Option<String>,

    /// Navigation timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Overall deadline for the whole run, in seconds.
    #[arg(long, value_name = "SECS")]
    pub deadline_secs: Option<u64>,

    /// Show the browser window.
    #[arg(long)]
    pub headed: bool,

    /// Proxy URL, e.g. socks5://127.0.0.1:1080.
    #[arg(long, value_name = "URL")]
    pub proxy: Option<String>,

    /// Chromium binary to launch.
    #[arg(long, value_name = "PATH")]
    pub chromium_path: Option<PathBuf>,

    /// Launch Chromium with --no-sandbox.
    #[arg(long)]
    pub no_sandbox: bool,
}

impl TopArgs {
    /// Layer these options over `config`.
    pub fn apply(&self, config: &mut ExtractorConfig) -> Result<()> {
        if let Some(limit) = self.limit {
            config.limit = limit;
        }
        if let Some(url) = &self.url {
            config.url = url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.navigation_timeout_secs = secs;
        }
        if let Some(secs) = self.deadline_secs {
            config.deadline_secs = Some(secs);
        }
        if self.headed {
            config.headless = false;
        }
        if let Some(proxy) = &self.proxy {
            config.proxy = ProxyConfig::from_url(proxy).context("parsing --proxy")?;
        }
        if let Some(path) = &self.chromium_path {
            config.chromium_path = Some(path.clone());
        }
        if self.no_sandbox {
            config.no_sandbox = true;
        }
        Ok(())
    }
}
