#![allow(non_snake_case)]

mod app;
mod components;
pub mod context;
mod pages;
mod theme;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use dioxus::desktop::{Config, WindowBuilder};
use referral_core::{ClientConfig, HttpReferralApi, ScreenController, ToastRelay};

use crate::context::{EntryQuery, SharedController};

/// Referral screen - invite friends, earn data
#[derive(Parser, Debug)]
#[command(name = "referral-desktop")]
#[command(about = "Referral screen - invite friends, earn data")]
struct Args {
    /// Base URL of the referral backend
    #[arg(long, env = "REFERRAL_API_URL")]
    api_url: Option<String>,

    /// Entry query string as the host app passes it ("tokiId=...&msisdn=...")
    #[arg(short, long, env = "REFERRAL_QUERY", default_value = "")]
    query: String,

    /// Per-request timeout in seconds (0 or unset: no timeout)
    #[arg(long, env = "REFERRAL_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut config = ClientConfig::from_env()?
        .with_user_agent(concat!("referral-desktop/", env!("CARGO_PKG_VERSION")));
    if let Some(url) = &args.api_url {
        config = config.with_base_url(url)?;
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Some(Duration::from_secs(secs)));
    }
    tracing::info!(base_url = %config.base_url, "starting referral screen");

    let toasts = ToastRelay::new(config.toast_duration);
    let api = Arc::new(HttpReferralApi::new(config)?);
    let controller: SharedController = Arc::new(ScreenController::new(api, toasts));

    // Phone-sized window
    let config = Config::new().with_window(
        WindowBuilder::new()
            .with_title("Найзаа урих")
            .with_inner_size(dioxus::desktop::LogicalSize::new(420.0, 860.0))
            .with_resizable(true),
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .with_context(controller)
        .with_context(EntryQuery(args.query))
        .launch(app::App);

    Ok(())
}
