//! Referral CLI
//!
//! Thin wrapper around referral-core for driving the referral backend from a
//! terminal. Every command (except `entry`) logs in with the entry parameters
//! and loads invitations first, exactly as the screen does on open.
//!
//! ## Usage
//!
//! ```bash
//! # Show the five invitation slots and the entitlement banner
//! referral --toki-id abc --msisdn 99112233 info
//!
//! # Invite a friend
//! referral send 88001122
//!
//! # Resend or delete an invitation by id
//! referral resend 41
//! referral delete 41
//!
//! # Live countdowns, refreshing when one runs out
//! referral watch
//!
//! # Check what the screen would read from a query string
//! referral entry "?tokiId=abc&msisdn=99112233"
//! ```

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use referral_core::countdown::ticker;
use referral_core::{
    ClientConfig, CountdownFormat, DisplaySlot, EntryParams, ExpiryLatch, HttpReferralApi,
    InvitationId, ScreenController, ScreenState, SlotState, ToastKind, ToastRelay,
};

/// Referral - invite friends from the terminal
#[derive(Parser)]
#[command(name = "referral")]
#[command(version = "0.1.0")]
#[command(about = "Referral - invite friends from the terminal")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Base URL of the referral backend
    #[arg(long, global = true, env = "REFERRAL_API_URL")]
    api_url: Option<String>,

    /// Host app identifier handed to the screen
    #[arg(long, global = true, env = "REFERRAL_TOKI_ID")]
    toki_id: Option<String>,

    /// Subscriber phone number handed to the screen
    #[arg(long, global = true, env = "REFERRAL_MSISDN")]
    msisdn: Option<String>,

    /// Per-request timeout in seconds (0 or unset: no timeout)
    #[arg(long, global = true, env = "REFERRAL_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show invitation slots and entitlement
    Info,

    /// Invite a friend by phone number
    Send {
        /// Phone number; anything but digits is ignored
        phone: String,
    },

    /// Resend an invitation
    Resend {
        /// Invitation ID
        id: String,
    },

    /// Delete an invitation
    Delete {
        /// Invitation ID
        id: String,
    },

    /// Live countdown table; refreshes when a countdown reaches zero
    Watch {
        /// Stop after this many ticks (runs until Ctrl-C otherwise)
        #[arg(long)]
        ticks: Option<u64>,
    },

    /// Parse a query string the way the screen does, without network access
    Entry {
        /// Query string, e.g. "?tokiId=abc&msisdn=99112233"
        query: String,
    },
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

/// Environment defaults with the command-line flags layered on top.
fn client_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env()?
        .with_user_agent(concat!("referral-cli/", env!("CARGO_PKG_VERSION")))
        // toasts are printed and cleared after each command, so they never expire
        .with_toast_duration(Duration::ZERO);
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url)?;
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Some(Duration::from_secs(secs)));
    }
    Ok(config)
}

fn build_controller(cli: &Cli) -> Result<ScreenController> {
    let config = client_config(cli)?;
    tracing::info!(base_url = %config.base_url, "using referral backend");

    let toasts = ToastRelay::new(config.toast_duration);
    let api = Arc::new(HttpReferralApi::new(config)?);
    Ok(ScreenController::new(api, toasts))
}

/// Print and clear whatever the controller reported.
fn flush_toasts(controller: &ScreenController) {
    let relay = controller.toasts();
    for toast in relay.toasts() {
        match toast.kind {
            ToastKind::Success => println!("\u{2713} {}", toast.message),
            ToastKind::Error => eprintln!("\u{2717} {}", toast.message),
        }
        relay.dismiss(&toast.id);
    }
}

fn slot_label(slot: &DisplaySlot) -> (&'static str, String) {
    match &slot.state {
        SlotState::Invite => ("invite", "-".to_string()),
        SlotState::Pending { remaining } => ("pending", remaining.clock()),
        SlotState::Joined => ("joined", "-".to_string()),
        SlotState::Expired { local: true } => ("expired*", "00:00:00".to_string()),
        SlotState::Expired { local: false } => ("expired", "00:00:00".to_string()),
    }
}

fn print_state(state: &ScreenState, now: DateTime<Utc>) {
    let entitlement = &state.snapshot.entitlement;
    if entitlement.active {
        let ends = entitlement
            .expiration_date
            .map(|expiry| referral_core::remaining(now, expiry).with_days())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "Entitlement: active ({} joined), ends in {}",
            entitlement.success_count, ends
        );
    } else {
        println!(
            "Entitlement: inactive ({} joined)",
            entitlement.success_count
        );
    }
    println!();
    println!(
        "  {:<3}{:<10}{:<14}{:<12}{:<11}ID",
        "#", "STATUS", "NUMBER", "OPERATOR", "TIME LEFT"
    );
    for slot in state.slots(now) {
        let (status, left) = slot_label(&slot);
        let (number, operator, id) = match &slot.record {
            Some(record) => (
                record.resend_target().to_string(),
                record.operator_name.clone(),
                record.id.to_string(),
            ),
            None => ("-".to_string(), "-".to_string(), "-".to_string()),
        };
        println!(
            "  {:<3}{:<10}{:<14}{:<12}{:<11}{}",
            slot.index + 1,
            status,
            number,
            if operator.is_empty() { "-" } else { operator.as_str() },
            left,
            id
        );
    }
}

/// Invitation and expiry whose countdown already fired
type Fired = HashSet<(InvitationId, DateTime<Utc>)>;

/// Countdown latches for the Sent records currently loaded.
///
/// Records in `fired` are skipped: a server that still reports them as Sent
/// after their expiry must not trigger another refresh. A new expiry for the
/// same id arms a fresh latch.
fn sent_latches(state: &ScreenState, fired: &Fired) -> Vec<(InvitationId, ExpiryLatch)> {
    state
        .snapshot
        .invitations
        .iter()
        .filter(|r| r.is_sent() && !fired.contains(&(r.id.clone(), r.expire_date)))
        .map(|r| {
            (
                r.id.clone(),
                ExpiryLatch::new(r.expire_date, CountdownFormat::Clock),
            )
        })
        .collect()
}

async fn watch(controller: &ScreenController, max_ticks: Option<u64>) -> Result<()> {
    let mut fired = Fired::new();
    let mut latches = sent_latches(&controller.state(), &fired);
    let mut ticks = ticker();
    let mut seen = 0u64;

    loop {
        tokio::select! {
            _ = ticks.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted");
                return Ok(());
            }
        }

        let now = Utc::now();
        let mut expired_any = false;
        for (id, latch) in latches.iter_mut() {
            if latch.observe(now).just_expired {
                tracing::info!(%id, "invitation countdown reached zero");
                fired.insert((id.clone(), latch.expiry()));
                expired_any |= controller.mark_expired(id);
            }
        }
        if expired_any {
            // the server decides the real status
            let _ = controller.refresh().await;
            latches = sent_latches(&controller.state(), &fired);
        }

        println!("--- {}", now.format("%H:%M:%S"));
        print_state(&controller.state(), now);
        flush_toasts(controller);

        seen += 1;
        if max_ticks.is_some_and(|max| seen >= max) {
            return Ok(());
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if let Commands::Entry { query } = &cli.command {
        let params = EntryParams::from_query(query)?;
        println!("tokiId: {}", params.toki_id);
        println!("msisdn: {}", params.msisdn);
        return Ok(());
    }

    let controller = build_controller(&cli)?;
    controller
        .initialize(cli.toki_id.clone(), cli.msisdn.clone())
        .await?;

    let outcome = match &cli.command {
        Commands::Info => Ok(()),
        Commands::Send { phone } => {
            controller.open_sheet();
            controller.set_phone(phone);
            controller.send_invitation().await.map(|_| ())
        }
        Commands::Resend { id } => controller
            .resend_invitation(&InvitationId::new(id.as_str()))
            .await
            .map(|_| ()),
        Commands::Delete { id } => controller
            .delete_invitation(&InvitationId::new(id.as_str()))
            .await
            .map(|_| ()),
        Commands::Watch { ticks } => {
            watch(&controller, *ticks).await?;
            return Ok(());
        }
        Commands::Entry { .. } => Ok(()),
    };

    flush_toasts(&controller);
    print_state(&controller.state(), Utc::now());

    outcome.map_err(anyhow::Error::from)
}
