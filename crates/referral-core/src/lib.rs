//! Referral Screen Core Library
//!
//! Headless logic behind the "invite a friend" promotional screen.
//!
//! ## Overview
//!
//! A subscriber opens the screen from the host app with a `tokiId` and
//! `msisdn`. The screen logs in against the referral backend, shows five
//! invitation slots with live countdowns, and lets the user invite friends by
//! phone number, resend lapsed invitations or delete them. An entitlement
//! banner counts down the active bonus.
//!
//! Everything here is UI-agnostic; the Dioxus screen and the CLI both drive
//! the same [`ScreenController`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use referral_core::{ClientConfig, HttpReferralApi, ScreenController, ToastRelay};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env()?;
//!     let toasts = ToastRelay::new(config.toast_duration);
//!     let api = Arc::new(HttpReferralApi::new(config)?);
//!     let controller = ScreenController::new(api, toasts);
//!
//!     controller.initialize_from_query("tokiId=abc&msisdn=99112233").await?;
//!
//!     for slot in controller.state().slots(chrono::Utc::now()) {
//!         println!("{:?}", slot.state);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod controller;
pub mod countdown;
pub mod entry;
pub mod error;
pub mod gesture;
pub mod phone;
pub mod slots;
pub mod toast;
pub mod types;

// Re-exports
pub use api::{Ack, ApiError, HttpReferralApi, ReferralApi};
pub use config::ClientConfig;
pub use controller::{InviteSheet, LoadPhase, ScreenController, ScreenState};
pub use countdown::{remaining, CountdownFormat, ExpiryLatch, Remaining, Tick};
pub use entry::EntryParams;
pub use error::{ActionKind, ReferralError, ReferralResult};
pub use gesture::{DragConfig, DragOutcome, DragPhase, DragTracker};
pub use phone::PhoneField;
pub use slots::{normalize, DisplaySlot, SlotState, DISPLAY_SLOTS};
pub use toast::{Toast, ToastId, ToastKind, ToastRelay};
pub use types::*;
