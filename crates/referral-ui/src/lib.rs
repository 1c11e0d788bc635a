//! Referral Screen UI Components
//!
//! Dioxus widgets shared by the referral screen: buttons, the digits-only
//! phone input, the toast stack and a self-ticking countdown label.
//!
//! ## Look
//!
//! Bright promotional card on a light background:
//! - **Toki red (#e4002b)**: primary actions, banner accents
//! - **Ink (#1d1d1f)**: body text
//! - **Mint (#00b67a)**: joined invitations, success toasts
//! - **Slate (#8e8e93)**: pending countdowns, muted copy
//!
//! Components only emit events; all state changes go through
//! `referral_core::ScreenController`.

pub mod components;
pub mod hooks;

pub use components::*;
pub use hooks::*;
