//! UI Components for the referral screen.
//!
//! Screen-specific pieces built on the referral-ui widgets.

mod entitlement_banner;
mod invite_list;
mod invite_sheet;
mod toast_host;

pub use entitlement_banner::EntitlementBanner;
pub use invite_list::{InviteList, InviteRow};
pub use invite_sheet::InviteSheet;
pub use toast_host::ToastHost;
