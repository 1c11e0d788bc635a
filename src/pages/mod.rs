//! Page components for the referral screen.

mod referral;

pub use referral::ReferralPage;
