//! Visual theme for the referral screen.

mod styles;

pub use styles::GLOBAL_STYLES;
