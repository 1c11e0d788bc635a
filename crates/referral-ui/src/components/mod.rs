//! Reusable UI components for the referral screen

mod button;
mod countdown_label;
mod phone_input;
mod toast_stack;

pub use button::*;
pub use countdown_label::*;
pub use phone_input::*;
pub use toast_stack::*;
