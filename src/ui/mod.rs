//! Page-side state machines that sit around the forms: the modal overlay
//! and the scroll-triggered voice check-in.

pub mod modal;
pub mod voice_prompt;
