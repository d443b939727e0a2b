//! The `Notifier` capability: an opaque, fire-and-forget sink that the
//! dispatcher hands one [`Job`] to at a time, plus the reference Discord
//! webhook implementation.

mod discord;
mod job;
mod notifier;

pub use discord::DiscordNotifier;
pub use job::Job;
pub use notifier::{NotifierBoxed, NullNotifier};
pub use notifier::Notifier;

#[cfg(any(test, feature = "test-util"))]
pub use notifier::RecordingNotifier;
