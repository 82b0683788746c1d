//! Notification boundary between game logic and presentation.

pub mod notification;

pub use notification::{channel, Notification, NotificationReceiver, NotificationSender};
