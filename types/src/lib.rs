//! Schema of an SES event notification as delivered to a serverless handler.

mod event;
mod mail;
mod notification;
mod notification_type;
pub mod timestamp;

pub use event::{Event, Record, Ses};
pub use mail::{CommonHeaders, Header, Mail};
pub use notification::{
    Bounce, BounceRecipient, BounceType, ComplainedRecipient, Complaint, Delivery,
};
pub use notification_type::{KnownNotificationType, NotificationType};
pub use timestamp::{TimestampError, format_instant, parse_instant};
