//! Typed access to SES event notifications.
//!
//! [mapper::parse] turns the JSON a handler receives into an [Event] graph and
//! [mapper::serialize] turns it back. [handler::dispatch] routes each record
//! to an [handler::EventHandler] by notification type.

pub mod error;
pub mod handler;
pub mod mapper;
pub mod suppression;

pub use error::ParseError;
pub use mapper::{parse, parse_slice, parse_value, serialize, serialize_pretty};
pub use sesevent_types::*;
