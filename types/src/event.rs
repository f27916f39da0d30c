use serde::{Deserialize, Deserializer, Serialize};

use crate::mail::Mail;
use crate::notification::{Bounce, Complaint, Delivery};
use crate::notification_type::{KnownNotificationType, NotificationType};

/// A batch of SES notifications as handed to a handler invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Upstream spells this key with a capital R.
    #[serde(rename = "Records", default, deserialize_with = "null_as_empty")]
    pub records: Vec<Record>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Record>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Record>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ses: Option<Ses>,
}

/// The notification envelope.
///
/// SES populates exactly one of `bounce`, `complaint` and `delivery`
/// according to `notification_type`, but nothing here enforces that: each
/// body is independently optional and kept as received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ses {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_type: Option<NotificationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail: Option<Mail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounce: Option<Bounce>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complaint: Option<Complaint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<Delivery>,
}

impl Ses {
    pub fn known_type(&self) -> Option<KnownNotificationType> {
        self.notification_type.as_ref()?.known()
    }

    /// Whether the body named by the discriminator is present.
    ///
    /// `Received` and unknown types carry no body, so they always match.
    pub fn body_matches_type(&self) -> bool {
        match self.known_type() {
            Some(KnownNotificationType::Bounce) => self.bounce.is_some(),
            Some(KnownNotificationType::Complaint) => self.complaint.is_some(),
            Some(KnownNotificationType::Delivery) => self.delivery.is_some(),
            Some(KnownNotificationType::Received) | None => true,
        }
    }
}
