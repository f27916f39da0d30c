use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Bounce classification as determined by SES.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
pub enum BounceType {
    Undetermined,
    /// A hard bounce. The recipient should be removed from mailing lists.
    Permanent,
    Transient,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounce {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounce_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounce_sub_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounced_recipients: Option<Vec<BounceRecipient>>,
    /// When the ISP sent the bounce, not when SES received it.
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_mta_ip: Option<String>,
    #[serde(
        default,
        alias = "reportingMTA",
        skip_serializing_if = "Option::is_none"
    )]
    pub reporting_mta: Option<String>,
}

impl Bounce {
    /// [Bounce::bounce_type] as a [BounceType], if it is one SES documents.
    pub fn kind(&self) -> Option<BounceType> {
        self.bounce_type.as_deref()?.parse().ok()
    }
}

/// One entry of a bounce's recipient list, taken from the DSN when available.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BounceRecipient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complained_recipients: Option<Vec<ComplainedRecipient>>,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complaint_feedback_type: Option<String>,
    /// Arrival-Date of the feedback report, passed through as sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplainedRecipient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time_millis: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_response: Option<String>,
    #[serde(
        default,
        alias = "reportingMTA",
        skip_serializing_if = "Option::is_none"
    )]
    pub reporting_mta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_mta_ip: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounce_kind() {
        let mut bounce = Bounce {
            bounce_type: Some("Permanent".to_string()),
            ..Default::default()
        };
        assert_eq!(bounce.kind(), Some(BounceType::Permanent));

        bounce.bounce_type = Some("Sideways".to_string());
        assert_eq!(bounce.kind(), None);

        bounce.bounce_type = None;
        assert_eq!(bounce.kind(), None);
    }

    #[test]
    fn test_reporting_mta_accepts_upper_case_spelling() {
        let bounce: Bounce =
            serde_json::from_str(r#"{"reportingMTA":"dsn; a.example.com"}"#).unwrap();
        assert_eq!(bounce.reporting_mta.as_deref(), Some("dsn; a.example.com"));
        assert_eq!(
            serde_json::to_string(&bounce).unwrap(),
            r#"{"reportingMta":"dsn; a.example.com"}"#
        );
    }

    #[test]
    fn test_complaint_arrival_date_is_not_interpreted() {
        let complaint: Complaint = serde_json::from_str(
            r#"{"timestamp":"2016-01-27T14:59:38.237Z","arrivalDate":"not even a date"}"#,
        )
        .unwrap();
        assert!(complaint.timestamp.is_some());
        assert_eq!(complaint.arrival_date.as_deref(), Some("not even a date"));
    }

    #[test]
    fn test_malformed_timestamp_fails_instead_of_defaulting() {
        let result: Result<Delivery, _> = serde_json::from_str(r#"{"timestamp":"yesterday"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_null_timestamp_is_absent() {
        let delivery: Delivery = serde_json::from_str(r#"{"timestamp":null}"#).unwrap();
        assert_eq!(delivery.timestamp, None);
    }
}
