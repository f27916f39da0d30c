use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about the email a notification refers to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mail {
    /// When the original message was sent.
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sending_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers_truncated: Option<bool>,
    /// Every header of the original message in wire order. Names may repeat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<Header>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_headers: Option<CommonHeaders>,
}

impl Mail {
    /// First header whose name matches, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&Header> {
        self.headers
            .iter()
            .flatten()
            .find(|header| header.is_named(name))
    }

    /// All headers whose name matches, ignoring ASCII case, in wire order.
    pub fn headers_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Header> + 'a {
        self.headers
            .iter()
            .flatten()
            .filter(move |header| header.is_named(name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }

    fn is_named(&self, name: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|n| n.eq_ignore_ascii_case(name))
    }
}

/// Frequently used header values, rolled up by SES. Not cross-checked against
/// [Mail::headers].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonHeaders {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bcc: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail_with_headers() -> Mail {
        Mail {
            headers: Some(vec![
                Header::new("Received", "from a"),
                Header::new("Subject", "hello"),
                Header::new("received", "from b"),
            ]),
            ..Default::default()
        }
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let mail = mail_with_headers();
        assert_eq!(
            mail.header("SUBJECT").and_then(|h| h.value.as_deref()),
            Some("hello")
        );
        assert!(mail.header("X-Missing").is_none());
    }

    #[test]
    fn test_header_outlives_the_name_it_was_looked_up_by() {
        let mail = mail_with_headers();
        let found = {
            let name = String::from("received");
            mail.header(&name)
        };
        assert_eq!(found.and_then(|h| h.value.as_deref()), Some("from a"));
    }

    #[test]
    fn test_repeated_headers_keep_wire_order() {
        let mail = mail_with_headers();
        let values: Vec<_> = mail
            .headers_named("Received")
            .filter_map(|h| h.value.as_deref())
            .collect();
        assert_eq!(values, vec!["from a", "from b"]);
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let mail = Mail {
            message_id: Some("m1".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&mail).unwrap(),
            r#"{"messageId":"m1"}"#
        );
    }
}
