use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::convert::Infallible;
use std::str::FromStr;
use strum::{Display, EnumString, IntoStaticStr};

/// Notification types SES is documented to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, IntoStaticStr)]
pub enum KnownNotificationType {
    Received,
    Bounce,
    Complaint,
    Delivery,
}

/// The `notificationType` discriminator of an SES message.
///
/// This is not a closed set: the value is held exactly as received and a
/// type SES adds later serializes back unchanged. [NotificationType::known]
/// classifies it, case sensitively, so `"bounce"` is not a bounce. Two values
/// are equal exactly when their strings are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct NotificationType {
    raw: String,
}

impl NotificationType {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn known(&self) -> Option<KnownNotificationType> {
        KnownNotificationType::from_str(&self.raw).ok()
    }
}

impl From<KnownNotificationType> for NotificationType {
    fn from(known: KnownNotificationType) -> Self {
        let raw: &'static str = known.into();
        Self::new(raw)
    }
}

impl PartialEq<KnownNotificationType> for NotificationType {
    fn eq(&self, other: &KnownNotificationType) -> bool {
        self.known() == Some(*other)
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for NotificationType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values_are_classified() {
        for (raw, known) in [
            ("Received", KnownNotificationType::Received),
            ("Bounce", KnownNotificationType::Bounce),
            ("Complaint", KnownNotificationType::Complaint),
            ("Delivery", KnownNotificationType::Delivery),
        ] {
            let parsed: NotificationType = raw.parse().unwrap();
            assert_eq!(parsed.known(), Some(known));
            assert_eq!(parsed.to_string(), raw);
            assert_eq!(parsed, NotificationType::from(known));
            assert_eq!(parsed, known);
        }
    }

    #[test]
    fn test_unknown_values_pass_through() {
        let parsed: NotificationType = serde_json::from_str(r#""FutureType""#).unwrap();
        assert_eq!(parsed, NotificationType::new("FutureType"));
        assert_eq!(parsed.known(), None);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), r#""FutureType""#);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let parsed: NotificationType = "bounce".parse().unwrap();
        assert_eq!(parsed.known(), None);
        assert_ne!(parsed, NotificationType::from(KnownNotificationType::Bounce));
        assert_eq!(parsed.to_string(), "bounce");
    }

    #[test]
    fn test_constructed_value_equals_its_parsed_form() {
        for raw in ["Bounce", "FutureType", "bounce", ""] {
            let built = NotificationType::new(raw);
            let reparsed: NotificationType =
                serde_json::from_str(&serde_json::to_string(&built).unwrap()).unwrap();
            assert_eq!(built, reparsed);
        }
    }
}
