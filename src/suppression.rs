use email_address::EmailAddress;
use sesevent_types::{BounceType, Ses};
use std::str::FromStr;

/// Recipients that should no longer be sent to because of this notification.
///
/// That is every recipient of a permanent bounce and every complained
/// recipient, in wire order. Transient and undetermined bounces are not
/// included. Addresses that do not parse are logged and left out.
pub fn suppression_candidates(ses: &Ses) -> Vec<EmailAddress> {
    let mut raw: Vec<&str> = Vec::new();

    if let Some(bounce) = ses.bounce.as_ref() {
        if bounce.kind() == Some(BounceType::Permanent) {
            raw.extend(
                bounce
                    .bounced_recipients
                    .iter()
                    .flatten()
                    .filter_map(|r| r.email_address.as_deref()),
            );
        }
    }

    if let Some(complaint) = ses.complaint.as_ref() {
        raw.extend(
            complaint
                .complained_recipients
                .iter()
                .flatten()
                .filter_map(|r| r.email_address.as_deref()),
        );
    }

    raw.into_iter()
        .filter_map(|address| match EmailAddress::from_str(address) {
            Ok(email) => Some(email),
            Err(e) => {
                tracing::warn!(address, error = %e, "skipping unparsable recipient address");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::parse;

    fn first_ses(json: &str) -> Ses {
        parse(json).unwrap().records.remove(0).ses.unwrap()
    }

    fn addresses(ses: &Ses) -> Vec<String> {
        suppression_candidates(ses)
            .iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn test_permanent_bounce_recipients_are_suppressed() {
        let ses = first_ses(include_str!("../testdata/bounce.json"));
        assert_eq!(
            addresses(&ses),
            vec!["jane@example.com", "mary@example.com"]
        );
    }

    #[test]
    fn test_transient_bounce_is_not_suppressed() {
        let ses = first_ses(
            r#"{"Records":[{"ses":{"bounce":{"bounceType":"Transient","bouncedRecipients":[{"emailAddress":"a@example.com"}]}}}]}"#,
        );
        assert!(suppression_candidates(&ses).is_empty());
    }

    #[test]
    fn test_complained_recipients_are_suppressed() {
        let ses = first_ses(include_str!("../testdata/complaint.json"));
        assert_eq!(addresses(&ses), vec!["richard@example.com"]);
    }

    #[test]
    fn test_invalid_addresses_are_skipped() {
        let ses = first_ses(
            r#"{"Records":[{"ses":{"complaint":{"complainedRecipients":[{"emailAddress":"nope"},{},{"emailAddress":"b@example.com"}]}}}]}"#,
        );
        assert_eq!(addresses(&ses), vec!["b@example.com"]);
    }

    #[test]
    fn test_delivery_has_no_candidates() {
        let ses = first_ses(include_str!("../testdata/delivery.json"));
        assert!(suppression_candidates(&ses).is_empty());
    }
}
