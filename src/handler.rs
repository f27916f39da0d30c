use sesevent_types::{Bounce, Complaint, Delivery, Event, KnownNotificationType, Mail, Ses};

/// Receives the notifications of an [Event], one callback per record.
///
/// The callbacks are plain `async fn`s, so their futures are not required to
/// be `Send`. Drive [dispatch] on the current task rather than handing it to
/// `tokio::spawn` on a multi-threaded runtime.
#[allow(async_fn_in_trait)]
pub trait EventHandler {
    type Error: std::fmt::Display;

    async fn on_bounce(&self, mail: Option<&Mail>, bounce: &Bounce) -> Result<(), Self::Error>;

    async fn on_complaint(
        &self,
        mail: Option<&Mail>,
        complaint: &Complaint,
    ) -> Result<(), Self::Error>;

    async fn on_delivery(
        &self,
        _mail: Option<&Mail>,
        _delivery: &Delivery,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// `Received` notifications, unknown types and messages with no type.
    async fn on_other(&self, _ses: &Ses) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub handled: usize,
    /// Records with no `ses` message, or whose discriminator names a body
    /// that is absent.
    pub skipped: usize,
    pub failed: usize,
}

enum Outcome {
    Handled,
    Skipped,
}

/// Routes every record of `event` to `handler` in order.
///
/// A failing callback is logged and counted; the remaining records are still
/// dispatched.
#[tracing::instrument(skip(handler, event), fields(records = event.records.len()))]
pub async fn dispatch<H: EventHandler>(handler: &H, event: &Event) -> DispatchReport {
    let mut report = DispatchReport::default();

    for (index, record) in event.records.iter().enumerate() {
        let Some(ses) = record.ses.as_ref() else {
            tracing::warn!(index, "record has no ses message");
            report.skipped += 1;
            continue;
        };

        tracing::debug!(index, notification_type = ?ses.notification_type, "dispatching record");
        match dispatch_message(handler, ses).await {
            Ok(Outcome::Handled) => report.handled += 1,
            Ok(Outcome::Skipped) => {
                tracing::warn!(
                    index,
                    notification_type = ?ses.notification_type,
                    "notification body missing for its type"
                );
                report.skipped += 1;
            }
            Err(e) => {
                tracing::error!(index, error = %e, "failed to handle notification");
                report.failed += 1;
            }
        }
    }

    report
}

async fn dispatch_message<H: EventHandler>(handler: &H, ses: &Ses) -> Result<Outcome, H::Error> {
    let mail = ses.mail.as_ref();
    match ses.known_type() {
        Some(KnownNotificationType::Bounce) => match ses.bounce.as_ref() {
            Some(bounce) => handler.on_bounce(mail, bounce).await.map(|_| Outcome::Handled),
            None => Ok(Outcome::Skipped),
        },
        Some(KnownNotificationType::Complaint) => match ses.complaint.as_ref() {
            Some(complaint) => handler
                .on_complaint(mail, complaint)
                .await
                .map(|_| Outcome::Handled),
            None => Ok(Outcome::Skipped),
        },
        Some(KnownNotificationType::Delivery) => match ses.delivery.as_ref() {
            Some(delivery) => handler
                .on_delivery(mail, delivery)
                .await
                .map(|_| Outcome::Handled),
            None => Ok(Outcome::Skipped),
        },
        Some(KnownNotificationType::Received) | None => {
            handler.on_other(ses).await.map(|_| Outcome::Handled)
        }
    }
}
