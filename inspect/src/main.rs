mod config;

use anyhow::Context;
use config::Config;
use sesevent::handler::{EventHandler, dispatch};
use sesevent::suppression::suppression_candidates;
use sesevent::{Bounce, Complaint, Delivery, Mail, Ses};
use std::convert::Infallible;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

/// Logs a one-line summary of each notification.
struct LoggingHandler;

fn message_id(mail: Option<&Mail>) -> Option<&str> {
    mail.and_then(|m| m.message_id.as_deref())
}

impl EventHandler for LoggingHandler {
    type Error = Infallible;

    async fn on_bounce(&self, mail: Option<&Mail>, bounce: &Bounce) -> Result<(), Infallible> {
        tracing::info!(
            message_id = ?message_id(mail),
            bounce_type = ?bounce.bounce_type,
            bounce_sub_type = ?bounce.bounce_sub_type,
            recipients = bounce.bounced_recipients.as_ref().map_or(0, Vec::len),
            "bounce"
        );
        Ok(())
    }

    async fn on_complaint(
        &self,
        mail: Option<&Mail>,
        complaint: &Complaint,
    ) -> Result<(), Infallible> {
        tracing::info!(
            message_id = ?message_id(mail),
            feedback_type = ?complaint.complaint_feedback_type,
            recipients = complaint.complained_recipients.as_ref().map_or(0, Vec::len),
            "complaint"
        );
        Ok(())
    }

    async fn on_delivery(&self, mail: Option<&Mail>, delivery: &Delivery) -> Result<(), Infallible> {
        tracing::info!(
            message_id = ?message_id(mail),
            processing_time_millis = ?delivery.processing_time_millis,
            smtp_response = ?delivery.smtp_response,
            "delivery"
        );
        Ok(())
    }

    async fn on_other(&self, ses: &Ses) -> Result<(), Infallible> {
        tracing::info!(
            message_id = ?message_id(ses.mail.as_ref()),
            notification_type = ?ses.notification_type,
            "notification without a typed body"
        );
        Ok(())
    }
}

async fn read_event(config: &Config) -> anyhow::Result<String> {
    match &config.event_file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("failed to read stdin")?;
            Ok(raw)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    tracing::trace!(?config, "initialized config");

    let raw = read_event(&config).await?;
    let event = sesevent::parse(&raw).context("failed to parse ses event")?;

    let report = dispatch(&LoggingHandler, &event).await;
    for ses in event.records.iter().filter_map(|r| r.ses.as_ref()) {
        for address in suppression_candidates(ses) {
            tracing::info!(%address, "suppression candidate");
        }
    }
    tracing::info!(
        handled = report.handled,
        skipped = report.skipped,
        failed = report.failed,
        "dispatch complete"
    );

    if config.echo {
        let json = sesevent::serialize_pretty(&event).context("failed to serialize ses event")?;
        println!("{json}");
    }

    Ok(())
}
