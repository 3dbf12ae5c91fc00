//! Contact form submission with an in-flight guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use termfolio_core::error::{FolioError, Result};
use termfolio_core::relay::{ContactChannel, ContactRequest};

pub const SENT_MESSAGE: &str = "Your message has been sent successfully!";
pub const FAILED_MESSAGE: &str = "There was an error sending your message.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Failed,
    /// A previous submission is still pending; nothing was sent.
    AlreadySubmitting,
}

impl SubmitOutcome {
    /// Status line shown under the form.
    pub fn message(self) -> Option<&'static str> {
        match self {
            SubmitOutcome::Sent => Some(SENT_MESSAGE),
            SubmitOutcome::Failed => Some(FAILED_MESSAGE),
            SubmitOutcome::AlreadySubmitting => None,
        }
    }
}

/// Names of the fields that are empty after trimming.
pub fn missing_fields(form: &ContactRequest) -> Vec<&'static str> {
    [
        ("name", &form.name),
        ("company", &form.company),
        ("project", &form.project),
        ("email", &form.email),
    ]
    .into_iter()
    .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
    .map(|(field, _)| field)
    .collect()
}

pub struct ContactFormSubmitter {
    channel: Arc<dyn ContactChannel>,
    submitting: AtomicBool,
}

impl ContactFormSubmitter {
    pub fn new(channel: Arc<dyn ContactChannel>) -> Self {
        Self {
            channel,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Rejects forms with empty fields before anything is sent.
    pub fn validate(form: &ContactRequest) -> Result<()> {
        let missing = missing_fields(form);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FolioError::invalid_request(format!(
                "missing fields: {}",
                missing.join(", ")
            )))
        }
    }

    pub async fn submit(&self, form: &ContactRequest) -> SubmitOutcome {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return SubmitOutcome::AlreadySubmitting;
        }

        let outcome = match self.channel.submit(form).await {
            Ok(()) => SubmitOutcome::Sent,
            Err(e) => {
                tracing::warn!("[ContactForm] Submission failed: {}", e);
                SubmitOutcome::Failed
            }
        };
        self.submitting.store(false, Ordering::SeqCst);
        outcome
    }
}
