//! Contact form intake: stamp each submission and hand it to a notifier.

use chrono::DateTime;
use chrono::Utc;
use std::fs::OpenOptions;
use std::fs::create_dir_all;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::PoisonError;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ProjectType {
    Web,
    Mobile,
    Branding,
    UiUx,
    Fintech,
    VrAr,
    Other,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
pub enum BudgetRange {
    #[serde(rename = "under-10k")]
    #[strum(serialize = "under-10k")]
    Under10k,
    #[serde(rename = "10k-25k")]
    #[strum(serialize = "10k-25k")]
    From10kTo25k,
    #[serde(rename = "25k-50k")]
    #[strum(serialize = "25k-50k")]
    From25kTo50k,
    #[serde(rename = "50k-100k")]
    #[strum(serialize = "50k-100k")]
    From50kTo100k,
    #[serde(rename = "over-100k")]
    #[strum(serialize = "over-100k")]
    Over100k,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Reviewed,
    Responded,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    pub project_type: ProjectType,
    pub budget: BudgetRange,
    pub message: String,
    #[serde(default)]
    pub timeline: Option<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContactFormSubmission {
    pub id: String,
    pub submitted_at: DateTime<Utc>,
    pub status: SubmissionStatus,
    #[serde(flatten)]
    pub form: ContactForm,
}

/// Delivery collaborator for new submissions (email in production).
pub trait Notifier: Send + Sync {
    fn deliver(&self, submission: &ContactFormSubmission) -> anyhow::Result<()>;
}

/// Stand-in for email delivery: emits a tracing event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn deliver(&self, submission: &ContactFormSubmission) -> anyhow::Result<()> {
        tracing::info!(
            id = %submission.id,
            from = %submission.form.email,
            project_type = %submission.form.project_type,
            budget = %submission.form.budget,
            "contact submission received"
        );
        Ok(())
    }
}

/// Appends each submission as one JSON line to an outbox file.
#[derive(Debug, Clone)]
pub struct JsonlOutbox {
    path: PathBuf,
}

impl JsonlOutbox {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Notifier for JsonlOutbox {
    fn deliver(&self, submission: &ContactFormSubmission) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent() {
            create_dir_all(dir)?;
        }
        let line = serde_json::to_string(submission)?;
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(f, "{line}")?;
        tracing::debug!("contact: queued {} in {}", submission.id, self.path.display());
        Ok(())
    }
}

pub struct ContactDesk {
    notifier: Box<dyn Notifier>,
    received: Mutex<Vec<ContactFormSubmission>>,
}

impl ContactDesk {
    pub fn new(notifier: Box<dyn Notifier>) -> Self {
        Self {
            notifier,
            received: Mutex::new(Vec::new()),
        }
    }

    /// Stamp a copy of `form` with a fresh id and timestamp, deliver it, and
    /// record it. Nothing is recorded when delivery fails.
    pub fn submit(&self, form: &ContactForm) -> anyhow::Result<ContactFormSubmission> {
        let submission = ContactFormSubmission {
            id: uuid::Uuid::new_v4().to_string(),
            submitted_at: Utc::now(),
            status: SubmissionStatus::Pending,
            form: form.clone(),
        };
        self.notifier.deliver(&submission)?;
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(submission.clone());
        Ok(submission)
    }

    pub fn submissions(&self) -> Vec<ContactFormSubmission> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn form() -> ContactForm {
        ContactForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            company: None,
            project_type: ProjectType::UiUx,
            budget: BudgetRange::From25kTo50k,
            message: "We need a redesign".into(),
            timeline: Some("Q3".into()),
            attachments: vec![],
        }
    }

    struct FailingNotifier;

    impl Notifier for FailingNotifier {
        fn deliver(&self, _submission: &ContactFormSubmission) -> anyhow::Result<()> {
            anyhow::bail!("smtp unavailable")
        }
    }

    #[test]
    fn submit_stamps_copy_and_leaves_input_alone() {
        let desk = ContactDesk::new(Box::new(LogNotifier));
        let input = form();
        let a = desk.submit(&input).unwrap();
        let b = desk.submit(&input).unwrap();
        assert_eq!(input, form());
        assert_eq!(a.form, input);
        assert_eq!(a.status, SubmissionStatus::Pending);
        assert_ne!(a.id, b.id);
        assert_eq!(desk.submissions().len(), 2);
    }

    #[test]
    fn failed_delivery_is_not_recorded() {
        let desk = ContactDesk::new(Box::new(FailingNotifier));
        assert!(desk.submit(&form()).is_err());
        assert!(desk.submissions().is_empty());
    }

    #[test]
    fn outbox_appends_flattened_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outbox").join("contact.jsonl");
        let desk = ContactDesk::new(Box::new(JsonlOutbox::new(&path)));
        desk.submit(&form()).unwrap();
        desk.submit(&form()).unwrap();
        let data = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = data
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["budget"], "25k-50k");
        assert_eq!(lines[0]["project_type"], "ui-ux");
        assert_eq!(lines[0]["status"], "pending");
    }
}
