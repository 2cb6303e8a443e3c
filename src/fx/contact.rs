//! Contact form submission
//!
//! The relay answers with an opaque cross-origin response, so nothing about the
//! reply can be read. A request that goes out without a transport error counts as
//! sent. There is one attempt per submit: no retry and no timeout.

use std::cell::Cell;
use std::future::Future;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The request never made it out (offline, blocked, CSP, ...)
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Fire-and-forget POST to the relay
pub trait Transport {
    /// Send `fields` to `endpoint`. Resolves `Ok` unless the request itself failed.
    fn post(
        &self,
        endpoint: &str,
        fields: &[(String, String)],
    ) -> impl Future<Output = Result<(), SubmitError>>;
}

/// User-facing submission state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Sending,
    Sent,
    Failed,
}

impl SubmitStatus {
    pub fn message(&self) -> &'static str {
        match self {
            SubmitStatus::Sending => "Sending...",
            SubmitStatus::Sent => "Thanks! Your message has been sent.",
            SubmitStatus::Failed => "Oops! Something went wrong. Please try again.",
        }
    }

    /// CSS class for the status element
    pub fn class_name(&self) -> &'static str {
        match self {
            SubmitStatus::Sending => "form-status sending",
            SubmitStatus::Sent => "form-status success",
            SubmitStatus::Failed => "form-status error",
        }
    }
}

/// Field values captured from the form, in markup order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    fields: Vec<(String, String)>,
}

impl ContactForm {
    pub fn new<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Blank every value, keeping the field names
    pub fn clear(&mut self) {
        for (_, value) in &mut self.fields {
            value.clear();
        }
    }

    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, v)| v.is_empty())
    }

    /// Build the submission from the form's controls, keeping only the ones a
    /// browser would submit (see [`FormControl::entry`])
    pub fn from_controls(controls: impl IntoIterator<Item = FormControl>) -> Self {
        Self {
            fields: controls.into_iter().filter_map(FormControl::entry).collect(),
        }
    }
}

/// A named control read off the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormControl {
    pub name: String,
    /// Input `type` (`text`, `checkbox`, ...), or `textarea` / `select`
    pub kind: String,
    pub value: String,
    pub checked: bool,
    /// Disabled directly or through a disabled fieldset
    pub disabled: bool,
}

impl FormControl {
    /// The `(name, value)` pair this control contributes, if any.
    ///
    /// Disabled and unnamed controls are skipped, as are checkboxes and radios
    /// that aren't checked. Buttons never contribute since the form is submitted
    /// without a submitter, and file inputs are skipped because the relay only
    /// takes text.
    pub fn entry(self) -> Option<(String, String)> {
        if self.disabled || self.name.is_empty() {
            return None;
        }
        match self.kind.to_ascii_lowercase().as_str() {
            "submit" | "button" | "reset" | "image" | "file" => None,
            "checkbox" | "radio" if !self.checked => None,
            _ => Some((self.name, self.value)),
        }
    }
}

pub struct FormSubmitter<T: Transport> {
    endpoint: String,
    transport: T,
    in_flight: Cell<bool>,
}

impl<T: Transport> FormSubmitter<T> {
    pub fn new(endpoint: impl Into<String>, transport: T) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
            in_flight: Cell::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Submit `form` once, reporting each status change through `on_status`.
    ///
    /// On success the form is cleared; on failure it is left untouched. Returns the
    /// final status, or `None` if another submission was still in flight.
    pub async fn submit(
        &self,
        form: &mut ContactForm,
        mut on_status: impl FnMut(SubmitStatus),
    ) -> Option<SubmitStatus> {
        if self.in_flight.replace(true) {
            log::debug!("Submit ignored, previous request still in flight");
            return None;
        }
        on_status(SubmitStatus::Sending);

        let status = match self.transport.post(&self.endpoint, form.fields()).await {
            Ok(()) => {
                form.clear();
                log::info!("Contact form sent");
                SubmitStatus::Sent
            }
            Err(e) => {
                log::warn!("Contact form failed: {}", e);
                SubmitStatus::Failed
            }
        };

        self.in_flight.set(false);
        on_status(status);
        Some(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    /// Transport that records requests and answers with a canned result
    struct FakeTransport {
        result: Result<(), SubmitError>,
        sent: RefCell<Vec<(String, Vec<(String, String)>)>>,
    }

    impl FakeTransport {
        fn ok() -> Self {
            Self { result: Ok(()), sent: RefCell::new(Vec::new()) }
        }

        fn failing() -> Self {
            Self {
                result: Err(SubmitError::Transport("TypeError: Failed to fetch".into())),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for FakeTransport {
        async fn post(
            &self,
            endpoint: &str,
            fields: &[(String, String)],
        ) -> Result<(), SubmitError> {
            self.sent.borrow_mut().push((endpoint.to_owned(), fields.to_vec()));
            self.result.clone()
        }
    }

    fn sample_form() -> ContactForm {
        ContactForm::new([
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("message", "Hello!"),
        ])
    }

    #[test]
    fn test_success_clears_form_and_reports_sent() {
        let submitter = FormSubmitter::new("https://relay.example/f/abc", FakeTransport::ok());
        let mut form = sample_form();
        let mut statuses = Vec::new();

        let result = block_on(submitter.submit(&mut form, |s| statuses.push(s)));

        assert_eq!(result, Some(SubmitStatus::Sent));
        assert_eq!(statuses, vec![SubmitStatus::Sending, SubmitStatus::Sent]);
        assert!(form.is_blank());
        assert_eq!(form.fields().len(), 3);

        let sent = submitter.transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "https://relay.example/f/abc");
        assert_eq!(sent[0].1, sample_form().fields().to_vec());
    }

    #[test]
    fn test_failure_preserves_fields_and_reports_failed() {
        let submitter = FormSubmitter::new("https://relay.example/f/abc", FakeTransport::failing());
        let mut form = sample_form();
        let mut statuses = Vec::new();

        let result = block_on(submitter.submit(&mut form, |s| statuses.push(s)));

        assert_eq!(result, Some(SubmitStatus::Failed));
        assert_eq!(statuses, vec![SubmitStatus::Sending, SubmitStatus::Failed]);
        assert_eq!(form, sample_form());
        assert_eq!(form.value("email"), Some("ada@example.com"));
        assert!(!submitter.is_in_flight());
    }

    #[test]
    fn test_single_attempt_per_submit() {
        let submitter = FormSubmitter::new("https://relay.example", FakeTransport::failing());
        let mut form = sample_form();
        block_on(submitter.submit(&mut form, |_| {}));
        assert_eq!(submitter.transport.sent.borrow().len(), 1);
    }

    #[test]
    fn test_submit_while_in_flight_is_ignored() {
        let submitter = FormSubmitter::new("https://relay.example", FakeTransport::ok());
        submitter.in_flight.set(true);
        let mut form = sample_form();
        let mut statuses = Vec::new();

        assert_eq!(block_on(submitter.submit(&mut form, |s| statuses.push(s))), None);
        assert!(statuses.is_empty());
        assert!(submitter.transport.sent.borrow().is_empty());
    }

    fn control(name: &str, kind: &str, value: &str) -> FormControl {
        FormControl {
            name: name.into(),
            kind: kind.into(),
            value: value.into(),
            checked: false,
            disabled: false,
        }
    }

    #[test]
    fn test_unchecked_boxes_and_radios_are_left_out() {
        let form = ContactForm::from_controls([
            control("name", "text", "Ada"),
            control("newsletter", "checkbox", "yes"),
            FormControl { checked: true, ..control("terms", "checkbox", "on") },
            control("reason", "radio", "hire"),
            FormControl { checked: true, ..control("reason", "radio", "chat") },
            control("reason", "radio", "other"),
        ]);

        assert_eq!(form.fields().to_vec(), vec![
            ("name".to_string(), "Ada".to_string()),
            ("terms".to_string(), "on".to_string()),
            ("reason".to_string(), "chat".to_string()),
        ]);
    }

    #[test]
    fn test_disabled_buttons_and_files_are_left_out() {
        let form = ContactForm::from_controls([
            FormControl { disabled: true, ..control("email", "email", "ada@example.com") },
            FormControl { disabled: true, checked: true, ..control("terms", "checkbox", "on") },
            control("send", "submit", "Send"),
            control("action", "button", "go"),
            control("attachment", "file", "C:\\fakepath\\cv.pdf"),
            control("", "text", "anonymous"),
            control("message", "textarea", "Hello!"),
            control("topic", "select", "work"),
        ]);

        assert_eq!(form.fields().to_vec(), vec![
            ("message".to_string(), "Hello!".to_string()),
            ("topic".to_string(), "work".to_string()),
        ]);
    }

    #[test]
    fn test_status_messages_differ() {
        assert_ne!(SubmitStatus::Sent.message(), SubmitStatus::Failed.message());
        assert!(SubmitStatus::Failed.class_name().contains("error"));
    }
}
