use mail_integration::OutboundEmail;
use shared::{protocol::SubmissionRequest, validation::trim_input};
use tera::{Context, Tera};

const HTML_TEMPLATE_NAME: &str = "contact.html";
const TEXT_TEMPLATE_NAME: &str = "contact.txt";

const HTML_TEMPLATE: &str = r#"<div style="font-family: Arial, sans-serif; line-height: 1.6; color: #0f172a;">
  <h2>{{ heading }}</h2>
  <p><strong>Name:</strong> {{ name }}</p>
  <p><strong>Email:</strong> {{ email }}</p>
  <p><strong>Subject:</strong> {{ subject }}</p>
  <p><strong>Message:</strong></p>
  <p style="white-space: pre-wrap;">{{ message }}</p>
</div>
"#;

const TEXT_TEMPLATE: &str = "{{ heading }}

Name: {{ name }}
Email: {{ email }}
Subject: {{ subject }}

Message:
{{ message }}
";

pub const DEFAULT_MAIL_FROM: &str = "Portfolio Contact <onboarding@resend.dev>";
pub const DEFAULT_MAIL_TO: &str = "owner@example.com";
pub const DEFAULT_SUBJECT_TAG: &str = "New Portfolio Contact";

/// Fixed addressing for every contact email. Comes from configuration, never from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub from: String,
    pub to: String,
    /// Literal tag prefixed to the submitted subject and used as the body heading.
    pub subject_tag: String,
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            from: DEFAULT_MAIL_FROM.into(),
            to: DEFAULT_MAIL_TO.into(),
            subject_tag: DEFAULT_SUBJECT_TAG.into(),
        }
    }
}

/// Renders a validated submission into an [`OutboundEmail`].
///
/// The HTML template is registered under an `.html` name so tera escapes
/// every interpolated value; the text body is left verbatim.
#[derive(Debug, Clone)]
pub struct EmailComposer {
    envelope: Envelope,
    tera: Tera,
}

impl EmailComposer {
    pub fn new(envelope: Envelope) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (HTML_TEMPLATE_NAME, HTML_TEMPLATE),
            (TEXT_TEMPLATE_NAME, TEXT_TEMPLATE),
        ])?;
        Ok(Self { envelope, tera })
    }

    pub fn compose(&self, submission: &SubmissionRequest) -> Result<OutboundEmail, tera::Error> {
        let name = trim_input(&submission.name);
        let email = trim_input(&submission.email);
        let subject = trim_input(&submission.subject);
        let message = trim_input(&submission.message);

        let mut context = Context::new();
        context.insert("heading", &self.envelope.subject_tag);
        context.insert("name", name);
        context.insert("email", email);
        context.insert("subject", subject);
        context.insert("message", message);

        Ok(OutboundEmail {
            from: self.envelope.from.clone(),
            to: vec![self.envelope.to.clone()],
            reply_to: email.to_string(),
            subject: format!("{}: {subject}", self.envelope.subject_tag),
            html: self.tera.render(HTML_TEMPLATE_NAME, &context)?,
            text: self.tera.render(TEXT_TEMPLATE_NAME, &context)?,
        })
    }
}

#[cfg(test)]
#[path = "tests/compose_tests.rs"]
mod tests;
