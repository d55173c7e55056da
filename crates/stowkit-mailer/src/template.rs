//! Placeholder templating for outgoing email
//!
//! Not a template engine: `render` substitutes `{{key}}` markers with the
//! provided values and leaves unknown markers intact. Rendering is pure
//! string work.

use crate::mailer::OutgoingEmail;

/// An email template with `{{placeholder}}` markers
#[derive(Debug, Clone)]
pub struct EmailTemplate {
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

impl EmailTemplate {
    pub fn new(subject: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            text: text.into(),
            html: None,
        }
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Substitute `{{key}}` markers in the subject and both bodies.
    pub fn render(&self, values: &[(&str, &str)]) -> Self {
        Self {
            subject: substitute(&self.subject, values),
            text: substitute(&self.text, values),
            html: self.html.as_ref().map(|html| substitute(html, values)),
        }
    }

    /// Build an outgoing email for `to` from this template.
    pub fn into_email(self, to: Vec<String>) -> OutgoingEmail {
        OutgoingEmail {
            to,
            subject: self.subject,
            text_body: self.text,
            html_body: self.html,
        }
    }
}

fn substitute(input: &str, values: &[(&str, &str)]) -> String {
    let mut output = input.to_string();
    for (key, value) in values {
        output = output.replace(&format!("{{{{{}}}}}", key), value);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_placeholders() {
        let template = EmailTemplate::new(
            "Welcome, {{name}}!",
            "Hello {{name}}, your workspace {{workspace}} is ready.",
        );

        let rendered = template.render(&[("name", "Ada"), ("workspace", "research")]);

        assert_eq!(rendered.subject, "Welcome, Ada!");
        assert_eq!(
            rendered.text,
            "Hello Ada, your workspace research is ready."
        );
    }

    #[test]
    fn render_replaces_every_occurrence() {
        let template = EmailTemplate::new("{{x}} and {{x}}", "{{x}}, {{x}}, {{x}}");
        let rendered = template.render(&[("x", "y")]);

        assert_eq!(rendered.subject, "y and y");
        assert_eq!(rendered.text, "y, y, y");
    }

    #[test]
    fn render_leaves_unknown_placeholders_intact() {
        let template = EmailTemplate::new("Hi {{name}}", "Balance: {{balance}}");
        let rendered = template.render(&[("name", "Ada")]);

        assert_eq!(rendered.subject, "Hi Ada");
        assert_eq!(rendered.text, "Balance: {{balance}}");
    }

    #[test]
    fn render_covers_the_html_body() {
        let template = EmailTemplate::new("Subject", "text {{k}}")
            .with_html("<p>html {{k}}</p>");
        let rendered = template.render(&[("k", "v")]);

        assert_eq!(rendered.text, "text v");
        assert_eq!(rendered.html.as_deref(), Some("<p>html v</p>"));
    }

    #[test]
    fn into_email_maps_template_fields() {
        let email = EmailTemplate::new("Subject", "Body")
            .with_html("<p>Body</p>")
            .into_email(vec!["ops@example.com".to_string()]);

        assert_eq!(email.to, vec!["ops@example.com".to_string()]);
        assert_eq!(email.subject, "Subject");
        assert_eq!(email.text_body, "Body");
        assert_eq!(email.html_body.as_deref(), Some("<p>Body</p>"));
    }
}
