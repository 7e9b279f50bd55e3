use std::sync::Arc;

use builderbase_di::Build;
use builderbase_templates_contracts::{Template, TemplateService, TEMPLATES};
use tera::Tera;

#[derive(Debug, Clone, Build)]
pub struct TemplateServiceImpl {
    #[state]
    state: State,
}

#[derive(Debug, Clone)]
struct State(Arc<Tera>);

impl Default for State {
    fn default() -> Self {
        let mut tera = Tera::default();

        // templates are compiled into the binary and covered by the tests below
        for &(name, template) in TEMPLATES {
            tera.add_raw_template(name, template).unwrap();
        }

        Self(tera.into())
    }
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)?;
        self.state.0.render(T::NAME, &context).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use builderbase_templates_contracts::ContactEmailTemplate;

    use super::*;

    fn template() -> ContactEmailTemplate {
        ContactEmailTemplate {
            brand: "Builder Base".into(),
            name: "Ada".into(),
            email: "ada@x.com".into(),
            contact_type: "Partnership".into(),
            subject: "Hi".into(),
            message: "Hello there".into(),
            reply_url: "mailto:ada@x.com?subject=Re%3A%20Hi".into(),
            timestamp: "2024-05-01 12:00:00 UTC".into(),
        }
    }

    #[test]
    fn contact_email() {
        // Arrange
        let sut = TemplateServiceImpl {
            state: Default::default(),
        };

        // Act
        let result = sut.render(&template()).unwrap();

        // Assert
        assert!(result.contains("<strong>Name:</strong> Ada</p>"));
        assert!(result.contains("<strong>Contact Type:</strong> Partnership</p>"));
        assert!(result.contains("Hello there"));
        assert!(result.contains(r#"href="mailto:ada@x.com?subject=Re%3A%20Hi""#));
        assert!(result.contains("Reply to Ada"));
        assert!(result.contains("Timestamp: 2024-05-01 12:00:00 UTC"));
        assert!(result.contains("sent from the Builder Base contact form"));
    }

    #[test]
    fn contact_email_message_line_breaks() {
        // Arrange
        let sut = TemplateServiceImpl {
            state: Default::default(),
        };
        let template = ContactEmailTemplate {
            message: "first line\nsecond line".into(),
            ..template()
        };

        // Act
        let result = sut.render(&template).unwrap();

        // Assert
        assert!(result.contains("first line<br>second line"));
    }

    #[test]
    fn contact_email_escapes_html() {
        // Arrange
        let sut = TemplateServiceImpl {
            state: Default::default(),
        };
        let template = ContactEmailTemplate {
            name: "<b>Ada</b>".into(),
            message: "<script>alert(1)</script>".into(),
            ..template()
        };

        // Act
        let result = sut.render(&template).unwrap();

        // Assert
        assert!(!result.contains("<script>"));
        assert!(!result.contains("<b>Ada"));
        assert!(result.contains("&lt;script&gt;"));
        assert!(result.contains("&lt;b&gt;Ada"));
    }
}
