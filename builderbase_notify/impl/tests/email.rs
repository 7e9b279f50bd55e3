use std::{sync::Arc, time::Duration};

use builderbase_di::{provider, Provide};
use builderbase_models::contact::{ContactForm, ContactNotification};
use builderbase_notify_contracts::NotifierService;
use builderbase_notify_impl::{
    email::{EmailNotifier, EmailNotifierConfig},
    http::HttpClient,
};
use builderbase_templates_impl::TemplateServiceImpl;
use builderbase_testing::webhook::CaptureServer;
use chrono::Utc;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn sends_email() {
    let server = CaptureServer::start().await.unwrap();
    let sut = make_sut(&server);

    sut.notify(notification()).await.unwrap();

    let requests = server.requests_to("email");
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.headers["authorization"], "Bearer test-api-key");

    let body = &request.body;
    assert_eq!(body["to"][0], "founder@builderbase.xyz");
    assert_eq!(body["subject"], "New Contact Form: Let's build <together>");
    assert_eq!(body["reply_to"], "ada@x.com");

    let html = body["html"].as_str().unwrap();
    assert!(html.contains("Ada"));
    assert!(html.contains("Let&#x27;s build &lt;together&gt;"));
    assert!(html.contains("First line<br>Second line"));
    assert!(html.contains("Collaboration"));
}

#[tokio::test]
async fn error_status() {
    let server = CaptureServer::start_with(vec!["email".into()], None)
        .await
        .unwrap();
    let sut = make_sut(&server);

    let result = sut.notify(notification()).await;

    let err = result.unwrap_err().to_string();
    assert!(err.contains("500"), "{err}");
    assert!(err.contains("destination unavailable"), "{err}");
}

fn make_sut(server: &CaptureServer) -> EmailNotifier<TemplateServiceImpl> {
    provider! {
        Provider {}
    }

    let mut provider = Provider {
        _cache: Default::default(),
    };

    EmailNotifier::new(
        HttpClient::new(Duration::from_secs(5)).unwrap(),
        provider.provide(),
        EmailNotifierConfig::new(
            Some(server.url("email").parse().unwrap()),
            "test-api-key".to_owned().into(),
            "Builder Base <noreply@builderbase.xyz>".parse().unwrap(),
            vec!["founder@builderbase.xyz".parse().unwrap()],
            "Builder Base".into(),
        ),
    )
}

fn notification() -> Arc<ContactNotification> {
    ContactNotification {
        message: ContactForm {
            name: "Ada".into(),
            email: "ada@x.com".into(),
            subject: "Let's build <together>".into(),
            message: "First line\nSecond line".into(),
            contact_type: Some("collaboration".into()),
        }
        .validate()
        .unwrap(),
        received_at: Utc::now(),
    }
    .into()
}
