use std::{sync::Arc, time::Duration};

use builderbase_models::contact::{ContactForm, ContactNotification};
use builderbase_notify_contracts::NotifierService;
use builderbase_notify_impl::{
    http::HttpClient,
    slack::{SlackNotifier, SlackNotifierConfig},
};
use builderbase_testing::webhook::CaptureServer;
use chrono::Utc;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn delivers_blocks() {
    let server = CaptureServer::start().await.unwrap();
    let sut = make_sut(server.url("slack"));

    sut.notify(notification()).await.unwrap();

    let requests = server.requests_to("slack");
    assert_eq!(requests.len(), 1);
    let blocks = &requests[0].body["blocks"];
    assert_eq!(blocks[0]["type"], "header");
    assert_eq!(blocks[1]["fields"][0]["text"], "*Name:*\nGrace");
    assert_eq!(blocks[2]["text"]["text"], "*Subject:*\nPress kit");
    assert_eq!(
        blocks[4]["elements"][0]["url"],
        "mailto:grace@example.org?subject=Re%3A%20Press%20kit"
    );
}

#[tokio::test]
async fn error_status() {
    let server = CaptureServer::start_with(vec!["slack".into()], None)
        .await
        .unwrap();
    let sut = make_sut(server.url("slack"));

    let result = sut.notify(notification()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn unreachable() {
    let server = CaptureServer::start().await.unwrap();
    let url = server.url("slack");
    drop(server);
    tokio::time::sleep(Duration::from_millis(50)).await;
    let sut = make_sut(url);

    let result = sut.notify(notification()).await;

    assert!(result.is_err());
}

fn make_sut(webhook_url: String) -> SlackNotifier {
    SlackNotifier::new(
        HttpClient::new(Duration::from_secs(5)).unwrap(),
        SlackNotifierConfig {
            webhook_url: webhook_url.parse().unwrap(),
        },
    )
}

fn notification() -> Arc<ContactNotification> {
    ContactNotification {
        message: ContactForm {
            name: "Grace".into(),
            email: "grace@example.org".into(),
            subject: "Press kit".into(),
            message: "Could you send us your press kit?".into(),
            contact_type: Some("media".into()),
        }
        .validate()
        .unwrap(),
        received_at: Utc::now(),
    }
    .into()
}
