//! Dispatcher and worker tests with recording ports.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;

use notification_service::domain::{MailPort, QueueDispatcher, Service};
use notification_service::{
    AccountDirectory, Config, EmailJob, NotificationDispatcher, NotificationError, Recipient,
};

fn config() -> Config {
    Config {
        api_url: "https://mail.invalid/v3/send".to_owned(),
        api_key: "test-key".to_owned(),
        mail_from_email: "no-reply@mercato.local".to_owned(),
        mail_from_name: "Mercato".to_owned(),
        app_title: "Mercato".to_owned(),
        password_reset_expire_minutes: 30,
    }
}

struct StubDirectory {
    known_account: i64,
}

#[async_trait]
impl AccountDirectory for StubDirectory {
    async fn find_recipient(&self, account_id: i64) -> Result<Option<Recipient>> {
        if account_id == self.known_account {
            Ok(Some(Recipient {
                name: "Maria Silva".to_owned(),
                email: "maria@example.com".to_owned(),
            }))
        } else {
            Ok(None)
        }
    }
}

#[derive(Clone, Default)]
struct RecordingMail {
    sent: Arc<Mutex<Vec<serde_json::Value>>>,
}

#[async_trait]
impl MailPort for RecordingMail {
    async fn send(&self, payload: serde_json::Value) -> Result<()> {
        self.sent.lock().push(payload);
        Ok(())
    }
}

fn service(mail: RecordingMail) -> Arc<Service> {
    Arc::new(
        Service::new(
            Arc::new(StubDirectory { known_account: 7 }),
            Arc::new(mail),
            config(),
        )
        .unwrap(),
    )
}

#[tokio::test]
async fn password_reset_job_builds_the_delivery_payload() {
    let mail = RecordingMail::default();
    let service = service(mail.clone());

    service
        .process(EmailJob::PasswordReset {
            account_id: 7,
            url: "https://app.mercato.local/password/reset?token=abc".to_owned(),
        })
        .await
        .unwrap();

    let sent = mail.sent.lock();
    assert_eq!(sent.len(), 1);
    let payload = &sent[0];

    assert_eq!(
        payload["personalizations"][0]["to"][0]["email"],
        "maria@example.com"
    );
    assert_eq!(
        payload["personalizations"][0]["subject"],
        "Password reset notification"
    );
    assert_eq!(payload["from"]["email"], "no-reply@mercato.local");
    assert_eq!(payload["content"][0]["type"], "text/html");

    let html = payload["content"][0]["value"].as_str().unwrap();
    assert!(html.contains("https://app.mercato.local/password/reset?token=abc"));
    assert!(html.contains("Maria Silva"));
    assert!(html.contains("30 minutes"));
}

#[tokio::test]
async fn verification_job_uses_the_verification_template() {
    let mail = RecordingMail::default();
    let service = service(mail.clone());

    service
        .process(EmailJob::EmailVerification {
            account_id: 7,
            url: "https://app.mercato.local/verify/7/sig".to_owned(),
        })
        .await
        .unwrap();

    let sent = mail.sent.lock();
    let payload = &sent[0];
    assert_eq!(
        payload["personalizations"][0]["subject"],
        "Check email address"
    );
    let html = payload["content"][0]["value"].as_str().unwrap();
    assert!(html.contains("Confirm your email address"));
}

#[tokio::test]
async fn unknown_recipient_fails_the_job_without_sending() {
    let mail = RecordingMail::default();
    let service = service(mail.clone());

    let err = service
        .process(EmailJob::PasswordReset {
            account_id: 404,
            url: "https://app.mercato.local/x".to_owned(),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        NotificationError::RecipientNotFound { account_id: 404 }
    ));
    assert!(mail.sent.lock().is_empty());
}

#[tokio::test]
async fn dispatch_returns_immediately_and_the_worker_delivers() {
    let mail = RecordingMail::default();
    let service = service(mail.clone());

    let (dispatcher, worker) = QueueDispatcher::new(service);
    let handle = tokio::spawn(worker.run());

    let job_id = dispatcher
        .dispatch(EmailJob::EmailVerification {
            account_id: 7,
            url: "https://app.mercato.local/verify/7/sig".to_owned(),
        })
        .unwrap();
    assert!(!job_id.is_nil());

    // Dropping the only dispatcher lets the worker drain and stop
    drop(dispatcher);
    handle.await.unwrap();

    assert_eq!(mail.sent.lock().len(), 1);
}

#[tokio::test]
async fn worker_keeps_running_after_a_failed_job() {
    let mail = RecordingMail::default();
    let service = service(mail.clone());

    let (dispatcher, worker) = QueueDispatcher::new(service);
    let handle = tokio::spawn(worker.run());

    dispatcher
        .dispatch(EmailJob::PasswordReset {
            account_id: 404,
            url: "https://app.mercato.local/x".to_owned(),
        })
        .unwrap();
    dispatcher
        .dispatch(EmailJob::PasswordReset {
            account_id: 7,
            url: "https://app.mercato.local/y".to_owned(),
        })
        .unwrap();

    drop(dispatcher);
    handle.await.unwrap();

    // The bad job was logged and dropped, the good one still went out
    assert_eq!(mail.sent.lock().len(), 1);
}
