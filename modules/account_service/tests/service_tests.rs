//! Integration tests for the account service over an in-memory database,
//! with a recording notification dispatcher.

use std::sync::Arc;

use parking_lot::Mutex;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use account_service::contract::{AccountError, AccountPatch, NewAccount};
use account_service::domain::Service;
use account_service::infra::storage::{
    SeaOrmPasswordResetsRepository, SeaOrmUsersRepository,
};
use account_service::Config;
use address_service::contract::NewAddress;
use mercato_query::PageLimits;
use notification_service::{EmailJob, JobId, NotificationDispatcher, NotificationError};

#[derive(Clone, Default)]
struct RecordingDispatcher {
    jobs: Arc<Mutex<Vec<EmailJob>>>,
}

impl RecordingDispatcher {
    fn last(&self) -> EmailJob {
        self.jobs.lock().last().cloned().unwrap()
    }

    fn count(&self) -> usize {
        self.jobs.lock().len()
    }
}

impl NotificationDispatcher for RecordingDispatcher {
    fn dispatch(&self, job: EmailJob) -> Result<JobId, NotificationError> {
        self.jobs.lock().push(job);
        Ok(JobId::new_v4())
    }
}

struct Harness {
    service: Service,
    addresses: Arc<address_service::domain::Service>,
    dispatcher: RecordingDispatcher,
    _conn: Arc<DatabaseConnection>,
}

fn sqlite_mem_dsn(tag: &str) -> String {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    format!("sqlite:file:account_{tag}_{now}?mode=memory&cache=shared")
}

async fn harness_with(config: Config) -> Harness {
    let conn = Arc::new(Database::connect(sqlite_mem_dsn("service")).await.unwrap());
    account_service::infra::storage::migrations::Migrator::up(&*conn, None)
        .await
        .unwrap();
    address_service::infra::storage::migrations::Migrator::up(&*conn, None)
        .await
        .unwrap();

    let users = Arc::new(SeaOrmUsersRepository::new(conn.clone()));
    let resets = Arc::new(SeaOrmPasswordResetsRepository::new(conn.clone()));
    let addresses = Arc::new(address_service::domain::Service::new(Arc::new(
        address_service::infra::storage::SeaOrmAddressesRepository::new(conn.clone()),
    )));
    let dispatcher = RecordingDispatcher::default();

    let service = Service::new(
        users,
        resets,
        addresses.clone(),
        Arc::new(dispatcher.clone()),
        config,
    );

    Harness {
        service,
        addresses,
        dispatcher,
        _conn: conn,
    }
}

async fn harness() -> Harness {
    harness_with(Config {
        email_verify_enabled: true,
        password_reset_expire_minutes: 30,
        public_url: "http://testserver".to_owned(),
    })
    .await
}

fn new_account(tag: &str) -> NewAccount {
    NewAccount {
        name: format!("User {tag}"),
        email: format!("{tag}@example.com"),
        nickname: tag.to_owned(),
        document_number: format!("doc-{tag}"),
        password: "initial-pass".to_owned(),
        phones: None,
        avatar: None,
        external_data: None,
        birthdate: None,
        is_celebrity: false,
        accept_legal_term: true,
        addresses: Vec::new(),
    }
}

fn home_address() -> NewAddress {
    NewAddress {
        name: "home".to_owned(),
        is_default: true,
        street: "Rua das Flores".to_owned(),
        neighborhood: "Centro".to_owned(),
        city: "Sao Paulo".to_owned(),
        postcode: "01310-100".to_owned(),
        state: "SP".to_owned(),
        number: Some(42),
        complement: None,
        lat: None,
        lng: None,
    }
}

#[tokio::test]
async fn registration_creates_the_account_and_queues_verification() {
    let h = harness().await;

    let mut request = new_account("maria");
    request.addresses.push(home_address());

    let account = h.service.register(request).await.unwrap();

    assert_eq!(account.email, "maria@example.com");
    assert!(!account.is_admin);
    assert!(account.email_verified_at.is_none());
    assert_ne!(account.password_hash, "initial-pass");

    // Verification email queued with the signed URL
    let EmailJob::EmailVerification { account_id, url } = h.dispatcher.last() else {
        panic!("expected a verification job");
    };
    assert_eq!(account_id, account.id);
    assert!(url.starts_with(&format!(
        "http://testserver/account/accounts/verify/{}/",
        account.id
    )));

    // Inline address landed under the new account
    let page = h
        .addresses
        .search(
            account.owner_ref(),
            vec![],
            vec![],
            1,
            -1,
            &PageLimits::default(),
        )
        .await
        .unwrap();
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn duplicate_registration_lists_every_conflicting_field() {
    let h = harness().await;
    h.service.register(new_account("maria")).await.unwrap();

    let err = h.service.register(new_account("maria")).await.unwrap_err();
    let AccountError::Conflict { fields } = err else {
        panic!("expected a conflict");
    };
    assert_eq!(fields, vec!["email", "nickname", "document_number"]);

    // A single overlapping field is reported alone
    let mut request = new_account("second");
    request.email = "maria@example.com".to_owned();
    let err = h.service.register(request).await.unwrap_err();
    let AccountError::Conflict { fields } = err else {
        panic!("expected a conflict");
    };
    assert_eq!(fields, vec!["email"]);
}

#[tokio::test]
async fn disabled_verification_creates_verified_accounts_silently() {
    let h = harness_with(Config {
        email_verify_enabled: false,
        password_reset_expire_minutes: 30,
        public_url: "http://testserver".to_owned(),
    })
    .await;

    let account = h.service.register(new_account("maria")).await.unwrap();

    assert!(account.is_verified());
    assert_eq!(h.dispatcher.count(), 0);
}

#[tokio::test]
async fn authentication_never_reveals_which_part_was_wrong() {
    let h = harness().await;
    h.service.register(new_account("maria")).await.unwrap();

    let account = h
        .service
        .authenticate("maria@example.com", "initial-pass")
        .await
        .unwrap();
    assert_eq!(account.nickname, "maria");

    assert!(matches!(
        h.service
            .authenticate("maria@example.com", "wrong-pass")
            .await,
        Err(AccountError::InvalidCredentials)
    ));
    assert!(matches!(
        h.service.authenticate("ghost@example.com", "initial-pass").await,
        Err(AccountError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn email_verification_accepts_only_the_signed_link() {
    let h = harness().await;
    let account = h.service.register(new_account("maria")).await.unwrap();

    let EmailJob::EmailVerification { url, .. } = h.dispatcher.last() else {
        panic!("expected a verification job");
    };
    let signature = url.rsplit('/').next().unwrap().to_owned();

    assert!(matches!(
        h.service.verify_email(account.id, "bad-signature").await,
        Err(AccountError::InvalidSignature)
    ));

    let verified = h.service.verify_email(account.id, &signature).await.unwrap();
    assert!(verified.is_verified());

    // Stale links stay harmless
    let again = h.service.verify_email(account.id, &signature).await.unwrap();
    assert!(again.is_verified());
}

#[tokio::test]
async fn resending_verification_requires_an_unverified_account() {
    let h = harness().await;
    let account = h.service.register(new_account("maria")).await.unwrap();

    h.service
        .resend_verification_email(&account)
        .await
        .unwrap();
    assert_eq!(h.dispatcher.count(), 2);

    let EmailJob::EmailVerification { url, .. } = h.dispatcher.last() else {
        panic!("expected a verification job");
    };
    let signature = url.rsplit('/').next().unwrap().to_owned();
    let verified = h.service.verify_email(account.id, &signature).await.unwrap();

    assert!(matches!(
        h.service.resend_verification_email(&verified).await,
        Err(AccountError::Validation { .. })
    ));
}

#[tokio::test]
async fn password_reset_round_trip() {
    let h = harness().await;
    let account = h.service.register(new_account("maria")).await.unwrap();

    h.service
        .request_password_reset(&account.email)
        .await
        .unwrap();

    let EmailJob::PasswordReset { url, account_id } = h.dispatcher.last() else {
        panic!("expected a reset job");
    };
    assert_eq!(account_id, account.id);
    let token = url.split("token=").nth(1).unwrap().to_owned();

    // Wrong token is rejected
    assert!(matches!(
        h.service
            .reset_password(&account.email, "bogus", "new-pass")
            .await,
        Err(AccountError::InvalidResetToken)
    ));

    h.service
        .reset_password(&account.email, &token, "new-pass")
        .await
        .unwrap();

    h.service
        .authenticate(&account.email, "new-pass")
        .await
        .unwrap();
    assert!(matches!(
        h.service.authenticate(&account.email, "initial-pass").await,
        Err(AccountError::InvalidCredentials)
    ));

    // The token is consumed
    assert!(matches!(
        h.service
            .reset_password(&account.email, &token, "newer-pass")
            .await,
        Err(AccountError::InvalidResetToken)
    ));
}

#[tokio::test]
async fn password_reset_for_unknown_email_is_silent() {
    let h = harness().await;

    h.service
        .request_password_reset("ghost@example.com")
        .await
        .unwrap();

    assert_eq!(h.dispatcher.count(), 0);
}

#[tokio::test]
async fn expired_reset_tokens_are_rejected() {
    let h = harness_with(Config {
        email_verify_enabled: false,
        password_reset_expire_minutes: -5,
        public_url: "http://testserver".to_owned(),
    })
    .await;
    let account = h.service.register(new_account("maria")).await.unwrap();

    h.service
        .request_password_reset(&account.email)
        .await
        .unwrap();
    let EmailJob::PasswordReset { url, .. } = h.dispatcher.last() else {
        panic!("expected a reset job");
    };
    let token = url.split("token=").nth(1).unwrap().to_owned();

    assert!(matches!(
        h.service
            .reset_password(&account.email, &token, "new-pass")
            .await,
        Err(AccountError::InvalidResetToken)
    ));
}

#[tokio::test]
async fn update_rechecks_uniqueness_excluding_the_account_itself() {
    let h = harness().await;
    let maria = h.service.register(new_account("maria")).await.unwrap();
    h.service.register(new_account("joao")).await.unwrap();

    // Taking another account's nickname conflicts
    let err = h
        .service
        .update(
            &maria,
            AccountPatch {
                nickname: Some("joao".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::Conflict { .. }));

    // Re-submitting the account's own unique values does not
    let updated = h
        .service
        .update(
            &maria,
            AccountPatch {
                email: Some(maria.email.clone()),
                name: Some("Maria Renamed".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Maria Renamed");

    // A password change re-hashes
    let updated = h
        .service
        .update(
            &maria,
            AccountPatch {
                password: Some("rotated-pass".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_ne!(updated.password_hash, maria.password_hash);
    h.service
        .authenticate(&maria.email, "rotated-pass")
        .await
        .unwrap();
}

#[tokio::test]
async fn deleting_an_account_cascades_its_addresses() {
    let h = harness().await;
    let mut request = new_account("maria");
    request.addresses.push(home_address());
    let account = h.service.register(request).await.unwrap();

    h.service.delete(&account).await.unwrap();

    assert!(matches!(
        h.service.get(account.id).await,
        Err(AccountError::NotFound { .. })
    ));
    let page = h
        .addresses
        .search(
            account.owner_ref(),
            vec![],
            vec![],
            1,
            -1,
            &PageLimits::default(),
        )
        .await
        .unwrap();
    assert_eq!(page.total, 0);
}
