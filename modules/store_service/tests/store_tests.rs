//! Integration tests for the marketplace over an in-memory database.

use std::sync::Arc;

use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use account_service::contract::{Account, NewAccount};
use address_service::contract::{AddressError, NewAddress, OwnerRef};
use mercato_query::{parse_filter_spec, parse_sort_spec, PageLimits};
use notification_service::{EmailJob, JobId, NotificationDispatcher, NotificationError};
use store_service::contract::{DocumentType, NewSegment, NewStore, SegmentPatch, StoreError};
use store_service::domain::Service;
use store_service::infra::storage::{SeaOrmSegmentsRepository, SeaOrmStoresRepository};

struct NullDispatcher;

impl NotificationDispatcher for NullDispatcher {
    fn dispatch(&self, _job: EmailJob) -> Result<JobId, NotificationError> {
        Ok(JobId::new_v4())
    }
}

struct Harness {
    accounts: account_service::domain::Service,
    stores: Service,
    addresses: Arc<address_service::domain::Service>,
    _conn: Arc<DatabaseConnection>,
}

fn sqlite_mem_dsn(tag: &str) -> String {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    format!("sqlite:file:store_{tag}_{now}?mode=memory&cache=shared")
}

async fn harness() -> Harness {
    let conn = Arc::new(Database::connect(sqlite_mem_dsn("marketplace")).await.unwrap());
    account_service::infra::storage::migrations::Migrator::up(&*conn, None)
        .await
        .unwrap();
    address_service::infra::storage::migrations::Migrator::up(&*conn, None)
        .await
        .unwrap();
    store_service::infra::storage::migrations::Migrator::up(&*conn, None)
        .await
        .unwrap();

    let addresses = Arc::new(address_service::domain::Service::new(Arc::new(
        address_service::infra::storage::SeaOrmAddressesRepository::new(conn.clone()),
    )));

    let accounts = account_service::domain::Service::new(
        Arc::new(account_service::infra::storage::SeaOrmUsersRepository::new(
            conn.clone(),
        )),
        Arc::new(
            account_service::infra::storage::SeaOrmPasswordResetsRepository::new(conn.clone()),
        ),
        addresses.clone(),
        Arc::new(NullDispatcher),
        account_service::Config {
            email_verify_enabled: false,
            password_reset_expire_minutes: 30,
            public_url: "http://testserver".to_owned(),
        },
    );

    let stores = Service::new(
        Arc::new(SeaOrmSegmentsRepository::new(conn.clone())),
        Arc::new(SeaOrmStoresRepository::new(conn.clone())),
        addresses.clone(),
    );

    Harness {
        accounts,
        stores,
        addresses,
        _conn: conn,
    }
}

async fn register_user(h: &Harness, tag: &str) -> Account {
    h.accounts
        .register(NewAccount {
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
        })
        .await
        .unwrap()
}

fn new_segment(title: &str) -> NewSegment {
    NewSegment {
        title: title.to_owned(),
        is_active: true,
        image: None,
        color: Some("teal".to_owned()),
    }
}

fn new_store(tag: &str, segment_id: i64) -> NewStore {
    NewStore {
        title: format!("Store {tag}"),
        legal: format!("Store {tag} Ltda"),
        phones: None,
        information: None,
        automatic_accept: false,
        document_type: DocumentType::Cnpj,
        document_number: format!("cnpj-{tag}"),
        segment_id,
        image: None,
        background_image: None,
        addresses: Vec::new(),
    }
}

fn store_address(name: &str) -> NewAddress {
    NewAddress {
        name: name.to_owned(),
        is_default: true,
        street: "Avenida Paulista".to_owned(),
        neighborhood: "Bela Vista".to_owned(),
        city: "Sao Paulo".to_owned(),
        postcode: "01311-000".to_owned(),
        state: "SP".to_owned(),
        number: Some(1000),
        complement: None,
        lat: None,
        lng: None,
    }
}

fn limits() -> PageLimits {
    PageLimits::default()
}

#[tokio::test]
async fn segment_listing_with_ilike_filter_and_descending_sort() {
    let h = harness().await;
    for i in 0..3 {
        h.stores
            .create_segment(new_segment(&format!("The segment title {i}")))
            .await
            .unwrap();
    }

    let filter = parse_filter_spec(
        r#"[{"model":"Segment","field":"title","op":"ilike","value":"%segment title%"}]"#,
    )
    .unwrap();
    let sort = parse_sort_spec(r#"[{"model":"Segment","field":"id","direction":"desc"}]"#).unwrap();

    let page = h
        .stores
        .search_segments(filter, sort, 1, limits().default_items_per_page, &limits())
        .await
        .unwrap();

    assert_eq!(page.total, 3);
    assert_eq!(page.items[0].title, "The segment title 2");
}

#[tokio::test]
async fn segment_titles_are_checked_for_uniqueness() {
    let h = harness().await;
    let pets = h.stores.create_segment(new_segment("Pets")).await.unwrap();
    let food = h.stores.create_segment(new_segment("Food")).await.unwrap();

    let err = h.stores.create_segment(new_segment("Pets")).await.unwrap_err();
    let StoreError::Conflict { fields } = err else {
        panic!("expected a conflict");
    };
    assert_eq!(fields, vec!["title"]);

    // Renaming over another segment's title conflicts, keeping one's own does not
    let err = h
        .stores
        .update_segment(
            food.id,
            SegmentPatch {
                title: Some("Pets".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict { .. }));

    let kept = h
        .stores
        .update_segment(
            pets.id,
            SegmentPatch {
                title: Some("Pets".to_owned()),
                color: Some("amber".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(kept.color.as_deref(), Some("amber"));
}

#[tokio::test]
async fn store_creation_grants_ownership_and_flags_conflicts() {
    let h = harness().await;
    let owner = register_user(&h, "maria").await;
    let other = register_user(&h, "joao").await;
    let segment = h.stores.create_segment(new_segment("Pets")).await.unwrap();

    let store = h
        .stores
        .create_store(&owner, new_store("petland", segment.id))
        .await
        .unwrap();
    assert!(store.is_active);
    assert_eq!(store.segment_id, Some(segment.id));

    // Every conflicting unique field is listed at once
    let err = h
        .stores
        .create_store(&other, new_store("petland", segment.id))
        .await
        .unwrap_err();
    let StoreError::Conflict { fields } = err else {
        panic!("expected a conflict");
    };
    assert_eq!(fields, vec!["title", "legal", "document_number"]);

    // Mutations are owner-or-admin gated
    let err = h
        .stores
        .update_store(
            &other,
            store.id,
            store_service::contract::StorePatch {
                title: Some("Taken Over".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Forbidden));

    let mut admin = other.clone();
    admin.is_admin = true;
    let updated = h
        .stores
        .update_store(
            &admin,
            store.id,
            store_service::contract::StorePatch {
                title: Some("Pet Paradise".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Pet Paradise");
}

#[tokio::test]
async fn store_creation_requires_an_existing_segment() {
    let h = harness().await;
    let owner = register_user(&h, "maria").await;

    let err = h
        .stores
        .create_store(&owner, new_store("petland", 999))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation { .. }));
}

#[tokio::test]
async fn store_addresses_are_scoped_to_the_store_owner_type() {
    let h = harness().await;
    let owner = register_user(&h, "maria").await;
    let segment = h.stores.create_segment(new_segment("Pets")).await.unwrap();
    let store = h
        .stores
        .create_store(&owner, new_store("petland", segment.id))
        .await
        .unwrap();

    let address = h
        .stores
        .create_store_address(&owner, store.id, store_address("front"))
        .await
        .unwrap();

    // The same numeric id under the user scope reports not-found
    assert!(matches!(
        h.addresses.get(OwnerRef::User(store.id), address.id).await,
        Err(AddressError::NotFound { .. })
    ));

    // Under the store scope it resolves
    let found = h
        .stores
        .get_store_address(store.id, address.id)
        .await
        .unwrap();
    assert_eq!(found.id, address.id);

    // Non-owners cannot mutate store addresses
    let other = register_user(&h, "joao").await;
    assert!(matches!(
        h.stores
            .delete_store_address(&other, store.id, address.id)
            .await,
        Err(StoreError::Forbidden)
    ));
}

#[tokio::test]
async fn inline_store_addresses_are_created_under_the_store() {
    let h = harness().await;
    let owner = register_user(&h, "maria").await;
    let segment = h.stores.create_segment(new_segment("Pets")).await.unwrap();

    let mut request = new_store("petland", segment.id);
    request.addresses.push(store_address("front"));
    request.addresses.push(store_address("warehouse"));

    let store = h.stores.create_store(&owner, request).await.unwrap();

    let page = h
        .stores
        .list_store_addresses(store.id, vec![], vec![], 1, -1, &limits())
        .await
        .unwrap();
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn deleting_a_store_cascades_membership_and_addresses() {
    let h = harness().await;
    let owner = register_user(&h, "maria").await;
    let segment = h.stores.create_segment(new_segment("Pets")).await.unwrap();

    let mut request = new_store("petland", segment.id);
    request.addresses.push(store_address("front"));
    let store = h.stores.create_store(&owner, request).await.unwrap();

    h.stores.delete_store(&owner, store.id).await.unwrap();

    assert!(matches!(
        h.stores.get_store(store.id).await,
        Err(StoreError::NotFound { .. })
    ));
    let page = h
        .addresses
        .search(store.owner_ref(), vec![], vec![], 1, -1, &limits())
        .await
        .unwrap();
    assert_eq!(page.total, 0);

    // The unique document number is free again
    h.stores
        .create_store(&owner, new_store("petland", segment.id))
        .await
        .unwrap();
}

#[tokio::test]
async fn store_listing_is_paginated_through_the_engine() {
    let h = harness().await;
    let owner = register_user(&h, "maria").await;
    let segment = h.stores.create_segment(new_segment("Pets")).await.unwrap();

    for i in 0..7 {
        h.stores
            .create_store(&owner, new_store(&format!("shop-{i}"), segment.id))
            .await
            .unwrap();
    }

    let sort = parse_sort_spec(r#"[{"field":"id","direction":"asc"}]"#).unwrap();
    let page = h
        .stores
        .search_stores(vec![], sort, 2, 3, &limits())
        .await
        .unwrap();

    assert_eq!(page.total, 7);
    assert_eq!(page.num_pages, 3);
    assert_eq!(page.items.len(), 3);
    assert_eq!(page.page, 2);
}
