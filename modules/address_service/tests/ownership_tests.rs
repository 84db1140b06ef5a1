//! Integration tests for polymorphic ownership over an in-memory database.

use std::sync::Arc;

use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use address_service::contract::{AddressError, AddressPatch, NewAddress, OwnerRef};
use address_service::domain::Service;
use address_service::infra::storage::{migrations::Migrator, SeaOrmAddressesRepository};
use mercato_query::{PageLimits, SortClause, SortDir};

fn sqlite_mem_dsn(tag: &str) -> String {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    format!("sqlite:file:address_{tag}_{now}?mode=memory&cache=shared")
}

async fn service() -> (Service, Arc<DatabaseConnection>) {
    let conn = Arc::new(
        Database::connect(sqlite_mem_dsn("ownership"))
            .await
            .unwrap(),
    );
    Migrator::up(&*conn, None).await.unwrap();
    let repo = Arc::new(SeaOrmAddressesRepository::new(conn.clone()));
    (Service::new(repo), conn)
}

fn new_address(name: &str) -> NewAddress {
    NewAddress {
        name: name.to_owned(),
        is_default: true,
        street: "Rua das Flores".to_owned(),
        neighborhood: "Centro".to_owned(),
        city: "Sao Paulo".to_owned(),
        postcode: "01310-100".to_owned(),
        state: "SP".to_owned(),
        number: Some(100),
        complement: None,
        lat: Some(-23.5613),
        lng: Some(-46.6565),
    }
}

fn limits() -> PageLimits {
    PageLimits::default()
}

#[tokio::test]
async fn create_derives_owner_columns_from_the_owner() {
    let (service, _conn) = service().await;

    let address = service
        .create(OwnerRef::User(42), new_address("home"))
        .await
        .unwrap();

    assert_eq!(address.owner, OwnerRef::User(42));
    assert_eq!(address.name.as_deref(), Some("home"));
}

#[tokio::test]
async fn same_numeric_id_under_different_owner_types_never_leaks() {
    let (service, _conn) = service().await;

    let user_addr = service
        .create(OwnerRef::User(5), new_address("user home"))
        .await
        .unwrap();
    let store_addr = service
        .create(OwnerRef::Store(5), new_address("store front"))
        .await
        .unwrap();

    // Listing scoped to one owner only sees that owner's rows
    let user_page = service
        .search(OwnerRef::User(5), vec![], vec![], 1, -1, &limits())
        .await
        .unwrap();
    assert_eq!(user_page.total, 1);
    assert_eq!(user_page.items[0].id, user_addr.id);

    let store_page = service
        .search(OwnerRef::Store(5), vec![], vec![], 1, -1, &limits())
        .await
        .unwrap();
    assert_eq!(store_page.total, 1);
    assert_eq!(store_page.items[0].id, store_addr.id);

    // Cross-type fetch of each other's rows reports not-found
    assert!(matches!(
        service.get(OwnerRef::Store(5), user_addr.id).await,
        Err(AddressError::NotFound { .. })
    ));
    assert!(matches!(
        service.get(OwnerRef::User(5), store_addr.id).await,
        Err(AddressError::NotFound { .. })
    ));
}

#[tokio::test]
async fn wrong_owner_lookup_behaves_like_missing_id() {
    let (service, _conn) = service().await;

    let address = service
        .create(OwnerRef::Store(7), new_address("warehouse"))
        .await
        .unwrap();

    // Same numeric owner id, different type
    let wrong_owner = service.get(OwnerRef::User(7), address.id).await;
    let missing_id = service.get(OwnerRef::Store(7), address.id + 1000).await;

    assert!(matches!(wrong_owner, Err(AddressError::NotFound { .. })));
    assert!(matches!(missing_id, Err(AddressError::NotFound { .. })));
}

#[tokio::test]
async fn update_and_delete_are_owner_scoped() {
    let (service, _conn) = service().await;

    let address = service
        .create(OwnerRef::User(1), new_address("home"))
        .await
        .unwrap();

    let patch = AddressPatch {
        city: Some("Campinas".to_owned()),
        ..Default::default()
    };
    assert!(matches!(
        service
            .update(OwnerRef::Store(1), address.id, patch.clone())
            .await,
        Err(AddressError::NotFound { .. })
    ));

    let updated = service
        .update(OwnerRef::User(1), address.id, patch)
        .await
        .unwrap();
    assert_eq!(updated.city, "Campinas");
    assert_eq!(updated.street, "Rua das Flores");

    assert!(matches!(
        service.delete(OwnerRef::Store(1), address.id).await,
        Err(AddressError::NotFound { .. })
    ));
    service.delete(OwnerRef::User(1), address.id).await.unwrap();
    assert!(matches!(
        service.get(OwnerRef::User(1), address.id).await,
        Err(AddressError::NotFound { .. })
    ));
}

#[tokio::test]
async fn owner_deletion_cascades_only_that_owners_addresses() {
    let (service, _conn) = service().await;

    for name in ["home", "work"] {
        service
            .create(OwnerRef::User(3), new_address(name))
            .await
            .unwrap();
    }
    service
        .create(OwnerRef::Store(3), new_address("front"))
        .await
        .unwrap();

    let deleted = service.delete_for_owner(OwnerRef::User(3)).await.unwrap();
    assert_eq!(deleted, 2);

    let store_page = service
        .search(OwnerRef::Store(3), vec![], vec![], 1, -1, &limits())
        .await
        .unwrap();
    assert_eq!(store_page.total, 1);
}

#[tokio::test]
async fn listing_composes_caller_spec_with_owner_scope() {
    let (service, _conn) = service().await;

    for i in 0..4 {
        let mut address = new_address(&format!("place {i}"));
        address.is_default = i == 0;
        service.create(OwnerRef::User(9), address).await.unwrap();
    }
    service
        .create(OwnerRef::Store(9), new_address("other"))
        .await
        .unwrap();

    let filter = mercato_query::parse_filter_spec(
        r#"[{"model":"Address","field":"is_default","op":"eq","value":false}]"#,
    )
    .unwrap();
    let sort = vec![SortClause::new("id", SortDir::Desc)];

    let page = service
        .search(OwnerRef::User(9), filter, sort, 1, 2, &limits())
        .await
        .unwrap();

    assert_eq!(page.total, 3);
    assert_eq!(page.per_page, 2);
    assert_eq!(page.num_pages, 2);
    assert_eq!(page.items.len(), 2);
    assert!(page.items[0].id > page.items[1].id);
}

#[tokio::test]
async fn bad_listing_spec_propagates_as_query_error() {
    let (service, _conn) = service().await;

    let filter = vec![mercato_query::FilterClause::eq("flavor", "mint")];
    let err = service
        .search(OwnerRef::User(1), filter, vec![], 1, 5, &limits())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AddressError::Query(mercato_query::QueryError::FieldNotFound { .. })
    ));
}
