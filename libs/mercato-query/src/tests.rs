//! End-to-end engine tests against an in-memory sqlite database.

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Set};

use crate::{
    apply_pagination, parse_filter_spec, parse_sort_spec, search_filter_sort_paginate,
    EntitySchema, FieldKind, FieldMap, FilterClause, PageLimits, QueryError, SortClause, SortDir,
};

mod segment {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "segments")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub title: String,
        pub is_active: bool,
        pub rank: i64,
        pub color: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

fn schema() -> EntitySchema<segment::Entity> {
    EntitySchema::new(
        "Segment",
        FieldMap::new()
            .insert("id", segment::Column::Id, FieldKind::I64)
            .insert("title", segment::Column::Title, FieldKind::String)
            .insert("is_active", segment::Column::IsActive, FieldKind::Bool)
            .insert("rank", segment::Column::Rank, FieldKind::I64)
            .insert("color", segment::Column::Color, FieldKind::String),
    )
}

fn limits() -> PageLimits {
    PageLimits {
        default_items_per_page: 5,
        max_items_per_page: 100,
    }
}

/// Shared-cache in-memory sqlite; a plain `sqlite::memory:` would give every
/// pooled connection its own empty database.
fn sqlite_mem_dsn(tag: &str) -> String {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    format!("sqlite:file:query_{tag}_{now}?mode=memory&cache=shared")
}

async fn connect() -> DatabaseConnection {
    let conn = Database::connect(sqlite_mem_dsn("engine")).await.unwrap();
    conn.execute_unprepared(
        "CREATE TABLE segments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            is_active INTEGER NOT NULL,
            rank INTEGER NOT NULL,
            color TEXT
        )",
    )
    .await
    .unwrap();
    conn
}

async fn seed(conn: &DatabaseConnection, count: i64) {
    use sea_orm::ActiveModelTrait;

    for i in 0..count {
        segment::ActiveModel {
            title: Set(format!("The segment title {i}")),
            is_active: Set(i % 2 == 0),
            rank: Set(i),
            color: Set(if i % 3 == 0 {
                None
            } else {
                Some("teal".to_owned())
            }),
            ..Default::default()
        }
        .insert(conn)
        .await
        .unwrap();
    }
}

#[tokio::test]
async fn ilike_filter_with_descending_sort() {
    let conn = connect().await;
    seed(&conn, 3).await;

    let filter = parse_filter_spec(
        r#"[{"model":"Segment","field":"title","op":"ilike","value":"%segment title%"}]"#,
    )
    .unwrap();
    let sort =
        parse_sort_spec(r#"[{"model":"Segment","field":"id","direction":"desc"}]"#).unwrap();

    let page = search_filter_sort_paginate(&conn, &schema(), &filter, &sort, 1, 5, &limits())
        .await
        .unwrap();

    assert_eq!(page.total, 3);
    assert_eq!(page.items[0].title, "The segment title 2");
    assert_eq!(page.items[2].title, "The segment title 0");
}

#[tokio::test]
async fn negative_page_size_is_rejected() {
    let conn = connect().await;
    seed(&conn, 3).await;

    let err = search_filter_sort_paginate(&conn, &schema(), &[], &[], 1, -5, &limits())
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::InvalidPage(_)));
}

#[tokio::test]
async fn non_positive_page_number_is_rejected() {
    let conn = connect().await;
    seed(&conn, 3).await;

    for page in [0, -1] {
        let err = search_filter_sort_paginate(&conn, &schema(), &[], &[], page, 5, &limits())
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidPage(_)));
    }
}

#[tokio::test]
async fn pagination_math_for_22_rows() {
    let conn = connect().await;
    seed(&conn, 22).await;

    let page = search_filter_sort_paginate(&conn, &schema(), &[], &[], 1, 10, &limits())
        .await
        .unwrap();
    assert_eq!(page.total, 22);
    assert_eq!(page.num_pages, 3);
    assert_eq!(page.per_page, 10);
    assert_eq!(page.items.len(), 10);

    let last = search_filter_sort_paginate(&conn, &schema(), &[], &[], 3, 10, &limits())
        .await
        .unwrap();
    assert_eq!(last.items.len(), 2);
}

#[tokio::test]
async fn zero_matches_yield_zero_pages() {
    let conn = connect().await;

    let page = search_filter_sort_paginate(&conn, &schema(), &[], &[], 1, 10, &limits())
        .await
        .unwrap();
    assert_eq!(page.total, 0);
    assert_eq!(page.num_pages, 0);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn all_pages_cover_the_total_exactly_once() {
    let conn = connect().await;
    seed(&conn, 22).await;

    let sort = vec![SortClause::new("id", SortDir::Asc)];
    let first = search_filter_sort_paginate(&conn, &schema(), &[], &sort, 1, 5, &limits())
        .await
        .unwrap();

    let mut seen = std::collections::HashSet::new();
    let mut fetched = 0usize;
    for page_number in 1..=first.num_pages {
        let page = search_filter_sort_paginate(
            &conn,
            &schema(),
            &[],
            &sort,
            page_number as i64,
            5,
            &limits(),
        )
        .await
        .unwrap();
        fetched += page.items.len();
        for item in &page.items {
            assert!(seen.insert(item.id), "row {} appeared twice", item.id);
        }
    }

    assert_eq!(fetched as u64, first.total);
}

#[tokio::test]
async fn oversized_page_size_is_silently_capped() {
    let conn = connect().await;
    seed(&conn, 22).await;

    let capped = PageLimits {
        default_items_per_page: 5,
        max_items_per_page: 10,
    };
    let sort = vec![SortClause::new("id", SortDir::Asc)];

    let above = search_filter_sort_paginate(&conn, &schema(), &[], &sort, 1, 50, &capped)
        .await
        .unwrap();
    let at_max = search_filter_sort_paginate(&conn, &schema(), &[], &sort, 1, 10, &capped)
        .await
        .unwrap();

    assert_eq!(above.per_page, 10);
    assert_eq!(above.num_pages, at_max.num_pages);
    let above_ids: Vec<i64> = above.items.iter().map(|m| m.id).collect();
    let at_max_ids: Vec<i64> = at_max.items.iter().map(|m| m.id).collect();
    assert_eq!(above_ids, at_max_ids);
}

#[tokio::test]
async fn unbounded_sentinel_returns_everything_in_one_page() {
    let conn = connect().await;
    seed(&conn, 22).await;

    let page = search_filter_sort_paginate(&conn, &schema(), &[], &[], 1, -1, &limits())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 22);
    assert_eq!(page.per_page, 22);
    assert_eq!(page.num_pages, 1);
}

#[tokio::test]
async fn unbounded_sentinel_over_empty_table() {
    let conn = connect().await;

    let page = search_filter_sort_paginate(&conn, &schema(), &[], &[], 1, -1, &limits())
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.per_page, 0);
    assert_eq!(page.num_pages, 0);
}

#[tokio::test]
async fn page_size_above_total_is_clamped_to_total() {
    let conn = connect().await;
    seed(&conn, 4).await;

    let page = search_filter_sort_paginate(&conn, &schema(), &[], &[], 1, 50, &limits())
        .await
        .unwrap();
    assert_eq!(page.per_page, 4);
    assert_eq!(page.num_pages, 1);
    assert_eq!(page.items.len(), 4);
}

#[tokio::test]
async fn page_size_zero_is_legal_and_empty() {
    let conn = connect().await;
    seed(&conn, 4).await;

    let page = search_filter_sort_paginate(&conn, &schema(), &[], &[], 1, 0, &limits())
        .await
        .unwrap();
    assert_eq!(page.per_page, 0);
    assert_eq!(page.num_pages, 0);
    assert!(page.items.is_empty());
    assert_eq!(page.total, 4);
}

#[tokio::test]
async fn unknown_field_is_never_silently_ignored() {
    let conn = connect().await;
    seed(&conn, 3).await;

    let filter = vec![FilterClause::eq("flavor", "mint")];
    let err = search_filter_sort_paginate(&conn, &schema(), &filter, &[], 1, 5, &limits())
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::FieldNotFound { .. }));

    let sort = vec![SortClause::new("flavor", SortDir::Asc)];
    let err = search_filter_sort_paginate(&conn, &schema(), &[], &sort, 1, 5, &limits())
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::FieldNotFound { .. }));
}

#[tokio::test]
async fn clause_for_another_model_never_matches() {
    let conn = connect().await;
    seed(&conn, 3).await;

    let filter =
        parse_filter_spec(r#"[{"model":"Store","field":"title","op":"eq","value":"x"}]"#).unwrap();
    let err = search_filter_sort_paginate(&conn, &schema(), &filter, &[], 1, 5, &limits())
        .await
        .unwrap_err();
    assert!(
        matches!(err, QueryError::FieldNotFound { ref model, .. } if model == "Store"),
        "got {err:?}"
    );
}

#[tokio::test]
async fn unknown_operator_is_a_filter_format_error() {
    let conn = connect().await;
    seed(&conn, 3).await;

    let filter =
        parse_filter_spec(r#"[{"field":"title","op":"between","value":"x"}]"#).unwrap();
    let err = search_filter_sort_paginate(&conn, &schema(), &filter, &[], 1, 5, &limits())
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::BadFilterFormat(_)));
}

#[tokio::test]
async fn invalid_direction_is_a_sort_format_error() {
    let conn = connect().await;
    seed(&conn, 3).await;

    let sort = parse_sort_spec(r#"[{"field":"id","direction":"sideways"}]"#).unwrap();
    let err = search_filter_sort_paginate(&conn, &schema(), &[], &sort, 1, 5, &limits())
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::BadSortFormat(_)));
}

#[test]
fn malformed_spec_strings_fail_to_decode() {
    assert!(matches!(
        parse_filter_spec("not json"),
        Err(QueryError::BadFilterFormat(_))
    ));
    assert!(matches!(
        parse_sort_spec(r#"{"field":"id"}"#),
        Err(QueryError::BadSortFormat(_))
    ));
}

#[tokio::test]
async fn value_shape_mismatch_is_a_filter_format_error() {
    let conn = connect().await;
    seed(&conn, 3).await;

    let filter = parse_filter_spec(r#"[{"field":"rank","op":"gt","value":"three"}]"#).unwrap();
    let err = search_filter_sort_paginate(&conn, &schema(), &filter, &[], 1, 5, &limits())
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::BadFilterFormat(_)));
}

#[tokio::test]
async fn clauses_combine_with_logical_and() {
    let conn = connect().await;
    seed(&conn, 10).await;

    let filter = parse_filter_spec(
        r#"[{"field":"is_active","op":"eq","value":true},
            {"field":"rank","op":"gt","value":3}]"#,
    )
    .unwrap();
    let page = search_filter_sort_paginate(&conn, &schema(), &filter, &[], 1, -1, &limits())
        .await
        .unwrap();

    // even ranks above 3: 4, 6, 8
    assert_eq!(page.total, 3);
    assert!(page.items.iter().all(|m| m.is_active && m.rank > 3));
}

#[tokio::test]
async fn in_operator_matches_the_value_set() {
    let conn = connect().await;
    seed(&conn, 10).await;

    let filter = parse_filter_spec(r#"[{"field":"rank","op":"in","value":[1,3,7]}]"#).unwrap();
    let page = search_filter_sort_paginate(&conn, &schema(), &filter, &[], 1, -1, &limits())
        .await
        .unwrap();
    assert_eq!(page.total, 3);

    let empty = parse_filter_spec(r#"[{"field":"rank","op":"in","value":[]}]"#).unwrap();
    let page = search_filter_sort_paginate(&conn, &schema(), &empty, &[], 1, -1, &limits())
        .await
        .unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn null_checks() {
    let conn = connect().await;
    seed(&conn, 9).await;

    let filter = parse_filter_spec(r#"[{"field":"color","op":"is_null"}]"#).unwrap();
    let page = search_filter_sort_paginate(&conn, &schema(), &filter, &[], 1, -1, &limits())
        .await
        .unwrap();
    // ranks 0, 3, 6
    assert_eq!(page.total, 3);

    let filter = parse_filter_spec(r#"[{"field":"color","op":"is_not_null"}]"#).unwrap();
    let page = search_filter_sort_paginate(&conn, &schema(), &filter, &[], 1, -1, &limits())
        .await
        .unwrap();
    assert_eq!(page.total, 6);

    // eq against an explicit null behaves as a null check
    let filter = parse_filter_spec(r#"[{"field":"color","op":"eq","value":null}]"#).unwrap();
    let page = search_filter_sort_paginate(&conn, &schema(), &filter, &[], 1, -1, &limits())
        .await
        .unwrap();
    assert_eq!(page.total, 3);
}

#[tokio::test]
async fn sort_clauses_compose_left_to_right() {
    let conn = connect().await;
    seed(&conn, 6).await;

    let sort = parse_sort_spec(
        r#"[{"field":"is_active","direction":"desc"},{"field":"rank","direction":"asc"}]"#,
    )
    .unwrap();
    let page = search_filter_sort_paginate(&conn, &schema(), &[], &sort, 1, -1, &limits())
        .await
        .unwrap();

    let ranks: Vec<i64> = page.items.iter().map(|m| m.rank).collect();
    // active rows (even ranks) first, each group ascending
    assert_eq!(ranks, vec![0, 2, 4, 1, 3, 5]);
}

#[tokio::test]
async fn missing_direction_defaults_to_ascending() {
    let conn = connect().await;
    seed(&conn, 4).await;

    let sort = parse_sort_spec(r#"[{"field":"rank"}]"#).unwrap();
    let page = search_filter_sort_paginate(&conn, &schema(), &[], &sort, 1, -1, &limits())
        .await
        .unwrap();
    let ranks: Vec<i64> = page.items.iter().map(|m| m.rank).collect();
    assert_eq!(ranks, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn count_runs_before_the_window_is_applied() {
    let conn = connect().await;
    seed(&conn, 8).await;

    let select = segment::Entity::find();
    let (_, info) = apply_pagination(select, &conn, Some(2), Some(3)).await.unwrap();
    assert_eq!(info.total, 8);
    assert_eq!(info.page_size, 3);
    assert_eq!(info.num_pages, 3);
    assert_eq!(info.page_number, 2);
}
