// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::missing_panics_doc)] // Tests panic on failure

//! Paged result sets mapped item by item.

use dtomap::pagination::{ListQuery, ListResult};
use dtomap::{Mappable, Mapper, MappingError};

#[derive(Mappable, Default, Debug, Clone, PartialEq)]
#[mapper(namespace = "rows")]
pub struct CustomerRow {
    pub id: u64,
    pub email: String,
    password_hash: String,
}

#[derive(Mappable, Default, Debug, Clone, PartialEq)]
#[mapper(namespace = "views")]
pub struct CustomerView {
    pub id: u64,
    pub email: String,
    pub password_hash: String,
}

fn rows(query: &ListQuery, total: u64) -> ListResult<CustomerRow> {
    let start = query.offset() as u64;
    let end = (start + query.limit() as u64).min(total);
    let data = (start..end)
        .map(|id| CustomerRow {
            id,
            email: format!("c{}@example.com", id),
            password_hash: "secret".into(),
        })
        .collect();
    ListResult::new(query.size, query.page, total, data)
}

#[test]
fn test_map_items_keeps_metadata() {
    let mapper = Mapper::new();
    mapper
        .create_map::<CustomerRow, CustomerView>()
        .expect("register");

    let query = ListQuery::from_query_params("4", "3");
    let page = rows(&query, 10);
    let views = page.map_items::<CustomerView>(&mapper).expect("map");

    assert_eq!(views.data.len(), 2);
    assert_eq!(views.data[0].id, 8);
    assert_eq!(views.data[1].email, "c9@example.com");
    assert!(
        views.data.iter().all(|v| v.password_hash.is_empty()),
        "private source field is not exposed"
    );

    assert_eq!(views.total_pages, page.total_pages);
    assert_eq!(views.pagination_info, page.pagination_info);
    assert!(views.is_last_page);
    assert!(!views.has_next_page);
    assert_eq!(views.previous_page, 2);
}

#[test]
fn test_map_items_empty_page() {
    let mapper = Mapper::new();
    mapper
        .create_map::<CustomerRow, CustomerView>()
        .expect("register");

    let page = rows(&ListQuery::new(5, 4), 12);
    let views = page.map_items::<CustomerView>(&mapper).expect("map");
    assert!(views.is_empty);
    assert!(views.data.is_empty());
}

#[test]
fn test_map_items_unregistered_pair_fails() {
    let mapper = Mapper::new();
    let page = rows(&ListQuery::default(), 3);

    let err = page.map_items::<CustomerView>(&mapper).unwrap_err();
    assert!(matches!(err, MappingError::MappingNotFound { .. }));
}
