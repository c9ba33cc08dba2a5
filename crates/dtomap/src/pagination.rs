// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Paginated result sets and their conversion through a [`Mapper`].
//!
//! # Example
//!
//! ```rust
//! use dtomap::pagination::{ListQuery, ListResult};
//! use dtomap::{Mappable, Mapper};
//!
//! #[derive(Mappable, Default)]
//! pub struct Row { pub id: u64 }
//!
//! #[derive(Mappable, Default, Debug, PartialEq)]
//! pub struct Item { pub id: u64 }
//!
//! let mapper = Mapper::new();
//! mapper.create_map::<Row, Item>().unwrap();
//!
//! let query = ListQuery::from_query_params("2", "1");
//! let rows = ListResult::new(query.size, query.page, 3, vec![Row { id: 1 }, Row { id: 2 }]);
//! let items = rows.map_items::<Item>(&mapper).unwrap();
//!
//! assert_eq!(items.data, vec![Item { id: 1 }, Item { id: 2 }]);
//! assert_eq!(items.total_pages, 2);
//! assert!(items.has_next_page);
//! ```

use crate::error::Result;
use crate::{Mappable, Mapper};
use std::fmt;

const DEFAULT_SIZE: usize = 10;
const DEFAULT_PAGE: usize = 1;

/// Invalid query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    InvalidParameter { name: &'static str, value: String },
}

impl fmt::Display for PaginationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { name, value } => {
                write!(f, "Invalid {} parameter: {:?}", name, value)
            }
        }
    }
}

impl std::error::Error for PaginationError {}

/// Pagination query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ListQuery {
    pub size: usize,
    pub page: usize,
    pub order_by: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE, DEFAULT_PAGE)
    }
}

impl ListQuery {
    /// Create a query for `page` (1-based) of `size` items.
    pub fn new(size: usize, page: usize) -> Self {
        Self {
            size,
            page,
            order_by: String::new(),
        }
    }

    /// Lenient parse: unparsable or zero values fall back to defaults.
    pub fn from_query_params(size: &str, page: &str) -> Self {
        let parse = |s: &str, default: usize| match s.trim().parse::<usize>() {
            Ok(0) | Err(_) => default,
            Ok(v) => v,
        };
        Self::new(parse(size, DEFAULT_SIZE), parse(page, DEFAULT_PAGE))
    }

    /// Set the size; an empty string restores the default.
    pub fn set_size(&mut self, size: &str) -> core::result::Result<(), PaginationError> {
        self.size = parse_param("size", size, DEFAULT_SIZE)?;
        Ok(())
    }

    /// Set the page; an empty string restores the default.
    pub fn set_page(&mut self, page: &str) -> core::result::Result<(), PaginationError> {
        self.page = parse_param("page", page, DEFAULT_PAGE)?;
        Ok(())
    }

    /// Set the ordering clause.
    pub fn set_order_by(&mut self, order_by: impl Into<String>) {
        self.order_by = order_by.into();
    }

    /// Number of items to skip, saturating at `usize::MAX`.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.size)
    }

    /// Number of items to take.
    pub fn limit(&self) -> usize {
        self.size
    }

    /// `size=..&page=..&orderBy=..`
    pub fn query_string(&self) -> String {
        format!(
            "size={}&page={}&orderBy={}",
            self.size, self.page, self.order_by
        )
    }
}

fn parse_param(
    name: &'static str,
    value: &str,
    default: usize,
) -> core::result::Result<usize, PaginationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(default);
    }
    value
        .parse()
        .map_err(|_| PaginationError::InvalidParameter {
            name,
            value: value.to_string(),
        })
}

/// One page of results with derived page metadata.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ListResult<T> {
    pub size: usize,
    pub page: usize,
    pub total_count: u64,
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub first_item_index: u64,
    pub last_item_index: u64,
    pub is_first_page: bool,
    pub is_last_page: bool,
    pub next_page: usize,
    pub previous_page: usize,
    pub is_empty: bool,
    pub has_single_page: bool,
    pub pagination_info: String,
    pub data: Vec<T>,
}

impl<T> ListResult<T> {
    /// Build a page and compute its metadata.
    pub fn new(size: usize, page: usize, total_count: u64, data: Vec<T>) -> Self {
        let size_u64 = size as u64;
        let page_u64 = page as u64;
        let total_pages = if size == 0 {
            0
        } else {
            total_count.div_ceil(size_u64)
        };
        let first_item_index = page_u64.saturating_sub(1).saturating_mul(size_u64);
        let last_item_index = page_u64.saturating_mul(size_u64);

        Self {
            size,
            page,
            total_count,
            total_pages,
            has_previous_page: page > 1,
            has_next_page: last_item_index < total_count,
            first_item_index,
            last_item_index,
            is_first_page: page == 1,
            is_last_page: last_item_index >= total_count,
            next_page: page.saturating_add(1),
            previous_page: page.saturating_sub(1),
            is_empty: data.is_empty(),
            has_single_page: total_pages == 1,
            pagination_info: format!(
                "Showing data {} to {} of {}",
                first_item_index.saturating_add(1),
                last_item_index,
                total_count
            ),
            data,
        }
    }

    /// Same page metadata around different items.
    fn with_data<U>(&self, data: Vec<U>) -> ListResult<U> {
        ListResult {
            size: self.size,
            page: self.page,
            total_count: self.total_count,
            total_pages: self.total_pages,
            has_previous_page: self.has_previous_page,
            has_next_page: self.has_next_page,
            first_item_index: self.first_item_index,
            last_item_index: self.last_item_index,
            is_first_page: self.is_first_page,
            is_last_page: self.is_last_page,
            next_page: self.next_page,
            previous_page: self.previous_page,
            is_empty: data.is_empty(),
            has_single_page: self.has_single_page,
            pagination_info: self.pagination_info.clone(),
            data,
        }
    }
}

impl<T: Mappable + 'static> ListResult<T> {
    /// Map every item to `D`, failing on the first error.
    pub fn map_items<D: Mappable + 'static>(&self, mapper: &Mapper) -> Result<ListResult<D>> {
        let data = self
            .data
            .iter()
            .map(|item| mapper.map::<T, D>(item))
            .collect::<Result<Vec<D>>>()?;
        Ok(self.with_data(data))
    }
}
