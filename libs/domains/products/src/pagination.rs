//! Page requests parsed from the query string and the metadata derived for each page.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

use crate::error::{ProductError, ProductResult};

pub const DEFAULT_LIMIT: u32 = 10;
pub const DEFAULT_PAGE: u32 = 1;

/// Path that pagination links point at
pub const PRODUCTS_PATH: &str = "/api/products";

/// Price ordering for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Raw query string for `GET /api/products`.
///
/// Kept as strings so malformed values surface as a 400 with a useful message
/// instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Page size, positive integer (default 10)
    pub limit: Option<String>,
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// `asc` or `desc` by price
    pub sort: Option<String>,
}

/// A validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    limit: u32,
    page: u32,
    sort: Option<SortOrder>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
            sort: None,
        }
    }
}

impl PageRequest {
    pub fn new(limit: u32, page: u32, sort: Option<SortOrder>) -> ProductResult<Self> {
        if limit == 0 {
            return Err(positive_integer("limit"));
        }
        if page == 0 {
            return Err(positive_integer("page"));
        }
        Ok(Self { limit, page, sort })
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn sort(&self) -> Option<SortOrder> {
        self.sort
    }

    /// Documents to skip: `(page - 1) * limit`
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl TryFrom<ListQuery> for PageRequest {
    type Error = ProductError;

    fn try_from(query: ListQuery) -> ProductResult<Self> {
        let limit = parse_positive("limit", query.limit.as_deref(), DEFAULT_LIMIT)?;
        let page = parse_positive("page", query.page.as_deref(), DEFAULT_PAGE)?;
        let sort = match query.sort.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<SortOrder>().map_err(|_| {
                ProductError::InvalidParameter(format!(
                    "El parámetro 'sort' debe ser 'asc' o 'desc' (recibido '{raw}')"
                ))
            })?),
        };
        Self::new(limit, page, sort)
    }
}

fn parse_positive(name: &str, raw: Option<&str>, default: u32) -> ProductResult<u32> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => match value.parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(positive_integer(name)),
        },
    }
}

fn positive_integer(name: &str) -> ProductError {
    ProductError::InvalidParameter(format!("El parámetro '{name}' debe ser un entero positivo"))
}

/// Navigation metadata for one page of a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_pages: u64,
    pub page: u32,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_link: Option<String>,
    pub next_link: Option<String>,
}

impl PageInfo {
    /// `total_pages = ceil(total_count / limit)`; links repeat limit and sort.
    pub fn new(total_count: u64, request: &PageRequest) -> Self {
        let limit = u64::from(request.limit);
        let total_pages = total_count.div_ceil(limit);
        let page = request.page;

        let has_prev_page = page > 1;
        let has_next_page = u64::from(page) < total_pages;
        let prev_page = has_prev_page.then(|| page - 1);
        let next_page = has_next_page.then(|| page + 1);

        Self {
            total_pages,
            page,
            prev_page,
            next_page,
            has_prev_page,
            has_next_page,
            prev_link: prev_page.map(|p| page_link(request, p)),
            next_link: next_page.map(|p| page_link(request, p)),
        }
    }
}

/// `/api/products?limit=L&page=P`, plus `&sort=S` when a sort was requested
fn page_link(request: &PageRequest, page: u32) -> String {
    let mut link = format!("{PRODUCTS_PATH}?limit={}&page={page}", request.limit);
    if let Some(sort) = request.sort {
        link.push_str(&format!("&sort={sort}"));
    }
    link
}
