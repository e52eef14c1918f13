//! Query parameters and pagination utilities

use sea_orm::{
    sea_query::{Expr, Func},
    ColumnTrait, Condition, DatabaseConnection, DbErr, PaginatorTrait, SelectorTrait,
};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_LIMIT, MAX_PAGE, MAX_PAGE_LIMIT};

/// Query parameters of a list endpoint, e.g. `GET /api/companies?search=ai&page=2&limit=10`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ListQuery {
    pub(crate) search: Option<String>,
    pub(crate) page: Option<u64>,
    pub(crate) limit: Option<u64>,
}

impl ListQuery {
    /// Page number, starting at 1. Pages past [`MAX_PAGE`] are always empty, so they clamp to it.
    pub(crate) fn page(&self) -> u64 {
        self.page.unwrap_or(1).clamp(1, MAX_PAGE)
    }

    pub(crate) fn limit(&self) -> u64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT)
    }

    /// The search term, if a non-blank one was given.
    pub(crate) fn search(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Pagination {
    pub(crate) total: u64,
    pub(crate) total_pages: u64,
    pub(crate) current_page: u64,
    pub(crate) limit: u64,
}

impl Pagination {
    pub(crate) fn new(current_page: u64, limit: u64, total: u64) -> Self {
        let limit = limit.max(1);
        Self {
            total,
            total_pages: total.div_ceil(limit),
            current_page,
            limit,
        }
    }
}

/// One page of rows plus its metadata.
#[derive(Debug)]
pub(crate) struct Page<T> {
    pub(crate) rows: Vec<T>,
    pub(crate) pagination: Pagination,
}

impl<T> Page<T> {
    pub(crate) fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            rows: self.rows.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Case-insensitive substring match of `term` against any of `columns`.
pub(crate) fn search_condition<C: ColumnTrait>(columns: &[C], term: &str) -> Condition {
    let pattern = format!("%{}%", term.to_lowercase());
    columns.iter().fold(Condition::any(), |condition, column| {
        condition.add(Expr::expr(Func::lower(Expr::col(column.as_column_ref()))).like(pattern.clone()))
    })
}

/// Fetch the page of `select` requested by `query`, along with the total row count.
pub(crate) async fn fetch_page<'db, S>(
    db: &'db DatabaseConnection,
    select: S,
    query: &ListQuery,
) -> Result<Page<<S::Selector as SelectorTrait>::Item>, DbErr>
where
    S: PaginatorTrait<'db, DatabaseConnection>,
{
    let (page, limit) = (query.page(), query.limit());
    let paginator = select.paginate(db, limit);
    let total = paginator.num_items().await?;
    let rows = paginator.fetch_page(page - 1).await?;

    Ok(Page {
        rows,
        pagination: Pagination::new(page, limit, total),
    })
}
