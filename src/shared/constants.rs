/// Default page size for list endpoints
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// First page, pages are 1-indexed
pub const DEFAULT_PAGE: i64 = 1;
