pub mod product_filter;

pub use product_filter::{build_filter_query, FilterArg, FilterQuery, ProductFilter, PRODUCT_COLUMNS};
