//! Dynamic filter query for product listings.
//!
//! Placeholders are numbered by presence: `user_id` is always `$1` and every
//! optional predicate that is actually supplied takes the next free number,
//! in the order min price, max price, name. Omitting a predicate therefore
//! shifts the ones after it down rather than leaving a gap.

use crate::ReadModelError;

/// Columns selected for every product read
pub const PRODUCT_COLUMNS: &str = "id, user_id, product_name, product_description, \
     product_price, product_images, compressed_product_images";

/// Optional predicates applied on top of the owning-user filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub name: Option<String>,
}

impl ProductFilter {
    pub fn with_min_price(mut self, min_price: f64) -> Self {
        self.min_price = Some(min_price);
        self
    }

    pub fn with_max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A positional query argument, typed so it can be bound with the right SQL type
#[derive(Debug, Clone, PartialEq)]
pub enum FilterArg {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Parameterized SQL plus its arguments in placeholder order
#[derive(Debug, Clone, PartialEq)]
pub struct FilterQuery {
    pub sql: String,
    pub args: Vec<FilterArg>,
}

impl FilterQuery {
    /// Number of `$n` placeholders in the SQL text
    pub fn placeholder_count(&self) -> usize {
        let bytes = self.sql.as_bytes();
        bytes
            .iter()
            .enumerate()
            .filter(|(i, b)| {
                **b == b'$' && bytes.get(i + 1).is_some_and(|next| next.is_ascii_digit())
            })
            .count()
    }
}

/// Build the listing query for `user_id` with the given optional predicates.
///
/// Fails with `InvalidArgument` when `user_id` is not positive, and with
/// `InvalidRange` when both bounds are supplied and `min_price > max_price`.
pub fn build_filter_query(user_id: i64, filter: &ProductFilter) -> Result<FilterQuery, ReadModelError> {
    if user_id <= 0 {
        return Err(ReadModelError::InvalidArgument(format!(
            "user_id must be a positive integer, got {}",
            user_id
        )));
    }

    // The range is only checked once an upper bound exists.
    if let Some(max) = filter.max_price {
        if let Some(min) = filter.min_price {
            if min > max {
                return Err(ReadModelError::InvalidRange { min, max });
            }
        }
    }

    let mut clauses = vec!["user_id = $1".to_string()];
    let mut args = vec![FilterArg::Int(user_id)];

    if let Some(min) = filter.min_price {
        args.push(FilterArg::Float(min));
        clauses.push(format!("product_price >= ${}", args.len()));
    }

    if let Some(max) = filter.max_price {
        args.push(FilterArg::Float(max));
        clauses.push(format!("product_price <= ${}", args.len()));
    }

    if let Some(name) = &filter.name {
        args.push(FilterArg::Text(format!("%{}%", name)));
        clauses.push(format!("product_name ILIKE ${}", args.len()));
    }

    let sql = format!(
        "SELECT {} FROM products WHERE {} ORDER BY id",
        PRODUCT_COLUMNS,
        clauses.join(" AND ")
    );

    Ok(FilterQuery { sql, args })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The WHERE clause split into its AND-joined predicates
    fn predicates(query: &FilterQuery) -> Vec<String> {
        let start = query.sql.find("WHERE ").unwrap() + "WHERE ".len();
        let end = query.sql.find(" ORDER BY").unwrap();
        query.sql[start..end]
            .split(" AND ")
            .map(str::to_string)
            .collect()
    }

    fn placeholder_of(predicate: &str) -> usize {
        let idx = predicate.find('$').unwrap();
        predicate[idx + 1..].parse().unwrap()
    }

    #[test]
    fn test_base_query_only_binds_user() {
        let query = build_filter_query(7, &ProductFilter::default()).unwrap();

        assert_eq!(query.args, vec![FilterArg::Int(7)]);
        assert_eq!(query.placeholder_count(), 1);
        assert_eq!(predicates(&query), vec!["user_id = $1"]);
    }

    #[test]
    fn test_max_price_shifts_down_when_min_price_absent() {
        let filter = ProductFilter::default().with_max_price(50.0).with_name("shirt");
        let query = build_filter_query(7, &filter).unwrap();

        assert_eq!(query.placeholder_count(), 3);
        assert_eq!(
            query.args,
            vec![
                FilterArg::Int(7),
                FilterArg::Float(50.0),
                FilterArg::Text("%shirt%".to_string()),
            ]
        );
        assert_eq!(
            predicates(&query),
            vec!["user_id = $1", "product_price <= $2", "product_name ILIKE $3"]
        );
    }

    #[test]
    fn test_all_predicates_present() {
        let filter = ProductFilter::default()
            .with_min_price(10.0)
            .with_max_price(20.0)
            .with_name("mug");
        let query = build_filter_query(3, &filter).unwrap();

        assert_eq!(
            predicates(&query),
            vec![
                "user_id = $1",
                "product_price >= $2",
                "product_price <= $3",
                "product_name ILIKE $4"
            ]
        );
        assert_eq!(query.args.len(), 4);
    }

    #[test]
    fn test_name_only_takes_second_placeholder() {
        let filter = ProductFilter::default().with_name("Lamp");
        let query = build_filter_query(1, &filter).unwrap();

        assert_eq!(predicates(&query), vec!["user_id = $1", "product_name ILIKE $2"]);
        assert_eq!(query.args[1], FilterArg::Text("%Lamp%".to_string()));
    }

    #[test]
    fn test_arguments_line_up_with_placeholders_for_every_combination() {
        for mask in 0u8..8 {
            let mut filter = ProductFilter::default();
            if mask & 1 != 0 {
                filter = filter.with_min_price(5.0);
            }
            if mask & 2 != 0 {
                filter = filter.with_max_price(500.0);
            }
            if mask & 4 != 0 {
                filter = filter.with_name("desk");
            }

            let query = build_filter_query(42, &filter).unwrap();
            assert_eq!(query.placeholder_count(), query.args.len(), "mask {}", mask);

            for (position, predicate) in predicates(&query).iter().enumerate() {
                let n = placeholder_of(predicate);
                assert_eq!(n, position + 1, "mask {}: {}", mask, predicate);

                let expected = if predicate.starts_with("user_id") {
                    FilterArg::Int(42)
                } else if predicate.contains(">=") {
                    FilterArg::Float(5.0)
                } else if predicate.contains("<=") {
                    FilterArg::Float(500.0)
                } else {
                    FilterArg::Text("%desk%".to_string())
                };
                assert_eq!(query.args[n - 1], expected, "mask {}: {}", mask, predicate);
            }
        }
    }

    #[test]
    fn test_non_positive_user_is_invalid_argument() {
        for user_id in [0, -1] {
            let err = build_filter_query(user_id, &ProductFilter::default()).unwrap_err();
            assert!(matches!(err, ReadModelError::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let filter = ProductFilter::default().with_min_price(100.0).with_max_price(50.0);
        let err = build_filter_query(7, &filter).unwrap_err();

        assert!(matches!(
            err,
            ReadModelError::InvalidRange { min, max } if min == 100.0 && max == 50.0
        ));
    }

    #[test]
    fn test_equal_bounds_are_accepted() {
        let filter = ProductFilter::default().with_min_price(25.0).with_max_price(25.0);
        assert!(build_filter_query(7, &filter).is_ok());
    }

    #[test]
    fn test_missing_min_price_never_triggers_range_check() {
        let filter = ProductFilter::default().with_max_price(-10.0);
        assert!(build_filter_query(7, &filter).is_ok());
    }

    #[test]
    fn test_min_price_without_max_is_unchecked() {
        let filter = ProductFilter::default().with_min_price(1_000_000.0);
        let query = build_filter_query(7, &filter).unwrap();
        assert_eq!(predicates(&query), vec!["user_id = $1", "product_price >= $2"]);
    }

    #[test]
    fn test_selects_full_product_columns() {
        let query = build_filter_query(7, &ProductFilter::default()).unwrap();
        assert!(query.sql.starts_with(&format!("SELECT {} FROM products", PRODUCT_COLUMNS)));
        assert!(query.sql.ends_with("ORDER BY id"));
    }
}
