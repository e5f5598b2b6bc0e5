//! Highest rated restaurants.

use crate::error::Result;
use crate::schema::{AGGREGATE_RATING, CITY, RESTAURANT_NAME, require_columns};
use crate::types::RatedRestaurant;
use crate::utils::{float_column, text_column};
use polars::prelude::*;

/// The `n` rows with the highest `Aggregate rating`, projected to
/// name, city and rating.
///
/// Rows with equal ratings stay in table order.
pub(crate) fn highest_rated(df: &DataFrame, n: usize) -> Result<Vec<RatedRestaurant>> {
    require_columns(df, &[RESTAURANT_NAME, CITY, AGGREGATE_RATING])?;

    let names = text_column(df, RESTAURANT_NAME)?;
    let cities = text_column(df, CITY)?;
    let ratings = float_column(df, AGGREGATE_RATING)?;

    let mut rows: Vec<RatedRestaurant> = names
        .str()?
        .into_iter()
        .zip(cities.str()?)
        .zip(ratings.f64()?)
        .filter_map(|((name, city), rating)| {
            Some(RatedRestaurant {
                restaurant_name: name?.to_string(),
                city: city?.to_string(),
                aggregate_rating: rating?,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.aggregate_rating.total_cmp(&a.aggregate_rating));
    rows.truncate(n);
    Ok(rows)
}
