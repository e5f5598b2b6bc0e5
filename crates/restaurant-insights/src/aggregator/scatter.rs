//! Votes against rating scatter points.

use crate::error::Result;
use crate::schema::{AGGREGATE_RATING, CITY, RESTAURANT_NAME, VOTES, require_columns};
use crate::types::RatingVotesPoint;
use crate::utils::{float_column, text_column};
use polars::prelude::*;

/// One point per row: rating against votes, labelled with name and city.
pub(crate) fn votes_vs_rating(df: &DataFrame) -> Result<Vec<RatingVotesPoint>> {
    require_columns(df, &[AGGREGATE_RATING, VOTES, RESTAURANT_NAME, CITY])?;

    let ratings = float_column(df, AGGREGATE_RATING)?;
    let votes = float_column(df, VOTES)?;
    let names = text_column(df, RESTAURANT_NAME)?;
    let cities = text_column(df, CITY)?;

    let points = ratings
        .f64()?
        .into_iter()
        .zip(votes.f64()?)
        .zip(names.str()?)
        .zip(cities.str()?)
        .filter_map(|(((rating, votes), name), city)| {
            Some(RatingVotesPoint {
                aggregate_rating: rating?,
                votes: votes?,
                restaurant_name: name?.to_string(),
                city: city?.to_string(),
            })
        })
        .collect();

    Ok(points)
}
