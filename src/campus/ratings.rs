//! Rating aggregation for place reviews

use crate::campus::places::PlaceReview;

/// Arithmetic mean of the 1-5 ratings, 0.0 when there are no reviews
pub fn average_rating(reviews: &[PlaceReview]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    f64::from(sum) / reviews.len() as f64
}
