use crate::error::{Error, Result};
use crate::rating::Rating;

/// Average a set of ratings into a single library rating.
///
/// The mean rank is rounded half-to-even, so `[bronze, silver]` (2.5) averages
/// to bronze. Sentinels count as rank 0.
pub fn average_rating<I>(ratings: I) -> Result<Rating>
where
    I: IntoIterator<Item = Rating>,
{
    let (sum, count) = ratings
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), r| {
            (sum + r.rank() as u64, count + 1)
        });

    if count == 0 {
        return Err(Error::EmptyLibrary);
    }

    let mean = sum as f64 / count as f64;
    let rounded = mean.round_ties_even() as u8;

    // ranks are bounded by 0..=5 so the mean always lands on a canonical rating
    Ok(Rating::from_rank(rounded).unwrap_or(Rating::Pending))
}
