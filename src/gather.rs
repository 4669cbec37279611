//! Fan-out helpers: run independent calls concurrently, keep the successes

use std::fmt::Display;
use std::future::Future;

use futures::future::join_all;

/// Await every future, log and drop the failures, keep successful values in
/// input order. Never fails as a whole and never retries.
pub async fn settle_all<I, F, T, E>(futures: I) -> Vec<T>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    join_all(futures)
        .await
        .into_iter()
        .filter_map(|result| match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Dropping failed entry: {}", e);
                None
            }
        })
        .collect()
}

/// Rounded arithmetic mean; `None` for an empty input
#[must_use]
pub fn mean_rounded<I>(values: I) -> Option<u32>
where
    I: IntoIterator<Item = u32>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), v| (sum + u64::from(v), count + 1));
    if count == 0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mean = (sum as f64 / count as f64).round() as u32;
    Some(mean)
}
