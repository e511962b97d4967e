use std::time::Duration;

use tracing::info;

/// Gate between consecutive shops that produced listings.
///
/// Kept apart from fetching and extraction so the policy can change without
/// touching either.
#[derive(Debug, Clone, Copy)]
pub enum Pacer {
    /// Sleep for a fixed interval after each shop.
    Fixed(Duration),
    /// No delay.
    Unpaced,
}

impl Pacer {
    pub fn from_interval(interval: Duration) -> Self {
        if interval.is_zero() {
            Pacer::Unpaced
        } else {
            Pacer::Fixed(interval)
        }
    }

    pub async fn wait(&self) {
        if let Pacer::Fixed(interval) = self {
            info!("Sleeping for {} seconds.", interval.as_secs_f64());
            tokio::time::sleep(*interval).await;
            info!("Resuming.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_is_unpaced() {
        assert!(matches!(Pacer::from_interval(Duration::ZERO), Pacer::Unpaced));
        assert!(matches!(
            Pacer::from_interval(Duration::from_secs(5)),
            Pacer::Fixed(d) if d == Duration::from_secs(5)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn fixed_waits_full_interval() {
        let start = tokio::time::Instant::now();
        Pacer::Fixed(Duration::from_secs(5)).wait().await;
        assert!(start.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn unpaced_returns_immediately() {
        let start = tokio::time::Instant::now();
        Pacer::Unpaced.wait().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
