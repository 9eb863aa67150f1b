//! Tiered fallback geocoding.
//!
//! Queries run one at a time, most specific first. The first tier with a
//! candidate wins and its first candidate is used. A tier that errors is
//! recorded and counts as "no result". Consecutive tiers are separated by the
//! throttle interval; there is no wait after the last one.

use crate::domain::model::{Candidate, Coordinate, GeoQuery, Resolution, TierAttempt, TierFailure};
use crate::domain::ports::PlaceSearch;
use crate::utils::error::{GeoChronError, Result};
use std::time::Duration;

pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(500);

pub struct GeocodingResolver<P: PlaceSearch> {
    search: P,
    throttle: Duration,
    country: String,
}

impl<P: PlaceSearch> GeocodingResolver<P> {
    pub fn new(search: P, throttle: Duration, country: impl Into<String>) -> Self {
        if throttle < DEFAULT_THROTTLE {
            tracing::warn!(
                "⚠️ Geocoding throttle {:?} is below {:?}; public services may rate-limit",
                throttle,
                DEFAULT_THROTTLE
            );
        }
        Self {
            search,
            throttle,
            country: country.into(),
        }
    }

    /// Coordinate of the first tier that yields a candidate.
    pub async fn locate(&self, query: &GeoQuery) -> Result<Coordinate> {
        Ok(self.resolve(query).await?.coordinate)
    }

    /// Like [`locate`](Self::locate), keeping the winning tier and the attempt trail.
    pub async fn resolve(&self, query: &GeoQuery) -> Result<Resolution> {
        let tiers = query.tiers(&self.country);
        let mut attempts = Vec::with_capacity(tiers.len());

        for (index, text) in tiers.into_iter().enumerate() {
            let tier = index + 1;
            if index > 0 {
                tokio::time::sleep(self.throttle).await;
            }

            tracing::debug!("🌍 Geocoding tier {}: {}", tier, text);
            match self.try_tier(&text).await {
                Ok(candidate) => {
                    tracing::info!(
                        "🌍 Located '{}' at {} (tier {})",
                        text,
                        candidate.coordinate,
                        tier
                    );
                    attempts.push(TierAttempt {
                        tier,
                        query: text,
                        outcome: Ok(candidate.coordinate),
                    });
                    return Ok(Resolution {
                        coordinate: candidate.coordinate,
                        display_name: candidate.display_name,
                        tier,
                        attempts,
                    });
                }
                Err(failure) => {
                    tracing::warn!("🔶 Search attempt {} for '{}': {}", tier, text, failure);
                    attempts.push(TierAttempt {
                        tier,
                        query: text,
                        outcome: Err(failure),
                    });
                }
            }
        }

        Err(GeoChronError::LocationNotFound {
            query: query.describe(),
            attempts,
        })
    }

    async fn try_tier(&self, text: &str) -> std::result::Result<Candidate, TierFailure> {
        let candidates = self
            .search
            .search(text)
            .await
            .map_err(|e| TierFailure::Failed(e.to_string()))?;
        candidates.into_iter().next().ok_or(TierFailure::NoResult)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PostalArea;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Copy)]
    enum Script {
        Hit(f64, f64),
        Empty,
        Fail,
    }

    #[derive(Clone)]
    struct ScriptedSearch {
        script: HashMap<String, Script>,
        calls: Arc<Mutex<Vec<(String, tokio::time::Instant)>>>,
    }

    impl ScriptedSearch {
        fn new(entries: &[(&str, Script)]) -> Self {
            Self {
                script: entries
                    .iter()
                    .map(|(q, s)| (q.to_string(), *s))
                    .collect(),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn queries(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(q, _)| q.clone())
                .collect()
        }
    }

    #[async_trait]
    impl PlaceSearch for ScriptedSearch {
        async fn search(&self, query: &str) -> Result<Vec<Candidate>> {
            self.calls
                .lock()
                .unwrap()
                .push((query.to_string(), tokio::time::Instant::now()));
            match self.script.get(query).copied().unwrap_or(Script::Empty) {
                Script::Hit(lat, lon) => Ok(vec![
                    Candidate {
                        coordinate: Coordinate::new(lat, lon)?,
                        display_name: Some(query.to_string()),
                    },
                    Candidate {
                        coordinate: Coordinate::new(0.0, 0.0)?,
                        display_name: None,
                    },
                ]),
                Script::Empty => Ok(vec![]),
                Script::Fail => Err(GeoChronError::network("connection reset")),
            }
        }
    }

    const TIER1: &str = "Connaught Place, New Delhi, Delhi, India";
    const TIER2: &str = "New Delhi, Delhi, India";
    const TIER3: &str = "110001, India";

    fn query() -> GeoQuery {
        GeoQuery::Area(PostalArea {
            office_name: "Connaught Place".to_string(),
            district: "New Delhi".to_string(),
            state: "Delhi".to_string(),
            pincode: "110001".to_string(),
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tier_wins_and_stops_search() {
        let search = ScriptedSearch::new(&[
            (TIER1, Script::Hit(28.6315, 77.2167)),
            (TIER3, Script::Hit(28.6139, 77.2090)),
        ]);
        let resolver = GeocodingResolver::new(search.clone(), DEFAULT_THROTTLE, "India");

        let start = tokio::time::Instant::now();
        let resolution = resolver.resolve(&query()).await.unwrap();

        assert_eq!(resolution.tier, 1);
        assert_eq!(resolution.coordinate.latitude(), 28.6315);
        assert_eq!(search.queries(), vec![TIER1.to_string()]);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_fall_through_to_pincode_tier() {
        let search = ScriptedSearch::new(&[
            (TIER1, Script::Fail),
            (TIER2, Script::Empty),
            (TIER3, Script::Hit(28.6139, 77.2090)),
        ]);
        let resolver = GeocodingResolver::new(search.clone(), DEFAULT_THROTTLE, "India");

        let resolution = resolver.resolve(&query()).await.unwrap();

        assert_eq!(resolution.tier, 3);
        assert_eq!(resolution.coordinate.longitude(), 77.2090);
        assert_eq!(resolution.attempts.len(), 3);
        assert!(matches!(
            resolution.attempts[0].outcome,
            Err(TierFailure::Failed(_))
        ));
        assert_eq!(resolution.attempts[1].outcome, Err(TierFailure::NoResult));
        assert!(resolution.attempts[2].outcome.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_reports_every_tier_with_throttle_between() {
        let search = ScriptedSearch::new(&[]);
        let resolver = GeocodingResolver::new(search.clone(), DEFAULT_THROTTLE, "India");

        let start = tokio::time::Instant::now();
        let err = resolver.locate(&query()).await.unwrap_err();
        let elapsed = start.elapsed();

        match err {
            GeoChronError::LocationNotFound { attempts, .. } => {
                assert_eq!(attempts.len(), 3);
                assert!(attempts
                    .iter()
                    .all(|a| a.outcome == Err(TierFailure::NoResult)));
            }
            other => panic!("expected LocationNotFound, got {:?}", other),
        }

        assert_eq!(
            search.queries(),
            vec![TIER1.to_string(), TIER2.to_string(), TIER3.to_string()]
        );
        let calls = search.calls.lock().unwrap().clone();
        let slack = Duration::from_millis(5);
        for pair in calls.windows(2) {
            let gap = pair[1].1 - pair[0].1;
            assert!(gap >= DEFAULT_THROTTLE && gap < DEFAULT_THROTTLE + slack, "gap {:?}", gap);
        }
        // 最後一層之後不再等待
        assert!(elapsed >= DEFAULT_THROTTLE * 2 && elapsed < DEFAULT_THROTTLE * 2 + slack);
    }

    #[tokio::test(start_paused = true)]
    async fn test_place_query_single_tier() {
        let search = ScriptedSearch::new(&[]);
        let resolver = GeocodingResolver::new(search.clone(), DEFAULT_THROTTLE, "India");

        let err = resolver
            .locate(&GeoQuery::Place("Atlantis".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, GeoChronError::LocationNotFound { ref query, .. } if query == "Atlantis"));
        assert_eq!(search.queries(), vec!["Atlantis".to_string()]);
    }
}
