//! Stand-in for face recognition.
//!
//! No matching happens here. Detected faces are paired, in detector order, with
//! a fixed roster of student ids and given a random confidence. Replace this
//! with a trained recognizer before relying on any of its output.

use crate::common::config::MatcherConfig;
use crate::core::detector::FaceRegion;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recognition {
    pub student_id: i64,
    pub confidence: f64,
    pub bounding_box: FaceRegion,
}

pub struct PlaceholderMatcher<R = StdRng> {
    roster: Vec<i64>,
    min_confidence: f64,
    max_confidence: f64,
    rng: R,
}

impl PlaceholderMatcher<StdRng> {
    pub fn from_entropy(config: &MatcherConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn seeded(config: &MatcherConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PlaceholderMatcher<R> {
    pub fn with_rng(config: &MatcherConfig, rng: R) -> Self {
        Self {
            roster: config.roster.clone(),
            min_confidence: config.min_confidence,
            max_confidence: config.max_confidence,
            rng,
        }
    }

    /// One entry per face until the roster runs out.
    pub fn assign(&mut self, faces: &[FaceRegion]) -> Vec<Recognition> {
        let (low, span) = (self.min_confidence, self.max_confidence - self.min_confidence);
        let rng = &mut self.rng;
        faces
            .iter()
            .zip(&self.roster)
            .map(|(face, &student_id)| Recognition {
                student_id,
                confidence: round2(low + rng.gen::<f64>() * span),
                bounding_box: *face,
            })
            .collect()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faces(n: usize) -> Vec<FaceRegion> {
        (0..n).map(|i| FaceRegion::new(i as i32 * 50, 10, 40, 40)).collect()
    }

    #[test]
    fn pairs_faces_with_roster_in_order() {
        let mut matcher = PlaceholderMatcher::seeded(&MatcherConfig::default(), 7);
        let found = faces(3);
        let recognitions = matcher.assign(&found);

        assert_eq!(recognitions.len(), 3);
        for (i, rec) in recognitions.iter().enumerate() {
            assert_eq!(rec.student_id, i as i64 + 1);
            assert_eq!(rec.bounding_box, found[i]);
        }
    }

    #[test]
    fn confidence_stays_in_range_with_two_decimals() {
        let mut matcher = PlaceholderMatcher::seeded(&MatcherConfig::default(), 42);
        for _ in 0..200 {
            for rec in matcher.assign(&faces(1)) {
                assert!((85.0..=95.0).contains(&rec.confidence), "{}", rec.confidence);
                let cents = rec.confidence * 100.0;
                assert!((cents - cents.round()).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn faces_beyond_roster_are_skipped() {
        let mut matcher = PlaceholderMatcher::seeded(&MatcherConfig::default(), 1);
        assert_eq!(matcher.assign(&faces(8)).len(), 5);
        assert!(matcher.assign(&[]).is_empty());
    }

    #[test]
    fn same_seed_same_output() {
        let config = MatcherConfig::default();
        let a = PlaceholderMatcher::seeded(&config, 99).assign(&faces(2));
        let b = PlaceholderMatcher::seeded(&config, 99).assign(&faces(2));
        assert_eq!(a, b);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let rec = Recognition {
            student_id: 3,
            confidence: 88.5,
            bounding_box: FaceRegion::new(1, 2, 30, 40),
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["studentId"], 3);
        assert_eq!(json["confidence"], 88.5);
        assert_eq!(json["boundingBox"]["width"], 30);
        assert_eq!(json["boundingBox"]["height"], 40);
    }
}
