//! Randomized detection source for demos and tests
//!
//! Produces plausible Indian-locale PII values at random positions. Counts
//! and confidence ranges come from `MockSourceConfig`.

use super::DetectionSource;
use crate::config::MockSourceConfig;
use crate::error::Result;
use crate::kind::PiiKind;
use crate::types::{DetectionSeed, FileMetadata, Region};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "Raj", "Priya", "Amit", "Neha", "Vikram", "Anjali", "Sanjay", "Meera",
];
const LAST_NAMES: &[&str] = &[
    "Sharma", "Patel", "Singh", "Gupta", "Kumar", "Verma", "Joshi", "Malik",
];
const STREETS: &[&str] = &[
    "Main Street", "Park Avenue", "Gandhi Road", "MG Road", "Nehru Place",
];
const CITIES: &[&str] = &["Mumbai", "Delhi", "Bangalore", "Chennai", "Hyderabad"];
const EMAIL_DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "outlook.com", "company.com"];

/// Detection source that invents detections at random
#[derive(Debug, Clone)]
pub struct MockDetectionSource {
    config: MockSourceConfig,
}

impl MockDetectionSource {
    /// Create a mock source, validating its configuration
    pub fn new(config: MockSourceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MockSourceConfig {
        &self.config
    }

    /// Draw a full seed set with the given RNG
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<DetectionSeed> {
        let count = rng.gen_range(self.config.min_detections..=self.config.max_detections);
        (0..count)
            .filter_map(|_| {
                let kind = *self.config.kinds.choose(rng)?;
                let confidence =
                    rng.gen_range(self.config.min_confidence..=self.config.max_confidence);
                Some(DetectionSeed {
                    kind,
                    text: sample_text(kind, rng),
                    region: sample_region(rng),
                    confidence,
                })
            })
            .collect()
    }
}

impl Default for MockDetectionSource {
    fn default() -> Self {
        Self {
            config: MockSourceConfig::default(),
        }
    }
}

#[async_trait]
impl DetectionSource for MockDetectionSource {
    async fn generate(&self, file: &FileMetadata) -> Result<Vec<DetectionSeed>> {
        let seeds = self.sample(&mut rand::thread_rng());
        tracing::debug!(file = %file.name, count = seeds.len(), "Mock detections generated");
        Ok(seeds)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

fn sample_region<R: Rng + ?Sized>(rng: &mut R) -> Region {
    Region {
        x: rng.gen_range(10..90) as f64,
        y: rng.gen_range(10..90) as f64,
        width: rng.gen_range(5..25) as f64,
        height: rng.gen_range(2..7) as f64,
    }
}

fn pick<R: Rng + ?Sized>(items: &'static [&'static str], rng: &mut R) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}

fn sample_text<R: Rng + ?Sized>(kind: PiiKind, rng: &mut R) -> String {
    match kind {
        PiiKind::Aadhaar => format!(
            "{:04} {:04} {:04}",
            rng.gen_range(0..10_000),
            rng.gen_range(0..10_000),
            rng.gen_range(0..10_000)
        ),
        PiiKind::Pan => {
            let mut pan: String = (0..5).map(|_| rng.gen_range(b'A'..=b'Z') as char).collect();
            pan.push_str(&format!("{:04}", rng.gen_range(0..10_000)));
            pan.push(rng.gen_range(b'A'..=b'Z') as char);
            pan
        }
        PiiKind::Name => format!("{} {}", pick(FIRST_NAMES, rng), pick(LAST_NAMES, rng)),
        PiiKind::Address => format!(
            "{}, {}, {}",
            rng.gen_range(1..=100),
            pick(STREETS, rng),
            pick(CITIES, rng)
        ),
        PiiKind::Phone => format!("+91 {}", rng.gen_range(6_000_000_000u64..10_000_000_000)),
        PiiKind::Email => format!(
            "user{}@{}",
            rng.gen_range(0..1_000),
            pick(EMAIL_DOMAINS, rng)
        ),
        PiiKind::Account => format!("{:012}", rng.gen_range(0..1_000_000_000_000u64)),
        PiiKind::Other => "Sensitive Information".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn metadata() -> FileMetadata {
        FileMetadata {
            name: "statement.pdf".to_string(),
            media_type: "application/pdf".to_string(),
            size_bytes: 1,
            last_modified: 0,
        }
    }

    #[test]
    fn test_sample_respects_config_ranges() {
        let source = MockDetectionSource::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let seeds = source.sample(&mut rng);
            assert!((3..=7).contains(&seeds.len()));
            for seed in &seeds {
                assert!((0.7..=1.0).contains(&seed.confidence));
                assert_ne!(seed.kind, PiiKind::Other);
                assert!((10.0..90.0).contains(&seed.region.x));
                assert!((5.0..25.0).contains(&seed.region.width));
                assert!((2.0..7.0).contains(&seed.region.height));
            }
        }
    }

    #[test]
    fn test_sample_text_shapes() {
        let mut rng = StdRng::seed_from_u64(42);

        let aadhaar = sample_text(PiiKind::Aadhaar, &mut rng);
        assert_eq!(aadhaar.len(), 14);
        assert_eq!(aadhaar.split(' ').count(), 3);

        let pan = sample_text(PiiKind::Pan, &mut rng);
        assert_eq!(pan.len(), 10);
        assert!(pan[..5].chars().all(|c| c.is_ascii_uppercase()));
        assert!(pan[5..9].chars().all(|c| c.is_ascii_digit()));
        assert!(pan[9..].chars().all(|c| c.is_ascii_uppercase()));

        let phone = sample_text(PiiKind::Phone, &mut rng);
        assert!(phone.starts_with("+91 "));
        assert_eq!(phone.len(), 14);

        let email = sample_text(PiiKind::Email, &mut rng);
        assert!(email.starts_with("user"));
        assert!(email.contains('@'));

        let account = sample_text(PiiKind::Account, &mut rng);
        assert_eq!(account.len(), 12);
        assert!(account.chars().all(|c| c.is_ascii_digit()));

        assert_eq!(sample_text(PiiKind::Other, &mut rng), "Sensitive Information");
    }

    #[test]
    fn test_zero_detections_config() {
        let source = MockDetectionSource::new(MockSourceConfig {
            min_detections: 0,
            max_detections: 0,
            ..Default::default()
        })
        .unwrap();

        let seeds = tokio_test::block_on(source.generate(&metadata())).unwrap();
        assert!(seeds.is_empty());
    }

    #[test]
    fn test_single_kind_config() {
        let source = MockDetectionSource::new(MockSourceConfig {
            kinds: vec![PiiKind::Email],
            ..Default::default()
        })
        .unwrap();

        let seeds = tokio_test::block_on(source.generate(&metadata())).unwrap();
        assert!(seeds.iter().all(|s| s.kind == PiiKind::Email));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = MockDetectionSource::new(MockSourceConfig {
            min_confidence: 0.9,
            max_confidence: 0.5,
            ..Default::default()
        });
        assert!(result.is_err());
    }
}
