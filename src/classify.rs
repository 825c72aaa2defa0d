use crate::types::BillingRecord;
use rand::Rng;

/// Fraction of records the reference classifier flags as anomalous.
pub const DEFAULT_ANOMALY_RATE: f64 = 0.15;

/// Default amount ceiling for threshold detection: bills above it are
/// flagged.
pub const DEFAULT_AMOUNT_THRESHOLD: f64 = 1200.0;

/// Single-record anomaly decision.
///
/// The pipeline is classifier-agnostic: the parser and the sample generator
/// only see this trait, so the coin-flip below can be swapped for a rule or
/// a trained model without touching them. Implementations must be a pure
/// function of the record (and any internal model state); `&mut self` exists
/// so stateful sources like an RNG can live inside the implementation.
pub trait Classifier {
    fn classify(&mut self, record: &BillingRecord) -> bool;
}

/// Reference classifier: an independent Bernoulli trial per record with a
/// fixed success probability, uncorrelated with any field value.
///
/// The random source is supplied by the caller so tests can seed it.
pub struct RandomClassifier<R: Rng> {
    rate: f64,
    rng: R,
}

impl<R: Rng> RandomClassifier<R> {
    pub fn new(rate: f64, rng: R) -> Self {
        RandomClassifier { rate, rng }
    }
}

impl<R: Rng> Classifier for RandomClassifier<R> {
    fn classify(&mut self, _record: &BillingRecord) -> bool {
        self.rng.gen::<f64>() < self.rate
    }
}

/// Rule-based classifier: flags a record when its billed amount exceeds a
/// configurable threshold. Deterministic, so two runs over the same batch
/// agree.
pub struct ThresholdClassifier {
    threshold: f64,
}

impl ThresholdClassifier {
    pub fn new(threshold: f64) -> Self {
        ThresholdClassifier { threshold }
    }
}

impl Default for ThresholdClassifier {
    fn default() -> Self {
        ThresholdClassifier::new(DEFAULT_AMOUNT_THRESHOLD)
    }
}

impl Classifier for ThresholdClassifier {
    fn classify(&mut self, record: &BillingRecord) -> bool {
        record.total_amount > self.threshold
    }
}
