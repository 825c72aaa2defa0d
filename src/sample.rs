use crate::classify::Classifier;
use crate::parser::{synth_phone, DefaultRanges, DEFAULT_BILLING_PERIOD};
use crate::types::BillingRecord;
use rand::Rng;

/// Number of records in a synthetic demo batch.
pub const SAMPLE_SIZE: usize = 50;

/// Build a fixed-size synthetic batch for demos and dry runs.
///
/// Uses the same default ranges and classifier as the parser, with the
/// customer name fixed to `Customer {n}` and a single placeholder period.
pub fn generate_sample<R: Rng>(
    ranges: &DefaultRanges,
    rng: &mut R,
    classifier: &mut dyn Classifier,
) -> Vec<BillingRecord> {
    let mut records = Vec::with_capacity(SAMPLE_SIZE);
    for n in 1..=SAMPLE_SIZE {
        let mut record = BillingRecord {
            id: format!("BILL-{:04}", n),
            customer_name: format!("Customer {}", n),
            phone_number: synth_phone(rng),
            billing_period: DEFAULT_BILLING_PERIOD.to_string(),
            total_amount: rng.gen_range(ranges.total_amount.clone()),
            data_usage: rng.gen_range(ranges.data_usage.clone()),
            call_minutes: rng.gen_range(ranges.call_minutes.clone()),
            sms_count: rng.gen_range(ranges.sms_count.clone()),
            is_anomaly: false,
        };
        record.is_anomaly = classifier.classify(&record);
        records.push(record);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{RandomClassifier, DEFAULT_ANOMALY_RATE};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sample_has_fifty_well_formed_records() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut classifier =
            RandomClassifier::new(DEFAULT_ANOMALY_RATE, StdRng::seed_from_u64(12));
        let batch = generate_sample(&DefaultRanges::default(), &mut rng, &mut classifier);
        assert_eq!(batch.len(), SAMPLE_SIZE);
        for (i, r) in batch.iter().enumerate() {
            assert_eq!(r.id, format!("BILL-{:04}", i + 1));
            assert_eq!(r.customer_name, format!("Customer {}", i + 1));
            assert_eq!(r.billing_period, DEFAULT_BILLING_PERIOD);
            assert!(r.total_amount >= 50.0 && r.total_amount < 250.0);
            assert!(r.data_usage >= 1.0 && r.data_usage < 11.0);
            assert!(r.call_minutes >= 100 && r.call_minutes < 600);
            assert!(r.sms_count >= 20 && r.sms_count < 120);
        }
    }

    #[test]
    fn sample_ids_are_unique() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut classifier =
            RandomClassifier::new(DEFAULT_ANOMALY_RATE, StdRng::seed_from_u64(14));
        let batch = generate_sample(&DefaultRanges::default(), &mut rng, &mut classifier);
        let mut ids: Vec<&str> = batch.iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), SAMPLE_SIZE);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let ranges = DefaultRanges::default();
        let make = || {
            let mut rng = StdRng::seed_from_u64(21);
            let mut classifier =
                RandomClassifier::new(DEFAULT_ANOMALY_RATE, StdRng::seed_from_u64(22));
            generate_sample(&ranges, &mut rng, &mut classifier)
        };
        let a = make();
        let b = make();
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.total_amount, y.total_amount);
            assert_eq!(x.is_anomaly, y.is_anomaly);
        }
    }
}
