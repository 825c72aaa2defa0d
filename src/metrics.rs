use crate::types::{BillingRecord, KpiMetrics};

/// Reduce a batch to its summary KPIs in one pass.
///
/// The average is over all records, not just anomalies, and reports 0 for
/// an empty batch rather than NaN.
pub fn compute_metrics(records: &[BillingRecord]) -> KpiMetrics {
    let mut total_anomalies = 0usize;
    let mut amount_sum = 0.0f64;
    for r in records {
        if r.is_anomaly {
            total_anomalies += 1;
        }
        amount_sum += r.total_amount;
    }
    let average_billed_amount = if records.is_empty() {
        0.0
    } else {
        amount_sum / records.len() as f64
    };
    KpiMetrics {
        total_records: records.len(),
        total_anomalies,
        average_billed_amount,
    }
}

/// Anomaly share of a batch as a percentage, 0 for an empty batch.
pub fn anomaly_rate_pct(metrics: &KpiMetrics) -> f64 {
    if metrics.total_records == 0 {
        return 0.0;
    }
    (metrics.total_anomalies as f64 / metrics.total_records as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: usize, amount: f64, anomaly: bool) -> BillingRecord {
        BillingRecord {
            id: format!("BILL-{:04}", id),
            customer_name: format!("Customer {}", id),
            phone_number: "+1-555-000-0000".to_string(),
            billing_period: "2024-01".to_string(),
            total_amount: amount,
            data_usage: 5.0,
            call_minutes: 200,
            sms_count: 30,
            is_anomaly: anomaly,
        }
    }

    #[test]
    fn empty_batch_yields_zeroed_metrics() {
        let m = compute_metrics(&[]);
        assert_eq!(m.total_records, 0);
        assert_eq!(m.total_anomalies, 0);
        assert_eq!(m.average_billed_amount, 0.0);
        assert_eq!(anomaly_rate_pct(&m), 0.0);
    }

    #[test]
    fn average_covers_all_records_not_just_anomalies() {
        let batch = vec![
            record(1, 100.0, true),
            record(2, 200.0, false),
            record(3, 300.0, false),
        ];
        let m = compute_metrics(&batch);
        assert_eq!(m.total_records, 3);
        assert_eq!(m.total_anomalies, 1);
        assert_eq!(m.average_billed_amount, 200.0);
    }

    #[test]
    fn anomaly_count_never_exceeds_record_count() {
        let batch: Vec<BillingRecord> = (1..=20)
            .map(|i| record(i, 50.0 + i as f64, i % 3 == 0))
            .collect();
        let m = compute_metrics(&batch);
        assert!(m.total_anomalies <= m.total_records);
        let pct = anomaly_rate_pct(&m);
        assert!((0.0..=100.0).contains(&pct));
    }
}
