use crate::types::{BillingRecord, ExportRow};
use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};
use std::error::Error;

/// Column order of the anomaly export, fixed by contract.
pub const EXPORT_HEADERS: [&str; 8] = [
    "ID",
    "Customer Name",
    "Phone Number",
    "Billing Period",
    "Total Amount",
    "Data Usage",
    "Call Minutes",
    "SMS Count",
];

/// Serialize the anomalous subset of a batch to comma-separated text.
///
/// Input order is preserved. The header row is always present, so an
/// anomaly-free batch renders as the header alone. Fields are written
/// unquoted: a customer name or period containing a comma corrupts the
/// row, the same known limitation the original export had.
pub fn render_anomaly_csv(records: &[BillingRecord]) -> Result<String, Box<dyn Error>> {
    let mut buf: Vec<u8> = Vec::new();
    {
        let mut wtr = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .from_writer(&mut buf);
        wtr.write_record(EXPORT_HEADERS)?;
        for record in records.iter().filter(|r| r.is_anomaly) {
            wtr.serialize(ExportRow::from(record))?;
        }
        wtr.flush()?;
    }
    Ok(String::from_utf8(buf)?)
}

/// Date-stamped filename the download sink writes the export to.
pub fn export_filename(date: NaiveDate) -> String {
    format!("anomaly_data_{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: usize, name: &str, anomaly: bool) -> BillingRecord {
        BillingRecord {
            id: format!("BILL-{:04}", id),
            customer_name: name.to_string(),
            phone_number: "+1-555-123-4567".to_string(),
            billing_period: "2024-01".to_string(),
            total_amount: 99.5,
            data_usage: 4.0,
            call_minutes: 310,
            sms_count: 27,
            is_anomaly: anomaly,
        }
    }

    #[test]
    fn empty_batch_renders_header_only() {
        let out = render_anomaly_csv(&[]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0],
            "ID,Customer Name,Phone Number,Billing Period,Total Amount,Data Usage,Call Minutes,SMS Count"
        );
    }

    #[test]
    fn normal_records_are_filtered_out() {
        let batch = vec![record(1, "Alice", false), record(2, "Bob", false)];
        let out = render_anomaly_csv(&batch).unwrap();
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn all_anomalous_renders_one_line_per_record_in_order() {
        let batch: Vec<BillingRecord> =
            (1..=5).map(|i| record(i, "Customer", true)).collect();
        let out = render_anomaly_csv(&batch).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 6);
        for (i, line) in lines.iter().skip(1).enumerate() {
            let first = line.split(',').next().unwrap();
            assert_eq!(first, format!("BILL-{:04}", i + 1));
        }
    }

    #[test]
    fn fields_round_trip_positionally() {
        let r = record(3, "Dana", true);
        let out = render_anomaly_csv(std::slice::from_ref(&r)).unwrap();
        let data_line = out.lines().nth(1).unwrap();
        let fields: Vec<&str> = data_line.split(',').collect();
        assert_eq!(fields.len(), 8);
        assert_eq!(fields[0], r.id);
        assert_eq!(fields[1], r.customer_name);
        assert_eq!(fields[2], r.phone_number);
        assert_eq!(fields[3], r.billing_period);
        assert_eq!(fields[4], "99.5");
        assert_eq!(fields[5], "4");
        assert_eq!(fields[6], "310");
        assert_eq!(fields[7], "27");
    }

    #[test]
    fn embedded_comma_is_not_quoted() {
        let r = record(1, "Smith, John", true);
        let out = render_anomaly_csv(std::slice::from_ref(&r)).unwrap();
        let data_line = out.lines().nth(1).unwrap();
        // The unquoted comma splits the name across two positions.
        assert_eq!(data_line.split(',').count(), 9);
        assert!(!data_line.contains('"'));
    }

    #[test]
    fn filename_is_date_stamped() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(export_filename(d), "anomaly_data_2024-03-09.csv");
    }
}
