use serde::Serialize;
use tabled::Tabled;

/// One billing statement entry. Immutable once the parser (or the sample
/// generator) has constructed it; metrics and exports are derived views.
#[derive(Debug, Clone)]
pub struct BillingRecord {
    /// `BILL-NNNN`, assigned sequentially at parse time, unique per batch.
    pub id: String,
    pub customer_name: String,
    pub phone_number: String,
    pub billing_period: String,
    pub total_amount: f64,
    pub data_usage: f64,
    pub call_minutes: u32,
    pub sms_count: u32,
    /// Set by the classifier, never derived from the other fields.
    pub is_anomaly: bool,
}

/// Flat summary stats over one batch, recomputed on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiMetrics {
    pub total_records: usize,
    pub total_anomalies: usize,
    pub average_billed_amount: f64,
}

#[derive(Debug, Serialize, Clone)]
pub struct ExportRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Customer Name")]
    pub customer_name: String,
    #[serde(rename = "Phone Number")]
    pub phone_number: String,
    #[serde(rename = "Billing Period")]
    pub billing_period: String,
    #[serde(rename = "Total Amount")]
    pub total_amount: String,
    #[serde(rename = "Data Usage")]
    pub data_usage: String,
    #[serde(rename = "Call Minutes")]
    pub call_minutes: u32,
    #[serde(rename = "SMS Count")]
    pub sms_count: u32,
}

impl From<&BillingRecord> for ExportRow {
    fn from(r: &BillingRecord) -> Self {
        // `Display` on f64 drops a trailing `.0`, so whole-valued amounts
        // render as plain integers like the original export did.
        ExportRow {
            id: r.id.clone(),
            customer_name: r.customer_name.clone(),
            phone_number: r.phone_number.clone(),
            billing_period: r.billing_period.clone(),
            total_amount: format!("{}", r.total_amount),
            data_usage: format!("{}", r.data_usage),
            call_minutes: r.call_minutes,
            sms_count: r.sms_count,
        }
    }
}

#[derive(Debug, Tabled, Clone)]
pub struct RecordRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Customer")]
    pub customer: String,
    #[tabled(rename = "Phone")]
    pub phone: String,
    #[tabled(rename = "Period")]
    pub period: String,
    #[tabled(rename = "Amount")]
    pub amount: String,
    #[tabled(rename = "Status")]
    pub status: String,
}

impl From<&BillingRecord> for RecordRow {
    fn from(r: &BillingRecord) -> Self {
        RecordRow {
            id: r.id.clone(),
            customer: r.customer_name.clone(),
            phone: r.phone_number.clone(),
            period: r.billing_period.clone(),
            amount: format!("${:.2}", r.total_amount),
            status: if r.is_anomaly { "Anomaly" } else { "Normal" }.to_string(),
        }
    }
}
