use serde::Deserialize;
use serde_json::{Map, Value};

// Enrollment webhook wire shape.

#[derive(Debug, Deserialize, Clone)]
pub struct EnrollmentWebhook {
    pub event: EnrollmentEventBody,
    pub webhook: WebhookMeta,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EnrollmentEventBody {
    #[serde(rename = "jssID")]
    pub jss_id: RawIdentifier,
    #[serde(rename = "deviceName")]
    pub device_name: String,
    #[serde(rename = "serialNumber")]
    pub serial_number: String,
    #[serde(default)]
    pub room: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WebhookMeta {
    #[serde(rename = "eventTimestamp")]
    pub event_timestamp: i64,
}

/// `jssID` arrives as a number from the platform but as text from some relays.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum RawIdentifier {
    Number(u64),
    Text(String),
}

impl RawIdentifier {
    pub fn into_text(self) -> String {
        match self {
            RawIdentifier::Number(value) => value.to_string(),
            RawIdentifier::Text(value) => value,
        }
    }
}

// Security event webhook wire shape.

#[derive(Debug, Deserialize, Clone)]
pub struct UsbFactsEnvelope {
    pub input: UsbFactsInput,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UsbFactsInput {
    #[serde(rename = "match")]
    pub matched: UsbFactsMatch,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UsbFactsMatch {
    pub facts: Vec<UsbFact>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UsbFact {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UsbWebhook {
    pub input: UsbWebhookInput,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UsbWebhookInput {
    #[serde(rename = "eventType", default)]
    pub event_type: Option<String>,
    pub host: Map<String, Value>,
    #[serde(rename = "match")]
    pub matched: UsbWebhookMatch,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UsbWebhookMatch {
    pub event: UsbMatchEvent,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UsbMatchEvent {
    /// Epoch seconds, possibly fractional.
    pub timestamp: f64,
    pub uuid: String,
    pub device: UsbDevice,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UsbDevice {
    #[serde(default)]
    pub media_name: Option<String>,
    pub is_encrypted: bool,
    #[serde(default)]
    pub vendor_name: Option<String>,
    #[serde(default)]
    pub device_model: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
}

// Process-wide configuration values handed to infrastructure.

#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub clickhouse_url: String,
    pub clickhouse_database: String,
    pub clickhouse_user: Option<String>,
    pub clickhouse_password: Option<String>,
    pub ensure_schema: bool,
    pub request_timeout_seconds: u64,
}
