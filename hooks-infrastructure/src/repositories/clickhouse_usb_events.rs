use std::future::Future;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use clickhouse::{Client, Row};
use serde::Serialize;
use time::OffsetDateTime;
use tokio::time::timeout;
use uuid::Uuid;

use hooks_domain::{StoreConfig, UsbEventRepository, UsbInsertionEvent};

use crate::utils::naive_to_column_time;

pub const USB_EVENTS_TABLE: &str = "usb_events";

const CREATE_USB_EVENTS: &str = r#"
CREATE TABLE IF NOT EXISTS usb_events (
    record_id String,
    event_names Array(String),
    event_uuid String,
    event_timestamp DateTime64(3, 'UTC'),
    media_name Nullable(String),
    encryption_status Bool,
    host_name Nullable(String),
    host_serial Nullable(String),
    host_record String,
    device_vendor Nullable(String),
    device_model Nullable(String),
    device_serial Nullable(String),
    raw_body String,
    INDEX idx_event_names event_names TYPE bloom_filter GRANULARITY 4,
    INDEX idx_host_serial host_serial TYPE bloom_filter GRANULARITY 4,
    INDEX idx_encryption_status encryption_status TYPE set(2) GRANULARITY 4
) ENGINE = MergeTree
ORDER BY (event_timestamp, event_uuid)
"#;

/// One stored USB insertion. `record_id` is generated per insert; nothing
/// deduplicates on `event_uuid`.
#[derive(Debug, Clone, Serialize, Row)]
pub struct UsbEventRow {
    pub record_id: String,
    pub event_names: Vec<String>,
    pub event_uuid: String,
    #[serde(with = "clickhouse::serde::time::datetime64::millis")]
    pub event_timestamp: OffsetDateTime,
    pub media_name: Option<String>,
    pub encryption_status: bool,
    pub host_name: Option<String>,
    pub host_serial: Option<String>,
    pub host_record: String,
    pub device_vendor: Option<String>,
    pub device_model: Option<String>,
    pub device_serial: Option<String>,
    pub raw_body: String,
}

impl UsbEventRow {
    pub fn from_event(event: &UsbInsertionEvent) -> Result<Self> {
        Ok(Self {
            record_id: Uuid::new_v4().to_string(),
            event_names: event.event_names.as_slice().to_vec(),
            event_uuid: event.event_uuid.clone(),
            event_timestamp: naive_to_column_time(event.event_timestamp)?,
            media_name: event.media_name.clone(),
            encryption_status: event.encryption_status,
            host_name: event.host_name.clone(),
            host_serial: event.host_serial.clone(),
            host_record: serde_json::to_string(&event.host_record)?,
            device_vendor: event.device_vendor.clone(),
            device_model: event.device_model.clone(),
            device_serial: event.device_serial.clone(),
            raw_body: serde_json::to_string(&event.raw_body)?,
        })
    }
}

#[derive(Clone)]
pub struct ClickhouseUsbEventRepository {
    client: Client,
    database: String,
    request_timeout: Duration,
}

impl ClickhouseUsbEventRepository {
    pub fn new(client: Client, database: String, request_timeout: Duration) -> Self {
        Self {
            client,
            database,
            request_timeout,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        let mut client = Client::default()
            .with_url(&config.clickhouse_url)
            .with_database(&config.clickhouse_database);
        if let Some(user) = &config.clickhouse_user {
            client = client.with_user(user);
        }
        if let Some(password) = &config.clickhouse_password {
            client = client.with_password(password);
        }
        Self::new(
            client,
            config.clickhouse_database.clone(),
            Duration::from_secs(config.request_timeout_seconds.max(1)),
        )
    }

    async fn bounded<T>(&self, what: &str, work: impl Future<Output = Result<T>>) -> Result<T> {
        timeout(self.request_timeout, work)
            .await
            .map_err(|_| anyhow!("{} timed out after {:?}", what, self.request_timeout))?
    }
}

#[async_trait]
impl UsbEventRepository for ClickhouseUsbEventRepository {
    async fn ensure_schema(&self) -> Result<()> {
        self.bounded("schema setup", async {
            // The session database may not exist yet.
            let create_db = format!("CREATE DATABASE IF NOT EXISTS {}", self.database);
            self.client
                .clone()
                .with_database("default")
                .query(&create_db)
                .execute()
                .await?;
            self.client.query(CREATE_USB_EVENTS).execute().await?;
            Ok::<(), anyhow::Error>(())
        })
        .await
    }

    async fn insert_usb_event(&self, event: &UsbInsertionEvent) -> Result<String> {
        let row = UsbEventRow::from_event(event)?;
        let record_id = row.record_id.clone();
        self.bounded("usb event insert", async {
            let mut insert = self.client.insert(USB_EVENTS_TABLE)?;
            insert.write(&row).await?;
            insert.end().await?;
            Ok::<(), anyhow::Error>(())
        })
        .await?;
        Ok(record_id)
    }
}
