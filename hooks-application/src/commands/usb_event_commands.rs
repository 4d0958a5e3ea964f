use tracing::{debug, error, info};

use hooks_domain::{decode_usb_event, UsbDecode, UsbEventRepository, UsbInsertionEvent};

use crate::outcome::UsbOutcome;
use crate::UsbError;

/// Decodes a security webhook, gating on `USBInserted` before the rest of the
/// event shape is required.
pub fn decode_usb_insertion(raw_payload: &str) -> Result<UsbDecode, UsbError> {
    let decoded = decode_usb_event(raw_payload).map_err(|err| {
        error!("failed to decode security event payload: {}", err);
        UsbError::from(err)
    })?;

    match &decoded {
        UsbDecode::Insertion(event) => debug!(
            facts = ?event.event_names.as_slice(),
            event_type = event.event_type.as_deref().unwrap_or("<none>"),
            media_name = event.media_name.as_deref().unwrap_or("<none>"),
            host = ?event.host_record,
            "decoded USB insertion"
        ),
        UsbDecode::NotInsertion(event_names) => {
            info!(facts = ?event_names.as_slice(), "not a USB inserted event")
        }
    }
    Ok(decoded)
}

/// Appends the insertion to the store, creating the schema first when asked.
pub async fn persist_usb_event(
    repo: &dyn UsbEventRepository,
    ensure_schema: bool,
    event: &UsbInsertionEvent,
) -> Result<UsbOutcome, UsbError> {
    let persist_failed = |source: anyhow::Error| {
        error!(event_uuid = %event.event_uuid, "failed to persist USB event: {:#}", source);
        UsbError::PersistFailed {
            event_uuid: event.event_uuid.clone(),
            source,
        }
    };

    if ensure_schema {
        repo.ensure_schema().await.map_err(persist_failed)?;
    }
    let record_id = repo.insert_usb_event(event).await.map_err(persist_failed)?;

    info!(
        event_uuid = %event.event_uuid,
        record_id = %record_id,
        encrypted = event.encryption_status,
        "USB insertion recorded"
    );
    Ok(UsbOutcome::Recorded {
        record_id,
        event_uuid: event.event_uuid.clone(),
        host_serial: event.host_serial.clone(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::anyhow;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    use hooks_domain::usb_event_local_time;

    use super::*;

    #[derive(Default)]
    struct MemoryRepo {
        fail_schema: bool,
        fail_insert: bool,
        schema_checks: Mutex<usize>,
        records: Mutex<Vec<(String, UsbInsertionEvent)>>,
    }

    impl MemoryRepo {
        fn records(&self) -> Vec<(String, UsbInsertionEvent)> {
            self.records.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UsbEventRepository for MemoryRepo {
        async fn ensure_schema(&self) -> anyhow::Result<()> {
            *self.schema_checks.lock().unwrap() += 1;
            if self.fail_schema {
                return Err(anyhow!("Code: 497. DB::Exception: Not enough privileges"));
            }
            Ok(())
        }

        async fn insert_usb_event(&self, event: &UsbInsertionEvent) -> anyhow::Result<String> {
            if self.fail_insert {
                return Err(anyhow!("Code: 81. DB::Exception: Database protect does not exist"));
            }
            let mut records = self.records.lock().unwrap();
            let record_id = format!("record-{}", records.len() + 1);
            records.push((record_id.clone(), event.clone()));
            Ok(record_id)
        }
    }

    async fn record_usb_event(
        repo: &MemoryRepo,
        ensure_schema: bool,
        raw: &str,
    ) -> Result<UsbOutcome, UsbError> {
        match decode_usb_insertion(raw)? {
            UsbDecode::Insertion(event) => persist_usb_event(repo, ensure_schema, &event).await,
            UsbDecode::NotInsertion(event_names) => Ok(UsbOutcome::NotUsbInsertion { event_names }),
        }
    }

    fn payload(facts: Value) -> String {
        json!({
            "input": {
                "eventType": "SystemEvent",
                "host": {"hostname": "mac1", "serial": "C02ABC123"},
                "match": {
                    "facts": facts,
                    "event": {
                        "timestamp": 1_700_000_000,
                        "uuid": "abc-123",
                        "device": {
                            "mediaName": "SanDisk",
                            "isEncrypted": true,
                            "vendorName": "SanDisk",
                            "deviceModel": "Cruzer",
                            "serialNumber": "SN123"
                        }
                    }
                }
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn insertion_is_persisted_once() {
        let repo = MemoryRepo::default();
        let outcome = record_usb_event(&repo, true, &payload(json!([{"name": "USBInserted"}])))
            .await
            .expect("outcome");

        let records = repo.records();
        assert_eq!(records.len(), 1);
        let (record_id, event) = &records[0];
        assert_eq!(event.host_serial.as_deref(), Some("C02ABC123"));
        assert!(event.encryption_status);
        assert_eq!(event.event_uuid, "abc-123");
        assert_eq!(
            event.event_timestamp,
            usb_event_local_time(1_700_000_000.0).unwrap()
        );
        assert_eq!(*repo.schema_checks.lock().unwrap(), 1);
        assert_eq!(
            outcome,
            UsbOutcome::Recorded {
                record_id: record_id.clone(),
                event_uuid: "abc-123".to_string(),
                host_serial: Some("C02ABC123".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn other_events_are_not_persisted() {
        let repo = MemoryRepo::default();
        let outcome = record_usb_event(&repo, true, &payload(json!([{"name": "USBEjected"}])))
            .await
            .expect("outcome");
        assert!(matches!(outcome, UsbOutcome::NotUsbInsertion { .. }));
        assert!(repo.records().is_empty());
        assert_eq!(*repo.schema_checks.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn replaying_a_payload_stores_two_records() {
        let repo = MemoryRepo::default();
        let raw = payload(json!([{"name": "USBInserted"}]));
        record_usb_event(&repo, false, &raw).await.expect("first");
        record_usb_event(&repo, false, &raw).await.expect("second");

        let records = repo.records();
        assert_eq!(records.len(), 2);
        assert_ne!(records[0].0, records[1].0);
        assert_eq!(records[0].1, records[1].1);
        assert_eq!(*repo.schema_checks.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn store_failure_is_persist_failed() {
        let repo = MemoryRepo {
            fail_insert: true,
            ..MemoryRepo::default()
        };
        let err = record_usb_event(&repo, false, &payload(json!([{"name": "USBInserted"}])))
            .await
            .expect_err("persist failure");
        match err {
            UsbError::PersistFailed { event_uuid, .. } => assert_eq!(event_uuid, "abc-123"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn schema_failure_is_persist_failed_and_skips_insert() {
        let repo = MemoryRepo {
            fail_schema: true,
            ..MemoryRepo::default()
        };
        let err = record_usb_event(&repo, true, &payload(json!([{"name": "USBInserted"}])))
            .await
            .expect_err("schema failure");
        assert!(matches!(err, UsbError::PersistFailed { .. }));
        assert_eq!(*repo.schema_checks.lock().unwrap(), 1);
        assert!(repo.records().is_empty());
    }

    #[tokio::test]
    async fn unparseable_payload_is_malformed() {
        let repo = MemoryRepo::default();
        let err = record_usb_event(&repo, true, "not json")
            .await
            .expect_err("malformed");
        assert!(matches!(err, UsbError::MalformedPayload(_)));
        assert!(repo.records().is_empty());
    }
}
