use async_trait::async_trait;

use crate::entities::UsbInsertionEvent;

#[async_trait]
pub trait UsbEventRepository: Send + Sync {
    async fn ensure_schema(&self) -> anyhow::Result<()>;
    /// Appends one record and returns its generated record id.
    async fn insert_usb_event(&self, event: &UsbInsertionEvent) -> anyhow::Result<String>;
}
