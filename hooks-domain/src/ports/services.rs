use async_trait::async_trait;

use crate::entities::MobileDeviceRecord;
use crate::value_objects::{AssetTag, MobileDeviceId};

#[async_trait]
pub trait InventoryService: Send + Sync {
    async fn fetch_mobile_device(&self, id: &MobileDeviceId) -> anyhow::Result<MobileDeviceRecord>;
    async fn send_device_name(&self, id: &MobileDeviceId, name: &AssetTag) -> anyhow::Result<()>;
}
