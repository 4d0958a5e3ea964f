// Inventory record entity
// Subset of the Classic API mobile device record the rename pipeline reads

use serde::Deserialize;

use crate::value_objects::AssetTag;

#[derive(Debug, Clone, Deserialize)]
pub struct MobileDeviceRecord {
    pub mobile_device: MobileDeviceDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MobileDeviceDetail {
    pub general: MobileDeviceGeneral,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct MobileDeviceGeneral {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub asset_tag: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
}

impl MobileDeviceRecord {
    /// `None` when no tag was seeded for the device.
    pub fn asset_tag(&self) -> Option<AssetTag> {
        self.mobile_device
            .general
            .asset_tag
            .as_deref()
            .and_then(AssetTag::new)
    }
}
