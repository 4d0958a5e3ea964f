// Identifier value objects

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inventory-side identifier of a mobile device (the webhook's `jssID`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MobileDeviceId(String);

impl MobileDeviceId {
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MobileDeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Organization-assigned asset tag, used as the desired display name.
/// Never empty, and never a `.`/`..` dot segment since it is sent as a URL
/// path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetTag(String);

impl AssetTag {
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_tag_rejects_blank_values() {
        assert!(AssetTag::new("").is_none());
        assert!(AssetTag::new("   ").is_none());
        assert_eq!(AssetTag::new(" CART-12 ").unwrap().as_str(), "CART-12");
    }

    #[test]
    fn asset_tag_rejects_dot_segments() {
        assert!(AssetTag::new(".").is_none());
        assert!(AssetTag::new(" .. ").is_none());
        assert_eq!(AssetTag::new("...").unwrap().as_str(), "...");
        assert_eq!(AssetTag::new("CART.01").unwrap().as_str(), "CART.01");
    }

    #[test]
    fn device_id_is_trimmed() {
        let id = MobileDeviceId::new(" 42 ").expect("device id");
        assert_eq!(id.to_string(), "42");
        assert!(MobileDeviceId::new("").is_none());
    }
}
