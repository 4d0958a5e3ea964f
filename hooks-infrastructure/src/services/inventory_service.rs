use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use tracing::debug;

use hooks_domain::ports::InventoryService;
use hooks_domain::{AssetTag, InventoryConfig, MobileDeviceId, MobileDeviceRecord};

/// Jamf Pro Classic API client authenticated with HTTP basic credentials.
pub struct ClassicApiInventoryService {
    client: Client,
    config: InventoryConfig,
}

impl ClassicApiInventoryService {
    pub fn new(config: InventoryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds.max(1)))
            .build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)
            .with_context(|| format!("invalid inventory url {}", self.config.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("inventory url {} cannot be a base", self.config.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn device_url(&self, id: &MobileDeviceId) -> Result<Url> {
        self.endpoint(&["JSSResource", "mobiledevices", "id", id.as_str()])
    }

    fn device_name_command_url(&self, id: &MobileDeviceId, name: &AssetTag) -> Result<Url> {
        self.endpoint(&[
            "JSSResource",
            "mobiledevicecommands",
            "command",
            "DeviceName",
            name.as_str(),
            "id",
            id.as_str(),
        ])
    }
}

#[async_trait]
impl InventoryService for ClassicApiInventoryService {
    async fn fetch_mobile_device(&self, id: &MobileDeviceId) -> Result<MobileDeviceRecord> {
        let url = self.device_url(id)?;
        debug!(%url, "fetching mobile device record");
        let record = self
            .client
            .get(url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header(ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?
            .json::<MobileDeviceRecord>()
            .await
            .context("unexpected mobile device record shape")?;
        Ok(record)
    }

    async fn send_device_name(&self, id: &MobileDeviceId, name: &AssetTag) -> Result<()> {
        let url = self.device_name_command_url(id, name)?;
        debug!(%url, "sending DeviceName command");
        self.client
            .post(url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
