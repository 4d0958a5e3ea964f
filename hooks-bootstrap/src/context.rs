use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use hooks_domain::{InventoryService, UsbEventRepository};
use hooks_infrastructure::{AppConfig, ClassicApiInventoryService, ClickhouseUsbEventRepository};

pub struct RenameContext {
    pub inventory: Arc<dyn InventoryService>,
}

impl RenameContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let inventory_config = config.to_inventory_config()?;
        info!(
            jamf_url = %inventory_config.base_url,
            jamf_username = %inventory_config.username,
            request_timeout_seconds = inventory_config.request_timeout_seconds,
            "config loaded"
        );
        let inventory = ClassicApiInventoryService::new(inventory_config)?;
        Ok(Self {
            inventory: Arc::new(inventory),
        })
    }
}

pub struct UsbContext {
    pub repo: Arc<dyn UsbEventRepository>,
    pub ensure_schema: bool,
}

impl UsbContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let store_config = config.to_store_config()?;
        info!(
            clickhouse_url = %store_config.clickhouse_url,
            clickhouse_database = %store_config.clickhouse_database,
            clickhouse_user = %store_config
                .clickhouse_user
                .as_deref()
                .unwrap_or("<none>"),
            clickhouse_password_set = store_config.clickhouse_password.is_some(),
            "config loaded"
        );
        Ok(Self {
            repo: Arc::new(ClickhouseUsbEventRepository::from_config(&store_config)),
            ensure_schema: store_config.ensure_schema,
        })
    }
}
