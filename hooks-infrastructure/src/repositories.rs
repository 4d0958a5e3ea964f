pub mod clickhouse_usb_events;

pub use clickhouse_usb_events::*;
