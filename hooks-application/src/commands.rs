pub mod rename_device_commands;
pub mod usb_event_commands;
