use tracing::{error, info, warn};

use hooks_domain::{decode_enrollment_event, EnrollmentEvent, InventoryService};

use crate::outcome::{RenameOutcome, RenameSummary};
use crate::RenameError;

/// Decodes an enrollment webhook. Nothing else runs when this fails.
pub fn decode_enrollment(raw_payload: &str) -> Result<EnrollmentEvent, RenameError> {
    decode_enrollment_event(raw_payload).map_err(|err| {
        error!("failed to decode enrollment payload: {}", err);
        RenameError::from(err)
    })
}

/// Renames the enrolled device to its asset tag unless it is a bedside
/// device or has no tag seeded.
pub async fn rename_device(
    inventory: &dyn InventoryService,
    event: EnrollmentEvent,
) -> Result<RenameOutcome, RenameError> {
    if let Some(room) = event.assigned_room() {
        info!(device_id = %event.device_id, room, "bedside device, skipping rename");
        return Ok(RenameOutcome::BedsideDevice {
            device_id: event.device_id.clone(),
            room: room.to_string(),
        });
    }

    let record = inventory
        .fetch_mobile_device(&event.device_id)
        .await
        .map_err(|source| {
            error!(device_id = %event.device_id, "device lookup failed: {:#}", source);
            RenameError::LookupFailed {
                device_id: event.device_id.clone(),
                source,
            }
        })?;

    let Some(asset_tag) = record.asset_tag() else {
        warn!(device_id = %event.device_id, "no asset tag seeded");
        return Ok(RenameOutcome::NoAssetTag {
            device_id: event.device_id,
        });
    };

    inventory
        .send_device_name(&event.device_id, &asset_tag)
        .await
        .map_err(|source| {
            error!(device_id = %event.device_id, "rename command failed: {:#}", source);
            RenameError::RenameFailed {
                device_id: event.device_id.clone(),
                source,
            }
        })?;

    info!(
        device_id = %event.device_id,
        serial_number = %event.serial_number,
        new_name = %asset_tag,
        "device renamed"
    );
    Ok(RenameOutcome::Renamed(RenameSummary {
        device_id: event.device_id,
        serial_number: event.serial_number,
        enrolled_at: event.enrolled_at,
        old_name: event.device_name,
        new_name: asset_tag,
    }))
}
