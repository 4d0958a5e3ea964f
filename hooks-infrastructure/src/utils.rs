use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;
use time::OffsetDateTime;

/// Maps a naive wall-clock time onto a UTC-labelled column value so the
/// stored digits match the local time the event happened at.
pub fn naive_to_column_time(naive: NaiveDateTime) -> Result<OffsetDateTime> {
    let nanos = i128::from(naive.and_utc().timestamp_micros()) * 1_000;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .map_err(|err| anyhow!("event time {} cannot be stored: {}", naive, err))
}
