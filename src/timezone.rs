//! Helpers for resolving the configured timezone into concrete dates.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Look up the UTC offset currently in effect for a canonical timezone name,
/// e.g. "Pacific/Auckland". Returns `None` if the name is not recognised.
pub(crate) fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// The current calendar date in the given canonical timezone.
///
/// This is the reference point for "today": new transactions default to it
/// and dates after it are rejected.
pub(crate) fn current_local_date(canonical_timezone: &str) -> Result<Date, Error> {
    let Some(local_offset) = get_local_offset(canonical_timezone) else {
        tracing::error!("Invalid timezone {canonical_timezone}");
        return Err(Error::InvalidTimezone(canonical_timezone.to_owned()));
    };

    Ok(OffsetDateTime::now_utc().to_offset(local_offset).date())
}
