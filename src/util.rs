use anyhow::{Context, Result};
use std::path::Path;
use time::{OffsetDateTime, UtcOffset, macros::format_description};

pub fn ensure_dir(p: &Path) -> Result<()> {
    std::fs::create_dir_all(p).with_context(|| format!("create_dir_all {}", p.display()))
}

/// The local UTC offset, or UTC when it cannot be determined.
///
/// Must be called before any other thread is spawned; afterwards `time`
/// refuses to read the local offset on most Unix platforms.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// Current time at `offset`, formatted as `YYYY-MM-DD HH:MM:SS`.
pub fn now_stamp(offset: UtcOffset) -> String {
    let fmt = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    OffsetDateTime::now_utc()
        .to_offset(offset)
        .format(&fmt)
        .unwrap_or_else(|_| "1970-01-01 00:00:00".to_string())
}
