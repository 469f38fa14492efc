//! Timestamp helper.

use chrono::{DateTime, SubsecRound, Utc};

/// Current time truncated to milliseconds, the precision stored documents keep.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
