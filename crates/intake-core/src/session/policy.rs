//! What happens to later steps when an earlier answer changes.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Policy applied when a step is completed again with a different payload
/// while later steps already hold data.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DownstreamPolicy {
    /// Keep later steps' data as collected.
    #[default]
    Preserve,
    /// Reset every later step, reopen the session and drop its summary.
    Invalidate,
}
