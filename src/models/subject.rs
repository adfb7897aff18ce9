use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Someone whose mood is being tracked. The id is the opaque key handed to
/// observation sources; nothing else about the subject reaches the analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub display_name: String,
    pub created_at: NaiveDateTime,
}
