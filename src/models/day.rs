use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lowest mood a day can be rated with (bottom of the chart axis).
pub const MOOD_MIN: i32 = -50;
/// Highest mood a day can be rated with (top of the chart axis).
pub const MOOD_MAX: i32 = 50;

/// One logged day for a subject.
///
/// `overall_mood` is `None` for placeholder days that were created before
/// the subject rated them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLog {
    pub id: i64,
    pub subject_id: i64,
    pub date: NaiveDate,
    pub overall_mood: Option<i32>,
    pub max_mood: Option<i32>,
    pub min_mood: Option<i32>,
    pub notes: Option<String>,
}
