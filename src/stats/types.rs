use serde::{Deserialize, Serialize};

/// Per-rating averages over the scoped sequence. `None` means no session in
/// the sequence carried a usable value for that rating — distinct from an
/// average of zero, which cannot occur for 1-5 ratings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingAverages {
    pub face_control: Option<f64>,
    pub contact: Option<f64>,
    pub confidence: Option<f64>,
}

/// One entry of a categorical frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// One chart point per session, in chronological order. Absent ratings stay
/// absent so a plotting layer can gap the line instead of drawing a zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub session_date: String,
    pub face_control: Option<u8>,
    pub contact: Option<u8>,
    pub confidence: Option<u8>,
}

/// Everything the dashboard renders, computed from one scoped sequence so the
/// KPIs, rankings, and chart always describe the same set of sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub total_count: usize,
    pub recent_count: usize,
    pub averages: RatingAverages,
    pub top_miss: Option<CategoryCount>,
    pub tag_counts: Vec<CategoryCount>,
    pub top_tags: Vec<CategoryCount>,
    pub focus_suggestions: Vec<CategoryCount>,
    pub series: Vec<SeriesPoint>,
}
