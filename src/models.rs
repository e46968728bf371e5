use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    pub views: u64,
    #[serde(rename = "engajamento_por_1000_views")]
    pub engagement_per_1000_views: f64,
    pub short_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub video_count: usize,
    pub mean_views: u64,
    pub mean_engagement: f64,
    pub max_short_score: f64,
    pub top_video: VideoRecord,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighlightCard {
    pub rank: usize,
    pub title: String,
    pub video_id: String,
    pub views: String,
    pub engagement: String,
    pub short_score: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub title: String,
    pub views: u64,
    pub engagement: f64,
    pub engagement_label: String,
    pub short_score: f64,
    pub short_score_label: String,
    pub url: String,
}

/// Everything the page needs, already formatted.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub page_title: String,
    pub channel_name: String,
    pub generated_at: String,
    pub video_count: usize,
    pub mean_views: String,
    pub mean_engagement: String,
    pub max_short_score: String,
    pub top_video_title: String,
    pub top_n: usize,
    pub score_scale: f64,
    pub rows: Vec<TableRow>,
    pub highlights: Vec<HighlightCard>,
    pub footer: String,
}
