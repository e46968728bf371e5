use chrono::{DateTime, TimeZone};

use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::format::{truncate_title, NumberFormat};
use crate::models::{DashboardView, HighlightCard, ReportSummary, TableRow, VideoRecord};

pub const VIDEO_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

pub fn summarize(records: &[VideoRecord]) -> Result<ReportSummary> {
    let top_video = records.first().ok_or(DashboardError::EmptyDataset)?;
    let count = records.len() as f64;

    let total_views: f64 = records.iter().map(|record| record.views as f64).sum();
    let total_engagement: f64 = records
        .iter()
        .map(|record| record.engagement_per_1000_views)
        .sum();
    let max_short_score = records
        .iter()
        .map(|record| record.short_score)
        .fold(f64::NEG_INFINITY, f64::max);

    Ok(ReportSummary {
        video_count: records.len(),
        mean_views: (total_views / count).round() as u64,
        mean_engagement: total_engagement / count,
        max_short_score,
        top_video: top_video.clone(),
    })
}

/// Clamps a requested row count into `[1, total]`.
pub fn clamp_top_n(n: usize, total: usize) -> usize {
    n.clamp(1, total.max(1))
}

/// First `n` records in table order. The table is never re-sorted.
pub fn select_top_n(records: &[VideoRecord], n: usize) -> &[VideoRecord] {
    &records[..clamp_top_n(n, records.len()).min(records.len())]
}

pub fn render_video_link(video_id: &str) -> String {
    format!("{VIDEO_URL_PREFIX}{video_id}")
}

pub fn render_top_highlights(
    records: &[VideoRecord],
    k: usize,
    format: &NumberFormat,
) -> Vec<HighlightCard> {
    records
        .iter()
        .take(k)
        .enumerate()
        .map(|(index, record)| HighlightCard {
            rank: index + 1,
            title: record.title.clone(),
            video_id: record.video_id.clone(),
            views: format.group_thousands(record.views),
            engagement: format.fixed(record.engagement_per_1000_views, 2),
            short_score: format.fixed(record.short_score, 2),
            url: render_video_link(&record.video_id),
        })
        .collect()
}

pub fn build_view<Tz>(
    records: &[VideoRecord],
    summary: &ReportSummary,
    top_n: usize,
    config: &DashboardConfig,
    generated_at: &DateTime<Tz>,
) -> DashboardView
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let format = &config.number_format;
    let selected = select_top_n(records, top_n);

    let rows = selected
        .iter()
        .map(|record| TableRow {
            title: record.title.clone(),
            views: record.views,
            engagement: record.engagement_per_1000_views,
            engagement_label: format.fixed(record.engagement_per_1000_views, 2),
            short_score: record.short_score,
            short_score_label: format.fixed(record.short_score, 2),
            url: render_video_link(&record.video_id),
        })
        .collect();

    DashboardView {
        page_title: config.page_title.clone(),
        channel_name: config.channel_name.clone(),
        generated_at: generated_at.format(TIMESTAMP_FORMAT).to_string(),
        video_count: summary.video_count,
        mean_views: format.group_thousands(summary.mean_views),
        mean_engagement: format.fixed(summary.mean_engagement, 2),
        max_short_score: format.fixed(summary.max_short_score, 2),
        top_video_title: truncate_title(&summary.top_video.title, config.title_max_chars),
        top_n: selected.len(),
        score_scale: summary.max_short_score,
        rows,
        highlights: render_top_highlights(records, config.highlight_count, format),
        footer: format!(
            "Pipeline automático de análise e geração de Shorts • Protótipo por {}",
            config.author
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn record(video_id: &str, views: u64, engagement: f64, score: f64) -> VideoRecord {
        VideoRecord {
            video_id: video_id.to_string(),
            title: format!("Vídeo {video_id}"),
            views,
            engagement_per_1000_views: engagement,
            short_score: score,
        }
    }

    fn sample() -> Vec<VideoRecord> {
        vec![
            record("a", 125_000, 14.2, 9.5),
            record("b", 48_300, 11.05, 8.25),
            record("c", 2_100, 6.0, 4.0),
            record("d", 900, 2.5, 1.75),
        ]
    }

    #[test]
    fn summarize_computes_means_and_max() {
        let records = vec![record("x", 100, 1.0, 5.0), record("y", 300, 3.0, 7.0)];
        let summary = summarize(&records).unwrap();
        let format = NumberFormat::default();

        assert_eq!(summary.video_count, 2);
        assert_eq!(summary.mean_views, 200);
        assert_eq!(format.fixed(summary.mean_engagement, 2), "2.00");
        assert_eq!(format.fixed(summary.max_short_score, 2), "7.00");
        assert_eq!(summary.top_video, records[0]);
    }

    #[test]
    fn summarize_rounds_mean_views_to_nearest() {
        let records = vec![record("x", 1, 0.0, 1.0), record("y", 2, 0.0, 1.0)];
        assert_eq!(summarize(&records).unwrap().mean_views, 2);
    }

    #[test]
    fn summarize_rejects_empty_input() {
        assert!(matches!(summarize(&[]), Err(DashboardError::EmptyDataset)));
    }

    #[test]
    fn top_n_is_an_unsorted_prefix() {
        let records = vec![
            record("low", 1, 1.0, 1.0),
            record("high", 1, 1.0, 9.0),
            record("mid", 1, 1.0, 5.0),
        ];

        let top = select_top_n(&records, 2);
        assert_eq!(top, &records[..2]);
        assert_eq!(top[0].video_id, "low");
    }

    #[test]
    fn top_n_clamps_out_of_range_requests() {
        let records = sample();
        assert_eq!(select_top_n(&records, 0).len(), 1);
        assert_eq!(select_top_n(&records, 3).len(), 3);
        assert_eq!(select_top_n(&records, 50).len(), records.len());
        assert!(select_top_n(&[], 5).is_empty());
    }

    #[test]
    fn video_link_is_plain_youtube_url() {
        assert_eq!(
            render_video_link("abc123"),
            "https://www.youtube.com/watch?v=abc123"
        );
    }

    #[test]
    fn highlights_stop_at_available_records() {
        let records = vec![record("x", 100, 1.0, 5.0), record("y", 300, 3.0, 7.0)];
        let cards = render_top_highlights(&records, 3, &NumberFormat::default());

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].rank, 1);
        assert_eq!(cards[1].rank, 2);
        assert_eq!(cards[1].url, "https://www.youtube.com/watch?v=y");
    }

    #[test]
    fn highlights_format_numbers() {
        let cards = render_top_highlights(&sample(), 3, &NumberFormat::default());

        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].views, "125.000");
        assert_eq!(cards[1].engagement, "11.05");
        assert_eq!(cards[1].short_score, "8.25");
    }

    #[test]
    fn view_carries_kpis_rows_and_timestamp() {
        let records = sample();
        let summary = summarize(&records).unwrap();
        let config = DashboardConfig::default();
        let generated_at = FixedOffset::west_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 3, 7, 9, 5, 0)
            .unwrap();

        let view = build_view(&records, &summary, 2, &config, &generated_at);

        assert_eq!(view.generated_at, "07/03/2026 09:05");
        assert_eq!(view.video_count, 4);
        assert_eq!(view.mean_views, "44.075");
        assert_eq!(view.max_short_score, "9.50");
        assert_eq!(view.top_video_title, "Vídeo a...");
        assert_eq!(view.top_n, 2);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[1].short_score_label, "8.25");
        assert_eq!(view.rows[1].engagement, 11.05);
        assert_eq!(view.rows[1].engagement_label, "11.05");
        assert_eq!(view.highlights.len(), 3);
        assert!(view.footer.ends_with("Carlos Becker"));
    }

    #[test]
    fn view_clamps_top_n_to_table_size() {
        let records = sample();
        let summary = summarize(&records).unwrap();
        let config = DashboardConfig::default();
        let generated_at = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .unwrap();

        let view = build_view(&records, &summary, 99, &config, &generated_at);
        assert_eq!(view.top_n, 4);
        assert_eq!(view.rows.len(), 4);
    }
}
