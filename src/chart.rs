//! Chart data: mood series serialized as `{x: "YYYY-MM-DD", y: value}`
//! points, plus the calendar spans the mood chart can show.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::analysis::{MoodSeries, OutlierSet, SmoothedSeries};
use crate::models::ChartWindow;

/// One point on a line chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: String,
    pub y: i64,
}

impl ChartPoint {
    fn new(date: NaiveDate, y: i64) -> Self {
        Self {
            x: date.format("%Y-%m-%d").to_string(),
            y,
        }
    }
}

/// Points for a chart span, with the span bounds the x-axis should use.
#[derive(Debug, Clone, Serialize)]
pub struct MoodChart {
    pub window: ChartWindow,
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
    pub points: Vec<ChartPoint>,
}

/// Raw moods; placeholder days have nothing to plot and are skipped.
pub fn raw_points(series: &MoodSeries) -> Vec<ChartPoint> {
    series
        .iter()
        .filter_map(|o| o.mood.map(|m| ChartPoint::new(o.date, i64::from(m))))
        .collect()
}

pub fn smoothed_points(smoothed: &SmoothedSeries) -> Vec<ChartPoint> {
    smoothed.iter().map(|p| ChartPoint::new(p.date, p.value)).collect()
}

pub fn outlier_points(outliers: &OutlierSet) -> Vec<ChartPoint> {
    outliers
        .iter()
        .map(|o| ChartPoint::new(o.date, i64::from(o.mood)))
        .collect()
}

impl ChartWindow {
    /// Length of the span in months. `None` for `AllTime`.
    pub fn months(&self) -> Option<u32> {
        match self {
            ChartWindow::Month => Some(1),
            ChartWindow::Quarter => Some(3),
            ChartWindow::BiAnnual => Some(6),
            ChartWindow::Year => Some(12),
            ChartWindow::AllTime => None,
        }
    }

    /// Span containing `today`, moved `offset` spans back (negative) or
    /// forward (positive).
    ///
    /// Returns `None` when the span would start after the current one, when
    /// the offset reaches past the calendar chrono can represent, or when
    /// `AllTime` is asked to move. `AllTime` runs from the first logged
    /// day (or today, with no logs) through today.
    pub fn bounds(
        &self,
        today: NaiveDate,
        offset: i32,
        first_log: Option<NaiveDate>,
    ) -> Option<(NaiveDate, NaiveDate)> {
        if offset > 0 {
            return None;
        }
        let Some(months) = self.months() else {
            if offset != 0 {
                return None;
            }
            let start = first_log.unwrap_or(today).min(today);
            return Some((start, today));
        };

        let shift = Months::new(months.checked_mul(offset.unsigned_abs())?);
        let anchor = today.checked_sub_months(shift)?;
        period_containing(anchor, months)
    }
}

/// Calendar-aligned span of `months` months that contains `date`.
fn period_containing(date: NaiveDate, months: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start_month = (date.month0() / months) * months + 1;
    let start = NaiveDate::from_ymd_opt(date.year(), start_month, 1)?;
    let end = start.checked_add_months(Months::new(months))?.pred_opt()?;
    Some((start, end))
}

/// Builds chart data for `series` over the given span.
pub fn mood_chart(
    series: &MoodSeries,
    window: ChartWindow,
    bounds: (NaiveDate, NaiveDate),
) -> MoodChart {
    let (min_date, max_date) = bounds;
    MoodChart {
        window,
        min_date,
        max_date,
        points: raw_points(&series.clip(min_date, max_date)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Outlier, SmoothedPoint};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn raw_points_skip_placeholders() {
        let series = MoodSeries::from_daily(d("2016-10-01"), [Some(5), None, Some(-3)]);
        let points = raw_points(&series);
        assert_eq!(
            points,
            vec![
                ChartPoint { x: "2016-10-01".into(), y: 5 },
                ChartPoint { x: "2016-10-03".into(), y: -3 },
            ]
        );
    }

    #[test]
    fn point_serializes_as_x_y() {
        let points = smoothed_points(&vec![SmoothedPoint { date: d("2016-10-29"), value: 7 }]);
        let json = serde_json::to_value(&points).unwrap();
        assert_eq!(json, serde_json::json!([{ "x": "2016-10-29", "y": 7 }]));
    }

    #[test]
    fn outlier_points_keep_mood() {
        let points = outlier_points(&vec![Outlier { date: d("2016-10-02"), mood: 45 }]);
        assert_eq!(points[0].y, 45);
    }

    #[test]
    fn month_bounds() {
        let bounds = ChartWindow::Month.bounds(d("2016-02-17"), 0, None);
        assert_eq!(bounds, Some((d("2016-02-01"), d("2016-02-29"))));
    }

    #[test]
    fn quarter_bounds() {
        let bounds = ChartWindow::Quarter.bounds(d("2016-11-05"), 0, None);
        assert_eq!(bounds, Some((d("2016-10-01"), d("2016-12-31"))));
    }

    #[test]
    fn bi_annual_bounds_split_at_july() {
        assert_eq!(
            ChartWindow::BiAnnual.bounds(d("2016-06-30"), 0, None),
            Some((d("2016-01-01"), d("2016-06-30")))
        );
        assert_eq!(
            ChartWindow::BiAnnual.bounds(d("2016-07-01"), 0, None),
            Some((d("2016-07-01"), d("2016-12-31")))
        );
    }

    #[test]
    fn year_bounds() {
        let bounds = ChartWindow::Year.bounds(d("2016-10-18"), 0, None);
        assert_eq!(bounds, Some((d("2016-01-01"), d("2016-12-31"))));
    }

    #[test]
    fn negative_offset_moves_back_whole_spans() {
        let bounds = ChartWindow::Month.bounds(d("2016-03-31"), -1, None);
        assert_eq!(bounds, Some((d("2016-02-01"), d("2016-02-29"))));

        let bounds = ChartWindow::Quarter.bounds(d("2016-01-15"), -2, None);
        assert_eq!(bounds, Some((d("2015-07-01"), d("2015-09-30"))));
    }

    #[test]
    fn cannot_move_past_current_span() {
        assert_eq!(ChartWindow::Month.bounds(d("2016-10-18"), 1, None), None);
    }

    #[test]
    fn huge_negative_offset_has_no_span() {
        let today = d("2016-10-18");
        assert_eq!(ChartWindow::Year.bounds(today, -400_000_000, None), None);
        assert_eq!(ChartWindow::Month.bounds(today, i32::MIN, None), None);
        // Within u32 months but before chrono's earliest date.
        assert_eq!(ChartWindow::Quarter.bounds(today, -1_100_000, None), None);
    }

    #[test]
    fn all_time_runs_from_first_log() {
        let today = d("2016-10-18");
        assert_eq!(
            ChartWindow::AllTime.bounds(today, 0, Some(d("2016-01-04"))),
            Some((d("2016-01-04"), today))
        );
        assert_eq!(ChartWindow::AllTime.bounds(today, 0, None), Some((today, today)));
        assert_eq!(ChartWindow::AllTime.bounds(today, -1, None), None);
    }

    #[test]
    fn mood_chart_clips_to_bounds() {
        let series = MoodSeries::from_daily(d("2016-09-29"), (1..=5).map(Some));
        let bounds = ChartWindow::Month.bounds(d("2016-10-18"), 0, None).unwrap();
        let chart = mood_chart(&series, ChartWindow::Month, bounds);
        let ys: Vec<_> = chart.points.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![3, 4, 5]);
        assert_eq!(chart.min_date, d("2016-10-01"));
    }
}
