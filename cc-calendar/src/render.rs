//! Pixel-space description of a contribution calendar.
//!
//! [`render`] turns a [`Summary`] into cell rectangles, month and weekday
//! labels and an optional legend. Nothing here knows about SVG; see
//! [`crate::svg`] for the encoding.

use crate::classify::{classify, Level};
use crate::grid::{CalendarGrid, DAYS_PER_WEEK};
use cc_series::Summary;
use cc_utils::dates::{format_date, month_abbrev, ANCHOR_WEEKDAY};
use chrono::{Datelike, NaiveDate};
use log::debug;
use serde::Serialize;

/// Weekday rows that get a label; the others stay blank to keep the
/// margin readable.
pub const LABELLED_WEEKDAY_ROWS: [u8; 3] = [1, 3, 5];

/// Horizontal room reserved for each legend caption.
const LEGEND_CAPTION_WIDTH: u32 = 28;

/// Sizes and margins of the rendered calendar, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    pub cell_size: u32,
    pub cell_gap: u32,
    pub margin_left: u32,
    pub margin_top: u32,
    pub margin_right: u32,
    pub margin_bottom: u32,
    /// Distance from the grid's left edge to the right end of weekday labels.
    pub weekday_label_offset: u32,
    /// Distance from the grid's top edge up to the month label baseline.
    pub month_label_offset: u32,
    pub legend: bool,
    /// Vertical room taken by the legend below the grid.
    pub legend_height: u32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            cell_size: 10,
            cell_gap: 3,
            margin_left: 32,
            margin_top: 20,
            margin_right: 8,
            margin_bottom: 8,
            weekday_label_offset: 6,
            month_label_offset: 7,
            legend: true,
            legend_height: 20,
        }
    }
}

impl Geometry {
    pub fn stride(&self) -> u32 {
        self.cell_size + self.cell_gap
    }

    /// Width of `columns` cells including the gaps between them.
    pub fn grid_width(&self, columns: u32) -> u32 {
        match columns {
            0 => 0,
            n => n * self.stride() - self.cell_gap,
        }
    }

    pub fn grid_height(&self) -> u32 {
        DAYS_PER_WEEK * self.stride() - self.cell_gap
    }

    fn legend_width(&self) -> u32 {
        2 * LEGEND_CAPTION_WIDTH + self.grid_width(Level::ALL.len() as u32)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedCell {
    pub date: NaiveDate,
    pub week_column: u32,
    pub weekday_row: u8,
    pub x: u32,
    pub y: u32,
    pub count: u64,
    pub level: Level,
}

impl RenderedCell {
    /// The cell's single textual alternative.
    pub fn description(&self) -> String {
        let noun = if self.count == 1 { "contribution" } else { "contributions" };
        format!("{} {} on {}", self.count, noun, format_date(&self.date))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedMonthLabel {
    /// `YYYY-MM`
    pub month_key: String,
    pub text: String,
    pub week_column: u32,
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextLabel {
    pub text: String,
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayLabel {
    pub weekday_row: u8,
    #[serde(flatten)]
    pub label: TextLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendSwatch {
    pub level: Level,
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Legend {
    pub less: TextLabel,
    pub swatches: Vec<LegendSwatch>,
    pub more: TextLabel,
}

/// Complete, encoding-independent geometry of one calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedCalendar {
    pub width: u32,
    pub height: u32,
    pub columns: u32,
    pub rows: u32,
    pub cell_size: u32,
    /// The maximum the levels were computed against (at least 1).
    pub max_count: u64,
    pub total: u64,
    pub cells: Vec<RenderedCell>,
    pub month_labels: Vec<PlacedMonthLabel>,
    pub weekday_labels: Vec<WeekdayLabel>,
    pub legend: Option<Legend>,
}

impl RenderedCalendar {
    /// The calendar of an empty series: margins only, nothing drawn.
    pub fn empty(geometry: &Geometry) -> Self {
        RenderedCalendar {
            width: geometry.margin_left + geometry.margin_right,
            height: geometry.margin_top + geometry.margin_bottom,
            columns: 0,
            rows: DAYS_PER_WEEK,
            cell_size: geometry.cell_size,
            max_count: 1,
            total: 0,
            cells: Vec::new(),
            month_labels: Vec::new(),
            weekday_labels: Vec::new(),
            legend: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Lay out `summary` as a calendar heatmap.
///
/// An empty summary yields [`RenderedCalendar::empty`]. Output depends
/// only on the arguments.
pub fn render(summary: &Summary, geometry: &Geometry) -> RenderedCalendar {
    let (Some(start), Some(end)) = (summary.start, summary.end) else {
        return RenderedCalendar::empty(geometry);
    };

    let grid = CalendarGrid::build(start, end);
    let max_count = summary.counts.max_count().unwrap_or(0).max(1);
    let stride = geometry.stride();
    let cell_x = |column: u32| geometry.margin_left + column * stride;
    let cell_y = |row: u8| geometry.margin_top + u32::from(row) * stride;

    let cells: Vec<RenderedCell> = grid
        .dates()
        .filter_map(|date| {
            let (week_column, weekday_row) = grid.cell_index(&date)?;
            let count = summary.counts.count_on(&date);
            Some(RenderedCell {
                date,
                week_column,
                weekday_row,
                x: cell_x(week_column),
                y: cell_y(weekday_row),
                count,
                level: classify(count, max_count),
            })
        })
        .collect();

    let month_labels = grid
        .month_labels()
        .into_iter()
        .map(|label| PlacedMonthLabel {
            text: month_abbrev(label.first_date.month()).to_string(),
            x: cell_x(label.week_column),
            y: geometry.margin_top.saturating_sub(geometry.month_label_offset),
            week_column: label.week_column,
            month_key: label.month_key,
        })
        .collect();

    let weekday_labels = LABELLED_WEEKDAY_ROWS
        .iter()
        .map(|&row| {
            let weekday = (0..row).fold(ANCHOR_WEEKDAY, |day, _| day.succ());
            WeekdayLabel {
                weekday_row: row,
                label: TextLabel {
                    text: weekday.to_string(),
                    x: geometry.margin_left.saturating_sub(geometry.weekday_label_offset),
                    y: cell_y(row) + geometry.cell_size - 1,
                },
            }
        })
        .collect();

    let grid_bottom = geometry.margin_top + geometry.grid_height();
    let legend = geometry
        .legend
        .then(|| place_legend(geometry, grid_bottom));

    let grid_width =
        geometry.margin_left + geometry.grid_width(grid.week_columns) + geometry.margin_right;
    let width = if geometry.legend {
        grid_width.max(geometry.margin_left + geometry.legend_width() + geometry.margin_right)
    } else {
        grid_width
    };
    let legend_height = if geometry.legend { geometry.legend_height } else { 0 };
    let height = grid_bottom + legend_height + geometry.margin_bottom;

    debug!(
        "Rendered {} cells in {} columns ({}x{}px, max {})",
        cells.len(),
        grid.week_columns,
        width,
        height,
        max_count
    );

    RenderedCalendar {
        width,
        height,
        columns: grid.week_columns,
        rows: DAYS_PER_WEEK,
        cell_size: geometry.cell_size,
        max_count,
        total: summary.total,
        cells,
        month_labels,
        weekday_labels,
        legend,
    }
}

fn place_legend(geometry: &Geometry, grid_bottom: u32) -> Legend {
    let top = grid_bottom + (geometry.legend_height.saturating_sub(geometry.cell_size)) / 2;
    let baseline = top + geometry.cell_size - 1;
    let first_swatch = geometry.margin_left + LEGEND_CAPTION_WIDTH;
    let swatches: Vec<LegendSwatch> = Level::ALL
        .iter()
        .enumerate()
        .map(|(i, &level)| LegendSwatch {
            level,
            x: first_swatch + i as u32 * geometry.stride(),
            y: top,
        })
        .collect();
    Legend {
        less: TextLabel {
            text: "Less".to_string(),
            x: geometry.margin_left,
            y: baseline,
        },
        more: TextLabel {
            text: "More".to_string(),
            x: first_swatch + geometry.grid_width(Level::ALL.len() as u32) + geometry.cell_gap,
            y: baseline,
        },
        swatches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_series::{merge, summarize, DailySeries};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn summary(pairs: &[(NaiveDate, u64)]) -> Summary {
        summarize(&pairs.iter().copied().collect::<DailySeries>())
    }

    #[test]
    fn empty_summary_renders_empty_calendar() {
        let geometry = Geometry::default();
        let rendered = render(&summarize(&merge(&[])), &geometry);
        assert!(rendered.is_empty());
        assert_eq!(rendered.columns, 0);
        assert!(rendered.month_labels.is_empty());
        assert!(rendered.weekday_labels.is_empty());
        assert!(rendered.legend.is_none());
        assert_eq!(rendered.width, geometry.margin_left + geometry.margin_right);
        assert_eq!(rendered.height, geometry.margin_top + geometry.margin_bottom);
    }

    #[test]
    fn single_friday_pads_back_to_sunday() {
        let rendered = render(&summary(&[(day(2024, 3, 1), 10)]), &Geometry::default());
        assert_eq!(rendered.columns, 1);
        assert_eq!(rendered.cells.len(), 6);
        assert_eq!(rendered.cells[0].date, day(2024, 2, 25));
        assert_eq!(rendered.cells[0].count, 0);
        assert_eq!(rendered.cells[0].level, Level::None);

        let friday = rendered.cells.last().unwrap();
        assert_eq!(friday.date, day(2024, 3, 1));
        assert_eq!((friday.week_column, friday.weekday_row), (0, 5));
        assert_eq!(friday.level, Level::Fourth);
        assert_eq!(rendered.max_count, 10);
    }

    #[test]
    fn cell_positions_follow_geometry() {
        let geometry = Geometry {
            cell_size: 8,
            cell_gap: 2,
            margin_left: 40,
            margin_top: 30,
            legend: false,
            ..Geometry::default()
        };
        // Sun 2024-03-03 .. Tue 2024-03-12
        let rendered = render(
            &summary(&[(day(2024, 3, 3), 1), (day(2024, 3, 12), 4)]),
            &geometry,
        );
        let last = rendered.cells.last().unwrap();
        assert_eq!((last.week_column, last.weekday_row), (1, 2));
        assert_eq!((last.x, last.y), (40 + 10, 30 + 2 * 10));
        assert_eq!(rendered.width, 40 + (2 * 10 - 2) + geometry.margin_right);
        assert_eq!(rendered.height, 30 + (7 * 10 - 2) + geometry.margin_bottom);
    }

    #[test]
    fn labels_stay_out_of_the_grid() {
        let geometry = Geometry::default();
        let rendered = render(
            &summary(&[(day(2024, 4, 16), 2), (day(2024, 6, 20), 9)]),
            &geometry,
        );
        let grid_left = geometry.margin_left;
        let grid_top = geometry.margin_top;
        for label in &rendered.month_labels {
            assert!(label.y < grid_top);
        }
        for label in &rendered.weekday_labels {
            assert!(label.label.x < grid_left);
        }
        let texts: Vec<&str> = rendered
            .weekday_labels
            .iter()
            .map(|l| l.label.text.as_str())
            .collect();
        assert_eq!(texts, vec!["Mon", "Wed", "Fri"]);
        let months: Vec<&str> = rendered.month_labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(months, vec!["Apr", "May", "Jun"]);
        let legend = rendered.legend.unwrap();
        assert_eq!(legend.swatches.len(), 5);
        assert!(legend.swatches[0].y >= grid_top + geometry.grid_height());
    }

    #[test]
    fn second_month_label_shares_column_with_first_month() {
        // May 2024 starts on a Wednesday
        let rendered = render(
            &summary(&[(day(2024, 4, 20), 1), (day(2024, 5, 8), 1)]),
            &Geometry::default(),
        );
        assert_eq!(rendered.month_labels.len(), 2);
        let may = &rendered.month_labels[1];
        assert_eq!(may.month_key, "2024-05");
        let first_of_may = rendered
            .cells
            .iter()
            .find(|c| c.date == day(2024, 5, 1))
            .unwrap();
        assert_eq!(may.week_column, first_of_may.week_column);
        assert!(rendered
            .cells
            .iter()
            .any(|c| c.week_column == may.week_column && c.date.month() == 4));
    }

    #[test]
    fn small_calendar_is_widened_for_the_legend() {
        let geometry = Geometry::default();
        let rendered = render(&summary(&[(day(2024, 3, 1), 1)]), &geometry);
        let legend = rendered.legend.as_ref().unwrap();
        assert!(legend.more.x < rendered.width);
    }

    #[test]
    fn rendering_is_reproducible() {
        let s = summary(&[(day(2023, 1, 2), 3), (day(2023, 8, 30), 12)]);
        assert_eq!(render(&s, &Geometry::default()), render(&s, &Geometry::default()));
    }

    #[test]
    fn cell_description() {
        let rendered = render(&summary(&[(day(2024, 3, 3), 1)]), &Geometry::default());
        assert_eq!(rendered.cells[0].description(), "1 contribution on 2024-03-03");
    }
}
