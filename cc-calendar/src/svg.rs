//! SVG encoding of a [`RenderedCalendar`].

use crate::classify::Level;
use crate::render::{RenderedCalendar, TextLabel};

/// Fill colors per level plus the label styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub levels: [String; 5],
    pub text: String,
    pub font_family: String,
    pub font_size: u32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            levels: [
                "#ebedf0".to_string(),
                "#9be9a8".to_string(),
                "#40c463".to_string(),
                "#30a14e".to_string(),
                "#216e39".to_string(),
            ],
            text: "#767676".to_string(),
            font_family: "-apple-system, BlinkMacSystemFont, Helvetica, Arial, sans-serif"
                .to_string(),
            font_size: 9,
        }
    }
}

impl Palette {
    pub fn fill(&self, level: Level) -> &str {
        &self.levels[level.index()]
    }
}

/// Escape text for use in SVG character data and attribute values.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn text_element(label: &TextLabel, anchor: &str) -> String {
    format!(
        "<text x=\"{}\" y=\"{}\" text-anchor=\"{}\">{}</text>\n",
        label.x,
        label.y,
        anchor,
        escape(&label.text)
    )
}

/// Encode the calendar as a standalone SVG document.
///
/// Every cell becomes a `<rect>` at its exact position with a `<title>`
/// holding its text alternative; labels become `<text>` elements.
pub fn to_svg(calendar: &RenderedCalendar, palette: &Palette) -> String {
    let size = calendar.cell_size;
    let mut out = String::new();
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" role=\"img\">\n",
        w = calendar.width,
        h = calendar.height
    ));
    out.push_str(&format!(
        "<title>{} contributions</title>\n",
        calendar.total
    ));
    out.push_str(&format!(
        "<g font-family=\"{}\" font-size=\"{}\" fill=\"{}\">\n",
        escape(&palette.font_family),
        palette.font_size,
        escape(&palette.text)
    ));
    // When two months start in one column only the later one is drawn
    let mut month_labels = calendar.month_labels.iter().peekable();
    while let Some(label) = month_labels.next() {
        if month_labels
            .peek()
            .is_some_and(|next| next.week_column == label.week_column)
        {
            continue;
        }
        out.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" data-month=\"{}\">{}</text>\n",
            label.x,
            label.y,
            label.month_key,
            escape(&label.text)
        ));
    }
    for label in &calendar.weekday_labels {
        out.push_str(&text_element(&label.label, "end"));
    }
    if let Some(legend) = &calendar.legend {
        out.push_str(&text_element(&legend.less, "start"));
        out.push_str(&text_element(&legend.more, "start"));
    }
    out.push_str("</g>\n");

    for cell in &calendar.cells {
        out.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{size}\" height=\"{size}\" rx=\"2\" fill=\"{}\" data-date=\"{}\" data-count=\"{}\" data-level=\"{}\"><title>{}</title></rect>\n",
            cell.x,
            cell.y,
            escape(palette.fill(cell.level)),
            cell.date,
            cell.count,
            u8::from(cell.level),
            escape(&cell.description())
        ));
    }
    if let Some(legend) = &calendar.legend {
        for swatch in &legend.swatches {
            out.push_str(&format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{size}\" height=\"{size}\" rx=\"2\" fill=\"{}\"/>\n",
                swatch.x,
                swatch.y,
                escape(palette.fill(swatch.level))
            ));
        }
    }
    out.push_str("</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render, Geometry};
    use cc_series::{summarize, DailySeries};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_svg_has_one_rect_per_cell() {
        let series: DailySeries = vec![(day(2024, 3, 1), 10), (day(2024, 3, 4), 2)]
            .into_iter()
            .collect();
        let calendar = render(
            &summarize(&series),
            &Geometry {
                legend: false,
                ..Geometry::default()
            },
        );
        let svg = to_svg(&calendar, &Palette::default());
        assert_eq!(svg.matches("<rect ").count(), calendar.cells.len());
        assert!(svg.contains("data-date=\"2024-03-01\" data-count=\"10\" data-level=\"4\""));
        assert!(svg.contains("<title>10 contributions on 2024-03-01</title>"));
        assert!(svg.contains(&format!("width=\"{}\"", calendar.width)));
        assert!(svg.contains(">Mon</text>"));
        assert!(svg.contains("data-month=\"2024-03\">Mar</text>"));
    }

    #[test]
    fn test_months_sharing_a_column_do_not_overlap() {
        // Friday 2024-03-01 pads back to Sunday 2024-02-25: Feb and Mar share column 0
        let series: DailySeries = vec![(day(2024, 3, 1), 1)].into_iter().collect();
        let calendar = render(&summarize(&series), &Geometry::default());
        assert_eq!(calendar.month_labels.len(), 2);

        let svg = to_svg(&calendar, &Palette::default());
        assert_eq!(svg.matches("data-month=").count(), 1);
        assert!(!svg.contains(">Feb</text>"));
        assert!(svg.contains("data-month=\"2024-03\">Mar</text>"));
    }

    #[test]
    fn test_months_in_distinct_columns_are_all_drawn() {
        let series: DailySeries = vec![(day(2024, 4, 14), 1), (day(2024, 5, 10), 2)]
            .into_iter()
            .collect();
        let calendar = render(&summarize(&series), &Geometry::default());
        let svg = to_svg(&calendar, &Palette::default());
        assert!(svg.contains(">Apr</text>"));
        assert!(svg.contains(">May</text>"));
    }

    #[test]
    fn test_cell_geometry_survives_encoding() {
        let series: DailySeries = vec![(day(2023, 12, 30), 1), (day(2024, 1, 9), 3)]
            .into_iter()
            .collect();
        let calendar = render(&summarize(&series), &Geometry::default());
        let svg = to_svg(&calendar, &Palette::default());
        for cell in &calendar.cells {
            let needle = format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"2\" fill=\"{}\" data-date=\"{}\"",
                cell.x,
                cell.y,
                calendar.cell_size,
                calendar.cell_size,
                Palette::default().fill(cell.level),
                cell.date
            );
            assert!(svg.contains(&needle), "missing {needle}");
        }
        // five legend swatches on top of the cells
        assert_eq!(svg.matches("<rect ").count(), calendar.cells.len() + 5);
        assert!(svg.contains(">Less</text>"));
    }

    #[test]
    fn test_empty_calendar_is_valid_svg() {
        let calendar = render(&summarize(&DailySeries::new()), &Geometry::default());
        let svg = to_svg(&calendar, &Palette::default());
        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<rect ").count(), 0);
        assert!(svg.contains("<title>0 contributions</title>"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
