use super::DateTimeInput;
use crate::picker::{Press, StepDirection};
use crate::terminal::CursorPos;
use crate::ui::span::{Span, SpanLine, line_width};
use crate::ui::style::{Color, Style};
use crate::views::{CalendarView, Cell, Grid, TimePanel};
use unicode_width::UnicodeWidthStr;

const INDENT: &str = "  ";
const PANEL_WIDTH: usize = 28;
const DAY_CELL_WIDTH: usize = 4;
const WIDE_CELL_WIDTH: usize = 7;
const COUNTER_WIDTH: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum HitTarget {
    TextField,
    Previous,
    Next,
    Header,
    Footer,
    Cell { row: usize, col: usize },
    Stepper(Press),
    DayPart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HitRegion {
    row: u16,
    start: u16,
    end: u16,
    target: HitTarget,
}

/// Rendered lines plus the clickable regions they contain.
#[derive(Debug, Default)]
pub(super) struct Frame {
    pub(super) lines: Vec<SpanLine>,
    regions: Vec<HitRegion>,
    pub(super) cursor: Option<CursorPos>,
}

impl Frame {
    pub(super) fn hit(&self, col: u16, row: u16) -> Option<HitTarget> {
        self.regions
            .iter()
            .find(|region| region.row == row && (region.start..region.end).contains(&col))
            .map(|region| region.target)
    }

    fn next_row(&self) -> u16 {
        self.lines.len() as u16
    }

    fn region(&mut self, start: usize, width: usize, target: HitTarget) {
        self.regions.push(HitRegion {
            row: self.next_row(),
            start: start as u16,
            end: (start + width) as u16,
            target,
        });
    }
}

impl DateTimeInput {
    pub(super) fn frame(&self, focused: bool) -> Frame {
        let mut frame = Frame::default();
        self.render_field(&mut frame, focused);

        if !self.picker.is_calendar_visible() {
            return frame;
        }
        let Some(view) = self.picker.calendar_view() else {
            return frame;
        };
        let highlight = focused.then(|| self.highlight_position(&view));
        match &view {
            CalendarView::Time(panel) => render_time(&mut frame, panel, highlight),
            CalendarView::Days(grid) => render_grid(&mut frame, grid, DAY_CELL_WIDTH, highlight),
            CalendarView::Months(grid) | CalendarView::Years(grid) => {
                render_grid(&mut frame, grid, WIDE_CELL_WIDTH, highlight)
            }
        }
        frame
    }

    fn render_field(&self, frame: &mut Frame, focused: bool) {
        if self.picker.is_static() {
            frame
                .lines
                .push(vec![Span::new(self.base.prefixed_label(focused))]);
            return;
        }

        let prefix = format!("{}: ", self.base.prefixed_label(focused));
        let prefix_width = UnicodeWidthStr::width(prefix.as_str());
        let mut line = vec![Span::new(prefix)];
        if self.text.is_empty() {
            line.push(Span::styled(
                self.picker.full_format().to_string(),
                Style::new().color(Color::DarkGrey),
            ));
        } else {
            line.push(Span::new(self.text.clone()));
        }

        if focused {
            let before: String = self.text.chars().take(self.cursor).collect();
            frame.cursor = Some(CursorPos {
                col: (prefix_width + UnicodeWidthStr::width(before.as_str())) as u16,
                row: frame.next_row(),
            });
        }
        let width = line_width(&line).max(prefix_width + 1);
        frame.region(0, width, HitTarget::TextField);
        frame.lines.push(line);
    }
}

// ── Grid views ────────────────────────────────────────────────────────────────

fn render_grid(frame: &mut Frame, grid: &Grid, cell_width: usize, highlight: Option<(usize, usize)>) {
    let indent = INDENT.len();
    let title_width = PANEL_WIDTH - 2;

    frame.region(indent, 1, HitTarget::Previous);
    frame.region(indent + 1, title_width, HitTarget::Header);
    frame.region(indent + 1 + title_width, 1, HitTarget::Next);
    frame.lines.push(vec![
        Span::new(INDENT),
        Span::styled("‹", Style::new().color(Color::Cyan)),
        Span::styled(
            format!("{:^title_width$}", grid.title),
            Style::new().bold(),
        ),
        Span::styled("›", Style::new().color(Color::Cyan)),
    ]);

    if !grid.columns.is_empty() {
        let mut line = vec![Span::new(INDENT)];
        for name in &grid.columns {
            line.push(Span::styled(
                format!("{name:^cell_width$}"),
                Style::new().color(Color::DarkGrey),
            ));
        }
        frame.lines.push(line);
    }

    for (row, cells) in grid.rows.iter().enumerate() {
        let mut line = vec![Span::new(INDENT)];
        for (col, cell) in cells.iter().enumerate() {
            let highlighted = highlight == Some((row, col));
            frame.region(indent + col * cell_width, cell_width, HitTarget::Cell { row, col });
            line.push(cell_span(cell, cell_width, highlighted));
        }
        frame.lines.push(line);
    }

    if let Some(footer) = &grid.footer {
        let text = format!("Time: {footer}");
        frame.region(indent, UnicodeWidthStr::width(text.as_str()), HitTarget::Footer);
        frame.lines.push(vec![
            Span::new(INDENT),
            Span::styled(text, Style::new().color(Color::Cyan)),
        ]);
    }
}

fn cell_span(cell: &Cell, width: usize, highlighted: bool) -> Span {
    let inner = width - 2;
    let label = if width == DAY_CELL_WIDTH {
        format!("{:>inner$}", cell.label)
    } else {
        format!("{:^inner$}", cell.label)
    };
    let text = if highlighted {
        format!("[{label}]")
    } else {
        format!(" {label} ")
    };

    let mut style = if highlighted {
        Style::new().color(Color::Yellow).bold()
    } else if cell.flags.active {
        Style::new().color(Color::Cyan).bold()
    } else if cell.flags.disabled || cell.flags.old || cell.flags.new {
        Style::new().color(Color::DarkGrey)
    } else {
        Style::default()
    };
    if cell.flags.today {
        style = style.underline();
    }
    Span::styled(text, style)
}

// ── Time view ─────────────────────────────────────────────────────────────────

fn render_time(frame: &mut Frame, panel: &TimePanel, highlight: Option<(usize, usize)>) {
    let indent = INDENT.len();

    if let Some(title) = &panel.title {
        frame.region(indent, UnicodeWidthStr::width(title.as_str()), HitTarget::Header);
        frame.lines.push(vec![
            Span::new(INDENT),
            Span::styled(title.clone(), Style::new().bold()),
        ]);
    }

    for (row, direction, arrow) in [(0, StepDirection::Up, "▲"), (1, StepDirection::Down, "▼")] {
        let mut line = vec![Span::new(INDENT)];
        for (col, counter) in panel.counters.iter().enumerate() {
            let start = indent + col * COUNTER_WIDTH;
            frame.region(start, COUNTER_WIDTH, HitTarget::Stepper(Press::new(direction, counter.unit)));
            line.push(button_span(arrow, highlight == Some((row, col))));
        }
        frame.lines.push(line);

        if row == 0 {
            let width = COUNTER_WIDTH;
            let mut values = vec![Span::new(INDENT)];
            for counter in &panel.counters {
                values.push(Span::styled(
                    format!("{:^width$}", counter.label),
                    Style::new().bold(),
                ));
            }
            if let Some(day_part) = &panel.day_part {
                let col = panel.counters.len();
                let highlighted = highlight.is_some_and(|(_, c)| c == col);
                frame.region(indent + col * COUNTER_WIDTH, COUNTER_WIDTH, HitTarget::DayPart);
                values.push(button_span(day_part, highlighted));
            }
            frame.lines.push(values);
        }
    }
}

fn button_span(label: &str, highlighted: bool) -> Span {
    let inner = COUNTER_WIDTH - 2;
    if highlighted {
        Span::styled(
            format!("[{label:^inner$}]"),
            Style::new().color(Color::Yellow).bold(),
        )
    } else {
        Span::styled(
            format!(" {label:^inner$} "),
            Style::new().color(Color::Cyan),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::HitTarget;
    use crate::format::{FormatSpec, fmt};
    use crate::picker::{DateTimePicker, Press, StepDirection, TimeUnit};
    use crate::ui::span::line_text;
    use crate::widgets::date_time::DateTimeInput;
    use chrono::NaiveDate;

    fn input(formats: FormatSpec, value: &str) -> DateTimeInput {
        let picker = DateTimePicker::new(formats)
            .with_today(NaiveDate::from_ymd_opt(2015, 6, 20).expect("date"))
            .with_value(value);
        DateTimeInput::new("when", "When", picker)
    }

    #[test]
    fn closed_field_renders_single_line_with_cursor() {
        let input = input(FormatSpec::new(fmt::DATE_MDY, false), "06/16/2015");
        let frame = input.frame(true);
        assert_eq!(frame.lines.len(), 1);
        assert_eq!(line_text(&frame.lines[0]), "> When: 06/16/2015");
        assert_eq!(frame.cursor.map(|cursor| (cursor.col, cursor.row)), Some((18, 0)));
        assert_eq!(frame.hit(9, 0), Some(HitTarget::TextField));
    }

    #[test]
    fn empty_field_shows_format_placeholder() {
        let input = input(FormatSpec::new(fmt::DATE_MDY, false), "");
        let frame = input.frame(false);
        assert_eq!(line_text(&frame.lines[0]), "  When: MM/DD/YYYY");
        assert!(frame.cursor.is_none());
    }

    #[test]
    fn open_days_view_layout_and_regions() {
        let mut input = input(FormatSpec::new(fmt::DATE_MDY, fmt::TIME_HM), "06/16/2015 09:30");
        input.picker.open();
        let frame = input.frame(true);

        let header = line_text(&frame.lines[1]);
        assert!(header.starts_with("  ‹"));
        assert!(header.contains("June 2015"));
        assert_eq!(frame.hit(2, 1), Some(HitTarget::Previous));
        assert_eq!(frame.hit(10, 1), Some(HitTarget::Header));
        assert_eq!(frame.hit(29, 1), Some(HitTarget::Next));

        assert_eq!(line_text(&frame.lines[2]), "   Su  Mo  Tu  We  Th  Fr  Sa ");
        assert_eq!(frame.hit(2, 3), Some(HitTarget::Cell { row: 0, col: 0 }));
        assert_eq!(frame.hit(29, 8), Some(HitTarget::Cell { row: 5, col: 6 }));
        assert!(line_text(&frame.lines[5]).contains("[16]"));

        assert_eq!(line_text(&frame.lines[9]), "  Time: 09:30");
        assert_eq!(frame.hit(4, 9), Some(HitTarget::Footer));
        assert_eq!(frame.hit(60, 9), None);
    }

    #[test]
    fn time_view_regions_cover_steppers_and_day_part() {
        let mut input = input(FormatSpec::new(false, fmt::TIME_12H), "9:50 PM");
        input.picker.open();
        let frame = input.frame(false);

        assert_eq!(frame.lines.len(), 4);
        assert_eq!(line_text(&frame.lines[2]), "    9     50    PM  ");
        assert_eq!(
            frame.hit(3, 1),
            Some(HitTarget::Stepper(Press::new(StepDirection::Up, TimeUnit::Hours)))
        );
        assert_eq!(
            frame.hit(9, 3),
            Some(HitTarget::Stepper(Press::new(StepDirection::Down, TimeUnit::Minutes)))
        );
        assert_eq!(frame.hit(15, 2), Some(HitTarget::DayPart));
    }
}
