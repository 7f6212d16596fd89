use crate::ui::style::Style;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::default(),
        }
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Display width in terminal cells.
    pub fn width(&self) -> usize {
        UnicodeWidthStr::width(self.text.as_str())
    }
}

pub type SpanLine = Vec<Span>;

pub fn line_width(line: &[Span]) -> usize {
    line.iter().map(Span::width).sum()
}

pub fn line_text(line: &[Span]) -> String {
    line.iter().map(|span| span.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::{Span, line_text, line_width};
    use crate::ui::style::{Color, Style};

    #[test]
    fn width_counts_display_cells() {
        let line = vec![
            Span::new("‹ "),
            Span::styled("June 2015", Style::new().color(Color::Cyan)),
            Span::new(" ›"),
        ];
        assert_eq!(line_width(&line), 13);
        assert_eq!(line_text(&line), "‹ June 2015 ›");
    }
}
