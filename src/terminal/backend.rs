use super::{
    CursorPos, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind, TerminalEvent,
    TerminalSize,
};
use crate::ui::span::SpanLine;
use crate::ui::style::Color;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
    Event as CrosstermEvent, KeyCode as CrosstermKeyCode, KeyEvent as CrosstermKeyEvent,
    KeyEventKind, KeyModifiers as CrosstermKeyModifiers, MouseButton,
    MouseEvent as CrosstermMouseEvent, MouseEventKind as CrosstermMouseEventKind,
};
use crossterm::style::{
    Attribute, Color as CrosstermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};
use std::time::Duration;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Alternate-screen terminal with mouse and focus reporting.
pub struct Terminal {
    stdout: Stdout,
    size: TerminalSize,
    last_frame: Vec<SpanLine>,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout: io::stdout(),
            size: TerminalSize { width, height },
            last_frame: Vec::new(),
        })
    }

    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange,
            Hide
        )?;
        Ok(())
    }

    /// Leaves the alternate screen and prints the last frame to the normal
    /// buffer.
    pub fn exit(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(
            self.stdout,
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen,
            Show
        )?;
        let last_frame = std::mem::take(&mut self.last_frame);
        let width = self.size.width;
        for line in &last_frame {
            self.write_span_line(line, width)?;
            self.stdout.write_all(b"\r\n")?;
        }
        self.stdout.flush()
    }

    pub fn size(&self) -> TerminalSize {
        self.size
    }

    pub fn render(&mut self, lines: &[SpanLine], cursor: Option<CursorPos>) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        self.size = TerminalSize { width, height };
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.last_frame = lines.to_vec();

        queue!(self.stdout, MoveTo(0, 0), Clear(ClearType::All))?;
        for (row, line) in lines.iter().take(height as usize).enumerate() {
            queue!(self.stdout, MoveTo(0, row as u16))?;
            self.write_span_line(line, width)?;
        }

        match cursor {
            Some(cur) if cur.row < height => {
                let col = cur.col.min(width.saturating_sub(1));
                queue!(self.stdout, MoveTo(col, cur.row), Show)?;
            }
            _ => queue!(self.stdout, Hide)?,
        }
        self.stdout.flush()
    }

    pub fn poll_event(&mut self, timeout: Duration) -> io::Result<TerminalEvent> {
        if !event::poll(timeout)? {
            return Ok(TerminalEvent::Tick);
        }
        let mapped = match event::read()? {
            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                TerminalEvent::Key(map_key_event(key))
            }
            CrosstermEvent::Mouse(mouse) => match map_mouse_event(mouse) {
                Some(mouse) => TerminalEvent::Mouse(mouse),
                None => TerminalEvent::Tick,
            },
            CrosstermEvent::Resize(width, height) => {
                self.size = TerminalSize { width, height };
                TerminalEvent::Resize(self.size)
            }
            CrosstermEvent::FocusGained => TerminalEvent::FocusGained,
            CrosstermEvent::FocusLost => TerminalEvent::FocusLost,
            _ => TerminalEvent::Tick,
        };
        Ok(mapped)
    }

    fn write_span_line(&mut self, line: &SpanLine, width: u16) -> io::Result<()> {
        let render_width = width.saturating_sub(1) as usize;
        let mut used = 0usize;
        for span in line {
            if used >= render_width {
                break;
            }
            let clipped = clip_to_width(&span.text, render_width - used);
            if clipped.is_empty() {
                continue;
            }
            if let Some(color) = span.style.color {
                queue!(self.stdout, SetForegroundColor(map_color(color)))?;
            }
            if let Some(background) = span.style.background {
                queue!(self.stdout, SetBackgroundColor(map_color(background)))?;
            }
            if span.style.bold {
                queue!(self.stdout, SetAttribute(Attribute::Bold))?;
            }
            if span.style.underline {
                queue!(self.stdout, SetAttribute(Attribute::Underlined))?;
            }
            queue!(
                self.stdout,
                Print(clipped.as_str()),
                ResetColor,
                SetAttribute(Attribute::Reset)
            )?;
            used = used.saturating_add(UnicodeWidthStr::width(clipped.as_str()));
        }
        Ok(())
    }
}

fn map_color(color: Color) -> CrosstermColor {
    match color {
        Color::Reset => CrosstermColor::Reset,
        Color::Black => CrosstermColor::Black,
        Color::DarkGrey => CrosstermColor::DarkGrey,
        Color::Red => CrosstermColor::Red,
        Color::Green => CrosstermColor::Green,
        Color::Yellow => CrosstermColor::DarkYellow,
        Color::Blue => CrosstermColor::DarkBlue,
        Color::Magenta => CrosstermColor::DarkMagenta,
        Color::Cyan => CrosstermColor::DarkCyan,
        Color::White => CrosstermColor::White,
    }
}

fn map_key_event(key: CrosstermKeyEvent) -> KeyEvent {
    KeyEvent {
        code: map_key_code(key.code),
        modifiers: map_key_modifiers(key.modifiers),
    }
}

fn map_key_code(code: CrosstermKeyCode) -> KeyCode {
    match code {
        CrosstermKeyCode::Char(ch) => KeyCode::Char(ch),
        CrosstermKeyCode::Enter => KeyCode::Enter,
        CrosstermKeyCode::Tab => KeyCode::Tab,
        CrosstermKeyCode::BackTab => KeyCode::BackTab,
        CrosstermKeyCode::Esc => KeyCode::Esc,
        CrosstermKeyCode::Backspace => KeyCode::Backspace,
        CrosstermKeyCode::Delete => KeyCode::Delete,
        CrosstermKeyCode::Home => KeyCode::Home,
        CrosstermKeyCode::End => KeyCode::End,
        CrosstermKeyCode::Left => KeyCode::Left,
        CrosstermKeyCode::Right => KeyCode::Right,
        CrosstermKeyCode::Up => KeyCode::Up,
        CrosstermKeyCode::Down => KeyCode::Down,
        CrosstermKeyCode::PageUp => KeyCode::PageUp,
        CrosstermKeyCode::PageDown => KeyCode::PageDown,
        _ => KeyCode::Unknown,
    }
}

fn map_key_modifiers(modifiers: CrosstermKeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::NONE;
    if modifiers.contains(CrosstermKeyModifiers::SHIFT) {
        out = out.union(KeyModifiers::SHIFT);
    }
    if modifiers.contains(CrosstermKeyModifiers::CONTROL) {
        out = out.union(KeyModifiers::CONTROL);
    }
    if modifiers.contains(CrosstermKeyModifiers::ALT) {
        out = out.union(KeyModifiers::ALT);
    }
    out
}

fn map_mouse_event(mouse: CrosstermMouseEvent) -> Option<MouseEvent> {
    let kind = match mouse.kind {
        CrosstermMouseEventKind::Down(MouseButton::Left) => MouseEventKind::Down,
        CrosstermMouseEventKind::Up(MouseButton::Left) => MouseEventKind::Up,
        _ => return None,
    };
    Some(MouseEvent {
        kind,
        col: mouse.column,
        row: mouse.row,
    })
}

fn clip_to_width(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let mut used = 0usize;
    let mut out = String::new();
    for ch in text.chars().filter(|ch| !matches!(ch, '\n' | '\r')) {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used.saturating_add(ch_width) > max_width {
            break;
        }
        out.push(ch);
        used = used.saturating_add(ch_width);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{clip_to_width, map_key_event, map_mouse_event};
    use crate::terminal::{KeyCode, KeyModifiers, MouseEventKind};
    use crossterm::event::{
        KeyCode as CrosstermKeyCode, KeyEvent as CrosstermKeyEvent,
        KeyModifiers as CrosstermKeyModifiers, MouseButton, MouseEvent as CrosstermMouseEvent,
        MouseEventKind as CrosstermMouseEventKind,
    };

    #[test]
    fn maps_modified_keys() {
        let key = map_key_event(CrosstermKeyEvent::new(
            CrosstermKeyCode::Char(' '),
            CrosstermKeyModifiers::CONTROL | CrosstermKeyModifiers::SHIFT,
        ));
        assert_eq!(key.code, KeyCode::Char(' '));
        assert!(key.modifiers.contains(KeyModifiers::CONTROL));
        assert!(key.modifiers.contains(KeyModifiers::SHIFT));
        assert!(!key.modifiers.contains(KeyModifiers::ALT));
    }

    #[test]
    fn only_left_button_is_reported() {
        let event = |kind| CrosstermMouseEvent {
            kind,
            column: 4,
            row: 2,
            modifiers: CrosstermKeyModifiers::NONE,
        };
        let down = map_mouse_event(event(CrosstermMouseEventKind::Down(MouseButton::Left)))
            .expect("left press");
        assert_eq!(down.kind, MouseEventKind::Down);
        assert_eq!((down.col, down.row), (4, 2));
        assert!(map_mouse_event(event(CrosstermMouseEventKind::Down(MouseButton::Right))).is_none());
        assert!(map_mouse_event(event(CrosstermMouseEventKind::Moved)).is_none());
    }

    #[test]
    fn clips_wide_characters() {
        assert_eq!(clip_to_width("‹ June ›", 4), "‹ Ju");
        assert_eq!(clip_to_width("日本", 3), "日");
        assert_eq!(clip_to_width("abc", 0), "");
    }
}
