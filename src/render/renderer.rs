use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use scribe::editor::{Document, gutter};
use scribe::fs::FileAccess;
use scribe::search::Match;
use scribe::theme::{Color, Theme};

use crate::app::App;

/// Prints the console view: tab bar, document with gutter, status line
pub struct Renderer {
    pub width: u16,
}

/// A run of text that is either highlighted or plain
#[derive(Debug, PartialEq, Eq)]
struct Span {
    text: String,
    highlighted: bool,
}

/// Split one line into plain and highlighted runs.
/// `start` is the char offset of the line within the document.
fn line_spans(line: &str, start: usize, matches: &[Match]) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();
    for (i, ch) in line.chars().enumerate() {
        let offset = start + i;
        let highlighted = matches.iter().any(|m| m.start <= offset && offset < m.end);
        match spans.last_mut() {
            Some(span) if span.highlighted == highlighted => span.text.push(ch),
            _ => spans.push(Span {
                text: ch.to_string(),
                highlighted,
            }),
        }
    }
    spans
}

/// Break a line into rows of at most `width` chars, each with its char offset in the line.
/// An empty line is still one row.
fn wrap(line: &str, width: usize) -> Vec<(usize, &str)> {
    let width = width.max(1);
    let bounds: Vec<usize> = line.char_indices().map(|(b, _)| b).step_by(width).collect();
    if bounds.is_empty() {
        return vec![(0, line)];
    }
    bounds
        .iter()
        .enumerate()
        .map(|(row, &from)| {
            let to = bounds.get(row + 1).copied().unwrap_or(line.len());
            (row * width, &line[from..to])
        })
        .collect()
}

fn colors(out: &mut impl Write, fg: Color, bg: Color) -> io::Result<()> {
    queue!(
        out,
        SetForegroundColor(fg.to_crossterm()),
        SetBackgroundColor(bg.to_crossterm())
    )
}

impl Renderer {
    pub fn new() -> Self {
        let width = terminal::size().map(|(w, _)| w).unwrap_or(80);
        Self { width }
    }

    pub fn render<F: FileAccess>(&self, out: &mut impl Write, app: &App<F>) -> io::Result<()> {
        if app.redraw {
            self.render_tab_bar(out, app)?;
            if let Ok(doc) = app.active() {
                self.render_document(out, app, doc)?;
            }
        }
        self.render_status_line(out, app)?;
        out.flush()
    }

    pub fn prompt(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, ResetColor, Print("> "))?;
        out.flush()
    }

    fn render_tab_bar<F: FileAccess>(&self, out: &mut impl Write, app: &App<F>) -> io::Result<()> {
        let theme = &app.theme;
        let active = app.session.active_id();
        let mut x = 0usize;

        for (i, doc) in app.session.documents().iter().enumerate() {
            let is_active = Some(doc.id()) == active;
            let marker = if doc.is_modified() { "*" } else { "" };
            let text = if is_active {
                format!(" [{}:{}{}] ", i + 1, doc.display_name(), marker)
            } else {
                format!("  {}:{}{}  ", i + 1, doc.display_name(), marker)
            };

            if is_active {
                colors(out, theme.tab_active_fg, theme.tab_active_bg)?;
                queue!(out, SetAttribute(Attribute::Bold), Print(&text))?;
                queue!(out, SetAttribute(Attribute::NormalIntensity))?;
            } else {
                colors(out, theme.tab_fg, theme.tab_bg)?;
                queue!(out, Print(&text))?;
            }
            x += text.chars().count();
        }

        // Fill remaining space
        colors(out, theme.tab_fg, theme.window)?;
        let remaining = (self.width as usize).saturating_sub(x);
        queue!(out, Print(" ".repeat(remaining)), ResetColor, Print("\n"))?;
        Ok(())
    }

    fn render_document<F: FileAccess>(
        &self,
        out: &mut impl Write,
        app: &App<F>,
        doc: &Document,
    ) -> io::Result<()> {
        let theme: &Theme = &app.theme;
        let line_count = doc.line_count();
        let width = gutter::width(line_count);
        let show_numbers = app.settings.show_line_numbers;
        let cursor_line = app.cursor_position().0;

        let text_width = if app.settings.word_wrap {
            let used = if show_numbers { width + 1 } else { 0 };
            (self.width as usize).saturating_sub(used)
        } else {
            usize::MAX
        };

        let matches: &[Match] = match &app.highlights {
            Some((id, matches)) if *id == doc.id() => matches.as_slice(),
            _ => &[],
        };

        for idx in 0..line_count {
            let line = doc.line(idx).to_string();
            let start = doc.rope().line_to_char(idx);

            for (row, (offset, segment)) in wrap(line.trim_end_matches(['\n', '\r']), text_width)
                .into_iter()
                .enumerate()
            {
                if show_numbers {
                    colors(out, theme.gutter_fg, theme.gutter_bg)?;
                    if row > 0 {
                        queue!(out, Print(" ".repeat(width + 1)))?;
                    } else if idx + 1 == cursor_line {
                        queue!(
                            out,
                            SetForegroundColor(theme.cursor.to_crossterm()),
                            SetAttribute(Attribute::Bold),
                            Print(format!("{:>width$} ", idx + 1)),
                            SetAttribute(Attribute::NormalIntensity)
                        )?;
                    } else {
                        queue!(out, Print(format!("{:>width$} ", idx + 1)))?;
                    }
                }

                for span in line_spans(segment, start + offset, matches) {
                    if span.highlighted {
                        colors(out, theme.highlight_fg, theme.highlight_bg)?;
                    } else {
                        colors(out, theme.foreground, theme.background)?;
                    }
                    queue!(out, Print(span.text))?;
                }
                queue!(out, ResetColor, Print("\n"))?;
            }
        }
        Ok(())
    }

    fn render_status_line<F: FileAccess>(&self, out: &mut impl Write, app: &App<F>) -> io::Result<()> {
        if let Some(message) = &app.message {
            queue!(out, ResetColor, Print(message), Print("\n"))?;
        }

        if app.redraw {
            let (line, col) = app.cursor_position();
            let status = format!(
                "Ln {line}, Col {col} | {}pt | {}",
                app.settings.font_size, app.settings.theme
            );
            queue!(
                out,
                SetAttribute(Attribute::Dim),
                Print(status),
                SetAttribute(Attribute::Reset),
                Print("\n")
            )?;
        }
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
