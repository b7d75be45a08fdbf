use std::io::{self, Write};
use std::time::Instant;

use crossterm::style::Stylize;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::language::LanguageCatalog;
use crate::session::{CharStatus, FinishReason, Outcome, TestSession};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

/// Live view of a running session: stats header plus the colored target text
pub struct SessionView<'a> {
    pub session: &'a TestSession,
    pub language: &'a str,
    pub now: Instant,
}

impl<'a> SessionView<'a> {
    pub fn new(session: &'a TestSession, language: &'a str, now: Instant) -> Self {
        Self {
            session,
            language,
            now,
        }
    }
}

impl Widget for SessionView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = self.session;
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(1), // stats
                Constraint::Length(1), // padding
                Constraint::Min(1),    // prompt
                Constraint::Length(1), // legend
            ])
            .split(area);

        let title = Paragraph::new(Span::styled(
            format!("termitype - {}", self.language),
            Style::default().fg(Color::Cyan).patch(bold_style),
        ))
        .alignment(Alignment::Center);
        title.render(chunks[0], buf);

        let header = if session.has_started() {
            session.snapshot(self.now).to_string()
        } else {
            "Start typing to begin the test".to_string()
        };
        Paragraph::new(Span::styled(header, Style::default().fg(Color::Yellow)))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        let fits_on_one_line =
            session.target_text().width() <= chunks[3].width as usize;

        Paragraph::new(Line::from(prompt_spans(session)))
            .alignment(if fits_on_one_line {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: false })
            .render(chunks[3], buf);

        Paragraph::new(Span::styled(
            "(enter) finish / (esc) quit",
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .style(dim_bold_style)
        .render(chunks[4], buf);
    }
}

/// One span per target character, styled by its comparison status
fn prompt_spans(session: &TestSession) -> Vec<Span<'static>> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = bold_style.fg(Color::Green);
    let red_bold_style = bold_style.fg(Color::Red);
    let dim_bold_style = bold_style.add_modifier(Modifier::DIM);
    let cursor_style = dim_bold_style.add_modifier(Modifier::UNDERLINED);

    let cursor = session.cursor_pos();

    session
        .target_chars()
        .iter()
        .enumerate()
        .map(|(idx, &expected)| match session.status_at(idx) {
            CharStatus::Correct => Span::styled(expected.to_string(), green_bold_style),
            CharStatus::Incorrect => Span::styled(
                match expected {
                    ' ' => "·".to_owned(),
                    c => c.to_string(),
                },
                red_bold_style,
            ),
            CharStatus::Untyped if idx == cursor => {
                Span::styled(expected.to_string(), cursor_style)
            }
            CharStatus::Untyped => Span::styled(expected.to_string(), dim_bold_style),
        })
        .collect()
}

/// Print the final results after the terminal has been restored
pub fn write_results<W: Write>(
    out: &mut W,
    session: &TestSession,
    language: &str,
) -> io::Result<()> {
    let stats = session
        .final_stats()
        .unwrap_or_else(|| session.snapshot(Instant::now()));

    writeln!(out, "{}", "=== Results ===".cyan().bold())?;
    if session.finish_reason() == Some(FinishReason::Interrupted) {
        writeln!(out, "{}", "Test interrupted by user".yellow())?;
    }
    writeln!(out)?;
    writeln!(out, "{} {}", "Language:".yellow(), language)?;
    writeln!(out, "{} {:.1}", "Speed (WPM):".yellow(), stats.wpm)?;
    writeln!(out, "{} {:.1}%", "Accuracy:".yellow(), stats.accuracy)?;
    writeln!(out, "{} {}", "Errors:".yellow(), session.error_count())?;
    writeln!(out, "{} {:.2} seconds", "Time:".yellow(), stats.elapsed_secs)?;
    writeln!(
        out,
        "{} {}/{}",
        "Characters:".yellow(),
        session.cursor_pos(),
        session.target_chars().len()
    )?;
    writeln!(out)?;

    writeln!(out, "{}", "Your input:".cyan())?;
    for input in session.input() {
        match input.outcome {
            Outcome::Correct => write!(out, "{}", input.char.green())?,
            Outcome::Incorrect => write!(out, "{}", input.char.red())?,
        }
    }
    writeln!(out)?;
    writeln!(out)?;

    writeln!(out, "{}", "Correct text:".cyan())?;
    writeln!(out, "{}", session.target_text())?;

    Ok(())
}

/// Print every loaded language with its word count
pub fn write_language_list<W: Write>(out: &mut W, catalog: &LanguageCatalog) -> io::Result<()> {
    writeln!(out, "{}", "Available languages:".cyan())?;
    for language in catalog.iter() {
        writeln!(
            out,
            "  {} - {} words",
            language.name.as_str().yellow(),
            language.words.len()
        )?;
    }
    Ok(())
}
