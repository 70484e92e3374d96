//! Terminal rendition of the chat widget

mod keys;

pub use keys::{handle_key, key_action, KeyAction};

use crate::config::{ConfigError, WidgetConfig};
use crate::state_machine::{Conversation, Message, Role};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const SUBTITLE: &str = "Powered by Optimizm Enterprises";
const DISCLAIMER: &str = "AI may produce inaccurate information. Verify important answers.";
const ASSISTANT_BG: Color = Color::Rgb(0x17, 0x17, 0x17);
const ASSISTANT_FG: Color = Color::Rgb(0xE5, 0xE5, 0xE5);
const MUTED: Color = Color::Rgb(0x73, 0x73, 0x73);

/// Presentation settings resolved from the widget config
#[derive(Debug, Clone)]
pub struct WidgetTheme {
    pub title: String,
    pub brand: Color,
}

impl WidgetTheme {
    /// # Errors
    ///
    /// `Invalid` when the configured brand color does not parse.
    pub fn from_config(config: &WidgetConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            title: config.title.clone(),
            brand: config.brand()?,
        })
    }
}

pub fn render(conversation: &Conversation, theme: &WidgetTheme, frame: &mut Frame) {
    let thinking_height = u16::from(conversation.awaiting_response());

    let [header_area, messages_area, thinking_area, input_area, footer_area] =
        Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(thinking_height),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    render_header(theme, frame, header_area);
    render_messages(conversation.messages(), theme, frame, messages_area);
    if conversation.awaiting_response() {
        let title = &theme.title;
        frame.render_widget(
            Paragraph::new(format!("{title} is thinking…"))
                .style(Style::default().fg(MUTED).add_modifier(Modifier::SLOW_BLINK)),
            thinking_area,
        );
    }
    render_input(conversation, theme, frame, input_area);
    frame.render_widget(
        Paragraph::new(DISCLAIMER).style(Style::default().fg(MUTED)),
        footer_area,
    );
}

fn render_header(theme: &WidgetTheme, frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::styled("██", Style::default().fg(theme.brand)),
            Span::raw(" "),
            Span::styled(
                theme.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("   "),
            Span::styled(SUBTITLE, Style::default().fg(MUTED)),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(MUTED)),
        ),
        area,
    );
}

/// Bubbles in history order, anchored to the latest message
fn render_messages(messages: &[Message], theme: &WidgetTheme, frame: &mut Frame, area: Rect) {
    // Bubbles take at most 80% of the width, minus one column of padding each side
    let max_inner = (usize::from(area.width) * 4 / 5).saturating_sub(2).max(1);

    let mut lines: Vec<Line> = Vec::new();
    for message in messages {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.extend(bubble_lines(message, theme, max_inner));
    }

    let overflow = lines.len().saturating_sub(usize::from(area.height));
    let scroll = u16::try_from(overflow).unwrap_or(u16::MAX);

    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), area);
}

fn bubble_lines(message: &Message, theme: &WidgetTheme, max_inner: usize) -> Vec<Line<'static>> {
    let (style, alignment) = match message.role {
        Role::User => (
            Style::default().bg(theme.brand).fg(Color::Black),
            Alignment::Right,
        ),
        Role::Assistant => (
            Style::default().bg(ASSISTANT_BG).fg(ASSISTANT_FG),
            Alignment::Left,
        ),
    };

    let wrapped = wrap_text(&message.content, max_inner);
    let width = wrapped
        .iter()
        .map(|l| display_width(l))
        .max()
        .unwrap_or(0);

    // Pad to terminal columns so wide glyphs keep the bubble edge straight
    wrapped
        .into_iter()
        .map(|text| {
            let pad = " ".repeat(width - display_width(&text));
            Line::from(Span::styled(format!(" {text}{pad} "), style)).alignment(alignment)
        })
        .collect()
}

fn render_input(conversation: &Conversation, theme: &WidgetTheme, frame: &mut Frame, area: Rect) {
    let [field_area, send_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(8)]).areas(area);

    let field = if conversation.pending_input.is_empty() {
        let title = &theme.title;
        Paragraph::new(format!("Ask {title} anything...")).style(Style::default().fg(MUTED))
    } else {
        Paragraph::new(conversation.pending_input.as_str())
    };
    frame.render_widget(
        field.block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.brand)),
        ),
        field_area,
    );

    let send_style = if conversation.can_send() {
        Style::default()
            .bg(theme.brand)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED).add_modifier(Modifier::DIM)
    };
    frame.render_widget(
        Paragraph::new("Send")
            .alignment(Alignment::Center)
            .style(send_style)
            .block(Block::default().borders(Borders::ALL).border_style(send_style)),
        send_area,
    );
}

/// Terminal columns taken by `text`, wide CJK and emoji counting as two
fn display_width(text: &str) -> usize {
    Span::raw(text).width()
}

/// Word-wrap on whitespace to `width` columns, hard-breaking words longer
/// than a line. Explicit newlines are kept.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            for piece in break_word(word, width) {
                let piece_width = display_width(&piece);
                if current_width > 0 && current_width + 1 + piece_width > width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                if current_width > 0 {
                    current.push(' ');
                    current_width += 1;
                }
                current_width += piece_width;
                current.push_str(&piece);
            }
        }

        lines.push(current);
    }

    lines
}

/// Split a word into pieces of at most `width` columns. A glyph wider than
/// the line still gets a piece of its own.
fn break_word(word: &str, width: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_width = 0;
    let mut buf = [0u8; 4];

    for c in word.chars() {
        let char_width = display_width(c.encode_utf8(&mut buf));
        if piece_width > 0 && piece_width + char_width > width {
            pieces.push(std::mem::take(&mut piece));
            piece_width = 0;
        }
        piece.push(c);
        piece_width += char_width;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }

    pieces
}
