//! Reusable UI widget helpers for the list and detail screens.

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Padding},
};
use ratatui_themes::ThemePalette;

use crate::classify::{Badge, BadgeColor};
use crate::search::match_indices;

/// Semantic color palette derived from the active theme.
/// Maps abstract UI roles to concrete `Color` values.
pub struct UiColors {
    pub title: Color,
    pub command: Color,
    pub link: Color,
    pub help: Color,
    pub success: Color,
    pub failure: Color,
    pub active_border: Color,
    pub inactive_border: Color,
    pub selected_bg: Color,
    pub fg: Color,
    pub bar_bg: Color,
}

impl UiColors {
    pub fn from_palette(p: &ThemePalette) -> Self {
        let bar_bg = match p.bg {
            Color::Rgb(r, g, b) => Color::Rgb(
                r.saturating_add(10),
                g.saturating_add(10),
                b.saturating_add(15),
            ),
            _ => Color::Rgb(30, 30, 40),
        };

        let selected_bg = match p.selection {
            Color::Rgb(r, g, b) => Color::Rgb(r, g, b),
            _ => Color::Rgb(40, 40, 60),
        };

        Self {
            title: p.fg,
            command: p.info,
            link: p.accent,
            help: p.muted,
            success: p.success,
            failure: p.error,
            active_border: p.accent,
            inactive_border: p.muted,
            selected_bg,
            fg: p.fg,
            bar_bg,
        }
    }
}

/// Badge colors are fixed across themes so categories stay recognizable.
pub fn badge_color(color: BadgeColor) -> Color {
    match color {
        BadgeColor::Orange => Color::Rgb(255, 159, 10),
        BadgeColor::Purple => Color::Rgb(175, 82, 222),
        BadgeColor::Red => Color::Rgb(255, 69, 58),
        BadgeColor::Green => Color::Rgb(48, 209, 88),
        BadgeColor::Blue => Color::Rgb(10, 132, 255),
    }
}

/// Category tag, e.g. ` Drush ` on an orange background.
pub fn tag_span(category: &str, badge: Badge) -> Span<'static> {
    Span::styled(
        format!(" {category} "),
        Style::default()
            .fg(Color::Black)
            .bg(badge_color(badge.color))
            .add_modifier(Modifier::BOLD),
    )
}

pub fn icon_span(badge: Badge) -> Span<'static> {
    Span::styled(
        badge.icon.glyph(),
        Style::default().fg(badge_color(badge.color)),
    )
}

/// Build a styled `Block` for a panel with consistent border and title styling.
pub fn panel_block(title: String, border_color: Color, with_padding: bool) -> Block<'static> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title)
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    if with_padding {
        block = block.padding(Padding::horizontal(1));
    }
    block
}

/// Push the selection cursor indicator (`▶ ` or `  `) onto spans.
pub fn push_selection_cursor(spans: &mut Vec<Span<'static>>, is_selected: bool, colors: &UiColors) {
    if is_selected {
        spans.push(Span::styled(
            "▶ ",
            Style::default()
                .fg(colors.active_border)
                .add_modifier(Modifier::BOLD),
        ));
    } else {
        spans.push(Span::raw("  "));
    }
}

/// Pad so that `trailing` ends at `available_width`, then push it. Falls back
/// to a single space when the line is already too wide.
pub fn push_right_aligned(
    spans: &mut Vec<Span<'static>>,
    trailing: Span<'static>,
    available_width: usize,
) {
    let current_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let trailing_len = trailing.content.chars().count();

    if current_len + trailing_len + 1 < available_width {
        let padding = available_width.saturating_sub(current_len + trailing_len);
        spans.push(Span::raw(" ".repeat(padding)));
    } else {
        spans.push(Span::raw(" "));
    }
    spans.push(trailing);
}

/// Build spans with the characters matching `query` emphasised.
pub fn build_highlighted_text(
    text: &str,
    query: &str,
    normal_style: Style,
    highlight_style: Style,
) -> Vec<Span<'static>> {
    let indices = match_indices(text, query);

    if indices.is_empty() {
        return vec![Span::styled(text.to_string(), normal_style)];
    }

    let mut spans = Vec::new();
    let chars: Vec<char> = text.chars().collect();
    let mut last_idx = 0;

    for idx in indices {
        if idx >= chars.len() {
            continue;
        }

        if last_idx < idx {
            let before: String = chars[last_idx..idx].iter().collect();
            spans.push(Span::styled(before, normal_style));
        }

        spans.push(Span::styled(chars[idx].to_string(), highlight_style));
        last_idx = idx + 1;
    }

    if last_idx < chars.len() {
        let after: String = chars[last_idx..].iter().collect();
        spans.push(Span::styled(after, normal_style));
    }

    spans
}

/// Normal and highlight styles for matched text.
pub fn highlight_styles(base_color: Color, is_selected: bool) -> (Style, Style) {
    let normal = if is_selected {
        Style::default()
            .fg(base_color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(base_color)
    };
    let highlight = normal.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    (normal, highlight)
}
