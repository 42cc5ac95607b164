use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, NoticeKind};
use crate::catalog::CommandEntry;
use crate::classify::badge_for;
use crate::widgets::{
    build_highlighted_text, highlight_styles, icon_span, panel_block, push_right_aligned,
    push_selection_cursor, tag_span, UiColors,
};

pub const APP_TITLE: &str = "Drupal Cheatsheet";
pub const SEARCH_PLACEHOLDER: &str = "Search drupal related command here.";

/// Main render function called from the event loop.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let colors = UiColors::from_palette(&app.palette());

    // Top-level vertical layout:
    //   [title bar]
    //   [screen body]
    //   [notice line]
    //   [key hints]
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    if !app.nav.is_detail() {
        let body = list_layout(outer[1]);
        // Borders take one row each side
        app.ensure_visible(body[1].height.saturating_sub(2) as usize);
        render_title_bar(frame, APP_TITLE, &colors, outer[0]);
        render_search_bar(frame, app, &colors, body[0]);
        render_entry_list(frame, app, &colors, body[1]);
    } else if let Some(entry) = app.nav.current() {
        render_title_bar(frame, &entry.title, &colors, outer[0]);
        render_detail(frame, entry, &colors, outer[1]);
    }
    render_notice(frame, app, &colors, outer[2]);
    render_help_bar(frame, app, &colors, outer[3]);
}

fn list_layout(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area)
}

fn render_title_bar(frame: &mut Frame, title: &str, colors: &UiColors, area: Rect) {
    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            title.to_string(),
            Style::default()
                .fg(colors.active_border)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    let paragraph = Paragraph::new(line).style(Style::default().bg(colors.bar_bg));
    frame.render_widget(paragraph, area);
}

fn render_search_bar(frame: &mut Frame, app: &App, colors: &UiColors, area: Rect) {
    let border_color = if app.filtering {
        colors.active_border
    } else {
        colors.inactive_border
    };
    let block = panel_block(" Search ".to_string(), border_color, true);

    let mut spans = vec![Span::styled("/ ", Style::default().fg(colors.help))];
    if app.filter().is_empty() && !app.filtering {
        spans.push(Span::styled(
            SEARCH_PLACEHOLDER,
            Style::default()
                .fg(colors.help)
                .add_modifier(Modifier::ITALIC),
        ));
    } else {
        spans.push(Span::styled(
            app.filter().to_string(),
            Style::default().fg(colors.fg).add_modifier(Modifier::BOLD),
        ));
    }
    if app.filtering {
        spans.push(Span::styled(
            "▏",
            Style::default()
                .fg(colors.active_border)
                .add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_entry_list(frame: &mut Frame, app: &App, colors: &UiColors, area: Rect) {
    let entries = app.visible_entries();
    let title = if app.filter_active() {
        format!(" Commands ({}/{}) ", entries.len(), app.catalog.len())
    } else {
        format!(" Commands ({}) ", entries.len())
    };
    let block = panel_block(title, colors.active_border, false);

    if entries.is_empty() {
        let empty = Paragraph::new(format!(" No commands match \"{}\"", app.filter().trim()))
            .style(Style::default().fg(colors.help))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let viewport = area.height.saturating_sub(2) as usize;
    let query = app.filter();

    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .skip(app.list_scroll())
        .take(viewport)
        .map(|(i, entry)| {
            let is_selected = i == app.selected_index();
            let badge = badge_for(&entry.category);

            let mut spans = Vec::new();
            push_selection_cursor(&mut spans, is_selected, colors);
            spans.push(icon_span(badge));
            spans.push(Span::raw(" "));

            let (normal, highlight) = highlight_styles(colors.title, is_selected);
            spans.extend(build_highlighted_text(&entry.title, query, normal, highlight));

            if !entry.description.is_empty() {
                spans.push(Span::raw("  "));
                let (normal, highlight) = highlight_styles(colors.help, false);
                spans.extend(build_highlighted_text(
                    &entry.description,
                    query,
                    normal,
                    highlight,
                ));
            }

            push_right_aligned(&mut spans, tag_span(&entry.category, badge), inner_width);

            let mut item = ListItem::new(Line::from(spans));
            if is_selected {
                item = item.style(Style::default().bg(colors.selected_bg));
            }
            item
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn render_detail(frame: &mut Frame, entry: &CommandEntry, colors: &UiColors, area: Rect) {
    let metadata = metadata_lines(entry, colors);
    let command_height = 3;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(metadata.len() as u16 + 2),
            Constraint::Length(command_height),
            Constraint::Min(3),
        ])
        .split(area);

    let meta = Paragraph::new(metadata)
        .block(panel_block(" Details ".to_string(), colors.inactive_border, true))
        .wrap(Wrap { trim: false });
    frame.render_widget(meta, layout[0]);

    let command = Paragraph::new(Line::from(vec![
        Span::styled("$ ", Style::default().fg(colors.command)),
        Span::styled(
            entry.command.clone(),
            Style::default().fg(colors.fg).add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(panel_block(" Command ".to_string(), colors.active_border, true))
    .wrap(Wrap { trim: false });
    frame.render_widget(command, layout[1]);

    let example = match &entry.example {
        Some(example) => Paragraph::new(example_lines(example, colors)),
        None => Paragraph::new(Span::styled(
            "No example available.",
            Style::default().fg(colors.help),
        )),
    };
    frame.render_widget(
        example
            .block(panel_block(" Example ".to_string(), colors.inactive_border, true))
            .wrap(Wrap { trim: false }),
        layout[2],
    );
}

fn metadata_lines(entry: &CommandEntry, colors: &UiColors) -> Vec<Line<'static>> {
    let label = |text: &'static str| {
        Span::styled(
            format!("{text:<24}"),
            Style::default().fg(colors.help),
        )
    };
    let badge = badge_for(&entry.category);

    vec![
        Line::from(vec![
            label("Title"),
            Span::styled(entry.title.clone(), Style::default().fg(colors.title)),
        ]),
        Line::from(vec![label("Type"), tag_span(&entry.category, badge)]),
        Line::from(vec![
            label("Description"),
            Span::styled(entry.description.clone(), Style::default().fg(colors.fg)),
        ]),
        Line::from(Span::styled(
            "─".repeat(40),
            Style::default().fg(colors.inactive_border),
        )),
        Line::from(vec![
            label("Official Documentation"),
            Span::styled(
                entry.documentation_link.clone(),
                Style::default()
                    .fg(colors.link)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]),
    ]
}

/// File name of a markdown image reference like `![](shot.jpg)`.
fn image_reference(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix("![")?;
    let (_, target) = rest.split_once("](")?;
    target.strip_suffix(')')
}

/// Turn an example block into styled lines: fences are dropped, fenced
/// content is shown as terminal output, image references become
/// placeholders.
fn example_lines(example: &str, colors: &UiColors) -> Vec<Line<'static>> {
    let mut in_code = false;
    let mut lines = Vec::new();
    for raw in example.lines() {
        if raw.trim_start().starts_with("```") {
            if in_code {
                lines.push(Line::default());
            }
            in_code = !in_code;
            continue;
        }
        if let Some(image) = image_reference(raw) {
            lines.push(Line::from(Span::styled(
                format!("[image: {image}]"),
                Style::default()
                    .fg(colors.help)
                    .add_modifier(Modifier::ITALIC),
            )));
            continue;
        }
        let style = if in_code {
            Style::default().fg(colors.command)
        } else {
            Style::default().fg(colors.fg)
        };
        lines.push(Line::from(Span::styled(raw.to_string(), style)));
    }
    lines
}

fn render_notice(frame: &mut Frame, app: &App, colors: &UiColors, area: Rect) {
    let Some(notice) = &app.notice else {
        return;
    };
    let (marker, color) = match notice.kind {
        NoticeKind::Success => ("✓ ", colors.success),
        NoticeKind::Failure => ("✗ ", colors.failure),
    };
    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(marker, Style::default().fg(color)),
        Span::styled(notice.message.clone(), Style::default().fg(color)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the key hints bar.
fn render_help_bar(frame: &mut Frame, app: &App, colors: &UiColors, area: Rect) {
    let hints = Paragraph::new(Line::from(vec![Span::styled(
        format!(" {}", app.current_help()),
        Style::default().fg(colors.help),
    )]))
    .style(Style::default().bg(colors.bar_bg));
    frame.render_widget(hints, area);
}
