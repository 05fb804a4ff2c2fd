use crate::ui::app::{App, FocusPane};
use crate::ui::theme::parse_hex_color;
use crate::ui::widgets::{status_label, status_pill, RenderContext};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 26;

pub fn render(frame: &mut Frame, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_header(frame, app, main_chunks[0]);

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(main_chunks[1]);

    render_sidebar(frame, app, body_chunks[0]);
    render_template(frame, app, body_chunks[1]);
    render_footer(frame, app, main_chunks[2]);

    if app.show_info {
        render_info_modal(frame, app);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let line = Line::from(vec![
        Span::styled(
            "  🐍 Python Template Gallery  ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        status_pill(app.runtime_status, theme),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg)),
    );

    frame.render_widget(header, area);
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let selection = app.shell.selection();

    let items: Vec<ListItem> = app
        .shell
        .descriptors()
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let accent = parse_hex_color(d.accent).unwrap_or(theme.accent);
            let highlighted = i == app.selected_index;
            let marker = if selection.is_active(d.id) {
                "▶"
            } else if selection.is_mounted(d.id) {
                "•"
            } else {
                " "
            };

            let mut style = Style::default().fg(theme.fg);
            if highlighted {
                style = style.bg(theme.surface).add_modifier(Modifier::BOLD);
            }
            if selection.is_active(d.id) {
                style = style.fg(accent);
            }

            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", marker), Style::default().fg(accent)),
                Span::raw(format!("{} ", d.icon)),
                Span::styled(d.label, style),
            ]))
            .style(if highlighted {
                Style::default().bg(theme.surface)
            } else {
                Style::default()
            })
        })
        .collect();

    let border_color = if app.focus == FocusPane::Sidebar {
        theme.accent
    } else {
        theme.fg_dim
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Templates ")
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme.bg)),
    );

    frame.render_widget(list, area);
}

fn render_template(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let focused = app.focus == FocusPane::Template;

    // Only the active unit is drawn; hidden units keep their state untouched.
    let (Some(descriptor), Some(unit)) = (app.shell.active_descriptor(), app.shell.active_unit())
    else {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Select a template",
                Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Use ↑↓ or j/k and press Enter",
                Style::default().fg(theme.fg_dim),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.fg_dim))
                .style(Style::default().bg(theme.bg)),
        );
        frame.render_widget(placeholder, area);
        return;
    };

    let accent = parse_hex_color(descriptor.accent).unwrap_or(theme.accent);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(vec![
            Span::styled(
                format!(" {} {} ", descriptor.icon, unit.title()),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} ", unit.filename()),
                Style::default().fg(theme.fg_dim),
            ),
        ]))
        .border_style(Style::default().fg(if focused { accent } else { theme.fg_dim }))
        .style(Style::default().bg(theme.bg));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let ctx = RenderContext {
        theme,
        accent,
        status: app.runtime_status,
        focused,
    };
    unit.render(frame, inner, &ctx);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let line = if let Some(reason) = app.runtime_error.as_deref() {
        Line::from(Span::styled(
            format!("⚠ {}  [Q] Quit", reason),
            Style::default().fg(theme.error),
        ))
    } else {
        let help_text = match app.focus {
            FocusPane::Sidebar => {
                "[↑↓/jk] Navigate  [Enter] Open  [Tab] Switch  [t] Theme  [i] Info  [Q] Quit"
            }
            FocusPane::Template => app
                .shell
                .active_unit()
                .map(|unit| unit.key_hint())
                .unwrap_or("[Esc] Back"),
        };
        Line::from(Span::styled(help_text, Style::default().fg(theme.fg_dim)))
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_info_modal(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(60, 50, frame.area());

    let runtime = app
        .runtime_name
        .clone()
        .unwrap_or_else(|| status_label(app.runtime_status).to_string());

    let label = |text: &'static str| Span::styled(text, Style::default().fg(theme.fg_dim));
    let text = vec![
        Line::from(Span::styled(
            "Python Template Gallery",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![label("Version: "), Span::raw(env!("CARGO_PKG_VERSION"))]),
        Line::from(vec![label("Runtime: "), Span::raw(runtime)]),
        Line::from(vec![label("Theme:   "), Span::raw(theme.name)]),
        Line::from(vec![
            label("Mounted: "),
            Span::raw(format!(
                "{} of {}",
                app.shell.mounted_count(),
                app.shell.descriptors().len()
            )),
        ]),
        Line::from(""),
        Line::from("Templates stay mounted once opened, so inputs"),
        Line::from("and results survive switching between them."),
        Line::from(""),
        Line::from(label("[i/Esc] Close")),
    ];

    let modal = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Info ")
                .border_style(Style::default().fg(theme.accent))
                .style(Style::default().bg(theme.bg).fg(theme.fg)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, area);
    frame.render_widget(modal, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
