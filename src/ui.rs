use crate::app::{App, Focus};
use crate::axis;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, BorderType, Borders, Chart, Clear, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 26;

/// Max scroll for help content (generous to account for text wrapping on small screens)
pub const HELP_CONTENT_LINES: u16 = 30;

/// Each grid cell is drawn two columns wide so it looks square
const CELL_WIDTH: u16 = 2;

// UI color scheme
const BORDER_COLOR: Color = Color::Cyan;
const HIGHLIGHT_COLOR: Color = Color::Yellow;
const TEXT_COLOR: Color = Color::White;
const DIM_TEXT_COLOR: Color = Color::Gray;
const COLONY_COLOR: Color = Color::Red;
const AGAR_COLOR: Color = Color::DarkGray;

/// Creates a standard styled block with rounded borders
fn styled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(title)
}

/// Split the frame into (sidebar, grid, plot)
fn split_areas(area: Rect, size: usize) -> (Rect, Rect, Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(area);

    let grid_width = size as u16 * CELL_WIDTH + 2;
    let grid_height = size as u16 + 2;
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(grid_width), Constraint::Min(0)])
        .split(columns[1]);

    let grid = Rect {
        height: grid_height.min(main[0].height),
        ..main[0]
    };
    (columns[0], grid, main[1])
}

/// Map a terminal position to the grid cell drawn there, if any
pub fn cell_at(frame_area: Rect, size: usize, column: u16, row: u16) -> Option<(usize, usize)> {
    let (_, grid, _) = split_areas(frame_area, size);
    let inner = styled_block("").inner(grid);
    if column < inner.x
        || row < inner.y
        || column >= inner.x + inner.width
        || row >= inner.y + inner.height
    {
        return None;
    }
    // A squeezed grid panel clips the right-hand cells
    let visible_cols = size.min((inner.width / CELL_WIDTH) as usize);
    let cell_row = (row - inner.y) as usize;
    let cell_col = ((column - inner.x) / CELL_WIDTH) as usize;
    if cell_row < size && cell_col < visible_cols {
        Some((cell_row, cell_col))
    } else {
        None
    }
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let (sidebar, grid, plot) = split_areas(area, app.simulation.size());

    render_sidebar(frame, sidebar, app);
    render_grid(frame, grid, app);
    render_plot(frame, plot, app);

    if app.show_help {
        render_help_overlay(frame, area, app);
    }
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Status
            Constraint::Length(6), // Settings
            Constraint::Min(8),    // Controls
        ])
        .split(area);

    render_status_box(frame, sections[0], app);
    render_settings_box(frame, sections[1], app);
    render_controls_box(frame, sections[2]);
}

fn render_status_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Bacteria Growth ");
    let sim = &app.simulation;

    let population = sim.population();
    let progress = population as f32 / sim.capacity() as f32;
    let progress_width = (area.width.saturating_sub(4)) as usize;
    let filled = (progress * progress_width as f32) as usize;
    let empty = progress_width.saturating_sub(filled);

    let (status_text, status_color) = if sim.is_saturated() {
        ("SATURATED", Color::Green)
    } else if app.is_running() {
        ("RUNNING", BORDER_COLOR)
    } else {
        ("PAUSED", HIGHLIGHT_COLOR)
    };

    let content = vec![
        Line::from(Span::styled(
            format!("Count: {} / {}", population, sim.capacity()),
            Style::default().fg(TEXT_COLOR),
        )),
        Line::from(Span::styled(
            format!("Time:  {} ms", sim.elapsed()),
            Style::default().fg(TEXT_COLOR),
        )),
        Line::from(vec![
            Span::styled("█".repeat(filled), Style::default().fg(Color::Green)),
            Span::styled("░".repeat(empty), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(status_text, Style::default().fg(status_color))),
    ];

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_settings_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Grid Settings ");

    let make_line = |label: &str, value: String, focused: bool| {
        let prefix = if focused { "> " } else { "  " };
        let style = if focused {
            Style::default().fg(HIGHLIGHT_COLOR)
        } else {
            Style::default().fg(TEXT_COLOR)
        };
        Line::from(Span::styled(format!("{}{}: {}", prefix, label, value), style))
    };

    let content = vec![
        make_line("Size", format!("{}", app.pending_size), app.focus == Focus::Size),
        make_line(
            "Interval",
            format!("{} ms", app.pending_interval),
            app.focus == Focus::Interval,
        ),
        make_line("Inoculum", app.inoculum.name().to_string(), false),
        Line::from(Span::styled(
            app.status.clone().unwrap_or_default(),
            Style::default().fg(HIGHLIGHT_COLOR),
        )),
    ];

    let paragraph = Paragraph::new(content).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_controls_box(frame: &mut Frame, area: Rect) {
    let key_style = Style::default().fg(HIGHLIGHT_COLOR);
    let desc_style = Style::default().fg(DIM_TEXT_COLOR);

    let make_control = |key: &str, desc: &str| -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{:>5}", key), key_style),
            Span::styled(format!(" {}", desc), desc_style),
        ])
    };

    let content = vec![
        make_control("Space", "pause/resume"),
        make_control("Enter", "toggle cell"),
        make_control("Click", "toggle cell"),
        make_control("R", "reset"),
        make_control("Tab", "focus settings"),
        make_control("+/-", "adjust setting"),
        make_control("N", "create grid"),
        make_control("I", "inoculum"),
        make_control("H", "help"),
        make_control("Q", "quit"),
    ];

    let paragraph = Paragraph::new(content).block(styled_block(" Controls "));
    frame.render_widget(paragraph, area);
}

fn render_grid(frame: &mut Frame, area: Rect, app: &App) {
    let title = if app.focus == Focus::Grid { " Grid * " } else { " Grid " };
    let block = styled_block(title);

    let cursor_style = if app.focus == Focus::Grid {
        Modifier::REVERSED
    } else {
        Modifier::empty()
    };

    let lines: Vec<Line> = app
        .simulation
        .rows()
        .enumerate()
        .map(|(r, row)| {
            let spans: Vec<Span> = row
                .iter()
                .enumerate()
                .map(|(c, &empty)| {
                    let (glyph, color) = if empty { ("··", AGAR_COLOR) } else { ("██", COLONY_COLOR) };
                    let mut style = Style::default().fg(color);
                    if (r, c) == app.cursor {
                        style = style.add_modifier(cursor_style);
                    }
                    Span::styled(glyph, style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_plot(frame: &mut Frame, area: Rect, app: &App) {
    let sim = &app.simulation;
    let size = sim.size();
    let interval = sim.interval();
    let time = app.series.latest().map_or(0, |s| s.time);
    let scrolling = app.series.is_full();

    let data: Vec<(f64, f64)> = app
        .series
        .iter()
        .map(|s| (s.time as f64, s.count as f64))
        .collect();

    let dataset = Dataset::default()
        .name("population")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(COLONY_COLOR))
        .data(&data);

    let x_labels: Vec<String> = axis::x_labels(size, interval, time, scrolling)
        .iter()
        .map(|v| v.to_string())
        .collect();

    // Chart lays Y labels out bottom to top
    let y_labels: Vec<String> = std::iter::once(0)
        .chain(axis::y_labels(size).into_iter().rev())
        .map(|v| v.to_string())
        .collect();

    let title = if app.series.is_empty() {
        " Population (waiting for first tick) ".to_string()
    } else {
        format!(" Population ({}/{} ticks) ", app.series.len(), app.series.capacity())
    };

    let chart = Chart::new(vec![dataset])
        .block(styled_block(&title))
        .x_axis(
            Axis::default()
                .title("time (ms)")
                .style(Style::default().fg(DIM_TEXT_COLOR))
                .bounds(axis::x_bounds(size, interval, time, scrolling))
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("count")
                .style(Style::default().fg(DIM_TEXT_COLOR))
                .bounds(axis::y_bounds(size))
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect, app: &App) {
    let help_width = 56.min(area.width.saturating_sub(4));
    let help_height = area.height.saturating_sub(4).min(24);
    let help_area = Rect {
        x: area.x + (area.width.saturating_sub(help_width)) / 2,
        y: area.y + (area.height.saturating_sub(help_height)) / 2,
        width: help_width,
        height: help_height,
    };

    frame.render_widget(Clear, help_area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled("BACTERIAL GROWTH", Style::default().fg(BORDER_COLOR))),
        Line::from(""),
        Line::from("Every tick each colony divides into its four neighbours (up, down, left, right). Colonies never die, so the grid fills until it is saturated, at which point the run pauses."),
        Line::from(""),
        Line::from(Span::styled("GRID:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Arrows move the cursor, Enter or T toggles a cell, mouse click toggles the clicked cell. Toggling works while paused or running."),
        Line::from(""),
        Line::from(Span::styled("SETTINGS:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Tab focuses Size/Interval, +/- adjusts, N creates a new grid. Size 4-20, interval 100-10000 ms. I cycles the inoculum and recreates the grid."),
        Line::from(""),
        Line::from(Span::styled("PLOT:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Shows the last 2*size-2 ticks. The time axis projects forward from 0 until the plot fills, then scrolls with the latest tick."),
        Line::from(""),
        Line::from("Space=Pause, R=Reset, H=Help, Q=Quit"),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(HIGHLIGHT_COLOR))
        .title(" Help (J/K scroll, H to close) ");

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll, 0));

    frame.render_widget(paragraph, help_area);
}
