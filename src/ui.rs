use crate::board::{self, CardView, ColumnView, PLACEHOLDER};
use crate::charts::bar::{BarChart, DAY_NAMES};
use crate::charts::gauge::GaugeChart;
use crate::charts::Fill;
use crate::deadline::Urgency;
use crate::drag::DragController;
use crate::menu::{MenuController, MenuEffect, MenuItem};
use crate::model::{
    project_counts, Project, ProjectStatus, Status, TaskId, TaskStore, TeamMember, COLUMN_ORDER,
};
use crate::storage::{DataLocation, DashboardData};
use crate::tracker::Tracker;
use anyhow::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Alignment, Color, Modifier, Rect, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};
use tracing::info;

const GAUGE_X_BOUNDS: [f64; 2] = [-1.25, 1.25];
const GAUGE_Y_BOUNDS: [f64; 2] = [-0.05, 1.25];
const BAR_X_BOUNDS: [f64; 2] = [0.0, 1.0];
const BAR_Y_BOUNDS: [f64; 2] = [-0.18, 1.3];

/// Height in rows of one rendered task card.
const CARD_HEIGHT: u16 = 4;

pub fn run(data: DashboardData, location: DataLocation) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(data, location);
    let result = app.event_loop(&mut terminal);
    app.teardown();
    teardown_terminal(&mut terminal)?;
    result
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum ViewMode {
    Overview,
    Board,
}

impl ViewMode {
    fn label(&self) -> &'static str {
        match self {
            ViewMode::Overview => "Overview",
            ViewMode::Board => "Board",
        }
    }
}

struct App {
    store: TaskStore,
    projects: Vec<Project>,
    team: Vec<TeamMember>,
    location: DataLocation,
    view: ViewMode,
    selected_column: usize,
    selected_card: usize,
    drag: DragController,
    menus: MenuController,
    gauge: GaugeChart,
    bars: BarChart,
    tracker: Tracker,
    status: String,
    today: chrono::NaiveDate,
    // Hit zones recorded during the last draw, for mouse dispatch.
    card_zones: Vec<(Rect, TaskId)>,
    column_zones: Vec<(Rect, Status)>,
    gauge_area: Option<Rect>,
    bar_area: Option<Rect>,
    menu_area: Option<Rect>,
    pressed_card: Option<TaskId>,
}

impl App {
    fn new(data: DashboardData, location: DataLocation) -> Self {
        let now = Instant::now();
        let counts = project_counts(&data.projects);
        let store = TaskStore::load(data.tasks);
        let status = format!(
            "Loaded {} projects, {} tasks, {} team members from {}",
            data.projects.len(),
            store.len(),
            data.team.len(),
            location.dir.display()
        );
        info!(
            projects = data.projects.len(),
            tasks = store.len(),
            team = data.team.len(),
            "dashboard loaded"
        );
        App {
            store,
            projects: data.projects,
            team: data.team,
            location,
            view: ViewMode::Overview,
            selected_column: 0,
            selected_card: 0,
            drag: DragController::new(),
            menus: MenuController::new(),
            gauge: GaugeChart::new(counts, now),
            bars: BarChart::with_defaults(now),
            tracker: Tracker::new(),
            status,
            today: chrono::Utc::now().date_naive(),
            card_zones: Vec::new(),
            column_zones: Vec::new(),
            gauge_area: None,
            bar_area: None,
            menu_area: None,
            pressed_card: None,
        }
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;
            let now = Instant::now();
            let animating = self.gauge.tick(now) | self.bars.tick(now);
            // Fast cadence while a chart entrance is live; the tracker's
            // 1-second refresh rides the slow cadence.
            let timeout = if animating {
                Duration::from_millis(33)
            } else {
                Duration::from_millis(200)
            };
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        if self.handle_key(key)? {
                            break;
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Stops the chart animation sessions so no further frames are wanted.
    fn teardown(&mut self) {
        self.gauge.retire();
        self.bars.retire();
        self.tracker.stop();
    }

    // ---- input -----------------------------------------------------------

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if self.menus.awaiting_confirm() {
            self.handle_confirm_key(key);
            return Ok(false);
        }
        if self.menus.is_open() {
            self.handle_menu_key(key);
            return Ok(false);
        }
        match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Char('1') => self.set_view(ViewMode::Overview),
            KeyCode::Char('2') => self.set_view(ViewMode::Board),
            KeyCode::Char('t') => self.toggle_tracker(),
            KeyCode::Char('T') => {
                self.tracker.stop();
                self.status = "Tracker reset".into();
            }
            KeyCode::Esc => {
                if self.drag.carried_task().is_some() {
                    self.drag.cancel();
                    self.status = "Drag canceled".into();
                }
            }
            _ => {
                if self.view == ViewMode::Board {
                    self.handle_board_key(key);
                }
            }
        }
        Ok(false)
    }

    fn handle_board_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                    self.selected_card = 0;
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.selected_column + 1 < COLUMN_ORDER.len() {
                    self.selected_column += 1;
                    self.selected_card = 0;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected_card > 0 {
                    self.selected_card -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.store.status_count(COLUMN_ORDER[self.selected_column]);
                if self.selected_card + 1 < len {
                    self.selected_card += 1;
                }
            }
            KeyCode::Char('m') | KeyCode::Char('>') => self.move_selected(1),
            KeyCode::Char('b') | KeyCode::Char('<') => self.move_selected(-1),
            KeyCode::Char('o') | KeyCode::Enter => {
                if let Some(id) = self.selected_task() {
                    self.menus.open(id);
                } else {
                    self.status = "No card selected".into();
                }
            }
            KeyCode::Char('d') => {
                // Jump straight to the menu's delete confirmation.
                if let Some(id) = self.selected_task() {
                    self.menus.open(id);
                    self.menus.toggle_selection();
                    self.menus.activate(&mut self.store);
                } else {
                    self.status = "No card selected".into();
                }
            }
            _ => {}
        }
        self.ensure_board_bounds();
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.menus.close(),
            KeyCode::Up | KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') | KeyCode::Char('k') => {
                self.menus.toggle_selection()
            }
            KeyCode::Enter => {
                let effect = self.menus.activate(&mut self.store);
                self.apply_menu_effect(effect);
            }
            _ => {}
        }
        self.ensure_board_bounds();
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                let effect = self.menus.resolve_delete(&mut self.store, true);
                self.apply_menu_effect(effect);
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.menus.resolve_delete(&mut self.store, false);
                self.status = "Delete canceled".into();
            }
            _ => {}
        }
        self.ensure_board_bounds();
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.mouse_down(mouse.column, mouse.row),
            MouseEventKind::Down(MouseButton::Right) => {
                if let Some(id) = self.card_at(mouse.column, mouse.row) {
                    self.select_card(id);
                    self.menus.open(id);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => self.mouse_drag(mouse.column, mouse.row),
            MouseEventKind::Up(MouseButton::Left) => self.mouse_up(mouse.column, mouse.row),
            MouseEventKind::Moved => self.mouse_moved(mouse.column, mouse.row),
            _ => {}
        }
    }

    fn mouse_down(&mut self, col: u16, row: u16) {
        if self.menus.is_open() {
            // A click anywhere outside the menu closes it.
            let inside = self
                .menu_area
                .map(|area| contains(area, col, row))
                .unwrap_or(false);
            if !inside {
                self.menus.close();
            }
            return;
        }
        if let Some(id) = self.card_at(col, row) {
            self.select_card(id);
            self.pressed_card = Some(id);
        }
    }

    fn mouse_drag(&mut self, col: u16, row: u16) {
        if let Some(id) = self.pressed_card {
            if self.drag.carried_task().is_none() {
                self.drag.begin(id);
                info!(task_id = id, "drag started");
            }
        }
        if self.drag.carried_task().is_some() {
            match self.column_at(col, row) {
                Some(column) => self.drag.hover(column),
                None => self.drag.leave(),
            }
        }
    }

    fn mouse_up(&mut self, col: u16, row: u16) {
        self.pressed_card = None;
        if self.drag.carried_task().is_none() {
            return;
        }
        match self.column_at(col, row) {
            Some(column) => {
                if let Some(effect) = self.drag.drop_on(&mut self.store, column) {
                    let name = self
                        .store
                        .get(effect.task_id)
                        .map(|t| t.name.clone())
                        .unwrap_or_default();
                    self.status = format!("Moved \"{}\" to {}", name, effect.to.label());
                    info!(task_id = effect.task_id, from = ?effect.from, to = ?effect.to, "drop");
                }
            }
            None => {
                self.drag.cancel();
                self.status = "Drag canceled".into();
            }
        }
        self.ensure_board_bounds();
    }

    fn mouse_moved(&mut self, col: u16, row: u16) {
        if self.view != ViewMode::Overview {
            return;
        }
        let gauge_hover = self
            .gauge_area
            .and_then(|area| canvas_point(area, col, row, GAUGE_X_BOUNDS, GAUGE_Y_BOUNDS))
            .and_then(|(x, y)| self.gauge.hit_test(x, y));
        self.gauge.set_hover(gauge_hover);

        let bar_hover = self
            .bar_area
            .and_then(|area| canvas_point(area, col, row, BAR_X_BOUNDS, BAR_Y_BOUNDS))
            .and_then(|(x, _)| self.bars.hit_test(x));
        self.bars.set_hover(bar_hover);
    }

    // ---- state helpers ---------------------------------------------------

    fn set_view(&mut self, view: ViewMode) {
        if self.view != view {
            self.view = view;
            self.status = format!("Switched to {} view", view.label());
        }
    }

    fn toggle_tracker(&mut self) {
        let now = Instant::now();
        if self.tracker.is_running() {
            self.tracker.pause(now);
            self.status = "Tracker paused".into();
        } else {
            self.tracker.start(now);
            self.status = "Tracker running".into();
        }
    }

    fn selected_task(&self) -> Option<TaskId> {
        self.store
            .tasks_with_status(COLUMN_ORDER[self.selected_column])
            .nth(self.selected_card)
            .map(|t| t.id)
    }

    fn select_card(&mut self, id: TaskId) {
        if let Some(task) = self.store.get(id) {
            let status = task.status;
            if let Some(col) = COLUMN_ORDER.iter().position(|&s| s == status) {
                self.selected_column = col;
                self.selected_card = self
                    .store
                    .tasks_with_status(status)
                    .position(|t| t.id == id)
                    .unwrap_or(0);
            }
        }
    }

    /// Keyboard fallback for drag-and-drop: same store mutation, adjacent
    /// column as the target.
    fn move_selected(&mut self, delta: isize) {
        let Some(id) = self.selected_task() else {
            self.status = "No card selected to move".into();
            return;
        };
        let current = self.selected_column as isize;
        let max = COLUMN_ORDER.len() as isize - 1;
        let target = (current + delta).clamp(0, max) as usize;
        if target == self.selected_column {
            return;
        }
        let to = COLUMN_ORDER[target];
        if self.store.set_status(id, to).is_ok() {
            self.selected_column = target;
            self.selected_card = self.store.status_count(to).saturating_sub(1);
            self.status = format!("Moved to {}", to.label());
        }
    }

    fn apply_menu_effect(&mut self, effect: MenuEffect) {
        match effect {
            MenuEffect::StatusChanged { task_id, to, .. } => {
                let name = self
                    .store
                    .get(task_id)
                    .map(|t| t.name.clone())
                    .unwrap_or_default();
                self.status = format!("Marked \"{}\" as {}", name, to.label());
                self.select_card(task_id);
            }
            MenuEffect::Deleted { task_id, from } => {
                self.status = format!("Deleted task {}", task_id);
                info!(task_id, from = ?from, "task deleted");
            }
            MenuEffect::None => {}
        }
    }

    fn ensure_board_bounds(&mut self) {
        let len = self.store.status_count(COLUMN_ORDER[self.selected_column]);
        if len == 0 {
            self.selected_card = 0;
        } else {
            self.selected_card = self.selected_card.min(len - 1);
        }
    }

    fn card_at(&self, col: u16, row: u16) -> Option<TaskId> {
        self.card_zones
            .iter()
            .find(|(area, _)| contains(*area, col, row))
            .map(|(_, id)| *id)
    }

    fn column_at(&self, col: u16, row: u16) -> Option<Status> {
        self.column_zones
            .iter()
            .find(|(area, _)| contains(*area, col, row))
            .map(|(_, status)| *status)
    }

    // ---- drawing ---------------------------------------------------------

    fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(4),
            ])
            .split(f.size());

        self.draw_header(f, layout[0]);
        match self.view {
            ViewMode::Overview => self.draw_overview(f, layout[1]),
            ViewMode::Board => self.draw_board(f, layout[1]),
        }
        self.draw_footer(f, layout[2]);

        self.menu_area = None;
        if self.menus.awaiting_confirm() {
            self.draw_confirm(f);
        } else if self.menus.is_open() {
            self.draw_menu(f);
        }
    }

    fn draw_header(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let tracker_style = if self.tracker.is_running() {
            Style::default().fg(Color::LightGreen)
        } else {
            Style::default().fg(Color::Gray)
        };
        let title = Line::from(vec![
            Span::styled(
                "pulseboard ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  •  "),
            Span::styled(
                format!("{}", self.location.dir.display()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw("  •  "),
            Span::styled(
                format!("view {}", self.view.label().to_lowercase()),
                Style::default().fg(Color::Magenta),
            ),
            Span::raw("  •  "),
            Span::styled(
                format!(
                    "{} {}",
                    if self.tracker.is_running() { "●" } else { "○" },
                    self.tracker.display(Instant::now())
                ),
                tracker_style,
            ),
        ]);
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let paragraph = Paragraph::new(title)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
    }

    fn draw_overview(&mut self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(area);
        let charts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(halves[0]);
        self.draw_gauge(f, charts[0]);
        self.draw_bars(f, charts[1]);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Min(5),
                Constraint::Min(5),
            ])
            .split(halves[1]);
        self.draw_stats(f, side[0]);
        self.draw_running_projects(f, side[1]);
        self.draw_team(f, side[2]);
    }

    fn draw_gauge(&mut self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(Span::styled(
                "Project Progress",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        self.gauge_area = Some(block.inner(area));

        let gauge = &self.gauge;
        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds(GAUGE_X_BOUNDS)
            .y_bounds(GAUGE_Y_BOUNDS)
            .paint(|ctx| paint_gauge(ctx, gauge));
        f.render_widget(canvas, area);
    }

    fn draw_bars(&mut self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(Span::styled(
                "Weekly Activity",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        self.bar_area = Some(block.inner(area));

        let bars = &self.bars;
        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds(BAR_X_BOUNDS)
            .y_bounds(BAR_Y_BOUNDS)
            .paint(|ctx| paint_bars(ctx, bars));
        f.render_widget(canvas, area);
    }

    fn draw_stats(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let counts = project_counts(&self.projects);
        let task_counts = board::column_counts(&self.store);
        let lines = vec![
            Line::from(vec![
                Span::styled("Projects ", Style::default().fg(Color::Gray)),
                Span::styled(
                    counts.total.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
                Span::styled(
                    format!("{} done", counts.completed),
                    Style::default().fg(Color::LightGreen),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{} running", counts.running),
                    Style::default().fg(Color::LightBlue),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{} pending", counts.pending),
                    Style::default().fg(Color::LightYellow),
                ),
            ]),
            Line::from(vec![
                Span::styled("Tasks    ", Style::default().fg(Color::Gray)),
                Span::styled(
                    self.store.len().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
                Span::styled(
                    format!(
                        "{} / {} / {} / {}",
                        task_counts[0], task_counts[1], task_counts[2], task_counts[3]
                    ),
                    Style::default().fg(Color::Gray),
                ),
            ]),
            Line::from(vec![
                Span::styled("Team     ", Style::default().fg(Color::Gray)),
                Span::styled(
                    self.team.len().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" members"),
            ]),
        ];
        let block = Block::default()
            .title("At a Glance")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_running_projects(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let running: Vec<ListItem> = self
            .projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Running)
            .map(|p| {
                ListItem::new(Line::from(vec![
                    Span::styled("▸ ", Style::default().fg(Color::LightBlue)),
                    Span::styled(p.name.clone(), Style::default().fg(Color::White)),
                ]))
            })
            .collect();
        let items = if running.is_empty() {
            vec![ListItem::new("No running projects")]
        } else {
            running
        };
        let block = Block::default()
            .title("Running Projects")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        f.render_widget(List::new(items).block(block), area);
    }

    fn draw_team(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = if self.team.is_empty() {
            vec![ListItem::new("No team data")]
        } else {
            self.team.iter().map(team_item).collect()
        };
        let block = Block::default()
            .title("Team")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        f.render_widget(List::new(items).block(block), area);
    }

    fn draw_board(&mut self, f: &mut ratatui::Frame<'_>, area: Rect) {
        self.card_zones.clear();
        self.column_zones.clear();

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(25); 4])
            .split(area);

        let columns = board::all_columns(&self.store, self.today);
        for (idx, column) in columns.iter().enumerate() {
            self.draw_column(f, chunks[idx], idx, column);
        }
    }

    fn draw_column(
        &mut self,
        f: &mut ratatui::Frame<'_>,
        area: Rect,
        idx: usize,
        column: &ColumnView,
    ) {
        let accent = status_accent(column.status);
        let is_drop_target = self.drag.hover_column() == Some(column.status);
        let border_style = if is_drop_target {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(accent)
        };
        let title_modifier = if idx == self.selected_column {
            Modifier::BOLD | Modifier::UNDERLINED
        } else {
            Modifier::BOLD
        };
        let block = Block::default()
            .title(Span::styled(
                format!("{} ({})", column.status.label(), column.cards.len()),
                Style::default().fg(accent).add_modifier(title_modifier),
            ))
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        f.render_widget(block, area);
        self.column_zones.push((area, column.status));

        if column.is_empty() {
            let placeholder = Paragraph::new(PLACEHOLDER)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(placeholder, inner);
            return;
        }

        for (card_idx, card) in column.cards.iter().enumerate() {
            let y = inner.y + (card_idx as u16) * CARD_HEIGHT;
            if y + CARD_HEIGHT > inner.y + inner.height {
                break;
            }
            let card_area = Rect {
                x: inner.x,
                y,
                width: inner.width,
                height: CARD_HEIGHT,
            };
            let selected =
                idx == self.selected_column && card_idx == self.selected_card;
            let dragging = self.drag.carried_task() == Some(card.id);
            f.render_widget(card_widget(card, selected, dragging), card_area);
            self.card_zones.push((card_area, card.id));
        }
    }

    fn draw_footer(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(2)])
            .split(area);

        let help_bar = Paragraph::new(self.footer_help_line())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(help_bar, rows[0]);

        let status = Paragraph::new(self.status.clone())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(status, rows[1]);
    }

    fn footer_help_line(&self) -> Line<'static> {
        let mut spans = vec![
            Span::styled("1", Style::default().fg(Color::LightCyan)),
            Span::raw(" overview  "),
            Span::styled("2", Style::default().fg(Color::LightCyan)),
            Span::raw(" board  "),
            Span::styled("t/T", Style::default().fg(Color::LightGreen)),
            Span::raw(" tracker  "),
        ];
        match self.view {
            ViewMode::Overview => spans.extend([
                Span::styled("mouse", Style::default().fg(Color::LightCyan)),
                Span::raw(" hover charts  "),
                Span::styled("q", Style::default().fg(Color::LightRed)),
                Span::raw(" quit"),
            ]),
            ViewMode::Board => spans.extend([
                Span::styled("←↑↓→", Style::default().fg(Color::LightCyan)),
                Span::raw(" select  "),
                Span::styled("drag", Style::default().fg(Color::LightCyan)),
                Span::raw(" move card  "),
                Span::styled("m/b", Style::default().fg(Color::LightGreen)),
                Span::raw(" move  "),
                Span::styled("o", Style::default().fg(Color::LightMagenta)),
                Span::raw(" menu  "),
                Span::styled("d", Style::default().fg(Color::LightRed)),
                Span::raw(" delete  "),
                Span::styled("q", Style::default().fg(Color::LightRed)),
                Span::raw(" quit"),
            ]),
        }
        Line::from(spans)
    }

    fn draw_menu(&mut self, f: &mut ratatui::Frame<'_>) {
        let Some(task_id) = self.menus.open_task() else {
            return;
        };
        let next = self
            .store
            .get(task_id)
            .map(|t| t.status.next())
            .unwrap_or(Status::ToDo);
        let area = centered_rect(32, 22, f.size());
        self.menu_area = Some(area);

        let items = [MenuItem::Advance, MenuItem::Delete];
        let lines: Vec<Line> = items
            .iter()
            .map(|&item| {
                let selected = self.menus.selected() == Some(item);
                let style = if selected {
                    Style::default()
                        .bg(Color::LightCyan)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(Span::styled(format!(" {} ", item.label(next)), style))
            })
            .collect();

        let dialog = Paragraph::new(lines).block(
            Block::default()
                .title(Span::styled(
                    format!("Task {}", task_id),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }

    fn draw_confirm(&mut self, f: &mut ratatui::Frame<'_>) {
        let name = self
            .menus
            .open_task()
            .and_then(|id| self.store.get(id))
            .map(|t| t.name.clone())
            .unwrap_or_default();
        let area = centered_rect(50, 25, f.size());
        self.menu_area = Some(area);
        let body = vec![
            Line::from(Span::styled(
                format!("Delete \"{}\"?", name),
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Press y to confirm, n or Esc to cancel"),
        ];
        let dialog = Paragraph::new(body).alignment(Alignment::Center).block(
            Block::default()
                .title(Span::styled(
                    "Confirm Delete",
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::LightRed)),
        );
        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }
}

// ---- chart painting ------------------------------------------------------

fn paint_gauge(ctx: &mut ratatui::widgets::canvas::Context<'_>, gauge: &GaugeChart) {
    let sections = gauge.sections();
    let reveal = gauge.reveal();
    let revealed_until = std::f64::consts::PI * (1.0 - reveal);

    for (idx, section) in sections.iter().enumerate() {
        if section.span() <= 0.0 {
            continue;
        }
        let hovered = gauge.hover() == Some(idx);
        let color = gauge_color(idx, hovered);
        let steps = (section.span() * 60.0).ceil() as usize + 1;
        for step in 0..steps {
            let angle = section.start_angle
                - section.span() * (step as f64 / steps.max(1) as f64);
            // Entrance animation: sweep reveals clockwise from the left.
            if angle < revealed_until {
                continue;
            }
            match section.fill {
                Fill::Solid => {
                    ctx.draw(&CanvasLine {
                        x1: gauge.inner_radius * angle.cos(),
                        y1: gauge.inner_radius * angle.sin(),
                        x2: gauge.outer_radius * angle.cos(),
                        y2: gauge.outer_radius * angle.sin(),
                        color,
                    });
                }
                Fill::Stripe => {
                    // Diagonal hatch: dotted radial samples, phase-shifted
                    // per step.
                    let coords: Vec<(f64, f64)> = (0..8)
                        .filter(|r| (r + step) % 3 == 0)
                        .map(|r| {
                            let radius = gauge.inner_radius
                                + (gauge.outer_radius - gauge.inner_radius) * (r as f64 / 7.0);
                            (radius * angle.cos(), radius * angle.sin())
                        })
                        .collect();
                    ctx.draw(&Points {
                        coords: &coords,
                        color,
                    });
                }
            }
        }
    }

    ctx.print(
        -0.14,
        0.18,
        Line::from(Span::styled(
            format!("{}%", gauge.center_percent()),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
    );
    if gauge.label_visible() {
        ctx.print(
            -0.22,
            0.02,
            Line::from(Span::styled(
                "Completed",
                Style::default().fg(Color::Gray),
            )),
        );
    }
    if let Some(hover) = gauge.hover() {
        if let Some(tooltip) = gauge.tooltip(hover) {
            ctx.print(
                -0.35,
                1.15,
                Line::from(Span::styled(
                    tooltip,
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::LightYellow)
                        .add_modifier(Modifier::BOLD),
                )),
            );
        }
    }
}

fn paint_bars(ctx: &mut ratatui::widgets::canvas::Context<'_>, bars: &BarChart) {
    for idx in 0..DAY_NAMES.len() {
        let span = crate::charts::bar::bar_span(idx);
        let height = bars.animated_height(idx);
        let hovered = bars.hover() == Some(idx);
        let color = bar_color(bars.fill(idx), hovered);
        let samples = 14;
        for s in 0..=samples {
            let x = span.left + (span.right - span.left) * (s as f64 / samples as f64);
            // Rounded top: shave the edge samples slightly.
            let shave = if s == 0 || s == samples { 0.92 } else { 1.0 };
            let top = height * shave;
            if top <= 0.0 {
                continue;
            }
            match bars.fill(idx) {
                Fill::Solid => {
                    ctx.draw(&CanvasLine {
                        x1: x,
                        y1: 0.0,
                        x2: x,
                        y2: top,
                        color,
                    });
                }
                Fill::Stripe => {
                    let dots = 16;
                    let coords: Vec<(f64, f64)> = (0..=dots)
                        .filter(|d| (d + s) % 3 == 0)
                        .map(|d| (x, top * (d as f64 / dots as f64)))
                        .collect();
                    ctx.draw(&Points {
                        coords: &coords,
                        color,
                    });
                }
            }
        }
        ctx.print(
            span.center() - 0.02,
            -0.12,
            Line::from(Span::styled(
                DAY_NAMES[idx],
                Style::default().fg(if hovered { Color::White } else { Color::Gray }),
            )),
        );
    }

    if let Some(hover) = bars.hover() {
        if let Some(tooltip) = bars.tooltip(hover) {
            let span = crate::charts::bar::bar_span(hover);
            let top = bars.animated_height(hover);
            // Callout bubble with a pointer connecting it to the bar.
            ctx.print(
                (span.center() - 0.05).clamp(0.0, 0.82),
                (top + 0.18).min(1.28),
                Line::from(Span::styled(
                    tooltip,
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::LightYellow)
                        .add_modifier(Modifier::BOLD),
                )),
            );
            ctx.print(
                span.center() - 0.01,
                (top + 0.08).min(1.2),
                Line::from(Span::styled("▼", Style::default().fg(Color::LightYellow))),
            );
        }
    }
}

fn gauge_color(section: usize, hovered: bool) -> Color {
    match (section, hovered) {
        (0, false) => Color::Green,
        (0, true) => Color::LightGreen,
        (1, false) => Color::Blue,
        (1, true) => Color::LightBlue,
        (_, false) => Color::Yellow,
        (_, true) => Color::LightYellow,
    }
}

fn bar_color(fill: Fill, hovered: bool) -> Color {
    match (fill, hovered) {
        (Fill::Solid, false) => Color::Cyan,
        (Fill::Solid, true) => Color::LightCyan,
        (Fill::Stripe, false) => Color::Yellow,
        (Fill::Stripe, true) => Color::LightYellow,
    }
}

// ---- widgets and helpers -------------------------------------------------

fn card_widget(card: &CardView, selected: bool, dragging: bool) -> Paragraph<'static> {
    let name = truncate_text(&card.name, 30);
    let mut meta = vec![Span::styled(
        card.due_text.clone(),
        Style::default().fg(Color::Gray),
    )];
    if let Some(badge) = card.badge {
        meta.push(Span::raw("  "));
        meta.push(badge_span(badge));
    }
    let lines = vec![
        Line::from(Span::styled(
            name,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate_text(&card.description, 34),
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
        )),
        Line::from(meta),
    ];
    let base = if dragging {
        Style::default()
            .bg(Color::Rgb(40, 42, 50))
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    } else if selected {
        Style::default()
            .bg(Color::Rgb(252, 214, 112))
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::Rgb(22, 24, 30)).fg(Color::Gray)
    };
    Paragraph::new(lines)
        .style(base)
        .block(Block::default().borders(Borders::BOTTOM))
}

fn badge_span(badge: Urgency) -> Span<'static> {
    let style = match badge {
        Urgency::Overdue(_) => Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD),
        Urgency::Today => Style::default()
            .fg(Color::LightMagenta)
            .add_modifier(Modifier::BOLD),
        Urgency::Urgent(_) => Style::default().fg(Color::LightYellow),
        Urgency::Normal(_) => Style::default().fg(Color::DarkGray),
    };
    Span::styled(badge.text(), style)
}

fn team_item(member: &TeamMember) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        Span::styled(
            member.full_name.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(member.job.clone(), Style::default().fg(Color::Gray)),
    ]))
}

fn status_accent(status: Status) -> Color {
    match status {
        Status::ToDo => Color::LightBlue,
        Status::InProgress => Color::LightMagenta,
        Status::Done => Color::LightGreen,
        Status::Pending => Color::LightYellow,
    }
}

fn contains(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Maps a terminal cell inside `area` to chart coordinates under the given
/// canvas bounds (y axis inverted: row 0 is the top of the chart).
fn canvas_point(
    area: Rect,
    col: u16,
    row: u16,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
) -> Option<(f64, f64)> {
    if !contains(area, col, row) || area.width == 0 || area.height == 0 {
        return None;
    }
    let u = (col - area.x) as f64 + 0.5;
    let v = (row - area.y) as f64 + 0.5;
    let x = x_bounds[0] + u / area.width as f64 * (x_bounds[1] - x_bounds[0]);
    let y = y_bounds[1] - v / area.height as f64 * (y_bounds[1] - y_bounds[0]);
    Some((x, y))
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}

fn truncate_text(text: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    for ch in text.chars() {
        if out.chars().count() >= max.saturating_sub(3) {
            out.push_str("...");
            break;
        }
        out.push(ch);
    }
    if out.chars().count() > max {
        out.truncate(max);
    }
    out
}
