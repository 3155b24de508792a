use std::{io, path::PathBuf, thread, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use rechtsform_core::{
    catalog::Catalog,
    mixed::{DEFAULT_BASE, DEFAULT_INSERTION},
    statistics::{self, Dataset},
    AppConfig, CandidateSlot, Company, Layer, MixedFormCandidates, SectionKind,
};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::graphic::{self, GraphicOptions};

const TICK_RATE: Duration = Duration::from_millis(250);
const BAR_WIDTH: usize = 30;

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    selection_bg: Color,
    warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            warning: Color::Yellow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Filter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Browse,
    Detail,
    MixedForms,
    Statistics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Preference {
    Translations,
    Variants,
    Patterns,
}

enum AppEvent {
    Input(Event),
    Tick,
}

/// High-level application state for the legal forms browser.
pub struct RechtsformApp {
    catalog: &'static Catalog,
    config: AppConfig,
    config_path: PathBuf,
    state: UiState,
    screen: Screen,
    details: Vec<DetailView>,
    detail_origin: Screen,
    mixed: MixedBuilder,
    dataset_cursor: usize,
    datasets: Vec<Dataset>,
    theme: Theme,
}

impl RechtsformApp {
    pub fn new(catalog: &'static Catalog, config: AppConfig, config_path: PathBuf) -> Result<Self> {
        let mixed = MixedBuilder::new(catalog, &config)?;
        Ok(Self {
            catalog,
            config,
            config_path,
            state: UiState::default(),
            screen: Screen::Browse,
            details: Vec::new(),
            detail_origin: Screen::Browse,
            mixed,
            dataset_cursor: 0,
            datasets: statistics::datasets(),
            theme: Theme::default(),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.reload_companies();
        self.state
            .set_status(format!("Loaded {} companies", self.state.filtered.len()));

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.state.should_quit {
                break;
            }
            let maybe_event = event_rx.recv().await;
            if !self.process_app_event(maybe_event) {
                break;
            }
            if self.state.should_quit {
                break;
            }
        }

        restore_terminal(&mut terminal)
    }

    fn reload_companies(&mut self) {
        self.state
            .apply_filter(self.catalog, self.config.show_variants);
        info!(total = self.state.filtered.len(), "Companies listed");
    }

    fn handle_tick(&mut self) {
        if self.state.mode == Mode::Filter {
            self.state
                .set_status(format!("Search: {}", self.state.filter));
        }
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(event)) => {
                if let Err(err) = self.handle_input(event) {
                    self.state.set_status(format!("Error: {err}"));
                }
                true
            }
            Some(AppEvent::Tick) => {
                self.handle_tick();
                true
            }
            None => false,
        }
    }

    fn handle_input(&mut self, event: Event) -> Result<()> {
        let Event::Key(key) = event else {
            return Ok(());
        };
        match self.screen {
            Screen::Browse => match self.state.mode {
                Mode::Filter => self.handle_filter_key(key),
                Mode::Browse => self.handle_browse_key(key),
            },
            Screen::Detail => self.handle_detail_key(key),
            Screen::MixedForms => self.handle_mixed_key(key),
            Screen::Statistics => self.handle_statistics_key(key),
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.state.mode = Mode::Browse;
                self.state.filter.clear();
                self.reload_companies();
                self.state.set_status("Search cleared".to_string());
            }
            KeyCode::Enter => {
                self.state.mode = Mode::Browse;
                self.state.set_status(format!(
                    "Search applied: {} ({} matches)",
                    self.state.filter,
                    self.state.filtered.len()
                ));
            }
            KeyCode::Backspace => {
                self.state.filter.pop();
                self.reload_companies();
                self.state
                    .set_status(format!("Search: {}", self.state.filter));
            }
            KeyCode::Char(c) => {
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                    self.state.filter.push(c);
                    self.reload_companies();
                    self.state
                        .set_status(format!("Search: {}", self.state.filter));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => self.state.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.should_quit = true
            }
            KeyCode::Char('j') | KeyCode::Down => self.state.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_cursor(-1),
            KeyCode::Char('g') if key.modifiers.is_empty() => self.state.move_to(0),
            KeyCode::Char('G') if key.modifiers.is_empty() => self.state.move_to_end(),
            KeyCode::Home => self.state.move_to(0),
            KeyCode::End => self.state.move_to_end(),
            KeyCode::PageDown => self.state.page_down(),
            KeyCode::PageUp => self.state.page_up(),
            KeyCode::Char('/') => {
                self.state.mode = Mode::Filter;
                self.state.set_status("Enter search text".to_string());
            }
            KeyCode::Char('t') => self.toggle_preference(Preference::Translations),
            KeyCode::Char('v') => self.toggle_preference(Preference::Variants),
            KeyCode::Char('d') => self.toggle_preference(Preference::Patterns),
            KeyCode::Char('m') => {
                self.screen = Screen::MixedForms;
                self.state.set_status(self.mixed.summary());
            }
            KeyCode::Char('s') => {
                self.screen = Screen::Statistics;
                self.state.set_status("Company forms in Germany".to_string());
            }
            KeyCode::Enter => {
                if let Some(entry) = self.state.current_entry() {
                    let company = entry.company.clone();
                    self.open_detail(company, Screen::Browse);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Backspace => self.close_detail(),
            KeyCode::Char('j') | KeyCode::Down => {
                if let Some(view) = self.details.last_mut() {
                    view.move_layer(1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if let Some(view) = self.details.last_mut() {
                    view.move_layer(-1);
                }
            }
            KeyCode::Tab | KeyCode::BackTab => {
                let switched = self
                    .details
                    .last_mut()
                    .and_then(|view| view.toggle_alternate().then(|| view.shown().title().to_string()));
                match switched {
                    Some(title) => self.state.set_status(format!("Showing {title}")),
                    None => self
                        .state
                        .set_status("No alternate structure available".to_string()),
                }
            }
            KeyCode::Enter => {
                let embedded = self
                    .details
                    .last()
                    .and_then(DetailView::selected_layer)
                    .and_then(Layer::embedded_company)
                    .cloned();
                match embedded {
                    Some(company) => self.open_detail(company, Screen::Detail),
                    None => self
                        .state
                        .set_status("Select a company layer to open it".to_string()),
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_mixed_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.screen = Screen::Browse;
                self.state.set_status("Back to catalog".to_string());
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Char('l') => {
                self.mixed.toggle_focus()
            }
            KeyCode::Left => self.mixed.focus = CandidateSlot::Base,
            KeyCode::Right => self.mixed.focus = CandidateSlot::Insertion,
            KeyCode::Char('j') | KeyCode::Down => {
                self.mixed.move_selection(1);
                self.state.set_status(self.mixed.summary());
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.mixed.move_selection(-1);
                self.state.set_status(self.mixed.summary());
            }
            KeyCode::Char('p') => {
                self.config.mixed_base = self.mixed.base_key().to_string();
                self.config.mixed_insertion = self.mixed.insertion_key().to_string();
                info!(
                    base = %self.config.mixed_base,
                    insertion = %self.config.mixed_insertion,
                    "Mixed form defaults changed"
                );
                self.state
                    .set_status(format!("Saved {} as default", self.mixed.summary()));
                self.persist_config();
            }
            KeyCode::Enter => {
                if let Some(company) = self.mixed.composed() {
                    self.open_detail(company, Screen::MixedForms);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_statistics_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.screen = Screen::Browse;
                self.state.set_status("Back to catalog".to_string());
            }
            KeyCode::Tab | KeyCode::Char('j') | KeyCode::Down => {
                self.dataset_cursor = (self.dataset_cursor + 1) % self.datasets.len().max(1)
            }
            KeyCode::BackTab | KeyCode::Char('k') | KeyCode::Up => {
                let len = self.datasets.len().max(1);
                self.dataset_cursor = (self.dataset_cursor + len - 1) % len;
            }
            _ => {}
        }
        Ok(())
    }

    fn open_detail(&mut self, company: Company, origin: Screen) {
        info!(company = %company.key, "Company focused");
        if self.details.is_empty() {
            self.detail_origin = origin;
        }
        self.state.set_status(company.title().to_string());
        self.details
            .push(DetailView::new(company, !self.config.show_variants));
        self.screen = Screen::Detail;
    }

    fn close_detail(&mut self) {
        self.details.pop();
        match self.details.last() {
            Some(view) => self.state.set_status(view.shown().title().to_string()),
            None => self.screen = self.detail_origin,
        }
    }

    fn toggle_preference(&mut self, preference: Preference) {
        let (name, value) = match preference {
            Preference::Translations => {
                self.config.show_translations = !self.config.show_translations;
                ("Translations", self.config.show_translations)
            }
            Preference::Variants => {
                self.config.show_variants = !self.config.show_variants;
                ("Variants", self.config.show_variants)
            }
            Preference::Patterns => {
                self.config.differentiate_without_color = !self.config.differentiate_without_color;
                ("Patterns", self.config.differentiate_without_color)
            }
        };
        info!(preference = name, value, "Preference changed");

        if preference == Preference::Variants {
            let selected = self
                .state
                .current_entry()
                .map(|entry| entry.company.key.clone());
            self.reload_companies();
            if let Some(key) = selected {
                self.state.select_company(&key);
            }
        }

        let label = if value { "on" } else { "off" };
        self.state.set_status(format!("{name} {label}"));
        self.persist_config();
    }

    fn persist_config(&mut self) {
        if let Err(err) = self.config.persist(&self.config_path) {
            error!(?err, "Failed to persist preferences");
            self.state
                .set_status(format!("Failed to save preferences: {err}"));
        }
    }

    fn graphic_options(&self, highlight: Option<&Layer>) -> GraphicOptions {
        GraphicOptions {
            patterned: self.config.differentiate_without_color,
            highlight: highlight.map(|layer| layer.id),
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        match self.screen {
            Screen::Browse => self.draw_browse(frame),
            Screen::Detail => self.draw_detail(frame),
            Screen::MixedForms => self.draw_mixed(frame),
            Screen::Statistics => self.draw_statistics(frame),
        }
    }

    fn split_status(area: Rect) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(4)])
            .split(area);
        (chunks[0], chunks[1])
    }

    fn draw_browse(&mut self, frame: &mut Frame) {
        let (body, status) = Self::split_status(frame.size());
        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(body);

        self.render_company_list(frame, body_chunks[0]);
        self.render_company_preview(frame, body_chunks[1]);
        self.render_status(frame, status);
    }

    fn render_company_list(&mut self, frame: &mut Frame, area: Rect) {
        self.state.list_height = area.height.saturating_sub(2) as usize;
        self.state.clamp_cursor();
        self.state.ensure_cursor_visible();

        let translate = self.config.show_translations;
        let height = self.state.list_height;
        let entries = self.state.visible_entries(height);
        let mut items = Vec::with_capacity(entries.len() + 4);
        let mut selected = None;
        let mut previous_section = None;

        for (idx, entry) in entries.iter().enumerate() {
            if previous_section != Some(entry.section) {
                items.push(ListItem::new(Line::from(Span::styled(
                    entry.section.title().to_uppercase(),
                    Style::default()
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                ))));
                previous_section = Some(entry.section);
            }
            let is_selected = self.state.cursor == self.state.offset + idx;
            if is_selected {
                selected = Some(items.len());
            }
            let marker = if is_selected {
                Span::styled(
                    "▶ ",
                    Style::default()
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw("  ")
            };
            let title = Span::styled(
                entry.company.title().to_string(),
                Style::default()
                    .fg(self.theme.primary_fg)
                    .add_modifier(Modifier::BOLD),
            );
            let mut line = vec![marker, title];
            let name = entry.company.display_name(translate);
            if name != entry.company.title() {
                line.push(Span::styled(
                    format!(" · {name}"),
                    Style::default().fg(self.theme.muted),
                ));
            }
            items.push(ListItem::new(Line::from(line)));
        }

        let mut list_state = ListState::default();
        list_state.select(selected);

        let title = if self.state.filter.is_empty() {
            "Legal Forms".to_string()
        } else {
            format!("Legal Forms · \"{}\"", self.state.filter)
        };
        let block = Block::default().borders(Borders::ALL).title(title);
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(self.theme.selection_bg));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_company_preview(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Overview");
        let Some(entry) = self.state.current_entry() else {
            let paragraph = Paragraph::new("No matching companies").block(block);
            frame.render_widget(paragraph, area);
            return;
        };

        let company = &entry.company;
        let mut lines = self.company_header(company);
        lines.push(Line::from(""));
        lines.extend(graphic::render(
            &company.structure,
            area.width.saturating_sub(2),
            self.graphic_options(None),
        ));
        lines.push(Line::from(""));
        if let Some(footer) = entry.section.footer() {
            lines.push(Line::from(Span::styled(
                footer.to_string(),
                Style::default().fg(self.theme.muted),
            )));
        }

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn company_header(&self, company: &Company) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(
            company.title().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        if let Some(subtitle) = company.subtitle() {
            lines.push(Line::from(Span::styled(
                subtitle.to_string(),
                Style::default().fg(self.theme.muted),
            )));
        }
        if self.config.show_translations || company.subtitle().is_none() {
            lines.push(Line::from(Span::styled(
                company.english_translation.clone(),
                Style::default().fg(self.theme.muted),
            )));
        }
        lines
    }

    fn draw_detail(&self, frame: &mut Frame) {
        let (body, status) = Self::split_status(frame.size());
        let Some(view) = self.details.last() else {
            self.render_status(frame, status);
            return;
        };
        let company = view.shown();

        let has_tabs = view.alternate.is_some();
        let header_height = if has_tabs { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(header_height), Constraint::Min(6)])
            .split(body);

        if has_tabs {
            let tabs = Tabs::new(vec!["Default Structure", "Alternate Structure"])
                .select(usize::from(view.show_alternate))
                .block(Block::default().borders(Borders::ALL).title("Tab"))
                .highlight_style(
                    Style::default()
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                );
            frame.render_widget(tabs, chunks[0]);
        }

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);

        let selected = view.selected_layer();
        let patterned = self.config.differentiate_without_color;
        let mut graphic_lines = self.company_header(company);
        graphic_lines.push(Line::from(""));
        graphic_lines.extend(graphic::render(
            &company.structure,
            panes[0].width.saturating_sub(2),
            self.graphic_options(selected),
        ));
        graphic_lines.push(Line::from(""));
        graphic_lines.extend(graphic::legend(&company.structure, patterned));
        let breadcrumb = self
            .details
            .iter()
            .map(|view| view.shown().title().to_string())
            .collect::<Vec<_>>()
            .join(" › ");
        let paragraph = Paragraph::new(graphic_lines)
            .block(Block::default().borders(Borders::ALL).title(breadcrumb))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, panes[0]);

        let info = self.layer_info(company, selected);
        let paragraph = Paragraph::new(info)
            .block(Block::default().borders(Borders::ALL).title("Details"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, panes[1]);

        self.render_status(frame, status);
    }

    fn layer_info(&self, company: &Company, selected: Option<&Layer>) -> Vec<Line<'static>> {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let muted = Style::default().fg(self.theme.muted);
        let mut lines = Vec::new();

        if let Some(layer) = selected {
            lines.push(Line::from(Span::styled(layer.label.clone(), bold)));
            lines.push(Line::from(Span::styled(
                format!("{} · {}", layer.category().title(), layer.variant_title()),
                muted,
            )));
            lines.push(Line::from(layer.explanation()));
            if let (Some(title), Some(explanation)) =
                (layer.liability.title(), layer.liability.explanation())
            {
                let marker = graphic::liability_marker(layer.liability)
                    .map(String::from)
                    .unwrap_or_default();
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(format!("{marker} {title}"), bold)));
                lines.push(Line::from(explanation));
            }
            if let Some(embedded) = layer.embedded_company() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("Enter: open {}", embedded.title()),
                    Style::default().fg(self.theme.accent),
                )));
            }
        }

        if let Some(reason) = &company.reason {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Purpose", bold)));
            lines.push(Line::from(reason.clone()));
        }
        if let Some(tidbit) = &company.tidbit {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Did you know?",
                Style::default()
                    .fg(self.theme.warning)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(tidbit.clone()));
        }
        lines
    }

    fn draw_mixed(&self, frame: &mut Frame) {
        let (body, status) = Self::split_status(frame.size());
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(body);
        let pickers = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(panes[0]);

        self.render_candidates(
            frame,
            pickers[0],
            "Base",
            &self.mixed.candidates.bases,
            self.mixed.base,
            self.mixed.focus == CandidateSlot::Base,
        );
        self.render_candidates(
            frame,
            pickers[1],
            "Inserted Company",
            &self.mixed.candidates.insertions,
            self.mixed.insertion,
            self.mixed.focus == CandidateSlot::Insertion,
        );

        let block = Block::default().borders(Borders::ALL).title("Mixed Form");
        match self.mixed.composed() {
            Some(company) => {
                let mut lines = self.company_header(&company);
                lines.push(Line::from(""));
                lines.extend(graphic::render(
                    &company.structure,
                    panes[1].width.saturating_sub(2),
                    self.graphic_options(None),
                ));
                lines.push(Line::from(""));
                lines.extend(graphic::legend(
                    &company.structure,
                    self.config.differentiate_without_color,
                ));
                let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
                frame.render_widget(paragraph, panes[1]);
            }
            None => frame.render_widget(Paragraph::new("Nothing selected").block(block), panes[1]),
        }

        self.render_status(frame, status);
    }

    fn render_candidates(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        companies: &[Company],
        selected: usize,
        focused: bool,
    ) {
        let items: Vec<ListItem> = companies
            .iter()
            .map(|company| ListItem::new(company.title().to_string()))
            .collect();
        let mut block = Block::default().borders(Borders::ALL).title(title.to_string());
        if focused {
            block = block.border_style(Style::default().fg(self.theme.accent));
        }
        let mut list_state = ListState::default();
        list_state.select(Some(selected));
        let list = List::new(items)
            .block(block)
            .highlight_symbol("▶ ")
            .highlight_style(Style::default().bg(self.theme.selection_bg));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_statistics(&self, frame: &mut Frame) {
        let (body, status) = Self::split_status(frame.size());
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Company Forms in Germany");

        let mut lines = Vec::new();
        if let Some(dataset) = self.datasets.get(self.dataset_cursor) {
            lines.push(Line::from(Span::styled(
                dataset.title,
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            let sorted = dataset.sorted();
            let largest = sorted.first().map(|share| share.percent).unwrap_or(0.0);
            let label_width = sorted
                .iter()
                .map(|share| share.label.chars().count())
                .max()
                .unwrap_or(0);
            for share in &sorted {
                lines.push(Line::from(vec![
                    Span::raw(format!("{:<label_width$}  ", share.label)),
                    Span::styled(
                        bar(share.percent, largest, BAR_WIDTH),
                        Style::default().fg(self.theme.accent),
                    ),
                    Span::raw(format!(" {}", percent(share.percent))),
                ]));
            }
            lines.push(Line::from(""));
            if let Some(note) = dataset.note {
                lines.push(Line::from(Span::styled(
                    note,
                    Style::default().fg(self.theme.muted),
                )));
            }
            lines.push(Line::from(Span::styled(
                format!("Source: {}", dataset.source),
                Style::default().fg(self.theme.muted),
            )));
        }

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, body);
        self.render_status(frame, status);
    }

    fn key_hints(&self) -> &'static str {
        match (self.screen, self.state.mode) {
            (Screen::Browse, Mode::Filter) => "type to search · Enter apply · Esc clear",
            (Screen::Browse, Mode::Browse) => {
                "/ search · Enter open · t translations · v variants · d patterns · m mixed forms · s statistics · q quit"
            }
            (Screen::Detail, _) => "j/k layer · Tab alternate · Enter open company · Esc back",
            (Screen::MixedForms, _) => "Tab switch picker · j/k choose · Enter open · p save default · Esc back",
            (Screen::Statistics, _) => "Tab next dataset · Esc back",
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let primary = if self.screen == Screen::Browse && self.state.mode == Mode::Filter {
            format!("Search: {}", self.state.filter)
        } else {
            self.state.status.clone()
        };
        let secondary = Span::styled(self.key_hints(), Style::default().fg(self.theme.muted));
        let paragraph = Paragraph::new(vec![Line::from(primary), Line::from(secondary)])
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

/// Bar scaled so that `largest` fills `width` cells.
fn bar(value: f64, largest: f64, width: usize) -> String {
    if largest <= 0.0 {
        return String::new();
    }
    let cells = ((value / largest) * width as f64).round() as usize;
    "█".repeat(cells.clamp(1, width))
}

fn percent(value: f64) -> String {
    if value >= 1.0 {
        format!("{value:.1} %")
    } else {
        format!("{value:.2} %")
    }
}

#[derive(Debug, Clone)]
struct ListEntry {
    section: SectionKind,
    company: Company,
}

struct UiState {
    filtered: Vec<ListEntry>,
    cursor: usize,
    offset: usize,
    list_height: usize,
    filter: String,
    status: String,
    mode: Mode,
    should_quit: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            filtered: Vec::new(),
            cursor: 0,
            offset: 0,
            list_height: 1,
            filter: String::new(),
            status: "Ready".to_string(),
            mode: Mode::Browse,
            should_quit: false,
        }
    }
}

impl UiState {
    fn apply_filter(&mut self, catalog: &Catalog, show_variants: bool) {
        let registry = catalog.alternates();
        let query = self.filter.as_str();
        let filtered: Vec<ListEntry> = catalog
            .sections()
            .iter()
            .flat_map(|section| {
                section
                    .visible_companies(registry, query, show_variants)
                    .into_iter()
                    .map(|company| ListEntry {
                        section: section.kind,
                        company,
                    })
            })
            .collect();
        self.filtered = filtered;
        self.cursor = 0;
        self.offset = 0;
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.filtered.is_empty() {
            return;
        }
        let len = self.filtered.len() as isize;
        let idx = (self.cursor as isize + delta).clamp(0, len - 1);
        self.cursor = idx as usize;
        self.ensure_cursor_visible();
    }

    fn move_to(&mut self, index: usize) {
        if self.filtered.is_empty() {
            return;
        }
        self.cursor = index.min(self.filtered.len() - 1);
        self.ensure_cursor_visible();
    }

    fn move_to_end(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        self.cursor = self.filtered.len() - 1;
        self.ensure_cursor_visible();
    }

    fn page_down(&mut self) {
        if self.filtered.is_empty() || self.list_height == 0 {
            return;
        }
        let delta = self.list_height.min(self.filtered.len());
        self.move_cursor(delta as isize);
    }

    fn page_up(&mut self) {
        if self.filtered.is_empty() || self.list_height == 0 {
            return;
        }
        let delta = self.list_height.min(self.filtered.len());
        self.move_cursor(-(delta as isize));
    }

    fn visible_entries(&self, height: usize) -> &[ListEntry] {
        if self.filtered.is_empty() {
            return &[];
        }
        let end = (self.offset + height).min(self.filtered.len());
        &self.filtered[self.offset..end]
    }

    fn current_entry(&self) -> Option<&ListEntry> {
        self.filtered.get(self.cursor)
    }

    fn select_company(&mut self, key: &str) -> bool {
        match self.filtered.iter().position(|entry| entry.company.key == key) {
            Some(pos) => {
                self.cursor = pos;
                self.ensure_cursor_visible();
                true
            }
            None => false,
        }
    }

    fn set_status(&mut self, message: String) {
        self.status = message;
    }

    fn clamp_cursor(&mut self) {
        if self.filtered.is_empty() {
            self.cursor = 0;
            self.offset = 0;
        } else if self.cursor >= self.filtered.len() {
            self.cursor = self.filtered.len() - 1;
        }
    }

    fn ensure_cursor_visible(&mut self) {
        if self.filtered.is_empty() || self.list_height == 0 {
            self.offset = 0;
            return;
        }
        let height = self.list_height;
        let max_offset = self.filtered.len().saturating_sub(height);

        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }

        if self.offset > max_offset {
            self.offset = max_offset;
        }
    }
}

/// One company on the detail stack, optionally flipped to its alternate.
struct DetailView {
    company: Company,
    alternate: Option<Company>,
    show_alternate: bool,
    layer_cursor: usize,
}

impl DetailView {
    fn new(company: Company, offer_alternate: bool) -> Self {
        let alternate = company
            .resolve_alternate(offer_alternate)
            .map(|(_, alternate)| alternate.clone());
        Self {
            company,
            alternate,
            show_alternate: false,
            layer_cursor: 0,
        }
    }

    fn shown(&self) -> &Company {
        match (&self.alternate, self.show_alternate) {
            (Some(alternate), true) => alternate,
            _ => &self.company,
        }
    }

    fn layers(&self) -> Vec<&Layer> {
        self.shown()
            .structure
            .iter()
            .flat_map(|node| node.layers())
            .collect()
    }

    fn selected_layer(&self) -> Option<&Layer> {
        self.layers().get(self.layer_cursor).copied()
    }

    fn move_layer(&mut self, delta: isize) {
        let count = self.layers().len();
        if count == 0 {
            return;
        }
        let idx = (self.layer_cursor as isize + delta).clamp(0, count as isize - 1);
        self.layer_cursor = idx as usize;
    }

    /// Flip between the company and its alternate; false when there is none.
    fn toggle_alternate(&mut self) -> bool {
        if self.alternate.is_none() {
            return false;
        }
        self.show_alternate = !self.show_alternate;
        self.layer_cursor = 0;
        true
    }
}

struct MixedBuilder {
    candidates: MixedFormCandidates,
    base: usize,
    insertion: usize,
    focus: CandidateSlot,
}

impl MixedBuilder {
    fn new(catalog: &Catalog, config: &AppConfig) -> Result<Self> {
        let candidates = MixedFormCandidates::from_catalog(catalog)
            .context("mixed form candidates missing from catalog")?;
        let base = match candidates.base_index(&config.mixed_base) {
            Ok(idx) => idx,
            Err(err) => {
                warn!(%err, "Falling back to default base");
                candidates.base_index(DEFAULT_BASE)?
            }
        };
        let insertion = match candidates.insertion_index(&config.mixed_insertion) {
            Ok(idx) => idx,
            Err(err) => {
                warn!(%err, "Falling back to default insertion");
                candidates.insertion_index(DEFAULT_INSERTION)?
            }
        };
        Ok(Self {
            candidates,
            base,
            insertion,
            focus: CandidateSlot::Base,
        })
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            CandidateSlot::Base => CandidateSlot::Insertion,
            CandidateSlot::Insertion => CandidateSlot::Base,
        };
    }

    fn move_selection(&mut self, delta: isize) {
        let (cursor, len) = match self.focus {
            CandidateSlot::Base => (&mut self.base, self.candidates.bases.len()),
            CandidateSlot::Insertion => (&mut self.insertion, self.candidates.insertions.len()),
        };
        if len == 0 {
            return;
        }
        *cursor = (*cursor as isize + delta).clamp(0, len as isize - 1) as usize;
    }

    fn base_key(&self) -> &str {
        self.candidates
            .bases
            .get(self.base)
            .map(|company| company.key.as_str())
            .unwrap_or(DEFAULT_BASE)
    }

    fn insertion_key(&self) -> &str {
        self.candidates
            .insertions
            .get(self.insertion)
            .map(|company| company.key.as_str())
            .unwrap_or(DEFAULT_INSERTION)
    }

    fn composed(&self) -> Option<Company> {
        self.candidates.compose(self.base, self.insertion)
    }

    fn summary(&self) -> String {
        self.composed()
            .map(|company| company.title().to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use rechtsform_core::catalog;

    fn browse_state(query: &str, show_variants: bool) -> UiState {
        let mut state = UiState {
            filter: query.to_string(),
            list_height: 5,
            ..UiState::default()
        };
        state.apply_filter(catalog(), show_variants);
        state
    }

    #[test]
    fn filter_lists_matching_companies_across_sections() {
        let state = browse_state("haftung", false);
        assert!(!state.filtered.is_empty());
        assert!(state
            .filtered
            .iter()
            .any(|entry| entry.company.key == "gmbh" && entry.section == SectionKind::Corporations));
        assert!(state
            .filtered
            .iter()
            .any(|entry| entry.section == SectionKind::MixedForms));
    }

    #[test]
    fn variants_are_listed_after_their_base() {
        let hidden = browse_state("", false);
        let shown = browse_state("", true);
        assert_eq!(
            shown.filtered.len(),
            hidden.filtered.len() + catalog().alternates().len()
        );
        let gmbh = shown
            .filtered
            .iter()
            .position(|entry| entry.company.key == "gmbh")
            .expect("gmbh listed");
        assert_eq!(shown.filtered[gmbh + 1].company.key, "ggmbh");
    }

    #[test]
    fn cursor_stays_in_bounds_and_visible() {
        let mut state = browse_state("", false);
        state.move_cursor(-3);
        assert_eq!(state.cursor, 0);

        state.move_to_end();
        assert_eq!(state.cursor, state.filtered.len() - 1);
        assert_eq!(state.offset, state.filtered.len() - 5);

        state.page_up();
        assert_eq!(state.cursor, state.filtered.len() - 6);
        assert!(state.cursor >= state.offset && state.cursor < state.offset + 5);
    }

    #[test]
    fn select_company_moves_cursor() {
        let mut state = browse_state("", false);
        assert!(state.select_company("ev"));
        assert_eq!(state.current_entry().map(|entry| entry.company.key.as_str()), Some("ev"));
        assert!(!state.select_company("wv"));
    }

    #[test]
    fn detail_view_flips_to_alternate() -> Result<()> {
        let gmbh = catalog().find("gmbh")?.clone();
        let mut view = DetailView::new(gmbh.clone(), true);
        assert_eq!(view.shown().key, "gmbh");
        view.move_layer(1);
        assert!(view.toggle_alternate());
        assert_eq!(view.shown().key, "ggmbh");
        assert_eq!(view.layer_cursor, 0);

        let mut listed_variants = DetailView::new(gmbh, false);
        assert!(!listed_variants.toggle_alternate());
        assert_eq!(listed_variants.shown().key, "gmbh");
        Ok(())
    }

    #[test]
    fn detail_view_finds_inserted_companies() -> Result<()> {
        let mixed = catalog().find("gmbh-co-kg")?.clone();
        let mut view = DetailView::new(mixed, true);
        let layers = view.layers().len();
        let position = (0..layers)
            .find(|idx| {
                view.layers()[*idx]
                    .embedded_company()
                    .is_some_and(|company| company.key == "gmbh")
            })
            .expect("gmbh embedded");
        view.move_layer(position as isize);
        let embedded = view
            .selected_layer()
            .and_then(Layer::embedded_company)
            .map(|company| company.key.clone());
        assert_eq!(embedded.as_deref(), Some("gmbh"));

        view.move_layer(100);
        assert_eq!(view.layer_cursor, layers - 1);
        Ok(())
    }

    #[test]
    fn mixed_builder_starts_from_preferences() -> Result<()> {
        let config = AppConfig {
            mixed_base: "ohg".to_string(),
            mixed_insertion: "not-a-company".to_string(),
            ..AppConfig::default()
        };
        let mut builder = MixedBuilder::new(catalog(), &config)?;
        assert_eq!(builder.base_key(), "ohg");
        assert_eq!(builder.insertion_key(), "gmbh");
        assert_eq!(builder.summary(), "GmbH & Co. OHG");

        builder.toggle_focus();
        builder.move_selection(-100);
        assert_eq!(builder.insertion_key(), "kg");
        Ok(())
    }

    #[test]
    fn bars_scale_to_the_largest_share() {
        assert_eq!(bar(50.0, 100.0, 10).chars().count(), 5);
        assert_eq!(bar(0.02, 79.0, 10).chars().count(), 1);
        assert_eq!(bar(79.0, 79.0, 10).chars().count(), 10);
        assert_eq!(percent(0.05), "0.05 %");
        assert_eq!(percent(59.2), "59.2 %");
    }
}
