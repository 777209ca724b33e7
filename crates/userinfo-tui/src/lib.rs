// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::OffsetDateTime;
use time::macros::format_description;
use userinfo_app::{
    AppCommand, AppEvent, AppState, CountryDirectory, CountryOption, FormField, FormRecord,
};
use userinfo_countries::CountryLoadOutcome;

const PICKER_VISIBLE_ROWS: usize = 12;
const FORM_HEIGHT: u16 = FormField::ALL.len() as u16 + 4;

/// I/O seam between the event loop and the outside world.
pub trait AppRuntime {
    /// Starts a directory load whose outcome is sent on `tx` as
    /// [`InternalEvent::Countries`]. Returns the request id the outcome will
    /// carry, or `None` when lookups are turned off.
    fn start_country_load(&mut self, tx: Sender<InternalEvent>) -> Result<Option<u64>>;
    fn cancel_country_load(&mut self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
    Countries(CountryLoadOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    Form,
    Records,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct PickerUiState {
    visible: bool,
    query: String,
    cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    focus: Focus,
    field_index: usize,
    record_cursor: usize,
    picker: PickerUiState,
    help_visible: bool,
    status_token: u64,
    country_request: Option<u64>,
}

impl ViewData {
    fn focused_field(&self) -> FormField {
        FormField::ALL[self.field_index % FormField::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FormRowView {
    field: FormField,
    focused: bool,
    value: String,
    placeholder: bool,
    error: Option<String>,
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    undo_on_error(
        execute!(stdout, terminal::EnterAlternateScreen),
        || {
            let _ = disable_raw_mode();
        },
        "enter alternate screen",
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = undo_on_error(Terminal::new(backend), restore_terminal, "create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();
    start_country_load(state, runtime, &mut view_data, &internal_tx);

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    cancel_country_load(runtime, &mut view_data);

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

// A failed setup step unwinds the ones before it so the shell is not left raw.
fn undo_on_error<T>(result: io::Result<T>, undo: impl FnOnce(), what: &'static str) -> Result<T> {
    result.or_else(|error| {
        undo();
        Err(error).context(what)
    })
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen);
}

fn start_country_load<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    if !state.countries.is_loading() {
        return;
    }
    match runtime.start_country_load(internal_tx.clone()) {
        Ok(Some(request_id)) => view_data.country_request = Some(request_id),
        Ok(None) => {
            tracing::info!("country lookup disabled");
            state.dispatch(AppCommand::CountriesUnavailable);
        }
        Err(error) => {
            tracing::warn!("country lookup not started: {error:#}");
            state.dispatch(AppCommand::CountriesUnavailable);
        }
    }
}

fn cancel_country_load<R: AppRuntime>(runtime: &mut R, view_data: &mut ViewData) {
    if view_data.country_request.take().is_some()
        && let Err(error) = runtime.cancel_country_load()
    {
        tracing::warn!("cancel country load: {error:#}");
    }
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::Countries(outcome) => {
                handle_country_outcome(state, view_data, outcome);
            }
        }
    }
}

fn handle_country_outcome(
    state: &mut AppState,
    view_data: &mut ViewData,
    outcome: CountryLoadOutcome,
) {
    if view_data.country_request != Some(outcome.request_id()) {
        tracing::debug!(
            request_id = outcome.request_id(),
            "ignoring stale country load outcome"
        );
        return;
    }
    view_data.country_request = None;

    match outcome {
        CountryLoadOutcome::Loaded { countries, .. } => {
            state.dispatch(AppCommand::CountriesLoaded(countries));
        }
        // Already logged by the loader; the picker just shows an empty list.
        CountryLoadOutcome::Failed { .. } => {
            state.dispatch(AppCommand::CountriesUnavailable);
        }
    }
    clamp_picker_cursor(state, view_data);
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        cancel_country_load(runtime, view_data);
        return true;
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::F(1)) {
            view_data.help_visible = false;
        }
        return false;
    }

    if key.code == KeyCode::F(1) {
        view_data.help_visible = true;
        return false;
    }

    if view_data.picker.visible {
        handle_picker_key(state, view_data, internal_tx, key);
        return false;
    }

    match view_data.focus {
        Focus::Form => handle_form_key(state, view_data, internal_tx, key),
        Focus::Records => handle_records_key(state, view_data, internal_tx, key),
    }
    false
}

fn handle_form_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let field = view_data.focused_field();
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('s') if ctrl => submit_form(state, view_data, internal_tx),
        KeyCode::Char('l') if ctrl => {
            view_data.focus = Focus::Records;
            clamp_record_cursor(state, view_data);
        }
        KeyCode::Tab | KeyCode::Down => move_field_cursor(view_data, 1),
        KeyCode::BackTab | KeyCode::Up => move_field_cursor(view_data, -1),
        KeyCode::Esc => {
            dispatch_and_sync(state, view_data, AppCommand::CancelEdit, internal_tx);
        }
        KeyCode::Enter if field == FormField::Country => {
            open_country_picker(state, view_data, String::new());
        }
        KeyCode::Enter => submit_form(state, view_data, internal_tx),
        KeyCode::Backspace if field.is_text_input() => {
            let mut value = state.form.get(field).to_owned();
            if value.pop().is_some() {
                dispatch_and_sync(
                    state,
                    view_data,
                    AppCommand::SetField(field, value),
                    internal_tx,
                );
            }
        }
        KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            if field == FormField::Country {
                open_country_picker(state, view_data, ch.to_string());
            } else if accepts_char(field, ch) {
                let mut value = state.form.get(field).to_owned();
                value.push(ch);
                dispatch_and_sync(
                    state,
                    view_data,
                    AppCommand::SetField(field, value),
                    internal_tx,
                );
            }
        }
        _ => {}
    }
}

/// Mobile only takes phone-number characters; other text fields take any
/// printable character.
fn accepts_char(field: FormField, ch: char) -> bool {
    match field {
        FormField::Mobile => ch.is_ascii_digit() || matches!(ch, '+' | ' ' | '-' | '(' | ')'),
        FormField::Country => false,
        _ => !ch.is_control(),
    }
}

fn move_field_cursor(view_data: &mut ViewData, delta: isize) {
    let len = FormField::ALL.len() as isize;
    let next = (view_data.field_index as isize + delta).rem_euclid(len);
    view_data.field_index = next as usize;
}

fn focus_field(view_data: &mut ViewData, field: FormField) {
    if let Some(index) = FormField::ALL.iter().position(|candidate| *candidate == field) {
        view_data.field_index = index;
    }
}

fn submit_form(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let events = dispatch_and_sync(state, view_data, AppCommand::Submit, internal_tx);
    for event in &events {
        match event {
            AppEvent::ValidationFailed(fields) => {
                if let Some(first) = fields.first() {
                    focus_field(view_data, *first);
                }
            }
            AppEvent::RecordAdded(id) => {
                view_data.field_index = 0;
                if let Some(position) = state.records.position(*id) {
                    view_data.record_cursor = position;
                }
            }
            AppEvent::RecordUpdated(_) => view_data.field_index = 0,
            _ => {}
        }
    }
}

fn handle_records_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if view_data.record_cursor + 1 < state.records.len() {
                view_data.record_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view_data.record_cursor = view_data.record_cursor.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => view_data.record_cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            view_data.record_cursor = state.records.len().saturating_sub(1);
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            let Some(id) = state.records.id_at(view_data.record_cursor) else {
                emit_status(state, view_data, internal_tx, "no record selected");
                return;
            };
            let events = dispatch_and_sync(state, view_data, AppCommand::Edit(id), internal_tx);
            if events
                .iter()
                .any(|event| matches!(event, AppEvent::EditStarted(_)))
            {
                view_data.focus = Focus::Form;
                view_data.field_index = 0;
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            let Some(id) = state.records.id_at(view_data.record_cursor) else {
                emit_status(state, view_data, internal_tx, "no record selected");
                return;
            };
            dispatch_and_sync(state, view_data, AppCommand::Delete(id), internal_tx);
        }
        KeyCode::Esc | KeyCode::Tab => view_data.focus = Focus::Form,
        _ => {}
    }
}

fn open_country_picker(state: &AppState, view_data: &mut ViewData, query: String) {
    let cursor = if query.is_empty() {
        state
            .selected_country
            .as_ref()
            .and_then(|selected| {
                state
                    .countries
                    .options()
                    .iter()
                    .position(|option| option == selected)
            })
            .unwrap_or(0)
    } else {
        0
    };
    view_data.picker = PickerUiState {
        visible: true,
        query,
        cursor,
    };
}

fn handle_picker_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let match_count = filtered_countries(state.countries.options(), &view_data.picker.query).len();

    match key.code {
        KeyCode::Esc => view_data.picker = PickerUiState::default(),
        KeyCode::Up => {
            view_data.picker.cursor = view_data.picker.cursor.saturating_sub(1);
        }
        KeyCode::Down => {
            if view_data.picker.cursor + 1 < match_count {
                view_data.picker.cursor += 1;
            }
        }
        KeyCode::Enter => {
            let choice = filtered_countries(state.countries.options(), &view_data.picker.query)
                .get(view_data.picker.cursor)
                .map(|option| (*option).clone());
            let Some(choice) = choice else {
                emit_status(state, view_data, internal_tx, "no country to select");
                return;
            };
            view_data.picker = PickerUiState::default();
            dispatch_and_sync(
                state,
                view_data,
                AppCommand::SelectCountry(Some(choice)),
                internal_tx,
            );
            move_field_cursor(view_data, 1);
        }
        KeyCode::Delete => {
            view_data.picker = PickerUiState::default();
            dispatch_and_sync(
                state,
                view_data,
                AppCommand::SelectCountry(None),
                internal_tx,
            );
            emit_status(state, view_data, internal_tx, "country cleared");
        }
        KeyCode::Backspace => {
            view_data.picker.query.pop();
            view_data.picker.cursor = 0;
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            view_data.picker.query.push(ch);
            view_data.picker.cursor = 0;
        }
        _ => {}
    }
}

fn filtered_countries<'a>(options: &'a [CountryOption], query: &str) -> Vec<&'a CountryOption> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return options.iter().collect();
    }
    options
        .iter()
        .filter(|option| option.label.to_lowercase().contains(&needle))
        .collect()
}

fn clamp_picker_cursor(state: &AppState, view_data: &mut ViewData) {
    let count = filtered_countries(state.countries.options(), &view_data.picker.query).len();
    view_data.picker.cursor = view_data.picker.cursor.min(count.saturating_sub(1));
}

fn clamp_record_cursor(state: &AppState, view_data: &mut ViewData) {
    view_data.record_cursor = view_data
        .record_cursor
        .min(state.records.len().saturating_sub(1));
}

fn dispatch_and_sync(
    state: &mut AppState,
    view_data: &mut ViewData,
    command: AppCommand,
    internal_tx: &Sender<InternalEvent>,
) -> Vec<AppEvent> {
    let events = state.dispatch(command);
    clamp_record_cursor(state, view_data);
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::StatusUpdated(_)))
    {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(internal_tx, view_data.status_token);
    }
    events
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FORM_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let mut lines: Vec<Line<'_>> = form_rows(state, view_data)
        .into_iter()
        .map(form_row_line)
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        button_row_text(state),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    let form_border = if view_data.focus == Focus::Form {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let form = Paragraph::new(lines).block(
        Block::default()
            .title(form_title(state))
            .borders(Borders::ALL)
            .border_style(form_border),
    );
    frame.render_widget(form, layout[0]);

    render_records(frame, layout[1], state, view_data);

    let status_widget = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[2]);

    if view_data.picker.visible {
        let area = centered_rect(50, 60, frame.area());
        frame.render_widget(Clear, area);
        let picker = Paragraph::new(render_picker_text(state, &view_data.picker))
            .block(Block::default().title("country").borders(Borders::ALL));
        frame.render_widget(picker, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 50, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn form_title(state: &AppState) -> String {
    match state
        .edit_cursor
        .record_id()
        .and_then(|id| state.records.position(id))
    {
        Some(position) => format!("User Information | editing record {}", position + 1),
        None => "User Information".to_owned(),
    }
}

fn form_rows(state: &AppState, view_data: &ViewData) -> Vec<FormRowView> {
    let focused = (view_data.focus == Focus::Form).then(|| view_data.focused_field());
    FormField::ALL
        .into_iter()
        .map(|field| {
            let (value, placeholder) = if field == FormField::Country {
                country_display(state)
            } else {
                (state.form.get(field).to_owned(), false)
            };
            FormRowView {
                field,
                focused: focused == Some(field),
                value,
                placeholder,
                error: state.errors.get(&field).cloned(),
            }
        })
        .collect()
}

fn country_display(state: &AppState) -> (String, bool) {
    if let Some(selected) = &state.selected_country {
        return (selected.label.clone(), false);
    }
    let hint = if !state.form.country.is_empty() {
        format!("(none, was {})", state.form.country)
    } else {
        match &state.countries {
            CountryDirectory::Loading => "(loading countries...)".to_owned(),
            CountryDirectory::Unavailable => "(no countries available)".to_owned(),
            CountryDirectory::Ready(_) => "(enter to pick)".to_owned(),
        }
    };
    (hint, true)
}

fn form_row_line(row: FormRowView) -> Line<'static> {
    let marker = if row.focused { "> " } else { "  " };
    let label_style = if row.focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let value_style = if row.placeholder {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![
        Span::styled(format!("{marker}{:<14}", row.field.label()), label_style),
        Span::styled(row.value, value_style),
    ];
    if row.focused && !row.placeholder && row.field.is_text_input() {
        spans.push(Span::styled("_", Style::default().fg(Color::Cyan)));
    }
    if let Some(error) = row.error {
        spans.push(Span::styled(
            format!("  {error}"),
            Style::default().fg(Color::Red),
        ));
    }
    Line::from(spans)
}

fn button_row_text(state: &AppState) -> String {
    if state.edit_cursor.is_editing() {
        "  [ Update ]  [ Cancel Edit ]".to_owned()
    } else {
        "  [ Submit ]".to_owned()
    }
}

fn records_title(state: &AppState) -> String {
    format!("Records ({})", state.records.len())
}

fn record_heading(position: usize) -> String {
    format!("User Information {}", position + 1)
}

fn record_cells(position: usize, record: &FormRecord) -> [String; 5] {
    [
        record_heading(position),
        record.input.display_name(),
        record.input.email.clone(),
        record.input.country.clone(),
        saved_label(record.updated_at),
    ]
}

fn saved_label(at: OffsetDateTime) -> String {
    at.format(&format_description!(
        "[year]-[month]-[day] [hour]:[minute]"
    ))
    .unwrap_or_default()
}

fn render_records(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let focused = view_data.focus == Focus::Records;
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(records_title(state))
        .borders(Borders::ALL)
        .border_style(border);

    if state.records.is_empty() {
        let empty = Paragraph::new("no records yet; fill the form and press enter").block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(["Record", "Name", "Email", "Country", "Saved"].map(|label| {
        Cell::from(label).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));
    let editing = state.edit_cursor.record_id();
    let rows = state.records.iter().enumerate().map(|(index, record)| {
        let mut style = Style::default();
        if editing == Some(record.id) {
            style = style.fg(Color::Yellow);
        }
        if focused && index == view_data.record_cursor {
            style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
        }
        Row::new(record_cells(index, record).map(Cell::from)).style(style)
    });
    let widths = [
        Constraint::Length(20),
        Constraint::Min(12),
        Constraint::Min(16),
        Constraint::Min(10),
        Constraint::Length(16),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(block);
    frame.render_widget(table, area);
}

fn render_picker_text(state: &AppState, picker: &PickerUiState) -> String {
    let mut lines = vec![format!("search: {}_", picker.query), String::new()];
    match &state.countries {
        CountryDirectory::Loading => lines.push("loading countries...".to_owned()),
        CountryDirectory::Unavailable => lines.push("no countries available".to_owned()),
        CountryDirectory::Ready(options) if options.is_empty() => {
            lines.push("no countries available".to_owned());
        }
        CountryDirectory::Ready(options) => {
            let matches = filtered_countries(options, &picker.query);
            if matches.is_empty() {
                lines.push("no matches".to_owned());
            }
            let offset = picker.cursor.saturating_sub(PICKER_VISIBLE_ROWS - 1);
            for (index, option) in matches
                .iter()
                .enumerate()
                .skip(offset)
                .take(PICKER_VISIBLE_ROWS)
            {
                let marker = if index == picker.cursor { ">" } else { " " };
                let selected = state.selected_country.as_ref() == Some(*option);
                let check = if selected { " *" } else { "" };
                lines.push(format!("{marker} {}{check}", option.label));
            }
        }
    }
    lines.push(String::new());
    lines.push("up/down move | enter pick | del clear | esc close".to_owned());
    lines.join("\n")
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    let (mode, hints) = if view_data.picker.visible {
        ("PICK", "type to filter | enter pick | del clear | esc close")
    } else {
        match view_data.focus {
            Focus::Form if state.edit_cursor.is_editing() => (
                "EDIT",
                "tab/shift+tab field | enter/ctrl+s update | esc cancel edit | ctrl+l records | f1 help | ctrl+q quit",
            ),
            Focus::Form => (
                "FORM",
                "tab/shift+tab field | enter/ctrl+s submit | ctrl+l records | f1 help | ctrl+q quit",
            ),
            Focus::Records => (
                "RECORDS",
                "j/k move | e edit | d delete | esc form | f1 help | ctrl+q quit",
            ),
        }
    };
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {hints}"),
        None => format!("{mode} | {hints}"),
    }
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | f1 help\n\
form: tab/down next field | shift+tab/up previous field | type to edit | backspace delete\n\
form: enter on country opens picker | enter or ctrl+s submit | esc cancel edit | ctrl+l records\n\
records: j/k or up/down move | g/G first/last | e/enter edit | d/del delete | esc/tab form\n\
country picker: type filter | up/down | enter pick | del clear | esc close"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
