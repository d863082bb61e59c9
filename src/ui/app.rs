//! Main TUI application state and logic

use crate::config::{Settings, STEP_DELAY_RANGE_MS, VALUE_COUNT_RANGE};
use crate::engine::{Algorithm, RunController, RunOutcome, RunReport};
use crate::structures::{LinkedList, Queue, Stack};
use crate::ui::panes::{
    render_list_pane, render_queue_pane, render_sorting_pane, render_stack_pane,
    render_status_bar, ListRenderData, QueueRenderData, SortingRenderData, StackRenderData,
    StatusRenderData,
};
use crate::ui::theme::DEFAULT_THEME;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::Tabs,
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How long a popped stack element stays highlighted before it is removed
const POP_HIGHLIGHT: Duration = Duration::from_millis(500);

/// Event poll timeout; roughly one frame at 60 fps
const FRAME_POLL: Duration = Duration::from_millis(16);

/// Step delay change per +/- press, in milliseconds
const DELAY_STEP_MS: u64 = 10;

/// Which view is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    LinkedList,
    Sorting,
    Stack,
    Queue,
}

impl View {
    pub const ALL: [View; 4] = [View::LinkedList, View::Sorting, View::Stack, View::Queue];

    /// Move to the next view, wrapping around
    pub fn next(self) -> Self {
        match self {
            View::LinkedList => View::Sorting,
            View::Sorting => View::Stack,
            View::Stack => View::Queue,
            View::Queue => View::LinkedList,
        }
    }

    /// Move to the previous view, wrapping around
    pub fn prev(self) -> Self {
        match self {
            View::LinkedList => View::Queue,
            View::Sorting => View::LinkedList,
            View::Stack => View::Sorting,
            View::Queue => View::Stack,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::LinkedList => "Linked List",
            View::Sorting => "Sorting",
            View::Stack => "Stack",
            View::Queue => "Queue",
        }
    }

    fn index(self) -> usize {
        match self {
            View::LinkedList => 0,
            View::Sorting => 1,
            View::Stack => 2,
            View::Queue => 3,
        }
    }
}

/// Field currently receiving typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    Count,
    Custom,
    NodeValue,
    NodePosition,
    StackValue,
    QueueValue,
}

impl InputTarget {
    fn accepts(self, c: char) -> bool {
        match self {
            InputTarget::Count | InputTarget::NodePosition => c.is_ascii_digit(),
            InputTarget::Custom => c.is_ascii_digit() || c == '-' || c == ' ',
            InputTarget::NodeValue | InputTarget::StackValue | InputTarget::QueueValue => {
                c.is_ascii_digit() || c == '-'
            }
        }
    }
}

/// In-progress text for the field being edited
#[derive(Debug, Clone)]
struct InputState {
    target: InputTarget,
    text: String,
}

/// The main application state
pub struct App {
    /// Owner of the sort buffer and its worker
    pub controller: RunController,

    /// Algorithm shown in the selector
    pub algorithm: Algorithm,

    /// How many values `g` generates
    pub value_count: usize,

    pub list: LinkedList,
    pub stack: Stack,
    pub queue: Queue,

    // Committed field values
    pub node_value: i32,
    pub node_position: usize,
    pub stack_value: i32,
    pub queue_value: i32,
    pub custom_text: String,

    /// Currently selected view
    pub view: View,

    input: Option<InputState>,

    /// When the top of the stack started its pop highlight
    pending_pop: Option<Instant>,

    /// Status message to display
    pub status_message: String,

    /// Whether the status message reports a failure
    pub status_is_error: bool,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    /// Create a new app around a controller already holding the initial data
    pub fn new(controller: RunController, settings: &Settings) -> Self {
        App {
            controller,
            algorithm: settings.algorithm,
            value_count: settings.value_count,
            list: LinkedList::new(),
            stack: Stack::new(),
            queue: Queue::new(),
            node_value: 0,
            node_position: 0,
            stack_value: 0,
            queue_value: 0,
            custom_text: String::new(),
            view: View::Sorting,
            input: None,
            pending_pop: None,
            status_message: String::from("Ready!"),
            status_is_error: false,
            should_quit: false,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.tick(Instant::now());
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(FRAME_POLL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        // Join the worker before the terminal is restored
        if let Some(report) = self.controller.request_stop() {
            info!(%report, "run stopped on exit");
        }
        Ok(())
    }

    /// Per-frame housekeeping: reclaim a finished run and expire the pop highlight
    fn tick(&mut self, now: Instant) {
        if let Some(report) = self.controller.reap() {
            self.show_report(&report);
        }
        if self
            .pending_pop
            .is_some_and(|started| now.duration_since(started) >= POP_HIGHLIGHT)
        {
            self.finish_pop();
        }
    }

    fn set_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = false;
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = true;
    }

    fn show_report(&mut self, report: &RunReport) {
        if matches!(report.outcome, RunOutcome::Faulted(_)) {
            self.set_error(report.to_string());
        } else {
            self.set_message(report.to_string());
        }
    }

    fn editing(&self, target: InputTarget) -> Option<&str> {
        self.input
            .as_ref()
            .filter(|input| input.target == target)
            .map(|input| input.text.as_str())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let tabs = Tabs::new(View::ALL.iter().map(|v| format!(" {} ", v.title())))
            .select(self.view.index())
            .style(Style::default().fg(DEFAULT_THEME.comment))
            .highlight_style(
                Style::default()
                    .fg(DEFAULT_THEME.border_focused)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, chunks[0]);

        self.render_body(frame, chunks[1]);

        let snapshot = self.controller.current_snapshot();
        render_status_bar(
            frame,
            chunks[2],
            StatusRenderData {
                view_title: self.view.title(),
                message: &self.status_message,
                is_error: self.status_is_error,
                run_status: snapshot.status,
                is_input: self.input.is_some(),
            },
        );
    }

    fn render_body(&self, frame: &mut Frame, area: Rect) {
        match self.view {
            View::Sorting => {
                // One snapshot per frame
                let snapshot = self.controller.current_snapshot();
                render_sorting_pane(
                    frame,
                    area,
                    SortingRenderData {
                        snapshot: &snapshot,
                        algorithm: self.algorithm,
                        step_delay: self.controller.step_delay(),
                        value_count: self.value_count,
                        custom_text: &self.custom_text,
                        editing_count: self.editing(InputTarget::Count),
                        editing_custom: self.editing(InputTarget::Custom),
                    },
                );
            }
            View::LinkedList => render_list_pane(
                frame,
                area,
                ListRenderData {
                    list: &self.list,
                    value: self.node_value,
                    position: self.node_position,
                    editing_value: self.editing(InputTarget::NodeValue),
                    editing_position: self.editing(InputTarget::NodePosition),
                },
            ),
            View::Stack => render_stack_pane(
                frame,
                area,
                StackRenderData {
                    stack: &self.stack,
                    value: self.stack_value,
                    editing_value: self.editing(InputTarget::StackValue),
                    is_popping: self.pending_pop.is_some(),
                },
            ),
            View::Queue => render_queue_pane(
                frame,
                area,
                QueueRenderData {
                    queue: &self.queue,
                    value: self.queue_value,
                    editing_value: self.editing(InputTarget::QueueValue),
                },
            ),
        }
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        if self.input.is_some() {
            self.handle_input_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => self.view = self.view.next(),
            KeyCode::BackTab => self.view = self.view.prev(),
            KeyCode::F(n @ 1..=4) => self.view = View::ALL[usize::from(n - 1)],
            _ => match self.view {
                View::Sorting => self.handle_sorting_key(key),
                View::LinkedList => self.handle_list_key(key),
                View::Stack => self.handle_stack_key(key),
                View::Queue => self.handle_queue_key(key),
            },
        }
    }

    fn begin_input(&mut self, target: InputTarget) {
        self.input = Some(InputState {
            target,
            text: String::new(),
        });
        self.set_message("Type a value, Enter to confirm, Esc to cancel");
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        let Some(input) = self.input.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) if input.target.accepts(c) => input.text.push(c),
            KeyCode::Backspace => {
                input.text.pop();
            }
            KeyCode::Esc => {
                self.input = None;
                self.set_message("Edit cancelled");
            }
            KeyCode::Enter => {
                if let Some(input) = self.input.take() {
                    self.commit_input(input);
                }
            }
            _ => {}
        }
    }

    fn commit_input(&mut self, input: InputState) {
        let text = input.text.trim();
        match input.target {
            InputTarget::Custom => match self.controller.set_custom(text) {
                Ok(()) => {
                    self.custom_text = text.to_string();
                    let len = self.controller.values().len();
                    self.set_message(format!("Loaded {} custom values", len));
                }
                Err(err) => self.set_error(err.to_string()),
            },
            InputTarget::Count => match text.parse::<usize>() {
                Ok(count) if !(VALUE_COUNT_RANGE.0..=VALUE_COUNT_RANGE.1).contains(&count) => {
                    self.set_error(format!(
                        "count must be between {} and {}",
                        VALUE_COUNT_RANGE.0, VALUE_COUNT_RANGE.1
                    ))
                }
                Ok(count) => {
                    self.value_count = count;
                    self.set_message(format!("Generate will produce {} values", count));
                }
                Err(_) => self.set_error(format!("'{}' is not a valid count", text)),
            },
            InputTarget::NodePosition => match text.parse::<usize>() {
                Ok(position) => {
                    self.node_position = position;
                    self.set_message(format!("Position set to {}", position));
                }
                Err(_) => self.set_error(format!("'{}' is not a valid position", text)),
            },
            target => match text.parse::<i32>() {
                Ok(value) => {
                    match target {
                        InputTarget::NodeValue => self.node_value = value,
                        InputTarget::StackValue => self.stack_value = value,
                        _ => self.queue_value = value,
                    }
                    self.set_message(format!("Value set to {}", value));
                }
                Err(_) => self.set_error(format!("'{}' is not a valid integer", text)),
            },
        }
    }

    fn handle_sorting_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => self.algorithm = self.algorithm.prev(),
            KeyCode::Right => self.algorithm = self.algorithm.next(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_delay(true),
            KeyCode::Char('-') => self.adjust_delay(false),
            KeyCode::Char('n') => self.begin_input(InputTarget::Count),
            KeyCode::Char('c') => self.begin_input(InputTarget::Custom),
            KeyCode::Char('g') => match self.controller.generate_random(self.value_count) {
                Ok(()) => self.set_message(format!("Generated {} values", self.value_count)),
                Err(err) => self.set_error(err.to_string()),
            },
            KeyCode::Char('s') => match self.controller.shuffle() {
                Ok(()) => self.set_message("Shuffled"),
                Err(err) => self.set_error(err.to_string()),
            },
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_run(),
            _ => {}
        }
    }

    fn adjust_delay(&mut self, slower: bool) {
        let (min, max) = STEP_DELAY_RANGE_MS;
        let current = self.controller.step_delay().as_millis() as u64;
        let next = if slower {
            current.saturating_add(DELAY_STEP_MS)
        } else {
            current.saturating_sub(DELAY_STEP_MS)
        }
        .clamp(min, max);
        self.controller.set_step_delay(Duration::from_millis(next));
        self.set_message(format!("Step delay {} ms", next));
    }

    fn toggle_run(&mut self) {
        if let Some(report) = self.controller.reap() {
            self.show_report(&report);
        }

        if self.controller.is_idle() {
            match self.controller.start_in_place(self.algorithm) {
                Ok(()) => self.set_message(format!("Running {}", self.algorithm)),
                Err(err) => self.set_error(err.to_string()),
            }
        } else if let Some(report) = self.controller.request_stop() {
            self.show_report(&report);
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('v') => self.begin_input(InputTarget::NodeValue),
            KeyCode::Char('p') => self.begin_input(InputTarget::NodePosition),
            KeyCode::Char('b') => {
                self.list.insert_at_beginning(self.node_value);
                self.set_message(format!("Inserted {} at the beginning", self.node_value));
            }
            KeyCode::Char('e') => {
                self.list.insert_at_end(self.node_value);
                self.set_message(format!("Inserted {} at the end", self.node_value));
            }
            KeyCode::Char('i') => {
                match self
                    .list
                    .insert_at_position(self.node_value, self.node_position)
                {
                    Ok(()) => self.set_message(format!(
                        "Inserted {} at position {}",
                        self.node_value, self.node_position
                    )),
                    Err(err) => self.set_error(err.to_string()),
                }
            }
            KeyCode::Char('d') => match self.list.delete_at_position(self.node_position) {
                Ok(value) => self.set_message(format!(
                    "Deleted {} from position {}",
                    value, self.node_position
                )),
                Err(err) => self.set_error(err.to_string()),
            },
            _ => {}
        }
    }

    fn handle_stack_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('v') => self.begin_input(InputTarget::StackValue),
            KeyCode::Char('p') => {
                self.finish_pop();
                self.stack.push(self.stack_value);
                self.set_message(format!("Pushed {}", self.stack_value));
            }
            KeyCode::Char('o') => {
                // A second pop while one is highlighted completes the first
                self.finish_pop();
                match self.stack.peek() {
                    Some(top) => {
                        self.pending_pop = Some(Instant::now());
                        self.set_message(format!("Popping {}", top));
                    }
                    None => self.set_error("stack is empty"),
                }
            }
            _ => {}
        }
    }

    /// Remove the highlighted top element, if a pop is pending
    fn finish_pop(&mut self) {
        if self.pending_pop.take().is_some() {
            if let Some(value) = self.stack.pop() {
                debug!(value, "stack pop completed");
                self.set_message(format!("Popped {}", value));
            }
        }
    }

    fn handle_queue_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('v') => self.begin_input(InputTarget::QueueValue),
            KeyCode::Char('e') => {
                self.queue.enqueue(self.queue_value);
                self.set_message(format!("Enqueued {}", self.queue_value));
            }
            KeyCode::Char('d') => match self.queue.dequeue() {
                Some(value) => self.set_message(format!("Dequeued {}", value)),
                None => self.set_error("queue is empty"),
            },
            _ => {}
        }
    }
}
