//! Test doubles and harnesses shared by unit and acceptance tests.
//!
//! - [`ScriptedSource`]: in-memory `MemberSource` with call recording, scripted
//!   failures and an optional gate that holds fetches in flight
//! - [`AppHarness`]: wraps `TuiApp<TestBackend>` for key-driven acceptance tests

use crate::config::keybindings::KeyBindings;
use crate::model::{FetchError, MemberRecord, PageNumber};
use crate::source::MemberSource;
use crate::state::{AppState, DirectoryConfig, PaginationSettings, Screen};
use crate::view::{TuiApp, TuiError};
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::Semaphore;

/// Build a member with predictable fields derived from `id`.
pub fn member(id: u64) -> MemberRecord {
    MemberRecord::new(
        id,
        format!("Member {id}"),
        format!("member{id}"),
        format!("member{id}@example.com"),
        format!("555-01{id:02}"),
        format!("member{id}.example.com"),
        "Example Co",
        "Springfield",
    )
}

/// In-memory member source.
///
/// Serves `total` members split into pages. Individual pages can be scripted to
/// return specific results (consumed in order, then falling back to the default).
pub struct ScriptedSource {
    total: u64,
    scripted: Mutex<HashMap<u32, VecDeque<Result<Vec<MemberRecord>, FetchError>>>>,
    calls: Mutex<Vec<PageNumber>>,
    outstanding: AtomicUsize,
    max_outstanding: AtomicUsize,
    gate: Option<Semaphore>,
}

impl ScriptedSource {
    /// Source serving `total` members.
    pub fn with_members(total: u64) -> Self {
        Self {
            total,
            scripted: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            outstanding: AtomicUsize::new(0),
            max_outstanding: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Hold every fetch until [`ScriptedSource::release`] is called.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Semaphore::new(0));
        self
    }

    /// Script the next response for `page`.
    pub fn script(self, page: u32, result: Result<Vec<MemberRecord>, FetchError>) -> Self {
        self.scripted
            .lock()
            .unwrap()
            .entry(page)
            .or_default()
            .push_back(result);
        self
    }

    /// Let `n` held fetches proceed.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    /// Pages requested so far, in call order.
    pub fn calls(&self) -> Vec<PageNumber> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Highest number of simultaneously outstanding calls observed.
    pub fn max_outstanding(&self) -> usize {
        self.max_outstanding.load(Ordering::SeqCst)
    }

    fn default_page(&self, page: PageNumber, page_size: usize) -> Vec<MemberRecord> {
        let size = page_size as u64;
        let start = u64::from(page.get() - 1) * size + 1;
        let end = (start + size).min(self.total + 1);
        (start..end).map(member).collect()
    }
}

#[async_trait]
impl MemberSource for ScriptedSource {
    async fn fetch_page(
        &self,
        page: PageNumber,
        page_size: usize,
    ) -> Result<Vec<MemberRecord>, FetchError> {
        self.calls.lock().unwrap().push(page);
        let now = self.outstanding.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_outstanding.fetch_max(now, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        let scripted = self
            .scripted
            .lock()
            .unwrap()
            .get_mut(&page.get())
            .and_then(VecDeque::pop_front);
        let result = scripted.unwrap_or_else(|| Ok(self.default_page(page, page_size)));

        self.outstanding.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Settings with no artificial delay, for tests that don't pause time.
pub fn instant_settings() -> PaginationSettings {
    PaginationSettings {
        page_size: 10,
        fetch_delay: Duration::ZERO,
    }
}

/// Convert a ratatui buffer to a string, trimming trailing blanks per line.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }

    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines.join("\n")
}

/// Acceptance harness driving a `TuiApp` on a `TestBackend`.
///
/// Must be created inside a tokio runtime: fetches are spawned on the current handle.
pub struct AppHarness {
    app: TuiApp<TestBackend>,
    source: Arc<ScriptedSource>,
}

impl AppHarness {
    /// Harness on an 80x24 terminal showing the login form.
    pub fn new(source: ScriptedSource) -> Self {
        Self::with_size(source, 80, 24)
    }

    /// Harness with a custom terminal size.
    pub fn with_size(source: ScriptedSource, width: u16, height: u16) -> Self {
        let source = Arc::new(source);
        let directory = DirectoryConfig {
            source: Arc::clone(&source) as Arc<dyn MemberSource>,
            settings: instant_settings(),
            scroll_threshold: 8,
            runtime: Handle::current(),
        };
        let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let app = TuiApp::new_for_test(terminal, AppState::new(directory), KeyBindings::default());
        Self { app, source }
    }

    /// The scripted source behind the directory.
    pub fn source(&self) -> &ScriptedSource {
        &self.source
    }

    /// Application state.
    pub fn state(&self) -> &AppState {
        self.app.state()
    }

    /// Send a key without modifiers. Returns true if the app quit.
    pub fn send_key(&mut self, code: KeyCode) -> bool {
        self.send_key_with_mods(code, KeyModifiers::NONE)
    }

    /// Send a key with modifiers. Returns true if the app quit.
    pub fn send_key_with_mods(&mut self, code: KeyCode, mods: KeyModifiers) -> bool {
        self.app.handle_key_test(KeyEvent::new(code, mods))
    }

    /// Type each character of `text`.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            let mods = if ch.is_ascii_uppercase() {
                KeyModifiers::SHIFT
            } else {
                KeyModifiers::NONE
            };
            self.send_key_with_mods(KeyCode::Char(ch), mods);
        }
    }

    /// Fill the login form with the demo credentials and submit.
    pub fn log_in(&mut self) {
        self.type_text(crate::state::auth::DEMO_EMAIL);
        self.send_key(KeyCode::Tab);
        self.type_text(crate::state::auth::DEMO_PASSWORD);
        self.send_key(KeyCode::Tab);
        self.type_text(crate::state::auth::DEMO_COMPANY);
        self.send_key(KeyCode::Enter);
    }

    /// Scroll the mouse wheel down once.
    pub fn wheel_down(&mut self) {
        self.app.handle_mouse_test(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
    }

    /// Wait for the directory's next fetch completion and apply it.
    pub async fn settle(&mut self) {
        if let Screen::Directory(session) = &mut self.app.state_mut().screen {
            session.controller_mut().next_completion().await;
        }
    }

    /// Run one event loop tick without input. Returns true if results were applied.
    pub fn tick(&mut self) -> bool {
        self.app.tick_test()
    }

    /// Render one frame and return it as text.
    pub fn render(&mut self) -> Result<String, TuiError> {
        self.app.render_test()?;
        Ok(buffer_to_string(self.app.terminal().backend().buffer()))
    }
}
