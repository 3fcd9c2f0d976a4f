// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::env;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{NoteRemote, NoteStore};
use crate::domain::{DomainError, Note};

/// A call received by `MockNoteRemote`, in arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    List,
    Create(String),
    Update(i64, String),
    Delete(i64),
}

/// Shared mock remote for testing the session without a server
///
/// # Examples
///
/// ```
/// use notesync::util::testing::MockNoteRemote;
///
/// let remote = MockNoteRemote::builder()
///     .with_remote_note(1, "first post")
///     .with_next_id(101)
///     .with_failure_for(7)
///     .build();
/// ```
pub struct MockNoteRemote {
    listing: Vec<Note>,
    list_fails: bool,
    create_fails: bool,
    failing_ids: HashSet<i64>,
    next_id: Cell<i64>,
    fixed_id: bool,
    calls: RefCell<Vec<RemoteCall>>,
}

impl MockNoteRemote {
    pub fn builder() -> MockNoteRemoteBuilder {
        MockNoteRemoteBuilder::new()
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: RemoteCall) {
        self.calls.borrow_mut().push(call);
    }

    fn check_id(&self, id: i64) -> Result<(), DomainError> {
        if self.failing_ids.contains(&id) {
            return Err(DomainError::RemoteCallFailed(format!(
                "mock failure for note {}",
                id
            )));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl NoteRemote for MockNoteRemote {
    async fn list_first_page(&self) -> Result<Vec<Note>, DomainError> {
        self.record(RemoteCall::List);
        if self.list_fails {
            return Err(DomainError::RemoteCallFailed("mock list failure".to_string()));
        }
        Ok(self.listing.clone())
    }

    async fn create(&self, text: &str) -> Result<Note, DomainError> {
        self.record(RemoteCall::Create(text.to_string()));
        if self.create_fails {
            return Err(DomainError::RemoteCallFailed(
                "mock create failure".to_string(),
            ));
        }
        let id = self.next_id.get();
        if !self.fixed_id {
            self.next_id.set(id + 1);
        }
        Ok(Note::new(id, text))
    }

    async fn update(&self, id: i64, text: &str) -> Result<(), DomainError> {
        self.record(RemoteCall::Update(id, text.to_string()));
        self.check_id(id)
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.record(RemoteCall::Delete(id));
        self.check_id(id)
    }
}

/// Builder for MockNoteRemote
pub struct MockNoteRemoteBuilder {
    listing: Vec<Note>,
    list_fails: bool,
    create_fails: bool,
    failing_ids: HashSet<i64>,
    next_id: i64,
    fixed_id: bool,
}

impl MockNoteRemoteBuilder {
    pub fn new() -> Self {
        Self {
            listing: vec![],
            list_fails: false,
            create_fails: false,
            failing_ids: HashSet::new(),
            next_id: 101,
            fixed_id: false,
        }
    }

    /// Add a note to the listed page, after the ones already added
    pub fn with_remote_note(mut self, id: i64, text: &str) -> Self {
        self.listing.push(Note::new(id, text));
        self
    }

    /// Fill the listed page with posts `1..=count` titled `post <id>`
    pub fn with_remote_posts(mut self, count: i64) -> Self {
        for id in 1..=count {
            self.listing.push(Note::new(id, format!("post {}", id)));
        }
        self
    }

    pub fn with_list_failure(mut self) -> Self {
        self.list_fails = true;
        self
    }

    pub fn with_create_failure(mut self) -> Self {
        self.create_fails = true;
        self
    }

    /// Make update and delete fail for `id`
    pub fn with_failure_for(mut self, id: i64) -> Self {
        self.failing_ids.insert(id);
        self
    }

    /// Id handed out by the next successful create
    pub fn with_next_id(mut self, id: i64) -> Self {
        self.next_id = id;
        self
    }

    /// Hand out the same id on every create, like JSONPlaceholder does
    pub fn with_fixed_create_id(mut self, id: i64) -> Self {
        self.next_id = id;
        self.fixed_id = true;
        self
    }

    pub fn build(self) -> MockNoteRemote {
        MockNoteRemote {
            listing: self.listing,
            list_fails: self.list_fails,
            create_fails: self.create_fails,
            failing_ids: self.failing_ids,
            next_id: Cell::new(self.next_id),
            fixed_id: self.fixed_id,
            calls: RefCell::new(vec![]),
        }
    }
}

impl Default for MockNoteRemoteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory note store, optionally failing every save
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    notes: Vec<Note>,
    fail_saves: bool,
    saves: usize,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl NoteStore for MemoryNoteStore {
    fn load(&self) -> Vec<Note> {
        self.notes.clone()
    }

    fn save(&mut self, notes: &[Note]) -> Result<(), DomainError> {
        if self.fail_saves {
            return Err(DomainError::StoreFailed("mock quota exceeded".to_string()));
        }
        self.notes = notes.to_vec();
        self.saves += 1;
        Ok(())
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "mio", "axum"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
