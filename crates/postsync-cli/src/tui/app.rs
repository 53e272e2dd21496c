//! Application state and key handling
//!
//! `App` wraps the sync controller with the bits of state that only the
//! terminal needs: selection, focused form field, pending confirmation and
//! a transient status line. Keys are translated into either immediate
//! state changes or an `Intent` that needs a remote round-trip.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use postsync_core::{Gateway, Post, PostId, Submitted, SyncController, View};

use crate::form;

/// How long a status message stays visible
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Input mode derived from the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigating the list
    Normal,
    /// Typing into the create/edit form
    Form,
    /// Waiting for y/n on a delete
    ConfirmDelete(PostId),
    /// The error view is shown
    Error,
}

/// Form field with keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Body,
}

impl Field {
    pub fn toggle(self) -> Self {
        match self {
            Field::Title => Field::Body,
            Field::Body => Field::Title,
        }
    }
}

/// Work that requires awaiting the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Reload,
    Submit,
    Delete(PostId),
}

/// Application state
pub struct App<G> {
    pub controller: SyncController<G>,
    /// Whether the app should exit
    pub should_quit: bool,
    /// Currently selected post index
    pub selected: usize,
    /// Focused form field
    pub field: Field,
    /// Post awaiting delete confirmation
    pub confirm_delete: Option<PostId>,
    /// Whether help overlay is visible
    pub show_help: bool,
    /// A remote call is in flight
    pub busy: bool,
    /// Status message to display temporarily
    pub status_message: Option<String>,
    status_message_time: Option<Instant>,
}

impl<G: Gateway> App<G> {
    pub fn new(controller: SyncController<G>) -> Self {
        Self {
            controller,
            should_quit: false,
            selected: 0,
            field: Field::Title,
            confirm_delete: None,
            show_help: false,
            busy: false,
            status_message: None,
            status_message_time: None,
        }
    }

    /// Current input mode
    pub fn input_mode(&self) -> InputMode {
        if let View::Error(_) = self.controller.store().view() {
            return InputMode::Error;
        }
        if let Some(id) = self.confirm_delete {
            return InputMode::ConfirmDelete(id);
        }
        if self.controller.store().is_form_open() {
            InputMode::Form
        } else {
            InputMode::Normal
        }
    }

    /// Get the currently selected post
    pub fn selected_post(&self) -> Option<&Post> {
        self.controller.store().posts().get(self.selected)
    }

    /// Set a status message (auto-dismissed after a few seconds)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Check and clear expired status message
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() > STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.controller.store().len() {
            self.selected += 1;
        }
    }

    /// Keep the selection inside the list after it changes
    fn clamp_selection(&mut self) {
        let len = self.controller.store().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Translate a key press; returns an intent when remote work is needed
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Intent> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        if self.show_help {
            self.show_help = false;
            return None;
        }

        match self.input_mode() {
            InputMode::Error => self.handle_error_key(key.code),
            InputMode::ConfirmDelete(id) => self.handle_confirm_key(key.code, id),
            InputMode::Form => self.handle_form_key(key.code),
            InputMode::Normal => self.handle_normal_key(key.code),
        }
    }

    fn handle_error_key(&mut self, code: KeyCode) -> Option<Intent> {
        match code {
            KeyCode::Char('r') => Some(Intent::Reload),
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            _ => {
                // Any other key dismisses the error
                self.controller.dismiss_error();
                None
            }
        }
    }

    fn handle_confirm_key(&mut self, code: KeyCode, id: PostId) -> Option<Intent> {
        self.confirm_delete = None;
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Intent::Delete(id)),
            _ => {
                self.set_status("Delete cancelled");
                None
            }
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> Option<Intent> {
        self.status_message = None;

        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('g') | KeyCode::Home => self.selected = 0,
            KeyCode::Char('G') | KeyCode::End => {
                self.selected = self.controller.store().len().saturating_sub(1);
            }
            KeyCode::Char('n') | KeyCode::Char('a') => {
                self.controller.open_form();
                self.field = Field::Title;
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(post) = self.selected_post().cloned() {
                    self.controller.begin_edit(&post);
                    self.field = Field::Title;
                }
            }
            KeyCode::Char('d') => {
                if let Some(post) = self.selected_post() {
                    self.confirm_delete = Some(post.id);
                }
            }
            KeyCode::Char('r') => return Some(Intent::Reload),
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }

        None
    }

    fn handle_form_key(&mut self, code: KeyCode) -> Option<Intent> {
        match code {
            KeyCode::Esc => {
                self.controller.cancel_edit();
                self.set_status("Edit cancelled");
            }
            KeyCode::Tab | KeyCode::BackTab => self.field = self.field.toggle(),
            KeyCode::Enter => match form::validate(self.controller.store().draft()) {
                Ok(()) => return Some(Intent::Submit),
                Err(reason) => self.set_status(reason),
            },
            KeyCode::Backspace => {
                self.focused_text().pop();
            }
            KeyCode::Char(c) => self.focused_text().push(c),
            _ => {}
        }

        None
    }

    fn focused_text(&mut self) -> &mut String {
        let draft = self.controller.draft_mut();
        match self.field {
            Field::Title => &mut draft.title,
            Field::Body => &mut draft.body,
        }
    }

    /// Run an intent against the remote and report the outcome
    pub async fn perform(&mut self, intent: Intent) {
        match intent {
            Intent::Reload => {
                if self.controller.load().await.is_ok() {
                    self.set_status(format!("Loaded {} posts", self.controller.store().len()));
                }
            }
            Intent::Submit => match self.controller.submit().await {
                Ok(Submitted::Created(_)) => {
                    self.selected = 0;
                    self.set_status("Post created");
                }
                Ok(Submitted::Updated(_)) => self.set_status("Post updated"),
                Ok(Submitted::Unmatched(id)) => {
                    self.set_status(format!("Post updated remotely as id {}; list not refreshed", id))
                }
                Err(_) => {}
            },
            Intent::Delete(id) => {
                if self.controller.delete(id).await.is_ok() {
                    self.set_status("Post deleted");
                }
            }
        }
        self.clamp_selection();
    }
}
