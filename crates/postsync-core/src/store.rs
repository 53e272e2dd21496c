//! Collection store
//!
//! The in-memory list of posts used for rendering, together with the
//! transient state around it: the loading flag, the last error message,
//! the form draft and whether the form is shown.
//!
//! The store is only ever mutated by the sync controller. Its primitives
//! implement the reconciliation rules and do no I/O.

use crate::models::{Draft, Post, PostId};

/// What the presentation layer should render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    /// A load is in progress
    Loading,
    /// The last operation failed; nothing else is rendered
    Error(&'a str),
    /// The current list (may be empty)
    Posts(&'a [Post]),
}

/// In-memory state backing the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostStore {
    posts: Vec<Post>,
    loading: bool,
    error: Option<String>,
    draft: Draft,
    form_open: bool,
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PostStore {
    /// Empty store, loading until the first fetch completes
    pub fn new() -> Self {
        Self {
            posts: Vec::new(),
            loading: true,
            error: None,
            draft: Draft::default(),
            form_open: false,
        }
    }

    // ==================== Queries ====================

    /// Current posts in display order
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Look up a post by id
    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Reason of the last failure, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_editing()
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    /// Exactly one thing to render: loading wins over error, error over the list
    pub fn view(&self) -> View<'_> {
        if self.loading {
            View::Loading
        } else if let Some(ref reason) = self.error {
            View::Error(reason)
        } else {
            View::Posts(&self.posts)
        }
    }

    // ==================== Reconciliation ====================

    /// Replace the whole list with the first `limit` posts, keeping order
    pub fn replace_all(&mut self, mut posts: Vec<Post>, limit: usize) {
        posts.truncate(limit);
        self.posts = posts;
    }

    /// Insert a post at the head of the list
    pub fn prepend(&mut self, post: Post) {
        self.posts.insert(0, post);
    }

    /// Replace the entry whose id matches `post.id`
    ///
    /// Returns false when no entry matches; the list is then unchanged.
    pub fn replace_by_id(&mut self, post: Post) -> bool {
        match self.posts.iter_mut().find(|p| p.id == post.id) {
            Some(slot) => {
                *slot = post;
                true
            }
            None => false,
        }
    }

    /// Remove every entry with this id, returning how many were removed
    pub fn remove_by_id(&mut self, id: PostId) -> usize {
        let before = self.posts.len();
        self.posts.retain(|p| p.id != id);
        before - self.posts.len()
    }

    // ==================== Transient state ====================

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, reason: impl Into<String>) {
        self.error = Some(reason.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Replace the draft and show the form
    pub fn open_form(&mut self, draft: Draft) {
        self.draft = draft;
        self.form_open = true;
    }

    /// Reset the draft to `default` and hide the form
    pub fn reset_form(&mut self, default: Draft) {
        self.draft = default;
        self.form_open = false;
    }
}
