//! Data models for postsync
//!
//! Defines the post record as it travels over the wire, the create payload,
//! and the draft that backs the create/edit form.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Identifier of a post
pub type PostId = u64;

/// User id given to fresh drafts
pub const DEFAULT_USER_ID: u64 = 1;

/// A post as held in the collection store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Server-assigned id, or a client id for posts created in this session
    pub id: PostId,
    /// Post title
    pub title: String,
    /// Post body
    pub body: String,
    /// Owning user
    pub user_id: u64,
}

/// Payload for creating a post (the server assigns the id)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

/// What a submitted draft does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    /// Submitting creates a new post
    #[default]
    Create,
    /// Submitting replaces the post with this id
    Edit(PostId),
}

/// Form-backing record for create and edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub mode: FormMode,
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            body: String::new(),
            user_id: DEFAULT_USER_ID,
        }
    }
}

impl Draft {
    /// Create an empty draft for a specific user
    pub fn for_user(user_id: u64) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }

    /// Draft that edits an existing post
    pub fn from_post(post: &Post) -> Self {
        Self {
            mode: FormMode::Edit(post.id),
            title: post.title.clone(),
            body: post.body.clone(),
            user_id: post.user_id,
        }
    }

    /// Whether submitting this draft updates an existing post
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    /// Update the title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Update the body
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Create payload built from the draft fields
    pub fn to_new_post(&self) -> NewPost {
        NewPost {
            title: self.title.clone(),
            body: self.body.clone(),
            user_id: self.user_id,
        }
    }

    /// Full record for an update, if this draft is editing
    pub fn to_post(&self) -> Option<Post> {
        match self.mode {
            FormMode::Edit(id) => Some(Post {
                id,
                title: self.title.clone(),
                body: self.body.clone(),
                user_id: self.user_id,
            }),
            FormMode::Create => None,
        }
    }
}

/// Last client id handed out in this process
static LAST_CLIENT_ID: AtomicU64 = AtomicU64::new(0);

/// Generate an id for a post created in this session
///
/// The id is the current Unix time in milliseconds, bumped when needed so
/// it is strictly greater than every id previously returned in this
/// process. It may collide with a genuine server id.
pub fn next_client_id() -> PostId {
    let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    let previous = LAST_CLIENT_ID
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or_else(|last| last);
    now.max(previous + 1)
}
