//! Sync controller
//!
//! The `SyncController` owns the collection store and a gateway. It turns
//! user intents (load, submit, edit, cancel, delete) into gateway calls and
//! reconciles their results into the store.
//!
//! ## Reconciliation rules
//!
//! - **Load**: replace the list with the first `list_limit` fetched posts
//! - **Create**: prepend the echoed post under a fresh client id
//! - **Update**: replace the entry with the same id as the echoed post
//! - **Delete**: remove every entry with the deleted id
//!
//! A failed call stores its reason in the store's error and leaves the list
//! untouched. Nothing is applied optimistically.
//!
//! ## Usage
//!
//! ```ignore
//! let mut controller = SyncController::new(HttpGateway::new(url));
//! controller.load().await?;
//!
//! controller.open_form();
//! controller.draft_mut().set_title("Hello");
//! controller.draft_mut().set_body("World");
//! controller.submit().await?;
//! ```

use tracing::{info, warn};

use crate::config::{Config, DEFAULT_LIST_LIMIT};
use crate::error::RemoteResult;
use crate::gateway::Gateway;
use crate::models::{next_client_id, Draft, Post, PostId, DEFAULT_USER_ID};
use crate::store::PostStore;

/// What a successful submit did to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    /// Prepended under this client id
    Created(PostId),
    /// Replaced the stored post with this id
    Updated(PostId),
    /// The echoed id matched no stored post, so nothing was replaced
    Unmatched(PostId),
}

/// Orchestrates gateway calls and keeps the store in step with them
pub struct SyncController<G> {
    gateway: G,
    store: PostStore,
    list_limit: usize,
    default_user_id: u64,
}

impl<G: Gateway> SyncController<G> {
    /// Create a controller with default limits and an empty, loading store
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            store: PostStore::new(),
            list_limit: DEFAULT_LIST_LIMIT,
            default_user_id: DEFAULT_USER_ID,
        }
    }

    /// Create a controller using the limits from configuration
    pub fn from_config(gateway: G, config: &Config) -> Self {
        Self::new(gateway)
            .with_list_limit(config.list_limit)
            .with_default_user_id(config.default_user_id)
    }

    /// Set how many fetched posts are kept
    pub fn with_list_limit(mut self, limit: usize) -> Self {
        self.list_limit = limit;
        self
    }

    /// Set the user id given to fresh drafts
    pub fn with_default_user_id(mut self, user_id: u64) -> Self {
        self.default_user_id = user_id;
        self.store.reset_form(self.empty_draft());
        self
    }

    /// Current state
    pub fn store(&self) -> &PostStore {
        &self.store
    }

    /// The gateway in use
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    // ==================== Load ====================

    /// Fetch the remote list and replace the store's contents with its prefix
    pub async fn load(&mut self) -> RemoteResult<()> {
        self.store.set_loading(true);
        let result = self.gateway.fetch_list().await;
        self.store.set_loading(false);

        match result {
            Ok(posts) => {
                let fetched = posts.len();
                self.store.replace_all(posts, self.list_limit);
                self.store.clear_error();
                info!("Loaded {} of {} posts", self.store.len(), fetched);
                Ok(())
            }
            Err(e) => {
                warn!("Load failed: {}", e);
                self.store.set_error(e.reason());
                Err(e)
            }
        }
    }

    // ==================== Form ====================

    /// Show the form with a fresh create draft
    pub fn open_form(&mut self) {
        self.store.open_form(self.empty_draft());
    }

    /// Copy a post into the draft and switch to editing it
    pub fn begin_edit(&mut self, post: &Post) {
        self.store.open_form(Draft::from_post(post));
    }

    /// Start editing the stored post with this id
    ///
    /// Returns false if the store holds no such post.
    pub fn begin_edit_by_id(&mut self, id: PostId) -> bool {
        match self.store.get(id).cloned() {
            Some(post) => {
                self.begin_edit(&post);
                true
            }
            None => false,
        }
    }

    /// Mutable access to the draft for field edits
    pub fn draft_mut(&mut self) -> &mut Draft {
        self.store.draft_mut()
    }

    /// Discard the draft and leave edit mode
    pub fn cancel_edit(&mut self) {
        self.store.reset_form(self.empty_draft());
    }

    /// Clear the stored error so the list can be shown again
    pub fn dismiss_error(&mut self) {
        self.store.clear_error();
    }

    /// Submit the draft: create when not editing, update otherwise
    pub async fn submit(&mut self) -> RemoteResult<Submitted> {
        match self.store.draft().to_post() {
            Some(post) => self.update(post).await,
            None => self.create().await,
        }
    }

    async fn create(&mut self) -> RemoteResult<Submitted> {
        let new_post = self.store.draft().to_new_post();

        match self.gateway.create(&new_post).await {
            Ok(mut post) => {
                let server_id = post.id;
                post.id = next_client_id();
                let client_id = post.id;
                info!("Created post (server id {}, client id {})", server_id, client_id);
                self.store.prepend(post);
                self.store.reset_form(self.empty_draft());
                Ok(Submitted::Created(client_id))
            }
            Err(e) => {
                warn!("Create failed: {}", e);
                self.store.set_error(e.reason());
                Err(e)
            }
        }
    }

    async fn update(&mut self, post: Post) -> RemoteResult<Submitted> {
        match self.gateway.update(&post).await {
            Ok(updated) => {
                let id = updated.id;
                let outcome = if self.store.replace_by_id(updated) {
                    info!("Updated post {}", id);
                    Submitted::Updated(id)
                } else {
                    warn!("Updated post {} matches no stored post; dropped from view", id);
                    Submitted::Unmatched(id)
                };
                self.store.reset_form(self.empty_draft());
                Ok(outcome)
            }
            Err(e) => {
                warn!("Update of post {} failed: {}", post.id, e);
                self.store.set_error(e.reason());
                Err(e)
            }
        }
    }

    // ==================== Delete ====================

    /// Delete a post remotely, then drop it from the store
    pub async fn delete(&mut self, id: PostId) -> RemoteResult<()> {
        match self.gateway.delete_one(id).await {
            Ok(()) => {
                let removed = self.store.remove_by_id(id);
                info!("Deleted post {} ({} removed from view)", id, removed);
                Ok(())
            }
            Err(e) => {
                warn!("Delete of post {} failed: {}", id, e);
                self.store.set_error(e.reason());
                Err(e)
            }
        }
    }

    fn empty_draft(&self) -> Draft {
        Draft::for_user(self.default_user_id)
    }
}
