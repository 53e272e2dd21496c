//! Post command handlers
//!
//! Each handler drives the sync controller the same way the TUI does:
//! fill the draft, validate it, submit, then print from the store.

use anyhow::{anyhow, bail, Context, Result};

use postsync_core::{Gateway, PostId, Submitted, SyncController};

use crate::editor::{confirm, edit_text, is_interactive};
use crate::form;
use crate::output::Output;

/// Load and print the current list
pub async fn list<G: Gateway>(controller: &mut SyncController<G>, output: &Output) -> Result<()> {
    controller.load().await?;
    output.print_posts(controller.store().posts());
    Ok(())
}

/// Create a new post
pub async fn create<G: Gateway>(
    controller: &mut SyncController<G>,
    title: String,
    body: Option<String>,
    user_id: Option<u64>,
    output: &Output,
) -> Result<()> {
    let body = match body {
        Some(body) => body,
        None => edit_text("").context("Failed to get post body")?,
    };

    controller.open_form();
    let draft = controller.draft_mut();
    draft.set_title(title);
    draft.set_body(body);
    if let Some(user_id) = user_id {
        draft.user_id = user_id;
    }
    form::validate(controller.store().draft()).map_err(|e| anyhow!(e))?;

    let Submitted::Created(id) = controller.submit().await? else {
        bail!("Expected a create, but the draft was in edit mode");
    };

    let created = controller
        .store()
        .get(id)
        .ok_or_else(|| anyhow!("Created post {} missing from store", id))?;
    output.success(&format!("Created post: {}", created.id));
    output.print_post(created);

    Ok(())
}

/// Update a post currently shown in the list
pub async fn update<G: Gateway>(
    controller: &mut SyncController<G>,
    id: PostId,
    title: Option<String>,
    body: Option<String>,
    output: &Output,
) -> Result<()> {
    controller.load().await?;

    if !controller.begin_edit_by_id(id) {
        bail!(
            "Post {} is not among the {} loaded posts. Run `postsync list` to see them.",
            id,
            controller.store().len()
        );
    }

    // Without any field flags, edit the body interactively
    let body = match (&title, body) {
        (None, None) => Some(
            edit_text(&controller.store().draft().body).context("Failed to get post body")?,
        ),
        (_, body) => body,
    };

    let draft = controller.draft_mut();
    if let Some(title) = title {
        draft.set_title(title);
    }
    if let Some(body) = body {
        draft.set_body(body);
    }
    form::validate(controller.store().draft()).map_err(|e| anyhow!(e))?;

    match controller.submit().await? {
        Submitted::Updated(_) => {
            let post = controller
                .store()
                .get(id)
                .ok_or_else(|| anyhow!("Updated post {} missing from store", id))?;
            output.success(&format!("Updated post: {}", id));
            output.print_post(post);
        }
        outcome => output.message(&update_message(id, outcome)),
    }

    Ok(())
}

/// Summary line for a submit that did not refresh the requested post
fn update_message(requested: PostId, outcome: Submitted) -> String {
    match outcome {
        Submitted::Unmatched(echoed) => format!(
            "Post {} was updated remotely, but the server answered with id {}; \
             the local copy was not refreshed",
            requested, echoed
        ),
        Submitted::Updated(id) => format!("Updated post: {}", id),
        Submitted::Created(id) => format!("Created post: {}", id),
    }
}

/// Delete a post
pub async fn delete<G: Gateway>(
    controller: &mut SyncController<G>,
    id: PostId,
    output: &Output,
) -> Result<()> {
    if needs_confirmation(output, is_interactive()) {
        controller.load().await?;
        let title = controller
            .store()
            .get(id)
            .map(|p| p.title.clone())
            .unwrap_or_else(|| "(not in the loaded list)".to_string());
        println!("Delete post: {} - {}", id, title);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    controller.delete(id).await?;
    output.success(&format!("Deleted post: {}", id));

    Ok(())
}

/// Only a human at a terminal is asked before a delete
fn needs_confirmation(output: &Output, interactive: bool) -> bool {
    output.should_prompt() && interactive
}
