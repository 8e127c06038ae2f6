//! Thread action implementations.
//!
//! All operations go through the authenticated API client, which obtains a
//! valid access token from the session before each request.

use clap::ArgMatches;

use crate::actions::{truncate, unwrap_data, CliActionError};
use crate::commands::params::{
    PARAMETER_CONTENT, PARAMETER_ID, PARAMETER_LIMIT, PARAMETER_OFFSET, PARAMETER_SPACE,
    PARAMETER_TITLE,
};
use crate::context::ExecutionContext;
use crate::model::{Envelope, Thread, ThreadPage};

const CONTENT_PREVIEW_CHARS: usize = 200;

/// List threads in the active (or explicitly given) space.
pub async fn list_threads(
    ctx: &mut ExecutionContext,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let space = ctx.resolve_space_slug(matches.get_one::<String>(PARAMETER_SPACE))?;
    // unwraps on arguments with a default or marked required are safe, clap
    // rejects the command line before this point
    let limit = *matches.get_one::<u32>(PARAMETER_LIMIT).unwrap();
    let offset = *matches.get_one::<u32>(PARAMETER_OFFSET).unwrap();

    let envelope: Envelope<Vec<Thread>> = ctx
        .api
        .get(
            &format!("/spaces/{}/threads", space),
            &[
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ],
        )
        .await?;

    let items = envelope.data.unwrap_or_default();
    if items.is_empty() {
        println!("No threads found.");
        return Ok(());
    }

    let total = envelope
        .pagination
        .and_then(|p| p.total)
        .unwrap_or(items.len() as i64);
    println!("Threads ({} of {}):", items.len(), total);
    for thread in &items {
        println!(
            "- [{}] \"{}\" by {} ({} replies, {})",
            thread.id,
            thread.title.as_deref().unwrap_or("(no title)"),
            thread.author_display(),
            thread.reply_count.unwrap_or(0),
            thread.created_at.as_deref().unwrap_or("?"),
        );
    }
    Ok(())
}

/// Get a thread and one page of its replies.
pub async fn get_thread(
    ctx: &mut ExecutionContext,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let space = ctx.resolve_space_slug(matches.get_one::<String>(PARAMETER_SPACE))?;
    let thread_id = matches.get_one::<String>(PARAMETER_ID).unwrap();
    let limit = *matches.get_one::<u32>(PARAMETER_LIMIT).unwrap();
    let offset = *matches.get_one::<u32>(PARAMETER_OFFSET).unwrap();

    let envelope: Envelope<ThreadPage> = ctx
        .api
        .get(
            &format!("/spaces/{}/threads/{}", space, thread_id),
            &[
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ],
        )
        .await?;

    let pagination = envelope.pagination.clone();
    let page = unwrap_data(envelope.data, "thread")?;
    let thread = unwrap_data(page.thread, "thread")?;

    let total_replies = pagination
        .and_then(|p| p.total)
        .or(thread.reply_count)
        .unwrap_or(0);

    println!("Thread: {}", thread.title.as_deref().unwrap_or("(no title)"));
    println!(
        "By: {} on {}",
        thread.author_display(),
        thread.created_at.as_deref().unwrap_or("?"),
    );
    println!();
    println!("{}", thread.content.as_deref().unwrap_or(""));
    println!();
    println!("Replies ({} of {}):", page.items.len(), total_replies);
    for reply in &page.items {
        println!(
            "  - {}: {} ({})",
            reply.author_display(),
            truncate(&reply.content, CONTENT_PREVIEW_CHARS),
            reply.created_at.as_deref().unwrap_or("?"),
        );
    }
    Ok(())
}

/// Create a thread in a space.
pub async fn create_thread(
    ctx: &mut ExecutionContext,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let space = ctx.resolve_space_slug(matches.get_one::<String>(PARAMETER_SPACE))?;
    let title = matches.get_one::<String>(PARAMETER_TITLE).unwrap();
    let content = matches.get_one::<String>(PARAMETER_CONTENT).unwrap();

    let envelope: Envelope<Thread> = ctx
        .api
        .post(
            &format!("/spaces/{}/threads", space),
            &serde_json::json!({ "title": title, "content": content }),
        )
        .await?;
    let thread = unwrap_data(envelope.data, "thread")?;

    println!("Thread created!");
    println!("  ID: {}", thread.id);
    println!("  Title: {}", thread.title.as_deref().unwrap_or(title));
    println!("  Created: {}", thread.created_at.as_deref().unwrap_or("?"));
    Ok(())
}

/// Edit a thread's title and/or content.
pub async fn edit_thread(
    ctx: &mut ExecutionContext,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let space = ctx.resolve_space_slug(matches.get_one::<String>(PARAMETER_SPACE))?;
    let thread_id = matches.get_one::<String>(PARAMETER_ID).unwrap();
    let title = matches.get_one::<String>(PARAMETER_TITLE);
    let content = matches.get_one::<String>(PARAMETER_CONTENT);

    if title.is_none() && content.is_none() {
        return Err(CliActionError::BusinessLogicError(
            "Provide at least --title or --content to update.".to_string(),
        ));
    }

    let mut body = serde_json::Map::new();
    if let Some(title) = title {
        body.insert("title".to_string(), serde_json::json!(title));
    }
    if let Some(content) = content {
        body.insert("content".to_string(), serde_json::json!(content));
    }

    let envelope: Envelope<Thread> = ctx
        .api
        .patch(&format!("/spaces/{}/threads/{}", space, thread_id), &body)
        .await?;
    let thread = unwrap_data(envelope.data, "thread")?;

    println!("Thread edited!");
    println!("  ID: {}", thread.id);
    println!("  Title: {}", thread.title.as_deref().unwrap_or("(no title)"));
    println!("  Edited: {}", thread.edited_at.as_deref().unwrap_or("?"));
    Ok(())
}

/// Delete a thread.
pub async fn delete_thread(
    ctx: &mut ExecutionContext,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let space = ctx.resolve_space_slug(matches.get_one::<String>(PARAMETER_SPACE))?;
    let thread_id = matches.get_one::<String>(PARAMETER_ID).unwrap();

    ctx.api
        .delete(&format!("/spaces/{}/threads/{}", space, thread_id))
        .await?;
    println!("Thread {} deleted.", thread_id);
    Ok(())
}
