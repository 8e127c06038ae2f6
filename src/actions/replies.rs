//! Reply action implementations.

use clap::ArgMatches;

use crate::actions::{unwrap_data, CliActionError};
use crate::commands::params::{
    PARAMETER_CONTENT, PARAMETER_ID, PARAMETER_SPACE, PARAMETER_THREAD_ID,
};
use crate::context::ExecutionContext;
use crate::model::{Envelope, Reply};

/// Create a reply to a thread.
pub async fn create_reply(
    ctx: &mut ExecutionContext,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let space = ctx.resolve_space_slug(matches.get_one::<String>(PARAMETER_SPACE))?;
    let thread_id = matches.get_one::<String>(PARAMETER_THREAD_ID).unwrap();
    let content = matches.get_one::<String>(PARAMETER_CONTENT).unwrap();

    let envelope: Envelope<Reply> = ctx
        .api
        .post(
            &format!("/spaces/{}/threads/{}/replies", space, thread_id),
            &serde_json::json!({ "content": content }),
        )
        .await?;
    let reply = unwrap_data(envelope.data, "reply")?;

    println!("Reply created!");
    println!("  ID: {}", reply.id);
    println!("  Created: {}", reply.created_at.as_deref().unwrap_or("?"));
    Ok(())
}

/// Edit a reply's content.
pub async fn edit_reply(
    ctx: &mut ExecutionContext,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let space = ctx.resolve_space_slug(matches.get_one::<String>(PARAMETER_SPACE))?;
    let reply_id = matches.get_one::<String>(PARAMETER_ID).unwrap();
    let content = matches.get_one::<String>(PARAMETER_CONTENT).unwrap();

    let envelope: Envelope<Reply> = ctx
        .api
        .patch(
            &format!("/spaces/{}/replies/{}", space, reply_id),
            &serde_json::json!({ "content": content }),
        )
        .await?;
    let reply = unwrap_data(envelope.data, "reply")?;

    println!("Reply edited!");
    println!("  ID: {}", reply.id);
    println!("  Edited: {}", reply.edited_at.as_deref().unwrap_or("?"));
    Ok(())
}

/// Delete a reply.
pub async fn delete_reply(
    ctx: &mut ExecutionContext,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let space = ctx.resolve_space_slug(matches.get_one::<String>(PARAMETER_SPACE))?;
    let reply_id = matches.get_one::<String>(PARAMETER_ID).unwrap();

    ctx.api
        .delete(&format!("/spaces/{}/replies/{}", space, reply_id))
        .await?;
    println!("Reply {} deleted.", reply_id);
    Ok(())
}
