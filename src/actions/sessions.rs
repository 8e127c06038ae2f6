//! Session action implementations.

use clap::ArgMatches;

use crate::actions::{truncate, unwrap_data, CliActionError};
use crate::commands::params::{
    PARAMETER_CONTENT, PARAMETER_CURSOR, PARAMETER_ID, PARAMETER_LIMIT, PARAMETER_SPACE,
};
use crate::context::ExecutionContext;
use crate::model::{Envelope, Message, SessionPage, SessionSummary};

const CONTENT_PREVIEW_CHARS: usize = 200;

/// List the sessions the user is part of.
pub async fn list_sessions(
    ctx: &mut ExecutionContext,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let limit = *matches.get_one::<u32>(PARAMETER_LIMIT).unwrap();
    let mut query = vec![("limit", limit.to_string())];
    if let Some(cursor) = matches.get_one::<String>(PARAMETER_CURSOR) {
        query.push(("cursor", cursor.clone()));
    }
    if let Some(space) = matches.get_one::<String>(PARAMETER_SPACE) {
        query.push(("spaceSlug", space.clone()));
    }

    let envelope: Envelope<Vec<SessionSummary>> =
        ctx.api.get("/session/my-sessions", &query).await?;

    let items = envelope.data.unwrap_or_default();
    if items.is_empty() {
        println!("No sessions found.");
        return Ok(());
    }

    println!("Sessions ({} items):", items.len());
    for session in &items {
        let mut member_info = String::new();
        if !session.members.is_empty() {
            let names: Vec<&str> = session
                .members
                .iter()
                .map(|member| member.display_name())
                .collect();
            member_info = format!(" | with: {}", names.join(", "));
            // member_count includes the caller; the listed members do not
            let overflow =
                session.member_count.unwrap_or(0) - session.members.len() as i64 - 1;
            if overflow > 0 {
                member_info.push_str(&format!(" +{} more", overflow));
            }
        }
        println!(
            "- [{}] \"{}\" (mode: {}, last activity: {}){}",
            session.id,
            session.title.as_deref().unwrap_or("(no title)"),
            session.mode.as_deref().unwrap_or("?"),
            session.last_message_at.as_deref().unwrap_or("?"),
            member_info,
        );
    }
    if let Some(pagination) = envelope.pagination {
        if pagination.has_more.unwrap_or(false) {
            if let Some(cursor) = pagination.next_cursor {
                println!("  Next cursor: {}", cursor);
            }
        }
    }
    Ok(())
}

/// Get a session and one page of its messages.
pub async fn get_session(
    ctx: &mut ExecutionContext,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let session_id = matches.get_one::<String>(PARAMETER_ID).unwrap();
    let limit = *matches.get_one::<u32>(PARAMETER_LIMIT).unwrap();
    let mut query = vec![("limit", limit.to_string())];
    if let Some(cursor) = matches.get_one::<String>(PARAMETER_CURSOR) {
        query.push(("cursor", cursor.clone()));
    }

    let envelope: Envelope<SessionPage> = ctx
        .api
        .get(&format!("/session/{}", session_id), &query)
        .await?;
    let pagination = envelope.pagination.clone();
    let page = unwrap_data(envelope.data, "session")?;
    let session = unwrap_data(page.session, "session")?;

    println!("Session: {}", session.title.as_deref().unwrap_or("(no title)"));
    println!("  ID: {}", session.id);
    println!("  Mode: {}", session.mode.as_deref().unwrap_or("?"));
    println!(
        "  Last activity: {}",
        session.last_message_at.as_deref().unwrap_or("?"),
    );
    println!();
    println!("Messages ({} items):", page.messages.len());
    for message in &page.messages {
        println!(
            "  - {}: {} ({})",
            message.author_display(),
            truncate(&message.content, CONTENT_PREVIEW_CHARS),
            message.created_at.as_deref().unwrap_or("?"),
        );
    }
    if let Some(pagination) = pagination {
        if pagination.has_more.unwrap_or(false) {
            if let Some(cursor) = pagination.next_cursor {
                println!("  Next cursor: {}", cursor);
            }
        }
    }
    Ok(())
}

/// Send a reply to a session.
pub async fn reply_session(
    ctx: &mut ExecutionContext,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let session_id = matches.get_one::<String>(PARAMETER_ID).unwrap();
    let content = matches.get_one::<String>(PARAMETER_CONTENT).unwrap();

    let envelope: Envelope<Message> = ctx
        .api
        .post(
            &format!("/session/{}/reply", session_id),
            &serde_json::json!({ "content": content }),
        )
        .await?;
    let message = unwrap_data(envelope.data, "message")?;

    println!("Reply sent!");
    println!("  Message ID: {}", message.id);
    println!("  Source: {}", message.source.as_deref().unwrap_or("?"));
    println!("  Created: {}", message.created_at.as_deref().unwrap_or("?"));
    Ok(())
}
