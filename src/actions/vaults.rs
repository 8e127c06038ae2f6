//! Vault action implementations.
//!
//! Vault selection and creation are interactive unless the identifying flags
//! are given. Publishing uploads the local VAULT.md summary file to the
//! drive service, which triggers server-side post-processing.

use std::fs;
use std::path::PathBuf;

use clap::ArgMatches;
use inquire::{Select, Text};

use crate::actions::{unwrap_data, CliActionError};
use crate::commands::params::{
    PARAMETER_CONTENT, PARAMETER_ID, PARAMETER_LIMIT, PARAMETER_MINE, PARAMETER_MODE,
    PARAMETER_NAME, PARAMETER_OFFSET, PARAMETER_QUERY, PARAMETER_QUESTION, PARAMETER_SPACE,
    PARAMETER_TITLE, PARAMETER_VAULT,
};
use crate::context::ExecutionContext;
use crate::model::{
    coerce_list, Envelope, SearchHit, TargetedSession, Vault, VaultAvailability, VaultUpdate,
};

/// Local vault summary file uploaded by `vault publish`
pub const VAULT_FILE_NAME: &str = "VAULT.md";

fn vault_file_path() -> Result<PathBuf, CliActionError> {
    Ok(std::env::current_dir()?.join(VAULT_FILE_NAME))
}

/// Create VAULT.md in the working directory if it does not exist yet.
fn ensure_vault_file(vault_name: &str) -> Result<(), CliActionError> {
    let path = vault_file_path()?;
    if path.exists() {
        return Ok(());
    }
    fs::write(
        &path,
        format!("---\ntitle: {}\ntags: []\ndescription:\n---\n", vault_name),
    )?;
    println!("Created {}", VAULT_FILE_NAME);
    Ok(())
}

/// Select the active vault, interactively unless `--id` was given.
pub async fn use_vault(
    ctx: &mut ExecutionContext,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let (vault_id, vault_name) = match matches.get_one::<String>(PARAMETER_ID) {
        Some(vault_id) => (vault_id.clone(), vault_id.clone()),
        None => {
            let value: serde_json::Value = ctx.api.get("/vault", &[]).await?;
            let vaults: Vec<Vault> = coerce_list(value);
            if vaults.is_empty() {
                return Err(CliActionError::BusinessLogicError(
                    "You don't have any vaults yet. Run 'lattice vault create' first."
                        .to_string(),
                ));
            }
            let selected = Select::new("Select a vault:", vaults).prompt()?;
            (selected.vault_id, selected.name)
        }
    };

    ctx.configuration.set_active_vault(&vault_id);
    ctx.configuration.save_to_default()?;
    println!("Vault set to \"{}\" ({})", vault_name, vault_id);
    ensure_vault_file(&vault_name)?;
    Ok(())
}

/// Create a new vault and make it active.
pub async fn create_vault(
    ctx: &mut ExecutionContext,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let explicit_id = matches.get_one::<String>(PARAMETER_ID).cloned();
    let interactive = explicit_id.is_none();

    let vault_id = loop {
        let candidate = match &explicit_id {
            Some(vault_id) => vault_id.clone(),
            None => Text::new("Enter a unique vault ID:").prompt()?,
        };
        let candidate = candidate.trim().to_string();
        if candidate.is_empty() {
            if !interactive {
                return Err(CliActionError::BusinessLogicError(
                    "Vault ID cannot be empty.".to_string(),
                ));
            }
            println!("Vault ID cannot be empty.");
            continue;
        }

        let availability: VaultAvailability = ctx
            .api
            .get(&format!("/vault/check/{}", candidate), &[])
            .await?;
        if availability.available {
            println!("ID \"{}\" is available!", candidate);
            break candidate;
        }
        if !interactive {
            return Err(CliActionError::BusinessLogicError(format!(
                "Vault ID \"{}\" is already taken.",
                candidate
            )));
        }
        println!("ID \"{}\" is already taken. Try another.", candidate);
    };

    let name = match matches.get_one::<String>(PARAMETER_NAME) {
        Some(name) => name.clone(),
        None if interactive => Text::new("Enter vault name:").prompt()?,
        None => String::new(),
    };
    let name = name.trim().to_string();
    let name = if name.is_empty() { vault_id.clone() } else { name };

    let envelope: Envelope<Vault> = ctx
        .api
        .post(
            "/vault",
            &serde_json::json!({ "vaultId": vault_id, "name": name }),
        )
        .await?;
    let vault = unwrap_data(envelope.data, "vault")?;

    ctx.configuration.set_active_vault(&vault.vault_id);
    ctx.configuration.save_to_default()?;
    println!("Created vault \"{}\" ({})", vault.name, vault.vault_id);
    ensure_vault_file(&vault.name)?;
    Ok(())
}

/// Search public vaults by text and semantic similarity.
pub async fn search_vaults(
    ctx: &mut ExecutionContext,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let query = matches.get_one::<String>(PARAMETER_QUERY).unwrap();

    let value: serde_json::Value = ctx
        .api
        .get("/vault/public/search", &[("query", query.clone())])
        .await?;
    let hits: Vec<SearchHit> = coerce_list(value);

    if hits.is_empty() {
        println!("No vaults found matching \"{}\".", query);
        return Ok(());
    }
    println!("Vaults matching \"{}\":", query);
    for hit in &hits {
        let vault = hit.vault.clone().unwrap_or_default();
        let owner = hit
            .owner
            .as_ref()
            .and_then(|o| o.name.as_deref())
            .map(|name| format!(" by {}", name))
            .unwrap_or_default();
        let similarity = hit
            .similarity
            .map(|s| format!(" [similarity: {:.3}]", s))
            .unwrap_or_default();
        println!(
            "- {} (vault: {}, space: {}){}{}",
            vault.display_name(),
            vault.display_slug(),
            hit.space_slug.as_deref().unwrap_or("N/A"),
            owner,
            similarity,
        );
    }
    Ok(())
}

/// Ask a vault a question, creating a targeted 1:1 session.
pub async fn ask_vault(
    ctx: &mut ExecutionContext,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let vault_id = ctx.resolve_vault_id(matches.get_one::<String>(PARAMETER_VAULT))?;
    let space = ctx.resolve_space_slug(matches.get_one::<String>(PARAMETER_SPACE))?;
    let question = matches.get_one::<String>(PARAMETER_QUESTION).unwrap();

    let mut body = serde_json::Map::new();
    body.insert("vaultSlug".to_string(), serde_json::json!(vault_id));
    body.insert("spaceSlug".to_string(), serde_json::json!(space));
    body.insert("question".to_string(), serde_json::json!(question));
    if let Some(mode) = matches.get_one::<String>(PARAMETER_MODE) {
        body.insert("mode".to_string(), serde_json::json!(mode));
    }

    let envelope: Envelope<TargetedSession> = ctx.api.post("/session/targeted", &body).await?;
    let created = unwrap_data(envelope.data, "session")?;
    let session = unwrap_data(created.session, "session")?;

    println!("Session created!");
    println!("  Session ID: {}", session.id);
    println!("  Mode: {}", session.mode.as_deref().unwrap_or("?"));
    println!("  Members: {}", created.members.len());
    println!("  Question sent.");
    Ok(())
}

/// Upload VAULT.md to the vault root on the drive service.
pub async fn publish(
    ctx: &mut ExecutionContext,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let vault_id = ctx.resolve_vault_id(matches.get_one::<String>(PARAMETER_VAULT))?;

    let path = vault_file_path()?;
    if !path.exists() {
        return Err(CliActionError::BusinessLogicError(format!(
            "{} not found in {}",
            VAULT_FILE_NAME,
            std::env::current_dir()?.display()
        )));
    }
    let content = fs::read_to_string(&path)?;

    let url = ctx.api.drive_file_url(&vault_id, VAULT_FILE_NAME);
    ctx.api.put_markdown(&url, content).await?;
    println!("Published {} to vault \"{}\"", VAULT_FILE_NAME, vault_id);
    Ok(())
}

/// Delete VAULT.md from the vault on the drive service.
pub async fn unpublish(
    ctx: &mut ExecutionContext,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let vault_id = ctx.resolve_vault_id(matches.get_one::<String>(PARAMETER_VAULT))?;

    let url = ctx.api.drive_file_url(&vault_id, VAULT_FILE_NAME);
    ctx.api.delete_absolute(&url).await?;
    println!("Deleted {} from vault \"{}\"", VAULT_FILE_NAME, vault_id);
    Ok(())
}

/// List recent vault updates.
pub async fn list_updates(
    ctx: &mut ExecutionContext,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let limit = *matches.get_one::<u32>(PARAMETER_LIMIT).unwrap();
    let offset = *matches.get_one::<u32>(PARAMETER_OFFSET).unwrap();
    let mut query = vec![
        ("limit", limit.to_string()),
        ("offset", offset.to_string()),
    ];
    if matches.get_flag(PARAMETER_MINE) {
        query.push(("mine", "true".to_string()));
    }
    if let Some(vault_id) = matches.get_one::<String>(PARAMETER_VAULT) {
        query.push(("vaultSlug", vault_id.clone()));
    }

    let envelope: Envelope<Vec<VaultUpdate>> = ctx.api.get("/updates", &query).await?;

    let items = envelope.data.unwrap_or_default();
    if items.is_empty() {
        println!("No vault updates found.");
        return Ok(());
    }
    let total = envelope
        .pagination
        .and_then(|p| p.total)
        .unwrap_or(items.len() as i64);
    println!("Vault updates ({} of {}):", items.len(), total);
    for update in &items {
        println!(
            "- [{}] \"{}\" by {} (vault: {}, {})",
            update.id,
            update.title.as_deref().unwrap_or("(no title)"),
            update.author_display(),
            update.vault_display(),
            update.created_at.as_deref().unwrap_or("?"),
        );
    }
    Ok(())
}

/// Post a vault update.
pub async fn post_update(
    ctx: &mut ExecutionContext,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let vault_id = ctx.resolve_vault_id(matches.get_one::<String>(PARAMETER_VAULT))?;
    let title = matches.get_one::<String>(PARAMETER_TITLE).unwrap();
    let content = matches.get_one::<String>(PARAMETER_CONTENT).unwrap();

    let envelope: Envelope<VaultUpdate> = ctx
        .api
        .post(
            &format!("/updates/vault/{}", vault_id),
            &serde_json::json!({ "title": title, "content": content }),
        )
        .await?;
    let update = unwrap_data(envelope.data, "update")?;

    println!("Vault update posted!");
    println!("  ID: {}", update.id);
    println!("  Title: {}", update.title.as_deref().unwrap_or(title));
    println!(
        "  Vault: {}",
        update
            .vault_slug
            .as_deref()
            .unwrap_or(vault_id.as_str()),
    );
    println!("  Created: {}", update.created_at.as_deref().unwrap_or("?"));
    Ok(())
}

/// Edit a posted vault update.
pub async fn edit_update(
    ctx: &mut ExecutionContext,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let update_id = matches.get_one::<String>(PARAMETER_ID).unwrap();
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

    let envelope: Envelope<VaultUpdate> = ctx
        .api
        .patch(&format!("/updates/{}", update_id), &body)
        .await?;
    let update = unwrap_data(envelope.data, "update")?;

    println!("Vault update edited!");
    println!("  ID: {}", update.id);
    println!("  Title: {}", update.title.as_deref().unwrap_or("(no title)"));
    println!("  Updated: {}", update.updated_at.as_deref().unwrap_or("?"));
    Ok(())
}

/// Delete a posted vault update.
pub async fn delete_update(
    ctx: &mut ExecutionContext,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let update_id = matches.get_one::<String>(PARAMETER_ID).unwrap();

    ctx.api.delete(&format!("/updates/{}", update_id)).await?;
    println!("Vault update {} deleted.", update_id);
    Ok(())
}
