//! Data models for Lattice platform entities (spaces, threads, sessions,
//! vaults) and the pagination envelope the API wraps list responses in.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::format::{Formattable, FormattingError, OutputFormat};

/// Minimal author projection embedded in threads, replies and updates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: Option<i64>,
    #[serde(rename = "hasMore")]
    pub has_more: Option<bool>,
    #[serde(rename = "nextCursor")]
    pub next_cursor: Option<String>,
}

/// The `{data, pagination}` envelope most list endpoints respond with
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub pagination: Option<Pagination>,
}

/// Coerce a response that is either a bare JSON array or a `{data: [...]}`
/// wrapper into a typed list. Anything else reads as an empty list.
pub fn coerce_list<T: DeserializeOwned>(value: serde_json::Value) -> Vec<T> {
    if let Ok(items) = serde_json::from_value::<Vec<T>>(value.clone()) {
        return items;
    }
    if let Some(data) = value.get("data") {
        if let Ok(items) = serde_json::from_value::<Vec<T>>(data.clone()) {
            return items;
        }
    }
    Vec::new()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub slug: String,
    pub name: String,
}

impl std::fmt::Display for Space {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.slug)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<Author>,
    #[serde(rename = "authorId")]
    pub author_id: Option<i64>,
    #[serde(rename = "replyCount")]
    pub reply_count: Option<i64>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "editedAt")]
    pub edited_at: Option<String>,
}

impl Thread {
    pub fn author_display(&self) -> String {
        author_display(&self.author, self.author_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub id: i64,
    pub content: String,
    pub author: Option<Author>,
    #[serde(rename = "authorId")]
    pub author_id: Option<i64>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "editedAt")]
    pub edited_at: Option<String>,
}

impl Reply {
    pub fn author_display(&self) -> String {
        author_display(&self.author, self.author_id)
    }
}

/// A thread together with one page of its replies
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadPage {
    pub thread: Option<Thread>,
    #[serde(default)]
    pub items: Vec<Reply>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMember {
    pub name: Option<String>,
    #[serde(rename = "vaultName")]
    pub vault_name: Option<String>,
}

impl SessionMember {
    pub fn display_name(&self) -> &str {
        self.vault_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub title: Option<String>,
    pub mode: Option<String>,
    #[serde(rename = "lastMessageAt")]
    pub last_message_at: Option<String>,
    #[serde(rename = "memberCount")]
    pub member_count: Option<i64>,
    #[serde(default)]
    pub members: Vec<SessionMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub content: String,
    pub author: Option<Author>,
    #[serde(rename = "authorId")]
    pub author_id: Option<i64>,
    pub source: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
}

impl Message {
    pub fn author_display(&self) -> String {
        if let Some(name) = self.author.as_ref().and_then(|a| a.name.as_deref()) {
            return name.to_string();
        }
        if let Some(source) = self.source.as_deref() {
            return source.to_string();
        }
        match self.author_id {
            Some(id) => format!("User {}", id),
            None => "Unknown".to_string(),
        }
    }
}

/// A session together with one page of its messages
#[derive(Debug, Clone, Deserialize)]
pub struct SessionPage {
    pub session: Option<SessionSummary>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Result of asking a vault a question: the created session and its members
#[derive(Debug, Clone, Deserialize)]
pub struct TargetedSession {
    pub session: Option<SessionSummary>,
    #[serde(default)]
    pub members: Vec<SessionMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vault {
    #[serde(rename = "vaultId")]
    pub vault_id: String,
    pub name: String,
}

impl std::fmt::Display for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.vault_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VaultAvailability {
    #[serde(default)]
    pub available: bool,
}

/// Loose vault reference as it appears in search results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VaultRef {
    pub name: Option<String>,
    pub title: Option<String>,
    pub slug: Option<String>,
    #[serde(rename = "vaultId")]
    pub vault_id: Option<String>,
}

impl VaultRef {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or("N/A")
    }

    pub fn display_slug(&self) -> &str {
        self.slug
            .as_deref()
            .or(self.vault_id.as_deref())
            .unwrap_or("N/A")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub vault: Option<VaultRef>,
    pub owner: Option<Author>,
    pub similarity: Option<f64>,
    #[serde(rename = "spaceSlug")]
    pub space_slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultUpdate {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<Author>,
    #[serde(rename = "authorId")]
    pub author_id: Option<i64>,
    pub vault: Option<VaultRef>,
    #[serde(rename = "vaultSlug")]
    pub vault_slug: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

impl VaultUpdate {
    pub fn author_display(&self) -> String {
        author_display(&self.author, self.author_id)
    }

    pub fn vault_display(&self) -> &str {
        self.vault
            .as_ref()
            .and_then(|v| v.slug.as_deref().or(v.vault_id.as_deref()))
            .or(self.vault_slug.as_deref())
            .unwrap_or("?")
    }
}

fn author_display(author: &Option<Author>, author_id: Option<i64>) -> String {
    if let Some(name) = author.as_ref().and_then(|a| a.name.as_deref()) {
        return name.to_string();
    }
    match author_id {
        Some(id) => format!("User {}", id),
        None => "Unknown".to_string(),
    }
}

/// Authentication status projection printed by `lattice auth status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthStatus {
    pub name: String,
    pub email: String,
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "tokenExpiresAt")]
    pub token_expires_at: String,
}

impl Formattable for AuthStatus {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError> {
        match f {
            OutputFormat::Json(options) => {
                if options.pretty {
                    Ok(serde_json::to_string_pretty(self)?)
                } else {
                    Ok(serde_json::to_string(self)?)
                }
            }
            OutputFormat::Csv(options) => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                if options.with_headers {
                    wtr.serialize(("NAME", "EMAIL", "USER_ID", "TOKEN_EXPIRES_AT"))?;
                }
                wtr.serialize((
                    &self.name,
                    &self.email,
                    self.user_id,
                    &self.token_expires_at,
                ))?;
                let data = wtr.into_inner()?;
                String::from_utf8(data).map_err(FormattingError::Utf8Error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_list_from_bare_array() {
        let value: serde_json::Value =
            serde_json::from_str(r#"[{"slug":"eng","name":"Engineering"}]"#).unwrap();
        let spaces: Vec<Space> = coerce_list(value);
        assert_eq!(spaces.len(), 1);
        assert_eq!(spaces[0].slug, "eng");
    }

    #[test]
    fn test_coerce_list_from_data_wrapper() {
        let value: serde_json::Value =
            serde_json::from_str(r#"{"data":[{"slug":"eng","name":"Engineering"}]}"#).unwrap();
        let spaces: Vec<Space> = coerce_list(value);
        assert_eq!(spaces.len(), 1);
    }

    #[test]
    fn test_coerce_list_from_garbage_is_empty() {
        let value: serde_json::Value = serde_json::from_str(r#"{"message":"nope"}"#).unwrap();
        let spaces: Vec<Space> = coerce_list(value);
        assert!(spaces.is_empty());
    }

    #[test]
    fn test_author_display_fallbacks() {
        let thread: Thread = serde_json::from_str(
            r#"{"id":1,"title":"t","authorId":9}"#,
        )
        .unwrap();
        assert_eq!(thread.author_display(), "User 9");

        let named: Thread = serde_json::from_str(
            r#"{"id":1,"title":"t","author":{"name":"Ada"}}"#,
        )
        .unwrap();
        assert_eq!(named.author_display(), "Ada");
    }

    #[test]
    fn test_auth_status_csv() {
        let status = AuthStatus {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            user_id: 42,
            token_expires_at: "2026-08-04T12:00:00Z".to_string(),
        };
        let format = OutputFormat::Csv(crate::format::OutputFormatOptions {
            with_headers: true,
            pretty: false,
        });
        let output = status.format(&format).unwrap();
        assert!(output.starts_with("NAME,EMAIL,USER_ID,TOKEN_EXPIRES_AT"));
        assert!(output.contains("ada@example.com"));
    }
}
