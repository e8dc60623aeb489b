//! Template operations.
//!
//! Templates are backend-owned; the client never keeps the collection in
//! sync incrementally, it re-fetches per operation and holds at most a
//! transient copy. That keeps these operations stateless functions
//! rather than a cache type.

use mailblast_api::{ApiClient, Template};

use crate::error::{Result, ValidationError};

/// Template kind sent on save. The backend currently knows only HTML.
const KIND_HTML: &str = "html";

/// Fetches all stored templates.
///
/// # Errors
///
/// Returns the API error on transport or backend failure.
pub async fn list(api: &ApiClient) -> Result<Vec<Template>> {
    Ok(api.templates().await?)
}

/// Re-fetches the collection and locates a template by name.
///
/// A name that is absent after the fetch yields `Ok(None)`; that is the
/// silent no-op the selection flow expects.
///
/// # Errors
///
/// Returns the API error on transport or backend failure.
pub async fn find(api: &ApiClient, name: &str) -> Result<Option<Template>> {
    let templates = api.templates().await?;
    Ok(templates.into_iter().find(|t| t.name == name))
}

/// Stores `content` as a new HTML template under `name`.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyTemplateName`] for a blank name (no
/// network call made), or the API error on failure.
pub async fn save_as(api: &ApiClient, name: &str, content: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyTemplateName.into());
    }
    Ok(api.save_template(name, content, KIND_HTML).await?)
}

/// Deletes the template named `name`.
///
/// # Errors
///
/// Returns the API error on transport or backend failure.
pub async fn delete(api: &ApiClient, name: &str) -> Result<()> {
    Ok(api.delete_template(name).await?)
}
