//! Labubu service: input validation and lookups over the repository.

use sea_orm::ConnectionTrait;
use tracing::{debug, info};

use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::labubu::{self as labubu_repo, Labubu};

pub async fn create_labubu<C: ConnectionTrait>(
    conn: &C,
    text: &str,
) -> Result<Labubu, DomainError> {
    if text.trim().is_empty() {
        return Err(DomainError::validation("text must not be empty"));
    }

    let created = labubu_repo::create(conn, text).await?;
    info!(labubu_id = created.id, "labubu created");
    Ok(created)
}

/// All labubu, ordered by id.
pub async fn list_labubu<C: ConnectionTrait>(conn: &C) -> Result<Vec<Labubu>, DomainError> {
    let all = labubu_repo::find_all(conn).await?;
    debug!(count = all.len(), "listed labubu");
    Ok(all)
}

pub async fn get_labubu<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Labubu, DomainError> {
    labubu_repo::find_by_id(conn, id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Labubu, format!("Labubu {id} not found"))
    })
}
