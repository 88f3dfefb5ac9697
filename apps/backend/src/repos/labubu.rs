//! Labubu repository functions for the domain layer (generic over ConnectionTrait).
//!
//! Callers pass either the pooled connection or an open transaction; the
//! repository never begins or ends transactions itself.

use sea_orm::ConnectionTrait;

use crate::adapters::labubu_sea as labubu_adapter;
use crate::entities::labubu;
use crate::errors::domain::DomainError;

/// Labubu domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labubu {
    pub id: i64,
    pub text: String,
    pub created_at: time::OffsetDateTime,
}

impl From<labubu::Model> for Labubu {
    fn from(model: labubu::Model) -> Self {
        Self {
            id: model.id,
            text: model.text,
            created_at: model.created_at,
        }
    }
}

pub async fn create<C: ConnectionTrait>(conn: &C, text: &str) -> Result<Labubu, DomainError> {
    let model =
        labubu_adapter::create_labubu(conn, labubu_adapter::LabubuCreate::new(text)).await?;
    Ok(Labubu::from(model))
}

pub async fn find_all<C: ConnectionTrait>(conn: &C) -> Result<Vec<Labubu>, DomainError> {
    let models = labubu_adapter::find_all(conn).await?;
    Ok(models.into_iter().map(Labubu::from).collect())
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i64,
) -> Result<Option<Labubu>, DomainError> {
    let model = labubu_adapter::find_by_id(conn, id).await?;
    Ok(model.map(Labubu::from))
}
