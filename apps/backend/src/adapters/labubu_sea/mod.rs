//! SeaORM adapter for the labubu table.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryOrder, Set};

use crate::entities::labubu;

pub mod dto;

pub use dto::LabubuCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn create_labubu<C: ConnectionTrait>(
    conn: &C,
    dto: LabubuCreate,
) -> Result<labubu::Model, sea_orm::DbErr> {
    let active = labubu::ActiveModel {
        id: NotSet,
        text: Set(dto.text),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    active.insert(conn).await
}

pub async fn find_all<C: ConnectionTrait>(conn: &C) -> Result<Vec<labubu::Model>, sea_orm::DbErr> {
    labubu::Entity::find()
        .order_by_asc(labubu::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i64,
) -> Result<Option<labubu::Model>, sea_orm::DbErr> {
    labubu::Entity::find_by_id(id).one(conn).await
}
