use std::net::Ipv4Addr;

use sea_orm::{entity::prelude::*, sea_query::Expr, Set, DatabaseConnection, QueryFilter, QueryOrder};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Login prefixed to every generated connection string.
pub const SSH_USER: &str = "root";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "computer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub os: String,
    pub cpu: String,
    pub ram: i32,
    /// true = available, false = reserved
    pub status: bool,
    pub ssh: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Result of the conditional reservation update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveOutcome {
    Reserved,
    AlreadyReserved,
    Missing,
}

/// `root@a.b.c.d` with random octets. Display-only: neither unique nor routable.
pub fn random_ssh() -> String {
    let octets: [u8; 4] = rand::random();
    format!("{}@{}", SSH_USER, Ipv4Addr::from(octets))
}

/// Insert an available computer with a freshly generated ssh string.
pub async fn create(db: &DatabaseConnection, os: &str, cpu: &str, ram: i32) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        os: Set(os.to_string()),
        cpu: Set(cpu.to_string()),
        ram: Set(ram),
        status: Set(true),
        ssh: Set(random_ssh()),
        created_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}

pub async fn find(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// Flip `status` from available to reserved in one statement:
/// `UPDATE computer SET status = false WHERE id = $1 AND status = true`.
///
/// Exactly one of any number of concurrent callers sees an affected row. When nothing was
/// updated the row is probed only to tell a missing id from a reservation conflict.
pub async fn reserve(db: &DatabaseConnection, id: Uuid) -> Result<ReserveOutcome, ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::Status, Expr::value(false))
        .filter(Column::Id.eq(id))
        .filter(Column::Status.eq(true))
        .exec(db)
        .await?;
    if res.rows_affected == 1 {
        return Ok(ReserveOutcome::Reserved);
    }
    let exists = Entity::find_by_id(id).one(db).await?.is_some();
    Ok(if exists { ReserveOutcome::AlreadyReserved } else { ReserveOutcome::Missing })
}

/// Mark a computer available regardless of its current state. Returns false when no row matched.
pub async fn relieve(db: &DatabaseConnection, id: Uuid) -> Result<bool, ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::Status, Expr::value(true))
        .filter(Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}

/// Every computer in insertion order.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::CreatedAt).all(db).await?)
}
