use sea_orm::entity::prelude::*;

/// User account record.
///
/// Credential columns are all nullable at the storage level; the domain layer
/// maps them onto the `Credential` sum type (local, external, or linked) and
/// rejects rows that carry neither.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: Option<String>,
    pub secret: Option<String>,
    #[sea_orm(unique)]
    pub google_id: Option<String>,
    pub google_name: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    pub role: String,
    pub last_login_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::books::Entity")]
    Books,
}

impl Related<super::books::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Books.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
