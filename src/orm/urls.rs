//! SeaORM Entity for urls table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "urls")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::url_checks::Entity")]
    UrlChecks,
}

impl Related<super::url_checks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UrlChecks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
