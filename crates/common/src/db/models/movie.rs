//! Movie entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Movies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "Id")]
    pub id: Uuid,

    #[sea_orm(column_name = "Title", column_type = "Text")]
    pub title: String,

    #[sea_orm(column_name = "Description", column_type = "Text")]
    pub description: String,

    #[sea_orm(column_name = "DateOfRelease")]
    pub date_of_release: Date,

    #[sea_orm(column_name = "CreatedDate")]
    pub created_date: DateTimeUtc,

    #[sea_orm(column_name = "UpdatedDate")]
    pub updated_date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::rating::Entity")]
    Ratings,
}

impl Related<super::rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
