use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movie")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub cast: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub synopsis: Option<String>,
    pub poster_url: Option<String>,
    pub stars: Option<i32>,
    pub year: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
