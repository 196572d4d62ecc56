use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "imdbID", unique)]
    pub imdb_id: String,
    pub title: String,
    pub year: i32,
    pub rating: f64,
    #[sea_orm(column_name = "isSuperhero")]
    pub is_superhero: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
