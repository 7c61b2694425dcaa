use sea_orm::entity::prelude::*;

/// Doctor record. Shared across all users.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "doctors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub specialization: String,
    pub contact: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::mappings::Entity")]
    Mappings,
}

impl Related<super::mappings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mappings.def()
    }
}

// Many-to-many: doctors -> mappings -> patients.
impl Related<super::patients::Entity> for Entity {
    fn to() -> RelationDef {
        super::mappings::Relation::Patient.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::mappings::Relation::Doctor.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
