use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub date: DateTimeWithTimeZone,
    pub customer_name: String,
    pub customer_id: Uuid,
    pub sender_name: String,
    pub sender_surname: String,
    pub sender_city: String,
    pub sender_district: String,
    #[sea_orm(column_type = "Text")]
    pub sender_address: String,
    pub receiver_name: String,
    pub receiver_surname: String,
    pub receiver_city: String,
    pub receiver_phone: String,
    pub jail_name: String,
    #[sea_orm(column_type = "Text")]
    pub jail_address: String,
    pub father_name: String,
    pub ward_id: String,
    pub letter_type: String,
    pub order_price: i64,
    pub status: String,
    #[sea_orm(column_type = "Text")]
    pub envelope_text: String,
    pub envelope_color: String,
    pub paper_color: String,
    pub cardpostals: Json,
    pub photos: Json,
    pub files: Json,
    pub smell: String,
    pub shipment_type: String,
    pub tax: i64,
    pub discount: i64,
    pub shipment_date: String,
    pub add_date: i32,
    pub track_id: String,
    #[sea_orm(column_type = "Text")]
    pub track_link: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CustomerId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(has_many = "super::photos::Entity")]
    Photos,
    #[sea_orm(has_many = "super::files::Entity")]
    Files,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::photos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Photos.def()
    }
}

impl Related<super::files::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Files.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
