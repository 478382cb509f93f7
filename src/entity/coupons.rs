use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "coupons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub coupon_code: String,
    pub discount_rate: i32,
    pub smell_discount: bool,
    pub photo_discount: i32,
    pub cardpostal_discount: i32,
    #[sea_orm(column_type = "Text")]
    pub discount_description: String,
    pub is_active: bool,
    pub start_date: DateTimeWithTimeZone,
    pub end_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::coupon_users::Entity")]
    CouponUsers,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        super::coupon_users::Relation::Users.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::coupon_users::Relation::Coupons.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
