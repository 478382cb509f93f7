use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub phone_number: String,
    pub password_hash: String,
    pub is_verified: bool,
    pub join_date: DateTimeWithTimeZone,
    pub privilege: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
    #[sea_orm(has_many = "super::coupon_users::Entity")]
    CouponUsers,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::coupons::Entity> for Entity {
    fn to() -> RelationDef {
        super::coupon_users::Relation::Coupons.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::coupon_users::Relation::Users.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
