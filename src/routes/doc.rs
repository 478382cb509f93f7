use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{Claims, LoginRequest, LoginResponse, RegisterRequest, TokenRequest, TokenResponse},
        comments::{AdminCommentPayload, CommentPayload},
        content::{BlogPayload, ContentPayload, EnvelopeSchemaPayload, FaqPayload, MenuLinkPayload},
        coupons::{
            AdminCouponList, CouponList, CouponPatch, CouponPayload, CouponUserRef,
            CouponWithUsers, CreateCouponRequest, UpdateCouponRequest, ValidateCouponResponse,
        },
        orders::{OrderList, OrderPayload, PendingStatusResponse},
        uploads::{FileUploadResponse, MediaUploadResponse, PhotoUploadResponse},
        users::{
            CreateUserRequest, ProfileResponse, ProfileUser, UpdatePasswordRequest,
            UpdateUserRequest, UserList,
        },
    },
    models::{
        Blog, Cardpostal, Category, City, Comment, Content, Coupon, EnvelopeColor, EnvelopeSchema,
        EnvelopeSmell, Faq, FileRecord, Jail, MenuLink, Order, PaperColor, Photo, Price,
        ShipmentType, Town, User,
    },
    response::{ApiResponse, Meta},
    routes::{
        admin_orders, admin_users, auth, cardpostals, catalog, comments, content, coupons, geo,
        health, menu_links, orders, params, pricing, reports, schemas, uploads, users,
    },
    services::report_service::StatusReport,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::token,
        auth::register,
        auth::login,
        auth::verification,
        users::profile,
        users::update_password,
        users::update_email,
        users::update_user_info,
        users::delete_user,
        admin_users::list_users,
        admin_users::get_user,
        admin_users::create_user,
        admin_users::update_user,
        admin_users::delete_user,
        orders::create_order,
        orders::get_order,
        orders::update_order,
        orders::delete_order,
        orders::check_status,
        admin_orders::list_all_orders,
        admin_orders::create_order,
        admin_orders::get_order,
        admin_orders::update_order,
        admin_orders::delete_order,
        coupons::create_coupon,
        coupons::user_coupons,
        coupons::all_coupons,
        coupons::add_coupon,
        coupons::validate_coupon,
        coupons::remove_coupon,
        coupons::update_coupon,
        coupons::delete_coupon,
        comments::create_comment,
        comments::list_comments,
        comments::admin_create_comment,
        comments::admin_update_comment,
        comments::admin_delete_comment,
        content::create_blog,
        content::list_blogs,
        content::update_blog,
        content::delete_blog,
        content::list_faqs,
        content::create_faq,
        content::update_faq,
        content::delete_faq,
        content::list_contents,
        content::create_content,
        content::update_content,
        content::delete_content,
        menu_links::create_menu_link,
        menu_links::list_menu_links,
        menu_links::get_menu_link,
        menu_links::update_menu_link,
        menu_links::delete_menu_link,
        schemas::list_schemas,
        schemas::create_schema,
        schemas::update_schema,
        schemas::delete_schema,
        catalog::list_envelope_colors,
        catalog::get_envelope_color,
        catalog::create_envelope_color,
        catalog::update_envelope_color,
        catalog::delete_envelope_color,
        catalog::list_paper_colors,
        catalog::get_paper_color,
        catalog::create_paper_color,
        catalog::update_paper_color,
        catalog::delete_paper_color,
        catalog::list_envelope_smells,
        catalog::create_envelope_smell,
        catalog::list_shipment_types,
        catalog::create_shipment_type,
        pricing::create_price,
        pricing::list_prices,
        pricing::get_price_by_id,
        pricing::get_price_by_name,
        pricing::update_price,
        pricing::delete_price,
        pricing::create_feature,
        pricing::list_features,
        pricing::get_feature_by_id,
        pricing::get_feature_by_name,
        pricing::update_feature,
        pricing::delete_feature,
        geo::list_cities,
        geo::get_city,
        geo::create_city,
        geo::update_city,
        geo::delete_city,
        geo::list_towns,
        geo::towns_by_city,
        geo::get_town,
        geo::create_town,
        geo::update_town,
        geo::delete_town,
        geo::list_jails,
        geo::jails_by_city,
        geo::get_jail,
        geo::create_jail,
        geo::update_jail,
        geo::delete_jail,
        cardpostals::list_cardpostals,
        cardpostals::cardpostal_image,
        cardpostals::cardpostals_by_category,
        cardpostals::create_category,
        cardpostals::list_categories,
        uploads::upload_photos,
        uploads::list_photos,
        uploads::delete_photo,
        uploads::upload_files,
        uploads::list_files,
        uploads::delete_file,
        uploads::upload_media,
        uploads::delete_media,
        reports::status
    ),
    components(
        schemas(
            User,
            Order,
            Photo,
            FileRecord,
            Coupon,
            Comment,
            City,
            Town,
            Jail,
            Category,
            Cardpostal,
            Blog,
            Faq,
            Content,
            MenuLink,
            EnvelopeSchema,
            EnvelopeColor,
            PaperColor,
            EnvelopeSmell,
            ShipmentType,
            Price,
            crate::models::Feature,
            Claims,
            TokenRequest,
            TokenResponse,
            LoginRequest,
            LoginResponse,
            RegisterRequest,
            CreateUserRequest,
            UpdateUserRequest,
            UpdatePasswordRequest,
            UserList,
            ProfileUser,
            ProfileResponse,
            OrderPayload,
            OrderList,
            PendingStatusResponse,
            CouponPayload,
            CouponPatch,
            CreateCouponRequest,
            UpdateCouponRequest,
            CouponList,
            CouponUserRef,
            CouponWithUsers,
            AdminCouponList,
            ValidateCouponResponse,
            CommentPayload,
            AdminCommentPayload,
            BlogPayload,
            FaqPayload,
            ContentPayload,
            MenuLinkPayload,
            EnvelopeSchemaPayload,
            catalog::ColorPayload,
            catalog::SmellPayload,
            catalog::ShipmentTypePayload,
            pricing::PricePayload,
            pricing::FeaturePayload,
            geo::CityPayload,
            geo::TownPayload,
            geo::JailPayload,
            cardpostals::CardpostalView,
            PhotoUploadResponse,
            FileUploadResponse,
            MediaUploadResponse,
            StatusReport,
            params::Pagination,
            params::OrderListQuery,
            Meta,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<User>,
            ApiResponse<UserList>,
            ApiResponse<Coupon>,
            ApiResponse<CouponList>,
            ApiResponse<StatusReport>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login and verification"),
        (name = "Users", description = "Profile and self-service account endpoints"),
        (name = "Admin", description = "Admin order and user management"),
        (name = "Orders", description = "Customer order endpoints"),
        (name = "Coupons", description = "Coupon assignment and validation"),
        (name = "Comments", description = "Customer reviews"),
        (name = "Content", description = "Blog, FAQ, content pages and menu links"),
        (name = "Catalog", description = "Envelope, paper, smell, shipment and price options"),
        (name = "Geo", description = "Cities, towns and jails reference data"),
        (name = "Cardpostals", description = "Postcard catalog"),
        (name = "Uploads", description = "Photo, file and media uploads"),
        (name = "Reports", description = "Aggregate status reporting"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
