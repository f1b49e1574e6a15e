use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RegisterRequestDoc {
    pub email: String,
    pub password: String,
    /// `admin` or `user`; defaults to `user`.
    pub role: Option<String>,
}

#[derive(ToSchema)]
pub struct LoginRequestDoc { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct LoggedUserDoc { pub id: Uuid, pub email: String, pub role: String, pub token: String }

#[derive(ToSchema)]
pub struct AddComputerInputDoc { pub os: String, pub cpu: String, pub ram: i32 }

#[derive(ToSchema)]
pub struct ComputerDoc {
    pub id: Uuid,
    pub os: String,
    pub cpu: String,
    pub ram: i32,
    /// `true` while available.
    pub status: bool,
    pub ssh: String,
}

#[derive(ToSchema)]
pub struct ReservationDoc { pub id: Uuid, pub reserved: bool }

#[derive(ToSchema)]
pub struct ErrorDoc { pub status: String, pub error: String, pub code: u16, pub detail: Option<String> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::me,
        crate::routes::computers::create,
        crate::routes::computers::list,
        crate::routes::computers::get,
        crate::routes::computers::reserve,
        crate::routes::computers::relieve,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequestDoc,
            LoginRequestDoc,
            LoggedUserDoc,
            AddComputerInputDoc,
            ComputerDoc,
            ReservationDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "computers")
    )
)]
pub struct ApiDoc;
