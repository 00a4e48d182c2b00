use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use pokeapi_auth::Role;

use crate::middleware::auth::AuthContext;
use crate::modules::auth::model::{LoginRequest, LoginResponse, RegisterRequest};
use crate::modules::pokemons::model::{CreatePokemonDto, Pokemon, UpdatePokemonDto};
use crate::modules::products::model::{CreateProductDto, Product, UpdateProductDto};
use crate::modules::users::model::{CreateUserDto, UpdateUserDto, User};

/// Envelope returned on every failure.
#[derive(ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::me,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::products::controller::get_products,
        crate::modules::products::controller::get_product,
        crate::modules::products::controller::create_product,
        crate::modules::products::controller::update_product,
        crate::modules::products::controller::delete_product,
        crate::modules::pokemons::controller::get_pokemons,
        crate::modules::pokemons::controller::get_pokemon,
        crate::modules::pokemons::controller::create_pokemon,
        crate::modules::pokemons::controller::update_pokemon,
        crate::modules::pokemons::controller::delete_pokemon,
    ),
    components(
        schemas(
            Role,
            AuthContext,
            LoginRequest,
            LoginResponse,
            RegisterRequest,
            User,
            CreateUserDto,
            UpdateUserDto,
            Product,
            CreateProductDto,
            UpdateProductDto,
            Pokemon,
            CreatePokemonDto,
            UpdatePokemonDto,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, registration and session identity"),
        (name = "Users", description = "User management (admin only)"),
        (name = "Products", description = "Product catalogue"),
        (name = "Pokemons", description = "Favourite pokemons")
    ),
    info(
        title = "PokeAPI",
        version = "0.1.0",
        description = "REST API with JWT authentication, role-ranked access control and filterable, paginated list endpoints.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
