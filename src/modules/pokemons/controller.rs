use anyhow::anyhow;
use axum::extract::{Query, State};
use tracing::instrument;

use pokeapi_core::{ApiResponse, AppError, DataResponse, QueryParams};

use super::model::{CreatePokemonDto, Pokemon, UpdatePokemonDto};
use super::service::PokemonService;
use crate::docs::ErrorResponse;
use crate::modules::IdQuery;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedQuery};

/// List pokemons
#[utoipa::path(
    get,
    path = "/api/v1/pokemons",
    params(
        ("page" = Option<i64>, Query, description = "Page number (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 10)"),
        ("name" = Option<String>, Query, description = "Substring match on name"),
        ("type" = Option<String>, Query, description = "Substring match on type"),
        ("notes" = Option<String>, Query, description = "Substring match on notes"),
        ("sort_by" = Option<String>, Query, description = "name, type or notes"),
        ("order" = Option<String>, Query, description = "asc (default) or desc"),
    ),
    responses(
        (status = 200, description = "Page of pokemons", body = [Pokemon]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No pokemons matched", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Pokemons"
)]
#[instrument(skip(state))]
pub async fn get_pokemons(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<ApiResponse<DataResponse<Vec<Pokemon>>>, AppError> {
    let (pokemons, pagination) = PokemonService::list_pokemons(&state.db, &params).await?;
    if pokemons.is_empty() {
        return Err(AppError::not_found(anyhow!("Pokemons not found")));
    }

    Ok(ApiResponse::ok(
        "Success fetching pokemons data",
        DataResponse::new(&pagination, pokemons),
    ))
}

/// Get a pokemon by id
#[utoipa::path(
    get,
    path = "/api/v1/pokemon",
    params(IdQuery),
    responses(
        (status = 200, description = "Pokemon found", body = Pokemon),
        (status = 404, description = "Pokemon not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Pokemons"
)]
#[instrument(skip(state))]
pub async fn get_pokemon(
    State(state): State<AppState>,
    ValidatedQuery(IdQuery { id }): ValidatedQuery<IdQuery>,
) -> Result<ApiResponse<DataResponse<Pokemon>>, AppError> {
    let pokemon = PokemonService::get_pokemon(&state.db, id).await?;
    Ok(ApiResponse::ok(
        "Success fetching pokemon data",
        DataResponse::single(pokemon),
    ))
}

/// Save a favourite pokemon
#[utoipa::path(
    post,
    path = "/api/v1/pokemon/create",
    request_body = CreatePokemonDto,
    responses(
        (status = 201, description = "Pokemon created", body = Pokemon),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Pokemons"
)]
#[instrument(skip(state))]
pub async fn create_pokemon(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreatePokemonDto>,
) -> Result<ApiResponse<Pokemon>, AppError> {
    let pokemon = PokemonService::create_pokemon(&state.db, dto).await?;
    Ok(ApiResponse::created("Pokemon created", pokemon))
}

/// Update a pokemon
#[utoipa::path(
    put,
    path = "/api/v1/pokemon/update",
    params(IdQuery),
    request_body = UpdatePokemonDto,
    responses(
        (status = 200, description = "Pokemon updated", body = Pokemon),
        (status = 404, description = "Pokemon not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Pokemons"
)]
#[instrument(skip(state))]
pub async fn update_pokemon(
    State(state): State<AppState>,
    ValidatedQuery(IdQuery { id }): ValidatedQuery<IdQuery>,
    ValidatedJson(dto): ValidatedJson<UpdatePokemonDto>,
) -> Result<ApiResponse<Pokemon>, AppError> {
    let pokemon = PokemonService::update_pokemon(&state.db, id, dto).await?;
    Ok(ApiResponse::ok("Pokemon updated", pokemon))
}

/// Delete a pokemon
#[utoipa::path(
    delete,
    path = "/api/v1/pokemon/delete",
    params(IdQuery),
    responses(
        (status = 200, description = "Pokemon deleted", body = Pokemon),
        (status = 404, description = "Pokemon not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Pokemons"
)]
#[instrument(skip(state))]
pub async fn delete_pokemon(
    State(state): State<AppState>,
    ValidatedQuery(IdQuery { id }): ValidatedQuery<IdQuery>,
) -> Result<ApiResponse<Pokemon>, AppError> {
    let pokemon = PokemonService::delete_pokemon(&state.db, id).await?;
    Ok(ApiResponse::ok("Pokemon deleted", pokemon))
}
