use anyhow::{Context, anyhow};
use sqlx::PgPool;
use tracing::instrument;

use pokeapi_core::{AppError, PaginationState, QueryParams};
use pokeapi_db::list_rows;

use super::model::{CreatePokemonDto, POKEMON_LIST, Pokemon, UpdatePokemonDto};

fn not_found() -> AppError {
    AppError::not_found(anyhow!("Pokemon not found"))
}

pub struct PokemonService;

impl PokemonService {
    #[instrument(skip(db))]
    pub async fn list_pokemons(
        db: &PgPool,
        params: &QueryParams,
    ) -> Result<(Vec<Pokemon>, PaginationState), AppError> {
        list_rows::<Pokemon>(db, &POKEMON_LIST, params)
            .await
            .context("Failed to fetch pokemons")
            .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_pokemon(db: &PgPool, id: i64) -> Result<Pokemon, AppError> {
        sqlx::query_as::<_, Pokemon>(
            r#"SELECT id, name, "type", notes, sprite, created_at, updated_at FROM pokemons WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch pokemon by ID")
        .map_err(AppError::database)?
        .ok_or_else(not_found)
    }

    #[instrument(skip(db))]
    pub async fn create_pokemon(db: &PgPool, dto: CreatePokemonDto) -> Result<Pokemon, AppError> {
        let pokemon = sqlx::query_as::<_, Pokemon>(
            r#"
            INSERT INTO pokemons (name, "type", notes, sprite)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, "type", notes, sprite, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.kind)
        .bind(&dto.notes)
        .bind(&dto.sprite)
        .fetch_one(db)
        .await
        .context("Failed to insert pokemon")
        .map_err(AppError::database)?;

        Ok(pokemon)
    }

    #[instrument(skip(db))]
    pub async fn update_pokemon(
        db: &PgPool,
        id: i64,
        dto: UpdatePokemonDto,
    ) -> Result<Pokemon, AppError> {
        sqlx::query_as::<_, Pokemon>(
            r#"
            UPDATE pokemons
            SET name = COALESCE($1, name),
                "type" = COALESCE($2, "type"),
                notes = COALESCE($3, notes),
                sprite = COALESCE($4, sprite),
                updated_at = NOW()
            WHERE id = $5
            RETURNING id, name, "type", notes, sprite, created_at, updated_at
            "#,
        )
        .bind(dto.name)
        .bind(dto.kind)
        .bind(dto.notes)
        .bind(dto.sprite)
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to update pokemon")
        .map_err(AppError::database)?
        .ok_or_else(not_found)
    }

    #[instrument(skip(db))]
    pub async fn delete_pokemon(db: &PgPool, id: i64) -> Result<Pokemon, AppError> {
        sqlx::query_as::<_, Pokemon>(
            r#"DELETE FROM pokemons WHERE id = $1 RETURNING id, name, "type", notes, sprite, created_at, updated_at"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to delete pokemon")
        .map_err(AppError::database)?
        .ok_or_else(not_found)
    }
}
