// src/handlers/downloads.rs

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::{common::error::AppError, config::AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct FiltroDownloads {
    #[validate(length(min = 1, message = "Usuário é obrigatório"))]
    pub usuario: String,
}

// GET /api/downloads?usuario=
pub async fn listar_downloads(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroDownloads>,
) -> Result<impl IntoResponse, AppError> {
    filtro.validate()?;

    let downloads = app_state
        .downloads_repo
        .listar_por_usuario(&filtro.usuario)
        .await?;

    Ok(Json(downloads))
}
