// src/models/downloads.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(type_name = "status_download", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum StatusDownload {
    EmProcessamento,
    Concluido,
    Erro,
}

/// Solicitação de geração de arquivo na central de downloads. O conteúdo do
/// arquivo fica só no banco; a listagem devolve os metadados.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CentralDeDownload {
    pub uuid: Uuid,
    pub identificador: String,
    pub status: StatusDownload,
    pub msg_erro: Option<String>,
    pub visto: bool,
    pub usuario: String,
    pub criado_em: DateTime<Utc>,
}
