// src/db/downloads_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::downloads::CentralDeDownload};

const COLUNAS_DOWNLOAD: &str = "uuid, identificador, status, msg_erro, visto, usuario, criado_em";

/// Repositório da central de downloads. O ciclo de vida de uma solicitação
/// é sempre EM_PROCESSAMENTO -> CONCLUIDO ou EM_PROCESSAMENTO -> ERRO.
#[derive(Clone)]
pub struct DownloadsRepository {
    pool: PgPool,
}

impl DownloadsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn criar(
        &self,
        usuario: &str,
        identificador: &str,
    ) -> Result<CentralDeDownload, AppError> {
        let download = sqlx::query_as::<_, CentralDeDownload>(&format!(
            "INSERT INTO central_de_download (uuid, identificador, usuario) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUNAS_DOWNLOAD}"
        ))
        .bind(Uuid::new_v4())
        .bind(identificador)
        .bind(usuario)
        .fetch_one(&self.pool)
        .await?;
        Ok(download)
    }

    pub async fn concluir(
        &self,
        uuid: Uuid,
        identificador: &str,
        arquivo: &[u8],
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE central_de_download \
             SET status = 'CONCLUIDO', identificador = $2, arquivo = $3, msg_erro = NULL \
             WHERE uuid = $1",
        )
        .bind(uuid)
        .bind(identificador)
        .bind(arquivo.to_vec())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn registrar_erro(&self, uuid: Uuid, msg_erro: &str) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE central_de_download SET status = 'ERRO', msg_erro = $2 WHERE uuid = $1",
        )
        .bind(uuid)
        .bind(msg_erro)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn listar_por_usuario(
        &self,
        usuario: &str,
    ) -> Result<Vec<CentralDeDownload>, AppError> {
        let downloads = sqlx::query_as::<_, CentralDeDownload>(&format!(
            "SELECT {COLUNAS_DOWNLOAD} FROM central_de_download \
             WHERE usuario = $1 ORDER BY criado_em DESC"
        ))
        .bind(usuario)
        .fetch_all(&self.pool)
        .await?;
        Ok(downloads)
    }
}
