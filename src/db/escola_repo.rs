// src/db/escola_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::AppError;

// Consultas de apoio às estruturas da rede (DRE, períodos escolares),
// usadas na montagem do título dos relatórios.
#[derive(Clone)]
pub struct EscolaRepository {
    pool: PgPool,
}

impl EscolaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn nome_dre_por_iniciais(&self, iniciais: &str) -> Result<Option<String>, AppError> {
        let nome = sqlx::query_scalar::<_, String>(
            "SELECT nome FROM diretoria_regional WHERE iniciais = $1",
        )
        .bind(iniciais)
        .fetch_optional(&self.pool)
        .await?;
        Ok(nome)
    }

    pub async fn nomes_periodos_por_uuids(&self, uuids: &[Uuid]) -> Result<Vec<String>, AppError> {
        let nomes = sqlx::query_scalar::<_, String>(
            "SELECT nome FROM periodo_escolar WHERE uuid = ANY($1) ORDER BY nome",
        )
        .bind(uuids.to_vec())
        .fetch_all(&self.pool)
        .await?;
        Ok(nomes)
    }
}
