// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{DownloadsRepository, EscolaRepository, LogsDietasRepository},
    services::{ExportacaoService, RelatorioHistoricoService, TituloService},
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub relatorio_historico_service: RelatorioHistoricoService,
    pub exportacao_service: ExportacaoService,
    pub downloads_repo: DownloadsRepository,
}

impl AppState {
    // Carrega as configurações e monta o estado da aplicação
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let logs_dietas_repo = LogsDietasRepository::new(db_pool.clone());
        let escola_repo = EscolaRepository::new(db_pool.clone());
        let downloads_repo = DownloadsRepository::new(db_pool.clone());

        let relatorio_historico_service = RelatorioHistoricoService::new(logs_dietas_repo);
        let titulo_service = TituloService::new(escola_repo);
        let exportacao_service = ExportacaoService::new(
            relatorio_historico_service.clone(),
            titulo_service,
            downloads_repo.clone(),
        );

        Ok(Self {
            db_pool,
            relatorio_historico_service,
            exportacao_service,
            downloads_repo,
        })
    }
}
