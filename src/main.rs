//src/main.rs

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Relatório na tela e exportações assíncronas
    let dieta_especial_routes = Router::new()
        .route(
            "/relatorio-historico-dietas",
            get(handlers::relatorio_historico::relatorio_historico_dietas),
        )
        .route(
            "/exportar-pdf",
            post(handlers::relatorio_historico::exportar_pdf),
        )
        .route(
            "/exportar-xlsx",
            post(handlers::relatorio_historico::exportar_xlsx),
        );

    // Central de downloads do usuário
    let downloads_routes = Router::new().route("/", get(handlers::downloads::listar_downloads));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/dieta-especial", dieta_especial_routes)
        .nest("/api/downloads", downloads_routes)
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
