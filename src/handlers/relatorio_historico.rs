// src/handlers/relatorio_historico.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    common::{error::AppError, parametros::ParametrosConsulta},
    config::AppState,
    services::relatorio_historico::gerar_filtros_relatorio_historico,
};

pub const NOME_ARQUIVO_PDF: &str = "relatorio_historico_dietas_especiais.pdf";
pub const NOME_ARQUIVO_XLSX: &str = "relatorio_historico_dietas_especiais.xlsx";

/// Corpo dos POSTs de exportação: o usuário solicitante mais o mesmo
/// multimapa de parâmetros da consulta na tela, em JSON.
#[derive(Debug, Deserialize, Validate)]
pub struct SolicitacaoExportacao {
    #[validate(length(min = 1, message = "Usuário é obrigatório"))]
    pub usuario: String,

    #[serde(flatten)]
    pub parametros: serde_json::Map<String, serde_json::Value>,
}

// GET /api/dieta-especial/relatorio-historico-dietas
pub async fn relatorio_historico_dietas(
    State(app_state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let query_params = ParametrosConsulta::from_pares(params);
    let (filtros, _) = gerar_filtros_relatorio_historico(&query_params)?;

    let relatorio = app_state
        .relatorio_historico_service
        .gera_dicionario_historico_dietas(&filtros)
        .await?;

    Ok(Json(relatorio))
}

// POST /api/dieta-especial/exportar-pdf
pub async fn exportar_pdf(
    State(app_state): State<AppState>,
    Json(payload): Json<SolicitacaoExportacao>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let exportacao_service = app_state.exportacao_service.clone();
    let usuario = payload.usuario.clone();
    let parametros = serde_json::Value::Object(payload.parametros);

    // A geração roda fora do ciclo da requisição; o andamento fica na
    // central de downloads.
    tokio::spawn(async move {
        if let Err(erro) = exportacao_service
            .gera_pdf_relatorio_historico_dietas_async(&usuario, NOME_ARQUIVO_PDF, &parametros)
            .await
        {
            tracing::error!("Falha na geração do arquivo {}: {}", NOME_ARQUIVO_PDF, erro);
        }
    });

    Ok((
        StatusCode::OK,
        Json(json!({
            "detail": "Solicitação de geração de arquivo recebida com sucesso."
        })),
    ))
}

// POST /api/dieta-especial/exportar-xlsx
pub async fn exportar_xlsx(
    State(app_state): State<AppState>,
    Json(payload): Json<SolicitacaoExportacao>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let exportacao_service = app_state.exportacao_service.clone();
    let usuario = payload.usuario.clone();
    let parametros = serde_json::Value::Object(payload.parametros);

    tokio::spawn(async move {
        if let Err(erro) = exportacao_service
            .gera_xlsx_relatorio_historico_dietas_async(&usuario, NOME_ARQUIVO_XLSX, &parametros)
            .await
        {
            tracing::error!("Falha na geração do arquivo {}: {}", NOME_ARQUIVO_XLSX, erro);
        }
    });

    Ok((
        StatusCode::OK,
        Json(json!({
            "detail": "Solicitação de geração de arquivo recebida com sucesso."
        })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solicitacao_de_exportacao_separa_usuario_dos_parametros() {
        let payload: SolicitacaoExportacao = serde_json::from_value(json!({
            "usuario": "fulano",
            "data": "20/04/2025",
            "classificacoes_selecionadas[]": [1, 2],
        }))
        .unwrap();

        assert_eq!(payload.usuario, "fulano");
        assert_eq!(payload.parametros["data"], json!("20/04/2025"));
        assert_eq!(payload.parametros["classificacoes_selecionadas[]"], json!([1, 2]));
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn usuario_vazio_reprova_na_validacao() {
        let payload: SolicitacaoExportacao = serde_json::from_value(json!({
            "usuario": "",
            "data": "20/04/2025",
        }))
        .unwrap();

        assert!(payload.validate().is_err());
    }
}
