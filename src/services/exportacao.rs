// src/services/exportacao.rs
//
// Geração assíncrona dos arquivos do relatório histórico. Cada solicitação
// vira um registro na central de downloads; o conteúdo do arquivo é o
// documento JSON que os renderizadores de PDF e planilha consomem.

use anyhow::anyhow;
use serde_json::json;

use crate::{
    common::{error::AppError, parametros::ParametrosConsulta},
    db::DownloadsRepository,
    models::{dietas::LogDietaRecord, relatorio::LinhaExportacao},
    services::{
        faixa_etaria::get_faixa_etaria,
        reestruturacao::reestruturar_resultados,
        relatorio_historico::{gerar_filtros_relatorio_historico, RelatorioHistoricoService},
        titulo::TituloService,
    },
};

/// Achata os registros agregados em linhas de planilha, uma por registro.
pub fn formata_logs_para_exportacao(logs: &[LogDietaRecord]) -> Vec<LinhaExportacao> {
    logs.iter()
        .map(|log| LinhaExportacao {
            lote_dre: format!("{} - DRE {}", log.lote, log.dre),
            unidade_educacional: log.nome_escola.clone(),
            classificacao_da_dieta: log.nome_classificacao.clone(),
            periodo: log.nome_periodo_escolar.clone(),
            faixa_etaria: get_faixa_etaria(log),
            dietas_autorizadas: log.quantidade_total,
            data_de_referencia: log.data.format("%d/%m/%Y").to_string(),
        })
        .collect()
}

// Mensagem gravada na central de downloads quando a geração falha. Erros de
// validação carregam as mensagens campo a campo; os demais, a causa.
fn mensagem_de_erro(erro: &AppError) -> String {
    match erro {
        AppError::ValidationError(erros) => {
            let mensagens: Vec<String> = erros
                .field_errors()
                .values()
                .flat_map(|lista| lista.iter())
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .collect();
            if mensagens.is_empty() {
                erro.to_string()
            } else {
                mensagens.join("; ")
            }
        }
        AppError::DatabaseError(fonte) => fonte.to_string(),
        AppError::InternalServerError(fonte) => fonte.to_string(),
        outro => outro.to_string(),
    }
}

/// Serviço de exportação do relatório histórico de dietas.
#[derive(Clone)]
pub struct ExportacaoService {
    relatorio_service: RelatorioHistoricoService,
    titulo_service: TituloService,
    downloads_repo: DownloadsRepository,
}

impl ExportacaoService {
    pub fn new(
        relatorio_service: RelatorioHistoricoService,
        titulo_service: TituloService,
        downloads_repo: DownloadsRepository,
    ) -> Self {
        Self {
            relatorio_service,
            titulo_service,
            downloads_repo,
        }
    }

    /// Gera o documento do PDF e registra o resultado na central de
    /// downloads. Falhas na montagem não interrompem a tarefa: ficam
    /// gravadas no registro do download.
    pub async fn gera_pdf_relatorio_historico_dietas_async(
        &self,
        usuario: &str,
        nome_arquivo: &str,
        parametros: &serde_json::Value,
    ) -> Result<(), AppError> {
        tracing::info!("x-x-x-x Iniciando a geração do arquivo {nome_arquivo} x-x-x-x");
        let download = self.downloads_repo.criar(usuario, nome_arquivo).await?;

        match self.monta_documento_pdf(parametros).await {
            Ok(arquivo) => {
                self.downloads_repo
                    .concluir(download.uuid, nome_arquivo, &arquivo)
                    .await?;
            }
            Err(erro) => {
                self.downloads_repo
                    .registrar_erro(download.uuid, &mensagem_de_erro(&erro))
                    .await?;
            }
        }

        tracing::info!("x-x-x-x Finaliza a geração do arquivo {nome_arquivo} x-x-x-x");
        Ok(())
    }

    /// Versão planilha: as linhas planas em vez do relatório agregado.
    pub async fn gera_xlsx_relatorio_historico_dietas_async(
        &self,
        usuario: &str,
        nome_arquivo: &str,
        parametros: &serde_json::Value,
    ) -> Result<(), AppError> {
        tracing::info!("x-x-x-x Iniciando a geração do arquivo {nome_arquivo} x-x-x-x");
        let download = self.downloads_repo.criar(usuario, nome_arquivo).await?;

        match self.monta_documento_xlsx(parametros).await {
            Ok(arquivo) => {
                self.downloads_repo
                    .concluir(download.uuid, nome_arquivo, &arquivo)
                    .await?;
            }
            Err(erro) => {
                self.downloads_repo
                    .registrar_erro(download.uuid, &mensagem_de_erro(&erro))
                    .await?;
            }
        }

        tracing::info!("x-x-x-x Finaliza a geração do arquivo {nome_arquivo} x-x-x-x");
        Ok(())
    }

    // O PDF recebe o relatório agregado com os períodos combinados, mais o
    // título com destaques. As linhas planas servem só para o título.
    async fn monta_documento_pdf(
        &self,
        parametros: &serde_json::Value,
    ) -> Result<Vec<u8>, AppError> {
        let query_params = ParametrosConsulta::from_json(parametros)?;
        let (filtros, _) = gerar_filtros_relatorio_historico(&query_params)?;

        let logs = self
            .relatorio_service
            .get_logs_historico_dietas(&filtros, true)
            .await?;
        let linhas = formata_logs_para_exportacao(&logs);
        let subtitulo = self
            .titulo_service
            .build_titulo(&linhas, &query_params, true)
            .await?;

        let relatorio = self
            .relatorio_service
            .gera_dicionario_historico_dietas(&filtros)
            .await?;
        let reestruturado = reestruturar_resultados(&relatorio);

        let documento = json!({
            "titulo": subtitulo,
            "dados": reestruturado,
        });
        serde_json::to_vec_pretty(&documento)
            .map_err(|e| anyhow!("falha ao serializar o documento do PDF: {e}").into())
    }

    // A planilha é montada só com as linhas planas, na ordem da consulta.
    async fn monta_documento_xlsx(
        &self,
        parametros: &serde_json::Value,
    ) -> Result<Vec<u8>, AppError> {
        let query_params = ParametrosConsulta::from_json(parametros)?;
        let (filtros, _) = gerar_filtros_relatorio_historico(&query_params)?;

        let logs = self
            .relatorio_service
            .get_logs_historico_dietas(&filtros, true)
            .await?;
        let linhas = formata_logs_para_exportacao(&logs);
        let titulo = self
            .titulo_service
            .build_titulo(&linhas, &query_params, false)
            .await?;

        let documento = json!({
            "titulo": titulo,
            "linhas": linhas,
        });
        serde_json::to_vec_pretty(&documento)
            .map_err(|e| anyhow!("falha ao serializar o documento da planilha: {e}").into())
    }
}
