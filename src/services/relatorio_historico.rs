// src/services/relatorio_historico.rs
//
// Da requisição ao relatório: traduz os parâmetros de consulta em filtros
// tipados, busca as duas tabelas de log e entrega o relatório agregado.

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::{
    common::{
        error::{erro_validacao, AppError},
        parametros::ParametrosConsulta,
    },
    db::LogsDietasRepository,
    models::{
        dietas::LogDietaRecord,
        relatorio::{
            Filtros, RelatorioHistoricoDietas, ValorFiltro, FILTRO_CLASSIFICACAO_ID_IN,
            FILTRO_DATA_ANO, FILTRO_DATA_DIA, FILTRO_DATA_MES, FILTRO_ESCOLA_UUID_IN,
            FILTRO_LOTE_UUID, FILTRO_PERIODO_ESCOLAR_UUID_IN, FILTRO_QUANTIDADE_GT,
            FILTRO_TIPO_GESTAO_UUID, FILTRO_TIPO_UNIDADE_UUID_IN,
        },
    },
    services::historico_dietas::{
        formatar_informacoes_historico_dietas, transformar_dados_escolas,
    },
};

pub const PARAM_UNIDADES: &str = "unidades_educacionais_selecionadas[]";
pub const PARAM_TIPOS_UNIDADES: &str = "tipos_unidades_selecionadas[]";
pub const PARAM_PERIODOS: &str = "periodos_escolares_selecionadas[]";
pub const PARAM_CLASSIFICACOES: &str = "classificacoes_selecionadas[]";
pub const PARAM_TIPO_GESTAO: &str = "tipo_gestao";
pub const PARAM_LOTE: &str = "lote";
pub const PARAM_DATA: &str = "data";

/// Monta os filtros da consulta de histórico a partir dos parâmetros da
/// requisição e devolve também a data crua, usada no título do relatório.
///
/// `data` é obrigatória no formato dd/mm/YYYY e vira três filtros separados
/// de dia, mês e ano, porque a coluna armazenada é um timestamp e a hora não
/// pode influenciar a comparação. Filtros opcionais vazios são descartados;
/// `quantidade__gt: 0` entra sempre.
pub fn gerar_filtros_relatorio_historico(
    query_params: &ParametrosConsulta,
) -> Result<(Filtros, String), AppError> {
    let mut filtros = Filtros::new();

    let unidades = uuids_do_parametro(query_params, PARAM_UNIDADES)?;
    if !unidades.is_empty() {
        filtros.insert(
            FILTRO_ESCOLA_UUID_IN.to_string(),
            ValorFiltro::ListaUuids(unidades),
        );
    }

    let tipos_unidades = uuids_do_parametro(query_params, PARAM_TIPOS_UNIDADES)?;
    if !tipos_unidades.is_empty() {
        filtros.insert(
            FILTRO_TIPO_UNIDADE_UUID_IN.to_string(),
            ValorFiltro::ListaUuids(tipos_unidades),
        );
    }

    let periodos = uuids_do_parametro(query_params, PARAM_PERIODOS)?;
    if !periodos.is_empty() {
        filtros.insert(
            FILTRO_PERIODO_ESCOLAR_UUID_IN.to_string(),
            ValorFiltro::ListaUuids(periodos),
        );
    }

    let classificacoes = inteiros_do_parametro(query_params, PARAM_CLASSIFICACOES)?;
    if !classificacoes.is_empty() {
        filtros.insert(
            FILTRO_CLASSIFICACAO_ID_IN.to_string(),
            ValorFiltro::ListaInteiros(classificacoes),
        );
    }

    if let Some(tipo_gestao) = uuid_do_parametro(query_params, PARAM_TIPO_GESTAO)? {
        filtros.insert(
            FILTRO_TIPO_GESTAO_UUID.to_string(),
            ValorFiltro::Uuid(tipo_gestao),
        );
    }

    if let Some(lote) = uuid_do_parametro(query_params, PARAM_LOTE)? {
        filtros.insert(FILTRO_LOTE_UUID.to_string(), ValorFiltro::Uuid(lote));
    }

    let data = query_params
        .get(PARAM_DATA)
        .filter(|valor| !valor.is_empty())
        .ok_or_else(|| erro_validacao(PARAM_DATA, "Data é um parâmetro obrigatório"))?;
    let data_formatada = NaiveDate::parse_from_str(data, "%d/%m/%Y").map_err(|_| {
        erro_validacao(
            PARAM_DATA,
            &format!("A data {data} não corresponde ao formato esperado 'dd/mm/YYYY'."),
        )
    })?;
    filtros.insert(
        FILTRO_DATA_DIA.to_string(),
        ValorFiltro::Inteiro(i64::from(data_formatada.day())),
    );
    filtros.insert(
        FILTRO_DATA_MES.to_string(),
        ValorFiltro::Inteiro(i64::from(data_formatada.month())),
    );
    filtros.insert(
        FILTRO_DATA_ANO.to_string(),
        ValorFiltro::Inteiro(i64::from(data_formatada.year())),
    );

    filtros.insert(FILTRO_QUANTIDADE_GT.to_string(), ValorFiltro::Inteiro(0));

    Ok((filtros, data.to_string()))
}

fn uuids_do_parametro(
    query_params: &ParametrosConsulta,
    chave: &str,
) -> Result<Vec<Uuid>, AppError> {
    query_params
        .getlist(chave)
        .iter()
        .map(|valor| {
            Uuid::parse_str(valor)
                .map_err(|_| erro_validacao(chave, &format!("O valor {valor} não é um UUID válido.")))
        })
        .collect()
}

fn uuid_do_parametro(
    query_params: &ParametrosConsulta,
    chave: &str,
) -> Result<Option<Uuid>, AppError> {
    match query_params.get(chave).filter(|valor| !valor.is_empty()) {
        Some(valor) => Uuid::parse_str(valor)
            .map(Some)
            .map_err(|_| erro_validacao(chave, &format!("O valor {valor} não é um UUID válido."))),
        None => Ok(None),
    }
}

fn inteiros_do_parametro(
    query_params: &ParametrosConsulta,
    chave: &str,
) -> Result<Vec<i64>, AppError> {
    query_params
        .getlist(chave)
        .iter()
        .map(|valor| {
            valor.parse::<i64>().map_err(|_| {
                erro_validacao(chave, &format!("O valor {valor} não é um número inteiro."))
            })
        })
        .collect()
}

// As linhas CEI entram antes das comuns; a ordenação estável por nome de
// escola preserva esse desempate dentro de cada escola.
fn ordenar_logs_por_escola(
    logs_cei: Vec<LogDietaRecord>,
    logs_comuns: Vec<LogDietaRecord>,
) -> Vec<LogDietaRecord> {
    let mut logs = logs_cei;
    logs.extend(logs_comuns);
    logs.sort_by(|a, b| a.nome_escola.cmp(&b.nome_escola));
    logs
}

/// Serviço do relatório de histórico de dietas autorizadas.
#[derive(Clone)]
pub struct RelatorioHistoricoService {
    logs_repo: LogsDietasRepository,
}

impl RelatorioHistoricoService {
    pub fn new(logs_repo: LogsDietasRepository) -> Self {
        Self { logs_repo }
    }

    /// Linhas agregadas das duas tabelas de log, ordenadas por escola.
    pub async fn get_logs_historico_dietas(
        &self,
        filtros: &Filtros,
        eh_exportacao: bool,
    ) -> Result<Vec<LogDietaRecord>, AppError> {
        let logs_cei = self
            .logs_repo
            .dados_dietas_escolas_cei(filtros, eh_exportacao)
            .await?;
        let logs_comuns = self
            .logs_repo
            .dados_dietas_escolas_comuns(filtros, eh_exportacao)
            .await?;
        Ok(ordenar_logs_por_escola(logs_cei, logs_comuns))
    }

    /// Relatório agregado na forma que a tela consome.
    pub async fn gera_dicionario_historico_dietas(
        &self,
        filtros: &Filtros,
    ) -> Result<RelatorioHistoricoDietas, AppError> {
        let periodo_escolar_selecionado = filtros.contains_key(FILTRO_PERIODO_ESCOLAR_UUID_IN);
        let logs = self.get_logs_historico_dietas(filtros, false).await?;
        let (escolas, total_dietas) =
            transformar_dados_escolas(&logs, periodo_escolar_selecionado);
        Ok(formatar_informacoes_historico_dietas(escolas, total_dietas))
    }
}
