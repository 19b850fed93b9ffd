// src/models/relatorio.rs

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

// --- 1. Filtros da camada de consulta ---

// Chaves no vocabulário da camada de armazenamento. O construtor de filtros
// traduz os parâmetros HTTP para estas chaves; o repositório traduz as
// chaves para SQL.
pub const FILTRO_ESCOLA_UUID_IN: &str = "escola__uuid__in";
pub const FILTRO_TIPO_UNIDADE_UUID_IN: &str = "escola__tipo_unidade__uuid__in";
pub const FILTRO_PERIODO_ESCOLAR_UUID_IN: &str = "periodo_escolar__uuid__in";
pub const FILTRO_CLASSIFICACAO_ID_IN: &str = "classificacao__id__in";
pub const FILTRO_TIPO_GESTAO_UUID: &str = "escola__tipo_gestao__uuid";
pub const FILTRO_LOTE_UUID: &str = "escola__lote__uuid";
pub const FILTRO_DATA_DIA: &str = "data__day";
pub const FILTRO_DATA_MES: &str = "data__month";
pub const FILTRO_DATA_ANO: &str = "data__year";
pub const FILTRO_QUANTIDADE_GT: &str = "quantidade__gt";

#[derive(Debug, Clone, PartialEq)]
pub enum ValorFiltro {
    Inteiro(i64),
    Uuid(Uuid),
    ListaUuids(Vec<Uuid>),
    ListaInteiros(Vec<i64>),
}

/// Filtros prontos para a camada de consulta, em ordem estável de chave.
pub type Filtros = BTreeMap<String, ValorFiltro>;

// --- 2. Acumuladores da agregação ---

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FaixaAutorizadas {
    pub faixa: String,
    pub autorizadas: i64,
}

/// Contadores de uma classificação de dieta dentro de uma escola. Cada grupo
/// de unidade escreve nos contadores que lhe dizem respeito:
/// `infantil`/`fundamental` (EMEBS), `periodos` (EMEI/EMEF/CIEJA),
/// `turma_infantil`/`por_idade` (CEMEI) e `faixa_etaria` (CEI).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContadoresClassificacao {
    pub infantil: BTreeMap<String, i64>,
    pub fundamental: BTreeMap<String, i64>,
    pub periodos: BTreeMap<String, i64>,
    pub por_idade: BTreeMap<String, Vec<FaixaAutorizadas>>,
    pub turma_infantil: BTreeMap<String, i64>,
    pub faixa_etaria: BTreeMap<String, Vec<FaixaAutorizadas>>,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EscolaAcumulada {
    pub tipo_unidade: String,
    pub lote: String,
    pub data: NaiveDate,
    pub classificacoes: BTreeMap<String, ContadoresClassificacao>,
}

// --- 3. Relatório formatado (saída da API) ---

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PeriodoAutorizadas {
    pub periodo: String,
    pub autorizadas: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PeriodoFaixas {
    pub periodo: String,
    pub faixa_etaria: Vec<FaixaAutorizadas>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PeriodosEmebs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infantil: Option<Vec<PeriodoAutorizadas>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fundamental: Option<Vec<PeriodoAutorizadas>>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PeriodosCemei {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turma_infantil: Option<Vec<PeriodoAutorizadas>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub por_idade: Option<Vec<PeriodoFaixas>>,
}

/// Forma do campo `periodos` de cada linha do relatório, que varia com o
/// grupo da unidade: dicionário por turma (EMEBS), lista simples
/// (EMEI/EMEF/CIEJA), dicionário turma/faixa (CEMEI) ou lista de faixas por
/// período (CEI).
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum PeriodosResultado {
    Emebs(PeriodosEmebs),
    Cemei(PeriodosCemei),
    Lista(Vec<PeriodoAutorizadas>),
    PorFaixa(Vec<PeriodoFaixas>),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResultadoDieta {
    pub data: NaiveDate,
    pub lote: String,
    pub unidade_educacional: String,
    pub tipo_unidade: String,
    pub classificacao: String,
    pub total: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periodos: Option<PeriodosResultado>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RelatorioHistoricoDietas {
    pub total_dietas: i64,
    pub resultados: Vec<ResultadoDieta>,
}

// --- 4. Linhas planas da exportação ---

/// Linha da planilha/tabela de exportação, uma por registro agregado da
/// consulta em modo exportação.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LinhaExportacao {
    pub lote_dre: String,
    pub unidade_educacional: String,
    pub classificacao_da_dieta: String,
    pub periodo: Option<String>,
    pub faixa_etaria: String,
    pub dietas_autorizadas: i64,
    pub data_de_referencia: String,
}

// --- 5. Relatório reestruturado para o PDF ---

// O PDF combina, por período, os contadores que o relatório na tela mantém
// separados (turma infantil x faixas no CEMEI, infantil x fundamental no
// EMEBS).

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PeriodoCombinadoCemei {
    pub periodo: String,
    pub autorizadas_infantil: i64,
    pub por_idade: Vec<FaixaAutorizadas>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PeriodoCombinadoEmebs {
    pub periodo: String,
    pub autorizadas_infantil: i64,
    pub autorizadas_fundamental: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum PeriodosReestruturados {
    Cemei(Vec<PeriodoCombinadoCemei>),
    Emebs(Vec<PeriodoCombinadoEmebs>),
    Original(PeriodosResultado),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResultadoReestruturado {
    pub data: NaiveDate,
    pub lote: String,
    pub unidade_educacional: String,
    pub tipo_unidade: String,
    pub classificacao: String,
    pub total: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periodos: Option<PeriodosReestruturados>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RelatorioHistoricoReestruturado {
    pub total_dietas: i64,
    pub resultados: Vec<ResultadoReestruturado>,
}
