// src/models/dietas.rs

use chrono::NaiveDate;
use sqlx::FromRow;

// Agrupamentos de tipo de unidade escolar usados pelo relatório. Cada grupo
// tem uma regra própria de contagem e de formatação dos períodos.
pub const TIPOS_UNIDADE_CEI: [&str; 6] =
    ["CEI DIRET", "CEU CEI", "CEI", "CCI", "CCI/CIPS", "CEI CEU"];

pub const TIPOS_UNIDADE_CEMEI: [&str; 2] = ["CEMEI", "CEU CEMEI"];

pub const TIPOS_UNIDADE_EMEI_EMEF_CIEJA: [&str; 6] =
    ["EMEI", "CEU EMEI", "EMEF", "CEU EMEF", "EMEFM", "CIEJA"];

pub const TIPOS_UNIDADE_SEM_PERIODOS: [&str; 2] = ["CMCT", "CEU GESTAO"];

/// Grupo de unidade escolar, derivado das iniciais do tipo de unidade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrupoUnidade {
    Cei,
    Cemei,
    EmeiEmefCieja,
    Emebs,
    SemPeriodos,
    /// Tipos fora dos grupos do relatório; não contribuem para as contagens.
    Outras,
}

impl GrupoUnidade {
    pub fn from_iniciais(iniciais: &str) -> Self {
        if TIPOS_UNIDADE_CEI.contains(&iniciais) {
            GrupoUnidade::Cei
        } else if TIPOS_UNIDADE_CEMEI.contains(&iniciais) {
            GrupoUnidade::Cemei
        } else if TIPOS_UNIDADE_EMEI_EMEF_CIEJA.contains(&iniciais) {
            GrupoUnidade::EmeiEmefCieja
        } else if iniciais == "EMEBS" {
            GrupoUnidade::Emebs
        } else if TIPOS_UNIDADE_SEM_PERIODOS.contains(&iniciais) {
            GrupoUnidade::SemPeriodos
        } else {
            GrupoUnidade::Outras
        }
    }
}

/// Linha agregada (agrupada e somada) das consultas ao histórico de dietas.
/// As duas consultas (tabela CEI e tabela comum) produzem o mesmo conjunto de
/// colunas; nas linhas da tabela comum a faixa etária vem nula e nas da
/// tabela CEI vêm nulas as marcações de turma.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct LogDietaRecord {
    pub nome_escola: String,
    pub tipo_unidade: String,
    pub lote: String,
    pub dre: String,
    pub nome_classificacao: String,
    pub nome_periodo_escolar: Option<String>,
    pub infantil_ou_fundamental: Option<String>,
    pub cei_ou_emei: Option<String>,
    pub faixa_inicio: Option<i32>,
    pub faixa_fim: Option<i32>,
    pub data: NaiveDate,
    pub quantidade_total: i64,
}

impl LogDietaRecord {
    pub fn grupo(&self) -> GrupoUnidade {
        GrupoUnidade::from_iniciais(&self.tipo_unidade)
    }
}
