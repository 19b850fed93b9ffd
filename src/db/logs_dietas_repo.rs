// src/db/logs_dietas_repo.rs

use anyhow::anyhow;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    models::{
        dietas::{
            LogDietaRecord, TIPOS_UNIDADE_CEI, TIPOS_UNIDADE_CEMEI, TIPOS_UNIDADE_SEM_PERIODOS,
        },
        relatorio::{
            Filtros, ValorFiltro, FILTRO_CLASSIFICACAO_ID_IN, FILTRO_DATA_ANO, FILTRO_DATA_DIA,
            FILTRO_DATA_MES, FILTRO_ESCOLA_UUID_IN, FILTRO_LOTE_UUID,
            FILTRO_PERIODO_ESCOLAR_UUID_IN, FILTRO_QUANTIDADE_GT, FILTRO_TIPO_GESTAO_UUID,
            FILTRO_TIPO_UNIDADE_UUID_IN,
        },
    },
};

// Repositório das duas tabelas de log de dietas autorizadas. As consultas
// agrupam e somam as quantidades; a agregação por escola acontece depois,
// em memória.
#[derive(Clone)]
pub struct LogsDietasRepository {
    pool: PgPool,
}

impl LogsDietasRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Linhas agregadas da tabela CEI (recorte por faixa etária), restrita
    /// às escolas dos grupos CEI e CEMEI.
    pub async fn dados_dietas_escolas_cei(
        &self,
        filtros: &Filtros,
        eh_exportacao: bool,
    ) -> Result<Vec<LogDietaRecord>, AppError> {
        let mut consulta = consulta_dietas_cei(filtros, eh_exportacao)?;
        let registros = consulta
            .build_query_as::<LogDietaRecord>()
            .fetch_all(&self.pool)
            .await?;
        Ok(registros)
    }

    /// Linhas agregadas da tabela comum (demais tipos de unidade e linhas de
    /// turma), já sem as linhas que duplicariam contagens.
    pub async fn dados_dietas_escolas_comuns(
        &self,
        filtros: &Filtros,
        eh_exportacao: bool,
    ) -> Result<Vec<LogDietaRecord>, AppError> {
        let mut consulta = consulta_dietas_comuns(filtros, eh_exportacao)?;
        let registros = consulta
            .build_query_as::<LogDietaRecord>()
            .fetch_all(&self.pool)
            .await?;
        Ok(registros)
    }
}

fn tipos_cei_e_cemei() -> Vec<String> {
    TIPOS_UNIDADE_CEI
        .iter()
        .chain(TIPOS_UNIDADE_CEMEI.iter())
        .map(|tipo| tipo.to_string())
        .collect()
}

fn consulta_dietas_cei(
    filtros: &Filtros,
    eh_exportacao: bool,
) -> Result<QueryBuilder<'static, Postgres>, AppError> {
    let mut consulta = QueryBuilder::new(
        r#"SELECT e.nome AS nome_escola,
       tu.iniciais AS tipo_unidade,
       COALESCE(lo.nome, '') AS lote,
       dre.iniciais AS dre,
       c.nome AS nome_classificacao,
       pe.nome AS nome_periodo_escolar,
       NULL::text AS infantil_ou_fundamental,
       NULL::text AS cei_ou_emei,
       fe.inicio AS faixa_inicio,
       fe.fim AS faixa_fim,
       l.data::date AS data,
       SUM(l.quantidade)::bigint AS quantidade_total
FROM log_quantidade_dietas_autorizadas_cei l
JOIN escola e ON e.id = l.escola_id
JOIN tipo_unidade_escolar tu ON tu.id = e.tipo_unidade_id
LEFT JOIN lote lo ON lo.id = e.lote_id
JOIN diretoria_regional dre ON dre.id = e.diretoria_regional_id
JOIN classificacao_dieta c ON c.id = l.classificacao_id
LEFT JOIN periodo_escolar pe ON pe.id = l.periodo_escolar_id
LEFT JOIN faixa_etaria fe ON fe.id = l.faixa_etaria_id
LEFT JOIN tipo_gestao tg ON tg.id = e.tipo_gestao_id
WHERE tu.iniciais = ANY("#,
    );
    consulta.push_bind(tipos_cei_e_cemei()).push(")");

    if eh_exportacao {
        consulta.push(" AND l.faixa_etaria_id IS NOT NULL");
    }

    aplicar_filtros(&mut consulta, filtros)?;

    consulta.push(
        r#"
GROUP BY e.id, tu.iniciais, lo.nome, dre.iniciais, c.nome, pe.nome, fe.inicio, fe.fim, l.data::date
ORDER BY e.nome, c.nome, pe.nome, fe.inicio"#,
    );

    Ok(consulta)
}

fn consulta_dietas_comuns(
    filtros: &Filtros,
    eh_exportacao: bool,
) -> Result<QueryBuilder<'static, Postgres>, AppError> {
    let mut consulta = QueryBuilder::new(
        r#"SELECT e.nome AS nome_escola,
       tu.iniciais AS tipo_unidade,
       COALESCE(lo.nome, '') AS lote,
       dre.iniciais AS dre,
       c.nome AS nome_classificacao,
       pe.nome AS nome_periodo_escolar,
       l.infantil_ou_fundamental AS infantil_ou_fundamental,
       l.cei_ou_emei AS cei_ou_emei,
       NULL::int AS faixa_inicio,
       NULL::int AS faixa_fim,
       l.data::date AS data,
       SUM(l.quantidade)::bigint AS quantidade_total
FROM log_quantidade_dietas_autorizadas l
JOIN escola e ON e.id = l.escola_id
JOIN tipo_unidade_escolar tu ON tu.id = e.tipo_unidade_id
LEFT JOIN lote lo ON lo.id = e.lote_id
JOIN diretoria_regional dre ON dre.id = e.diretoria_regional_id
JOIN classificacao_dieta c ON c.id = l.classificacao_id
LEFT JOIN periodo_escolar pe ON pe.id = l.periodo_escolar_id
LEFT JOIN tipo_gestao tg ON tg.id = e.tipo_gestao_id
WHERE NOT (
      (tu.iniciais = 'EMEBS' AND pe.nome IS NULL AND l.infantil_ou_fundamental <> 'N/A')
   OR (tu.iniciais = ANY("#,
    );

    // Linhas por turma do CEMEI no período INTEGRAL duplicariam as linhas
    // dedicadas da tabela CEI; as linhas N/A do total da escola ficam.
    consulta
        .push_bind(
            TIPOS_UNIDADE_CEMEI
                .iter()
                .map(|tipo| tipo.to_string())
                .collect::<Vec<_>>(),
        )
        .push(") AND pe.nome = 'INTEGRAL' AND l.cei_ou_emei IN ('CEI', 'EMEI'))\n)");

    if eh_exportacao {
        consulta.push(" AND (pe.nome IS NOT NULL OR tu.iniciais = ANY(");
        consulta
            .push_bind(
                TIPOS_UNIDADE_SEM_PERIODOS
                    .iter()
                    .map(|tipo| tipo.to_string())
                    .collect::<Vec<_>>(),
            )
            .push("))");
    }

    aplicar_filtros(&mut consulta, filtros)?;

    consulta.push(
        r#"
GROUP BY e.id, tu.iniciais, lo.nome, dre.iniciais, c.nome, pe.nome, l.infantil_ou_fundamental, l.cei_ou_emei, l.data::date
ORDER BY e.nome, c.nome, pe.nome"#,
    );

    Ok(consulta)
}

// Traduz as chaves de filtro para as colunas das consultas. As duas
// consultas usam os mesmos aliases de junção, então a tradução é uma só.
fn aplicar_filtros(
    consulta: &mut QueryBuilder<'static, Postgres>,
    filtros: &Filtros,
) -> Result<(), AppError> {
    for (chave, valor) in filtros {
        match (chave.as_str(), valor) {
            (FILTRO_ESCOLA_UUID_IN, ValorFiltro::ListaUuids(uuids)) => {
                consulta
                    .push(" AND e.uuid = ANY(")
                    .push_bind(uuids.clone())
                    .push(")");
            }
            (FILTRO_TIPO_UNIDADE_UUID_IN, ValorFiltro::ListaUuids(uuids)) => {
                consulta
                    .push(" AND tu.uuid = ANY(")
                    .push_bind(uuids.clone())
                    .push(")");
            }
            (FILTRO_PERIODO_ESCOLAR_UUID_IN, ValorFiltro::ListaUuids(uuids)) => {
                consulta
                    .push(" AND pe.uuid = ANY(")
                    .push_bind(uuids.clone())
                    .push(")");
            }
            (FILTRO_CLASSIFICACAO_ID_IN, ValorFiltro::ListaInteiros(ids)) => {
                consulta
                    .push(" AND c.id = ANY(")
                    .push_bind(ids.clone())
                    .push(")");
            }
            (FILTRO_TIPO_GESTAO_UUID, ValorFiltro::Uuid(uuid)) => {
                consulta.push(" AND tg.uuid = ").push_bind(*uuid);
            }
            (FILTRO_LOTE_UUID, ValorFiltro::Uuid(uuid)) => {
                consulta.push(" AND lo.uuid = ").push_bind(*uuid);
            }
            (FILTRO_DATA_DIA, ValorFiltro::Inteiro(dia)) => {
                consulta
                    .push(" AND EXTRACT(DAY FROM l.data) = ")
                    .push_bind(*dia);
            }
            (FILTRO_DATA_MES, ValorFiltro::Inteiro(mes)) => {
                consulta
                    .push(" AND EXTRACT(MONTH FROM l.data) = ")
                    .push_bind(*mes);
            }
            (FILTRO_DATA_ANO, ValorFiltro::Inteiro(ano)) => {
                consulta
                    .push(" AND EXTRACT(YEAR FROM l.data) = ")
                    .push_bind(*ano);
            }
            (FILTRO_QUANTIDADE_GT, ValorFiltro::Inteiro(minimo)) => {
                consulta.push(" AND l.quantidade > ").push_bind(*minimo);
            }
            (outra, _) => {
                return Err(anyhow!("filtro não suportado na consulta de dietas: {outra}").into());
            }
        }
    }
    Ok(())
}
