// src/services/historico_dietas.rs
//
// Agregação em memória do histórico de dietas autorizadas. As linhas já vêm
// agrupadas e somadas do banco; aqui elas viram um acumulador por escola e
// classificação, com uma regra de contagem por grupo de unidade, e depois o
// relatório formatado que a tela e os arquivos consomem.

use std::collections::BTreeMap;

use crate::{
    models::{
        dietas::{GrupoUnidade, LogDietaRecord},
        relatorio::{
            ContadoresClassificacao, EscolaAcumulada, FaixaAutorizadas, PeriodoAutorizadas,
            PeriodoFaixas, PeriodosCemei, PeriodosEmebs, PeriodosResultado,
            RelatorioHistoricoDietas, ResultadoDieta,
        },
    },
    services::faixa_etaria::faixa_to_string,
};

/// Acumula os registros por escola e classificação e devolve o total geral
/// de dietas. Cada registro passa pela regra do grupo da sua unidade, que
/// escreve nos contadores e responde com quanto contribui para o total.
pub fn transformar_dados_escolas(
    logs: &[LogDietaRecord],
    periodo_escolar_selecionado: bool,
) -> (BTreeMap<String, EscolaAcumulada>, i64) {
    let mut escolas: BTreeMap<String, EscolaAcumulada> = BTreeMap::new();
    let mut total_dietas = 0;

    for log in logs {
        let escola = escolas
            .entry(log.nome_escola.clone())
            .or_insert_with(|| EscolaAcumulada {
                tipo_unidade: log.tipo_unidade.clone(),
                lote: log.lote.clone(),
                data: log.data,
                classificacoes: BTreeMap::new(),
            });
        escola.tipo_unidade = log.tipo_unidade.clone();
        escola.lote = log.lote.clone();
        escola.data = log.data;

        let contadores = escola
            .classificacoes
            .entry(log.nome_classificacao.clone())
            .or_default();

        total_dietas += aplicar_log(contadores, log, periodo_escolar_selecionado);
    }

    (escolas, total_dietas)
}

fn aplicar_log(
    contadores: &mut ContadoresClassificacao,
    log: &LogDietaRecord,
    periodo_escolar_selecionado: bool,
) -> i64 {
    match log.grupo() {
        GrupoUnidade::Emebs => somar_emebs(contadores, log, periodo_escolar_selecionado),
        GrupoUnidade::EmeiEmefCieja => {
            somar_emei_emef_cieja(contadores, log, periodo_escolar_selecionado)
        }
        GrupoUnidade::SemPeriodos => somar_sem_periodos(contadores, log),
        GrupoUnidade::Cei => somar_cei(contadores, log),
        GrupoUnidade::Cemei => somar_cemei(contadores, log, periodo_escolar_selecionado),
        GrupoUnidade::Outras => 0,
    }
}

// Linha de total da escola: sem período e com as duas marcações em N/A.
fn marcacoes_n_a(log: &LogDietaRecord) -> bool {
    log.infantil_ou_fundamental.as_deref() == Some("N/A")
        && log.cei_ou_emei.as_deref() == Some("N/A")
}

fn periodo_ou_n_a(log: &LogDietaRecord) -> String {
    log.nome_periodo_escolar
        .clone()
        .unwrap_or_else(|| "N/A".to_string())
}

// EMEBS: as linhas por período alimentam os quadros infantil/fundamental e
// só entram no total quando há filtro de período; fora isso o total vem da
// linha N/A da escola inteira.
fn somar_emebs(
    contadores: &mut ContadoresClassificacao,
    log: &LogDietaRecord,
    periodo_escolar_selecionado: bool,
) -> i64 {
    let quantidade = log.quantidade_total;

    if let Some(periodo) = &log.nome_periodo_escolar {
        let turma = if log.infantil_ou_fundamental.as_deref() == Some("FUNDAMENTAL") {
            &mut contadores.fundamental
        } else {
            &mut contadores.infantil
        };
        *turma.entry(periodo.clone()).or_insert(0) += quantidade;

        if periodo_escolar_selecionado {
            contadores.total += quantidade;
            return quantidade;
        }
        return 0;
    }

    if marcacoes_n_a(log) {
        contadores.total += quantidade;
        return quantidade;
    }
    0
}

// EMEI/EMEF/CIEJA: mesma regra do EMEBS, com um quadro único de períodos.
fn somar_emei_emef_cieja(
    contadores: &mut ContadoresClassificacao,
    log: &LogDietaRecord,
    periodo_escolar_selecionado: bool,
) -> i64 {
    let quantidade = log.quantidade_total;

    if let Some(periodo) = &log.nome_periodo_escolar {
        *contadores.periodos.entry(periodo.clone()).or_insert(0) += quantidade;

        if periodo_escolar_selecionado {
            contadores.total += quantidade;
            return quantidade;
        }
        return 0;
    }

    if marcacoes_n_a(log) {
        contadores.total += quantidade;
        return quantidade;
    }
    0
}

// CMCT/CEU GESTAO não têm períodos: toda linha soma direto no total.
fn somar_sem_periodos(contadores: &mut ContadoresClassificacao, log: &LogDietaRecord) -> i64 {
    contadores.total += log.quantidade_total;
    log.quantidade_total
}

// CEI: linhas com faixa viram o detalhamento por período; só MANHA e TARDE
// somam no total, porque o INTEGRAL já chega somado na linha sem faixa.
fn somar_cei(contadores: &mut ContadoresClassificacao, log: &LogDietaRecord) -> i64 {
    let quantidade = log.quantidade_total;

    match (log.faixa_inicio, log.faixa_fim) {
        (Some(inicio), Some(fim)) => {
            let periodo = periodo_ou_n_a(log);
            contadores
                .faixa_etaria
                .entry(periodo.clone())
                .or_default()
                .push(FaixaAutorizadas {
                    faixa: faixa_to_string(inicio, fim),
                    autorizadas: quantidade,
                });

            if periodo == "MANHA" || periodo == "TARDE" {
                contadores.total += quantidade;
                return quantidade;
            }
            0
        }
        _ => {
            contadores.total += quantidade;
            quantidade
        }
    }
}

// CEMEI mistura os dois mundos: faixas da tabela CEI, turmas da tabela
// comum e as linhas de total das duas. A ordem dos casos desambigua.
fn somar_cemei(
    contadores: &mut ContadoresClassificacao,
    log: &LogDietaRecord,
    periodo_escolar_selecionado: bool,
) -> i64 {
    let quantidade = log.quantidade_total;

    if let (Some(inicio), Some(fim)) = (log.faixa_inicio, log.faixa_fim) {
        contadores
            .por_idade
            .entry(periodo_ou_n_a(log))
            .or_default()
            .push(FaixaAutorizadas {
                faixa: faixa_to_string(inicio, fim),
                autorizadas: quantidade,
            });
        return 0;
    }

    // Linha de total vinda da tabela CEI: sem faixa e sem marcações.
    if log.infantil_ou_fundamental.is_none() && log.cei_ou_emei.is_none() {
        contadores.total += quantidade;
        return quantidade;
    }

    if let Some(periodo) = &log.nome_periodo_escolar {
        contadores
            .turma_infantil
            .insert(periodo.clone(), quantidade);

        if periodo_escolar_selecionado {
            contadores.total += quantidade;
            return quantidade;
        }
        return 0;
    }

    if marcacoes_n_a(log) {
        contadores.total += quantidade;
        return quantidade;
    }
    0
}

/// Converte o acumulador na estrutura final do relatório: uma linha por par
/// escola/classificação, com o campo `periodos` na forma do grupo da
/// unidade. Escolas e classificações saem em ordem alfabética.
pub fn formatar_informacoes_historico_dietas(
    escolas: BTreeMap<String, EscolaAcumulada>,
    total_dietas: i64,
) -> RelatorioHistoricoDietas {
    let mut resultados = Vec::new();

    for (nome_escola, escola) in escolas {
        let grupo = GrupoUnidade::from_iniciais(&escola.tipo_unidade);

        for (nome_classificacao, contadores) in &escola.classificacoes {
            let periodos = match grupo {
                GrupoUnidade::Emebs => {
                    Some(PeriodosResultado::Emebs(formatar_periodos_emebs(
                        contadores,
                    )))
                }
                GrupoUnidade::EmeiEmefCieja => Some(PeriodosResultado::Lista(
                    formatar_periodos_emei_emef_cieja(contadores),
                )),
                GrupoUnidade::Cemei => {
                    Some(PeriodosResultado::Cemei(formatar_periodos_cemei(
                        contadores,
                    )))
                }
                GrupoUnidade::Cei => {
                    Some(PeriodosResultado::PorFaixa(formatar_periodos_cei(
                        contadores,
                    )))
                }
                GrupoUnidade::SemPeriodos | GrupoUnidade::Outras => None,
            };

            resultados.push(ResultadoDieta {
                data: escola.data,
                lote: escola.lote.clone(),
                unidade_educacional: nome_escola.clone(),
                tipo_unidade: escola.tipo_unidade.clone(),
                classificacao: nome_classificacao.clone(),
                total: contadores.total,
                periodos,
            });
        }
    }

    RelatorioHistoricoDietas {
        total_dietas,
        resultados,
    }
}

fn listar_periodos(somas: &BTreeMap<String, i64>) -> Option<Vec<PeriodoAutorizadas>> {
    if somas.is_empty() {
        return None;
    }
    Some(
        somas
            .iter()
            .map(|(periodo, autorizadas)| PeriodoAutorizadas {
                periodo: periodo.clone(),
                autorizadas: *autorizadas,
            })
            .collect(),
    )
}

fn listar_faixas(faixas: &BTreeMap<String, Vec<FaixaAutorizadas>>) -> Vec<PeriodoFaixas> {
    faixas
        .iter()
        .map(|(periodo, lista)| PeriodoFaixas {
            periodo: periodo.clone(),
            faixa_etaria: lista.clone(),
        })
        .collect()
}

fn formatar_periodos_emebs(contadores: &ContadoresClassificacao) -> PeriodosEmebs {
    PeriodosEmebs {
        infantil: listar_periodos(&contadores.infantil),
        fundamental: listar_periodos(&contadores.fundamental),
    }
}

fn formatar_periodos_emei_emef_cieja(
    contadores: &ContadoresClassificacao,
) -> Vec<PeriodoAutorizadas> {
    listar_periodos(&contadores.periodos).unwrap_or_default()
}

fn formatar_periodos_cemei(contadores: &ContadoresClassificacao) -> PeriodosCemei {
    let por_idade = if contadores.por_idade.is_empty() {
        None
    } else {
        Some(listar_faixas(&contadores.por_idade))
    };
    PeriodosCemei {
        turma_infantil: listar_periodos(&contadores.turma_infantil),
        por_idade,
    }
}

fn formatar_periodos_cei(contadores: &ContadoresClassificacao) -> Vec<PeriodoFaixas> {
    listar_faixas(&contadores.faixa_etaria)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn data_referencia() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 20).unwrap()
    }

    // Linha da tabela comum no formato de total da escola (sem período,
    // marcações em N/A). Os testes ajustam os campos que interessam.
    fn registro(nome_escola: &str, tipo_unidade: &str, classificacao: &str) -> LogDietaRecord {
        LogDietaRecord {
            nome_escola: nome_escola.to_string(),
            tipo_unidade: tipo_unidade.to_string(),
            lote: "LOTE 01".to_string(),
            dre: "IP".to_string(),
            nome_classificacao: classificacao.to_string(),
            nome_periodo_escolar: None,
            infantil_ou_fundamental: Some("N/A".to_string()),
            cei_ou_emei: Some("N/A".to_string()),
            faixa_inicio: None,
            faixa_fim: None,
            data: data_referencia(),
            quantidade_total: 0,
        }
    }

    fn registro_com_periodo(
        nome_escola: &str,
        tipo_unidade: &str,
        classificacao: &str,
        periodo: &str,
        quantidade: i64,
    ) -> LogDietaRecord {
        let mut log = registro(nome_escola, tipo_unidade, classificacao);
        log.nome_periodo_escolar = Some(periodo.to_string());
        log.quantidade_total = quantidade;
        log
    }

    fn registro_cei_com_faixa(
        nome_escola: &str,
        tipo_unidade: &str,
        classificacao: &str,
        periodo: Option<&str>,
        inicio: i32,
        fim: i32,
        quantidade: i64,
    ) -> LogDietaRecord {
        let mut log = registro(nome_escola, tipo_unidade, classificacao);
        log.nome_periodo_escolar = periodo.map(str::to_string);
        log.infantil_ou_fundamental = None;
        log.cei_ou_emei = None;
        log.faixa_inicio = Some(inicio);
        log.faixa_fim = Some(fim);
        log.quantidade_total = quantidade;
        log
    }

    // Linha de total da tabela CEI: sem faixa e sem marcações de turma.
    fn registro_cei_total(
        nome_escola: &str,
        tipo_unidade: &str,
        classificacao: &str,
        quantidade: i64,
    ) -> LogDietaRecord {
        let mut log = registro(nome_escola, tipo_unidade, classificacao);
        log.infantil_ou_fundamental = None;
        log.cei_ou_emei = None;
        log.quantidade_total = quantidade;
        log
    }

    #[test]
    fn emebs_sem_filtro_de_periodo_conta_pela_linha_de_total() {
        let logs = vec![
            registro_com_periodo("EMEBS HELEN KELLER", "EMEBS", "Tipo A", "MANHA", 5),
            registro_com_periodo("EMEBS HELEN KELLER", "EMEBS", "Tipo A", "TARDE", 3),
            {
                let mut log = registro("EMEBS HELEN KELLER", "EMEBS", "Tipo A");
                log.quantidade_total = 11;
                log
            },
        ];

        let (escolas, total) = transformar_dados_escolas(&logs, false);
        let contadores = &escolas["EMEBS HELEN KELLER"].classificacoes["Tipo A"];

        assert_eq!(total, 11);
        assert_eq!(contadores.total, 11);
        assert_eq!(contadores.infantil["MANHA"], 5);
        assert_eq!(contadores.infantil["TARDE"], 3);
        assert!(contadores.fundamental.is_empty());
    }

    #[test]
    fn emebs_com_filtro_de_periodo_conta_as_linhas_por_periodo() {
        let mut fundamental =
            registro_com_periodo("EMEBS HELEN KELLER", "EMEBS", "Tipo A", "MANHA", 4);
        fundamental.infantil_ou_fundamental = Some("FUNDAMENTAL".to_string());

        let logs = vec![
            registro_com_periodo("EMEBS HELEN KELLER", "EMEBS", "Tipo A", "MANHA", 5),
            fundamental,
        ];

        let (escolas, total) = transformar_dados_escolas(&logs, true);
        let contadores = &escolas["EMEBS HELEN KELLER"].classificacoes["Tipo A"];

        assert_eq!(total, 9);
        assert_eq!(contadores.total, 9);
        assert_eq!(contadores.infantil["MANHA"], 5);
        assert_eq!(contadores.fundamental["MANHA"], 4);
    }

    #[test]
    fn emei_segue_a_mesma_regra_com_quadro_unico_de_periodos() {
        let logs = vec![
            registro_com_periodo("EMEF PERICLES", "EMEF", "Tipo B", "MANHA", 7),
            registro_com_periodo("EMEF PERICLES", "EMEF", "Tipo B", "NOITE", 2),
            {
                let mut log = registro("EMEF PERICLES", "EMEF", "Tipo B");
                log.quantidade_total = 9;
                log
            },
        ];

        let (escolas, total) = transformar_dados_escolas(&logs, false);
        let contadores = &escolas["EMEF PERICLES"].classificacoes["Tipo B"];

        assert_eq!(total, 9);
        assert_eq!(contadores.periodos["MANHA"], 7);
        assert_eq!(contadores.periodos["NOITE"], 2);

        let (_, total_filtrado) = transformar_dados_escolas(&logs[..2], true);
        assert_eq!(total_filtrado, 9);
    }

    #[test]
    fn cmct_e_ceu_gestao_somam_todas_as_linhas_no_total() {
        let mut log = registro("CMCT ARICANDUVA", "CMCT", "Tipo A");
        log.quantidade_total = 6;
        let mut outro = registro_com_periodo("CMCT ARICANDUVA", "CMCT", "Tipo A", "MANHA", 4);
        outro.infantil_ou_fundamental = Some("N/A".to_string());

        let (escolas, total) = transformar_dados_escolas(&[log, outro], false);
        let contadores = &escolas["CMCT ARICANDUVA"].classificacoes["Tipo A"];

        assert_eq!(total, 10);
        assert_eq!(contadores.total, 10);
        assert!(contadores.periodos.is_empty());
    }

    #[test]
    fn cei_soma_apenas_manha_e_tarde_no_total() {
        let logs = vec![
            registro_cei_com_faixa(
                "CEI DIRET JOAO MENDES",
                "CEI DIRET",
                "Tipo B",
                Some("MANHA"),
                12,
                13,
                10,
            ),
            registro_cei_com_faixa(
                "CEI DIRET JOAO MENDES",
                "CEI DIRET",
                "Tipo B",
                Some("TARDE"),
                12,
                13,
                11,
            ),
            registro_cei_com_faixa(
                "CEI DIRET JOAO MENDES",
                "CEI DIRET",
                "Tipo B",
                Some("INTEGRAL"),
                24,
                36,
                8,
            ),
        ];

        let (escolas, total) = transformar_dados_escolas(&logs, false);
        let contadores = &escolas["CEI DIRET JOAO MENDES"].classificacoes["Tipo B"];

        assert_eq!(total, 21);
        assert_eq!(contadores.total, 21);
        assert_eq!(contadores.faixa_etaria["INTEGRAL"].len(), 1);
        assert_eq!(contadores.faixa_etaria["MANHA"][0].autorizadas, 10);
        assert_eq!(contadores.faixa_etaria["MANHA"][0].faixa, "01 ano");
    }

    #[test]
    fn cei_sem_faixa_soma_direto_no_total() {
        let log = registro_cei_total("CEI DIRET JOAO MENDES", "CEI DIRET", "Tipo B", 21);

        let (escolas, total) = transformar_dados_escolas(&[log], false);
        let contadores = &escolas["CEI DIRET JOAO MENDES"].classificacoes["Tipo B"];

        assert_eq!(total, 21);
        assert_eq!(contadores.total, 21);
        assert!(contadores.faixa_etaria.is_empty());
    }

    #[test]
    fn cemei_desambigua_os_quatro_tipos_de_linha() {
        let logs = vec![
            // (a) faixa da tabela CEI: só detalha, não soma
            registro_cei_com_faixa(
                "CEMEI PARAISOPOLIS",
                "CEMEI",
                "Tipo A",
                Some("INTEGRAL"),
                12,
                13,
                9,
            ),
            // (b) total da tabela CEI: soma
            registro_cei_total("CEMEI PARAISOPOLIS", "CEMEI", "Tipo A", 20),
            // (c) turma infantil por período: só detalha sem filtro
            registro_com_periodo("CEMEI PARAISOPOLIS", "CEMEI", "Tipo A", "INTEGRAL", 5),
            // (d) total da tabela comum: soma
            {
                let mut log = registro("CEMEI PARAISOPOLIS", "CEMEI", "Tipo A");
                log.quantidade_total = 5;
                log
            },
        ];

        let (escolas, total) = transformar_dados_escolas(&logs, false);
        let contadores = &escolas["CEMEI PARAISOPOLIS"].classificacoes["Tipo A"];

        assert_eq!(total, 25);
        assert_eq!(contadores.total, 25);
        assert_eq!(contadores.por_idade["INTEGRAL"][0].faixa, "01 ano");
        assert_eq!(contadores.turma_infantil["INTEGRAL"], 5);
    }

    #[test]
    fn cemei_com_filtro_de_periodo_soma_a_turma_infantil() {
        let logs = vec![registro_com_periodo(
            "CEMEI PARAISOPOLIS",
            "CEMEI",
            "Tipo A",
            "INTEGRAL",
            5,
        )];

        let (escolas, total) = transformar_dados_escolas(&logs, true);
        let contadores = &escolas["CEMEI PARAISOPOLIS"].classificacoes["Tipo A"];

        assert_eq!(total, 5);
        assert_eq!(contadores.total, 5);
        assert_eq!(contadores.turma_infantil["INTEGRAL"], 5);
    }

    #[test]
    fn tipos_fora_dos_grupos_nao_contribuem() {
        let mut log = registro("MOVA VILA NOVA", "MOVA", "Tipo A");
        log.quantidade_total = 50;

        let (escolas, total) = transformar_dados_escolas(&[log], false);

        assert_eq!(total, 0);
        assert_eq!(
            escolas["MOVA VILA NOVA"].classificacoes["Tipo A"].total,
            0
        );
    }

    fn logs_da_rede() -> Vec<LogDietaRecord> {
        vec![
            registro_cei_com_faixa(
                "CEI DIRET JOAO MENDES",
                "CEI DIRET",
                "Tipo B",
                Some("MANHA"),
                12,
                13,
                10,
            ),
            registro_cei_com_faixa(
                "CEI DIRET JOAO MENDES",
                "CEI DIRET",
                "Tipo B",
                Some("TARDE"),
                24,
                48,
                11,
            ),
            registro_cei_com_faixa(
                "CEMEI PARAISOPOLIS",
                "CEMEI",
                "Tipo A",
                Some("INTEGRAL"),
                12,
                13,
                9,
            ),
            registro_cei_total("CEMEI PARAISOPOLIS", "CEMEI", "Tipo A", 25),
            registro_com_periodo("CEMEI PARAISOPOLIS", "CEMEI", "Tipo A", "INTEGRAL", 5),
            registro_cei_total("CEMEI PARAISOPOLIS", "CEMEI", "Tipo B", 15),
            registro_com_periodo("EMEBS HELEN KELLER", "EMEBS", "Tipo A", "MANHA", 5),
            {
                let mut log = registro("EMEBS HELEN KELLER", "EMEBS", "Tipo A");
                log.quantidade_total = 11;
                log
            },
        ]
    }

    #[test]
    fn relatorio_completo_ordena_por_escola_e_classificacao() {
        let (escolas, total) = transformar_dados_escolas(&logs_da_rede(), false);
        let relatorio = formatar_informacoes_historico_dietas(escolas, total);

        assert_eq!(relatorio.total_dietas, 72);

        let cabecalhos: Vec<(&str, &str, i64)> = relatorio
            .resultados
            .iter()
            .map(|r| {
                (
                    r.unidade_educacional.as_str(),
                    r.classificacao.as_str(),
                    r.total,
                )
            })
            .collect();
        assert_eq!(
            cabecalhos,
            vec![
                ("CEI DIRET JOAO MENDES", "Tipo B", 21),
                ("CEMEI PARAISOPOLIS", "Tipo A", 25),
                ("CEMEI PARAISOPOLIS", "Tipo B", 15),
                ("EMEBS HELEN KELLER", "Tipo A", 11),
            ]
        );
    }

    #[test]
    fn total_geral_e_a_soma_dos_totais_das_linhas() {
        let (escolas, total) = transformar_dados_escolas(&logs_da_rede(), false);
        let relatorio = formatar_informacoes_historico_dietas(escolas, total);

        let soma: i64 = relatorio.resultados.iter().map(|r| r.total).sum();
        assert_eq!(relatorio.total_dietas, soma);
    }

    #[test]
    fn saida_serializada_e_identica_entre_execucoes() {
        let logs = logs_da_rede();

        let (escolas_a, total_a) = transformar_dados_escolas(&logs, false);
        let primeira =
            serde_json::to_string(&formatar_informacoes_historico_dietas(escolas_a, total_a))
                .unwrap();

        let (escolas_b, total_b) = transformar_dados_escolas(&logs, false);
        let segunda =
            serde_json::to_string(&formatar_informacoes_historico_dietas(escolas_b, total_b))
                .unwrap();

        assert_eq!(primeira, segunda);
    }

    #[test]
    fn formata_periodos_do_emebs_como_quadros_de_turma() {
        let logs = vec![
            registro_com_periodo("EMEBS HELEN KELLER", "EMEBS", "Tipo A", "MANHA", 5),
            {
                let mut log =
                    registro_com_periodo("EMEBS HELEN KELLER", "EMEBS", "Tipo A", "TARDE", 3);
                log.infantil_ou_fundamental = Some("FUNDAMENTAL".to_string());
                log
            },
        ];
        let (escolas, total) = transformar_dados_escolas(&logs, false);
        let relatorio = formatar_informacoes_historico_dietas(escolas, total);

        let periodos = relatorio.resultados[0].periodos.as_ref().unwrap();
        match periodos {
            PeriodosResultado::Emebs(quadros) => {
                assert_eq!(
                    quadros.infantil.as_ref().unwrap(),
                    &vec![PeriodoAutorizadas {
                        periodo: "MANHA".to_string(),
                        autorizadas: 5,
                    }]
                );
                assert_eq!(
                    quadros.fundamental.as_ref().unwrap(),
                    &vec![PeriodoAutorizadas {
                        periodo: "TARDE".to_string(),
                        autorizadas: 3,
                    }]
                );
            }
            outro => panic!("esperava quadros EMEBS, veio {outro:?}"),
        }
    }

    #[test]
    fn formata_periodos_do_cemei_com_turma_e_faixas() {
        let logs = vec![
            registro_cei_com_faixa(
                "CEMEI PARAISOPOLIS",
                "CEMEI",
                "Tipo A",
                Some("INTEGRAL"),
                12,
                13,
                9,
            ),
            registro_com_periodo("CEMEI PARAISOPOLIS", "CEMEI", "Tipo A", "INTEGRAL", 5),
        ];
        let (escolas, total) = transformar_dados_escolas(&logs, false);
        let relatorio = formatar_informacoes_historico_dietas(escolas, total);

        match relatorio.resultados[0].periodos.as_ref().unwrap() {
            PeriodosResultado::Cemei(quadros) => {
                assert_eq!(
                    quadros.turma_infantil.as_ref().unwrap()[0].autorizadas,
                    5
                );
                let por_idade = quadros.por_idade.as_ref().unwrap();
                assert_eq!(por_idade[0].periodo, "INTEGRAL");
                assert_eq!(por_idade[0].faixa_etaria[0].faixa, "01 ano");
            }
            outro => panic!("esperava quadros CEMEI, veio {outro:?}"),
        }
    }

    #[test]
    fn emebs_sem_linhas_por_periodo_serializa_periodos_vazios() {
        let mut log = registro("EMEBS HELEN KELLER", "EMEBS", "Tipo A");
        log.quantidade_total = 11;

        let (escolas, total) = transformar_dados_escolas(&[log], false);
        let relatorio = formatar_informacoes_historico_dietas(escolas, total);
        let json = serde_json::to_value(&relatorio).unwrap();

        assert_eq!(json["resultados"][0]["periodos"], serde_json::json!({}));
    }

    #[test]
    fn cmct_nao_leva_campo_de_periodos() {
        let mut log = registro("CMCT ARICANDUVA", "CMCT", "Tipo A");
        log.quantidade_total = 6;

        let (escolas, total) = transformar_dados_escolas(&[log], false);
        let relatorio = formatar_informacoes_historico_dietas(escolas, total);
        let json = serde_json::to_value(&relatorio).unwrap();

        assert!(json["resultados"][0].get("periodos").is_none());
        assert_eq!(json["resultados"][0]["total"], 6);
    }
}
