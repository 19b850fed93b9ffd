// src/services/reestruturacao.rs
//
// Reorganiza o relatório para o arquivo PDF: os quadros que a tela mantém
// separados por tipo de turma viram uma lista única por período.

use crate::models::{
    dietas::GrupoUnidade,
    relatorio::{
        PeriodoCombinadoCemei, PeriodoCombinadoEmebs, PeriodosCemei, PeriodosEmebs,
        PeriodosReestruturados, PeriodosResultado, RelatorioHistoricoDietas,
        RelatorioHistoricoReestruturado, ResultadoReestruturado,
    },
};

/// Combina turma infantil e faixas etárias do CEMEI numa lista por período.
/// Períodos da turma infantil vêm primeiro, na ordem original; períodos que
/// só existem nas faixas entram em seguida com zero autorizadas na turma.
pub fn processar_cemei(periodos: &PeriodosCemei) -> Vec<PeriodoCombinadoCemei> {
    let mut combinados: Vec<PeriodoCombinadoCemei> = Vec::new();

    if let Some(turma_infantil) = &periodos.turma_infantil {
        for item in turma_infantil {
            match combinados
                .iter_mut()
                .find(|combinado| combinado.periodo == item.periodo)
            {
                Some(existente) => existente.autorizadas_infantil = item.autorizadas,
                None => combinados.push(PeriodoCombinadoCemei {
                    periodo: item.periodo.clone(),
                    autorizadas_infantil: item.autorizadas,
                    por_idade: Vec::new(),
                }),
            }
        }
    }

    if let Some(por_idade) = &periodos.por_idade {
        for item in por_idade {
            let posicao = match combinados
                .iter()
                .position(|combinado| combinado.periodo == item.periodo)
            {
                Some(posicao) => posicao,
                None => {
                    combinados.push(PeriodoCombinadoCemei {
                        periodo: item.periodo.clone(),
                        autorizadas_infantil: 0,
                        por_idade: Vec::new(),
                    });
                    combinados.len() - 1
                }
            };
            combinados[posicao]
                .por_idade
                .extend(item.faixa_etaria.iter().cloned());
        }
    }

    combinados
}

/// Junta os quadros infantil e fundamental do EMEBS numa lista por período,
/// somando as autorizadas de cada lado.
pub fn processar_emebs(periodos: &PeriodosEmebs) -> Vec<PeriodoCombinadoEmebs> {
    let mut combinados: Vec<PeriodoCombinadoEmebs> = Vec::new();

    let posicao_do_periodo = |combinados: &mut Vec<PeriodoCombinadoEmebs>, periodo: &str| {
        match combinados
            .iter()
            .position(|combinado| combinado.periodo == periodo)
        {
            Some(posicao) => posicao,
            None => {
                combinados.push(PeriodoCombinadoEmebs {
                    periodo: periodo.to_string(),
                    autorizadas_infantil: 0,
                    autorizadas_fundamental: 0,
                });
                combinados.len() - 1
            }
        }
    };

    if let Some(infantil) = &periodos.infantil {
        for item in infantil {
            let posicao = posicao_do_periodo(&mut combinados, &item.periodo);
            combinados[posicao].autorizadas_infantil += item.autorizadas;
        }
    }

    if let Some(fundamental) = &periodos.fundamental {
        for item in fundamental {
            let posicao = posicao_do_periodo(&mut combinados, &item.periodo);
            combinados[posicao].autorizadas_fundamental += item.autorizadas;
        }
    }

    combinados
}

/// Aplica a combinação por período às linhas CEMEI e EMEBS do relatório; as
/// demais linhas passam inalteradas.
pub fn reestruturar_resultados(
    relatorio: &RelatorioHistoricoDietas,
) -> RelatorioHistoricoReestruturado {
    let resultados = relatorio
        .resultados
        .iter()
        .map(|resultado| {
            let periodos = match GrupoUnidade::from_iniciais(&resultado.tipo_unidade) {
                GrupoUnidade::Cemei => {
                    let combinados = match &resultado.periodos {
                        Some(PeriodosResultado::Cemei(quadros)) => processar_cemei(quadros),
                        _ => Vec::new(),
                    };
                    Some(PeriodosReestruturados::Cemei(combinados))
                }
                GrupoUnidade::Emebs => {
                    let combinados = match &resultado.periodos {
                        Some(PeriodosResultado::Emebs(quadros)) => processar_emebs(quadros),
                        _ => Vec::new(),
                    };
                    Some(PeriodosReestruturados::Emebs(combinados))
                }
                _ => resultado
                    .periodos
                    .clone()
                    .map(PeriodosReestruturados::Original),
            };

            ResultadoReestruturado {
                data: resultado.data,
                lote: resultado.lote.clone(),
                unidade_educacional: resultado.unidade_educacional.clone(),
                tipo_unidade: resultado.tipo_unidade.clone(),
                classificacao: resultado.classificacao.clone(),
                total: resultado.total,
                periodos,
            }
        })
        .collect();

    RelatorioHistoricoReestruturado {
        total_dietas: relatorio.total_dietas,
        resultados,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::models::relatorio::{FaixaAutorizadas, PeriodoAutorizadas, PeriodoFaixas,
        ResultadoDieta};

    use super::*;

    fn faixas() -> Vec<FaixaAutorizadas> {
        vec![
            FaixaAutorizadas {
                faixa: "01 ano".to_string(),
                autorizadas: 4,
            },
            FaixaAutorizadas {
                faixa: "02 anos".to_string(),
                autorizadas: 5,
            },
        ]
    }

    #[test]
    fn cemei_combina_turma_infantil_e_faixas_por_periodo() {
        let periodos = PeriodosCemei {
            turma_infantil: Some(vec![PeriodoAutorizadas {
                periodo: "INTEGRAL".to_string(),
                autorizadas: 5,
            }]),
            por_idade: Some(vec![
                PeriodoFaixas {
                    periodo: "INTEGRAL".to_string(),
                    faixa_etaria: faixas(),
                },
                PeriodoFaixas {
                    periodo: "TARDE".to_string(),
                    faixa_etaria: faixas(),
                },
            ]),
        };

        let combinados = processar_cemei(&periodos);

        assert_eq!(combinados.len(), 2);
        assert_eq!(combinados[0].periodo, "INTEGRAL");
        assert_eq!(combinados[0].autorizadas_infantil, 5);
        assert_eq!(combinados[0].por_idade, faixas());
        assert_eq!(combinados[1].periodo, "TARDE");
        assert_eq!(combinados[1].autorizadas_infantil, 0);
    }

    #[test]
    fn cemei_sem_quadros_produz_lista_vazia() {
        assert!(processar_cemei(&PeriodosCemei::default()).is_empty());
    }

    #[test]
    fn emebs_soma_infantil_e_fundamental_por_periodo() {
        let periodos = PeriodosEmebs {
            infantil: Some(vec![PeriodoAutorizadas {
                periodo: "MANHA".to_string(),
                autorizadas: 5,
            }]),
            fundamental: Some(vec![
                PeriodoAutorizadas {
                    periodo: "MANHA".to_string(),
                    autorizadas: 4,
                },
                PeriodoAutorizadas {
                    periodo: "TARDE".to_string(),
                    autorizadas: 3,
                },
            ]),
        };

        let combinados = processar_emebs(&periodos);

        assert_eq!(
            combinados,
            vec![
                PeriodoCombinadoEmebs {
                    periodo: "MANHA".to_string(),
                    autorizadas_infantil: 5,
                    autorizadas_fundamental: 4,
                },
                PeriodoCombinadoEmebs {
                    periodo: "TARDE".to_string(),
                    autorizadas_infantil: 0,
                    autorizadas_fundamental: 3,
                },
            ]
        );
    }

    fn resultado(
        tipo_unidade: &str,
        periodos: Option<PeriodosResultado>,
    ) -> ResultadoDieta {
        ResultadoDieta {
            data: NaiveDate::from_ymd_opt(2025, 4, 20).unwrap(),
            lote: "LOTE 01".to_string(),
            unidade_educacional: "ESCOLA".to_string(),
            tipo_unidade: tipo_unidade.to_string(),
            classificacao: "Tipo A".to_string(),
            total: 10,
            periodos,
        }
    }

    #[test]
    fn reestruturar_troca_somente_cemei_e_emebs() {
        let lista_emei = PeriodosResultado::Lista(vec![PeriodoAutorizadas {
            periodo: "MANHA".to_string(),
            autorizadas: 10,
        }]);
        let relatorio = RelatorioHistoricoDietas {
            total_dietas: 30,
            resultados: vec![
                resultado("EMEF", Some(lista_emei.clone())),
                resultado("CMCT", None),
                resultado(
                    "CEMEI",
                    Some(PeriodosResultado::Cemei(PeriodosCemei {
                        turma_infantil: Some(vec![PeriodoAutorizadas {
                            periodo: "INTEGRAL".to_string(),
                            autorizadas: 5,
                        }]),
                        por_idade: None,
                    })),
                ),
            ],
        };

        let reestruturado = reestruturar_resultados(&relatorio);

        assert_eq!(reestruturado.total_dietas, 30);
        assert_eq!(
            reestruturado.resultados[0].periodos,
            Some(PeriodosReestruturados::Original(lista_emei))
        );
        assert_eq!(reestruturado.resultados[1].periodos, None);
        match reestruturado.resultados[2].periodos.as_ref().unwrap() {
            PeriodosReestruturados::Cemei(combinados) => {
                assert_eq!(combinados.len(), 1);
                assert_eq!(combinados[0].autorizadas_infantil, 5);
            }
            outro => panic!("esperava períodos combinados do CEMEI, veio {outro:?}"),
        }
    }

    #[test]
    fn emebs_sem_periodos_no_relatorio_vira_lista_vazia() {
        let relatorio = RelatorioHistoricoDietas {
            total_dietas: 11,
            resultados: vec![resultado(
                "EMEBS",
                Some(PeriodosResultado::Emebs(PeriodosEmebs::default())),
            )],
        };

        let reestruturado = reestruturar_resultados(&relatorio);

        assert_eq!(
            reestruturado.resultados[0].periodos,
            Some(PeriodosReestruturados::Emebs(Vec::new()))
        );
    }
}
