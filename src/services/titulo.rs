// src/services/titulo.rs
//
// Título dos arquivos exportados. Resume, numa linha, a data de referência,
// a DRE, os períodos cobertos, o total de dietas e a data de extração.

use anyhow::anyhow;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::{
        error::{erro_validacao, AppError},
        parametros::ParametrosConsulta,
    },
    db::EscolaRepository,
    models::relatorio::LinhaExportacao,
    services::relatorio_historico::PARAM_PERIODOS,
};

// Versão do str.title(): maiúscula no começo de cada palavra, minúsculas no
// resto, com qualquer caractere não alfabético contando como separador.
fn titlecase(texto: &str) -> String {
    let mut resultado = String::with_capacity(texto.len());
    let mut inicio_de_palavra = true;

    for caractere in texto.chars() {
        if caractere.is_alphabetic() {
            if inicio_de_palavra {
                resultado.extend(caractere.to_uppercase());
            } else {
                resultado.extend(caractere.to_lowercase());
            }
            inicio_de_palavra = false;
        } else {
            resultado.push(caractere);
            inicio_de_palavra = true;
        }
    }
    resultado
}

/// Períodos presentes nas linhas de exportação, sem repetição, na ordem em
/// que aparecem, formatados como nome próprio. Linhas sem período não
/// entram.
pub fn encontrar_todos_os_periodos(linhas: &[LinhaExportacao]) -> Vec<String> {
    let mut periodos: Vec<String> = Vec::new();

    for linha in linhas {
        if let Some(periodo) = &linha.periodo {
            let formatado = titlecase(periodo);
            if !periodos.contains(&formatado) {
                periodos.push(formatado);
            }
        }
    }
    periodos
}

/// Monta o título a partir de dados já resolvidos. Os destaques viram
/// `<strong>` quando o destino é o PDF.
pub fn montar_titulo(
    linhas: &[LinhaExportacao],
    dre_nome: &str,
    nomes_periodos: &str,
    for_pdf: bool,
    data_extracao: NaiveDate,
) -> Result<String, AppError> {
    let primeira = linhas.first().ok_or(AppError::RelatorioSemResultados)?;

    let bold = |texto: &str| {
        if for_pdf {
            format!("<strong>{texto}</strong>")
        } else {
            texto.to_string()
        }
    };

    let total_dietas: i64 = linhas.iter().map(|linha| linha.dietas_autorizadas).sum();
    let data_extraida = data_extracao.format("%d/%m/%Y").to_string();

    let mut titulo = format!(
        "Total de Dietas Autorizadas em {} ",
        bold(&primeira.data_de_referencia)
    );
    titulo.push_str(&format!("para as unidades da DRE {}", bold(dre_nome)));
    titulo.push_str(&format!(" | {} {nomes_periodos}", bold("Períodos:")));
    titulo.push_str(&format!(": {}", bold(&total_dietas.to_string())));
    titulo.push_str(&format!(
        " | Data de extração do relatório: {}",
        bold(&data_extraida)
    ));
    Ok(titulo)
}

fn dre_iniciais_da_linha(linha: &LinhaExportacao) -> Result<&str, AppError> {
    linha
        .lote_dre
        .splitn(2, " DRE ")
        .nth(1)
        .ok_or_else(|| anyhow!("linha de exportação sem DRE no lote: {}", linha.lote_dre).into())
}

/// Resolve os nomes de DRE e períodos no banco e monta o título.
#[derive(Clone)]
pub struct TituloService {
    escola_repo: EscolaRepository,
}

impl TituloService {
    pub fn new(escola_repo: EscolaRepository) -> Self {
        Self { escola_repo }
    }

    /// Os períodos do título vêm do filtro da requisição quando houver um;
    /// caso contrário, dos períodos presentes nas próprias linhas.
    pub async fn build_titulo(
        &self,
        linhas: &[LinhaExportacao],
        query_params: &ParametrosConsulta,
        for_pdf: bool,
    ) -> Result<String, AppError> {
        let primeira = linhas.first().ok_or(AppError::RelatorioSemResultados)?;

        let dre_iniciais = dre_iniciais_da_linha(primeira)?;
        let dre_nome = self
            .escola_repo
            .nome_dre_por_iniciais(dre_iniciais)
            .await?
            .ok_or(AppError::DreNaoEncontrada)?;

        let uuids_periodos = query_params
            .getlist(PARAM_PERIODOS)
            .iter()
            .map(|valor| {
                Uuid::parse_str(valor).map_err(|_| {
                    erro_validacao(
                        PARAM_PERIODOS,
                        &format!("O valor {valor} não é um UUID válido."),
                    )
                })
            })
            .collect::<Result<Vec<Uuid>, AppError>>()?;

        let nomes_periodos = if uuids_periodos.is_empty() {
            encontrar_todos_os_periodos(linhas).join(", ")
        } else {
            self.escola_repo
                .nomes_periodos_por_uuids(&uuids_periodos)
                .await?
                .join(", ")
        };

        montar_titulo(
            linhas,
            &dre_nome,
            &nomes_periodos,
            for_pdf,
            chrono::Local::now().date_naive(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linha(periodo: Option<&str>, dietas_autorizadas: i64) -> LinhaExportacao {
        LinhaExportacao {
            lote_dre: "LOTE 01 - DRE IP".to_string(),
            unidade_educacional: "CEI DIRET JOAO MENDES".to_string(),
            classificacao_da_dieta: "Tipo B".to_string(),
            periodo: periodo.map(str::to_string),
            faixa_etaria: "01 ano".to_string(),
            dietas_autorizadas,
            data_de_referencia: "20/04/2025".to_string(),
        }
    }

    #[test]
    fn titlecase_imita_o_title_de_texto() {
        assert_eq!(titlecase("MANHA"), "Manha");
        assert_eq!(titlecase("CEU GESTAO"), "Ceu Gestao");
        assert_eq!(titlecase("n/a"), "N/A");
    }

    #[test]
    fn periodos_saem_na_ordem_de_chegada_sem_repeticao() {
        let linhas = vec![
            linha(Some("TARDE"), 1),
            linha(None, 2),
            linha(Some("MANHA"), 3),
            linha(Some("TARDE"), 4),
        ];

        assert_eq!(
            encontrar_todos_os_periodos(&linhas),
            vec!["Tarde".to_string(), "Manha".to_string()]
        );
    }

    #[test]
    fn titulo_junta_data_dre_periodos_total_e_extracao() {
        let linhas = vec![linha(Some("MANHA"), 10), linha(Some("TARDE"), 11)];
        let data_extracao = NaiveDate::from_ymd_opt(2025, 4, 22).unwrap();

        let titulo = montar_titulo(&linhas, "IPIRANGA", "Manha, Tarde", false, data_extracao)
            .unwrap();

        assert_eq!(
            titulo,
            "Total de Dietas Autorizadas em 20/04/2025 para as unidades da DRE IPIRANGA \
             | Períodos: Manha, Tarde: 21 | Data de extração do relatório: 22/04/2025"
        );
    }

    #[test]
    fn titulo_para_pdf_destaca_os_valores() {
        let linhas = vec![linha(Some("MANHA"), 10)];
        let data_extracao = NaiveDate::from_ymd_opt(2025, 4, 22).unwrap();

        let titulo =
            montar_titulo(&linhas, "IPIRANGA", "Manha", true, data_extracao).unwrap();

        assert!(titulo.contains("<strong>20/04/2025</strong>"));
        assert!(titulo.contains("DRE <strong>IPIRANGA</strong>"));
        assert!(titulo.contains("<strong>Períodos:</strong> Manha"));
        assert!(titulo.contains(": <strong>10</strong>"));
        assert!(titulo.contains("Data de extração do relatório: <strong>22/04/2025</strong>"));
    }

    #[test]
    fn titulo_sem_linhas_e_erro() {
        let data_extracao = NaiveDate::from_ymd_opt(2025, 4, 22).unwrap();
        let erro = montar_titulo(&[], "IPIRANGA", "", false, data_extracao).unwrap_err();

        assert!(matches!(erro, AppError::RelatorioSemResultados));
    }

    #[test]
    fn dre_vem_do_trecho_depois_do_separador() {
        let linha = linha(None, 1);
        assert_eq!(dre_iniciais_da_linha(&linha).unwrap(), "IP");

        let mut sem_dre = linha.clone();
        sem_dre.lote_dre = "LOTE 01".to_string();
        assert!(dre_iniciais_da_linha(&sem_dre).is_err());
    }
}
