// src/services/faixa_etaria.rs

use crate::models::dietas::{LogDietaRecord, TIPOS_UNIDADE_CEI, TIPOS_UNIDADE_CEMEI};

/// Converte uma idade em meses para o rótulo por extenso usado nos
/// relatórios: "06 meses", "01 ano", "02 anos e 01 mês".
pub fn meses_to_mes_e_ano_string(meses: i32) -> String {
    let anos = meses / 12;
    let resto = meses % 12;

    if anos == 0 {
        let unidade = if meses == 1 { "mês" } else { "meses" };
        return format!("{:02} {}", meses, unidade);
    }
    if resto == 0 {
        let unidade = if anos == 1 { "ano" } else { "anos" };
        return format!("{:02} {}", anos, unidade);
    }
    let unidade_anos = if anos == 1 { "ano" } else { "anos" };
    let unidade_meses = if resto == 1 { "mês" } else { "meses" };
    format!(
        "{:02} {} e {:02} {}",
        anos, unidade_anos, resto, unidade_meses
    )
}

/// Rótulo de uma faixa etária em meses, com fim exclusivo.
///
/// Faixas de um único mês usam o rótulo do início; nas demais o fim exibido
/// é `fim - 1`, exceto quando cai exatamente na véspera de um ano cheio, em
/// que arredonda para o rótulo do ano ("03 anos a 06 anos" para 36..72).
/// Início abaixo de um ano sai como número puro de meses ("07 a 11 meses"),
/// salvo o zero, escrito por extenso ("0 meses a 05 meses").
pub fn faixa_to_string(inicio: i32, fim: i32) -> String {
    if inicio == 0 && fim == 0 {
        return "0 meses a 11 meses".to_string();
    }
    if fim - inicio == 1 {
        return meses_to_mes_e_ano_string(inicio);
    }

    let inicio_str = if inicio == 0 {
        "0 meses".to_string()
    } else if inicio < 12 {
        format!("{:02}", inicio)
    } else {
        meses_to_mes_e_ano_string(inicio)
    };

    let ultimo = fim - 1;
    let fim_str = if ultimo >= 12 && ultimo % 12 == 11 {
        meses_to_mes_e_ano_string(fim)
    } else {
        meses_to_mes_e_ano_string(ultimo)
    };

    format!("{} a {}", inicio_str, fim_str)
}

// Derivação da coluna "faixa_etaria" das linhas planas de exportação. Cada
// grupo só mexe no rótulo quando a linha é do seu tipo de unidade; os demais
// repassam o valor recebido.

pub fn get_faixa_etaria_cei(log: &LogDietaRecord, faixa_etaria: String) -> String {
    if !TIPOS_UNIDADE_CEI.contains(&log.tipo_unidade.as_str()) {
        return faixa_etaria;
    }
    match (log.faixa_inicio, log.faixa_fim) {
        (Some(inicio), Some(fim)) => faixa_to_string(inicio, fim),
        _ => faixa_etaria,
    }
}

pub fn get_faixa_etaria_cemei(log: &LogDietaRecord, faixa_etaria: String) -> String {
    if !TIPOS_UNIDADE_CEMEI.contains(&log.tipo_unidade.as_str()) {
        return faixa_etaria;
    }
    // Início zero conta como ausência de faixa: a linha é da turma infantil.
    match (log.faixa_inicio, log.faixa_fim) {
        (Some(inicio), Some(fim)) if inicio != 0 => faixa_to_string(inicio, fim),
        _ => "Infantil".to_string(),
    }
}

pub fn get_faixa_etaria_emebs(log: &LogDietaRecord, faixa_etaria: String) -> String {
    if log.tipo_unidade != "EMEBS" {
        return faixa_etaria;
    }
    match log.infantil_ou_fundamental.as_deref() {
        Some("INFANTIL") => "Infantil (4 a 6 anos)".to_string(),
        Some("FUNDAMENTAL") => "Fundamental (acima de 6 anos)".to_string(),
        _ => faixa_etaria,
    }
}

pub fn get_faixa_etaria(log: &LogDietaRecord) -> String {
    let faixa_etaria = String::new();
    let faixa_etaria = get_faixa_etaria_cei(log, faixa_etaria);
    let faixa_etaria = get_faixa_etaria_cemei(log, faixa_etaria);
    get_faixa_etaria_emebs(log, faixa_etaria)
}
