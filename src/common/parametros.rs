use std::collections::BTreeMap;

use anyhow::anyhow;

use crate::common::error::AppError;

/// Multimapa de parâmetros de consulta, com a mesma semântica dos query
/// params repetidos de HTTP: uma chave pode carregar vários valores
/// (`classificacoes_selecionadas[]=1&classificacoes_selecionadas[]=2`).
///
/// Os endpoints de exportação recebem o mesmo multimapa serializado em JSON
/// no corpo da requisição, com valores escalares ou listas por chave.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParametrosConsulta {
    valores: BTreeMap<String, Vec<String>>,
}

impl ParametrosConsulta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pares<I>(pares: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut parametros = Self::new();
        for (chave, valor) in pares {
            parametros.adicionar(chave, valor);
        }
        parametros
    }

    /// Reconstrói o multimapa a partir do objeto JSON enviado pelos
    /// endpoints de exportação: cada valor pode ser escalar ou lista.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, AppError> {
        let objeto = json
            .as_object()
            .ok_or_else(|| anyhow!("parâmetros de exportação devem ser um objeto JSON"))?;

        let mut parametros = Self::new();
        for (chave, valor) in objeto {
            match valor {
                serde_json::Value::Array(itens) => {
                    for item in itens {
                        parametros.adicionar(chave.clone(), valor_escalar(item)?);
                    }
                }
                outro => parametros.adicionar(chave.clone(), valor_escalar(outro)?),
            }
        }
        Ok(parametros)
    }

    pub fn adicionar(&mut self, chave: String, valor: String) {
        self.valores.entry(chave).or_default().push(valor);
    }

    /// Último valor associado à chave, como em formulários HTTP.
    pub fn get(&self, chave: &str) -> Option<&str> {
        self.valores
            .get(chave)
            .and_then(|valores| valores.last())
            .map(String::as_str)
    }

    /// Todos os valores associados à chave; vazio quando a chave não existe.
    pub fn getlist(&self, chave: &str) -> &[String] {
        self.valores
            .get(chave)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn valor_escalar(valor: &serde_json::Value) -> Result<String, AppError> {
    match valor {
        serde_json::Value::String(texto) => Ok(texto.clone()),
        serde_json::Value::Number(numero) => Ok(numero.to_string()),
        serde_json::Value::Bool(logico) => Ok(logico.to_string()),
        outro => Err(anyhow!("valor de parâmetro não suportado: {outro}").into()),
    }
}
