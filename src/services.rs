pub mod faixa_etaria;
pub mod historico_dietas;
pub mod relatorio_historico;
pub use relatorio_historico::RelatorioHistoricoService;
pub mod titulo;
pub use titulo::TituloService;
pub mod reestruturacao;
pub mod exportacao;
pub use exportacao::ExportacaoService;
