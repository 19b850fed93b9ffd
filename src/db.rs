pub mod logs_dietas_repo;
pub use logs_dietas_repo::LogsDietasRepository;
pub mod escola_repo;
pub use escola_repo::EscolaRepository;
pub mod downloads_repo;
pub use downloads_repo::DownloadsRepository;
