mod pg_history_repository;
mod pg_pool;

pub use pg_history_repository::PgHistoryRepository;
pub use pg_pool::create_pool;
