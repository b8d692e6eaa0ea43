//! In-memory adapters for task lifecycle persistence.

mod repository;

pub use repository::InMemoryTaskRepository;
