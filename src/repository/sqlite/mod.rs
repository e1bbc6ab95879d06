//! SQLite-backed mapping store.

mod mapping_repository;

pub use mapping_repository::MappingRepository;
