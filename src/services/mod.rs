pub mod mapping_service;

pub use mapping_service::MappingCache;
