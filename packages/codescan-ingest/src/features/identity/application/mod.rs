pub mod uuid_factory;
