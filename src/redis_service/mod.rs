pub mod redis_service;

pub use redis_service::init_redis_connection;
