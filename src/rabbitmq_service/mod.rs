pub mod consumers;
pub mod rabbitmq_service;
pub mod structs;
