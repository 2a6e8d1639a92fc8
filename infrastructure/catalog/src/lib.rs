pub mod client;
pub mod dto;
pub mod queries;
pub mod repository;
