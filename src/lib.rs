pub mod app_config;
pub mod constants;
pub mod db;
pub mod extract;
pub mod fetch;
pub mod flash;
pub mod normalize;
pub mod orm;
pub mod repo;
pub mod web;
