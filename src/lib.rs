//! Storage schema and transfer objects for a multi-user todo list: admins and regular users,
//! todos owned by regular users, and categories tagging todos through a link table.

pub mod app_env;
pub mod db;
pub mod domain;
pub mod dto;
pub mod external_connections;
pub mod logging;
pub mod persistence;
