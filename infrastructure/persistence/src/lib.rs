pub mod db;
mod deadline;
pub mod invoice {
    pub mod entity;
    pub mod query;
    pub mod repository;
}

/// Schema the invoice repository expects. Applied by operators, not by the service.
pub const INIT_SQL: &str = include_str!("../sql/init.sql");
