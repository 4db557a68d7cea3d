//! Flows module - End-to-end pipelines built from core and backends

pub mod generate;
