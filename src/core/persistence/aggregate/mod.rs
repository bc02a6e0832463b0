pub mod aggregate_fs_adapter;
pub mod aggregate_summary_entity;
