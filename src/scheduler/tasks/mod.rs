pub mod aggregate;
pub mod collect;
