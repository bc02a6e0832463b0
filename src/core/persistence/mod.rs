pub mod aggregate;
pub mod dataset;
pub mod storage_io;
