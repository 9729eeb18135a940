pub mod ask;
pub mod records;
pub mod schemas;
