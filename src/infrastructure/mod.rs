pub mod db;
pub mod pdf;
pub mod storage;
