pub mod checksum;
pub mod config;
pub mod download;
pub mod hasher;
pub mod logging;
pub mod storage;
pub mod url_model;
