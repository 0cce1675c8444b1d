#![allow(dead_code)]

pub mod mock_config;

pub use mock_config::MockConfig;
