//! 工具函数模块

pub mod domain;
pub mod duration_ms;
