//! Health Queries

/// 服务健康状态查询
#[derive(Debug, Clone)]
pub struct GetHealth;
