//! 图配置

use crate::collections::PriorityStrategy;
use serde::{Deserialize, Serialize};

/// 图配置
///
/// 目前只控制 Dijkstra 与 Prim 使用的优先结构
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// 优先结构选择策略
    pub priority: PriorityStrategy,
}

impl GraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置优先结构策略
    pub fn with_priority(mut self, priority: PriorityStrategy) -> Self {
        self.priority = priority;
        self
    }
}
