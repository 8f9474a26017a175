//! 边定义
//!
//! 无向边在两个端点的邻居列表中各存一份，这里的 [`Edge`] 只是遍历时的只读视图

use serde::Serialize;

/// 边视图：两个端点元素及权重
///
/// 方向取较早加入图的端点到较晚加入的端点
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge<'a, T> {
    /// 第一个端点
    pub a: &'a T,
    /// 第二个端点
    pub b: &'a T,
    /// 权重
    pub weight: f64,
}

impl<'a, T> Edge<'a, T> {
    pub fn new(a: &'a T, b: &'a T, weight: f64) -> Self {
        Self { a, b, weight }
    }
}
