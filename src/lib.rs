//! ugraph - 泛型无向带权图
//!
//! 以元素值的相等性标识顶点，支持：
//! - 成员查询、连接与断开、边权重读写
//! - BFS / DFS 遍历与连通性判断
//! - 无权最短路径与 Dijkstra 带权最短路径
//! - Prim 最小生成树
//! - 从 CSV / JSON Lines 边列表导入

pub mod algorithm;
pub mod cli;
pub mod collections;
pub mod config;
pub mod error;
pub mod graph;
pub mod import;

// 重导出常用类型
pub use algorithm::{PathFinder, PathResult, Prim, Traversal};
pub use collections::PriorityStrategy;
pub use config::GraphConfig;
pub use error::{Error, Result};
pub use graph::{Edge, Graph, Neighbor, Vertex, VertexId};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
