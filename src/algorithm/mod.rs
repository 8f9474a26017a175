//! 图算法模块
//!
//! 包含遍历、最短路径和最小生成树算法

mod mst;
mod path;
mod traversal;

pub use mst::Prim;
pub use path::{PathFinder, PathResult};
pub use traversal::{Color, Traversal};
