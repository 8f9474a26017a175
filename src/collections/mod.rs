//! 算法使用的辅助容器
//!
//! 遍历前沿（队列、栈）与最小优先结构（堆、数组）

mod frontier;
mod priority;

pub use frontier::{Frontier, Queue, Stack};
pub use priority::{ArrayPriority, Distance, HeapPriority, MinPriority, PriorityStrategy};
