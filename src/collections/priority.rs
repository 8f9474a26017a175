//! 最小优先结构
//!
//! Dijkstra 与 Prim 共用的优先结构：基于二叉堆的 [`HeapPriority`]
//! 和线性扫描的 [`ArrayPriority`]，由 [`PriorityStrategy`] 按图的稠密程度选择

use crate::error::{Error, Result};
use priority_queue::DoublePriorityQueue;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// 全序浮点距离，作为优先结构的键
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Distance(pub f64);

impl Distance {
    pub const ZERO: Distance = Distance(0.0);
    pub const INFINITY: Distance = Distance(f64::INFINITY);

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Distance {}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for Distance {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

/// 最小优先结构的能力接口
pub trait MinPriority<I> {
    /// 放入元素及其键
    fn push(&mut self, item: I, key: Distance);

    /// 取出键最小的元素
    fn pop_min(&mut self) -> Option<(I, Distance)>;

    /// 通知元素的键已减小；元素不存在或新键不更小时返回 false
    fn decrease_key(&mut self, item: &I, key: Distance) -> bool;

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;
}

/// 基于二叉堆的优先结构（稀疏图）
pub struct HeapPriority<I: Hash + Eq> {
    heap: DoublePriorityQueue<I, Distance>,
}

impl<I: Hash + Eq> HeapPriority<I> {
    pub fn new() -> Self {
        Self {
            heap: DoublePriorityQueue::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: DoublePriorityQueue::with_capacity(capacity),
        }
    }
}

impl<I: Hash + Eq> Default for HeapPriority<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Hash + Eq> MinPriority<I> for HeapPriority<I> {
    fn push(&mut self, item: I, key: Distance) {
        self.heap.push(item, key);
    }

    fn pop_min(&mut self) -> Option<(I, Distance)> {
        self.heap.pop_min()
    }

    fn decrease_key(&mut self, item: &I, key: Distance) -> bool {
        match self.heap.get_priority(item) {
            Some(current) if key < *current => {
                self.heap.change_priority(item, key);
                true
            }
            _ => false,
        }
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// 基于数组的优先结构（稠密图）
///
/// 取最小值时线性扫描，减键时原地修改，不需要重新调整堆
pub struct ArrayPriority<I> {
    entries: Vec<(I, Distance)>,
}

impl<I> ArrayPriority<I> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }
}

impl<I> Default for ArrayPriority<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: PartialEq> MinPriority<I> for ArrayPriority<I> {
    fn push(&mut self, item: I, key: Distance) {
        self.entries.push((item, key));
    }

    fn pop_min(&mut self) -> Option<(I, Distance)> {
        // 相同键取最早放入的元素
        let (pos, _) = self
            .entries
            .iter()
            .enumerate()
            .min_by(|(i, a), (j, b)| a.1.cmp(&b.1).then(i.cmp(j)))?;
        Some(self.entries.remove(pos))
    }

    fn decrease_key(&mut self, item: &I, key: Distance) -> bool {
        match self.entries.iter_mut().find(|(i, _)| i == item) {
            Some(entry) if key < entry.1 => {
                entry.1 = key;
                true
            }
            _ => false,
        }
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// 优先结构选择策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityStrategy {
    /// 按边密度自动选择
    #[default]
    Auto,
    /// 固定使用二叉堆
    Heap,
    /// 固定使用数组
    Array,
}

impl PriorityStrategy {
    /// 边数是否超过稠密阈值 n(n-1)/2 + n
    pub fn is_dense(vertex_count: usize, edge_count: usize) -> bool {
        let n = vertex_count;
        edge_count > n * n.saturating_sub(1) / 2 + n
    }

    /// 将 Auto 落实为具体策略
    pub fn resolve(self, vertex_count: usize, edge_count: usize) -> PriorityStrategy {
        match self {
            PriorityStrategy::Auto if Self::is_dense(vertex_count, edge_count) => {
                PriorityStrategy::Array
            }
            PriorityStrategy::Auto => PriorityStrategy::Heap,
            other => other,
        }
    }

    /// 构建优先结构
    pub fn build<I>(
        self,
        vertex_count: usize,
        edge_count: usize,
    ) -> Box<dyn MinPriority<I>>
    where
        I: Hash + Eq + 'static,
    {
        match self.resolve(vertex_count, edge_count) {
            PriorityStrategy::Array => Box::new(ArrayPriority::with_capacity(vertex_count)),
            _ => Box::new(HeapPriority::with_capacity(vertex_count)),
        }
    }
}

impl fmt::Display for PriorityStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PriorityStrategy::Auto => "auto",
            PriorityStrategy::Heap => "heap",
            PriorityStrategy::Array => "array",
        };
        f.write_str(name)
    }
}

impl FromStr for PriorityStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(PriorityStrategy::Auto),
            "heap" => Ok(PriorityStrategy::Heap),
            "array" => Ok(PriorityStrategy::Array),
            other => Err(Error::ParseError(format!("未知的优先结构策略: {}", other))),
        }
    }
}
