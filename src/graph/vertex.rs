//! 顶点定义
//!
//! 顶点保存调用方提供的元素以及邻居记录列表

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// 顶点 ID（图内存储槽位）
///
/// 顶点被删除之前一直有效，被删除后槽位可能被新顶点复用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub usize);

impl VertexId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for VertexId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

/// 邻居记录：相邻顶点与连接它们的边的权重
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// 相邻顶点
    pub vertex: VertexId,
    /// 边权重
    pub weight: f64,
}

impl Neighbor {
    pub fn new(vertex: VertexId, weight: f64) -> Self {
        Self { vertex, weight }
    }
}

/// 邻居列表，小度数时不分配堆内存
pub(crate) type NeighborList = SmallVec<[Neighbor; 4]>;

/// 顶点
#[derive(Debug, Clone)]
pub struct Vertex<T> {
    /// 顶点 ID
    id: VertexId,
    /// 元素
    element: T,
    /// 邻居记录，按连接顺序排列
    neighbors: NeighborList,
}

impl<T> Vertex<T> {
    pub(crate) fn new(id: VertexId, element: T) -> Self {
        Self {
            id,
            element,
            neighbors: NeighborList::new(),
        }
    }

    /// 获取顶点 ID
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// 获取元素
    pub fn element(&self) -> &T {
        &self.element
    }

    /// 顶点的度
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    /// 邻居记录
    pub fn neighbors(&self) -> &[Neighbor] {
        &self.neighbors
    }

    /// 查找指向某顶点的邻居记录
    pub fn neighbor(&self, id: VertexId) -> Option<&Neighbor> {
        self.neighbors.iter().find(|n| n.vertex == id)
    }

    pub fn is_adjacent_to(&self, id: VertexId) -> bool {
        self.neighbor(id).is_some()
    }

    pub(crate) fn push_neighbor(&mut self, neighbor: Neighbor) {
        self.neighbors.push(neighbor);
    }

    /// 删除指向某顶点的所有记录，返回删除数量
    pub(crate) fn strip_neighbor(&mut self, id: VertexId) -> usize {
        let before = self.neighbors.len();
        self.neighbors.retain(|n| n.vertex != id);
        before - self.neighbors.len()
    }

    pub(crate) fn neighbor_mut(&mut self, id: VertexId) -> Option<&mut Neighbor> {
        self.neighbors.iter_mut().find(|n| n.vertex == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_neighbors() {
        let mut v = Vertex::new(VertexId::new(0), "a");
        v.push_neighbor(Neighbor::new(VertexId::new(1), 2.5));
        v.push_neighbor(Neighbor::new(VertexId::new(2), 1.0));

        assert_eq!(v.degree(), 2);
        assert_eq!(*v.element(), "a");
        assert!(v.is_adjacent_to(VertexId::new(2)));
        assert_eq!(v.neighbor(VertexId::new(1)).map(|n| n.weight), Some(2.5));

        assert_eq!(v.strip_neighbor(VertexId::new(1)), 1);
        assert_eq!(v.strip_neighbor(VertexId::new(1)), 0);
        assert_eq!(v.degree(), 1);
    }

    #[test]
    fn test_neighbor_weight_update() {
        let mut v = Vertex::new(VertexId::new(3), 'x');
        v.push_neighbor(Neighbor::new(VertexId::new(4), 1.0));
        if let Some(n) = v.neighbor_mut(VertexId::new(4)) {
            n.weight = 7.0;
        }
        assert_eq!(v.neighbors()[0].weight, 7.0);
        assert_eq!(v.id().index(), 3);
    }
}
