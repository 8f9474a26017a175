//! 最短路径算法
//!
//! 无权最短路径按 BFS 分层，带权最短路径使用 Dijkstra。
//! 两者都在侧表中记录距离和前驱，最后由同一个重构过程从终点倒推回起点。

use crate::collections::{Distance, Frontier, Queue};
use crate::error::Result;
use crate::graph::{Graph, VertexId};
use serde::Serialize;
use tracing::{debug, trace};

/// 路径结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult<'a, T> {
    /// 路径上的元素序列（起点到终点）
    pub vertices: Vec<&'a T>,
    /// 路径长度（边数）
    pub length: usize,
    /// 路径总权重
    pub total_weight: f64,
}

impl<'a, T> PathResult<'a, T> {
    /// 不可达时的空路径
    fn unreachable() -> Self {
        Self {
            vertices: Vec::new(),
            length: 0,
            total_weight: 0.0,
        }
    }

    fn with_start(start: &'a T) -> Self {
        Self {
            vertices: vec![start],
            length: 0,
            total_weight: 0.0,
        }
    }

    /// 终点是否不可达
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn first(&self) -> Option<&'a T> {
        self.vertices.first().copied()
    }

    pub fn last(&self) -> Option<&'a T> {
        self.vertices.last().copied()
    }
}

/// 单源最短路径计算的侧表
struct Labels {
    distance: Vec<f64>,
    predecessor: Vec<Option<VertexId>>,
}

impl Labels {
    fn new(capacity: usize, origin: VertexId) -> Self {
        let mut distance = vec![f64::INFINITY; capacity];
        distance[origin.index()] = 0.0;
        Self {
            distance,
            predecessor: vec![None; capacity],
        }
    }

    fn distance(&self, id: VertexId) -> f64 {
        self.distance[id.index()]
    }

    fn label(&mut self, id: VertexId, distance: f64, predecessor: VertexId) {
        self.distance[id.index()] = distance;
        self.predecessor[id.index()] = Some(predecessor);
    }
}

/// 路径查找器
pub struct PathFinder<'a, T> {
    graph: &'a Graph<T>,
}

impl<'a, T: PartialEq> PathFinder<'a, T> {
    /// 创建路径查找器
    pub fn new(graph: &'a Graph<T>) -> Self {
        Self { graph }
    }

    /// 无权最短路径：每条边代价为 1，返回边数最少的路径
    pub fn shortest_path(&self, origin: &T, destination: &T) -> Result<PathResult<'a, T>> {
        let source = self.graph.require(origin)?;
        let target = self.graph.require(destination)?;
        if source == target {
            return Ok(PathResult::with_start(self.graph.vertex_by_id(source)?.element()));
        }

        let mut labels = Labels::new(self.graph.slot_capacity(), source);
        let mut queue = Queue::new();
        queue.push(source);

        'search: while let Some(current) = queue.pop() {
            let Some(vertex) = self.graph.get(current) else {
                continue;
            };
            let next = labels.distance(current) + 1.0;
            for neighbor in vertex.neighbors() {
                if labels.distance(neighbor.vertex) == f64::INFINITY {
                    labels.label(neighbor.vertex, next, current);
                    if neighbor.vertex == target {
                        break 'search;
                    }
                    queue.push(neighbor.vertex);
                }
            }
        }

        debug!(
            source = source.index(),
            target = target.index(),
            hops = labels.distance(target),
            "无权最短路径"
        );
        self.reconstruct(source, target, &labels)
    }

    /// 带权最短路径（Dijkstra）
    ///
    /// 优先结构按图配置选择：边数超过 n(n-1)/2 + n 时改用数组实现
    pub fn dijkstra(&self, origin: &T, destination: &T) -> Result<PathResult<'a, T>> {
        let source = self.graph.require(origin)?;
        let target = self.graph.require(destination)?;
        if source == target {
            return Ok(PathResult::with_start(self.graph.vertex_by_id(source)?.element()));
        }

        let mut labels = Labels::new(self.graph.slot_capacity(), source);
        let mut queue = self
            .graph
            .config()
            .priority
            .build(self.graph.vertex_count(), self.graph.edge_count());
        for id in self.graph.ids() {
            queue.push(id, Distance(labels.distance(id)));
        }

        while let Some((current, key)) = queue.pop_min() {
            // 剩余顶点全部不可达
            if !key.is_finite() || current == target {
                break;
            }
            let Some(vertex) = self.graph.get(current) else {
                continue;
            };
            for neighbor in vertex.neighbors() {
                let candidate = key.get() + neighbor.weight;
                if candidate < labels.distance(neighbor.vertex) {
                    trace!(vertex = neighbor.vertex.index(), distance = candidate, "松弛");
                    labels.label(neighbor.vertex, candidate, current);
                    queue.decrease_key(&neighbor.vertex, Distance(candidate));
                }
            }
        }

        debug!(
            source = source.index(),
            target = target.index(),
            distance = labels.distance(target),
            "Dijkstra 最短路径"
        );
        self.reconstruct(source, target, &labels)
    }

    /// 从终点沿前驱倒推回起点
    fn reconstruct(
        &self,
        source: VertexId,
        target: VertexId,
        labels: &Labels,
    ) -> Result<PathResult<'a, T>> {
        if labels.distance(target) == f64::INFINITY {
            return Ok(PathResult::unreachable());
        }

        let graph = self.graph;
        let mut vertices = vec![graph.vertex_by_id(target)?.element()];
        let mut total_weight = 0.0;
        let mut current = target;

        while current != source {
            let Some(previous) = labels.predecessor[current.index()] else {
                return Ok(PathResult::unreachable());
            };
            let vertex = graph.vertex_by_id(current)?;
            total_weight += vertex.neighbor(previous).map(|n| n.weight).unwrap_or(0.0);
            vertices.push(graph.vertex_by_id(previous)?.element());
            current = previous;
        }

        vertices.reverse();
        Ok(PathResult {
            length: vertices.len() - 1,
            vertices,
            total_weight,
        })
    }
}
