//! 图遍历算法
//!
//! BFS 与 DFS 共用同一套放入/取出流程，只是前沿结构不同：
//! 队列得到广度优先顺序，栈得到深度优先顺序。
//! 顶点颜色保存在本次调用的侧表中，返回时随之丢弃，图本身不被修改。

use crate::collections::{Frontier, Queue, Stack};
use crate::error::Result;
use crate::graph::{Graph, Vertex, VertexId};
use tracing::{debug, trace};

/// 遍历过程中顶点的颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// 尚未发现
    Unvisited,
    /// 已放入前沿，等待处理
    InFrontier,
    /// 已处理
    Visited,
}

/// 遍历器
pub struct Traversal<'a, T> {
    graph: &'a Graph<T>,
}

impl<'a, T> Traversal<'a, T> {
    /// 创建遍历器
    pub fn new(graph: &'a Graph<T>) -> Self {
        Self { graph }
    }

    /// 新的颜色侧表，所有顶点为 Unvisited
    fn colors(&self) -> Vec<Color> {
        vec![Color::Unvisited; self.graph.slot_capacity()]
    }

    /// 从 start 出发走完所在连通分量，返回处理的顶点数
    fn walk<Fr, F>(
        &self,
        start: VertexId,
        frontier: &mut Fr,
        colors: &mut [Color],
        mut visitor: F,
    ) -> usize
    where
        Fr: Frontier<VertexId>,
        F: FnMut(&Vertex<T>),
    {
        let mut processed = 0;
        colors[start.index()] = Color::InFrontier;
        frontier.push(start);

        while let Some(id) = frontier.pop() {
            let Some(vertex) = self.graph.get(id) else {
                continue;
            };
            colors[id.index()] = Color::Visited;
            trace!(vertex = id.index(), "处理顶点");
            visitor(vertex);
            processed += 1;

            for neighbor in vertex.neighbors() {
                let slot = neighbor.vertex.index();
                if colors[slot] == Color::Unvisited {
                    colors[slot] = Color::InFrontier;
                    frontier.push(neighbor.vertex);
                }
            }
        }

        processed
    }

    /// 图是否连通；空图与单顶点图视为连通
    pub fn is_connected(&self) -> bool {
        let Some(first) = self.graph.first() else {
            return true;
        };
        if self.graph.vertex_count() == 1 {
            return true;
        }

        let mut colors = self.colors();
        let reached = self.walk(first.id(), &mut Queue::new(), &mut colors, |_| {});
        reached == self.graph.vertex_count()
    }

    /// 连通分量个数
    pub fn component_count(&self) -> usize {
        let mut colors = self.colors();
        let mut components = 0;

        for id in self.graph.ids() {
            if colors[id.index()] == Color::Unvisited {
                self.walk(id, &mut Queue::new(), &mut colors, |_| {});
                components += 1;
            }
        }

        debug!(components, "统计连通分量");
        components
    }
}

impl<'a, T: PartialEq> Traversal<'a, T> {
    /// 以任意前沿结构从 start 开始遍历
    pub fn traverse<Fr, F>(&self, start: &T, mut frontier: Fr, visitor: F) -> Result<()>
    where
        Fr: Frontier<VertexId>,
        F: FnMut(&Vertex<T>),
    {
        let start = self.graph.require(start)?;
        let mut colors = self.colors();
        let visited = self.walk(start, &mut frontier, &mut colors, visitor);
        debug!(start = start.index(), visited, "遍历完成");
        Ok(())
    }

    /// 广度优先遍历
    pub fn bfs<F>(&self, start: &T, visitor: F) -> Result<()>
    where
        F: FnMut(&Vertex<T>),
    {
        self.traverse(start, Queue::new(), visitor)
    }

    /// 深度优先遍历
    pub fn dfs<F>(&self, start: &T, visitor: F) -> Result<()>
    where
        F: FnMut(&Vertex<T>),
    {
        self.traverse(start, Stack::new(), visitor)
    }

    /// 广度优先访问顺序
    pub fn bfs_order(&self, start: &T) -> Result<Vec<&'a T>> {
        let mut ids = Vec::new();
        self.bfs(start, |v| ids.push(v.id()))?;
        Ok(self.elements(ids))
    }

    /// 深度优先访问顺序
    pub fn dfs_order(&self, start: &T) -> Result<Vec<&'a T>> {
        let mut ids = Vec::new();
        self.dfs(start, |v| ids.push(v.id()))?;
        Ok(self.elements(ids))
    }

    fn elements(&self, ids: Vec<VertexId>) -> Vec<&'a T> {
        let graph = self.graph;
        ids.into_iter()
            .filter_map(|id| graph.get(id).map(Vertex::element))
            .collect()
    }
}
