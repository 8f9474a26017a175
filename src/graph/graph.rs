//! 图数据结构
//!
//! 无向带权图：顶点存放在按槽位寻址的存储区中，邻居记录只保存
//! `(VertexId, 权重)`，每条边在两个端点各记录一次

use super::edge::Edge;
use super::vertex::{Neighbor, Vertex, VertexId};
use crate::algorithm::{PathFinder, PathResult, Prim, Traversal};
use crate::config::GraphConfig;
use crate::error::{Error, Result};
use indexmap::IndexSet;
use std::fmt;
use tracing::debug;

/// 默认边权重
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// 无向带权图
#[derive(Debug, Clone)]
pub struct Graph<T> {
    /// 顶点槽位
    slots: Vec<Option<Vertex<T>>>,
    /// 空闲槽位
    free: Vec<usize>,
    /// 插入顺序（唯一的迭代顺序来源）
    order: IndexSet<VertexId>,
    /// 边数量
    edges: usize,
    /// 配置
    config: GraphConfig,
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Graph<T> {
    /// 创建空图
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// 使用指定配置创建空图
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            order: IndexSet::new(),
            edges: 0,
            config,
        }
    }

    /// 获取配置
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// 替换配置
    pub fn set_config(&mut self, config: GraphConfig) {
        self.config = config;
    }

    /// 顶点数量
    pub fn vertex_count(&self) -> usize {
        self.order.len()
    }

    /// 边数量
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 清空所有顶点和边
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.order.clear();
        self.edges = 0;
        debug!("图已清空");
    }

    /// 按插入顺序迭代元素
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.vertices().map(Vertex::element)
    }

    /// 按插入顺序迭代顶点
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<T>> + '_ {
        self.order.iter().filter_map(move |&id| self.get(id))
    }

    /// 按插入顺序迭代顶点 ID
    pub fn ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.order.iter().copied()
    }

    /// 第一个加入的顶点
    pub fn first(&self) -> Option<&Vertex<T>> {
        self.order.first().and_then(|&id| self.get(id))
    }

    /// 通过 ID 获取顶点
    pub fn get(&self, id: VertexId) -> Option<&Vertex<T>> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// 通过 ID 获取顶点，句柄失效时返回参数错误
    pub fn vertex_by_id(&self, id: VertexId) -> Result<&Vertex<T>> {
        self.get(id)
            .ok_or_else(|| Error::InvalidArgument(format!("无效的顶点句柄: {:?}", id)))
    }

    /// 对每个顶点按插入顺序执行动作
    pub fn for_each_vertex<F>(&self, mut action: F)
    where
        F: FnMut(&Vertex<T>),
    {
        for vertex in self.vertices() {
            action(vertex);
        }
    }

    /// 槽位数量，算法侧表按此大小分配
    pub(crate) fn slot_capacity(&self) -> usize {
        self.slots.len()
    }

    /// 顶点在插入顺序中的位置
    pub(crate) fn position(&self, id: VertexId) -> Option<usize> {
        self.order.get_index_of(&id)
    }

    /// 按插入顺序迭代边，每条无向边只出现一次
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_, T>> + '_ {
        self.order.iter().enumerate().flat_map(move |(pos, &id)| {
            self.get(id).into_iter().flat_map(move |vertex| {
                vertex.neighbors().iter().filter_map(move |n| {
                    let other = self.get(n.vertex)?;
                    match self.position(n.vertex) {
                        Some(p) if p > pos => {
                            Some(Edge::new(vertex.element(), other.element(), n.weight))
                        }
                        _ => None,
                    }
                })
            })
        })
    }

    /// 所有边的权重之和
    pub fn total_weight(&self) -> f64 {
        self.edges().map(|e| e.weight).sum()
    }

    fn get_mut(&mut self, id: VertexId) -> Option<&mut Vertex<T>> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    fn vertex_mut(&mut self, id: VertexId) -> Result<&mut Vertex<T>> {
        self.get_mut(id)
            .ok_or_else(|| Error::InvalidArgument(format!("无效的顶点句柄: {:?}", id)))
    }
}

/// 校验边权重：必须是有限的非负数
fn validate_weight(weight: f64) -> Result<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(Error::InvalidArgument(format!("无效的边权重: {}", weight)));
    }
    Ok(())
}

impl<T: PartialEq> Graph<T> {
    // ==================== 成员查询 ====================

    /// 按相等性线性查找元素对应的顶点 ID
    pub fn find(&self, element: &T) -> Option<VertexId> {
        self.vertices()
            .find(|v| v.element() == element)
            .map(Vertex::id)
    }

    /// 查找元素，不存在时返回 NotFound
    pub(crate) fn require(&self, element: &T) -> Result<VertexId> {
        self.find(element)
            .ok_or_else(|| Error::NotFound("元素不在图中".to_string()))
    }

    /// 元素是否在图中
    pub fn contains(&self, element: &T) -> bool {
        self.find(element).is_some()
    }

    /// 获取元素对应的顶点
    pub fn vertex(&self, element: &T) -> Result<&Vertex<T>> {
        let id = self.require(element)?;
        self.vertex_by_id(id)
    }

    /// 元素对应顶点的度
    pub fn degree(&self, element: &T) -> Result<usize> {
        Ok(self.vertex(element)?.degree())
    }

    /// 元素的邻居及边权重，按连接顺序排列
    pub fn neighbors(&self, element: &T) -> Result<Vec<(&T, f64)>> {
        let vertex = self.vertex(element)?;
        Ok(vertex
            .neighbors()
            .iter()
            .filter_map(|n| self.get(n.vertex).map(|v| (v.element(), n.weight)))
            .collect())
    }

    // ==================== 顶点操作 ====================

    /// 添加元素
    pub fn add(&mut self, element: T) -> Result<VertexId> {
        if self.contains(&element) {
            return Err(Error::InvalidArgument("元素已在图中".to_string()));
        }

        let id = match self.free.pop() {
            Some(slot) => VertexId::new(slot),
            None => {
                self.slots.push(None);
                VertexId::new(self.slots.len() - 1)
            }
        };
        self.slots[id.index()] = Some(Vertex::new(id, element));
        self.order.insert(id);

        debug!(vertex = id.index(), "添加顶点");
        Ok(id)
    }

    /// 删除元素及其所有关联边
    pub fn remove(&mut self, element: &T) -> Result<()> {
        let id = self.require(element)?;
        let neighbor_ids: Vec<VertexId> = self
            .vertex_by_id(id)?
            .neighbors()
            .iter()
            .map(|n| n.vertex)
            .collect();

        let mut stripped = 0;
        for neighbor in neighbor_ids {
            if let Some(v) = self.get_mut(neighbor) {
                stripped += v.strip_neighbor(id);
            }
        }

        self.slots[id.index()] = None;
        self.free.push(id.index());
        self.order.shift_remove(&id);
        self.edges -= stripped;

        debug!(vertex = id.index(), edges_removed = stripped, "删除顶点");
        Ok(())
    }

    // ==================== 边操作 ====================

    /// 以默认权重连接两个元素
    pub fn connect(&mut self, a: &T, b: &T) -> Result<()> {
        self.connect_weighted(a, b, DEFAULT_WEIGHT)
    }

    /// 以指定权重连接两个元素
    pub fn connect_weighted(&mut self, a: &T, b: &T, weight: f64) -> Result<()> {
        let ia = self.require(a)?;
        let ib = self.require(b)?;
        self.connect_ids(ia, ib, weight)
    }

    /// 通过顶点 ID 连接
    pub fn connect_ids(&mut self, a: VertexId, b: VertexId, weight: f64) -> Result<()> {
        if a == b {
            return Err(Error::InvalidArgument("不能将顶点与自身连接".to_string()));
        }
        validate_weight(weight)?;
        if self.vertex_by_id(a)?.is_adjacent_to(b) {
            return Err(Error::InvalidArgument("两个元素已经连接".to_string()));
        }
        self.vertex_by_id(b)?;

        self.vertex_mut(a)?.push_neighbor(Neighbor::new(b, weight));
        self.vertex_mut(b)?.push_neighbor(Neighbor::new(a, weight));
        self.edges += 1;

        debug!(a = a.index(), b = b.index(), weight, "连接顶点");
        Ok(())
    }

    /// 断开两个元素
    pub fn disconnect(&mut self, a: &T, b: &T) -> Result<()> {
        let ia = self.require(a)?;
        let ib = self.require(b)?;
        if !self.vertex_by_id(ia)?.is_adjacent_to(ib) {
            return Err(Error::InvalidArgument("两个元素没有连接".to_string()));
        }

        self.vertex_mut(ia)?.strip_neighbor(ib);
        self.vertex_mut(ib)?.strip_neighbor(ia);
        self.edges -= 1;

        debug!(a = ia.index(), b = ib.index(), "断开顶点");
        Ok(())
    }

    /// 两个元素是否相邻
    pub fn are_neighbors(&self, a: &T, b: &T) -> Result<bool> {
        let ia = self.require(a)?;
        let ib = self.require(b)?;
        Ok(self.vertex_by_id(ia)?.is_adjacent_to(ib))
    }

    /// 获取两个元素之间的边权重
    pub fn edge_weight(&self, a: &T, b: &T) -> Result<f64> {
        let ia = self.require(a)?;
        let ib = self.require(b)?;
        self.vertex_by_id(ia)?
            .neighbor(ib)
            .map(|n| n.weight)
            .ok_or_else(|| Error::InvalidArgument("两个元素没有连接".to_string()))
    }

    /// 修改两个元素之间的边权重（两端同时修改）
    pub fn set_edge_weight(&mut self, a: &T, b: &T, weight: f64) -> Result<()> {
        let ia = self.require(a)?;
        let ib = self.require(b)?;
        if !self.vertex_by_id(ia)?.is_adjacent_to(ib) {
            return Err(Error::InvalidArgument("两个元素没有连接".to_string()));
        }
        validate_weight(weight)?;

        for (from, to) in [(ia, ib), (ib, ia)] {
            if let Some(n) = self.vertex_mut(from)?.neighbor_mut(to) {
                n.weight = weight;
            }
        }
        Ok(())
    }

    // ==================== 算法 ====================

    /// 从 start 开始广度优先遍历
    pub fn bfs<F>(&self, start: &T, visitor: F) -> Result<()>
    where
        F: FnMut(&Vertex<T>),
    {
        Traversal::new(self).bfs(start, visitor)
    }

    /// 从 start 开始深度优先遍历
    pub fn dfs<F>(&self, start: &T, visitor: F) -> Result<()>
    where
        F: FnMut(&Vertex<T>),
    {
        Traversal::new(self).dfs(start, visitor)
    }

    /// 图是否连通
    pub fn is_connected(&self) -> bool {
        Traversal::new(self).is_connected()
    }

    /// 连通分量个数
    pub fn connected_components(&self) -> usize {
        Traversal::new(self).component_count()
    }

    /// 无权最短路径（最少边数）
    pub fn shortest_path(&self, origin: &T, destination: &T) -> Result<PathResult<'_, T>> {
        PathFinder::new(self).shortest_path(origin, destination)
    }

    /// 带权最短路径（Dijkstra）
    pub fn dijkstra(&self, origin: &T, destination: &T) -> Result<PathResult<'_, T>> {
        PathFinder::new(self).dijkstra(origin, destination)
    }

    /// 最小生成树（Prim）
    pub fn minimum_spanning_tree(&self) -> Result<Graph<T>>
    where
        T: Clone,
    {
        Prim::new(self).minimum_spanning_tree()
    }
}

impl<'a, T> IntoIterator for &'a Graph<T> {
    type Item = &'a T;
    type IntoIter = Box<dyn Iterator<Item = &'a T> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// 结构相等：顶点集合与邻接关系相同，不比较权重
impl<T: PartialEq> PartialEq for Graph<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.edges != other.edges || self.vertex_count() != other.vertex_count() {
            return false;
        }
        if !self.iter().all(|e| other.contains(e)) {
            return false;
        }
        self.edges()
            .all(|e| matches!(other.are_neighbors(e.a, e.b), Ok(true)))
    }
}

impl<T: fmt::Display> fmt::Display for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, element) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", element)?;
        }
        write!(f, "}}, {{")?;
        for (i, edge) in self.edges().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {})", edge.a, edge.b)?;
        }
        write!(f, "}}")
    }
}
