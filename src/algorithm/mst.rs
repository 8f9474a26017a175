//! 最小生成树（Prim 算法）

use super::traversal::Color;
use crate::collections::Distance;
use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use tracing::{debug, trace};

/// Prim 最小生成树构建器
pub struct Prim<'a, T> {
    graph: &'a Graph<T>,
}

impl<'a, T: PartialEq + Clone> Prim<'a, T> {
    /// 创建构建器
    pub fn new(graph: &'a Graph<T>) -> Self {
        Self { graph }
    }

    /// 构建最小生成树，结果为只包含树边的新图
    ///
    /// 图中没有边时返回 NotFound，图不连通时返回 InvalidState
    pub fn minimum_spanning_tree(&self) -> Result<Graph<T>> {
        let graph = self.graph;
        if graph.edge_count() == 0 {
            return Err(Error::NotFound("图中没有边".to_string()));
        }
        if !graph.is_connected() {
            return Err(Error::InvalidState("图不连通，无法构建最小生成树".to_string()));
        }

        let capacity = graph.slot_capacity();
        let mut colors = vec![Color::Unvisited; capacity];
        let mut keys = vec![f64::INFINITY; capacity];
        let mut parents: Vec<Option<VertexId>> = vec![None; capacity];
        // 原图槽位 -> 生成树中的顶点 ID
        let mut tree_ids: Vec<Option<VertexId>> = vec![None; capacity];

        if let Some(first) = graph.first() {
            keys[first.id().index()] = 0.0;
        }

        let mut queue = graph
            .config()
            .priority
            .build(graph.vertex_count(), graph.edge_count());
        for id in graph.ids() {
            queue.push(id, Distance(keys[id.index()]));
        }

        let mut tree = Graph::with_config(*graph.config());

        while let Some((current, _)) = queue.pop_min() {
            let slot = current.index();
            if colors[slot] == Color::Visited {
                continue;
            }
            let vertex = graph.vertex_by_id(current)?;

            let tree_id = tree.add(vertex.element().clone())?;
            tree_ids[slot] = Some(tree_id);
            colors[slot] = Color::Visited;

            if let Some(parent) = parents[slot] {
                let parent_id = tree_ids[parent.index()].ok_or_else(|| {
                    Error::InvalidState("生成树父顶点尚未加入".to_string())
                })?;
                tree.connect_ids(parent_id, tree_id, keys[slot])?;
                trace!(parent = parent.index(), vertex = slot, weight = keys[slot], "加入树边");
            }

            for neighbor in vertex.neighbors() {
                let other = neighbor.vertex.index();
                if colors[other] != Color::Visited && neighbor.weight < keys[other] {
                    keys[other] = neighbor.weight;
                    parents[other] = Some(current);
                    queue.decrease_key(&neighbor.vertex, Distance(neighbor.weight));
                }
            }
        }

        debug!(
            vertices = tree.vertex_count(),
            edges = tree.edge_count(),
            total_weight = tree.total_weight(),
            "最小生成树构建完成"
        );
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::PriorityStrategy;
    use crate::config::GraphConfig;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn build(n: u32, edges: &[(u32, u32, f64)]) -> Graph<u32> {
        let mut g = Graph::new();
        for i in 0..n {
            g.add(i).unwrap();
        }
        for &(a, b, w) in edges {
            g.connect_weighted(&a, &b, w).unwrap();
        }
        g
    }

    /// 枚举所有 n-1 条边的子集，求生成树最小权重
    fn brute_force_weight(n: u32, edges: &[(u32, u32, f64)]) -> f64 {
        let m = edges.len();
        let mut best = f64::INFINITY;
        for mask in 0u32..(1 << m) {
            if mask.count_ones() != n - 1 {
                continue;
            }
            let chosen: Vec<_> = edges
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, e)| *e)
                .collect();
            let candidate = build(n, &chosen);
            if candidate.is_connected() {
                best = best.min(chosen.iter().map(|e| e.2).sum());
            }
        }
        best
    }

    fn assert_spanning_tree(g: &Graph<u32>, tree: &Graph<u32>) {
        assert_eq!(tree.vertex_count(), g.vertex_count());
        assert_eq!(tree.edge_count(), g.vertex_count() - 1);
        assert!(tree.is_connected());
        for edge in tree.edges() {
            assert_eq!(g.edge_weight(edge.a, edge.b).unwrap(), edge.weight);
        }
    }

    #[test]
    fn test_mst_four_vertices() {
        let edges = [
            (0, 1, 1.0),
            (1, 2, 2.0),
            (0, 2, 4.0),
            (2, 3, 1.0),
            (0, 3, 3.0),
        ];
        let g = build(4, &edges);
        let tree = Prim::new(&g).minimum_spanning_tree().unwrap();

        assert_spanning_tree(&g, &tree);
        assert_eq!(tree.total_weight(), 4.0);
        assert_eq!(tree.total_weight(), brute_force_weight(4, &edges));
        assert!(tree.are_neighbors(&0, &1).unwrap());
        assert!(tree.are_neighbors(&1, &2).unwrap());
        assert!(tree.are_neighbors(&2, &3).unwrap());
    }

    #[test]
    fn test_mst_triangle() {
        let edges = [(0, 1, 3.0), (1, 2, 1.0), (0, 2, 2.0)];
        let g = build(3, &edges);
        let tree = g.minimum_spanning_tree().unwrap();

        assert_spanning_tree(&g, &tree);
        assert_eq!(tree.total_weight(), 3.0);
        assert!(!tree.are_neighbors(&0, &1).unwrap());
    }

    #[test]
    fn test_mst_cycle() {
        // 环 0-1-2-3-4-5-0，最重边应被舍弃
        let edges = [
            (0, 1, 2.0),
            (1, 2, 2.0),
            (2, 3, 9.0),
            (3, 4, 1.0),
            (4, 5, 2.0),
            (5, 0, 3.0),
        ];
        let g = build(6, &edges);
        let tree = g.minimum_spanning_tree().unwrap();

        assert_spanning_tree(&g, &tree);
        assert!(!tree.are_neighbors(&2, &3).unwrap());
        assert_eq!(tree.total_weight(), 10.0);
    }

    #[test]
    fn test_mst_single_edge() {
        let g = build(2, &[(0, 1, 5.0)]);
        let tree = g.minimum_spanning_tree().unwrap();
        assert_eq!(tree, g);
        assert_eq!(tree.edge_weight(&0, &1).unwrap(), 5.0);
    }

    #[test]
    fn test_mst_errors() {
        let g = build(3, &[]);
        assert!(g.minimum_spanning_tree().unwrap_err().is_not_found());

        let empty: Graph<u32> = Graph::new();
        assert!(empty.minimum_spanning_tree().unwrap_err().is_not_found());

        let g = build(4, &[(0, 1, 1.0), (2, 3, 1.0)]);
        assert!(g.minimum_spanning_tree().unwrap_err().is_invalid_state());
    }

    #[test]
    fn test_mst_keeps_config() {
        let mut g = build(3, &[(0, 1, 1.0), (1, 2, 1.0)]);
        let config = GraphConfig::new().with_priority(PriorityStrategy::Array);
        g.set_config(config);
        let tree = g.minimum_spanning_tree().unwrap();
        assert_eq!(*tree.config(), config);
    }

    #[test]
    fn test_mst_after_slot_reuse() {
        let mut g = build(6, &[
            (0, 1, 1.0),
            (1, 2, 1.0),
            (0, 3, 2.0),
            (3, 4, 1.0),
            (4, 5, 1.0),
            (3, 2, 3.0),
        ]);
        let freed = g.find(&1).unwrap();
        g.remove(&1).unwrap();
        g.remove(&5).unwrap();
        assert_eq!(g.add(7).unwrap(), freed);
        g.connect_weighted(&7, &0, 0.5).unwrap();

        for strategy in [PriorityStrategy::Heap, PriorityStrategy::Array] {
            g.set_config(GraphConfig::new().with_priority(strategy));
            let tree = g.minimum_spanning_tree().unwrap();
            assert_spanning_tree(&g, &tree);
            assert_eq!(tree.edge_count(), 4);
            assert_eq!(tree.total_weight(), 6.5);
            assert_eq!(tree.to_string(), "{0, 7, 3, 4, 2}, {(0, 7), (0, 3), (3, 4), (3, 2)}");
        }
    }

    #[test]
    fn test_mst_matches_brute_force_random() {
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..30 {
            let n = rng.gen_range(3..7u32);
            let mut edges = Vec::new();
            // 先连一条链保证连通，再随机加边
            for i in 1..n {
                let w = rng.gen_range(1..10) as f64;
                edges.push((i - 1, i, w));
            }
            for _ in 0..n {
                let a = rng.gen_range(0..n);
                let b = rng.gen_range(0..n);
                let exists = edges
                    .iter()
                    .any(|&(x, y, _)| (x == a && y == b) || (x == b && y == a));
                if a != b && !exists {
                    edges.push((a, b, rng.gen_range(1..10) as f64));
                }
            }

            let g = build(n, &edges);
            let expected = brute_force_weight(n, &edges);
            for strategy in [PriorityStrategy::Heap, PriorityStrategy::Array] {
                let mut h = g.clone();
                h.set_config(GraphConfig::new().with_priority(strategy));
                let tree = h.minimum_spanning_tree().unwrap();
                assert_spanning_tree(&g, &tree);
                assert_eq!(tree.total_weight(), expected);
            }
        }
    }
}
