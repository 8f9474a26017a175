//! 结果打印器
//!
//! 以表格或 JSON 格式输出算法结果

use crate::algorithm::PathResult;
use crate::graph::Graph;
use prettytable::{format, row, Table};
use serde::Serialize;
use serde_json::json;
use std::fmt::Display;

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// JSON 模式
    Json,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    fn new_table() -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table
    }

    fn to_json<S: Serialize>(value: &S) -> String {
        serde_json::to_string_pretty(value).unwrap_or_default()
    }

    /// 打印图统计信息
    pub fn print_info<T: PartialEq>(&self, graph: &Graph<T>) -> String {
        let connected = graph.is_connected();
        let components = graph.connected_components();

        match self.mode {
            PrintMode::Json => Self::to_json(&json!({
                "vertices": graph.vertex_count(),
                "edges": graph.edge_count(),
                "connected": connected,
                "components": components,
                "total_weight": graph.total_weight(),
            })),
            PrintMode::Table => {
                let mut table = Self::new_table();
                table.set_titles(row!["Property", "Value"]);
                table.add_row(row!["Vertex Count", graph.vertex_count()]);
                table.add_row(row!["Edge Count", graph.edge_count()]);
                table.add_row(row!["Connected", connected]);
                table.add_row(row!["Components", components]);
                table.add_row(row!["Total Weight", graph.total_weight()]);
                table.to_string()
            }
        }
    }

    /// 打印遍历顺序
    pub fn print_order<T: Display + Serialize>(&self, order: &[&T]) -> String {
        match self.mode {
            PrintMode::Json => Self::to_json(&order),
            PrintMode::Table => {
                let mut table = Self::new_table();
                table.set_titles(row!["#", "Vertex"]);
                for (i, element) in order.iter().enumerate() {
                    table.add_row(row![i + 1, element]);
                }
                format!("{}{} vertex(es) visited\n", table, order.len())
            }
        }
    }

    /// 打印路径
    pub fn print_path<T: Display + Serialize>(&self, path: &PathResult<'_, T>) -> String {
        match self.mode {
            PrintMode::Json => Self::to_json(path),
            PrintMode::Table if path.is_empty() => "No path (unreachable)\n".to_string(),
            PrintMode::Table => {
                let route = path
                    .vertices
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(" -> ");
                let mut table = Self::new_table();
                table.set_titles(row!["Path", "Length", "Total Weight"]);
                table.add_row(row![route, path.length, path.total_weight]);
                table.to_string()
            }
        }
    }

    /// 打印生成树的边
    pub fn print_tree<T: Display + Serialize>(&self, tree: &Graph<T>) -> String {
        match self.mode {
            PrintMode::Json => Self::to_json(&json!({
                "vertices": tree.iter().collect::<Vec<_>>(),
                "edges": tree.edges().collect::<Vec<_>>(),
                "total_weight": tree.total_weight(),
            })),
            PrintMode::Table => {
                let mut table = Self::new_table();
                table.set_titles(row!["From", "To", "Weight"]);
                for edge in tree.edges() {
                    table.add_row(row![edge.a, edge.b, edge.weight]);
                }
                format!(
                    "{}{} edge(s), total weight {}\n",
                    table,
                    tree.edge_count(),
                    tree.total_weight()
                )
            }
        }
    }
}
