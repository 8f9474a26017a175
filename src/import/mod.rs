//! 数据导入模块
//!
//! 从 CSV 或 JSON Lines 边列表构建 `Graph<String>`

use crate::config::GraphConfig;
use crate::error::{Error, Result};
use crate::graph::{Graph, DEFAULT_WEIGHT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;
use tracing::{info, warn};

/// 导入统计
#[derive(Debug, Default, Clone, Serialize)]
pub struct ImportStats {
    pub vertices_imported: usize,
    pub edges_imported: usize,
    pub errors: usize,
    pub duration_ms: u64,
}

/// 输入格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    JsonLines,
}

impl ImportFormat {
    /// 按扩展名推断格式，无法识别时按 CSV 处理
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("jsonl") | Some("ndjson") => ImportFormat::JsonLines,
            _ => ImportFormat::Csv,
        }
    }
}

impl FromStr for ImportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ImportFormat::Csv),
            "jsonl" | "json" | "ndjson" => Ok(ImportFormat::JsonLines),
            other => Err(Error::ParseError(format!("不支持的格式: {}", other))),
        }
    }
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportFormat::Csv => f.write_str("csv"),
            ImportFormat::JsonLines => f.write_str("jsonl"),
        }
    }
}

/// 边列表中的一条记录；target 为空时只添加孤立顶点
#[derive(Debug, Clone, Deserialize)]
struct EdgeRecord {
    source: String,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    weight: Option<f64>,
}

/// 边列表导入器
#[derive(Debug, Default)]
pub struct EdgeListImporter {
    config: GraphConfig,
}

impl EdgeListImporter {
    /// 创建导入器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置生成图的配置
    pub fn with_config(mut self, config: GraphConfig) -> Self {
        self.config = config;
        self
    }

    /// 从文件导入，格式为 None 时按扩展名推断
    pub fn import_path<P: AsRef<Path>>(
        &self,
        path: P,
        format: Option<ImportFormat>,
    ) -> Result<(Graph<String>, ImportStats)> {
        let path = path.as_ref();
        let format = format.unwrap_or_else(|| ImportFormat::from_path(path));
        let file = File::open(path)?;

        match format {
            ImportFormat::Csv => self.import_csv(file),
            ImportFormat::JsonLines => self.import_jsonl(BufReader::new(file)),
        }
    }

    /// 从 CSV 导入，表头为 source,target,weight
    pub fn import_csv<R: Read>(&self, reader: R) -> Result<(Graph<String>, ImportStats)> {
        let start = Instant::now();
        let mut graph = Graph::with_config(self.config);
        let mut stats = ImportStats::default();

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (line, record) in reader.deserialize::<EdgeRecord>().enumerate() {
            let outcome = record
                .map_err(|e| Error::ParseError(e.to_string()))
                .and_then(|record| apply_record(&mut graph, record, &mut stats));
            if let Err(e) = outcome {
                // 表头占第一行
                warn!(line = line + 2, error = %e, "跳过无效记录");
                stats.errors += 1;
            }
        }

        finish(graph, stats, start)
    }

    /// 从 JSON Lines 导入
    pub fn import_jsonl<R: BufRead>(&self, reader: R) -> Result<(Graph<String>, ImportStats)> {
        let start = Instant::now();
        let mut graph = Graph::with_config(self.config);
        let mut stats = ImportStats::default();

        for (line, text) in reader.lines().enumerate() {
            let text = text?;
            if text.trim().is_empty() {
                continue;
            }
            let outcome = serde_json::from_str::<EdgeRecord>(&text)
                .map_err(|e| Error::ParseError(format!("JSON 解析错误: {}", e)))
                .and_then(|record| apply_record(&mut graph, record, &mut stats));
            if let Err(e) = outcome {
                warn!(line = line + 1, error = %e, "跳过无效记录");
                stats.errors += 1;
            }
        }

        finish(graph, stats, start)
    }
}

/// 记录全部无效时视为格式错误
fn finish(
    graph: Graph<String>,
    mut stats: ImportStats,
    start: Instant,
) -> Result<(Graph<String>, ImportStats)> {
    stats.duration_ms = start.elapsed().as_millis() as u64;
    if stats.errors > 0 && stats.vertices_imported == 0 {
        return Err(Error::ImportError(format!(
            "全部 {} 条记录无效，请检查输入格式",
            stats.errors
        )));
    }
    info!(
        vertices = stats.vertices_imported,
        edges = stats.edges_imported,
        errors = stats.errors,
        "导入完成"
    );
    Ok((graph, stats))
}

/// 首次出现的元素加入图中
fn ensure_vertex(graph: &mut Graph<String>, name: &str, stats: &mut ImportStats) -> Result<()> {
    if name.is_empty() {
        return Err(Error::ImportError("顶点名为空".to_string()));
    }
    let name = name.to_string();
    if !graph.contains(&name) {
        graph.add(name)?;
        stats.vertices_imported += 1;
    }
    Ok(())
}

fn apply_record(
    graph: &mut Graph<String>,
    record: EdgeRecord,
    stats: &mut ImportStats,
) -> Result<()> {
    let source = record.source.trim();
    ensure_vertex(graph, source, stats)?;

    let Some(target) = record.target.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(());
    };
    ensure_vertex(graph, target, stats)?;

    let weight = record.weight.unwrap_or(DEFAULT_WEIGHT);
    graph.connect_weighted(&source.to_string(), &target.to_string(), weight)?;
    stats.edges_imported += 1;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "source,target,weight
A,B,1
B,C,2
A,C,4
C,D,
E,,
A,B,3
F,F,1
";

    #[test]
    fn test_import_csv() {
        let (graph, stats) = EdgeListImporter::new().import_csv(CSV.as_bytes()).unwrap();

        assert_eq!(graph.vertex_count(), 6);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(stats.vertices_imported, 6);
        assert_eq!(stats.edges_imported, 4);
        // 重复边与自环
        assert_eq!(stats.errors, 2);

        let c = "C".to_string();
        let d = "D".to_string();
        assert_eq!(graph.edge_weight(&c, &d).unwrap(), DEFAULT_WEIGHT);
        assert_eq!(graph.degree(&"E".to_string()).unwrap(), 0);
    }

    #[test]
    fn test_import_csv_bad_weight() {
        let data = "source,target,weight\nA,B,heavy\nA,B,-1\nA,B,2.5\n";
        let (graph, stats) = EdgeListImporter::new().import_csv(data.as_bytes()).unwrap();

        assert_eq!(stats.errors, 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(
            graph.edge_weight(&"A".to_string(), &"B".to_string()).unwrap(),
            2.5
        );
    }

    #[test]
    fn test_import_jsonl() {
        let data = r#"{"source": "x", "target": "y", "weight": 2.0}
{"source": "y", "target": "z"}

{"source": "w"}
not json
"#;
        let (graph, stats) = EdgeListImporter::new()
            .import_jsonl(data.as_bytes())
            .unwrap();

        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(stats.errors, 1);
        assert!(!graph.is_connected());
    }

    #[test]
    fn test_import_path_detects_format() {
        let mut file = tempfile::Builder::new().suffix(".jsonl").tempfile().unwrap();
        writeln!(file, r#"{{"source": "a", "target": "b", "weight": 1.5}}"#).unwrap();
        file.flush().unwrap();

        let (graph, stats) = EdgeListImporter::new().import_path(file.path(), None).unwrap();
        assert_eq!(stats.edges_imported, 1);
        assert_eq!(graph.total_weight(), 1.5);
    }

    #[test]
    fn test_import_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = EdgeListImporter::new()
            .import_path(dir.path().join("missing.csv"), None)
            .unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("CSV".parse::<ImportFormat>().unwrap(), ImportFormat::Csv);
        assert_eq!("ndjson".parse::<ImportFormat>().unwrap(), ImportFormat::JsonLines);
        assert!("xml".parse::<ImportFormat>().is_err());
        assert_eq!(ImportFormat::from_path("edges.JSONL"), ImportFormat::JsonLines);
        assert_eq!(ImportFormat::from_path("edges.txt"), ImportFormat::Csv);
        assert_eq!(ImportFormat::from_path("edges.json"), ImportFormat::Csv);
    }

    #[test]
    fn test_import_rejects_json_array() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, "[").unwrap();
        writeln!(file, r#"  {{"source": "a", "target": "b"}},"#).unwrap();
        writeln!(file, r#"  {{"source": "b", "target": "c"}}"#).unwrap();
        writeln!(file, "]").unwrap();
        file.flush().unwrap();

        let importer = EdgeListImporter::new();
        let err = importer.import_path(file.path(), None).unwrap_err();
        assert!(matches!(err, Error::ImportError(_)));

        let err = importer
            .import_path(file.path(), Some(ImportFormat::JsonLines))
            .unwrap_err();
        assert!(matches!(err, Error::ImportError(_)));
    }

    #[test]
    fn test_import_empty_input() {
        let (graph, stats) = EdgeListImporter::new()
            .import_csv("source,target,weight\n".as_bytes())
            .unwrap();
        assert!(graph.is_empty());
        assert_eq!(stats.errors, 0);
    }
}
