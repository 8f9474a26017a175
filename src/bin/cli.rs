//! ugraph 命令行工具
//!
//! 从边列表文件构建图并运行遍历、最短路径和最小生成树算法

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use ugraph::algorithm::Traversal;
use ugraph::cli::{PrintMode, Printer};
use ugraph::collections::PriorityStrategy;
use ugraph::config::GraphConfig;
use ugraph::import::{EdgeListImporter, ImportFormat};

#[derive(Parser, Debug)]
#[command(name = "ugraph")]
#[command(about = "无向带权图算法工具")]
struct Args {
    /// 输入文件路径（边列表）
    #[arg(short, long)]
    input: PathBuf,

    /// 输入格式: csv, jsonl（默认按扩展名推断）
    #[arg(short, long)]
    format: Option<ImportFormat>,

    /// 优先结构策略: auto, heap, array
    #[arg(short, long, default_value = "auto")]
    priority: PriorityStrategy,

    /// 以 JSON 输出
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 图统计信息
    Info,
    /// 广度优先遍历
    Bfs { start: String },
    /// 深度优先遍历
    Dfs { start: String },
    /// 无权最短路径
    Path { from: String, to: String },
    /// 带权最短路径
    Dijkstra { from: String, to: String },
    /// 最小生成树
    Mst,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ugraph=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = GraphConfig::new().with_priority(args.priority);
    let (graph, stats) = EdgeListImporter::new()
        .with_config(config)
        .import_path(&args.input, args.format)
        .with_context(|| format!("无法导入 {}", args.input.display()))?;
    if stats.errors > 0 {
        eprintln!("警告: {} 条记录被跳过", stats.errors);
    }

    let mode = if args.json {
        PrintMode::Json
    } else {
        PrintMode::Table
    };
    let printer = Printer::new(mode);

    let output = match args.command {
        Command::Info => printer.print_info(&graph),
        Command::Bfs { start } => printer.print_order(&Traversal::new(&graph).bfs_order(&start)?),
        Command::Dfs { start } => printer.print_order(&Traversal::new(&graph).dfs_order(&start)?),
        Command::Path { from, to } => printer.print_path(&graph.shortest_path(&from, &to)?),
        Command::Dijkstra { from, to } => printer.print_path(&graph.dijkstra(&from, &to)?),
        Command::Mst => printer.print_tree(&graph.minimum_spanning_tree()?),
    };

    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
