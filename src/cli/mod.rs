//! 命令行支持模块

mod printer;

pub use printer::{PrintMode, Printer};
