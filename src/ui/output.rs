//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Command results go to stdout and respect the quiet flag. Errors and
//! warnings go to stderr. Rendering is split from printing so the text of
//! `info` and `list` can be checked without capturing stdout.

use std::fmt::{Display, Write as _};

use crate::core::graph::BranchGraph;
use crate::core::metadata::{BranchEntity, BranchStore};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
}

impl Verbosity {
    /// Create verbosity from the quiet flag.
    pub fn from_quiet(quiet: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message in red (always shown).
pub fn warn(message: impl Display) {
    eprintln!("{}", red(message));
}

/// Wrap text in ANSI red.
pub fn red(message: impl Display) -> String {
    format!("\x1b[31m{}\x1b[0m", message)
}

/// Render an ancestry chain, root first, one level of indent per generation.
pub fn format_lineage(chain: &[&BranchEntity]) -> String {
    chain
        .iter()
        .enumerate()
        .map(|(depth, entity)| format!("{}{}", "  ".repeat(depth), entity))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render every stored branch as a tree.
///
/// Roots and children are visited in name order. The current branch is
/// marked with `* `, every other line with two spaces.
pub fn format_tree(store: &BranchStore, graph: &BranchGraph, current: Option<&str>) -> String {
    let mut out = String::new();
    for root in graph.roots() {
        write_subtree(&mut out, store, graph, current, root, 0);
    }
    if out.ends_with('\n') {
        out.pop();
    }
    out
}

fn write_subtree(
    out: &mut String,
    store: &BranchStore,
    graph: &BranchGraph,
    current: Option<&str>,
    name: &str,
    depth: usize,
) {
    let Some(entity) = store.get(name) else {
        return;
    };
    let mark = if current == Some(name) { "* " } else { "  " };
    let _ = writeln!(out, "{}{}{}", mark, "  ".repeat(depth), entity);
    for child in graph.children(name) {
        write_subtree(out, store, graph, current, child, depth + 1);
    }
}
