//! Per-depth search instrumentation.

use std::fmt;

/// Counters gathered while a [`Matrix`](crate::Matrix) searches: options
/// selected ("nodes") and link removals ("updates"), indexed by recursion
/// depth. Reset at depth 0 of every solve.
///
/// The [`Display`](fmt::Display) impl renders the classic table, one row
/// per level plus a totals row:
///
/// ```text
/// level   nodes   updates updates/node
/// 0       2       13      6.50
/// 1       2       9       4.50
/// total   4       22      5.50
/// ```
#[derive(Default)]
#[cfg_attr(test, derive(Debug))]
pub struct SearchStats {
    depth: usize,
    nodes: Vec<u64>,
    updates: Vec<u64>,
}

impl SearchStats {
    pub(crate) fn reset(&mut self) {
        self.depth = 0;
        self.nodes.clear();
        self.updates.clear();
    }

    pub(crate) fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
        if self.nodes.len() <= depth {
            self.nodes.resize(depth + 1, 0);
            self.updates.resize(depth + 1, 0);
        }
    }

    pub(crate) fn node_visited(&mut self) {
        self.nodes[self.depth] += 1;
    }

    pub(crate) fn update(&mut self) {
        self.updates[self.depth] += 1;
    }

    /// Number of recursion levels reached.
    pub fn levels(&self) -> usize {
        self.nodes.len()
    }

    /// Options selected at the given depth.
    pub fn nodes_at(&self, depth: usize) -> u64 {
        self.nodes.get(depth).copied().unwrap_or(0)
    }

    /// Link removals performed at the given depth.
    pub fn updates_at(&self, depth: usize) -> u64 {
        self.updates.get(depth).copied().unwrap_or(0)
    }

    pub fn total_nodes(&self) -> u64 {
        self.nodes.iter().sum()
    }

    pub fn total_updates(&self) -> u64 {
        self.updates.iter().sum()
    }
}

fn per_node(updates: u64, nodes: u64) -> f64 {
    if nodes == 0 {
        0.0
    } else {
        updates as f64 / nodes as f64
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "level\tnodes\tupdates\tupdates/node")?;
        for depth in 0..self.levels() {
            writeln!(
                f,
                "{}\t{}\t{}\t{:.2}",
                depth,
                self.nodes[depth],
                self.updates[depth],
                per_node(self.updates[depth], self.nodes[depth])
            )?;
        }
        write!(
            f,
            "total\t{}\t{}\t{:.2}",
            self.total_nodes(),
            self.total_updates(),
            per_node(self.total_updates(), self.total_nodes())
        )
    }
}
