// src/dag/graph.rs

use std::collections::HashMap;

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graphmap::DiGraphMap;
use tracing::warn;

use crate::errors::{Result, ScheduleError, ScheduleWarning};
use crate::store::TaskInput;
use crate::types::DependencyType;

/// A resolved dependency edge. Direction: predecessor -> successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub kind: DependencyType,
    pub lag_days: i64,
}

/// Dependency graph over a task snapshot, borrowing ids from the input.
///
/// Predecessor references to unknown tasks are not turned into edges; they
/// are kept as [`ScheduleWarning`]s instead.
#[derive(Debug, Clone)]
pub struct TaskGraph<'a> {
    graph: DiGraphMap<&'a str, ()>,
    edges: Vec<Edge<'a>>,
    incoming: HashMap<&'a str, Vec<usize>>,
    outgoing: HashMap<&'a str, Vec<usize>>,
    warnings: Vec<ScheduleWarning>,
}

impl<'a> TaskGraph<'a> {
    /// Build the graph. Task ids are assumed unique.
    pub fn from_tasks(tasks: &'a [TaskInput]) -> Self {
        let mut graph: DiGraphMap<&'a str, ()> = DiGraphMap::new();
        let mut incoming: HashMap<&'a str, Vec<usize>> = HashMap::new();
        let mut outgoing: HashMap<&'a str, Vec<usize>> = HashMap::new();

        for task in tasks {
            graph.add_node(task.id.as_str());
            incoming.entry(task.id.as_str()).or_default();
            outgoing.entry(task.id.as_str()).or_default();
        }

        let mut edges = Vec::new();
        let mut warnings = Vec::new();

        for task in tasks {
            for pred in task.predecessors.iter() {
                if !graph.contains_node(pred.task_id.as_str()) {
                    warn!(
                        task = %task.id,
                        predecessor = %pred.task_id,
                        "dangling predecessor; edge excluded from this pass"
                    );
                    warnings.push(ScheduleWarning::DanglingPredecessor {
                        task: task.id.clone(),
                        predecessor: pred.task_id.clone(),
                    });
                    continue;
                }

                let idx = edges.len();
                edges.push(Edge {
                    from: pred.task_id.as_str(),
                    to: task.id.as_str(),
                    kind: pred.dependency_type,
                    lag_days: pred.lag_days,
                });
                graph.add_edge(pred.task_id.as_str(), task.id.as_str(), ());
                outgoing.entry(pred.task_id.as_str()).or_default().push(idx);
                incoming.entry(task.id.as_str()).or_default().push(idx);
            }
        }

        Self {
            graph,
            edges,
            incoming,
            outgoing,
            warnings,
        }
    }

    /// Task ids in dependency order (every predecessor before its successors).
    ///
    /// Fails with `CyclicDependency` naming one edge that closes a cycle.
    pub fn topological_order(&self) -> Result<Vec<&'a str>> {
        match toposort(&self.graph, None) {
            Ok(order) => Ok(order),
            Err(cycle) => {
                let node = cycle.node_id();
                let (from, to) = self.closing_edge(node);
                Err(ScheduleError::CyclicDependency {
                    from: from.to_string(),
                    to: to.to_string(),
                })
            }
        }
    }

    /// Pick an incoming edge of `node` whose source sits in the same strongly
    /// connected component (a self-loop qualifies).
    fn closing_edge(&self, node: &'a str) -> (&'a str, &'a str) {
        let sccs = tarjan_scc(&self.graph);
        let component = sccs.iter().find(|c| c.contains(&node));

        self.incoming_edges(node)
            .find(|e| component.is_some_and(|c| c.contains(&e.from)))
            .map(|e| (e.from, e.to))
            .unwrap_or((node, node))
    }

    pub fn incoming_edges(&self, id: &str) -> impl Iterator<Item = &Edge<'a>> + '_ {
        self.incoming
            .get(id)
            .into_iter()
            .flatten()
            .map(|&i| &self.edges[i])
    }

    pub fn outgoing_edges(&self, id: &str) -> impl Iterator<Item = &Edge<'a>> + '_ {
        self.outgoing
            .get(id)
            .into_iter()
            .flatten()
            .map(|&i| &self.edges[i])
    }

    pub fn has_successors(&self, id: &str) -> bool {
        self.outgoing.get(id).is_some_and(|v| !v.is_empty())
    }

    pub fn edges(&self) -> &[Edge<'a>] {
        &self.edges
    }

    pub fn warnings(&self) -> &[ScheduleWarning] {
        &self.warnings
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}
