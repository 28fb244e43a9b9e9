//! Qubit connectivity topologies.
//!
//! A [`Topology`] is an ordered qubit-label list plus a connectivity graph.
//! Edge enumeration preserves insertion order; for undirected topologies the
//! caller can ask for both orientations of each edge, which matters because
//! 2-qubit gates are generally not symmetric under qubit-order swap.

use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;

use crate::error::{ModelError, ModelResult};
use crate::labels::QubitLabel;

/// Qubit labels plus a connectivity graph.
#[derive(Debug, Clone)]
pub struct Topology {
    labels: Vec<QubitLabel>,
    graph: DiGraph<QubitLabel, ()>,
    indices: FxHashMap<QubitLabel, NodeIndex>,
    directed: bool,
    /// Edges in insertion order, stored once per undirected pair.
    edge_list: Vec<(QubitLabel, QubitLabel)>,
}

/// Default integer labels 0..n.
pub fn default_labels(n_qubits: usize) -> Vec<QubitLabel> {
    (0..n_qubits as u32).map(QubitLabel::Index).collect()
}

impl Topology {
    fn empty(labels: Vec<QubitLabel>, directed: bool) -> ModelResult<Self> {
        let mut graph = DiGraph::new();
        let mut indices = FxHashMap::default();
        for label in &labels {
            let idx = graph.add_node(label.clone());
            if indices.insert(label.clone(), idx).is_some() {
                return Err(ModelError::DuplicateQubitLabel(label.to_string()));
            }
        }
        Ok(Self {
            labels,
            graph,
            indices,
            directed,
            edge_list: Vec::new(),
        })
    }

    fn add_edge(&mut self, a: &QubitLabel, b: &QubitLabel) -> ModelResult<()> {
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        self.graph.add_edge(ia, ib, ());
        if !self.directed {
            self.graph.add_edge(ib, ia, ());
        }
        self.edge_list.push((a.clone(), b.clone()));
        Ok(())
    }

    fn index_of(&self, label: &QubitLabel) -> ModelResult<NodeIndex> {
        self.indices
            .get(label)
            .copied()
            .ok_or_else(|| ModelError::UnknownEdgeEndpoint(label.to_string()))
    }

    /// Build a named geometry over `n_qubits` qubits.
    ///
    /// Supported names: `"line"`, `"ring"`, `"full"`, `"star"` (qubit 0 at
    /// the center). `labels` defaults to sequential integers and must match
    /// `n_qubits` in length when given.
    pub fn common_graph(
        n_qubits: usize,
        name: &str,
        labels: Option<Vec<QubitLabel>>,
    ) -> ModelResult<Self> {
        let labels = labels.unwrap_or_else(|| default_labels(n_qubits));
        if labels.len() != n_qubits {
            return Err(ModelError::QubitLabelCountMismatch {
                expected: n_qubits,
                got: labels.len(),
            });
        }
        let mut topo = Self::empty(labels, false)?;
        match name {
            "line" => {
                for i in 0..n_qubits.saturating_sub(1) {
                    let (a, b) = (topo.labels[i].clone(), topo.labels[i + 1].clone());
                    topo.add_edge(&a, &b)?;
                }
            }
            "ring" => {
                for i in 0..n_qubits.saturating_sub(1) {
                    let (a, b) = (topo.labels[i].clone(), topo.labels[i + 1].clone());
                    topo.add_edge(&a, &b)?;
                }
                if n_qubits > 2 {
                    let (a, b) = (
                        topo.labels[n_qubits - 1].clone(),
                        topo.labels[0].clone(),
                    );
                    topo.add_edge(&a, &b)?;
                }
            }
            "full" => {
                for i in 0..n_qubits {
                    for j in (i + 1)..n_qubits {
                        let (a, b) = (topo.labels[i].clone(), topo.labels[j].clone());
                        topo.add_edge(&a, &b)?;
                    }
                }
            }
            "star" => {
                for i in 1..n_qubits {
                    let (a, b) = (topo.labels[0].clone(), topo.labels[i].clone());
                    topo.add_edge(&a, &b)?;
                }
            }
            other => return Err(ModelError::UnknownGeometry(other.to_string())),
        }
        Ok(topo)
    }

    /// Build a custom topology from an explicit edge list.
    ///
    /// Every endpoint must be a member of `labels`.
    pub fn from_edges(
        labels: Vec<QubitLabel>,
        edges: &[(QubitLabel, QubitLabel)],
        directed: bool,
    ) -> ModelResult<Self> {
        let mut topo = Self::empty(labels, directed)?;
        for (a, b) in edges {
            topo.add_edge(a, b)?;
        }
        Ok(topo)
    }

    /// The qubit labels, in order.
    pub fn labels(&self) -> &[QubitLabel] {
        &self.labels
    }

    /// Number of qubits.
    pub fn n_qubits(&self) -> usize {
        self.labels.len()
    }

    /// True if the topology was built with directed edges.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Edges in insertion order.
    ///
    /// For an undirected topology with `double_for_undirected` set, each edge
    /// `(a, b)` is followed by `(b, a)`.
    pub fn edges(&self, double_for_undirected: bool) -> Vec<(QubitLabel, QubitLabel)> {
        let mut out = Vec::with_capacity(self.edge_list.len() * 2);
        for (a, b) in &self.edge_list {
            out.push((a.clone(), b.clone()));
            if !self.directed && double_for_undirected {
                out.push((b.clone(), a.clone()));
            }
        }
        out
    }

    /// True if there is an edge from `a` to `b` (either direction for
    /// undirected topologies).
    pub fn is_edge(&self, a: &QubitLabel, b: &QubitLabel) -> bool {
        match (self.indices.get(a), self.indices.get(b)) {
            (Some(&ia), Some(&ib)) => self.graph.find_edge(ia, ib).is_some(),
            _ => false,
        }
    }

    /// Neighbors of a qubit, in edge-insertion order.
    pub fn neighbors(&self, label: &QubitLabel) -> Vec<QubitLabel> {
        match self.indices.get(label) {
            Some(&idx) => self
                .graph
                .neighbors(idx)
                .map(|n| self.graph[n].clone())
                .collect(),
            None => Vec::new(),
        }
    }
}
