//! Inheritance hierarchy - the ancestor DAG of a program.
//!
//! Uses `petgraph::DiGraph` with:
//! - Nodes: one [`TypeId`] per type
//! - Edges: child to parent, tagged [`InheritanceEdge::Extends`] for the
//!   superclass and [`InheritanceEdge::Implements`] for interfaces
//!
//! The ancestor closure of every type is computed once when the hierarchy
//! is built, so ancestry queries are slice lookups.

use std::collections::VecDeque;

use jsinterop_core::{ModelError, TypeEntry, TypeId};
use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashSet;

/// Edge types in the inheritance graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InheritanceEdge {
    /// Class extends its superclass.
    Extends,
    /// Type implements, or interface extends, an interface.
    Implements,
}

/// The validated, acyclic ancestor relation of a program.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    graph: DiGraph<TypeId, InheritanceEdge>,
    nodes: Vec<NodeIndex>,
    /// Ancestors before descendants.
    topo: Vec<TypeId>,
    /// Per type: itself, then every ancestor once, closest first.
    ancestry: Vec<Vec<TypeId>>,
    /// Per type: strict ancestors.
    closure: Vec<FxHashSet<TypeId>>,
}

impl Hierarchy {
    /// Build the hierarchy for `types`, indexed by [`TypeId`] slot.
    ///
    /// References must already be validated; a cycle is reported as
    /// [`ModelError::CyclicHierarchy`].
    pub fn build(types: &[TypeEntry]) -> Result<Self, ModelError> {
        let mut graph = DiGraph::with_capacity(types.len(), types.len());
        let nodes: Vec<NodeIndex> = (0..types.len())
            .map(|slot| graph.add_node(TypeId::new(slot as u32)))
            .collect();

        for (slot, entry) in types.iter().enumerate() {
            let child = nodes[slot];
            let parents = entry
                .super_class
                .iter()
                .map(|p| (*p, InheritanceEdge::Extends))
                .chain(entry.interfaces.iter().map(|i| (*i, InheritanceEdge::Implements)));
            for (parent, edge) in parents {
                let parent_node = nodes.get(parent.slot()).ok_or_else(|| ModelError::UnknownType {
                    id: parent,
                    context: format!("supertypes of '{}'", entry.qualified_name),
                })?;
                graph.add_edge(child, *parent_node, edge);
            }
        }

        // Edges point from child to parent, so a topological sort lists
        // descendants first.
        let sorted = toposort(&graph, None).map_err(|cycle| ModelError::CyclicHierarchy {
            type_name: types[graph[cycle.node_id()].slot()].qualified_name.clone(),
        })?;
        let topo: Vec<TypeId> = sorted.into_iter().rev().map(|node| graph[node]).collect();

        let mut ancestry = Vec::with_capacity(types.len());
        let mut closure = Vec::with_capacity(types.len());
        for slot in 0..types.len() {
            let (order, seen) = linearize(types, TypeId::new(slot as u32));
            ancestry.push(order);
            closure.push(seen);
        }

        Ok(Self {
            graph,
            nodes,
            topo,
            ancestry,
            closure,
        })
    }

    /// Every type, ancestors before descendants.
    pub fn topological_order(&self) -> &[TypeId] {
        &self.topo
    }

    /// The type itself followed by each ancestor once, closest first.
    /// At equal distance the superclass comes before interfaces.
    pub fn ancestry(&self, ty: TypeId) -> &[TypeId] {
        self.ancestry
            .get(ty.slot())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether `ancestor` is a strict ancestor of `of`.
    pub fn is_ancestor(&self, ancestor: TypeId, of: TypeId) -> bool {
        self.closure
            .get(of.slot())
            .is_some_and(|set| set.contains(&ancestor))
    }

    /// Whether `ancestor` is `of` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: TypeId, of: TypeId) -> bool {
        ancestor == of || self.is_ancestor(ancestor, of)
    }

    /// Whether one of the two types is an ancestor of (or equal to) the other.
    pub fn are_related(&self, a: TypeId, b: TypeId) -> bool {
        self.is_ancestor_or_self(a, b) || self.is_ancestor(b, a)
    }

    /// Types that directly extend or implement `ty`.
    pub fn direct_subtypes(&self, ty: TypeId) -> Vec<TypeId> {
        let Some(&node) = self.nodes.get(ty.slot()) else {
            return Vec::new();
        };
        let mut subtypes: Vec<TypeId> = self
            .graph
            .neighbors_directed(node, Direction::Incoming)
            .map(|child| self.graph[child])
            .collect();
        subtypes.sort_unstable();
        subtypes.dedup();
        subtypes
    }

    /// Number of types in the hierarchy.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Breadth-first walk over the supertypes of `start`.
fn linearize(types: &[TypeEntry], start: TypeId) -> (Vec<TypeId>, FxHashSet<TypeId>) {
    let mut order = vec![start];
    let mut seen = FxHashSet::default();
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        let entry = &types[current.slot()];
        for parent in entry.super_class.iter().chain(&entry.interfaces) {
            if *parent != start && seen.insert(*parent) {
                order.push(*parent);
                queue.push_back(*parent);
            }
        }
    }
    (order, seen)
}
