//! Immediate-dominator computation over a compressed-sparse-row flow graph.
//!
//! Build a [`flow_graph::Graph`] (directly via [`flow_graph::GraphBuilder`], or
//! from a DIMACS file via [`dimacs::load`]), wrap it in a [`dom::DominatorGraph`],
//! and call one of [`dom::DominatorGraph::idfs`], [`dom::DominatorGraph::ibfs`],
//! [`dom::DominatorGraph::slt`], or [`dom::DominatorGraph::snca`] to fill an
//! `idom` array. All four compute the same result by different means; see
//! [`dom`] for the algorithms and [`nca`]/[`compress`] for the shared
//! primitives they're built from.

pub mod compress;
pub mod dimacs;
pub mod dom;
pub mod flow_graph;
pub mod nca;
pub mod traverse;
