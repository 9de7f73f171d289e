//! Consistency checks over the point registry.
//! Reports problems only; the graph is never repaired here.

use crate::model::PointId;
use crate::Graph;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    DuplicatePoint,
    GhostReference,
    OneWayConnection,
    DuplicateConnection,
    SelfLoop,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Error)]
pub enum Violation {
    #[error("duplicate point in registry: {point}")]
    DuplicatePoint { point: PointId },
    #[error("ghost point detected: {point} -> {other}")]
    GhostReference { point: PointId, other: PointId },
    #[error("one way connection detected: {point} -> {other}")]
    OneWayConnection { point: PointId, other: PointId },
    #[error("duplicate connection detected: {point} -> {other}")]
    DuplicateConnection { point: PointId, other: PointId },
    #[error("self loop detected on {point}")]
    SelfLoop { point: PointId },
}

impl Violation {
    pub fn kind(&self) -> ViolationKind {
        match self {
            Violation::DuplicatePoint { .. } => ViolationKind::DuplicatePoint,
            Violation::GhostReference { .. } => ViolationKind::GhostReference,
            Violation::OneWayConnection { .. } => ViolationKind::OneWayConnection,
            Violation::DuplicateConnection { .. } => ViolationKind::DuplicateConnection,
            Violation::SelfLoop { .. } => ViolationKind::SelfLoop,
        }
    }
}

pub fn check_graph(g: &Graph) -> Vec<Violation> {
    let mut out = Vec::new();
    let mut seen_points: HashSet<PointId> = HashSet::new();
    for (slot, p) in g.points.iter().enumerate() {
        let Some(p) = p else { continue };
        // A point registered twice shows up as a repeated id or an id living in a foreign slot
        if !seen_points.insert(p.id) || p.id as usize != slot {
            out.push(Violation::DuplicatePoint { point: p.id });
        }
        let mut seen_conns: HashSet<PointId> = HashSet::new();
        for &c in &p.connections {
            if c == p.id {
                out.push(Violation::SelfLoop { point: p.id });
            }
            match g.point(c) {
                None => out.push(Violation::GhostReference { point: p.id, other: c }),
                Some(q) if !q.is_connected_to(p.id) => {
                    out.push(Violation::OneWayConnection { point: p.id, other: c })
                }
                Some(_) => {}
            }
            if !seen_conns.insert(c) {
                out.push(Violation::DuplicateConnection { point: p.id, other: c });
            }
        }
    }
    out
}
