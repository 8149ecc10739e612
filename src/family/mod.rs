pub mod builder;
pub mod cycles;
pub mod graph;
pub mod person;
pub mod printer;
pub mod registry;

pub use builder::RelationshipBuilder;
pub use cycles::{check_acyclic, CycleDetector, VisitState};
pub use graph::{FamilyGraph, FamilyStatistics};
pub use person::Conflict;
pub use printer::TopologicalPrinter;
pub use registry::Registry;
