// Domain layer - Dashboard documents and the nodes they are split by
pub mod dashboard;
pub mod node;
