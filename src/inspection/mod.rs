/// Inspection domain - pure types and rules with no I/O
pub mod domain;
pub mod services;
