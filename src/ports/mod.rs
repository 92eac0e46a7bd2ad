/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound (driven) ports are the infrastructure interfaces the use cases
/// depend on; the CLI drives the use cases directly.
pub mod outbound;
