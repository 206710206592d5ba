// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup wiring
// - infrastructure: SQLite, filesystem and PDF engine adapters
// - presentation: HTML pages, JSON search API and downloads
// - application: ports, use cases and letter rendering
// - domain: archive and letter models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
