//! upshift - Django upgrade readiness scanner
//!
//! upshift scans a Django project for patterns that break when upgrading
//! from 4.2 to 5.0, and analyzes historical migrations for pytz
//! dependencies. Everything is regex-based pattern matching over the file
//! tree: no AST, no semantic analysis, no auto-fixing. Findings are
//! bucketed by severity and the migration analysis ends with a
//! recommended remediation path.
//!
//! ## Scanners
//!
//! 1. **Breaking changes** (`upshift scan`): nine sub-scans over source,
//!    settings, models, and templates, reported as P0/P1/P2 tiers.
//!
//! 2. **Migration analysis** (`upshift migrations`): classifies every
//!    pytz-importing migration as HIGH/MEDIUM/LOW risk depending on where
//!    the usage sits, then recommends whether the dependency can go.

pub mod config;
pub mod domain;
pub mod export;
pub mod migration;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod walker;

pub use domain::*;
