//! matchmaker-web: JSON API for the drug-target matchmaker.
//! Exposes:
//!   - Target search with fuzzy suggestions
//!   - Disease rankings per target (stored or live scores)
//!   - Drugs in development per target
//!   - Publication and clinical-trial trends per disease

pub mod router;
pub mod handlers;
pub mod state;
