//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for one backend endpoint.
//!
//! | Module | Path | Failure policy |
//! |--------|------|----------------|
//! | `profile` | `profile` | propagates errors |
//! | `projects` | `projects`, `projects/{id}` | propagates errors |
//! | `search` | `search` | degrades to no results |
//! | `health` | `health` | degrades to an error status |

pub mod health;
pub mod profile;
pub mod projects;
pub mod search;

pub use health::{HealthApi, HealthStatus};
pub use profile::ProfileApi;
pub use projects::ProjectsApi;
pub use search::{ResultKind, SearchApi, SearchResult};
