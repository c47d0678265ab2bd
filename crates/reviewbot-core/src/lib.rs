pub mod config;
pub mod directory;
pub mod eligibility;
pub mod error;
pub mod io;
pub mod paths;
pub mod policy;
pub mod pool;
pub mod reconcile;
pub mod sampling;
pub mod selection;
pub mod snapshot;
pub mod tree;
pub mod types;

pub use error::{Result, ReviewError};
pub use selection::{plan_requests, select_reviewers, Selection, SelectionOptions};
