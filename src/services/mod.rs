//! Service layer for tally
//!
//! The service layer sits between the backend API and the front-ends:
//! filtering, drill-down selection, cached data, imports and the dashboard
//! controller that ties them together.

pub mod cache;
pub mod dashboard;
pub mod debounce;
pub mod expense;
pub mod filter;
pub mod selection;
pub mod upload;

pub use cache::{DataCache, RefreshReport, RefreshSlice};
pub use dashboard::Dashboard;
pub use debounce::Debouncer;
pub use expense::ExpenseService;
pub use filter::{FilterEngine, FilterService};
pub use selection::{Selection, SelectionModel};
pub use upload::UploadService;
