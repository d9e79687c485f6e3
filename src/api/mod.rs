//! HTTP API module for the payroll engine.
//!
//! Exposes period liquidation, the cost-center report and its yearly
//! consolidation as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{PayrollRequest, PeriodPayrollRequest, PeriodRequest, YearReportRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
