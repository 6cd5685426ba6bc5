//! Plain-text artifacts written to files: org charts and payslips.

mod org_chart;
mod payslip;

pub use org_chart::{org_chart_json, render_org_chart, walk_org_chart, Connectors};
pub use payslip::render_payslip;
