pub mod aggregation_service;
pub mod chart_service;
pub mod export_service;
pub mod ledger_service;
pub mod recurrence_service;
