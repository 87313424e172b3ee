pub mod chart;
pub mod command;
pub mod filter;
pub mod ledger;
pub mod settings;
pub mod summary;
pub mod transaction;
pub mod view;
