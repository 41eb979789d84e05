pub mod chain;
pub mod form;
pub mod ledger;
pub mod session;
pub mod units;
