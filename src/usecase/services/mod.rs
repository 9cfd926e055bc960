pub mod crud_service;
pub mod dashboard_service;
pub mod ledger_service;
pub mod session_service;
