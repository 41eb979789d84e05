pub mod app;
pub mod connect_bar;
pub mod transactions_view;
pub mod transfer_form;
pub mod wallet_api;
pub mod wallet_state;
