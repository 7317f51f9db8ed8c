//! Value Object Module

pub mod account_id;
pub mod account_role;
pub mod account_secret;
pub mod contact_address;
pub mod login_name;
