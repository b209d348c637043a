//! Domain records: users, groups, expenses, splits, payments and the
//! balance sheet derived from them.

pub mod balance;
pub mod error;
pub mod expense;
pub mod group;
pub mod payment;
pub mod records;
pub mod user;
