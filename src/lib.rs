//! listgrid - query and state orchestration for remote paginated lists
//!
//! A list screen supplies columns and a title ([`traits::ListScreen`]) plus a
//! [`traits::CollectionSource`]. The [`view::ListView`] wires a
//! [`presenter::GridPresenter`] to a [`controller::ListController`], which
//! debounces filter input, keeps only the latest fetch, and persists the quick
//! filter per view.

pub mod adapters;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod models;
pub mod persistence;
pub mod presenter;
pub mod query;
pub mod traits;
pub mod view;
