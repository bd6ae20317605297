//! Roster: team member directory
//!
//! Terminal application that signs a user in against a fixed demo credential
//! set, then shows a member list fetched page by page as the user scrolls
//! towards the bottom.
//!
//! Follows the Pure Core / Impure Shell split: `model` and `state` hold the
//! pagination state machine, scroll trigger and credential gate; `source`,
//! `view`, `config` and `logging` deal with the network, terminal and files.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
