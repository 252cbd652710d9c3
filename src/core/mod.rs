//! Core business logic - framework-agnostic catalog operations.
//!
//! Every operation is an async function over a `SeaORM` connection. Multi-step
//! writes run inside a database transaction so a failed check leaves no partial state.

/// Mail alias routing: inbound messages become nursery orders
pub mod alias;
/// Plant categories and their mail aliases
pub mod category;
/// Per-request identity
pub mod context;
/// Plants: stock constraint, order count, tracking hooks, website URL
pub mod plant;
/// Sales flow: order lines and stock decrements
pub mod sales;
/// Startup seeding from config.toml
pub mod seed;
/// Plant tags
pub mod tag;
/// Field change tracking
pub mod tracking;
/// Users responsible for plants
pub mod user;
/// Website slugs and URLs
pub mod website;
