//! Role-scoped access policy.
//!
//! The evaluator is a pure decision function shared by every domain module:
//! given the requesting actor, an action and a description of the target
//! resource, it returns allow or a machine-readable deny reason. It never
//! touches the store and never panics on well-formed input.

mod evaluator;

pub use evaluator::{
    Action, Actor, Decision, DenyReason, ResourceKind, ResourceRef, evaluate,
};
