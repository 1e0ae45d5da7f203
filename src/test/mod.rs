//! Test support: in-memory stores and service wiring.

mod context;

pub(crate) use context::TestContext;
