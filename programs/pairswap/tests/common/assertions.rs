//! Assertions over the event log and router custody

use pairswap::Runtime;
use pairswap_core::{Address, EventKind};

use super::fixtures::TestExchange;

/// Event names emitted after the log held `start` entries
pub fn event_names_since(rt: &Runtime, start: usize) -> Vec<&'static str> {
    rt.ledger().events()[start..].iter().map(|e| e.kind.name()).collect()
}

/// Most recent event emitted by `emitter`
pub fn last_event_from(rt: &Runtime, emitter: Address) -> Option<EventKind> {
    rt.ledger()
        .events()
        .iter()
        .rev()
        .find(|e| e.emitter == emitter)
        .map(|e| e.kind.clone())
}

/// The router must not keep native coin or assets after any call
pub fn assert_router_holds_nothing(ex: &TestExchange) {
    let router = ex.router.address();
    assert_eq!(ex.native(router), 0, "router kept native coin");
    for asset in [ex.token_a, ex.token_b, ex.token_c, ex.wrapped] {
        assert_eq!(ex.balance(asset, router), 0, "router kept asset {}", asset);
    }
}
