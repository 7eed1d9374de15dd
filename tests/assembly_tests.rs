//! Cart assembly against a scripted catalog.

mod common;

use common::*;
use futures::{FutureExt, StreamExt};
use gpui_cart::*;
use std::sync::Arc;

fn assembler(catalog: &Arc<MockCatalog>) -> CartAssembler {
    CartAssembler::new(Arc::clone(catalog) as Arc<dyn CatalogClient>)
}

fn collect(assembler: &CartAssembler, cart_id: i64) -> Vec<CartEvent> {
    pollster::block_on(assembler.load_id(cart_id).collect::<Vec<_>>())
}

fn item_ids(events: &[CartEvent]) -> Vec<i64> {
    let mut ids: Vec<i64> = events
        .iter()
        .filter_map(|event| match event {
            CartEvent::Item(item) => Some(item.id),
            _ => None,
        })
        .collect();
    ids.sort_unstable();
    ids
}

fn accumulate(events: Vec<CartEvent>) -> CartAccumulator {
    let mut accumulator = CartAccumulator::new();
    let ticket = accumulator.begin();
    for event in events {
        if let CartEvent::Item(item) = event {
            accumulator.append(ticket, item);
        }
    }
    accumulator
}

#[test]
fn test_three_distinct_products() {
    let catalog = MockCatalog::standard();
    let events = collect(&assembler(&catalog), 2);

    assert_eq!(
        events[0],
        CartEvent::CartLoaded {
            cart_id: 2,
            lines: 3
        }
    );
    assert_eq!(item_ids(&events), vec![1, 2, 3]);
    assert!(!events.iter().any(CartEvent::is_failure));

    let mut calls = catalog.product_calls();
    calls.sort_unstable();
    assert_eq!(calls, vec![1, 2, 3]);
}

#[test]
fn test_duplicate_lines_show_once() {
    let catalog = MockCatalog::standard();
    catalog.set_cart(7, cart(7, &[1, 1, 1]));

    let events = collect(&assembler(&catalog), 7);
    assert_eq!(item_ids(&events), vec![1, 1, 1]);

    let accumulator = accumulate(events);
    assert_eq!(accumulator.len(), 3);
    assert_eq!(ids(&accumulator.visible("")), vec![1]);
}

#[test]
fn test_search_over_assembled_cart() {
    let catalog = MockCatalog::standard();
    let accumulator = accumulate(collect(&assembler(&catalog), 2));

    assert_eq!(ids(&accumulator.visible("backpack")), vec![1]);
    assert_eq!(accumulator.visible("MENS").len(), 2);
    assert!(accumulator.visible("umbrella").is_empty());
}

#[test]
fn test_empty_cart() {
    let catalog = MockCatalog::standard();
    catalog.set_cart(8, cart(8, &[]));

    let events = collect(&assembler(&catalog), 8);
    assert_eq!(
        events,
        vec![CartEvent::CartLoaded {
            cart_id: 8,
            lines: 0
        }]
    );
}

#[test]
fn test_cart_error_status() {
    let catalog = MockCatalog::standard();
    catalog.set_cart_reply(9, Reply::Respond(CatalogResponse::empty(404)));

    let events = collect(&assembler(&catalog), 9);
    assert_eq!(
        events,
        vec![CartEvent::Failed(CatalogError::CartStatus {
            cart_id: 9,
            status: 404
        })]
    );
    assert!(catalog.product_calls().is_empty());
}

#[test]
fn test_cart_without_payload() {
    let catalog = MockCatalog::standard();
    catalog.set_cart_reply(
        9,
        Reply::Respond(CatalogResponse {
            status: 200,
            data: None,
        }),
    );

    let events = collect(&assembler(&catalog), 9);
    assert_eq!(
        events,
        vec![CartEvent::Failed(CatalogError::EmptyCart { cart_id: 9 })]
    );
}

#[test]
fn test_cart_transport_error() {
    let catalog = MockCatalog::standard();
    catalog.set_cart_reply(2, Reply::Fail(CatalogError::Transport("refused".into())));

    let events = collect(&assembler(&catalog), 2);
    assert_eq!(
        events,
        vec![CartEvent::Failed(CatalogError::Transport("refused".into()))]
    );
}

#[test]
fn test_product_failure_ends_stream() {
    let catalog = MockCatalog::standard();
    catalog.set_cart(3, cart(3, &[1, 99]));

    let events = collect(&assembler(&catalog), 3);
    let last = events.last().unwrap();
    assert_eq!(
        *last,
        CartEvent::Failed(CatalogError::ProductStatus {
            product_id: 99,
            status: 404
        })
    );
    assert_eq!(events.iter().filter(|e| e.is_failure()).count(), 1);
}

#[test]
fn test_product_without_payload_is_failure() {
    let catalog = MockCatalog::standard();
    catalog.set_cart(3, cart(3, &[5]));
    catalog.set_product_reply(
        5,
        Reply::Respond(CatalogResponse {
            status: 200,
            data: None,
        }),
    );

    let events = collect(&assembler(&catalog), 3);
    assert_eq!(
        events.last(),
        Some(&CartEvent::Failed(CatalogError::EmptyPayload { product_id: 5 }))
    );
}

#[test]
fn test_single_failure_reported() {
    let catalog = MockCatalog::standard();
    catalog.set_cart(3, cart(3, &[97, 98, 99]));

    let events = collect(&assembler(&catalog), 3);
    assert_eq!(events.len(), 2);
    assert!(events[1].is_failure());
}

#[test]
fn test_items_arrive_in_completion_order() {
    let catalog = MockCatalog::standard();
    let release_first = catalog.gate_product(1);

    let mut stream = assembler(&catalog).load_id(2);
    assert_eq!(
        pollster::block_on(stream.next()),
        Some(CartEvent::CartLoaded {
            cart_id: 2,
            lines: 3
        })
    );

    let mut early = Vec::new();
    for _ in 0..2 {
        match pollster::block_on(stream.next()) {
            Some(CartEvent::Item(item)) => early.push(item.id),
            other => panic!("expected an item, got {:?}", other),
        }
    }
    early.sort_unstable();
    assert_eq!(early, vec![2, 3]);

    // Product 1 is still held back.
    assert!(stream.next().now_or_never().is_none());

    release_first.send(()).unwrap();
    match pollster::block_on(stream.next()) {
        Some(CartEvent::Item(item)) => assert_eq!(item.id, 1),
        other => panic!("expected product 1, got {:?}", other),
    }
    assert_eq!(pollster::block_on(stream.next()), None);
}

#[test]
fn test_stale_load_discarded() {
    let catalog = MockCatalog::standard();
    let assembler = assembler(&catalog);

    let mut accumulator = CartAccumulator::new();
    let first = accumulator.begin();
    let second = accumulator.begin();

    for event in collect(&assembler, 2) {
        if let CartEvent::Item(item) = event {
            assert!(!accumulator.append(first, item));
        }
    }
    for event in collect(&assembler, 5) {
        if let CartEvent::Item(item) = event {
            assert!(accumulator.append(second, item));
        }
    }

    assert_eq!(ids(&accumulator.visible("")), vec![4]);
}

#[test]
fn test_hanging_cart_yields_nothing() {
    let catalog = MockCatalog::standard();
    catalog.set_cart_reply(2, Reply::Hang);

    let mut stream = assembler(&catalog).load_id(2);
    assert!(stream.next().now_or_never().is_none());
    assert!(stream.next().now_or_never().is_none());
    assert!(catalog.product_calls().is_empty());
}

#[test]
fn test_load_is_lazy() {
    let catalog = MockCatalog::standard();
    let stream = assembler(&catalog).load_id(2);
    assert!(catalog.cart_calls().is_empty());
    drop(stream);
    assert!(catalog.cart_calls().is_empty());
}

#[test]
fn test_route_param_resolution() {
    let catalog = MockCatalog::standard();
    let assembler = assembler(&catalog);

    for param in [None, Some("abc"), Some("0"), Some("5")] {
        pollster::block_on(assembler.load(param).collect::<Vec<_>>());
    }
    assert_eq!(catalog.cart_calls(), vec![2, 2, 2, 5]);
}
