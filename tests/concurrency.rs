mod common;

use common::{company, minimal_party, order_a};
use contract_pdf::{ContractOptions, Document, generate_contract};
use rayon::prelude::*;

fn assert_send_sync<T: Send + Sync>() {}

fn contract(n: usize) -> Document {
    let mut order = order_a();
    order.order_number = format!("{}", 2000 + n);
    order.payment_terms = Some(common::long_terms(300 * n));
    let buyer = minimal_party(&format!("Buyer {n}"));
    let seller = minimal_party(&format!("Seller {n}"));
    generate_contract(
        Some(&order),
        Some(&buyer),
        Some(&seller),
        &company(),
        &ContractOptions::default(),
    )
    .expect("generate")
}

#[test]
fn documents_cross_threads() {
    assert_send_sync::<Document>();
    assert_send_sync::<ContractOptions>();
}

#[test]
fn parallel_generation_matches_sequential() {
    let sequential: Vec<Document> = (0..16).map(contract).collect();
    let parallel: Vec<Document> = (0..16).into_par_iter().map(contract).collect();

    for (n, (a, b)) in sequential.iter().zip(&parallel).enumerate() {
        assert_eq!(a, b, "contract {n}");
        assert_eq!(a.title(), Some(format!("Contract {}", 2000 + n).as_str()));
    }
    // Longer terms never produce fewer pages.
    assert!(sequential.windows(2).all(|w| w[0].page_count() <= w[1].page_count()));
}

#[test]
fn parallel_pdf_rendering_succeeds() {
    let sizes: Vec<usize> = (0..8)
        .into_par_iter()
        .map(|n| contract(n).to_pdf().expect("render").len())
        .collect();
    assert!(sizes.iter().all(|&len| len > 0));
}
