// tests/ledger_tests.rs
mod common;
use agriflow::{LedgerStats, Listing, ListingPatch, MarketError, MarketLedger};
use common::*;

#[test]
fn test_purchase_decrements_stock_and_prices_total() {
  setup_tracing();
  let ledger = wheat_ledger();

  let receipt = ledger.purchase(1, 10).expect("purchase should succeed");
  assert_eq!(receipt.total, 2000);
  assert_eq!(receipt.unit_price, 200);
  assert_eq!(receipt.crop, "Wheat");
  assert_eq!(ledger.get(1).unwrap().quantity_available, 40);

  match ledger.purchase(1, 999) {
    Err(MarketError::InsufficientQuantity {
      product_id,
      requested,
      available,
    }) => {
      assert_eq!(product_id, 1);
      assert_eq!(requested, 999);
      assert_eq!(available, 40);
    }
    other => panic!("Expected InsufficientQuantity, got {:?}", other),
  }
  assert_eq!(ledger.get(1).unwrap().quantity_available, 40);
}

#[test]
fn test_purchase_can_drain_stock_to_exactly_zero() {
  let ledger = wheat_ledger();
  ledger.purchase(1, 50).unwrap();
  assert_eq!(ledger.get(1).unwrap().quantity_available, 0);
  assert!(matches!(
    ledger.purchase(1, 1),
    Err(MarketError::InsufficientQuantity { available: 0, .. })
  ));
}

#[test]
fn test_purchase_rejects_zero_quantity_and_unknown_product() {
  let ledger = wheat_ledger();
  assert!(matches!(ledger.purchase(1, 0), Err(MarketError::Validation(_))));
  match ledger.purchase(42, 1) {
    Err(MarketError::NotFound { entity, key }) => {
      assert_eq!(entity, "Listing");
      assert_eq!(key, "42");
    }
    other => panic!("Expected NotFound, got {:?}", other),
  }
  assert_eq!(ledger.get(1).unwrap().quantity_available, 50);
}

#[test]
fn test_purchase_total_overflow_is_rejected_without_side_effects() {
  let ledger = MarketLedger::with_listings([Listing::new(7, "Saffron", u64::MAX, 3, "Jane Smith")]).unwrap();
  assert!(matches!(ledger.purchase(7, 2), Err(MarketError::Validation(_))));
  assert_eq!(ledger.get(7).unwrap().quantity_available, 3);
  assert_eq!(ledger.stats().revenue, 0);
}

#[test]
fn test_multi_line_total_overflow_is_rejected_without_side_effects() {
  let half = 1u64 << 63;
  let ledger = MarketLedger::with_listings([
    Listing::new(1, "Saffron", half, 5, "Jane Smith"),
    Listing::new(2, "Vanilla", half, 5, "Jane Smith"),
  ])
  .unwrap();

  assert!(matches!(ledger.purchase_many(&[(1, 1), (2, 1)]), Err(MarketError::Validation(_))));
  assert_eq!(ledger.get(1).unwrap().quantity_available, 5);
  assert_eq!(ledger.get(2).unwrap().quantity_available, 5);
  assert_eq!(ledger.stats(), LedgerStats { listings: 2, units_sold: 0, revenue: 0 });

  let batch = ledger.purchase_many(&[(1, 1)]).unwrap();
  assert_eq!(batch.total, half);
}

#[test]
fn test_no_sequence_of_purchases_drives_stock_negative() {
  let ledger = demo_ledger();
  let requests = [(1, 20), (2, 41), (1, 30), (3, 30), (1, 1), (2, 40), (3, 1), (2, 0)];
  for (product_id, quantity) in requests {
    let before = ledger.get(product_id).unwrap().quantity_available;
    match ledger.purchase(product_id, quantity) {
      Ok(receipt) => assert_eq!(ledger.get(product_id).unwrap().quantity_available, before - receipt.quantity),
      Err(_) => assert_eq!(ledger.get(product_id).unwrap().quantity_available, before),
    }
  }
  for listing in ledger.list() {
    assert_eq!(listing.quantity_available, 0, "{} should be sold out", listing.crop);
  }
  let stats = ledger.stats();
  assert_eq!(stats.units_sold, 50 + 40 + 30);
  assert_eq!(stats.revenue, 50 * 200 + 40 * 300 + 30 * 250);
}

#[test]
fn test_concurrent_purchases_never_oversell() {
  setup_tracing();
  let ledger = wheat_ledger();

  let successes: usize = std::thread::scope(|scope| {
    let handles: Vec<_> = (0..16)
      .map(|_| {
        scope.spawn(|| {
          let mut bought = 0usize;
          for _ in 0..10 {
            if ledger.purchase(1, 1).is_ok() {
              bought += 1;
            }
          }
          bought
        })
      })
      .collect();
    handles.into_iter().map(|h| h.join().unwrap()).sum()
  });

  assert_eq!(successes, 50);
  assert_eq!(ledger.get(1).unwrap().quantity_available, 0);
  assert_eq!(ledger.stats().units_sold, 50);
}

#[test]
fn test_add_listing_rejects_duplicates_and_invalid_rows() {
  let ledger = wheat_ledger();

  match ledger.add_listing(Listing::new(1, "Barley", 100, 5, "Bob")) {
    Err(MarketError::DuplicateKey { entity, key }) => {
      assert_eq!(entity, "Listing");
      assert_eq!(key, "1");
    }
    other => panic!("Expected DuplicateKey, got {:?}", other),
  }
  assert_eq!(ledger.get(1).unwrap(), wheat());

  assert!(matches!(
    ledger.add_listing(Listing::new(2, "Barley", 0, 5, "Bob")),
    Err(MarketError::Validation(_))
  ));
  assert!(matches!(
    ledger.add_listing(Listing::new(2, "Barley", 100, 0, "Bob")),
    Err(MarketError::Validation(_))
  ));
  assert!(matches!(
    ledger.add_listing(Listing::new(2, "  ", 100, 5, "Bob")),
    Err(MarketError::Validation(_))
  ));
  assert!(matches!(
    ledger.add_listing(Listing::new(2, "Barley", 100, 5, "")),
    Err(MarketError::Validation(_))
  ));
  assert_eq!(ledger.len(), 1);
}

#[test]
fn test_add_then_delete_restores_prior_content() {
  let ledger = demo_ledger();
  let before = ledger.list();

  ledger.add_listing(Listing::new(9, "Barley", 120, 15, "Bob")).unwrap();
  assert_eq!(ledger.len(), before.len() + 1);

  let removed = ledger.delete_listing(9).unwrap();
  assert_eq!(removed.crop, "Barley");
  assert_eq!(ledger.list(), before);
}

#[test]
fn test_delete_unknown_listing_is_not_found() {
  let ledger = wheat_ledger();
  assert!(matches!(ledger.delete_listing(5), Err(MarketError::NotFound { .. })));
  assert_eq!(ledger.len(), 1);
}

#[test]
fn test_update_changes_only_named_fields() {
  let ledger = wheat_ledger();
  let patch = ListingPatch {
    price: Some(180),
    ..Default::default()
  };

  let updated = ledger.update_listing(1, &patch).unwrap();
  assert_eq!(updated.price, 180);
  assert_eq!(updated.crop, "Wheat");
  assert_eq!(updated.quantity_available, 50);
  assert_eq!(updated.seller, "Jane Smith");
  assert_eq!(ledger.get(1).unwrap(), updated);

  let patch = ListingPatch {
    quantity_available: Some(0),
    seller: Some("Bob".to_string()),
    ..Default::default()
  };
  let updated = ledger.update_listing(1, &patch).unwrap();
  assert_eq!(updated.quantity_available, 0);
  assert_eq!(updated.seller, "Bob");
  assert_eq!(updated.price, 180);
}

#[test]
fn test_update_unknown_or_invalid_leaves_ledger_untouched() {
  let ledger = wheat_ledger();

  let patch = ListingPatch {
    price: Some(10),
    ..Default::default()
  };
  assert!(matches!(ledger.update_listing(2, &patch), Err(MarketError::NotFound { .. })));

  let bad = ListingPatch {
    price: Some(0),
    crop: Some("Spelt".to_string()),
    ..Default::default()
  };
  assert!(matches!(ledger.update_listing(1, &bad), Err(MarketError::Validation(_))));
  assert_eq!(ledger.get(1).unwrap(), wheat());
}

#[test]
fn test_empty_patch_is_a_no_op() {
  let ledger = wheat_ledger();
  let unchanged = ledger.update_listing(1, &ListingPatch::default()).unwrap();
  assert_eq!(unchanged, wheat());
}

#[test]
fn test_list_crop_assigns_next_free_id() {
  let ledger = demo_ledger();
  let listing = ledger.list_crop("Barley", 150, 12, "Jane Smith", "farmer").unwrap();
  assert_eq!(listing.product_id, 4);
  assert_eq!(listing.seller, "Jane Smith");
  assert_eq!(listing.listed_by.as_deref(), Some("farmer"));

  let empty = MarketLedger::new();
  assert_eq!(empty.list_crop("Oats", 90, 3, "Jane Smith", "farmer").unwrap().product_id, 1);
  assert!(matches!(
    empty.list_crop("Oats", 90, 0, "Jane Smith", "farmer"),
    Err(MarketError::Validation(_))
  ));
  assert_eq!(empty.len(), 1);
}

#[test]
fn test_list_crop_rejects_exhausted_product_ids() {
  let ledger = MarketLedger::with_listings([Listing::new(u64::MAX, "Saffron", 900, 3, "Jane Smith")]).unwrap();
  assert!(matches!(
    ledger.list_crop("Oats", 90, 3, "Jane Smith", "farmer"),
    Err(MarketError::Validation(_))
  ));
  assert_eq!(ledger.len(), 1);
  assert_eq!(ledger.get(u64::MAX).unwrap().crop, "Saffron");
}

#[test]
fn test_purchase_many_is_all_or_nothing() {
  let ledger = demo_ledger();

  let result = ledger.purchase_many(&[(1, 10), (2, 41)]);
  assert!(matches!(
    result,
    Err(MarketError::InsufficientQuantity { product_id: 2, .. })
  ));
  assert_eq!(ledger.get(1).unwrap().quantity_available, 50);
  assert_eq!(ledger.get(2).unwrap().quantity_available, 40);
  assert_eq!(ledger.stats().revenue, 0);

  let batch = ledger.purchase_many(&[(1, 10), (3, 5)]).unwrap();
  assert_eq!(batch.receipts.len(), 2);
  assert_eq!(batch.total, 10 * 200 + 5 * 250);
  assert_eq!(batch.total, batch.receipts.iter().map(|r| r.total).sum::<u64>());
  assert_eq!(ledger.get(1).unwrap().quantity_available, 40);
  assert_eq!(ledger.get(3).unwrap().quantity_available, 25);
}

#[test]
fn test_purchase_many_merges_lines_for_the_same_product() {
  let ledger = wheat_ledger();
  assert!(matches!(
    ledger.purchase_many(&[(1, 30), (1, 30)]),
    Err(MarketError::InsufficientQuantity { requested: 60, .. })
  ));

  let batch = ledger.purchase_many(&[(1, 20), (1, 5)]).unwrap();
  assert_eq!(batch.receipts.len(), 1);
  assert_eq!(batch.receipts[0].quantity, 25);
  assert_eq!(ledger.get(1).unwrap().quantity_available, 25);
}

#[test]
fn test_with_listings_rejects_duplicate_seed_rows() {
  let result = MarketLedger::with_listings([wheat(), wheat()]);
  assert!(matches!(result, Err(MarketError::DuplicateKey { .. })));
}
