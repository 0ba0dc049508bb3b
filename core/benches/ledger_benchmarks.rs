use agriflow::views;
use agriflow::{Listing, MarketLedger, Marketplace, SeedData, StaticCredentials};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime; // To run async login within Criterion

// --- Helpers ---

fn stocked_ledger(listings: u64, quantity: u64) -> MarketLedger {
  let rows = (1..=listings).map(|id| Listing::new(id, format!("Crop {}", id), 100 + id, quantity, "Jane Smith"));
  MarketLedger::with_listings(rows).unwrap()
}

// --- Benchmark Functions ---

fn bench_single_purchase(c: &mut Criterion) {
  let mut group = c.benchmark_group("LedgerPurchase");

  for num_listings in [1u64, 100, 10_000].iter() {
    group.bench_with_input(BenchmarkId::from_parameter(num_listings), num_listings, |b, &n| {
      b.iter_batched(
        || stocked_ledger(n, 1_000),
        |ledger| ledger.purchase(n / 2 + 1, 1).unwrap(),
        BatchSize::SmallInput,
      );
    });
  }
  group.finish();
}

fn bench_purchase_many(c: &mut Criterion) {
  let mut group = c.benchmark_group("LedgerPurchaseMany");

  for cart_lines in [1usize, 10, 50].iter() {
    group.throughput(Throughput::Elements(*cart_lines as u64));
    group.bench_with_input(BenchmarkId::from_parameter(cart_lines), cart_lines, |b, &lines| {
      let cart: Vec<(u64, u64)> = (1..=lines as u64).map(|id| (id, 2)).collect();
      b.iter_batched(
        || stocked_ledger(64, 1_000),
        |ledger| ledger.purchase_many(&cart).unwrap(),
        BatchSize::SmallInput,
      );
    });
  }
  group.finish();
}

fn bench_contended_purchases(c: &mut Criterion) {
  let mut group = c.benchmark_group("LedgerContention");
  group.throughput(Throughput::Elements(8 * 100));

  group.bench_function("8_threads_x_100", |b| {
    b.iter_batched(
      || stocked_ledger(4, 1_000),
      |ledger| {
        std::thread::scope(|scope| {
          for t in 0..8u64 {
            let ledger = &ledger;
            scope.spawn(move || {
              for _ in 0..100 {
                let _ = ledger.purchase(t % 4 + 1, 1);
              }
            });
          }
        });
      },
      BatchSize::SmallInput,
    );
  });
  group.finish();
}

fn bench_views(c: &mut Criterion) {
  let mut group = c.benchmark_group("Views");
  let seed = SeedData::demo();
  let crops: Vec<_> = (0..1_000).flat_map(|_| seed.crops.clone()).collect();

  group.bench_function("crop_yield_by_crop", |b| b.iter(|| views::crop_yield_by_crop(&crops)));
  group.bench_function("crop_distribution", |b| b.iter(|| views::crop_distribution(&crops)));
  group.finish();
}

fn bench_dashboard(c: &mut Criterion) {
  let mut group = c.benchmark_group("Dashboard");
  let rt = Runtime::new().unwrap();
  let marketplace = Marketplace::with_seed(
    Arc::new(StaticCredentials::demo()),
    Duration::from_secs(3600),
    SeedData::demo(),
  )
  .unwrap();

  for (username, password) in [("superadmin", "super123"), ("admin", "admin123"), ("user", "user123"), ("farmer", "farmer123")] {
    let token = rt.block_on(marketplace.login(username, password)).unwrap().token;
    group.bench_function(BenchmarkId::from_parameter(username), |b| {
      b.iter(|| marketplace.dashboard(&token).unwrap())
    });
  }
  group.finish();
}

criterion_group!(
  benches,
  bench_single_purchase,
  bench_purchase_many,
  bench_contended_purchases,
  bench_views,
  bench_dashboard
);
criterion_main!(benches);
