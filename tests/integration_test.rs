use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::sync::Arc;
use stock_ledger::clients::actor_client::ActorClient;
use stock_ledger::clock::ManualClock;
use stock_ledger::config::LedgerConfig;
use stock_ledger::ledger_actor::{LedgerError, ALL_TRANSACTIONS_CAP};
use stock_ledger::lifecycle::LedgerSystem;
use stock_ledger::model::{
    DateRange, ProductCreate, ProductId, ProductUpdate, StockMovement, TransactionFilter,
    TransactionType, UNCATEGORIZED,
};

fn at(month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

fn start() -> (LedgerSystem, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(at(3, 10, 12)));
    let system = LedgerSystem::with_clock(&LedgerConfig::default(), clock.clone());
    (system, clock)
}

async fn widget(system: &LedgerSystem, stock: f64) -> ProductId {
    system
        .catalog
        .create_product(ProductCreate::new("Widget", "pcs", stock, 60.0, 100.0))
        .await
        .expect("Failed to create product")
}

async fn stock_of(system: &LedgerSystem, id: ProductId) -> f64 {
    system
        .catalog
        .get_product(id)
        .await
        .expect("Failed to get product")
        .current_stock
}

/// Full end-to-end run against the real actor.
#[tokio::test]
async fn test_full_ledger_integration() {
    let (system, _clock) = start();

    let id = widget(&system, 10.0).await;
    let restock = system
        .ledger
        .record(id, StockMovement::stock_in(5.0).with_reference("PO-1"))
        .await
        .expect("Failed to record IN");
    assert_eq!((restock.old_stock, restock.new_stock), (10.0, 15.0));
    assert_eq!(restock.transaction.balance_after, 15.0);
    assert_eq!(restock.transaction.reference_no.as_deref(), Some("PO-1"));

    let sale = system
        .ledger
        .record(id, StockMovement::stock_out(4.0).with_notes("Sale"))
        .await
        .expect("Failed to record OUT");
    assert_eq!(sale.new_stock, 11.0);

    let count = system
        .ledger
        .record(id, StockMovement::adjust_to(9.0).with_notes("Stock take"))
        .await
        .expect("Failed to record ADJUST");
    assert_eq!(count.new_stock, 9.0);
    assert_eq!(stock_of(&system, id).await, 9.0);

    let history = system
        .ledger
        .transactions_for_product(id, 10)
        .await
        .expect("Failed to read history");
    let kinds: Vec<_> = history.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![TransactionType::Adjust, TransactionType::Out, TransactionType::In]
    );
    assert!(history[0].id > history[1].id && history[1].id > history[2].id);

    let audit = system.ledger.audit(id).await.expect("Failed to audit");
    assert!(audit.is_consistent());

    system.shutdown().await.expect("Failed to shutdown");
}

#[tokio::test]
async fn test_revert_restores_stock_and_removes_row() {
    let (system, _clock) = start();
    let id = widget(&system, 10.0).await;

    let restock = system
        .ledger
        .record(id, StockMovement::stock_in(5.0))
        .await
        .unwrap();
    assert_eq!(stock_of(&system, id).await, 15.0);

    let undone = system.ledger.revert(restock.transaction.id).await.unwrap();
    assert_eq!((undone.old_stock, undone.new_stock), (15.0, 10.0));
    assert_eq!(stock_of(&system, id).await, 10.0);
    assert!(system
        .ledger
        .transactions_for_product(id, 10)
        .await
        .unwrap()
        .is_empty());

    // A second revert finds nothing
    assert_eq!(
        system.ledger.revert(restock.transaction.id).await.unwrap_err(),
        LedgerError::TransactionNotFound(restock.transaction.id)
    );
}

#[tokio::test]
async fn test_revert_leaves_downstream_snapshots_stale() {
    let (system, _clock) = start();
    let id = widget(&system, 10.0).await;

    let restock = system
        .ledger
        .record(id, StockMovement::stock_in(5.0))
        .await
        .unwrap();
    let sale = system
        .ledger
        .record(id, StockMovement::stock_out(3.0))
        .await
        .unwrap();
    assert_eq!(sale.new_stock, 12.0);

    let undone = system.ledger.revert(restock.transaction.id).await.unwrap();
    assert_eq!(undone.new_stock, 7.0);

    let history = system.ledger.transactions_for_product(id, 10).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].balance_after, 12.0);

    let audit = system.ledger.audit(id).await.unwrap();
    assert_eq!(audit.divergences.len(), 1);
    assert_eq!(audit.divergences[0].transaction_id, sale.transaction.id);
    assert!(audit.matches_live_stock());
}

#[tokio::test]
async fn test_insufficient_stock_is_rejected_without_side_effects() {
    let (system, _clock) = start();
    let id = widget(&system, 3.0).await;

    let err = system
        .ledger
        .record(id, StockMovement::stock_out(5.0).with_notes("Sale"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::InsufficientStock {
            product_id: id,
            current: 3.0,
            requested: 5.0,
            unit: "pcs".into(),
        }
    );
    assert_eq!(stock_of(&system, id).await, 3.0);
    assert_eq!(
        system
            .ledger
            .count_transactions(TransactionFilter::default())
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn test_financial_reports() {
    let (system, clock) = start();
    let widget_id = widget(&system, 20.0).await;
    let tea = system
        .catalog
        .create_product(ProductCreate::new("Tea", "box", 50.0, 2.0, 5.0).with_category("Drinks"))
        .await
        .unwrap();

    clock.set(at(3, 8, 10));
    system
        .ledger
        .record(widget_id, StockMovement::stock_out(2.0).with_notes("Sale"))
        .await
        .unwrap();
    system
        .ledger
        .record(tea, StockMovement::stock_out(4.0).with_notes("Sale #7"))
        .await
        .unwrap();
    clock.set(at(3, 10, 9));
    system
        .ledger
        .record(widget_id, StockMovement::stock_out(3.0).with_notes("Sale"))
        .await
        .unwrap();
    system
        .ledger
        .record(widget_id, StockMovement::stock_out(1.0).with_notes("Broken"))
        .await
        .unwrap();

    let stats = system.ledger.financial_stats().await.unwrap();
    assert_eq!(stats.total_revenue, 520.0);
    assert_eq!(stats.total_profit, 212.0);
    assert_eq!(stats.today_revenue, 300.0);
    assert_eq!(stats.today_profit, 120.0);

    let week = DateRange::new(date(3, 4), date(3, 10));
    let range = system.ledger.financial_stats_for_range(week).await.unwrap();
    assert_eq!(range.transaction_count, 3);

    let daily = system.ledger.daily_breakdown(week).await.unwrap();
    assert_eq!(daily.len(), 2);
    assert_eq!(daily.iter().map(|d| d.revenue).sum::<f64>(), range.total_revenue);
    assert_eq!(daily.iter().map(|d| d.profit).sum::<f64>(), range.total_profit);

    let categories = system.ledger.category_breakdown(week).await.unwrap();
    assert_eq!(categories[0].category, UNCATEGORIZED);
    assert_eq!(categories[0].revenue, 500.0);
    assert_eq!(categories[0].profit, 200.0);
    assert_eq!(categories[1].category, "Drinks");
    assert_eq!(
        categories.iter().map(|c| c.revenue).sum::<f64>(),
        range.total_revenue
    );

    // Reports follow the current price
    system
        .catalog
        .update_product(
            widget_id,
            ProductUpdate {
                selling_price: Some(80.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let repriced = system
        .ledger
        .financial_stats_for_range(DateRange::single_day(date(3, 10)))
        .await
        .unwrap();
    assert_eq!(repriced.total_revenue, 240.0);
    assert_eq!(repriced.total_profit, 60.0);
}

#[tokio::test]
async fn test_transaction_stats_and_feeds() {
    let (system, clock) = start();
    let id = widget(&system, 1000.0).await;

    clock.set(at(3, 1, 12));
    system
        .ledger
        .record(id, StockMovement::stock_in(10.0))
        .await
        .unwrap();
    clock.set(at(3, 10, 8));
    for _ in 0..110 {
        system
            .ledger
            .record(id, StockMovement::stock_out(1.0))
            .await
            .unwrap();
    }
    clock.set(at(3, 10, 12));

    let stats = system.ledger.stats().await.unwrap();
    assert_eq!(stats.total_in, 1);
    assert_eq!(stats.total_out, 110);
    assert_eq!(stats.today_in, 0);
    assert_eq!(stats.today_out, 110);
    assert_eq!(stats.last_7_days, 110);

    let feed = system
        .ledger
        .all_transactions(TransactionFilter::default())
        .await
        .unwrap();
    assert_eq!(feed.len(), ALL_TRANSACTIONS_CAP);
    assert_eq!(
        system
            .ledger
            .count_transactions(TransactionFilter::default())
            .await
            .unwrap(),
        111
    );

    let restocks = system
        .ledger
        .all_transactions(TransactionFilter {
            kind: Some(TransactionType::In),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(restocks.len(), 1);

    let recent = system.ledger.recent_transactions(3).await.unwrap();
    assert_eq!(recent.len(), 3);
    assert!(recent[0].id > recent[1].id);
}

/// Many sales racing for the same stock never overdraw it.
#[tokio::test]
async fn test_concurrent_sales_never_overdraw() {
    let (system, _clock) = start();
    let id = widget(&system, 20.0).await;

    let mut handles = vec![];
    for i in 0..15 {
        let ledger = system.ledger.clone();
        let handle = tokio::spawn(async move {
            ledger
                .record(id, StockMovement::stock_out(2.0).with_notes(format!("Sale #{i}")))
                .await
        });
        handles.push(handle);
    }

    let mut accepted = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(LedgerError::InsufficientStock { .. }) => rejected += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(accepted, 10);
    assert_eq!(rejected, 5);
    assert_eq!(stock_of(&system, id).await, 0.0);
    assert!(system.ledger.audit(id).await.unwrap().is_consistent());
}

#[tokio::test]
async fn test_deleting_a_product_drops_its_ledger() {
    let (system, _clock) = start();
    let id = widget(&system, 10.0).await;
    let sale = system
        .ledger
        .record(id, StockMovement::stock_out(1.0))
        .await
        .unwrap();

    system.catalog.delete_product(id).await.unwrap();

    assert!(system.catalog.get(id).await.unwrap().is_none());
    assert_eq!(
        system.ledger.revert(sale.transaction.id).await.unwrap_err(),
        LedgerError::TransactionNotFound(sale.transaction.id)
    );
    assert_eq!(
        system
            .ledger
            .record(id, StockMovement::stock_in(1.0))
            .await
            .unwrap_err(),
        LedgerError::ProductNotFound(id)
    );
    assert_eq!(
        system.ledger.transactions_for_product(id, 5).await.unwrap_err(),
        LedgerError::ProductNotFound(id)
    );
}

#[tokio::test]
async fn test_timestamps_come_from_the_clock() {
    let (system, clock) = start();
    let id = widget(&system, 10.0).await;

    let first = system
        .ledger
        .record(id, StockMovement::stock_in(1.0))
        .await
        .unwrap();
    clock.advance(Duration::minutes(30));
    let second = system
        .ledger
        .record(id, StockMovement::stock_in(1.0))
        .await
        .unwrap();

    assert_eq!(first.transaction.transaction_date, at(3, 10, 12));
    assert_eq!(
        second.transaction.transaction_date,
        at(3, 10, 12) + Duration::minutes(30)
    );
}

#[tokio::test]
async fn test_clock_stepping_back_keeps_balances_and_feed_in_commit_order() {
    let (system, clock) = start();
    let id = widget(&system, 10.0).await;

    clock.set(at(3, 10, 1) + Duration::minutes(30));
    let restock = system
        .ledger
        .record(id, StockMovement::stock_in(5.0))
        .await
        .unwrap();
    clock.advance(Duration::minutes(-40));
    let sale = system
        .ledger
        .record(id, StockMovement::stock_out(3.0).with_notes("Sale"))
        .await
        .unwrap();
    assert!(sale.transaction.transaction_date < restock.transaction.transaction_date);
    assert_eq!(sale.new_stock, 12.0);

    let audit = system.ledger.audit(id).await.unwrap();
    assert!(audit.is_consistent());
    assert!(audit.matches_live_stock());

    let feed: Vec<_> = system
        .ledger
        .all_transactions(TransactionFilter::default())
        .await
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(feed, vec![sale.transaction.id, restock.transaction.id]);

    let recent = system.ledger.recent_transactions(1).await.unwrap();
    assert_eq!(recent[0].id, sale.transaction.id);
}

#[tokio::test]
async fn test_expiry_can_be_cleared() {
    let (system, _clock) = start();
    let milk = system
        .catalog
        .create_product(ProductCreate::new("Milk", "l", 4.0, 1.0, 2.0).with_expiry(date(3, 12)))
        .await
        .unwrap();
    assert_eq!(system.catalog.near_expiry_products(7).await.unwrap().len(), 1);

    let edited = system
        .catalog
        .update_product(
            milk,
            ProductUpdate {
                clear_expiry: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.expiry_date, None);
    assert!(system.catalog.near_expiry_products(7).await.unwrap().is_empty());
}
