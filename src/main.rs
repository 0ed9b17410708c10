use chrono::Duration;
use stock_ledger::clock::{Clock, SystemClock};
use stock_ledger::config::LedgerConfig;
use stock_ledger::lifecycle::{setup_tracing, LedgerSystem};
use stock_ledger::model::{fill_daily_gaps, DateRange, ProductCreate, StockMovement};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = LedgerConfig::from_env();
    setup_tracing(&config);

    info!("Starting stock ledger demo");
    let system = LedgerSystem::new(&config);

    let rice = system
        .catalog
        .create_product(
            ProductCreate::new("Rice", "kg", 20.0, 9.0, 12.5)
                .with_category("Groceries")
                .with_min_stock(5.0),
        )
        .await?;
    let soap = system
        .catalog
        .create_product(ProductCreate::new("Soap", "pcs", 40.0, 1.2, 2.0).with_category("Home"))
        .await?;
    info!(%rice, %soap, "Catalog ready");

    let span = tracing::info_span!("trading_day");
    async {
        let sale = system
            .ledger
            .record(rice, StockMovement::stock_out(12.0).with_notes("Sale #1"))
            .await?;
        info!(old = sale.old_stock, new = sale.new_stock, "Sold rice");

        system
            .ledger
            .record(soap, StockMovement::stock_out(6.0).with_notes("Sale #2"))
            .await?;

        let restock = system
            .ledger
            .record(
                soap,
                StockMovement::stock_in(24.0)
                    .with_reference("PO-118")
                    .with_batch("LOT-7", None),
            )
            .await?;

        // Entered twice by mistake
        let undone = system.ledger.revert(restock.transaction.id).await?;
        info!(new = undone.new_stock, "Reverted duplicate restock");

        if let Err(e) = system
            .ledger
            .record(rice, StockMovement::stock_out(50.0).with_notes("Sale #3"))
            .await
        {
            error!(error = %e, "Sale rejected");
        }
        Ok::<_, stock_ledger::ledger_actor::LedgerError>(())
    }
    .instrument(span)
    .await?;

    let today = SystemClock.now().date();
    let week = DateRange::new(today - Duration::days(6), today);

    let stats = system.ledger.stats().await?;
    let money = system.ledger.financial_stats().await?;
    info!(?stats, "Transaction counts");
    info!(
        revenue = money.today_revenue,
        profit = money.today_profit,
        "Today's sales"
    );

    let daily = system.ledger.daily_breakdown(week).await?;
    for day in fill_daily_gaps(week, &daily) {
        info!(date = %day.date, revenue = day.revenue, "Daily revenue");
    }
    for category in system.ledger.category_breakdown(week).await? {
        info!(category = %category.category, revenue = category.revenue, "Category revenue");
    }
    for product in system.catalog.low_stock_products().await? {
        info!(name = %product.name, stock = product.current_stock, "Low stock");
    }

    system.shutdown().await?;
    info!("Demo completed");
    Ok(())
}
