//! The fixed demonstration sequence.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;

use stockwatch_inventory::{Catalog, Item, ItemHandle, NoticeSink, PurchaseAgent, RestockAgent};

use crate::config::Config;

pub const CUSTOMER_NAME: &str = "Nick";

fn stock(item: Item, config: &Config, sink: &NoticeSink) -> ItemHandle {
    Rc::new(RefCell::new(
        item.with_sink(Rc::clone(sink))
            .with_discount_policy(config.discount),
    ))
}

/// Two items, a store manager and a customer watching both; one restock, one
/// unchanged price, two purchases. Returns the catalog for listing.
pub fn run(config: &Config, sink: NoticeSink) -> anyhow::Result<Catalog> {
    let shirt = stock(
        Item::shirt("T-Shirt", 25.0, 15, "M").context("creating shirt")?,
        config,
        &sink,
    );
    let pants = stock(
        Item::pants("Jeans", 50.0, 8, "Denim").context("creating pants")?,
        config,
        &sink,
    );

    let store_manager = Rc::new(RestockAgent::new(config.restock));
    let customer = Rc::new(PurchaseAgent::new(CUSTOMER_NAME));

    for item in [&shirt, &pants] {
        let mut item = item.borrow_mut();
        item.attach(store_manager.clone());
        item.attach(customer.clone());
    }

    let mut catalog = Catalog::new();
    catalog.add(&shirt);
    catalog.add(&pants);

    shirt
        .borrow_mut()
        .set_supply(5)
        .context("updating shirt supply")?;
    shirt
        .borrow_mut()
        .set_price(25.0)
        .context("updating shirt price")?;

    customer
        .buy(&mut shirt.borrow_mut())
        .context("buying shirt")?;
    customer
        .buy(&mut pants.borrow_mut())
        .context("buying pants")?;

    tracing::info!(items = catalog.len(), "demo sequence finished");
    Ok(catalog)
}
