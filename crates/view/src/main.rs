//! Scripted storefront walkthrough.
//!
//! Opens a session over the embedded demo catalog and drives it through the
//! interactions a shopper would make, printing the recomputed page after each
//! step as a JSON line. `SHOPFRONT_MODE` picks the display mode
//! (desktop/tablet/mobile).

use anyhow::Context;

use shopfront_browse::DisplayMode;
use shopfront_catalog::{CategoryId, ProductId};
use shopfront_view::{Snapshot, Storefront};

const DEMO_SNAPSHOT: &str = include_str!("../demo_snapshot.json");

fn main() -> anyhow::Result<()> {
    shopfront_observability::init();

    let mode = match std::env::var("SHOPFRONT_MODE") {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(value = %raw, "unrecognized SHOPFRONT_MODE; falling back to desktop");
            DisplayMode::Desktop
        }),
        Err(_) => DisplayMode::Desktop,
    };

    let snapshot: Snapshot =
        serde_json::from_str(DEMO_SNAPSHOT).context("embedded demo snapshot is malformed")?;
    let beds = CategoryId::new("bed")?;
    let chairs = CategoryId::new("chair")?;
    let bristique = ProductId::new("aenean-ru-bristique")?;
    let plush = ProductId::new("plush-chair")?;
    let walnut = ProductId::new("walnut-sofa")?;

    let mut storefront = Storefront::open(snapshot, beds, mode)?;
    show("open", &storefront)?;

    storefront.next_page()?;
    show("next_page", &storefront)?;

    storefront.select_category(chairs)?;
    show("select_category", &storefront)?;

    storefront.set_search("plush")?;
    show("search", &storefront)?;

    storefront.clear_search()?;

    // Same product twice: the line merges instead of duplicating.
    storefront.add_to_cart(&plush, 1)?;
    storefront.add_to_cart(&plush, 2)?;
    storefront.add_to_cart(&bristique, 1)?;
    show("cart", &storefront)?;

    storefront.add_to_compare(&bristique)?;
    storefront.add_to_compare(&walnut)?;
    show("compare", &storefront)?;

    storefront.remove_from_compare(&walnut)?;
    storefront.clear_compare()?;

    let page = storefront.page();
    println!("final: {}", serde_json::to_string_pretty(&page)?);

    Ok(())
}

fn show(step: &str, storefront: &Storefront) -> anyhow::Result<()> {
    let page = storefront.page();
    tracing::info!(
        step,
        page = page.page,
        page_count = page.page_count,
        visible = page.visible.len(),
        "step complete"
    );
    println!("{step}: {}", serde_json::to_string(&page)?);
    Ok(())
}
