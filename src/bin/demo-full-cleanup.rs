/// Demo: Run the complete cleanup flow over the built-in sample data
/// Following the correction order: Customers → Products → Sales → Shipments → Ledger
use commerce_scrubber::{logging, sampledata, CorrectionEngine, CorrectionEntry};

fn main() {
    // Initialize logging
    logging::init_logging();

    println!("\n🚀 FULL CLEANUP DEMO: From Raw Data to Corrected Datasets");
    println!("{}", "=".repeat(60));
    println!("Following the correction order:");
    println!("  Customers → Products → Sales → Shipments");
    println!("  → Correction Ledger → Summary");
    println!("{}", "=".repeat(60));

    // ================================================================================
    // STEP 1: GENERATE - Build sample datasets with seeded defects
    // ================================================================================
    println!("\n📥 STEP 1: GENERATE - Building sample datasets with seeded defects...");

    let data = sampledata::generate();
    println!(
        "   ✅ Generated {} customers, {} products, {} sales, {} shipments",
        data.customers.len(),
        data.products.len(),
        data.sales.len(),
        data.shipments.len()
    );

    let mut engine = CorrectionEngine::new();

    // ================================================================================
    // STEP 2: CUSTOMERS - Deduplicate and repair contact data
    // ================================================================================
    println!("\n👥 STEP 2: CUSTOMERS - Deduplicating and repairing contact data...");

    let mark = engine.ledger().len();
    let customers = engine.correct_customers(&data.customers);
    println!(
        "   ✅ {} in, {} out, {} corrections",
        data.customers.len(),
        customers.len(),
        engine.ledger().len() - mark
    );
    print_entries(&engine.ledger().entries()[mark..]);

    // ================================================================================
    // STEP 3: PRODUCTS - Repair prices, categories, stock and flags
    // ================================================================================
    println!("\n📦 STEP 3: PRODUCTS - Repairing prices, categories, stock and flags...");

    let mark = engine.ledger().len();
    let products = engine.correct_products(&data.products);
    println!(
        "   ✅ {} in, {} out, {} corrections",
        data.products.len(),
        products.len(),
        engine.ledger().len() - mark
    );
    print_entries(&engine.ledger().entries()[mark..]);

    // ================================================================================
    // STEP 4: SALES - Validate quantities, totals and references
    // ================================================================================
    println!("\n🧾 STEP 4: SALES - Validating quantities, totals and references...");

    let mark = engine.ledger().len();
    let sales = engine.correct_sales(&data.sales, &customers, &products);
    println!(
        "   ✅ {} in, {} out, {} corrections",
        data.sales.len(),
        sales.len(),
        engine.ledger().len() - mark
    );
    print_entries(&engine.ledger().entries()[mark..]);

    // ================================================================================
    // STEP 5: SHIPMENTS - Restore carriers, references and date order
    // ================================================================================
    println!("\n🚚 STEP 5: SHIPMENTS - Restoring carriers, references and date order...");

    let mark = engine.ledger().len();
    let shipments = engine.correct_shipments(&data.shipments, &sales);
    println!(
        "   ✅ {} in, {} out, {} corrections",
        data.shipments.len(),
        shipments.len(),
        engine.ledger().len() - mark
    );
    print_entries(&engine.ledger().entries()[mark..]);

    // ================================================================================
    // FINAL: Summarize the correction ledger
    // ================================================================================
    println!("\n📊 FINAL: Correction ledger summary...");

    let summary = engine.summary();
    println!("   Total corrections: {}", summary.total);

    println!("\n   By correction type:");
    for (kind, count) in &summary.by_kind {
        println!("      - {}: {}", kind, count);
    }

    println!("\n   By dataset:");
    for (entity, count) in &summary.by_entity {
        println!("      - {}: {}", entity, count);
    }

    println!("\n✨ CLEANUP COMPLETE!");
    println!("{}", "=".repeat(60));
    println!("Every change is on the ledger:");
    println!("  - Duplicate ids dropped, first occurrence kept");
    println!("  - Emails, phones and states standardized");
    println!("  - Categories inferred from product names");
    println!("  - Totals recomputed where they disagreed");
    println!("  - Orphan rows removed and date order restored");
}

fn print_entries(entries: &[CorrectionEntry]) {
    const SHOWN: usize = 6;
    for entry in entries.iter().take(SHOWN) {
        println!(
            "      - #{} {}: \"{}\" → \"{}\" [{}]",
            entry.record_id, entry.field, entry.old_value, entry.new_value, entry.correction
        );
    }
    if entries.len() > SHOWN {
        println!("      ... and {} more", entries.len() - SHOWN);
    }
}
