use anyhow::Result;
use tokio_util::sync::CancellationToken;

use reap::central::FoodService;
use reap::config::ReapConfig;
use reap::food::types::GetFoodFilter;

/// List a user's food records in the terminal.
pub async fn records(config: &ReapConfig, user_id: &str, name: Option<String>) -> Result<()> {
    let store = reap::food::create_store(&config.storage)?;
    let food = FoodService::new(store);

    let filter = GetFoodFilter {
        name,
        ..GetFoodFilter::default()
    };
    let records = food
        .get_food_records(user_id, &filter, &CancellationToken::new())
        .await?;

    if records.is_empty() {
        println!("No records found.");
        return Ok(());
    }

    println!("Found {} record(s)\n", records.len());
    for (i, record) in records.iter().enumerate() {
        let time = record
            .time
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".into());
        println!("  {}. {} [{}] {}", i + 1, record.name, record.id, time);
        println!(
            "     {:.1} kJ ({:.1} cal), {:.1} g, {:.1} ml",
            record.kj, record.calories, record.grams, record.ml
        );
        if !record.description.is_empty() {
            println!("     {}", record.description);
        }
        println!();
    }

    Ok(())
}
