//! Entry preview command handler.

use chrono::NaiveDate;
use herald::{AssetStore, ContentCalendar, FileSystemAssetStore, HeraldConfig, HeraldResult, RunLog};

/// Print the entry scheduled for `date` and what a run would do with it.
///
/// Reads only local files: the calendar, the image directory and the run log.
pub async fn show_entry(config: &HeraldConfig, date: Option<NaiveDate>) -> HeraldResult<()> {
    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
    let calendar = ContentCalendar::from_file(config.paths().calendar())?;
    let entry = calendar.entry_for(date)?;

    println!("Date:      {}", entry.date());
    println!("Entry:     {}", entry.identifier());
    println!("Category:  {} {}", entry.category().emoji(), entry.category());
    if let Some(week) = entry.week() {
        println!("Week:      {}", week);
    }
    println!("Title:     {}", entry.display_title());

    let schedule = config.schedule();
    match schedule.category_for(date) {
        Some(category) => println!("Schedule:  {} day", category),
        None if schedule.enforce => println!("Schedule:  not a posting day (run would skip)"),
        None => println!("Schedule:  not a posting day (not enforced)"),
    }

    let store = FileSystemAssetStore::new(config.paths().images(), config.assets().clone());
    match entry.image() {
        Some(image) => match store.resolve(Some(image.as_str())).await {
            Ok(asset) => println!(
                "Image:     {} ({}, {} bytes)",
                image,
                asset.format(),
                asset.size()
            ),
            Err(e) => println!("Image:     {} (unusable: {})", image, e),
        },
        None => println!("Image:     none"),
    }

    let log = RunLog::in_dir(config.paths().log_dir());
    match log.find_published(&entry.identifier()).await? {
        Some(record) => println!(
            "Published: yes, {} at {}",
            record
                .post_id()
                .map(|p| p.0.as_str())
                .unwrap_or("unknown id"),
            record
                .finished_at()
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "unknown time".to_string())
        ),
        None => println!("Published: no"),
    }

    println!();
    println!("Fields:");
    println!(
        "{}",
        serde_json::to_string_pretty(entry.fields()).unwrap_or_default()
    );

    Ok(())
}
