//! Example 02: Querying and Notifications
//!
//! This example demonstrates filtering, sorting, and due-date notifications
//! over a populated store.
//!
//! Run with: cargo run --example 02_query_and_notify

use chrono::{Duration, Local};
use eyre::Result;
use taskplanner::{JsonFile, Priority, SortKey, Status, TaskFilter, TaskStore};

fn main() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let store_path = temp_dir.path().join("tasks.json");

    println!("TaskPlanner Query & Notify Example");
    println!("==================================\n");

    let mut store = TaskStore::open(Box::new(JsonFile::new(&store_path)))?;

    // Seed tasks around today's date so the notifier has something to say
    let today = Local::now().date_naive();
    let date = |offset: i64| (today + Duration::days(offset)).to_string();

    println!("Creating sample tasks...\n");
    store.add("Pay bill", "Utility", &date(-2), Some(Priority::High))?;
    store.add("Renew license", "DMV", &date(1), Some(Priority::Medium))?;
    store.add("Book dentist", "Checkup", &date(30), Some(Priority::Low))?;
    store.add("File taxes", "Annual return", &date(10), Some(Priority::High))?;
    store.mark_complete(3)?;

    for task in store.tasks() {
        println!(
            "  {} : {} (deadline={}, status={})",
            task.id, task.title, task.deadline, task.status
        );
    }
    println!();

    // Filter 1: by status
    println!("1. Filter by status = Pending:");
    let pending = store.filter(&TaskFilter {
        status: Some(Status::Pending),
        ..Default::default()
    });
    for task in &pending {
        println!("   - {} : {}", task.id, task.title);
    }
    println!("   Found: {} tasks\n", pending.len());

    // Filter 2: conjunction of criteria
    println!("2. Filter by status = Pending AND priority = High:");
    let urgent = store.filter(&TaskFilter {
        status: Some(Status::Pending),
        priority: Some(Priority::High),
        ..Default::default()
    });
    for task in &urgent {
        println!("   - {} : {}", task.id, task.title);
    }
    println!("   Found: {} tasks\n", urgent.len());

    // Sort: ascending by deadline, stable for equal keys
    println!("3. Sort by deadline:");
    for task in store.sort(SortKey::Deadline) {
        println!("   - {} : {} ({})", task.deadline, task.title, task.status);
    }
    println!();

    // Notify: pending tasks that are overdue or due within a day
    println!("4. Notifications:");
    for message in store.notify() {
        println!("   {message}");
    }

    println!("\nExample complete!");
    Ok(())
}
