//! Example 01: Basic CRUD Operations
//!
//! This example demonstrates the fundamental create, read, update, and delete
//! operations with TaskStore.
//!
//! Run with: cargo run --example 01_basic_crud

use eyre::Result;
use taskplanner::{JsonFile, Priority, TaskPatch, TaskStore};

fn main() -> Result<()> {
    // Create a temporary directory for this example
    let temp_dir = tempfile::tempdir()?;
    let store_path = temp_dir.path().join("tasks.json");

    println!("TaskPlanner Basic CRUD Example");
    println!("==============================\n");
    println!("Store path: {}\n", store_path.display());

    // Open (or create) the store
    let mut store = TaskStore::open(Box::new(JsonFile::new(&store_path)))?;
    println!("Store opened successfully.\n");

    // CREATE: Add a couple of tasks
    println!("1. CREATE - Adding tasks...");
    let first = store.add("Pay bill", "Utility", "2024-01-01", Some(Priority::High))?;
    println!("   Created task {} : {}", first.id, first.title);
    let second = store.add("Renew license", "DMV", "2024-02-01", None)?;
    println!("   Created task {} : {}\n", second.id, second.title);

    // READ: Retrieve a task by id
    println!("2. READ - Retrieving task 1...");
    let task = store.get(1)?;
    println!("   - Title: {}", task.title);
    println!("   - Description: {}", task.description);
    println!("   - Deadline: {}", task.deadline);
    println!("   - Status: {}\n", task.status);

    // UPDATE: Partial update, untouched fields keep their values
    println!("3. UPDATE - Changing the description of task 1...");
    let updated = store.update(
        1,
        TaskPatch {
            description: Some("Electricity and water".to_string()),
            ..Default::default()
        },
    )?;
    println!("   - Title unchanged: {}", updated.title);
    println!("   - New description: {}\n", updated.description);

    // COMPLETE: Mark a task done
    println!("4. COMPLETE - Marking task 2 as completed...");
    let completed = store.mark_complete(2)?;
    println!("   - Status: {}\n", completed.status);

    // LIST: Snapshot in insertion order
    println!("5. LIST - All tasks:");
    for task in store.tasks() {
        println!("   - {} : {} ({})", task.id, task.title, task.status);
    }
    println!();

    // DELETE: Remove a task
    println!("6. DELETE - Removing task 1...");
    store.delete(1)?;
    println!("   Task exists = {}\n", store.get(1).is_ok());

    println!("Example complete!");
    Ok(())
}
