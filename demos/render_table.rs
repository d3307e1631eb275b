//! Render a small grid without a browser and walk one cell through an edit.
//!
//! Run with: cargo run --example render_table

use std::cell::RefCell;
use std::rc::Rc;

use gridview::{
    parse_columns, Cell, CellRegistry, CellSurface, EventBus, Gesture, GridEvent, MemoryModel,
    RawValue, Result, TestSurface,
};

fn main() -> Result<()> {
    let registry = CellRegistry::with_builtins();
    let columns = parse_columns(
        r#"[
            {"name": "name", "label": "Name"},
            {"name": "age", "label": "Age", "cell": "integer"},
            {"name": "balance", "label": "Balance", "cell": "number"}
        ]"#,
        &registry,
    )?;

    let rows = [
        [("name", RawValue::from("Alice")), ("age", RawValue::from(34.0)), ("balance", RawValue::from(1234.5))],
        [("name", RawValue::from("Bob")), ("age", RawValue::from(28.0)), ("balance", RawValue::from(-20.0))],
    ];

    let events = EventBus::new();
    events.subscribe(Rc::new(|event: &GridEvent| {
        println!("  event: {event:?}");
    }));

    let mut grid: Vec<Vec<Cell<TestSurface>>> = Vec::new();
    for row in rows {
        let model: Rc<RefCell<MemoryModel>> =
            Rc::new(RefCell::new(MemoryModel::from_pairs(row)));
        let mut cells = Vec::new();
        for column in &columns {
            cells.push(Cell::new(
                Rc::clone(column),
                Rc::<RefCell<MemoryModel>>::clone(&model),
                TestSurface::new(),
                &registry,
                events.clone(),
            )?);
        }
        grid.push(cells);
    }

    println!("initial grid:");
    for row in &grid {
        let line: Vec<&str> = row.iter().map(|c| c.surface().text.as_str()).collect();
        println!("  {}", line.join(" | "));
    }

    // Edit Alice's balance: activate, type a new value, commit.
    println!("\nediting balance:");
    if let Some(cell) = grid.first_mut().and_then(|r| r.last_mut()) {
        cell.activate();
        cell.surface_mut().set_input_value("2,000.75");
        cell.gesture(Gesture::Commit);
        println!("  new display: {}", cell.surface().text);
    }

    Ok(())
}
