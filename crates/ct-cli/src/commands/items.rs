//! Items command for listing logged meals and workouts.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use ct_core::{Item, ItemKind};
use ct_db::Tracker;

/// Item listing for JSON output.
#[derive(Debug, Serialize)]
struct ItemsJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    meals: Option<Vec<&'a Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    workouts: Option<Vec<&'a Item>>,
}

pub fn run<W: Write>(
    writer: &mut W,
    tracker: &Tracker,
    kind: Option<ItemKind>,
    filter: Option<&str>,
    json: bool,
) -> Result<()> {
    let show_meals = kind.is_none_or(|kind| kind == ItemKind::Meal);
    let show_workouts = kind.is_none_or(|kind| kind == ItemKind::Workout);

    let meals = show_meals.then(|| filtered(tracker.meals(), filter));
    let workouts = show_workouts.then(|| filtered(tracker.workouts(), filter));

    if json {
        serde_json::to_writer_pretty(&mut *writer, &ItemsJson { meals, workouts })?;
        writeln!(writer)?;
        return Ok(());
    }

    if let Some(meals) = meals {
        write_section(writer, "Meals", &meals)?;
    }
    if let Some(workouts) = workouts {
        write_section(writer, "Workouts", &workouts)?;
    }
    Ok(())
}

/// Case-insensitive substring filtering on item names.
fn filtered<'a>(items: &'a [Item], filter: Option<&str>) -> Vec<&'a Item> {
    let needle = filter.map(str::to_lowercase);
    items
        .iter()
        .filter(|item| match &needle {
            Some(needle) => item.name.to_lowercase().contains(needle),
            None => true,
        })
        .collect()
}

fn write_section<W: Write>(writer: &mut W, heading: &str, items: &[&Item]) -> Result<()> {
    writeln!(writer, "{heading}:")?;
    if items.is_empty() {
        writeln!(writer, "  (none)")?;
        return Ok(());
    }
    for item in items {
        writeln!(writer, "- {}  {} ({} cal)", item.id, item.name, item.calories)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use ct_db::Store;

    fn tracker_with_entries() -> Tracker {
        let mut tracker = Tracker::load(Store::open_in_memory().unwrap()).unwrap();
        tracker.add_meal(Item::new("Eggs", 300).unwrap()).unwrap();
        tracker.add_meal(Item::new("Salad", 250).unwrap()).unwrap();
        tracker.add_workout(Item::new("Run", 200).unwrap()).unwrap();
        tracker
    }

    fn render(tracker: &Tracker, kind: Option<ItemKind>, filter: Option<&str>) -> String {
        let mut output = Vec::new();
        run(&mut output, tracker, kind, filter, false).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn lists_both_collections_in_insertion_order() {
        let tracker = tracker_with_entries();
        let output = render(&tracker, None, None);

        let eggs = output.find("Eggs").unwrap();
        let salad = output.find("Salad").unwrap();
        assert!(eggs < salad);
        assert!(output.contains("Meals:"));
        assert!(output.contains("Workouts:"));
        assert!(output.contains("Run (200 cal)"));
    }

    #[test]
    fn kind_restricts_to_one_collection() {
        let tracker = tracker_with_entries();
        let output = render(&tracker, Some(ItemKind::Workout), None);

        assert!(!output.contains("Meals:"));
        assert!(output.contains("Workouts:"));
        assert!(!output.contains("Eggs"));
    }

    #[test]
    fn filter_matches_case_insensitively() {
        let tracker = tracker_with_entries();
        let output = render(&tracker, None, Some("eGGs"));

        assert!(output.contains("Eggs"));
        assert!(!output.contains("Salad"));
        assert!(!output.contains("Run ("));
    }

    #[test]
    fn empty_sections_say_so() {
        let tracker = Tracker::load(Store::open_in_memory().unwrap()).unwrap();
        let output = render(&tracker, None, None);
        assert_eq!(output.matches("(none)").count(), 2);
    }

    #[test]
    fn json_output_carries_item_fields() {
        let tracker = tracker_with_entries();
        let mut output = Vec::new();
        run(&mut output, &tracker, None, None, true).unwrap();

        let listing: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(listing["meals"].as_array().unwrap().len(), 2);
        assert_eq!(listing["meals"][0]["name"], "Eggs");
        assert_eq!(listing["meals"][0]["calories"], 300);
        assert_eq!(listing["workouts"][0]["name"], "Run");
    }
}
