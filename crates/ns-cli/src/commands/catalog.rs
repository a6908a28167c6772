use comfy_table::{ContentArrangement, Table};
use ns_core::{InteractableKind, SceneId};

use super::Sources;

pub fn run(sources: &Sources, scene: Option<&str>) -> Result<(), String> {
    let pack = sources.content()?;

    let scenes: Vec<SceneId> = match scene {
        Some(name) => vec![name.parse::<SceneId>().map_err(|e| e.to_string())?],
        None => SceneId::ALL.to_vec(),
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Scene", "Id", "X", "Label", "Kind", "Needs"]);

    let mut count = 0;
    for scene in scenes {
        for item in pack.catalog(scene) {
            count += 1;
            table.add_row(vec![
                scene.to_string(),
                item.id.clone(),
                format!("{:.0}", item.position),
                item.label.clone(),
                format!("{:?}", item.kind),
                needs(item.kind),
            ]);
        }
    }

    if count == 0 {
        println!("  No interactables found.");
        return Ok(());
    }

    println!("{table}");
    println!();
    println!("  {count} interactables");

    Ok(())
}

fn needs(kind: InteractableKind) -> String {
    let mut parts = Vec::new();
    if kind.requires_vision() {
        parts.push("vision".to_string());
    }
    if let Some(flag) = kind.required_flag() {
        parts.push(flag.to_string());
    }
    if parts.is_empty() {
        "—".to_string()
    } else {
        parts.join(", ")
    }
}
