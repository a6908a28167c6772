use std::path::Path;

use super::Sources;

pub fn run(sources: &Sources, output: Option<&Path>) -> Result<(), String> {
    let pack = sources.content()?;
    let mut json = pack.to_json_pretty().map_err(|e| e.to_string())?;
    json.push('\n');

    if let Some(path) = output {
        std::fs::write(path, &json)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported to {}", path.display());
    } else {
        print!("{json}");
    }

    Ok(())
}
