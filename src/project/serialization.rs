// JSON project file - versioned, camelCase wire format

use crate::project::{ProjectData, ProjectError, validate_project};
use crate::sequencer::note::Note;
use crate::sequencer::track::Track;
use std::path::Path;

/// Serialize a project snapshot to pretty JSON
pub fn export_json(name: &str, tracks: &[Track], notes: &[Note]) -> Result<String, ProjectError> {
    let project = ProjectData::new(name, tracks, notes);
    Ok(serde_json::to_string_pretty(&project)?)
}

/// Parse and validate a project from JSON
///
/// Structural problems surface as the JSON parse error; out-of-range values
/// fail validation with the offending index. Either way the import aborts
/// whole, never partially.
pub fn import_json(json: &str) -> Result<ProjectData, ProjectError> {
    let project: ProjectData = serde_json::from_str(json)?;
    validate_project(&project)?;
    Ok(project)
}

/// Write a project file to disk
pub fn save_project_file(
    path: &Path,
    name: &str,
    tracks: &[Track],
    notes: &[Note],
) -> Result<(), ProjectError> {
    let json = export_json(name, tracks, notes)?;
    std::fs::write(path, json)?;
    log::debug!("saved project '{}' to {}", name, path.display());
    Ok(())
}

/// Read and validate a project file from disk
pub fn load_project_file(path: &Path) -> Result<ProjectData, ProjectError> {
    let json = std::fs::read_to_string(path)?;
    import_json(&json)
}
