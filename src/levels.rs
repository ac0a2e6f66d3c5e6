//! Filesystem discovery and parsing of level resources.
//!
//! Resources are `level1.json`, `level2.json`, ... discovered by consecutive
//! index in a single directory. Loading never fails: an unreadable or
//! malformed file is logged and leaves an empty slot, which still counts
//! toward the level total but builds procedurally.

use std::fs;
use std::path::Path;

use crate::sim::{LevelLibrary, LevelSpec};

/// Load every consecutive level resource from `dir`. A missing directory or
/// an empty one yields an empty library (purely procedural progression).
pub fn load_level_library(dir: &Path) -> LevelLibrary {
    let mut slots = Vec::new();
    for index in 1u32.. {
        let path = dir.join(format!("level{index}.json"));
        if !path.exists() {
            break;
        }
        slots.push(read_spec(&path));
    }
    log::info!(
        "discovered {} level resource(s) in {}",
        slots.len(),
        dir.display()
    );
    LevelLibrary::from_slots(slots)
}

fn read_spec(path: &Path) -> Option<LevelSpec> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("cannot read {}: {e}", path.display());
            return None;
        }
    };
    match serde_json::from_str::<LevelSpec>(&text) {
        Ok(spec) => Some(spec),
        Err(e) => {
            log::warn!("malformed level resource {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new(name: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "chicken-world-{name}-{}",
                std::process::id()
            ));
            let _ = fs::remove_dir_all(&path);
            fs::create_dir_all(&path).unwrap();
            Self(path)
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn missing_directory_yields_empty_library() {
        let library = load_level_library(Path::new("/definitely/not/here"));
        assert!(library.is_empty());
    }

    #[test]
    fn loads_consecutive_resources_and_stops_at_the_first_gap() {
        let dir = TempDir::new("gap");
        fs::write(dir.0.join("level1.json"), r#"{"world_width": 2000}"#).unwrap();
        fs::write(dir.0.join("level2.json"), r#"{}"#).unwrap();
        // Gap: level3 missing, level4 must be ignored
        fs::write(dir.0.join("level4.json"), r#"{}"#).unwrap();

        let library = load_level_library(&dir.0);
        assert_eq!(library.len(), 2);
        assert_eq!(library.get(1).unwrap().world_width, Some(2000.0));
        assert!(library.get(2).is_some());
    }

    #[test]
    fn malformed_file_leaves_an_empty_slot() {
        let dir = TempDir::new("malformed");
        fs::write(dir.0.join("level1.json"), r#"{"world_width": }"#).unwrap();
        fs::write(dir.0.join("level2.json"), r#"{}"#).unwrap();

        let library = load_level_library(&dir.0);
        // Both files count toward the total; only the second parsed
        assert_eq!(library.len(), 2);
        assert!(library.get(1).is_none());
        assert!(library.get(2).is_some());
    }
}
