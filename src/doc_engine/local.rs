//! Harvests class names from a locally rendered javadoc site.

use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::index_core::NameIndexBuilder;

/// Package and `$`-separated class name for a page at `relative` (a path
/// below the site root), or `None` for non-class pages.
///
/// Class pages start with an uppercase letter; hyphenated paths are
/// package summaries, indexes and similar.
pub fn class_page(relative: &Path) -> Option<(String, String)> {
    if relative.extension().and_then(|e| e.to_str()) != Some("html") {
        return None;
    }
    let relative_str = relative.to_str()?;
    if relative_str.contains('-') {
        return None;
    }
    let stem = relative.file_stem()?.to_str()?;
    if !stem.chars().next().is_some_and(char::is_uppercase) {
        return None;
    }

    let package = relative
        .parent()?
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect::<Vec<_>>()
        .join(".");
    Some((package, stem.replace('.', "$")))
}

/// Register every class page below `root` under its bare qualified name.
///
/// Returns the number of class pages found.
pub fn scan_site(root: &Path, builder: &mut NameIndexBuilder) -> std::io::Result<usize> {
    info!("Scanning javadoc site at {}", root.display());
    let mut count = 0;

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::other)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let Some((package, class_name)) = class_page(relative) else {
            continue;
        };
        if package.is_empty() {
            debug!("Skipping class page without package: {}", relative.display());
            continue;
        }

        let location = format!("{package}.{class_name}");
        builder.register_type(&package, &class_name, &location);
        count += 1;
    }

    info!("Found {} class pages", count);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index_core::Lookup;
    use std::path::PathBuf;

    #[test]
    fn test_class_page() {
        assert_eq!(
            class_page(&PathBuf::from("com/example/Widget.html")),
            Some(("com.example".into(), "Widget".into()))
        );
        assert_eq!(
            class_page(&PathBuf::from("com/example/Widget.Part.html")),
            Some(("com.example".into(), "Widget$Part".into()))
        );
    }

    #[test]
    fn test_non_class_pages_are_skipped() {
        assert_eq!(class_page(&PathBuf::from("com/example/package-summary.html")), None);
        assert_eq!(class_page(&PathBuf::from("com/example/class-use/Widget.html")), None);
        assert_eq!(class_page(&PathBuf::from("com/example/widget.html")), None);
        assert_eq!(class_page(&PathBuf::from("com/example/Widget.txt")), None);
    }

    #[test]
    fn test_scan_registers_candidates_in_path_order() {
        let site = tempfile::tempdir().unwrap();
        for page in ["b/two/Dup.html", "a/one/Dup.html", "a/one/Solo.html"] {
            let path = site.path().join(page);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, "").unwrap();
        }

        let mut builder = NameIndexBuilder::new();
        assert_eq!(scan_site(site.path(), &mut builder).unwrap(), 3);
        let index = builder.build();

        assert_eq!(index.lookup("Solo"), Lookup::Unique("a.one.Solo"));
        assert_eq!(
            index.lookup("Dup"),
            Lookup::Ambiguous(&["a.one.Dup".to_string(), "b.two.Dup".to_string()])
        );
    }
}
