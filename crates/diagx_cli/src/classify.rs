use diagx_core::Category;
use diagx_engine::display_name;

/// Category of an upload, decided from its base name.
///
/// `.html` wins over the name prefixes; an `equipment` prefix wins over `link`
/// and both win over the plain `.log`/`.txt` extensions.
pub fn classify(upload_name: &str) -> Option<Category> {
    let name = display_name(upload_name);
    let lower = name.to_ascii_lowercase();
    if lower.ends_with(".html") {
        Some(Category::Html)
    } else if name.starts_with("equipment") {
        Some(Category::Equipment)
    } else if name.starts_with("link") {
        Some(Category::Link)
    } else if lower.ends_with(".log") {
        Some(Category::Log)
    } else if lower.ends_with(".txt") {
        Some(Category::Text)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::classify;
    use diagx_core::Category;

    #[test]
    fn extensions_and_prefixes_pick_the_category() {
        assert_eq!(classify("export/device.html"), Some(Category::Html));
        assert_eq!(classify("export/site_core.log"), Some(Category::Log));
        assert_eq!(classify("site_core.txt"), Some(Category::Text));
        assert_eq!(classify("export/link_status_jms.log"), Some(Category::Link));
        assert_eq!(classify("equipment_status.txt"), Some(Category::Equipment));
        assert_eq!(classify("equipment_link.log"), Some(Category::Equipment));
    }

    #[test]
    fn unknown_files_are_ignored() {
        assert_eq!(classify("readme.md"), None);
        assert_eq!(classify("archive.zip"), None);
    }

    #[test]
    fn prefix_applies_to_the_base_name_only() {
        assert_eq!(classify("link/site_core.log"), Some(Category::Log));
    }
}
