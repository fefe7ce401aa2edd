/// The set of selectable deck files. The server does not expose a listing
/// endpoint, so the catalog is enumerated statically, mirroring the file
/// picker the editor page ships with.
pub const FILE_CATALOG: &[&str] = &[
    "lesson1.json",
    "lesson2.json",
    "lesson3.json",
    "demo.json",
];

pub fn contains(file_name: &str) -> bool {
    FILE_CATALOG.contains(&file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_non_empty_and_lists_json_files() {
        assert!(!FILE_CATALOG.is_empty());
        for name in FILE_CATALOG {
            assert!(name.ends_with(".json"), "unexpected catalog entry {name}");
        }
    }

    #[test]
    fn membership_check() {
        assert!(contains("lesson1.json"));
        assert!(!contains("unknown.json"));
    }
}
