//! Stored filename conventions
//!
//! Uploaded files are stored as `<entity>/<YYYYMMDD>/<YYYYMMDD-HHmmssSSS>_<uuid>_<name>`
//! relative to the store root. Duplicated files keep that layout and carry a
//! `<YYYYMMDD-HHmmss>_DUPLICATE_` marker in front of the original name.

use chrono::{Local, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

static GENERATED_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{8}-\d{9}_[0-9a-f]{32}_").expect("valid prefix regex"));

static DUPLICATE_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{8}-\d{6}_DUPLICATE_)+").expect("valid marker regex"));

/// Directory and filename for a new upload of `entity`
pub fn create_path_and_name(entity: &str, filename: &str) -> (String, String) {
    create_path_and_name_at(entity, filename, Local::now().naive_local())
}

pub fn create_path_and_name_at(
    entity: &str,
    filename: &str,
    at: NaiveDateTime,
) -> (String, String) {
    let dir = format!("{}/{}/", entity, at.format("%Y%m%d"));
    let name = format!(
        "{}_{}_{}",
        at.format("%Y%m%d-%H%M%S%3f"),
        Uuid::new_v4().simple(),
        filename
    );
    (dir, name)
}

/// Human filename of a stored file, without directory, generated prefix or
/// duplicate markers
pub fn original_filename(stored: &str) -> &str {
    let base = stored.rsplit('/').next().unwrap_or(stored);
    let base = match GENERATED_PREFIX.find(base) {
        Some(prefix) => &base[prefix.end()..],
        None => base,
    };
    match DUPLICATE_MARKERS.find(base) {
        Some(markers) => &base[markers.end()..],
        None => base,
    }
}

/// Name handed to [`create_path_and_name`] for a copy of `stored`
pub fn duplicate_filename(stored: &str, at: NaiveDateTime) -> String {
    format!(
        "{}_DUPLICATE_{}",
        at.format("%Y%m%d-%H%M%S"),
        original_filename(stored)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_milli_opt(14, 5, 7, 42)
            .unwrap()
    }

    #[test]
    fn test_create_path_and_name_layout() {
        let (dir, name) = create_path_and_name_at("e_document_template", "report.docx", at());
        assert_eq!(dir, "e_document_template/20240309/");
        assert!(name.starts_with("20240309-140507042_"));
        assert!(name.ends_with("_report.docx"));
        assert_eq!(original_filename(&format!("{}{}", dir, name)), "report.docx");
    }

    #[test]
    fn test_names_are_unique_within_the_same_millisecond() {
        let (_, first) = create_path_and_name_at("e_task", "a.txt", at());
        let (_, second) = create_path_and_name_at("e_task", "a.txt", at());
        assert_ne!(first, second);
    }

    #[test]
    fn test_original_filename_strips_duplicate_markers() {
        let (dir, name) = create_path_and_name_at("e_task", "plan.pdf", at());
        let stored = format!("{}{}", dir, name);

        let once = duplicate_filename(&stored, at());
        assert_eq!(once, "20240309-140507_DUPLICATE_plan.pdf");

        let (dir, name) = create_path_and_name_at("e_task", &once, at());
        let twice = duplicate_filename(&format!("{}{}", dir, name), at());
        assert_eq!(twice, "20240309-140507_DUPLICATE_plan.pdf");
    }

    #[test]
    fn test_original_filename_of_foreign_names() {
        assert_eq!(original_filename("legacy.png"), "legacy.png");
        assert_eq!(original_filename("e_task/20240309/legacy.png"), "legacy.png");
    }
}
