//! Tests for saving defects through `DefectExporter`.

use super::{defect, source_image, timestamp};
use crate::format::{DefectExporter, ExportError, ResultSheet};
use crate::model::{Category, RectCoords};

fn csv_lines(exporter: &DefectExporter) -> Vec<String> {
    std::fs::read_to_string(exporter.validation_log().path())
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn test_defect_without_rectangles_is_not_exported() {
    let dest = tempfile::tempdir().unwrap();
    let exporter = DefectExporter::new(dest.path());
    let source = source_image("board.png");
    let defects = vec![
        defect(1, Category::CurrentProject, &[RectCoords::new(10, 10, 200, 150)]),
        defect(2, Category::CurrentProject, &[]),
    ];

    let report = exporter.export_all_at(&source, &defects, timestamp());

    assert_eq!(report.saved, 1);
    assert_eq!(report.total, 2);
    assert_eq!(report.attempted(), 1);
    assert_eq!(report.skipped, vec!["Defect 2".to_string()]);
    assert!(report.all_saved());
    assert_eq!(report.summary(), "Saved: 1/2");
    assert_eq!(report.files_created.len(), 1);

    let folder = exporter.category_folder(Category::CurrentProject);
    let images: Vec<_> = std::fs::read_dir(&folder)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|x| x == "png"))
        .collect();
    assert_eq!(images.len(), 1);

    // header + one row
    assert_eq!(csv_lines(&exporter).len(), 2);
}

#[test]
fn test_output_path_uses_category_folder_and_extension() {
    let dest = tempfile::tempdir().unwrap();
    let exporter = DefectExporter::new(dest.path());
    let source = source_image("board.png");
    let d = defect(1, Category::OtherProject, &[RectCoords::new(5, 5, 50, 50)]);

    let path = exporter.export_defect(&source, &d, timestamp()).unwrap();

    assert_eq!(
        path,
        dest.path()
            .join("Bug_for_other_Project")
            .join("board_Defect 1.png")
    );
    let written = image::open(&path).unwrap().to_rgb8();
    assert_eq!(written.dimensions(), (800, 600));
    assert_eq!(written.get_pixel(5, 5), &image::Rgb([255, 255, 0]));
    assert_eq!(written.get_pixel(60, 60), &image::Rgb([90, 90, 90]));
}

#[test]
fn test_failed_defect_does_not_stop_the_rest() {
    let dest = tempfile::tempdir().unwrap();
    let exporter = DefectExporter::new(dest.path());
    let source = source_image("board.png");

    let mut unnamed = defect(1, Category::CurrentProject, &[RectCoords::new(0, 0, 9, 9)]);
    unnamed.rename.clear();
    let defects = vec![
        unnamed,
        defect(2, Category::NoDefects, &[RectCoords::new(0, 0, 9, 9)]),
    ];

    let report = exporter.export_all_at(&source, &defects, timestamp());
    assert_eq!(report.saved, 1);
    assert!(!report.all_saved());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].defect, "Defect 1");
    assert_eq!(
        report.message(),
        "Some defects could not be saved. Saved: 1/2"
    );
    assert!(
        exporter
            .category_folder(Category::NoDefects)
            .join("board_Defect 2.png")
            .exists()
    );
}

#[test]
fn test_missing_destination_fails_every_defect() {
    let dest = tempfile::tempdir().unwrap();
    let exporter = DefectExporter::new(dest.path().join("does-not-exist"));
    let source = source_image("board.png");
    let d = defect(1, Category::CurrentProject, &[RectCoords::new(0, 0, 9, 9)]);

    assert!(matches!(
        exporter.export_defect(&source, &d, timestamp()),
        Err(ExportError::MissingDestination { .. })
    ));
    let report = exporter.export_all_at(&source, &[d], timestamp());
    assert_eq!(report.summary(), "Saved: 0/1");
}

#[test]
fn test_export_defect_rejects_empty_defect() {
    let dest = tempfile::tempdir().unwrap();
    let exporter = DefectExporter::new(dest.path());
    let d = defect(3, Category::CurrentProject, &[]);
    assert!(matches!(
        exporter.export_defect(&source_image("board.png"), &d, timestamp()),
        Err(ExportError::NoRectangles { .. })
    ));
}

#[test]
fn test_result_sheet_row_per_saved_defect() {
    let dest = tempfile::tempdir().unwrap();
    let exporter = DefectExporter::new(dest.path());
    let source = source_image("board.png");
    let mut first = defect(1, Category::CurrentProject, &[RectCoords::new(0, 0, 9, 9)]);
    first.result_text = "Button overlaps label".to_string();
    let second = defect(2, Category::CurrentProject, &[RectCoords::new(20, 20, 40, 40)]);

    let report = exporter.export_all_at(&source, &[first, second], timestamp());
    assert_eq!(report.saved, 2);

    let sheet = ResultSheet::in_folder(&exporter.category_folder(Category::CurrentProject));
    let (name, rows) = sheet.read_rows().unwrap();
    assert_eq!(name, "Defect Result");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], vec!["Filename", "Title", "Result", "Defect URL"]);
    assert_eq!(rows[1][0], "board_Defect 1");
    assert_eq!(rows[1][1], "");
    assert_eq!(rows[1][2], "Button overlaps label");
    assert_eq!(rows[2][0], "board_Defect 2");
}

#[test]
fn test_ensure_category_folders() {
    let dest = tempfile::tempdir().unwrap();
    let exporter = DefectExporter::new(dest.path());
    exporter.ensure_category_folders().unwrap();
    for name in [
        "Bug_for_current_Project",
        "Bug_for_other_Project",
        "No_defects_found",
    ] {
        assert!(dest.path().join(name).is_dir(), "{} missing", name);
    }
}
