//! Report rendering tests against the documented section order and the
//! missing-photos behavior.

use chrono::Utc;
use pdc_common::model::{ConditionItem, Images, Inspection};
use pdc_report::{render, to_html, Block};

fn headings(report: &pdc_report::Report) -> Vec<String> {
    report
        .pages
        .iter()
        .flat_map(|page| &page.blocks)
        .filter_map(|block| match block {
            Block::SectionHeading(title) => Some(title.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn sections_appear_in_fixed_order() {
    let mut record = Inspection::new_draft(Utc::now());
    record.images.front_photo = "https://img.example/front.jpg".to_string();

    let report = render(&record, Utc::now());
    assert_eq!(
        headings(&report),
        vec![
            "Vehicle Details",
            "Exterior Condition",
            "Engine Conditions",
            "Additional Checks",
            "Vehicle Photos"
        ]
    );
}

#[test]
fn record_without_photos_renders_without_a_photo_section() {
    let record = Inspection::new_draft(Utc::now());
    assert!(record.images.is_empty());

    let report = render(&record, Utc::now());
    assert_eq!(
        headings(&report),
        vec![
            "Vehicle Details",
            "Exterior Condition",
            "Engine Conditions",
            "Additional Checks"
        ]
    );

    // The HTML writer copes with the same record
    let html = to_html(&report);
    assert!(!html.contains("Vehicle Photos"));
    assert!(html.contains("Vehicle Details"));
}

#[test]
fn any_subset_of_photos_is_tolerated() {
    let mut record = Inspection::new_draft(Utc::now());
    record.images = Images {
        rhs_side_photo: "https://img.example/rhs.jpg".to_string(),
        additional_photos: vec!["https://img.example/extra.jpg".to_string()],
        ..Images::default()
    };

    let report = render(&record, Utc::now());
    let photo_labels: Vec<_> = report
        .pages
        .iter()
        .flat_map(|page| &page.blocks)
        .filter_map(|block| match block {
            Block::PhotoRef { label, .. } => Some(label.as_str()),
            _ => None,
        })
        .collect();

    assert_eq!(photo_labels, vec!["RHS Side Photo", "Additional Photo 1"]);
}

#[test]
fn issue_rows_carry_their_description_and_ok_rows_do_not() {
    let mut record = Inspection::new_draft(Utc::now());
    record.exterior_condition.paint_condition = ConditionItem::issue("scratch on door");

    let report = render(&record, Utc::now());
    let rows: Vec<_> = report
        .pages
        .iter()
        .flat_map(|page| &page.blocks)
        .filter_map(|block| match block {
            Block::ConditionRow {
                label, description, ..
            } => Some((label.as_str(), description.clone())),
            _ => None,
        })
        .collect();

    // 7 exterior + 5 engine + 5 additional rows, always rendered
    assert_eq!(rows.len(), 17);
    assert_eq!(
        rows[0],
        ("Paint Condition", Some("scratch on door".to_string()))
    );
    assert!(rows[1..].iter().all(|(_, description)| description.is_none()));
}
