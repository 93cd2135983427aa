//! Report document model and flow layout
//!
//! Blocks carry fixed heights in points; pagination is a straightforward
//! flow: a block that does not fit on the current page opens the next one,
//! and a section heading always travels with its first block.

use chrono::{DateTime, Utc};
use serde::Serialize;

use pdc_common::model::{ConditionItem, ConditionStatus, Inspection};

/// A4 portrait, in points
pub const PAGE_WIDTH_PT: f32 = 595.0;
pub const PAGE_HEIGHT_PT: f32 = 842.0;

const MARGIN_PT: f32 = 40.0;
const CONTENT_HEIGHT_PT: f32 = PAGE_HEIGHT_PT - 2.0 * MARGIN_PT;

const TITLE_HEIGHT_PT: f32 = 90.0;
const HEADING_HEIGHT_PT: f32 = 36.0;
const ROW_HEIGHT_PT: f32 = 20.0;
const DESCRIPTION_HEIGHT_PT: f32 = 16.0;
const PHOTO_REF_HEIGHT_PT: f32 = 24.0;

/// One laid-out content block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Block {
    /// Report title and generation date, first page only
    TitleHeader { title: String, generated_on: String },
    SectionHeading(String),
    /// Labeled value in the vehicle details section
    DetailRow { label: String, value: String },
    /// One checked aspect: status badge plus the issue description when the
    /// status is Issue
    ConditionRow {
        label: String,
        status: ConditionStatus,
        description: Option<String>,
    },
    /// Reference to one hosted photo
    PhotoRef { label: String, url: String },
}

impl Block {
    fn height(&self) -> f32 {
        match self {
            Block::TitleHeader { .. } => TITLE_HEIGHT_PT,
            Block::SectionHeading(_) => HEADING_HEIGHT_PT,
            Block::DetailRow { .. } => ROW_HEIGHT_PT,
            Block::ConditionRow { description, .. } => {
                ROW_HEIGHT_PT
                    + description
                        .as_ref()
                        .map_or(0.0, |_| DESCRIPTION_HEIGHT_PT)
            }
            Block::PhotoRef { .. } => PHOTO_REF_HEIGHT_PT,
        }
    }
}

/// One fixed-size page of the report
#[derive(Debug, Clone, Default, Serialize)]
pub struct Page {
    pub blocks: Vec<Block>,
}

/// The rendered report document
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: String,
    pub generated_on: DateTime<Utc>,
    pub pages: Vec<Page>,
}

/// Render an inspection record into a paginated report.
///
/// Handles any subset of photos without error; with no photos at all the
/// photo section is omitted entirely.
pub fn render(inspection: &Inspection, generated_on: DateTime<Utc>) -> Report {
    let mut blocks = Vec::new();

    blocks.push(Block::TitleHeader {
        title: "PDC Pro Vehicle Inspection Report".to_string(),
        generated_on: generated_on.format("%B %-d, %Y").to_string(),
    });

    push_vehicle_details(&mut blocks, inspection);
    push_condition_section(
        &mut blocks,
        "Exterior Condition",
        exterior_rows(inspection),
    );
    push_condition_section(&mut blocks, "Engine Conditions", engine_rows(inspection));
    push_condition_section(
        &mut blocks,
        "Additional Checks",
        additional_rows(inspection),
    );
    push_photos(&mut blocks, inspection);

    Report {
        title: "PDC Pro Vehicle Inspection Report".to_string(),
        generated_on,
        pages: paginate(blocks),
    }
}

/// Report file name:
/// `PDC_Report_{client}_{make}_{model}_{date}.html`, whitespace collapsed
/// to underscores
pub fn suggested_filename(inspection: &Inspection, date: DateTime<Utc>) -> String {
    let details = &inspection.vehicle_details;
    let client = if details.client_name.is_empty() {
        "Client"
    } else {
        &details.client_name
    };
    let make = if details.vehicle_make.is_empty() {
        "Vehicle"
    } else {
        &details.vehicle_make
    };

    let name = format!(
        "PDC_Report_{}_{}_{}_{}.html",
        client,
        make,
        details.vehicle_model,
        date.format("%Y-%m-%d")
    );
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

// ============================================================================
// Section builders
// ============================================================================

fn push_vehicle_details(blocks: &mut Vec<Block>, inspection: &Inspection) {
    let details = &inspection.vehicle_details;

    let client_name = if details.client_name.is_empty() {
        "Not specified".to_string()
    } else {
        details.client_name.clone()
    };
    let vehicle = format!("{} {}", details.vehicle_make, details.vehicle_model)
        .trim()
        .to_string();
    let mileage = if details.mileage.is_empty() {
        String::new()
    } else {
        format!("{} km", details.mileage)
    };

    blocks.push(Block::SectionHeading("Vehicle Details".to_string()));
    for (label, value) in [
        ("Client Name", client_name),
        ("Vehicle", vehicle),
        ("Year", details.year_of_manufacture.clone()),
        ("Color", details.exterior_color.clone()),
        ("Mileage", mileage),
        ("VIN", details.vehicle_identification_number.clone()),
        ("License Plate", details.car_number_plate.clone()),
    ] {
        blocks.push(Block::DetailRow {
            label: label.to_string(),
            value,
        });
    }
}

fn condition_row(label: &str, item: &ConditionItem) -> Block {
    let description = if item.status == ConditionStatus::Issue && !item.description.is_empty() {
        Some(item.description.clone())
    } else {
        None
    };
    Block::ConditionRow {
        label: label.to_string(),
        status: item.status,
        description,
    }
}

fn exterior_rows(inspection: &Inspection) -> Vec<Block> {
    let group = &inspection.exterior_condition;
    vec![
        condition_row("Paint Condition", &group.paint_condition),
        condition_row("Bodywork Condition", &group.bodywork_condition),
        condition_row("Tire Condition", &group.tire_condition),
        condition_row("Lights Functionality", &group.lights_functionality),
        condition_row("Front Bumper", &group.front_bumper),
        condition_row("Rear Bumper", &group.rear_bumper),
        condition_row("Trunk/Hatch", &group.trunk_hatch),
    ]
}

fn engine_rows(inspection: &Inspection) -> Vec<Block> {
    let group = &inspection.engine_conditions;
    vec![
        condition_row("Engine Health", &group.engine_health),
        condition_row("Oil Condition", &group.oil_condition),
        condition_row("Coolant Level", &group.coolant_level),
        condition_row("Battery Condition", &group.battery_condition),
        condition_row("Belts and Hoses", &group.belts_and_hoses),
    ]
}

fn additional_rows(inspection: &Inspection) -> Vec<Block> {
    let group = &inspection.additional_checks;
    vec![
        condition_row("Brake System", &group.brake_system),
        condition_row("Suspension", &group.suspension),
        condition_row("Steering", &group.steering),
        condition_row("Transmission", &group.transmission),
        condition_row("Air Conditioning", &group.air_conditioning),
    ]
}

fn push_condition_section(blocks: &mut Vec<Block>, title: &str, rows: Vec<Block>) {
    blocks.push(Block::SectionHeading(title.to_string()));
    blocks.extend(rows);
}

fn push_photos(blocks: &mut Vec<Block>, inspection: &Inspection) {
    let images = &inspection.images;
    if images.is_empty() {
        return;
    }

    blocks.push(Block::SectionHeading("Vehicle Photos".to_string()));
    for (label, url) in [
        ("Front Photo", &images.front_photo),
        ("RHS Side Photo", &images.rhs_side_photo),
        ("LHS Side Photo", &images.lhs_side_photo),
        ("Roof Side Photo", &images.roof_side_photo),
    ] {
        if !url.is_empty() {
            blocks.push(Block::PhotoRef {
                label: label.to_string(),
                url: url.clone(),
            });
        }
    }
    for (index, url) in images.additional_photos.iter().enumerate() {
        blocks.push(Block::PhotoRef {
            label: format!("Additional Photo {}", index + 1),
            url: url.clone(),
        });
    }
}

// ============================================================================
// Pagination
// ============================================================================

fn paginate(blocks: Vec<Block>) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut current = Page::default();
    let mut used = 0.0_f32;

    let mut iter = blocks.into_iter().peekable();
    while let Some(block) = iter.next() {
        // A heading travels with its first block
        let needed = match (&block, iter.peek()) {
            (Block::SectionHeading(_), Some(next)) => block.height() + next.height(),
            _ => block.height(),
        };

        if used > 0.0 && used + needed > CONTENT_HEIGHT_PT {
            pages.push(std::mem::take(&mut current));
            used = 0.0;
        }

        used += block.height();
        current.blocks.push(block);
    }
    pages.push(current);

    pages
}
