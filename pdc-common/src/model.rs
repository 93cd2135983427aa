//! Inspection data model
//!
//! One inspection record per vehicle, owned by exactly one user. The wire
//! format is camelCase JSON, matching the historical client API. All free-form
//! identification fields are optional strings; no cross-field validation is
//! performed anywhere in the model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of a single vehicle check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConditionStatus {
    #[default]
    #[serde(rename = "OK")]
    Ok,
    Issue,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl std::fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ConditionStatus::Ok => "OK",
            ConditionStatus::Issue => "Issue",
            ConditionStatus::NotApplicable => "N/A",
        };
        write!(f, "{}", label)
    }
}

/// One checked aspect of the vehicle: status plus an issue description.
///
/// The description is only meaningful when `status` is `Issue`; the model does
/// not require it to be empty otherwise.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionItem {
    pub status: ConditionStatus,
    pub description: String,
}

impl ConditionItem {
    pub fn issue(description: impl Into<String>) -> Self {
        Self {
            status: ConditionStatus::Issue,
            description: description.into(),
        }
    }
}

/// Free-form vehicle identification data
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleDetails {
    pub client_name: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub year_of_manufacture: String,
    pub exterior_color: String,
    pub mileage: String,
    pub vehicle_identification_number: String,
    pub car_number_plate: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExteriorCondition {
    pub paint_condition: ConditionItem,
    pub bodywork_condition: ConditionItem,
    pub tire_condition: ConditionItem,
    pub lights_functionality: ConditionItem,
    pub front_bumper: ConditionItem,
    pub rear_bumper: ConditionItem,
    pub trunk_hatch: ConditionItem,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConditions {
    pub engine_health: ConditionItem,
    pub oil_condition: ConditionItem,
    pub coolant_level: ConditionItem,
    pub battery_condition: ConditionItem,
    pub belts_and_hoses: ConditionItem,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdditionalChecks {
    pub brake_system: ConditionItem,
    pub suspension: ConditionItem,
    pub steering: ConditionItem,
    pub transmission: ConditionItem,
    pub air_conditioning: ConditionItem,
}

/// Photo URL slots. The four named slots hold an empty string until their
/// photo is uploaded; the record stores only references to externally hosted
/// images.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Images {
    pub front_photo: String,
    pub rhs_side_photo: String,
    pub lhs_side_photo: String,
    pub roof_side_photo: String,
    pub additional_photos: Vec<String>,
}

impl Images {
    /// True when no photo slot (named or additional) holds a URL
    pub fn is_empty(&self) -> bool {
        self.front_photo.is_empty()
            && self.rhs_side_photo.is_empty()
            && self.lhs_side_photo.is_empty()
            && self.roof_side_photo.is_empty()
            && self.additional_photos.is_empty()
    }
}

/// Lifecycle status of an inspection record.
///
/// Draft -> Completed in intended use, but the transition is not mechanically
/// enforced: any update may set either value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InspectionStatus {
    #[default]
    Draft,
    Completed,
}

impl std::fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InspectionStatus::Draft => write!(f, "Draft"),
            InspectionStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// One vehicle pre-delivery inspection record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub id: Uuid,
    #[serde(default)]
    pub vehicle_details: VehicleDetails,
    #[serde(default)]
    pub exterior_condition: ExteriorCondition,
    #[serde(default)]
    pub engine_conditions: EngineConditions,
    #[serde(default)]
    pub additional_checks: AdditionalChecks,
    #[serde(default)]
    pub images: Images,
    #[serde(default)]
    pub status: InspectionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Inspection {
    /// Fresh empty Draft with a newly assigned id and both timestamps at `now`
    pub fn new_draft(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_details: VehicleDetails::default(),
            exterior_condition: ExteriorCondition::default(),
            engine_conditions: EngineConditions::default(),
            additional_checks: AdditionalChecks::default(),
            images: Images::default(),
            status: InspectionStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    /// Shallow top-level merge: every group the patch supplies replaces the
    /// stored group wholesale. Id and timestamps are untouched; the store
    /// stamps `updated_at` separately.
    pub fn merged(&self, patch: &InspectionPatch) -> Self {
        let mut next = self.clone();
        if let Some(v) = &patch.vehicle_details {
            next.vehicle_details = v.clone();
        }
        if let Some(v) = &patch.exterior_condition {
            next.exterior_condition = v.clone();
        }
        if let Some(v) = &patch.engine_conditions {
            next.engine_conditions = v.clone();
        }
        if let Some(v) = &patch.additional_checks {
            next.additional_checks = v.clone();
        }
        if let Some(v) = &patch.images {
            next.images = v.clone();
        }
        if let Some(v) = patch.status {
            next.status = v;
        }
        next
    }
}

/// Partial inspection as accepted by create/update: any subset of top-level
/// groups. There is no deep merge of individual condition items; a caller
/// changing one sub-field submits the full nested group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_details: Option<VehicleDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exterior_condition: Option<ExteriorCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_conditions: Option<EngineConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_checks: Option<AdditionalChecks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Images>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InspectionStatus>,
}

impl From<&Inspection> for InspectionPatch {
    /// Full-record patch, as issued by autosave and by the explicit complete
    /// action
    fn from(record: &Inspection) -> Self {
        Self {
            vehicle_details: Some(record.vehicle_details.clone()),
            exterior_condition: Some(record.exterior_condition.clone()),
            engine_conditions: Some(record.engine_conditions.clone()),
            additional_checks: Some(record.additional_checks.clone()),
            images: Some(record.images.clone()),
            status: Some(record.status),
        }
    }
}

/// A registered user. The password hash never leaves the server; it is
/// excluded from serialization entirely.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&ConditionStatus::Ok).unwrap(),
            r#""OK""#
        );
        assert_eq!(
            serde_json::to_string(&ConditionStatus::NotApplicable).unwrap(),
            r#""N/A""#
        );
        assert_eq!(
            serde_json::to_string(&ConditionStatus::Issue).unwrap(),
            r#""Issue""#
        );
    }

    #[test]
    fn inspection_serializes_camel_case() {
        let record = Inspection::new_draft(Utc::now());
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("vehicleDetails").is_some());
        assert!(json["exteriorCondition"].get("paintCondition").is_some());
        assert!(json["images"].get("additionalPhotos").is_some());
        assert_eq!(json["status"], "Draft");
    }

    #[test]
    fn merged_replaces_supplied_groups_wholesale() {
        let mut base = Inspection::new_draft(Utc::now());
        base.exterior_condition.paint_condition = ConditionItem::issue("scratch on door");
        base.vehicle_details.client_name = "J. Doe".to_string();

        let patch = InspectionPatch {
            exterior_condition: Some(ExteriorCondition {
                tire_condition: ConditionItem::issue("worn rear left"),
                ..ExteriorCondition::default()
            }),
            ..InspectionPatch::default()
        };
        let next = base.merged(&patch);

        // The supplied group is replaced as a whole, not deep-merged
        assert_eq!(
            next.exterior_condition.paint_condition.status,
            ConditionStatus::Ok
        );
        assert_eq!(
            next.exterior_condition.tire_condition.description,
            "worn rear left"
        );
        // Untouched siblings survive
        assert_eq!(next.vehicle_details.client_name, "J. Doe");
        assert_eq!(next.status, InspectionStatus::Draft);
    }

    #[test]
    fn merged_is_idempotent_for_a_fixed_patch() {
        let base = Inspection::new_draft(Utc::now());
        let patch = InspectionPatch {
            vehicle_details: Some(VehicleDetails {
                client_name: "A. Smith".to_string(),
                ..VehicleDetails::default()
            }),
            status: Some(InspectionStatus::Completed),
            ..InspectionPatch::default()
        };
        let once = base.merged(&patch);
        let twice = once.merged(&patch);
        assert_eq!(once, twice);
    }

    #[test]
    fn patch_deserializes_from_partial_json() {
        let patch: InspectionPatch =
            serde_json::from_str(r#"{"status":"Completed"}"#).unwrap();
        assert_eq!(patch.status, Some(InspectionStatus::Completed));
        assert!(patch.vehicle_details.is_none());
        assert!(patch.images.is_none());
    }

    #[test]
    fn user_never_serializes_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("passwordHash"));
    }
}
