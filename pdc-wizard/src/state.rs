//! Pure wizard state updates
//!
//! Each capture step edits one group of the inspection. The patches here are
//! field-granular (unlike the store's group-wholesale merge): applying one
//! returns a new record with only the supplied fields changed and every
//! untouched sibling intact. No hidden shared mutation: callers own the
//! state value and thread it through these functions.

use pdc_common::model::{ConditionItem, Inspection};

/// Field-level patch for the vehicle details step
#[derive(Debug, Clone, Default)]
pub struct VehicleDetailsPatch {
    pub client_name: Option<String>,
    pub vehicle_make: Option<String>,
    pub vehicle_model: Option<String>,
    pub year_of_manufacture: Option<String>,
    pub exterior_color: Option<String>,
    pub mileage: Option<String>,
    pub vehicle_identification_number: Option<String>,
    pub car_number_plate: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ExteriorConditionPatch {
    pub paint_condition: Option<ConditionItem>,
    pub bodywork_condition: Option<ConditionItem>,
    pub tire_condition: Option<ConditionItem>,
    pub lights_functionality: Option<ConditionItem>,
    pub front_bumper: Option<ConditionItem>,
    pub rear_bumper: Option<ConditionItem>,
    pub trunk_hatch: Option<ConditionItem>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineConditionsPatch {
    pub engine_health: Option<ConditionItem>,
    pub oil_condition: Option<ConditionItem>,
    pub coolant_level: Option<ConditionItem>,
    pub battery_condition: Option<ConditionItem>,
    pub belts_and_hoses: Option<ConditionItem>,
}

#[derive(Debug, Clone, Default)]
pub struct AdditionalChecksPatch {
    pub brake_system: Option<ConditionItem>,
    pub suspension: Option<ConditionItem>,
    pub steering: Option<ConditionItem>,
    pub transmission: Option<ConditionItem>,
    pub air_conditioning: Option<ConditionItem>,
}

#[derive(Debug, Clone, Default)]
pub struct ImagesPatch {
    pub front_photo: Option<String>,
    pub rhs_side_photo: Option<String>,
    pub lhs_side_photo: Option<String>,
    pub roof_side_photo: Option<String>,
    pub additional_photos: Option<Vec<String>>,
}

fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

pub fn update_vehicle_details(record: &Inspection, patch: &VehicleDetailsPatch) -> Inspection {
    let mut next = record.clone();
    let details = &mut next.vehicle_details;
    set(&mut details.client_name, &patch.client_name);
    set(&mut details.vehicle_make, &patch.vehicle_make);
    set(&mut details.vehicle_model, &patch.vehicle_model);
    set(&mut details.year_of_manufacture, &patch.year_of_manufacture);
    set(&mut details.exterior_color, &patch.exterior_color);
    set(&mut details.mileage, &patch.mileage);
    set(
        &mut details.vehicle_identification_number,
        &patch.vehicle_identification_number,
    );
    set(&mut details.car_number_plate, &patch.car_number_plate);
    next
}

pub fn update_exterior_condition(
    record: &Inspection,
    patch: &ExteriorConditionPatch,
) -> Inspection {
    let mut next = record.clone();
    let group = &mut next.exterior_condition;
    set(&mut group.paint_condition, &patch.paint_condition);
    set(&mut group.bodywork_condition, &patch.bodywork_condition);
    set(&mut group.tire_condition, &patch.tire_condition);
    set(&mut group.lights_functionality, &patch.lights_functionality);
    set(&mut group.front_bumper, &patch.front_bumper);
    set(&mut group.rear_bumper, &patch.rear_bumper);
    set(&mut group.trunk_hatch, &patch.trunk_hatch);
    next
}

pub fn update_engine_conditions(
    record: &Inspection,
    patch: &EngineConditionsPatch,
) -> Inspection {
    let mut next = record.clone();
    let group = &mut next.engine_conditions;
    set(&mut group.engine_health, &patch.engine_health);
    set(&mut group.oil_condition, &patch.oil_condition);
    set(&mut group.coolant_level, &patch.coolant_level);
    set(&mut group.battery_condition, &patch.battery_condition);
    set(&mut group.belts_and_hoses, &patch.belts_and_hoses);
    next
}

pub fn update_additional_checks(
    record: &Inspection,
    patch: &AdditionalChecksPatch,
) -> Inspection {
    let mut next = record.clone();
    let group = &mut next.additional_checks;
    set(&mut group.brake_system, &patch.brake_system);
    set(&mut group.suspension, &patch.suspension);
    set(&mut group.steering, &patch.steering);
    set(&mut group.transmission, &patch.transmission);
    set(&mut group.air_conditioning, &patch.air_conditioning);
    next
}

pub fn update_images(record: &Inspection, patch: &ImagesPatch) -> Inspection {
    let mut next = record.clone();
    let images = &mut next.images;
    set(&mut images.front_photo, &patch.front_photo);
    set(&mut images.rhs_side_photo, &patch.rhs_side_photo);
    set(&mut images.lhs_side_photo, &patch.lhs_side_photo);
    set(&mut images.roof_side_photo, &patch.roof_side_photo);
    set(&mut images.additional_photos, &patch.additional_photos);
    next
}
