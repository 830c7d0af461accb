//! Room attributes and their validation
//!
//! `RoomInput` is the loosely typed record a form or JSON body produces.
//! `RoomAttributes` is the validated shape the calculator prices; the only
//! way to get one from untrusted data is `RoomAttributes::try_from`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{EstimateError, EstimateResult};

/// Room category used for the base price lookup
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Bedroom,
    MasterBedroom,
    Bathroom,
    HalfBath,
    Kitchen,
    FamilyRoom,
    Office,
    LaundryRoom,
    Basement,
    LivingRoom,
    DiningRoom,
    Entryway,
    Hallway,
}

impl RoomType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bedroom => "bedroom",
            Self::MasterBedroom => "master_bedroom",
            Self::Bathroom => "bathroom",
            Self::HalfBath => "half_bath",
            Self::Kitchen => "kitchen",
            Self::FamilyRoom => "family_room",
            Self::Office => "office",
            Self::LaundryRoom => "laundry_room",
            Self::Basement => "basement",
            Self::LivingRoom => "living_room",
            Self::DiningRoom => "dining_room",
            Self::Entryway => "entryway",
            Self::Hallway => "hallway",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "bedroom" => Some(Self::Bedroom),
            "master_bedroom" => Some(Self::MasterBedroom),
            "bathroom" => Some(Self::Bathroom),
            "half_bath" => Some(Self::HalfBath),
            "kitchen" => Some(Self::Kitchen),
            "family_room" => Some(Self::FamilyRoom),
            "office" => Some(Self::Office),
            "laundry_room" => Some(Self::LaundryRoom),
            "basement" => Some(Self::Basement),
            "living_room" => Some(Self::LivingRoom),
            "dining_room" => Some(Self::DiningRoom),
            "entryway" => Some(Self::Entryway),
            "hallway" => Some(Self::Hallway),
            _ => None,
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Size class for rooms priced by size
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RoomSize {
    Small,
    Average,
    Large,
}

impl RoomSize {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Average => "average",
            Self::Large => "large",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "small" => Some(Self::Small),
            "average" => Some(Self::Average),
            "large" => Some(Self::Large),
            _ => None,
        }
    }
}

impl fmt::Display for RoomSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceCondition {
    Good,
    Average,
    Poor,
}

impl SurfaceCondition {
    pub fn parse(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "good" => Some(Self::Good),
            "average" => Some(Self::Average),
            "poor" => Some(Self::Poor),
            _ => None,
        }
    }
}

/// Paint tier; each tier has an upcharge entry in the catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum PaintQuality {
    Standard,
    Premium,
    Luxury,
}

impl PaintQuality {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Premium => "premium",
            Self::Luxury => "luxury",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "standard" => Some(Self::Standard),
            "premium" => Some(Self::Premium),
            "luxury" => Some(Self::Luxury),
            _ => None,
        }
    }
}

impl fmt::Display for PaintQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How doors, windows, baseboards or a fireplace get painted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationMethod {
    #[default]
    None,
    Brush,
    Spray,
}

impl ApplicationMethod {
    pub fn parse(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "none" => Some(Self::None),
            "brush" => Some(Self::Brush),
            "spray" => Some(Self::Spray),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum RepairScope {
    #[default]
    None,
    Minimal,
    Extensive,
}

impl RepairScope {
    pub fn parse(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "none" => Some(Self::None),
            "minimal" => Some(Self::Minimal),
            "extensive" => Some(Self::Extensive),
            _ => None,
        }
    }
}

/// Accepts `living-room`, `Living Room` and `living_room` alike.
fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace(['-', ' '], "_")
}

/// Raw room record as submitted by a form or API client.
///
/// Missing fields take neutral values; `needs_floor_covering` defaults to
/// `true` so an omitted field never grants the no-floor-covering discount.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomInput {
    pub room_type: String,
    pub size: String,
    pub wall_count: i64,
    pub wall_height_ft: Decimal,
    pub wall_width_ft: Decimal,
    pub surface_condition: String,
    pub paint_quality: String,

    pub include_ceiling: bool,
    pub include_baseboards: bool,
    pub include_crown_molding: bool,
    pub has_high_ceiling: bool,
    pub include_closet: bool,
    pub is_empty_house: bool,
    pub needs_floor_covering: bool,
    pub has_stair_railing: bool,
    pub two_colors: bool,
    pub millwork_priming_needed: bool,

    pub door_count: i64,
    pub window_count: i64,
    pub walk_in_closet_count: i64,
    pub regular_closet_count: i64,
    pub baseboard_install_feet: i64,

    pub door_method: String,
    pub window_method: String,
    pub baseboard_method: String,
    pub fireplace_method: String,
    pub repair_scope: String,
}

impl Default for RoomInput {
    fn default() -> Self {
        Self {
            room_type: String::new(),
            size: String::new(),
            wall_count: 0,
            wall_height_ft: Decimal::ZERO,
            wall_width_ft: Decimal::ZERO,
            surface_condition: "good".to_string(),
            paint_quality: "standard".to_string(),
            include_ceiling: false,
            include_baseboards: false,
            include_crown_molding: false,
            has_high_ceiling: false,
            include_closet: false,
            is_empty_house: false,
            needs_floor_covering: true,
            has_stair_railing: false,
            two_colors: false,
            millwork_priming_needed: false,
            door_count: 0,
            window_count: 0,
            walk_in_closet_count: 0,
            regular_closet_count: 0,
            baseboard_install_feet: 0,
            door_method: "none".to_string(),
            window_method: "none".to_string(),
            baseboard_method: "none".to_string(),
            fireplace_method: "none".to_string(),
            repair_scope: "none".to_string(),
        }
    }
}

/// Validated room description priced by the calculator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomAttributes {
    pub room_type: RoomType,
    pub size: RoomSize,
    pub wall_count: u32,
    pub wall_height_ft: Decimal,
    pub wall_width_ft: Decimal,
    pub surface_condition: SurfaceCondition,
    pub paint_quality: PaintQuality,

    pub include_ceiling: bool,
    pub include_baseboards: bool,
    pub include_crown_molding: bool,
    pub has_high_ceiling: bool,
    pub include_closet: bool,
    pub is_empty_house: bool,
    pub needs_floor_covering: bool,
    pub has_stair_railing: bool,
    pub two_colors: bool,
    pub millwork_priming_needed: bool,

    pub door_count: u32,
    pub window_count: u32,
    pub walk_in_closet_count: u32,
    pub regular_closet_count: u32,
    pub baseboard_install_feet: u32,

    pub door_method: ApplicationMethod,
    pub window_method: ApplicationMethod,
    pub baseboard_method: ApplicationMethod,
    pub fireplace_method: ApplicationMethod,
    pub repair_scope: RepairScope,
}

impl RoomAttributes {
    /// A room with standard paint, no add-ons, no discounts and no dimensions.
    pub fn new(room_type: RoomType, size: RoomSize) -> Self {
        Self {
            room_type,
            size,
            wall_count: 0,
            wall_height_ft: Decimal::ZERO,
            wall_width_ft: Decimal::ZERO,
            surface_condition: SurfaceCondition::Good,
            paint_quality: PaintQuality::Standard,
            include_ceiling: false,
            include_baseboards: false,
            include_crown_molding: false,
            has_high_ceiling: false,
            include_closet: false,
            is_empty_house: false,
            needs_floor_covering: true,
            has_stair_railing: false,
            two_colors: false,
            millwork_priming_needed: false,
            door_count: 0,
            window_count: 0,
            walk_in_closet_count: 0,
            regular_closet_count: 0,
            baseboard_install_feet: 0,
            door_method: ApplicationMethod::None,
            window_method: ApplicationMethod::None,
            baseboard_method: ApplicationMethod::None,
            fireplace_method: ApplicationMethod::None,
            repair_scope: RepairScope::None,
        }
    }

    /// Dimensions can be set directly on a deserialized value, so the
    /// calculator re-checks them before pricing.
    pub fn validate_dimensions(&self) -> EstimateResult<()> {
        non_negative("wall_height_ft", self.wall_height_ft)?;
        non_negative("wall_width_ft", self.wall_width_ft)?;
        Ok(())
    }

    /// Wall area plus, when painted, a square ceiling as wide as one wall.
    /// Dimensions too large to multiply out are rejected, not wrapped.
    pub fn paintable_area_sqft(&self) -> EstimateResult<Decimal> {
        let too_large = |field: &str, value: Decimal| EstimateError::invalid(field, value);

        let walls = Decimal::from(self.wall_count)
            .checked_mul(self.wall_height_ft)
            .ok_or_else(|| too_large("wall_height_ft", self.wall_height_ft))?
            .checked_mul(self.wall_width_ft)
            .ok_or_else(|| too_large("wall_width_ft", self.wall_width_ft))?;
        if !self.include_ceiling {
            return Ok(walls);
        }

        self.wall_width_ft
            .checked_mul(self.wall_width_ft)
            .and_then(|ceiling| walls.checked_add(ceiling))
            .ok_or_else(|| too_large("wall_width_ft", self.wall_width_ft))
    }
}

impl TryFrom<RoomInput> for RoomAttributes {
    type Error = EstimateError;

    fn try_from(input: RoomInput) -> Result<Self, Self::Error> {
        let attrs = Self {
            room_type: parse_field("room_type", &input.room_type, RoomType::parse)?,
            size: parse_field("size", &input.size, RoomSize::parse)?,
            wall_count: count("wall_count", input.wall_count)?,
            wall_height_ft: non_negative("wall_height_ft", input.wall_height_ft)?,
            wall_width_ft: non_negative("wall_width_ft", input.wall_width_ft)?,
            surface_condition: parse_field(
                "surface_condition",
                &input.surface_condition,
                SurfaceCondition::parse,
            )?,
            paint_quality: parse_field("paint_quality", &input.paint_quality, PaintQuality::parse)?,
            include_ceiling: input.include_ceiling,
            include_baseboards: input.include_baseboards,
            include_crown_molding: input.include_crown_molding,
            has_high_ceiling: input.has_high_ceiling,
            include_closet: input.include_closet,
            is_empty_house: input.is_empty_house,
            needs_floor_covering: input.needs_floor_covering,
            has_stair_railing: input.has_stair_railing,
            two_colors: input.two_colors,
            millwork_priming_needed: input.millwork_priming_needed,
            door_count: count("door_count", input.door_count)?,
            window_count: count("window_count", input.window_count)?,
            walk_in_closet_count: count("walk_in_closet_count", input.walk_in_closet_count)?,
            regular_closet_count: count("regular_closet_count", input.regular_closet_count)?,
            baseboard_install_feet: count("baseboard_install_feet", input.baseboard_install_feet)?,
            door_method: parse_field("door_method", &input.door_method, ApplicationMethod::parse)?,
            window_method: parse_field(
                "window_method",
                &input.window_method,
                ApplicationMethod::parse,
            )?,
            baseboard_method: parse_field(
                "baseboard_method",
                &input.baseboard_method,
                ApplicationMethod::parse,
            )?,
            fireplace_method: parse_field(
                "fireplace_method",
                &input.fireplace_method,
                ApplicationMethod::parse,
            )?,
            repair_scope: parse_field("repair_scope", &input.repair_scope, RepairScope::parse)?,
        };
        Ok(attrs)
    }
}

fn parse_field<T>(field: &str, raw: &str, parse: fn(&str) -> Option<T>) -> EstimateResult<T> {
    parse(raw).ok_or_else(|| EstimateError::invalid(field, format!("{raw:?}")))
}

fn count(field: &str, value: i64) -> EstimateResult<u32> {
    u32::try_from(value).map_err(|_| EstimateError::invalid(field, value))
}

fn non_negative(field: &str, value: Decimal) -> EstimateResult<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EstimateError::invalid(field, value));
    }
    Ok(value)
}
