//! Pricing catalog
//!
//! Read-only reference tables loaded once at startup and handed to every
//! calculation by reference. `PricingCatalog::default()` is the shop's
//! standard price list; a JSON file can replace any top-level section.

use anyhow::{ensure, Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::domain::rooms::{ApplicationMethod, PaintQuality, RoomSize, RoomType};
use crate::error::{EstimateError, EstimateResult};

/// Volume discounts never exceed this rate, whatever the tier table says.
pub const MAX_VOLUME_DISCOUNT_RATE: Decimal = Decimal::from_parts(375, 0, 0, false, 3);

/// Base price of a room type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BasePrice {
    /// Priced by size class
    Sized {
        small: Decimal,
        average: Decimal,
        large: Decimal,
    },
    /// Quoted as a range; calculations always use `representative`
    Range {
        min: Decimal,
        max: Decimal,
        representative: Decimal,
    },
}

impl BasePrice {
    pub fn price_for(&self, size: RoomSize) -> Decimal {
        match self {
            Self::Sized {
                small,
                average,
                large,
            } => match size {
                RoomSize::Small => *small,
                RoomSize::Average => *average,
                RoomSize::Large => *large,
            },
            Self::Range { representative, .. } => *representative,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaintUpcharge {
    /// Fraction of the base price, e.g. 0.15
    pub percent: Decimal,
    pub fixed: Decimal,
}

/// Multipliers applied to the base price
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurchargeRates {
    pub ceiling: Decimal,
    pub crown_molding: Decimal,
    pub baseboard_brush: Decimal,
    pub baseboard_spray: Decimal,
    pub two_colors: Decimal,
}

/// Flat and per-unit add-on prices
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddOnPrices {
    pub high_ceiling: Decimal,
    pub regular_closet: Decimal,
    pub walk_in_closet: Decimal,
    pub stair_railing: Decimal,
    pub millwork_priming: Decimal,
}

/// A price that depends on the application method; `none` is always free.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MethodPrices {
    pub brush: Decimal,
    pub spray: Decimal,
}

impl MethodPrices {
    pub fn for_method(&self, method: ApplicationMethod) -> Decimal {
        match method {
            ApplicationMethod::None => Decimal::ZERO,
            ApplicationMethod::Brush => self.brush,
            ApplicationMethod::Spray => self.spray,
        }
    }
}

/// Per-door labor rates for rooms with at least `min_doors` doors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoorLaborTier {
    pub min_doors: u32,
    pub brush: Decimal,
    pub spray: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoorPricing {
    /// Charged once per room that has painted doors
    pub paint_cost: Decimal,
    /// Ascending by `min_doors`
    pub labor_tiers: Vec<DoorLaborTier>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowPricing {
    /// Charged once per room that has painted windows
    pub paint_cost: Decimal,
    pub per_window: Decimal,
    pub per_sill: Decimal,
    /// Applied to both per-unit rates when spraying
    pub spray_multiplier: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepairPrices {
    pub minimal: Decimal,
    pub extensive: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscountRates {
    pub empty_house: Decimal,
    pub no_floor_covering: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VolumeDiscountTier {
    /// Inclusive lower bound on the project subtotal
    pub threshold: Decimal,
    pub rate: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaintCoverage {
    pub sqft_per_can: Decimal,
    pub coats: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PricingCatalog {
    pub minimum_service_charge: Decimal,
    pub room_base_prices: BTreeMap<RoomType, BasePrice>,
    pub paint_upcharges: BTreeMap<PaintQuality, PaintUpcharge>,
    pub surcharge_rates: SurchargeRates,
    pub add_ons: AddOnPrices,
    pub doors: DoorPricing,
    pub windows: WindowPricing,
    pub fireplace: MethodPrices,
    pub repairs: RepairPrices,
    pub baseboard_installation_per_foot: MethodPrices,
    pub discounts: DiscountRates,
    /// Ascending by `threshold`
    pub volume_discount_tiers: Vec<VolumeDiscountTier>,
    pub paint_coverage: PaintCoverage,
}

impl PricingCatalog {
    /// Load a catalog file, or the built-in price list when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed reading pricing catalog: {}", path.display()))?;
        Self::from_json_str(&data)
            .with_context(|| format!("invalid pricing catalog: {}", path.display()))
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(data).context("failed parsing catalog JSON")?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Structural checks the calculator relies on.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.minimum_service_charge.is_sign_negative(),
            "minimum_service_charge must not be negative"
        );

        ensure!(
            !self.doors.labor_tiers.is_empty(),
            "doors.labor_tiers must not be empty"
        );
        ensure!(
            self.doors.labor_tiers[0].min_doors <= 1,
            "the first door labor tier must start at one door"
        );
        for pair in self.doors.labor_tiers.windows(2) {
            ensure!(
                pair[0].min_doors < pair[1].min_doors,
                "door labor tiers must be strictly ascending ({} then {})",
                pair[0].min_doors,
                pair[1].min_doors
            );
        }

        for pair in self.volume_discount_tiers.windows(2) {
            ensure!(
                pair[0].threshold < pair[1].threshold,
                "volume discount thresholds must be strictly ascending ({} then {})",
                pair[0].threshold,
                pair[1].threshold
            );
        }
        for tier in &self.volume_discount_tiers {
            ensure!(
                tier.rate >= Decimal::ZERO && tier.rate <= MAX_VOLUME_DISCOUNT_RATE,
                "volume discount rate {} at {} is outside [0, {}]",
                tier.rate,
                tier.threshold,
                MAX_VOLUME_DISCOUNT_RATE
            );
        }

        ensure!(
            self.paint_coverage.sqft_per_can > Decimal::ZERO,
            "paint_coverage.sqft_per_can must be positive"
        );
        ensure!(
            self.paint_coverage.coats > 0,
            "paint_coverage.coats must be positive"
        );
        Ok(())
    }

    pub fn base_price(&self, room_type: RoomType, size: RoomSize) -> EstimateResult<Decimal> {
        self.room_base_prices
            .get(&room_type)
            .map(|entry| entry.price_for(size))
            .ok_or_else(|| EstimateError::catalog_miss(format!("room type `{room_type}`")))
    }

    pub fn paint_upcharge(&self, quality: PaintQuality) -> EstimateResult<&PaintUpcharge> {
        self.paint_upcharges
            .get(&quality)
            .ok_or_else(|| EstimateError::catalog_miss(format!("paint quality `{quality}`")))
    }

    /// Per-door labor rate from the highest tier the door count reaches.
    pub fn door_labor_rate(&self, door_count: u32, method: ApplicationMethod) -> Decimal {
        let tier = self
            .doors
            .labor_tiers
            .iter()
            .rev()
            .find(|tier| tier.min_doors <= door_count)
            .or_else(|| self.doors.labor_tiers.first());

        match (tier, method) {
            (Some(tier), ApplicationMethod::Brush) => tier.brush,
            (Some(tier), ApplicationMethod::Spray) => tier.spray,
            _ => Decimal::ZERO,
        }
    }
}

fn dollars(amount: i64) -> Decimal {
    Decimal::new(amount, 0)
}

/// `hundredths(15)` is 0.15
fn hundredths(amount: i64) -> Decimal {
    Decimal::new(amount, 2)
}

fn sized(small: i64, average: i64, large: i64) -> BasePrice {
    BasePrice::Sized {
        small: dollars(small),
        average: dollars(average),
        large: dollars(large),
    }
}

fn range(min: i64, max: i64, representative: i64) -> BasePrice {
    BasePrice::Range {
        min: dollars(min),
        max: dollars(max),
        representative: dollars(representative),
    }
}

impl Default for PricingCatalog {
    fn default() -> Self {
        Self {
            minimum_service_charge: dollars(400),
            room_base_prices: default_room_base_prices(),
            paint_upcharges: default_paint_upcharges(),
            surcharge_rates: SurchargeRates::default(),
            add_ons: AddOnPrices::default(),
            doors: DoorPricing::default(),
            windows: WindowPricing::default(),
            fireplace: MethodPrices {
                brush: dollars(150),
                spray: dollars(250),
            },
            repairs: RepairPrices::default(),
            baseboard_installation_per_foot: MethodPrices {
                brush: hundredths(400),
                spray: hundredths(550),
            },
            discounts: DiscountRates::default(),
            volume_discount_tiers: default_volume_discount_tiers(),
            paint_coverage: PaintCoverage::default(),
        }
    }
}

fn default_room_base_prices() -> BTreeMap<RoomType, BasePrice> {
    BTreeMap::from([
        (RoomType::Bedroom, sized(300, 400, 550)),
        (RoomType::MasterBedroom, sized(450, 600, 800)),
        (RoomType::Bathroom, sized(250, 350, 450)),
        (RoomType::HalfBath, sized(200, 250, 300)),
        (RoomType::Kitchen, sized(450, 600, 850)),
        (RoomType::FamilyRoom, sized(500, 650, 850)),
        (RoomType::Office, sized(300, 400, 500)),
        (RoomType::LaundryRoom, sized(200, 275, 350)),
        (RoomType::Basement, sized(600, 900, 1300)),
        (RoomType::LivingRoom, range(500, 1200, 750)),
        (RoomType::DiningRoom, range(400, 900, 550)),
        (RoomType::Entryway, range(400, 1000, 500)),
        (RoomType::Hallway, range(300, 800, 400)),
    ])
}

fn default_paint_upcharges() -> BTreeMap<PaintQuality, PaintUpcharge> {
    BTreeMap::from([
        (
            PaintQuality::Standard,
            PaintUpcharge {
                percent: Decimal::ZERO,
                fixed: Decimal::ZERO,
            },
        ),
        (
            PaintQuality::Premium,
            PaintUpcharge {
                percent: hundredths(15),
                fixed: dollars(50),
            },
        ),
        (
            PaintQuality::Luxury,
            PaintUpcharge {
                percent: hundredths(30),
                fixed: dollars(100),
            },
        ),
    ])
}

fn default_volume_discount_tiers() -> Vec<VolumeDiscountTier> {
    [
        (2_000, 5),
        (3_000, 10),
        (4_000, 15),
        (5_000, 20),
        (7_000, 25),
        (9_000, 30),
        (11_000, 35),
    ]
    .into_iter()
    .map(|(threshold, rate)| VolumeDiscountTier {
        threshold: dollars(threshold),
        rate: hundredths(rate),
    })
    .collect()
}

impl Default for SurchargeRates {
    fn default() -> Self {
        Self {
            ceiling: hundredths(40),
            crown_molding: hundredths(25),
            baseboard_brush: hundredths(25),
            baseboard_spray: hundredths(50),
            two_colors: hundredths(10),
        }
    }
}

impl Default for AddOnPrices {
    fn default() -> Self {
        Self {
            high_ceiling: dollars(150),
            regular_closet: dollars(75),
            walk_in_closet: dollars(150),
            stair_railing: dollars(200),
            millwork_priming: dollars(125),
        }
    }
}

impl Default for DoorPricing {
    fn default() -> Self {
        let tier = |min_doors, brush, spray| DoorLaborTier {
            min_doors,
            brush: dollars(brush),
            spray: dollars(spray),
        };
        Self {
            paint_cost: dollars(50),
            labor_tiers: vec![
                tier(1, 40, 55),
                tier(11, 35, 50),
                tier(20, 30, 45),
                tier(30, 25, 40),
            ],
        }
    }
}

impl Default for WindowPricing {
    fn default() -> Self {
        Self {
            paint_cost: dollars(25),
            per_window: dollars(20),
            per_sill: dollars(10),
            spray_multiplier: dollars(2),
        }
    }
}

impl Default for RepairPrices {
    fn default() -> Self {
        Self {
            minimal: dollars(100),
            extensive: dollars(350),
        }
    }
}

impl Default for DiscountRates {
    fn default() -> Self {
        Self {
            empty_house: hundredths(15),
            no_floor_covering: hundredths(5),
        }
    }
}

impl Default for PaintCoverage {
    fn default() -> Self {
        Self {
            sqft_per_can: dollars(350),
            coats: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        PricingCatalog::default().validate().unwrap();
    }

    #[test]
    fn test_max_volume_rate_constant() {
        assert_eq!(MAX_VOLUME_DISCOUNT_RATE, Decimal::new(375, 3));
    }

    #[test]
    fn test_sized_lookup() {
        let catalog = PricingCatalog::default();
        assert_eq!(
            catalog.base_price(RoomType::Bedroom, RoomSize::Average).unwrap(),
            dollars(400)
        );
        assert_eq!(
            catalog.base_price(RoomType::Kitchen, RoomSize::Large).unwrap(),
            dollars(850)
        );
    }

    #[test]
    fn test_range_lookup_ignores_size() {
        let catalog = PricingCatalog::default();
        for size in [RoomSize::Small, RoomSize::Average, RoomSize::Large] {
            assert_eq!(
                catalog.base_price(RoomType::Entryway, size).unwrap(),
                dollars(500)
            );
        }
    }

    #[test]
    fn test_missing_room_type_is_catalog_miss() {
        let mut catalog = PricingCatalog::default();
        catalog.room_base_prices.remove(&RoomType::Basement);
        let err = catalog
            .base_price(RoomType::Basement, RoomSize::Small)
            .unwrap_err();
        assert!(matches!(err, EstimateError::CatalogLookupMiss(_)));
    }

    #[test]
    fn test_missing_paint_quality_is_catalog_miss() {
        let mut catalog = PricingCatalog::default();
        catalog.paint_upcharges.remove(&PaintQuality::Luxury);
        assert!(catalog.paint_upcharge(PaintQuality::Luxury).is_err());
        assert!(catalog.paint_upcharge(PaintQuality::Premium).is_ok());
    }

    #[test]
    fn test_door_labor_tier_boundaries() {
        let catalog = PricingCatalog::default();
        let brush = |n| catalog.door_labor_rate(n, ApplicationMethod::Brush);
        assert_eq!(brush(1), dollars(40));
        assert_eq!(brush(10), dollars(40));
        assert_eq!(brush(11), dollars(35));
        assert_eq!(brush(19), dollars(35));
        assert_eq!(brush(20), dollars(30));
        assert_eq!(brush(29), dollars(30));
        assert_eq!(brush(30), dollars(25));
        assert_eq!(brush(200), dollars(25));
    }

    #[test]
    fn test_spray_costs_more_per_door_at_every_tier() {
        let catalog = PricingCatalog::default();
        for tier in &catalog.doors.labor_tiers {
            assert!(tier.spray > tier.brush, "tier at {} doors", tier.min_doors);
        }
        assert_eq!(
            catalog.door_labor_rate(5, ApplicationMethod::None),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_partial_json_keeps_default_sections() {
        let catalog = PricingCatalog::from_json_str(r#"{"minimum_service_charge": "250"}"#).unwrap();
        assert_eq!(catalog.minimum_service_charge, dollars(250));
        assert_eq!(catalog.volume_discount_tiers.len(), 7);
        assert_eq!(
            catalog.base_price(RoomType::Hallway, RoomSize::Large).unwrap(),
            dollars(400)
        );
    }

    #[test]
    fn test_json_room_table_replaces_defaults() {
        let json = r#"{
            "room_base_prices": {
                "bedroom": {"kind": "sized", "small": "310", "average": "410", "large": "560"},
                "entryway": {"kind": "range", "min": "400", "max": "1000", "representative": "700"}
            }
        }"#;
        let catalog = PricingCatalog::from_json_str(json).unwrap();
        assert_eq!(
            catalog.base_price(RoomType::Bedroom, RoomSize::Small).unwrap(),
            dollars(310)
        );
        assert_eq!(
            catalog.base_price(RoomType::Entryway, RoomSize::Small).unwrap(),
            dollars(700)
        );
        assert!(catalog.base_price(RoomType::Kitchen, RoomSize::Small).is_err());
    }

    #[test]
    fn test_unordered_volume_tiers_rejected() {
        let json = r#"{
            "volume_discount_tiers": [
                {"threshold": "3000", "rate": "0.10"},
                {"threshold": "2000", "rate": "0.05"}
            ]
        }"#;
        assert!(PricingCatalog::from_json_str(json).is_err());
    }

    #[test]
    fn test_volume_rate_above_cap_rejected() {
        let json = r#"{
            "volume_discount_tiers": [{"threshold": "20000", "rate": "0.40"}]
        }"#;
        assert!(PricingCatalog::from_json_str(json).is_err());
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        let catalog = PricingCatalog::load(None).unwrap();
        assert_eq!(catalog, PricingCatalog::default());
    }
}
