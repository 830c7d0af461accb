//! Room cost calculator
//!
//! Each line item is its own rule over `(attrs, catalog)`; `calculate_room_cost`
//! evaluates them in a fixed order and assembles the breakdown.

use rust_decimal::Decimal;

use super::catalog::PricingCatalog;
use super::round_cents;
use crate::domain::estimates::RoomCostBreakdown;
use crate::domain::rooms::{ApplicationMethod, RepairScope, RoomAttributes};
use crate::error::EstimateResult;

pub fn base_price(attrs: &RoomAttributes, catalog: &PricingCatalog) -> EstimateResult<Decimal> {
    catalog.base_price(attrs.room_type, attrs.size)
}

pub fn paint_upcharge(
    attrs: &RoomAttributes,
    catalog: &PricingCatalog,
    base: Decimal,
) -> EstimateResult<Decimal> {
    let upcharge = catalog.paint_upcharge(attrs.paint_quality)?;
    Ok(round_cents(base * upcharge.percent + upcharge.fixed))
}

pub fn ceiling_cost(attrs: &RoomAttributes, catalog: &PricingCatalog, base: Decimal) -> Decimal {
    surcharge(attrs.include_ceiling, base, catalog.surcharge_rates.ceiling)
}

pub fn crown_molding_cost(
    attrs: &RoomAttributes,
    catalog: &PricingCatalog,
    base: Decimal,
) -> Decimal {
    surcharge(
        attrs.include_crown_molding,
        base,
        catalog.surcharge_rates.crown_molding,
    )
}

pub fn baseboard_cost(attrs: &RoomAttributes, catalog: &PricingCatalog, base: Decimal) -> Decimal {
    let rate = match attrs.baseboard_method {
        ApplicationMethod::None => Decimal::ZERO,
        ApplicationMethod::Brush => catalog.surcharge_rates.baseboard_brush,
        ApplicationMethod::Spray => catalog.surcharge_rates.baseboard_spray,
    };
    surcharge(attrs.include_baseboards, base, rate)
}

pub fn high_ceiling_cost(attrs: &RoomAttributes, catalog: &PricingCatalog) -> Decimal {
    flat(attrs.has_high_ceiling, catalog.add_ons.high_ceiling)
}

pub fn closet_cost(attrs: &RoomAttributes, catalog: &PricingCatalog) -> Decimal {
    Decimal::from(attrs.regular_closet_count) * catalog.add_ons.regular_closet
        + Decimal::from(attrs.walk_in_closet_count) * catalog.add_ons.walk_in_closet
}

pub fn door_cost(attrs: &RoomAttributes, catalog: &PricingCatalog) -> Decimal {
    if attrs.door_method == ApplicationMethod::None || attrs.door_count == 0 {
        return Decimal::ZERO;
    }
    let rate = catalog.door_labor_rate(attrs.door_count, attrs.door_method);
    catalog.doors.paint_cost + Decimal::from(attrs.door_count) * rate
}

pub fn window_cost(attrs: &RoomAttributes, catalog: &PricingCatalog) -> Decimal {
    let windows = &catalog.windows;
    let multiplier = match attrs.window_method {
        ApplicationMethod::None => return Decimal::ZERO,
        ApplicationMethod::Brush => Decimal::ONE,
        ApplicationMethod::Spray => windows.spray_multiplier,
    };
    if attrs.window_count == 0 {
        return Decimal::ZERO;
    }
    let per_window = (windows.per_window + windows.per_sill) * multiplier;
    round_cents(windows.paint_cost + Decimal::from(attrs.window_count) * per_window)
}

pub fn fireplace_cost(attrs: &RoomAttributes, catalog: &PricingCatalog) -> Decimal {
    catalog.fireplace.for_method(attrs.fireplace_method)
}

pub fn railing_cost(attrs: &RoomAttributes, catalog: &PricingCatalog) -> Decimal {
    flat(attrs.has_stair_railing, catalog.add_ons.stair_railing)
}

pub fn two_color_cost(attrs: &RoomAttributes, catalog: &PricingCatalog, base: Decimal) -> Decimal {
    surcharge(attrs.two_colors, base, catalog.surcharge_rates.two_colors)
}

pub fn millwork_priming_cost(attrs: &RoomAttributes, catalog: &PricingCatalog) -> Decimal {
    flat(
        attrs.millwork_priming_needed,
        catalog.add_ons.millwork_priming,
    )
}

pub fn repairs_cost(attrs: &RoomAttributes, catalog: &PricingCatalog) -> Decimal {
    match attrs.repair_scope {
        RepairScope::None => Decimal::ZERO,
        RepairScope::Minimal => catalog.repairs.minimal,
        RepairScope::Extensive => catalog.repairs.extensive,
    }
}

/// New baseboard, priced per linear foot by method. Independent of
/// `include_baseboards`, which only covers painting existing boards.
pub fn baseboard_installation_cost(attrs: &RoomAttributes, catalog: &PricingCatalog) -> Decimal {
    let per_foot = catalog
        .baseboard_installation_per_foot
        .for_method(attrs.baseboard_method);
    round_cents(Decimal::from(attrs.baseboard_install_feet) * per_foot)
}

pub fn empty_house_discount(
    attrs: &RoomAttributes,
    catalog: &PricingCatalog,
    subtotal: Decimal,
) -> Decimal {
    surcharge(attrs.is_empty_house, subtotal, catalog.discounts.empty_house)
}

/// Granted when the customer does not need floors covered.
pub fn no_floor_covering_discount(
    attrs: &RoomAttributes,
    catalog: &PricingCatalog,
    subtotal: Decimal,
) -> Decimal {
    surcharge(
        !attrs.needs_floor_covering,
        subtotal,
        catalog.discounts.no_floor_covering,
    )
}

fn surcharge(applies: bool, amount: Decimal, rate: Decimal) -> Decimal {
    if applies {
        round_cents(amount * rate)
    } else {
        Decimal::ZERO
    }
}

fn flat(applies: bool, amount: Decimal) -> Decimal {
    if applies {
        amount
    } else {
        Decimal::ZERO
    }
}

/// Price one room. Fails before any pricing if the dimensions are invalid or
/// the catalog lacks the room type or paint tier.
pub fn calculate_room_cost(
    attrs: &RoomAttributes,
    catalog: &PricingCatalog,
) -> EstimateResult<RoomCostBreakdown> {
    attrs.validate_dimensions()?;
    let paintable_area_sqft = attrs.paintable_area_sqft()?;

    let base = base_price(attrs, catalog)?;
    let paint_upcharge = paint_upcharge(attrs, catalog, base)?;
    let ceiling_cost = ceiling_cost(attrs, catalog, base);
    let crown_molding_cost = crown_molding_cost(attrs, catalog, base);
    let baseboard_cost = baseboard_cost(attrs, catalog, base);
    let high_ceiling_cost = high_ceiling_cost(attrs, catalog);
    let closet_cost = closet_cost(attrs, catalog);
    let door_cost = door_cost(attrs, catalog);
    let window_cost = window_cost(attrs, catalog);
    let fireplace_cost = fireplace_cost(attrs, catalog);
    let railing_cost = railing_cost(attrs, catalog);
    let two_color_cost = two_color_cost(attrs, catalog, base);
    let millwork_priming_cost = millwork_priming_cost(attrs, catalog);
    let repairs_cost = repairs_cost(attrs, catalog);
    let baseboard_installation_cost = baseboard_installation_cost(attrs, catalog);

    let subtotal_before_discounts = base
        + paint_upcharge
        + ceiling_cost
        + crown_molding_cost
        + baseboard_cost
        + high_ceiling_cost
        + closet_cost
        + door_cost
        + window_cost
        + fireplace_cost
        + railing_cost
        + two_color_cost
        + millwork_priming_cost
        + repairs_cost
        + baseboard_installation_cost;

    let empty_house_discount = empty_house_discount(attrs, catalog, subtotal_before_discounts);
    let no_floor_covering_discount =
        no_floor_covering_discount(attrs, catalog, subtotal_before_discounts);

    let discounted = subtotal_before_discounts - empty_house_discount - no_floor_covering_discount;
    let minimum_charge_top_up = (catalog.minimum_service_charge - discounted).max(Decimal::ZERO);
    let total_before_volume_discount = discounted + minimum_charge_top_up;

    tracing::debug!(
        room_type = %attrs.room_type,
        size = %attrs.size,
        subtotal = %subtotal_before_discounts,
        total = %total_before_volume_discount,
        floored = !minimum_charge_top_up.is_zero(),
        "Calculated room cost"
    );

    Ok(RoomCostBreakdown {
        room_type: attrs.room_type,
        size: attrs.size,
        paintable_area_sqft,
        base_price: base,
        paint_upcharge,
        ceiling_cost,
        crown_molding_cost,
        baseboard_cost,
        high_ceiling_cost,
        closet_cost,
        door_cost,
        window_cost,
        fireplace_cost,
        railing_cost,
        two_color_cost,
        millwork_priming_cost,
        repairs_cost,
        baseboard_installation_cost,
        subtotal_before_discounts,
        empty_house_discount,
        no_floor_covering_discount,
        minimum_charge_top_up,
        total_before_volume_discount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rooms::{PaintQuality, RoomSize, RoomType};
    use crate::error::EstimateError;

    fn dollars(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    fn bedroom() -> RoomAttributes {
        RoomAttributes::new(RoomType::Bedroom, RoomSize::Average)
    }

    #[test]
    fn test_plain_average_bedroom_is_base_price() {
        let breakdown = calculate_room_cost(&bedroom(), &PricingCatalog::default()).unwrap();
        assert_eq!(breakdown.base_price, dollars(400));
        assert_eq!(breakdown.paint_upcharge, Decimal::ZERO);
        assert_eq!(breakdown.subtotal_before_discounts, dollars(400));
        assert_eq!(breakdown.minimum_charge_top_up, Decimal::ZERO);
        assert_eq!(breakdown.total_before_volume_discount, dollars(400));
    }

    #[test]
    fn test_empty_house_discount_floored_at_minimum() {
        let mut attrs = bedroom();
        attrs.is_empty_house = true;
        let breakdown = calculate_room_cost(&attrs, &PricingCatalog::default()).unwrap();
        assert_eq!(breakdown.empty_house_discount, dollars(60));
        assert_eq!(breakdown.minimum_charge_top_up, dollars(60));
        assert_eq!(breakdown.total_before_volume_discount, dollars(400));
    }

    #[test]
    fn test_premium_paint_upcharge() {
        let mut attrs = bedroom();
        attrs.paint_quality = PaintQuality::Premium;
        let catalog = PricingCatalog::default();
        // 400 * 0.15 + 50
        assert_eq!(paint_upcharge(&attrs, &catalog, dollars(400)).unwrap(), dollars(110));
    }

    #[test]
    fn test_base_surcharges() {
        let mut attrs = bedroom();
        let catalog = PricingCatalog::default();
        let base = dollars(400);

        assert_eq!(ceiling_cost(&attrs, &catalog, base), Decimal::ZERO);
        attrs.include_ceiling = true;
        attrs.include_crown_molding = true;
        attrs.two_colors = true;
        assert_eq!(ceiling_cost(&attrs, &catalog, base), dollars(160));
        assert_eq!(crown_molding_cost(&attrs, &catalog, base), dollars(100));
        assert_eq!(two_color_cost(&attrs, &catalog, base), dollars(40));
    }

    #[test]
    fn test_baseboard_surcharge_needs_flag_and_method() {
        let mut attrs = bedroom();
        let catalog = PricingCatalog::default();
        let base = dollars(400);

        attrs.baseboard_method = ApplicationMethod::Spray;
        assert_eq!(baseboard_cost(&attrs, &catalog, base), Decimal::ZERO);

        attrs.include_baseboards = true;
        assert_eq!(baseboard_cost(&attrs, &catalog, base), dollars(200));
        attrs.baseboard_method = ApplicationMethod::Brush;
        assert_eq!(baseboard_cost(&attrs, &catalog, base), dollars(100));
        attrs.baseboard_method = ApplicationMethod::None;
        assert_eq!(baseboard_cost(&attrs, &catalog, base), Decimal::ZERO);
    }

    #[test]
    fn test_closets_priced_from_counts() {
        let mut attrs = bedroom();
        let catalog = PricingCatalog::default();
        assert_eq!(closet_cost(&attrs, &catalog), Decimal::ZERO);

        attrs.regular_closet_count = 2;
        attrs.walk_in_closet_count = 1;
        assert_eq!(closet_cost(&attrs, &catalog), dollars(300));

        // The flag alone never drops closets that were counted
        attrs.include_closet = true;
        assert_eq!(closet_cost(&attrs, &catalog), dollars(300));
    }

    #[test]
    fn test_fifteen_brush_doors_use_second_tier() {
        let mut attrs = bedroom();
        attrs.door_count = 15;
        attrs.door_method = ApplicationMethod::Brush;
        // 50 paint + 15 * 35
        assert_eq!(door_cost(&attrs, &PricingCatalog::default()), dollars(575));
    }

    #[test]
    fn test_door_cost_zero_without_method_or_doors() {
        let mut attrs = bedroom();
        let catalog = PricingCatalog::default();
        attrs.door_count = 4;
        assert_eq!(door_cost(&attrs, &catalog), Decimal::ZERO);

        attrs.door_count = 0;
        attrs.door_method = ApplicationMethod::Spray;
        assert_eq!(door_cost(&attrs, &catalog), Decimal::ZERO);
    }

    #[test]
    fn test_spray_doors_cost_more_than_brush() {
        let catalog = PricingCatalog::default();
        for count in [1, 10, 11, 19, 20, 29, 30, 45] {
            let mut attrs = bedroom();
            attrs.door_count = count;
            attrs.door_method = ApplicationMethod::Brush;
            let brush = door_cost(&attrs, &catalog);
            attrs.door_method = ApplicationMethod::Spray;
            let spray = door_cost(&attrs, &catalog);
            assert!(spray > brush, "{} doors", count);
        }
    }

    #[test]
    fn test_window_cost_doubles_under_spray() {
        let mut attrs = bedroom();
        attrs.window_count = 3;
        let catalog = PricingCatalog::default();
        assert_eq!(window_cost(&attrs, &catalog), Decimal::ZERO);

        attrs.window_method = ApplicationMethod::Brush;
        // 25 + 3 * (20 + 10)
        assert_eq!(window_cost(&attrs, &catalog), dollars(115));
        attrs.window_method = ApplicationMethod::Spray;
        // 25 + 3 * (40 + 20)
        assert_eq!(window_cost(&attrs, &catalog), dollars(205));
    }

    #[test]
    fn test_flat_add_ons() {
        let mut attrs = bedroom();
        let catalog = PricingCatalog::default();
        attrs.has_high_ceiling = true;
        attrs.has_stair_railing = true;
        attrs.millwork_priming_needed = true;
        attrs.fireplace_method = ApplicationMethod::Spray;
        attrs.repair_scope = RepairScope::Extensive;

        assert_eq!(high_ceiling_cost(&attrs, &catalog), dollars(150));
        assert_eq!(railing_cost(&attrs, &catalog), dollars(200));
        assert_eq!(millwork_priming_cost(&attrs, &catalog), dollars(125));
        assert_eq!(fireplace_cost(&attrs, &catalog), dollars(250));
        assert_eq!(repairs_cost(&attrs, &catalog), dollars(350));

        attrs.repair_scope = RepairScope::Minimal;
        attrs.fireplace_method = ApplicationMethod::Brush;
        assert_eq!(repairs_cost(&attrs, &catalog), dollars(100));
        assert_eq!(fireplace_cost(&attrs, &catalog), dollars(150));
    }

    #[test]
    fn test_baseboard_installation_per_foot() {
        let mut attrs = bedroom();
        attrs.baseboard_install_feet = 40;
        let catalog = PricingCatalog::default();
        assert_eq!(baseboard_installation_cost(&attrs, &catalog), Decimal::ZERO);

        attrs.baseboard_method = ApplicationMethod::Brush;
        assert_eq!(baseboard_installation_cost(&attrs, &catalog), dollars(160));
        attrs.baseboard_method = ApplicationMethod::Spray;
        assert_eq!(baseboard_installation_cost(&attrs, &catalog), dollars(220));
    }

    #[test]
    fn test_discounts_apply_to_full_subtotal() {
        let mut attrs = RoomAttributes::new(RoomType::Basement, RoomSize::Large);
        attrs.is_empty_house = true;
        attrs.needs_floor_covering = false;
        attrs.include_ceiling = true;

        let breakdown = calculate_room_cost(&attrs, &PricingCatalog::default()).unwrap();
        // 1300 + 520 ceiling
        assert_eq!(breakdown.subtotal_before_discounts, dollars(1820));
        assert_eq!(breakdown.empty_house_discount, dollars(273));
        assert_eq!(breakdown.no_floor_covering_discount, dollars(91));
        assert_eq!(breakdown.minimum_charge_top_up, Decimal::ZERO);
        assert_eq!(breakdown.total_before_volume_discount, dollars(1456));
    }

    #[test]
    fn test_floor_covering_needed_gets_no_discount() {
        let attrs = RoomAttributes::new(RoomType::Kitchen, RoomSize::Large);
        let breakdown = calculate_room_cost(&attrs, &PricingCatalog::default()).unwrap();
        assert_eq!(breakdown.no_floor_covering_discount, Decimal::ZERO);
        assert_eq!(breakdown.total_before_volume_discount, dollars(850));
    }

    #[test]
    fn test_range_priced_room_uses_representative_value() {
        let attrs = RoomAttributes::new(RoomType::LivingRoom, RoomSize::Small);
        let breakdown = calculate_room_cost(&attrs, &PricingCatalog::default()).unwrap();
        assert_eq!(breakdown.base_price, dollars(750));
    }

    #[test]
    fn test_breakdown_identity() {
        let mut attrs = RoomAttributes::new(RoomType::MasterBedroom, RoomSize::Large);
        attrs.paint_quality = PaintQuality::Luxury;
        attrs.include_ceiling = true;
        attrs.include_baseboards = true;
        attrs.baseboard_method = ApplicationMethod::Brush;
        attrs.door_count = 3;
        attrs.door_method = ApplicationMethod::Spray;
        attrs.window_count = 2;
        attrs.window_method = ApplicationMethod::Brush;
        attrs.is_empty_house = true;
        attrs.needs_floor_covering = false;

        let b = calculate_room_cost(&attrs, &PricingCatalog::default()).unwrap();
        let items = b.base_price
            + b.paint_upcharge
            + b.add_on_cost()
            + b.baseboard_cost
            + b.high_ceiling_cost
            + b.closet_cost
            + b.door_cost
            + b.window_cost
            + b.fireplace_cost
            + b.railing_cost
            + b.two_color_cost
            + b.millwork_priming_cost
            + b.repairs_cost
            + b.baseboard_installation_cost;
        assert_eq!(items, b.subtotal_before_discounts);
        assert_eq!(
            b.total_before_volume_discount,
            b.subtotal_before_discounts - b.total_discounts() + b.minimum_charge_top_up
        );
    }

    #[test]
    fn test_repeated_calculation_is_identical() {
        let mut attrs = RoomAttributes::new(RoomType::DiningRoom, RoomSize::Average);
        attrs.paint_quality = PaintQuality::Premium;
        attrs.two_colors = true;
        attrs.is_empty_house = true;
        let catalog = PricingCatalog::default();

        let first = calculate_room_cost(&attrs, &catalog).unwrap();
        for _ in 0..10 {
            assert_eq!(calculate_room_cost(&attrs, &catalog).unwrap(), first);
        }
    }

    #[test]
    fn test_negative_dimension_rejected_before_pricing() {
        let mut attrs = bedroom();
        attrs.wall_height_ft = Decimal::new(-8, 0);
        let err = calculate_room_cost(&attrs, &PricingCatalog::default()).unwrap_err();
        assert!(matches!(err, EstimateError::InvalidInput { ref field, .. } if field == "wall_height_ft"));
    }

    #[test]
    fn test_overflowing_dimensions_rejected_before_pricing() {
        let mut attrs = bedroom();
        attrs.wall_count = 4;
        attrs.wall_height_ft = Decimal::MAX;
        attrs.wall_width_ft = Decimal::new(12, 0);
        let err = calculate_room_cost(&attrs, &PricingCatalog::default()).unwrap_err();
        assert!(matches!(err, EstimateError::InvalidInput { ref field, .. } if field == "wall_height_ft"));
    }

    #[test]
    fn test_missing_catalog_entry_fails() {
        let mut catalog = PricingCatalog::default();
        catalog.paint_upcharges.remove(&PaintQuality::Standard);
        let err = calculate_room_cost(&bedroom(), &catalog).unwrap_err();
        assert!(matches!(err, EstimateError::CatalogLookupMiss(_)));
    }
}
