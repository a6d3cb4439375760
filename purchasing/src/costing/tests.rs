use super::*;
use crate::money::{RoundingMode, RoundingPolicy, to_f64};
use rust_decimal::Decimal;
use shared::NumericInput;
use shared::models::{OrderExpenses, PurchaseOrderItem};

fn n(value: f64) -> NumericInput {
    NumericInput::from(value)
}

fn t(value: &str) -> NumericInput {
    NumericInput::from(value)
}

fn sum_apportioned(items: &[PurchaseOrderItem]) -> f64 {
    items.iter().map(|i| i.apportioned_cost).sum()
}

#[test]
fn test_two_line_scenario() {
    let items = vec![
        PurchaseOrderItem::new(100.0, 2),
        PurchaseOrderItem::new(300.0, 3),
    ];

    let result = apportion(&items, &n(40.0), &n(0.0), &n(0.0));

    assert_eq!(result.len(), 2);
    assert_eq!(result[0].apportioned_cost, 10.0);
    assert_eq!(result[0].final_total_cost, 110.0);
    assert_eq!(result[0].final_unit_cost, Some(55.0));
    assert_eq!(result[1].apportioned_cost, 30.0);
    assert_eq!(result[1].final_total_cost, 330.0);
    assert_eq!(result[1].final_unit_cost, Some(110.0));
    assert_eq!(sum_apportioned(&result), 40.0);
}

#[test]
fn test_all_three_expenses_are_summed() {
    let items = vec![
        PurchaseOrderItem::new(50.0, 1),
        PurchaseOrderItem::new(150.0, 1),
    ];

    let result = apportion(&items, &n(10.0), &t("6,00"), &t("4"));

    assert_eq!(result[0].apportioned_cost, 5.0);
    assert_eq!(result[1].apportioned_cost, 15.0);
}

#[test]
fn test_locale_strings_for_expenses() {
    let items = vec![PurchaseOrderItem::new(200.0, 4)];

    let result = apportion(&items, &t("12,50"), &t(""), &t("1.000,00"));

    assert_eq!(result[0].apportioned_cost, 1012.5);
    assert_eq!(result[0].final_total_cost, 1212.5);
    assert_eq!(result[0].final_unit_cost, Some(303.125));
}

#[test]
fn test_unparsable_expenses_count_as_zero() {
    let items = vec![PurchaseOrderItem::new(80.0, 1)];

    let result = apportion(&items, &t("abc"), &t("--"), &n(f64::NAN));

    assert_eq!(result[0].apportioned_cost, 0.0);
    assert_eq!(result[0].final_total_cost, 80.0);
    assert_eq!(result[0].final_unit_cost, None);
}

#[test]
fn test_zero_expenses_is_degenerate() {
    let items = vec![
        PurchaseOrderItem::new(12.34, 2),
        PurchaseOrderItem::new(99.99, 1),
    ];

    let result = apportion(&items, &n(0.0), &n(0.0), &t("0,00"));

    for (input, output) in items.iter().zip(&result) {
        assert_eq!(output.apportioned_cost, 0.0);
        assert_eq!(output.final_total_cost, input.line_total);
        assert_eq!(output.final_unit_cost, None);
    }
}

#[test]
fn test_zero_line_value_is_degenerate() {
    let items = vec![PurchaseOrderItem::new(0.0, 2), PurchaseOrderItem::new(0.0, 5)];

    let result = apportion(&items, &n(25.0), &n(5.0), &n(0.0));

    for item in &result {
        assert_eq!(item.apportioned_cost, 0.0);
        assert_eq!(item.final_total_cost, 0.0);
        assert!(!item.apportioned_cost.is_nan());
        assert_eq!(item.final_unit_cost, None);
    }
}

#[test]
fn test_empty_items() {
    let result = apportion(&[], &n(40.0), &n(0.0), &n(0.0));
    assert!(result.is_empty());
}

#[test]
fn test_degenerate_clears_stale_unit_cost() {
    let items = vec![PurchaseOrderItem::new(100.0, 2)];
    let priced = apportion(&items, &n(10.0), &n(0.0), &n(0.0));
    assert_eq!(priced[0].final_unit_cost, Some(55.0));

    // Expenses cleared by the user: previous outputs must not survive
    let cleared = apportion(&priced, &n(0.0), &n(0.0), &n(0.0));
    assert_eq!(cleared[0].apportioned_cost, 0.0);
    assert_eq!(cleared[0].final_total_cost, 100.0);
    assert_eq!(cleared[0].final_unit_cost, None);
}

#[test]
fn test_quantity_fallback_to_one() {
    let mut no_quantity = PurchaseOrderItem::new(60.0, 0);
    no_quantity.quantity = None;
    let items = vec![
        PurchaseOrderItem::new(20.0, 0),
        PurchaseOrderItem::new(20.0, "três"),
        no_quantity,
    ];

    let result = apportion(&items, &n(10.0), &n(0.0), &n(0.0));

    assert_eq!(result[0].final_total_cost, 22.0);
    assert_eq!(result[0].final_unit_cost, Some(22.0));
    assert_eq!(result[1].final_unit_cost, Some(22.0));
    assert_eq!(result[2].final_total_cost, 66.0);
    assert_eq!(result[2].final_unit_cost, Some(66.0));
}

#[test]
fn test_string_quantity() {
    let items = vec![PurchaseOrderItem::new(100.0, "4")];

    let result = apportion(&items, &n(20.0), &n(0.0), &n(0.0));

    assert_eq!(result[0].final_unit_cost, Some(30.0));
}

#[test]
fn test_order_and_passthrough_preserved() {
    let items = vec![
        PurchaseOrderItem::new(10.0, 1).with_product(3, "Shampoo"),
        PurchaseOrderItem::new(30.0, 1).with_product(1, "Navalha"),
        PurchaseOrderItem::new(60.0, 1).with_product(2, "Toalha"),
    ];

    let result = apportion(&items, &n(5.0), &n(0.0), &n(0.0));

    let ids: Vec<_> = result.iter().map(|i| i.product_id).collect();
    assert_eq!(ids, vec![Some(3), Some(1), Some(2)]);
    assert_eq!(result[1].product_name.as_deref(), Some("Navalha"));
}

#[test]
fn test_input_not_mutated() {
    let items = vec![PurchaseOrderItem::new(100.0, 2)];
    let snapshot = items.clone();

    let _ = apportion(&items, &n(40.0), &n(0.0), &n(0.0));

    assert_eq!(items, snapshot);
}

#[test]
fn test_idempotent() {
    let items = vec![
        PurchaseOrderItem::new(33.33, 3),
        PurchaseOrderItem::new(66.67, 7),
        PurchaseOrderItem::new(0.01, 1),
    ];
    let freight = t("17,89");

    let first = apportion(&items, &freight, &n(1.0), &n(0.0));
    let second = apportion(&items, &freight, &n(1.0), &n(0.0));

    assert_eq!(first, second);
}

#[test]
fn test_thirds_sum_to_total() {
    // 10.00 across three equal lines: 3.34 + 3.33 + 3.33
    let items = vec![
        PurchaseOrderItem::new(50.0, 1),
        PurchaseOrderItem::new(50.0, 1),
        PurchaseOrderItem::new(50.0, 1),
    ];

    let result = apportion(&items, &n(10.0), &n(0.0), &n(0.0));

    assert_eq!(result[0].apportioned_cost, 3.34);
    assert_eq!(result[1].apportioned_cost, 3.33);
    assert_eq!(result[2].apportioned_cost, 3.33);
    assert!((sum_apportioned(&result) - 10.0).abs() < 1e-9);
}

#[test]
fn test_largest_remainder_goes_to_biggest_fraction() {
    // Exact shares: 0.714..., 2.142..., 7.142...
    let items = vec![
        PurchaseOrderItem::new(10.0, 1),
        PurchaseOrderItem::new(30.0, 1),
        PurchaseOrderItem::new(100.0, 1),
    ];

    let result = apportion(&items, &n(10.0), &n(0.0), &n(0.0));

    // Truncated remainders: 0.00428..., 0.00285..., 0.00285...
    assert_eq!(result[0].apportioned_cost, 0.72);
    assert_eq!(result[1].apportioned_cost, 2.14);
    assert_eq!(result[2].apportioned_cost, 7.14);
    assert!((sum_apportioned(&result) - 10.0).abs() < 1e-9);
}

#[test]
fn test_tiny_expense_over_many_lines() {
    let items: Vec<_> = (0..100).map(|_| PurchaseOrderItem::new(1.0, 1)).collect();

    let result = apportion(&items, &n(0.5), &n(0.0), &n(0.0));

    assert!(result.iter().all(|i| i.apportioned_cost >= 0.0));
    assert_eq!(
        result.iter().filter(|i| i.apportioned_cost == 0.01).count(),
        50
    );
    // Earlier lines win ties
    assert_eq!(result[0].apportioned_cost, 0.01);
    assert_eq!(result[99].apportioned_cost, 0.0);
    assert!((sum_apportioned(&result) - 0.5).abs() < 1e-9);
}

#[test]
fn test_negative_line_total_gets_no_share() {
    let items = vec![
        PurchaseOrderItem::new(-20.0, 1),
        PurchaseOrderItem::new(100.0, 1),
    ];

    let result = apportion(&items, &n(10.0), &n(0.0), &n(0.0));

    assert_eq!(result[0].apportioned_cost, 0.0);
    assert_eq!(result[0].final_total_cost, -20.0);
    assert_eq!(result[1].apportioned_cost, 10.0);
}

#[test]
fn test_unit_cost_precision() {
    let items = vec![PurchaseOrderItem::new(100.0, 3)];

    let result = apportion(&items, &n(0.01), &n(0.0), &n(0.0));

    assert_eq!(result[0].final_total_cost, 100.01);
    assert_eq!(result[0].final_unit_cost, Some(33.3367));
}

#[test]
fn test_half_even_policy() {
    let apportioner = Apportioner::new(RoundingPolicy {
        mode: RoundingMode::HalfEven,
        ..RoundingPolicy::default()
    });
    let items = vec![PurchaseOrderItem::new(10.0, 8)];

    // 10.00 + 0.25 = 10.25 / 8 = 1.28125 -> 1.2812 (half-even) vs 1.2813 (half-up)
    let even = apportioner.apportion(&items, &n(0.25), &n(0.0), &n(0.0));
    let up = apportion(&items, &n(0.25), &n(0.0), &n(0.0));

    assert_eq!(even[0].final_unit_cost, Some(1.2812));
    assert_eq!(up[0].final_unit_cost, Some(1.2813));
}

#[test]
fn test_apportion_expenses_record() {
    let items = vec![
        PurchaseOrderItem::new(100.0, 2),
        PurchaseOrderItem::new(300.0, 3),
    ];
    let expenses = OrderExpenses::new("40,00", "", 0.0);

    let result = apportion_expenses(&items, &expenses);

    assert_eq!(result[0].apportioned_cost, 10.0);
    assert_eq!(result[1].apportioned_cost, 30.0);
}

#[test]
fn test_summary() {
    let items = vec![
        PurchaseOrderItem::new(100.0, 2),
        PurchaseOrderItem::new(300.0, 3),
    ];

    let (_, summary) =
        Apportioner::default().apportion_with_summary(&items, &n(30.0), &t("7,5"), &t("2,5"));

    assert_eq!(summary.item_count, 2);
    assert_eq!(summary.total_expenses, 40.0);
    assert_eq!(summary.total_line_value, 400.0);
    assert_eq!(summary.total_apportioned, 40.0);
    assert!(!summary.degenerate);

    let (_, summary) = Apportioner::default().apportion_with_summary(&items, &n(0.0), &n(0.0), &n(0.0));
    assert!(summary.degenerate);
    assert_eq!(summary.total_apportioned, 0.0);
}

#[test]
fn test_expense_total_beyond_decimal_range_is_degenerate() {
    let items = vec![PurchaseOrderItem::new(100.0, 1)];
    let max = t("79228162514264337593543950335");

    let (result, summary) =
        Apportioner::default().apportion_with_summary(&items, &max, &max, &n(0.0));

    assert!(summary.degenerate);
    assert_eq!(summary.total_expenses, to_f64(Decimal::MAX));
    assert_eq!(summary.total_apportioned, 0.0);
    assert_eq!(result[0].apportioned_cost, 0.0);
    assert_eq!(result[0].final_total_cost, 100.0);
    assert_eq!(result[0].final_unit_cost, None);
}

#[test]
fn test_line_value_beyond_decimal_range_is_degenerate() {
    let items = vec![
        PurchaseOrderItem::new(5e28, 1),
        PurchaseOrderItem::new(5e28, 1),
    ];

    let (result, summary) =
        Apportioner::default().apportion_with_summary(&items, &n(40.0), &n(0.0), &n(0.0));

    assert!(summary.degenerate);
    assert_eq!(summary.total_line_value, to_f64(Decimal::MAX));
    for item in &result {
        assert_eq!(item.apportioned_cost, 0.0);
        assert_eq!(item.final_total_cost, 5e28);
        assert_eq!(item.final_unit_cost, None);
    }
}

#[test]
fn test_final_total_beyond_decimal_range_is_degenerate() {
    // 7e28 + 1e28 does not fit even though both totals do
    let items = vec![PurchaseOrderItem::new(7e28, 2)];

    let (result, summary) = Apportioner::default().apportion_with_summary(
        &items,
        &t("10000000000000000000000000000"),
        &n(0.0),
        &n(0.0),
    );

    assert!(summary.degenerate);
    assert_eq!(result[0].apportioned_cost, 0.0);
    assert_eq!(result[0].final_total_cost, 7e28);
    assert_eq!(result[0].final_unit_cost, None);
}

#[test]
fn test_large_amounts_within_decimal_range() {
    let items = vec![
        PurchaseOrderItem::new(1e28, 4),
        PurchaseOrderItem::new(3e28, 2),
    ];
    let close = |actual: f64, expected: f64| ((actual - expected) / expected).abs() < 1e-9;

    let (result, summary) = Apportioner::default().apportion_with_summary(
        &items,
        &t("40000000000000000000000000000"),
        &n(0.0),
        &n(0.0),
    );

    assert!(!summary.degenerate);
    assert!(close(summary.total_apportioned, 4e28));
    assert!(close(result[0].apportioned_cost, 1e28));
    assert!(close(result[0].final_total_cost, 2e28));
    assert!(close(result[0].final_unit_cost.unwrap(), 5e27));
    assert!(close(result[1].apportioned_cost, 3e28));
    assert!(close(result[1].final_total_cost, 6e28));
    assert!(close(result[1].final_unit_cost.unwrap(), 3e28));
}
