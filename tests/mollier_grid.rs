//! Mollier 격자 생성 회귀 테스트.
use hvac_mollier_toolbox::air::mollier::{self, generate_grid, mollier_grid};

#[test]
fn grid_has_100_points_in_fixed_order() {
    let grid = generate_grid();
    assert_eq!(grid.len(), 100);

    let mut idx = 0;
    for t in (-10..=50).step_by(5) {
        for rh in (10..=100).step_by(10) {
            let point = &grid[idx];
            assert_eq!(point.temperature_c, t as f64, "index {idx}");
            assert_eq!(point.relative_humidity_pct, rh as f64, "index {idx}");
            idx += 1;
        }
    }
    assert_eq!(idx, 100);
}

#[test]
fn reference_point_20c_50pct() {
    let grid = generate_grid();
    let point = grid
        .iter()
        .find(|p| p.temperature_c == 20.0 && p.relative_humidity_pct == 50.0)
        .expect("20°C/50% grid point");
    assert!(
        (point.humidity_ratio - 0.0073).abs() < 1e-4,
        "W={}",
        point.humidity_ratio
    );
}

#[test]
fn humidity_ratio_rounded_to_four_decimals() {
    for point in generate_grid() {
        let scaled = point.humidity_ratio * 10_000.0;
        assert!(
            (scaled - scaled.round()).abs() < 1e-9,
            "W={} at T={} RH={}",
            point.humidity_ratio,
            point.temperature_c,
            point.relative_humidity_pct
        );
    }
}

#[test]
fn humidity_ratio_non_negative_over_grid_range() {
    for point in generate_grid() {
        assert!(
            point.humidity_ratio >= 0.0,
            "W={} at T={} RH={}",
            point.humidity_ratio,
            point.temperature_c,
            point.relative_humidity_pct
        );
    }
}

#[test]
fn humidity_ratio_strictly_increasing_in_rh_for_fixed_temperature() {
    let grid = generate_grid();
    for row in grid.chunks(10) {
        for pair in row.windows(2) {
            assert!(
                pair[1].humidity_ratio > pair[0].humidity_ratio,
                "T={}: W({})={} !> W({})={}",
                pair[0].temperature_c,
                pair[1].relative_humidity_pct,
                pair[1].humidity_ratio,
                pair[0].relative_humidity_pct,
                pair[0].humidity_ratio
            );
        }
    }
}

#[test]
fn generate_grid_is_idempotent() {
    assert_eq!(generate_grid(), generate_grid());
}

#[test]
fn singleton_returns_same_slice() {
    let first = mollier_grid();
    let second = mollier_grid();
    assert!(std::ptr::eq(first, second));
    assert_eq!(first, generate_grid().as_slice());
}

#[test]
fn grid_range_constants_match_generated_bounds() {
    let grid = generate_grid();
    let first = grid.first().expect("non-empty grid");
    let last = grid.last().expect("non-empty grid");
    assert_eq!(first.temperature_c, mollier::GRID_T_MIN_C as f64);
    assert_eq!(first.relative_humidity_pct, mollier::GRID_RH_MIN_PCT as f64);
    assert_eq!(last.temperature_c, mollier::GRID_T_MAX_C as f64);
    assert_eq!(last.relative_humidity_pct, mollier::GRID_RH_MAX_PCT as f64);
}
