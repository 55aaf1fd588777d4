//! Magnus 근사 습공기 물성 테스트.
use hvac_mollier_toolbox::air::humid_air::{
    dew_point_c, humidity_ratio_from_rh, moist_air_enthalpy_kj_per_kg,
    saturation_pressure_magnus_hpa,
};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "{label} expected {expected} got {actual}"
    );
}

#[test]
fn saturation_pressure_reference_points() {
    // T=0°C에서 지수항이 1이므로 정확히 6.112 hPa.
    assert_close("pws(0)", saturation_pressure_magnus_hpa(0.0), 6.112, 1e-12);
    assert_close("pws(20)", saturation_pressure_magnus_hpa(20.0), 23.37, 0.05);
    assert_close("pws(-10)", saturation_pressure_magnus_hpa(-10.0), 2.87, 0.05);
}

#[test]
fn humidity_ratio_reference_20c_50pct() {
    let state = humidity_ratio_from_rh(20.0, 50.0);
    assert_close("W", state.humidity_ratio, 0.0073, 1e-4);
    assert_close(
        "pv",
        state.vapor_pressure_hpa,
        state.saturation_pressure_hpa / 2.0,
        1e-12,
    );
}

#[test]
fn dew_point_equals_dry_bulb_at_saturation() {
    for t in [-10.0, 0.0, 20.0, 35.0, 50.0] {
        assert_close("Td(T,100%)", dew_point_c(t, 100.0), t, 1e-9);
    }
}

#[test]
fn dew_point_below_dry_bulb_when_unsaturated() {
    let td = dew_point_c(25.0, 40.0);
    assert!(td < 25.0, "Td={td}");
    assert!(td > -10.0, "Td={td}");
}

#[test]
fn enthalpy_reference() {
    // h = 1.005*20 + 0.0073*(2500 + 1.86*20) ≈ 38.62 kJ/kg
    assert_close(
        "h(20, 0.0073)",
        moist_air_enthalpy_kj_per_kg(20.0, 0.0073),
        38.62,
        0.01,
    );
}

#[test]
fn no_clamping_beyond_total_pressure() {
    // 전압을 넘는 분압에서는 모델 그대로 음수 습도비가 나온다.
    let state = humidity_ratio_from_rh(120.0, 100.0);
    assert!(state.vapor_pressure_hpa > 1013.25);
    assert!(state.humidity_ratio < 0.0);
}

#[test]
fn non_finite_inputs_propagate() {
    assert!(saturation_pressure_magnus_hpa(f64::NAN).is_nan());
    // 특이점(-243.5°C) 아래에서는 지수가 +inf로 발산한다.
    assert!(saturation_pressure_magnus_hpa(-244.0).is_infinite());
    assert!(humidity_ratio_from_rh(f64::NAN, 50.0).humidity_ratio.is_nan());
    // RH=0은 ln(0)=-inf 경로로 노점이 정의되지 않는다.
    assert!(dew_point_c(20.0, 0.0).is_infinite() || dew_point_c(20.0, 0.0).is_nan());
}
