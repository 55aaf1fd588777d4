use std::sync::OnceLock;

use crate::air::humid_air;

/// 격자 온도 하한 [°C].
pub const GRID_T_MIN_C: i32 = -10;
/// 격자 온도 상한 [°C].
pub const GRID_T_MAX_C: i32 = 50;
/// 격자 온도 간격 [°C].
pub const GRID_T_STEP_C: i32 = 5;
/// 격자 상대습도 하한 [%].
pub const GRID_RH_MIN_PCT: i32 = 10;
/// 격자 상대습도 상한 [%].
pub const GRID_RH_MAX_PCT: i32 = 100;
/// 격자 상대습도 간격 [%].
pub const GRID_RH_STEP_PCT: i32 = 10;

/// Mollier 선도 격자의 한 점. 생성 이후 불변.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MollierPoint {
    /// 건구 온도 [°C]
    pub temperature_c: f64,
    /// 상대습도 [%]
    pub relative_humidity_pct: f64,
    /// 습도비 [kg수증기/kg건공기], 소수 4자리 반올림
    pub humidity_ratio: f64,
}

/// 습도비를 소수 4자리로 반올림한다. 격자 점의 공개 값 자체가 반올림된 값이다.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Mollier 격자를 생성한다.
///
/// 온도 오름차순(외측), 상대습도 오름차순(내측)의 고정 순서로 10×10 = 100점을
/// 만든다. 차트 렌더링 측이 점 순서에 의존하므로 순서는 관측 가능한 계약이다.
pub fn generate_grid() -> Vec<MollierPoint> {
    let mut points = Vec::with_capacity(100);
    for t in (GRID_T_MIN_C..=GRID_T_MAX_C).step_by(GRID_T_STEP_C as usize) {
        for rh in (GRID_RH_MIN_PCT..=GRID_RH_MAX_PCT).step_by(GRID_RH_STEP_PCT as usize) {
            let state = humid_air::humidity_ratio_from_rh(t as f64, rh as f64);
            points.push(MollierPoint {
                temperature_c: t as f64,
                relative_humidity_pct: rh as f64,
                humidity_ratio: round4(state.humidity_ratio),
            });
        }
    }
    points
}

/// 프로세스 수명 동안 공유되는 격자 싱글턴. 최초 접근 시 1회 생성되고
/// 이후에는 읽기 전용이다.
pub fn mollier_grid() -> &'static [MollierPoint] {
    static GRID: OnceLock<Vec<MollierPoint>> = OnceLock::new();
    GRID.get_or_init(generate_grid)
}
