//! 코일 현열/잠열 부하 계산 회귀 테스트.
use hvac_mollier_toolbox::cooling::coil_load::{compute_coil_load, CoilLoadInput};

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[test]
fn reference_case_1000m3h_10k_5g() {
    let res = compute_coil_load(CoilLoadInput {
        airflow_m3_per_h: 1000.0,
        delta_t_k: 10.0,
        delta_x_kg_per_kg: 0.005,
    });
    assert!((res.volume_flow_m3_per_s - 0.2778).abs() < 1e-4);
    assert!((res.mass_flow_kg_per_s - 0.3333).abs() < 1e-4);
    assert!((round2(res.sensible_kw) - 3.35).abs() < 1e-9, "sensible={}", res.sensible_kw);
    assert!((round2(res.latent_kw) - 4.17).abs() < 1e-9, "latent={}", res.latent_kw);
}

#[test]
fn zero_deltas_give_zero_power_for_any_airflow() {
    for airflow in [0.0, 1.0, 1000.0, 250_000.0, -500.0] {
        let res = compute_coil_load(CoilLoadInput {
            airflow_m3_per_h: airflow,
            delta_t_k: 0.0,
            delta_x_kg_per_kg: 0.0,
        });
        assert_eq!(res.sensible_kw, 0.0, "airflow={airflow}");
        assert_eq!(res.latent_kw, 0.0, "airflow={airflow}");
    }
}

#[test]
fn sensible_is_odd_in_delta_t() {
    let base = CoilLoadInput {
        airflow_m3_per_h: 1800.0,
        delta_t_k: 6.5,
        delta_x_kg_per_kg: 0.002,
    };
    let pos = compute_coil_load(base);
    let neg = compute_coil_load(CoilLoadInput {
        delta_t_k: -base.delta_t_k,
        ..base
    });
    assert!((neg.sensible_kw + pos.sensible_kw).abs() < 1e-12);
    assert_eq!(neg.latent_kw, pos.latent_kw);
    assert_eq!(neg.mass_flow_kg_per_s, pos.mass_flow_kg_per_s);
}

#[test]
fn latent_is_odd_in_delta_x() {
    let base = CoilLoadInput {
        airflow_m3_per_h: 1800.0,
        delta_t_k: 6.5,
        delta_x_kg_per_kg: 0.002,
    };
    let pos = compute_coil_load(base);
    let neg = compute_coil_load(CoilLoadInput {
        delta_x_kg_per_kg: -base.delta_x_kg_per_kg,
        ..base
    });
    assert!((neg.latent_kw + pos.latent_kw).abs() < 1e-12);
    assert_eq!(neg.sensible_kw, pos.sensible_kw);
}

#[test]
fn non_finite_inputs_propagate() {
    let res = compute_coil_load(CoilLoadInput {
        airflow_m3_per_h: f64::NAN,
        delta_t_k: 10.0,
        delta_x_kg_per_kg: 0.005,
    });
    assert!(res.mass_flow_kg_per_s.is_nan());
    assert!(res.sensible_kw.is_nan());
    assert!(res.latent_kw.is_nan());

    let res = compute_coil_load(CoilLoadInput {
        airflow_m3_per_h: 1000.0,
        delta_t_k: f64::INFINITY,
        delta_x_kg_per_kg: 0.005,
    });
    assert!(res.sensible_kw.is_infinite() && res.sensible_kw > 0.0);
    assert!(res.latent_kw.is_finite());
}
