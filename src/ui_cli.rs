use std::io::{self, Write};

use crate::air::{humid_air, mollier};
use crate::app::AppError;
use crate::config::Config;
use crate::cooling::coil_load::{self, CoilLoadInput};
use crate::i18n::{keys, Translator};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    MollierTable,
    PointQuery,
    CoilLoad,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_MOLLIER_TABLE));
    println!("{}", tr.t(keys::MAIN_MENU_POINT_QUERY));
    println!("{}", tr.t(keys::MAIN_MENU_COIL_LOAD));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::MollierTable),
            "2" => return Ok(MenuChoice::PointQuery),
            "3" => return Ok(MenuChoice::CoilLoad),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// Mollier 격자표 메뉴를 처리한다.
pub fn handle_mollier_table(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::MOLLIER_TABLE_HEADING));
    println!("{}", tr.t(keys::MOLLIER_TABLE_NOTE));
    println!("{}", tr.t(keys::MOLLIER_TABLE_HEADER));
    for point in mollier::mollier_grid() {
        println!(
            "{:>7.1} {:>7.0} {:>10.4}",
            point.temperature_c, point.relative_humidity_pct, point.humidity_ratio
        );
    }
    Ok(())
}

/// 습공기 상태점 조회 메뉴를 처리한다.
pub fn handle_point_query(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::POINT_QUERY_HEADING));
    let t = read_f64(tr, tr.t(keys::PROMPT_DRY_BULB))?;
    let rh = read_f64(tr, tr.t(keys::PROMPT_RELATIVE_HUMIDITY))?;
    let state = humid_air::humidity_ratio_from_rh(t, rh);
    let dew_point = humid_air::dew_point_c(t, rh);
    let enthalpy = humid_air::moist_air_enthalpy_kj_per_kg(t, state.humidity_ratio);
    println!(
        "{} {:.2} hPa",
        tr.t(keys::RESULT_SATURATION_PRESSURE),
        state.saturation_pressure_hpa
    );
    println!(
        "{} {:.2} hPa",
        tr.t(keys::RESULT_VAPOR_PRESSURE),
        state.vapor_pressure_hpa
    );
    println!(
        "{} {:.4} kg/kg",
        tr.t(keys::RESULT_HUMIDITY_RATIO),
        state.humidity_ratio
    );
    println!("{} {:.2} °C", tr.t(keys::RESULT_DEW_POINT), dew_point);
    println!("{} {:.2} kJ/kg", tr.t(keys::RESULT_ENTHALPY), enthalpy);
    Ok(())
}

/// 코일 부하 계산 메뉴를 처리한다. 기본값은 설정에서 가져온다.
pub fn handle_coil_load(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::COIL_LOAD_HEADING));
    println!("{}", tr.t(keys::COIL_LOAD_NOTE));
    let defaults = cfg.default_load;
    let airflow = read_f64_or(tr, tr.t(keys::PROMPT_AIRFLOW), defaults.airflow_m3_per_h)?;
    let delta_t = read_f64_or(tr, tr.t(keys::PROMPT_DELTA_T), defaults.delta_t_k)?;
    let delta_x = read_f64_or(tr, tr.t(keys::PROMPT_DELTA_X), defaults.delta_x_kg_per_kg)?;
    let result = coil_load::compute_coil_load(CoilLoadInput {
        airflow_m3_per_h: airflow,
        delta_t_k: delta_t,
        delta_x_kg_per_kg: delta_x,
    });
    println!(
        "{} {:.4} kg/s ({:.4} m³/s)",
        tr.t(keys::RESULT_MASS_FLOW),
        result.mass_flow_kg_per_s,
        result.volume_flow_m3_per_s
    );
    println!("{} {:.2} kW", tr.t(keys::RESULT_SENSIBLE), result.sensible_kw);
    println!("{} {:.2} kW", tr.t(keys::RESULT_LATENT), result.latent_kw);
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    if sel.trim().is_empty() {
        return Ok(());
    }
    match sel.trim() {
        "1" => cfg.language = "ko-kr".into(),
        "2" => cfg.language = "en-us".into(),
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(());
        }
    }
    println!("{} {}", tr.t(keys::SETTINGS_SAVED), cfg.language);
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// 빈 입력이면 기본값을 쓰는 숫자 입력. 프롬프트에 기본값을 함께 보여준다.
fn read_f64_or(tr: &Translator, prompt: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(&format!("{prompt}[{default}] "))?;
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(default);
        }
        match trimmed.parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
