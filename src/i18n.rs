use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_MOLLIER_TABLE: &str = "main_menu.mollier_table";
    pub const MAIN_MENU_POINT_QUERY: &str = "main_menu.point_query";
    pub const MAIN_MENU_COIL_LOAD: &str = "main_menu.coil_load";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const MOLLIER_TABLE_HEADING: &str = "mollier_table.heading";
    pub const MOLLIER_TABLE_NOTE: &str = "mollier_table.note";
    pub const MOLLIER_TABLE_HEADER: &str = "mollier_table.header";

    pub const POINT_QUERY_HEADING: &str = "point_query.heading";
    pub const PROMPT_DRY_BULB: &str = "prompt.dry_bulb";
    pub const PROMPT_RELATIVE_HUMIDITY: &str = "prompt.relative_humidity";
    pub const RESULT_SATURATION_PRESSURE: &str = "result.saturation_pressure";
    pub const RESULT_VAPOR_PRESSURE: &str = "result.vapor_pressure";
    pub const RESULT_HUMIDITY_RATIO: &str = "result.humidity_ratio";
    pub const RESULT_DEW_POINT: &str = "result.dew_point";
    pub const RESULT_ENTHALPY: &str = "result.enthalpy";

    pub const COIL_LOAD_HEADING: &str = "coil_load.heading";
    pub const COIL_LOAD_NOTE: &str = "coil_load.note";
    pub const PROMPT_AIRFLOW: &str = "prompt.airflow";
    pub const PROMPT_DELTA_T: &str = "prompt.delta_t";
    pub const PROMPT_DELTA_X: &str = "prompt.delta_x";
    pub const RESULT_MASS_FLOW: &str = "result.mass_flow";
    pub const RESULT_SENSIBLE: &str = "result.sensible";
    pub const RESULT_LATENT: &str = "result.latent";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const HELP_MOLLIER_TABLE: &str = "help.mollier_table";
    pub const HELP_POINT_QUERY: &str = "help.point_query";
    pub const HELP_COIL_LOAD: &str = "help.coil_load";
    pub const HELP_SETTINGS: &str = "help.settings";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        if let Some(ref map) = self.overrides {
            if let Some(v) = map.get(key) {
                return Box::leak(v.clone().into_boxed_str());
            }
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" => Some("ko".into()),
        "ko-kr" => Some("ko-kr".into()),
        "en" => Some("en".into()),
        "en-us" => Some("en-us".into()),
        "en-uk" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    if let Ok(lang) = std::env::var("LC_ALL") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "en-us" | "en" => parse_toml_to_map(include_str!("../locales/en-us.toml")),
        "ko-kr" | "ko" => parse_toml_to_map(include_str!("../locales/ko-kr.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== HVAC Mollier Toolbox ===",
        MAIN_MENU_MOLLIER_TABLE => "1) Mollier 격자표",
        MAIN_MENU_POINT_QUERY => "2) 습공기 상태점 조회",
        MAIN_MENU_COIL_LOAD => "3) 코일 현열/잠열 부하",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        MOLLIER_TABLE_HEADING => "\n-- Mollier 격자표 --",
        MOLLIER_TABLE_NOTE => "참고: 온도 -10~50°C(5°C 간격), 상대습도 10~100%(10% 간격), 습도비는 소수 4자리.",
        MOLLIER_TABLE_HEADER => "  T[°C]   RH[%]   W[kg/kg]",
        POINT_QUERY_HEADING => "\n-- 습공기 상태점 조회 --",
        PROMPT_DRY_BULB => "건구 온도 [°C]: ",
        PROMPT_RELATIVE_HUMIDITY => "상대습도 [%]: ",
        RESULT_SATURATION_PRESSURE => "포화 수증기압:",
        RESULT_VAPOR_PRESSURE => "수증기 분압:",
        RESULT_HUMIDITY_RATIO => "습도비:",
        RESULT_DEW_POINT => "노점 온도:",
        RESULT_ENTHALPY => "비엔탈피:",
        COIL_LOAD_HEADING => "\n-- 코일 현열/잠열 부하 --",
        COIL_LOAD_NOTE => "참고: ΔT/ΔX가 음수면 가열/가습 방향이며 결과 부호가 그대로 따라갑니다.",
        PROMPT_AIRFLOW => "풍량 [m³/h]: ",
        PROMPT_DELTA_T => "온도차 ΔT [K]: ",
        PROMPT_DELTA_X => "습도비차 ΔX [kg/kg]: ",
        RESULT_MASS_FLOW => "질량 유량:",
        RESULT_SENSIBLE => "현열:",
        RESULT_LATENT => "잠열:",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_OPTIONS => "1) 한국어  2) English",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "언어가 변경되었습니다:",
        HELP_MOLLIER_TABLE => "도움말: 고정 격자(10×10)를 온도 오름차순, 상대습도 오름차순으로 출력합니다.",
        HELP_POINT_QUERY => "도움말: 건구 온도와 상대습도 입력 → Magnus 근사로 포화압/분압/습도비/노점/비엔탈피 계산.",
        HELP_COIL_LOAD => "도움말: 풍량[m³/h], ΔT[K], ΔX[kg/kg] 입력 → 현열/잠열[kW] 계산 (ρ=1.2, cp=1.005, r=2500).",
        HELP_SETTINGS => "도움말: CLI 언어를 변경하고 config.toml에 저장합니다.",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== HVAC Mollier Toolbox ===",
        MAIN_MENU_MOLLIER_TABLE => "1) Mollier grid table",
        MAIN_MENU_POINT_QUERY => "2) Humid-air state query",
        MAIN_MENU_COIL_LOAD => "3) Coil sensible/latent load",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        MOLLIER_TABLE_HEADING => "\n-- Mollier Grid Table --",
        MOLLIER_TABLE_NOTE => "Note: T -10..50°C step 5, RH 10..100% step 10, humidity ratio rounded to 4 decimals.",
        MOLLIER_TABLE_HEADER => "  T[°C]   RH[%]   W[kg/kg]",
        POINT_QUERY_HEADING => "\n-- Humid-Air State Query --",
        PROMPT_DRY_BULB => "Dry-bulb temperature [°C]: ",
        PROMPT_RELATIVE_HUMIDITY => "Relative humidity [%]: ",
        RESULT_SATURATION_PRESSURE => "Saturation vapor pressure:",
        RESULT_VAPOR_PRESSURE => "Vapor partial pressure:",
        RESULT_HUMIDITY_RATIO => "Humidity ratio:",
        RESULT_DEW_POINT => "Dew point:",
        RESULT_ENTHALPY => "Specific enthalpy:",
        COIL_LOAD_HEADING => "\n-- Coil Sensible/Latent Load --",
        COIL_LOAD_NOTE => "Note: negative ΔT/ΔX means heating/humidification; results keep the sign.",
        PROMPT_AIRFLOW => "Airflow [m³/h]: ",
        PROMPT_DELTA_T => "Temperature difference ΔT [K]: ",
        PROMPT_DELTA_X => "Humidity-ratio difference ΔX [kg/kg]: ",
        RESULT_MASS_FLOW => "Mass flow:",
        RESULT_SENSIBLE => "Sensible:",
        RESULT_LATENT => "Latent:",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_OPTIONS => "1) Korean  2) English",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; language unchanged.",
        SETTINGS_SAVED => "Language changed to:",
        HELP_MOLLIER_TABLE => "Help: prints the fixed 10x10 grid, temperature ascending then relative humidity ascending.",
        HELP_POINT_QUERY => "Help: dry-bulb + RH -> Magnus saturation/partial pressure, humidity ratio, dew point, enthalpy.",
        HELP_COIL_LOAD => "Help: airflow [m³/h], ΔT [K], ΔX [kg/kg] -> sensible/latent [kW] (ρ=1.2, cp=1.005, r=2500).",
        HELP_SETTINGS => "Help: change the CLI language and save it to config.toml.",
        _ => return None,
    })
}
