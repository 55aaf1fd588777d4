#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use hvac_mollier_toolbox::{
    air::{humid_air, mollier},
    config,
    cooling::coil_load::{self, CoilLoadInput},
    i18n,
};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en-us/ko-kr/ko)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        }
        i += 1;
    }

    let icon_data = load_app_icon();
    let mut viewport = egui::ViewportBuilder::default().with_transparent(true);
    if let Some(icon) = icon_data.clone() {
        viewport = viewport.with_icon(icon);
    }
    let cfg = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_default();
    if let Some(lang_cli) = cli_lang {
        let resolved = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
        app_cfg.language = resolved;
    }
    eframe::run_native(
        "HVAC Mollier Toolbox",
        cfg,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                eprintln!("Font error: {e}");
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png"];
    let path = search
        .iter()
        .find(|p| Path::new(*p).exists())
        .map(|s| s.to_string())?;
    let bytes = fs::read(&path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글을 표시하기 위해 기본 폰트를 우선 적용한다.
/// 1) assets/fonts/malgun.ttf
/// 2) Windows 시스템 폰트(맑은 고딕/굴림/바탕 등)
/// 3) 모두 실패 시 Err를 반환해 사용자 지정 폰트 로드를 유도한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    // 1) 프로젝트 내 폰트
    let asset_path = Path::new("assets/fonts/malgun.ttf");
    if asset_path.exists() {
        let bytes = fs::read(asset_path).map_err(|e| format!("Failed to read font file: {e}"))?;
        apply_font_bytes(ctx, bytes, "korean_font");
        return Ok(());
    }

    // 2) 시스템 폰트 탐색 (Windows 기준)
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        let candidates = [
            "malgun.ttf",
            "malgunsl.ttf",
            "malgunbd.ttf",
            "gulim.ttc",
            "batang.ttc",
        ];
        for cand in candidates {
            let p = fonts.join(cand);
            if p.exists() {
                let bytes = fs::read(&p)
                    .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
                apply_font_bytes(ctx, bytes, "korean_font");
                return Ok(());
            }
        }
    }

    // 3) 실패: 기본 폰트 유지, 사용자 지정 안내
    Err("Font not found. Please set a user font (.ttf/.ttc) in settings.".into())
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

/// 상대습도에 따라 점/등습도선 색을 정한다. 저습=밝은 파랑, 고습=진한 파랑.
fn color_for_rh(rh_pct: f64) -> egui::Color32 {
    let t = (((rh_pct - 10.0) / 90.0).clamp(0.0, 1.0)) as f32;
    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    egui::Color32::from_rgb(lerp(130, 25), lerp(185, 85), lerp(235, 190))
}

fn format_load_kw(value: f64) -> String {
    format!("{value:.2} kW")
}

/// 격자 전체를 CSV로 기록한다.
fn export_grid_csv(path: &Path) -> std::io::Result<()> {
    let mut out = String::from("temperature_c,relative_humidity_pct,humidity_ratio\n");
    for point in mollier::mollier_grid() {
        out.push_str(&format!(
            "{},{},{:.4}\n",
            point.temperature_c, point.relative_humidity_pct, point.humidity_ratio
        ));
    }
    fs::write(path, out)
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    lang_input: String,
    lang_pack_dir_input: String,
    lang_save_status: Option<String>,
    tab: Tab,
    window_alpha: f32,
    always_on_top: bool,
    ui_scale: f32,
    apply_initial_view_size: bool,
    show_settings_modal: bool,
    show_help_modal: bool,
    custom_font_path: String,
    font_load_error: Option<String>,
    // Mollier 차트
    show_iso_rh_lines: bool,
    export_status: Option<String>,
    // 코일 부하
    load_airflow: f64,
    load_delta_t: f64,
    load_delta_x: f64,
    load_save_status: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    MollierChart,
    CoilLoad,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        let lang_input = config.language.clone();
        let lang_pack_dir_input = config.language_pack_dir.clone().unwrap_or_default();
        let defaults = config.default_load;
        Self {
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            config,
            tr,
            lang_input,
            lang_pack_dir_input,
            lang_save_status: None,
            tab: Tab::MollierChart,
            always_on_top: false,
            ui_scale: 1.0,
            apply_initial_view_size: true,
            show_settings_modal: false,
            show_help_modal: false,
            custom_font_path: String::new(),
            font_load_error: None,
            show_iso_rh_lines: true,
            export_status: None,
            load_airflow: defaults.airflow_m3_per_h,
            load_delta_t: defaults.delta_t_k,
            load_delta_x: defaults.delta_x_kg_per_kg,
            load_save_status: None,
        }
    }

    fn mollier_chart_ui(&mut self, ui: &mut egui::Ui, txt: &impl Fn(&str, &str) -> String) {
        ui.horizontal(|ui| {
            ui.checkbox(
                &mut self.show_iso_rh_lines,
                txt("gui.chart.show_iso", "Iso-RH lines"),
            );
            if ui
                .button(txt("gui.chart.export_csv", "Export grid CSV"))
                .clicked()
            {
                if let Some(path) = FileDialog::new()
                    .set_file_name("mollier_grid.csv")
                    .save_file()
                {
                    self.export_status = Some(match export_grid_csv(&path) {
                        Ok(()) => format!(
                            "{} {}",
                            txt("gui.chart.export_done", "Saved:"),
                            path.display()
                        ),
                        Err(e) => format!("{} {e}", txt("gui.chart.export_fail", "Save failed:")),
                    });
                }
            }
            if let Some(status) = &self.export_status {
                ui.small(status.clone());
            }
        });
        ui.small(txt(
            "gui.chart.hint",
            "Hover a point for temperature, RH, humidity ratio and dew point.",
        ));
        ui.separator();

        let desired = egui::vec2(ui.available_width(), (ui.available_height() - 8.0).max(320.0));
        let (rect, response) = ui.allocate_exact_size(desired, egui::Sense::hover());
        let painter = ui.painter_at(rect);
        let visuals = ui.visuals();
        let axis_color = visuals.text_color();
        let grid_color = visuals.weak_text_color().linear_multiply(0.4);

        let points = mollier::mollier_grid();
        let t_min = mollier::GRID_T_MIN_C as f64;
        let t_max = mollier::GRID_T_MAX_C as f64;
        let w_max_raw = points
            .iter()
            .map(|p| p.humidity_ratio)
            .fold(f64::NEG_INFINITY, f64::max);
        // y축 상한은 0.01 단위로 올림해 눈금이 맞게 한다.
        let w_max = (w_max_raw / 0.01).ceil() * 0.01;

        let margin_left = 64.0;
        let margin_bottom = 36.0;
        let margin_top = 12.0;
        let margin_right = 16.0;
        let plot = egui::Rect::from_min_max(
            egui::pos2(rect.left() + margin_left, rect.top() + margin_top),
            egui::pos2(rect.right() - margin_right, rect.bottom() - margin_bottom),
        );

        let to_screen = |t_c: f64, w: f64| -> egui::Pos2 {
            let fx = ((t_c - t_min) / (t_max - t_min)) as f32;
            let fy = (w / w_max) as f32;
            egui::pos2(
                plot.left() + fx * plot.width(),
                plot.bottom() - fy * plot.height(),
            )
        };

        // 축
        painter.line_segment(
            [plot.left_bottom(), plot.right_bottom()],
            egui::Stroke::new(1.0, axis_color),
        );
        painter.line_segment(
            [plot.left_bottom(), plot.left_top()],
            egui::Stroke::new(1.0, axis_color),
        );

        // x 눈금: 10°C 간격
        let mut t_tick = t_min;
        while t_tick <= t_max + 1e-9 {
            let pos = to_screen(t_tick, 0.0);
            painter.line_segment(
                [pos, egui::pos2(pos.x, plot.top())],
                egui::Stroke::new(0.5, grid_color),
            );
            painter.text(
                egui::pos2(pos.x, plot.bottom() + 4.0),
                egui::Align2::CENTER_TOP,
                format!("{t_tick:.0}"),
                egui::FontId::proportional(11.0),
                axis_color,
            );
            t_tick += 10.0;
        }
        painter.text(
            egui::pos2(plot.center().x, rect.bottom() - 4.0),
            egui::Align2::CENTER_BOTTOM,
            txt("gui.chart.x_label", "Temperature [°C]"),
            egui::FontId::proportional(12.0),
            axis_color,
        );

        // y 눈금: 0.01 kg/kg 간격
        let mut w_tick = 0.0;
        while w_tick <= w_max + 1e-9 {
            let pos = to_screen(t_min, w_tick);
            painter.line_segment(
                [pos, egui::pos2(plot.right(), pos.y)],
                egui::Stroke::new(0.5, grid_color),
            );
            painter.text(
                egui::pos2(plot.left() - 6.0, pos.y),
                egui::Align2::RIGHT_CENTER,
                format!("{w_tick:.2}"),
                egui::FontId::proportional(11.0),
                axis_color,
            );
            w_tick += 0.01;
        }
        painter.text(
            egui::pos2(rect.left() + 4.0, plot.top() - 2.0),
            egui::Align2::LEFT_BOTTOM,
            txt("gui.chart.y_label", "W [kg/kg]"),
            egui::FontId::proportional(12.0),
            axis_color,
        );

        // 등습도선: 같은 RH의 점을 온도 순서로 연결 (격자 순서가 온도 외측이므로
        // RH별로 모아서 그린다)
        if self.show_iso_rh_lines {
            let mut rh = mollier::GRID_RH_MIN_PCT;
            while rh <= mollier::GRID_RH_MAX_PCT {
                let line: Vec<egui::Pos2> = points
                    .iter()
                    .filter(|p| (p.relative_humidity_pct - rh as f64).abs() < 1e-9)
                    .map(|p| to_screen(p.temperature_c, p.humidity_ratio))
                    .collect();
                painter.add(egui::Shape::line(
                    line,
                    egui::Stroke::new(1.0, color_for_rh(rh as f64).linear_multiply(0.55)),
                ));
                rh += mollier::GRID_RH_STEP_PCT;
            }
        }

        // 산점도
        for point in points {
            painter.circle_filled(
                to_screen(point.temperature_c, point.humidity_ratio),
                2.5,
                color_for_rh(point.relative_humidity_pct),
            );
        }

        // 호버 툴팁: 화면 거리 기준 최근접 점
        if let Some(hover) = response.hover_pos() {
            let nearest = points
                .iter()
                .map(|p| {
                    let d = to_screen(p.temperature_c, p.humidity_ratio).distance(hover);
                    (p, d)
                })
                .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
            if let Some((point, dist)) = nearest {
                if dist < 12.0 {
                    painter.circle_stroke(
                        to_screen(point.temperature_c, point.humidity_ratio),
                        5.0,
                        egui::Stroke::new(1.5, axis_color),
                    );
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        egui::Id::new("mollier_point_tip"),
                        |ui| {
                            ui.label(format!("T = {:.1} °C", point.temperature_c));
                            ui.label(format!("RH = {:.0} %", point.relative_humidity_pct));
                            ui.label(format!("W = {:.4} kg/kg", point.humidity_ratio));
                            ui.label(format!(
                                "Td = {:.1} °C",
                                humid_air::dew_point_c(
                                    point.temperature_c,
                                    point.relative_humidity_pct
                                )
                            ));
                        },
                    );
                }
            }
        }
    }

    fn coil_load_ui(&mut self, ui: &mut egui::Ui, txt: &impl Fn(&str, &str) -> String) {
        ui.heading(txt("gui.load.heading", "Coil sensible/latent load"));
        ui.small(txt(
            "gui.load.note",
            "Negative ΔT/ΔX means heating/humidification; results keep the sign.",
        ));
        ui.separator();

        egui::Grid::new("coil_load_inputs")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label(txt("gui.load.airflow", "Airflow"));
                ui.add(
                    egui::DragValue::new(&mut self.load_airflow)
                        .speed(10.0)
                        .suffix(" m³/h"),
                );
                ui.end_row();
                ui.label(txt("gui.load.delta_t", "ΔT"));
                ui.add(
                    egui::DragValue::new(&mut self.load_delta_t)
                        .speed(0.1)
                        .suffix(" K"),
                );
                ui.end_row();
                ui.label(txt("gui.load.delta_x", "ΔX"));
                ui.add(
                    egui::DragValue::new(&mut self.load_delta_x)
                        .speed(0.0005)
                        .max_decimals(4)
                        .suffix(" kg/kg"),
                );
                ui.end_row();
            });

        // 입력이 바뀔 때마다 매 프레임 재계산한다. 계산 비용이 미미해 캐시는 없다.
        let result = coil_load::compute_coil_load(CoilLoadInput {
            airflow_m3_per_h: self.load_airflow,
            delta_t_k: self.load_delta_t,
            delta_x_kg_per_kg: self.load_delta_x,
        });

        ui.separator();
        ui.label(format!(
            "{} {:.4} kg/s ({:.4} m³/s)",
            txt("gui.load.mass_flow", "Mass flow:"),
            result.mass_flow_kg_per_s,
            result.volume_flow_m3_per_s
        ));
        ui.label(
            egui::RichText::new(format!(
                "{} {}",
                txt("gui.load.sensible", "Sensible:"),
                format_load_kw(result.sensible_kw)
            ))
            .color(egui::Color32::from_rgb(40, 160, 70))
            .strong(),
        );
        ui.label(
            egui::RichText::new(format!(
                "{} {}",
                txt("gui.load.latent", "Latent:"),
                format_load_kw(result.latent_kw)
            ))
            .color(egui::Color32::from_rgb(60, 110, 220))
            .strong(),
        );

        ui.separator();
        ui.horizontal(|ui| {
            if ui
                .button(txt("gui.load.save_defaults", "Save as defaults"))
                .clicked()
            {
                self.config.default_load.airflow_m3_per_h = self.load_airflow;
                self.config.default_load.delta_t_k = self.load_delta_t;
                self.config.default_load.delta_x_kg_per_kg = self.load_delta_x;
                self.load_save_status = Some(match self.config.save() {
                    Ok(()) => txt("gui.load.saved", "Defaults saved to config.toml."),
                    Err(e) => format!("{e}"),
                });
            }
            if let Some(status) = &self.load_save_status {
                ui.small(status.clone());
            }
        });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 최초 1회 화면 크기 조정
        if self.apply_initial_view_size {
            if let Some(screen) = ctx.input(|i| {
                let r = i.screen_rect();
                if r.is_positive() {
                    Some(r.size())
                } else {
                    None
                }
            }) {
                let target = egui::vec2((screen.x * 0.55).max(900.0), (screen.y * 0.6).max(620.0));
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(target));
                self.apply_initial_view_size = false;
            }
        }

        ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(if self.always_on_top {
            egui::WindowLevel::AlwaysOnTop
        } else {
            egui::WindowLevel::Normal
        }));

        // 투명도 적용 + 라벨 복사 방지 스타일
        let mut style = (*ctx.style()).clone();
        style.interaction.selectable_labels = false;
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        let tr = self.tr.clone();
        let txt =
            move |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(txt("gui.nav.app_title", "HVAC Mollier Toolbox"));
                ui.label(" | Desktop GUI");
                ui.separator();
                ui.selectable_value(
                    &mut self.tab,
                    Tab::MollierChart,
                    txt("gui.tab.mollier", "Mollier chart"),
                );
                ui.selectable_value(
                    &mut self.tab,
                    Tab::CoilLoad,
                    txt("gui.tab.coil_load", "Coil load"),
                );
                ui.separator();
                if ui.button(txt("gui.settings.title", "Settings")).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(txt("gui.about.title", "Help / About")).clicked() {
                    self.show_help_modal = true;
                }
            });
        });

        // 설정 모달
        if self.show_settings_modal {
            let mut keep_open = self.show_settings_modal;
            egui::Window::new(txt("gui.settings.title", "Program Settings"))
                .collapsible(false)
                .resizable(true)
                .open(&mut keep_open)
                .show(ctx, |ui| {
                    ui.heading(txt("gui.settings.general", "General"));
                    ui.separator();
                    ui.label(txt("gui.settings.ui_scale", "UI scale"));
                    if ui
                        .add(egui::Slider::new(&mut self.ui_scale, 0.8..=1.6).suffix(" x"))
                        .changed()
                    {
                        ctx.set_pixels_per_point(self.ui_scale);
                    }
                    ui.separator();
                    ui.checkbox(
                        &mut self.always_on_top,
                        txt("gui.settings.always_on_top", "Always on top"),
                    );
                    ui.separator();
                    ui.label(txt("gui.settings.alpha", "Window transparency"));
                    ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));

                    ui.separator();
                    ui.label(txt("gui.settings.lang", "Language"));
                    egui::ComboBox::from_id_source("lang_choice")
                        .selected_text(&self.lang_input)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(
                                &mut self.lang_input,
                                "auto".into(),
                                txt("gui.settings.lang.auto", "System"),
                            );
                            ui.selectable_value(
                                &mut self.lang_input,
                                "en-us".into(),
                                "English (US)",
                            );
                            ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                        });
                    ui.horizontal(|ui| {
                        ui.label(txt("gui.settings.pack_dir", "Language pack dir"));
                        ui.text_edit_singleline(&mut self.lang_pack_dir_input);
                    });
                    if ui
                        .button(txt("gui.settings.apply_save", "Apply & save"))
                        .clicked()
                    {
                        self.config.language = self.lang_input.clone();
                        self.config.language_pack_dir = if self.lang_pack_dir_input.is_empty() {
                            None
                        } else {
                            Some(self.lang_pack_dir_input.clone())
                        };
                        self.config.window_alpha = self.window_alpha;
                        let lang_code = i18n::resolve_language(
                            &self.config.language,
                            Some(self.config.language.as_str()),
                        );
                        self.tr = i18n::Translator::new_with_pack(
                            &lang_code,
                            self.config.language_pack_dir.as_deref(),
                        );
                        self.lang_save_status = Some(match self.config.save() {
                            Ok(()) => txt("gui.settings.saved", "Saved to config.toml."),
                            Err(e) => format!("{e}"),
                        });
                    }
                    if let Some(status) = &self.lang_save_status {
                        ui.small(status.clone());
                    }

                    ui.separator();
                    ui.label(txt("gui.settings.font_path", "Custom font (.ttf/.ttc)"));
                    ui.horizontal(|ui| {
                        ui.text_edit_singleline(&mut self.custom_font_path);
                        if ui.button(txt("gui.settings.font_load", "Load")).clicked() {
                            self.font_load_error =
                                load_custom_font(ctx, &self.custom_font_path).err();
                        }
                    });
                    if let Some(err) = &self.font_load_error {
                        ui.colored_label(egui::Color32::LIGHT_RED, err.clone());
                    }
                });
            self.show_settings_modal = keep_open;
        }

        // 도움말 모달
        if self.show_help_modal {
            let mut keep_open = self.show_help_modal;
            egui::Window::new(txt("gui.about.title", "Help / About"))
                .collapsible(false)
                .open(&mut keep_open)
                .show(ctx, |ui| {
                    ui.label(txt(
                        "gui.about.grid",
                        "Mollier grid: Pws = 6.112·exp(17.67·T/(T+243.5)) [hPa], \
                         Pw = RH/100·Pws, W = 0.622·Pw/(1013.25−Pw), rounded to 4 decimals.",
                    ));
                    ui.label(txt(
                        "gui.about.load",
                        "Coil load: m = 1.2·V/3600, sensible = m·1.005·ΔT [kW], \
                         latent = m·2500·ΔX [kW].",
                    ));
                    ui.label(txt(
                        "gui.about.limits",
                        "No clamping is applied; out-of-range inputs may produce \
                         non-finite values.",
                    ));
                });
            self.show_help_modal = keep_open;
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::MollierChart => self.mollier_chart_ui(ui, &txt),
            Tab::CoilLoad => self.coil_load_ui(ui, &txt),
        });
    }
}
