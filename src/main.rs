use clap::Parser;
use hvac_mollier_toolbox::{app, config, i18n};

/// CLI 실행 옵션.
#[derive(Debug, Parser)]
#[command(name = "hvac_mollier_toolbox_cli", about = "Mollier diagram & coil load CLI")]
struct Cli {
    /// 언어 코드 (auto/ko/ko-kr/en/en-us)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
    /// 언어팩 디렉터리 (기본 locales/)
    #[arg(long)]
    lang_pack_dir: Option<String>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_default()?;
    let lang_code = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let pack_dir = cli
        .lang_pack_dir
        .as_deref()
        .or(cfg.language_pack_dir.as_deref());
    let tr = i18n::Translator::new_with_pack(&lang_code, pack_dir);
    app::run(&mut cfg, &tr)?;
    Ok(())
}
