use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;
use video_contact_sheet::component::ContactSheetGenerator;
use video_contact_sheet::config::Config;
use video_contact_sheet::init;
use video_contact_sheet::tools::derive_output_path;

/// 從影片均勻擷取畫面並合併成一張預覽圖
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// 影片檔案路徑
    video: PathBuf,
    /// 縮圖數量（預設 32）
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
    count: Option<u64>,
    /// 每列縮圖數量（預設 4）
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    row_size: Option<u64>,
    /// 縮圖長邊像素（預設 320）
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    size: Option<u32>,
    /// 不顯示進度訊息
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
    /// 輸出檔名，未指定時以影片檔名替換副檔名
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// 設定檔路徑（JSON）
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    init::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("{} {:#}", style("錯誤:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = Config::new(cli.config.as_deref())?;
    let count = cli
        .count
        .map(usize::try_from)
        .transpose()
        .context("縮圖數量過大")?;
    let row_size = cli
        .row_size
        .map(usize::try_from)
        .transpose()
        .context("每列縮圖數量過大")?;
    config.settings.apply_overrides(count, row_size, cli.size);
    config.settings.validate()?;

    let output_path = derive_output_path(
        &cli.video,
        cli.output.as_deref(),
        &config.settings.output_extension,
    );

    if !cli.quiet {
        println!("{}", style("=== 影片預覽圖生成 ===").cyan().bold());
        println!(
            "  {} -> {}",
            style(cli.video.display()).bold(),
            output_path.display()
        );
    }

    let generator = ContactSheetGenerator::new(config.settings, cli.quiet);
    let result = generator.run(&cli.video, &output_path)?;

    if !cli.quiet {
        println!();
        println!(
            "{} {} ({} 張縮圖, {}x{})",
            style("預覽圖已建立:").green().bold(),
            result.output_path.display(),
            result.sampled,
            result.width,
            result.height
        );
    }
    info!("Program exited normally");

    Ok(())
}
