use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::{info, warn, LevelFilter};
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use omb_vision::{KernelConfig, LevelData, VisionDispatcher};

/// 對關卡執行一次視錐派發，並把輸出網格以 JSON 印到 stdout
#[derive(Parser, Debug)]
#[command(name = "omb-vision", version, about)]
struct Args {
    /// 關卡檔（.json / .yaml）
    #[arg(long)]
    level: PathBuf,

    /// 核心設定檔（.toml / .yaml / .json），未指定時使用預設值
    #[arg(long)]
    config: Option<PathBuf>,

    /// 樓層索引，未指定時使用關卡的 start_floor
    #[arg(long)]
    floor: Option<usize>,

    /// log4rs 設定檔
    #[arg(long, default_value = "log4rs.yml")]
    log_config: PathBuf,

    /// 輸出排版過的 JSON
    #[arg(long)]
    pretty: bool,
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        log4rs::init_file(path, Default::default())
            .with_context(|| format!("無法載入日誌設定 {}", path.display()))?;
        return Ok(());
    }

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S%.3f)} {h({l})} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Info))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_config)?;

    let config = match &args.config {
        Some(path) => KernelConfig::load_from_file(path)
            .with_context(|| format!("無法載入核心設定 {}", path.display()))?,
        None => KernelConfig::default(),
    };

    let level = LevelData::load_from_file(&args.level)
        .with_context(|| format!("無法載入關卡 {}", args.level.display()))?;
    let floor_index = args.floor.unwrap_or_else(|| level.start_floor_index());
    let floor = level.floor(floor_index)?;

    let colliders = floor.collider_table(config.collider_capacity);
    let agents = floor.agent_table(config.agent_capacity);
    if agents.is_empty() {
        warn!("樓層 {} 沒有任何代理人", floor_index);
    }

    let dispatcher = VisionDispatcher::new(config)?;
    let started = Instant::now();
    let grid = dispatcher.dispatch(&agents, &colliders);

    info!(
        "樓層 {}：{} 代理人 × {} 射線，{} 障礙物，被遮擋射線 {}，耗時 {:?}",
        floor_index,
        grid.agent_count(),
        grid.ray_count(),
        colliders.active().len(),
        grid.blocked_count(),
        started.elapsed()
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&grid)?
    } else {
        serde_json::to_string(&grid)?
    };
    println!("{}", json);

    Ok(())
}
