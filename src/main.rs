// src/main.rs - 主入口

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser, Subcommand};
use nm_wifi_barcode::config::Config;
use nm_wifi_barcode::{barcode, nmcli, qr, CredentialRecord, Security};
use std::io::Write;
use std::path::PathBuf;

// ════════════════════════════════════════════════════════════════
// CLI 参数
// ════════════════════════════════════════════════════════════════

#[derive(Parser)]
#[command(name = "nm-wifi-barcode", about = "生成扫码即连的 Wi-Fi 二维码", version)]
struct Cli {
    /// 日志详细程度（-v info，-vv debug）
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// 指定配置文件，不再自动查找
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// 列出 NetworkManager 中已保存的 Wi-Fi
    List {
        /// 以 JSON 输出
        #[arg(long)]
        json: bool,
    },
    /// 为已保存的 Wi-Fi 生成二维码（默认当前连接）
    Show {
        /// connection 名称
        name: Option<String>,
        /// 只输出二维码文本
        #[arg(long)]
        raw: bool,
    },
    /// 直接用给定凭据生成二维码
    Encode {
        #[arg(short, long)]
        ssid: String,
        /// open / wep / wpa，省略时有密码即为 wpa
        #[arg(short = 't', long)]
        security: Option<String>,
        #[arg(short, long)]
        key: Option<String>,
        /// 只输出二维码文本
        #[arg(long)]
        raw: bool,
    },
}

// ════════════════════════════════════════════════════════════════
// 入口
// ════════════════════════════════════════════════════════════════

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let cfg = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            log::warn!("配置文件无效，使用默认值: {e}");
            Config::default()
        }),
    };

    match cli.cmd {
        Cmd::List { json } => {
            let saved = nmcli::saved_connections(&cfg).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&saved)?);
            } else if saved.is_empty() {
                println!("没有已保存的 Wi-Fi 配置");
            } else {
                for c in &saved {
                    println!("{}  {}", c.uuid, c.name);
                }
            }
        }
        Cmd::Show { name, raw } => {
            let name = match name {
                Some(n) => n,
                None => nmcli::active_connection(&cfg)
                    .await
                    .ok_or_else(|| anyhow!("当前没有已连接的 Wi-Fi，请指定 connection 名称"))?,
            };
            let record = nmcli::connection_credentials(&name, &cfg).await?;
            print_record(&record, raw, &cfg)?;
        }
        Cmd::Encode {
            ssid,
            security,
            key,
            raw,
        } => {
            let security = match security {
                Some(s) => s.parse::<Security>()?,
                None if key.is_some() => Security::Wpa,
                None => Security::Open,
            };
            let record = CredentialRecord::new(ssid, security, key);
            print_record(&record, raw, &cfg)?;
        }
    }

    Ok(())
}

fn print_record(record: &CredentialRecord, raw: bool, cfg: &Config) -> Result<()> {
    let payload = barcode::encode(record)?;
    log::info!("{} ({}) 编码完成", record.ssid, record.security);
    if raw {
        println!("{payload}");
    } else {
        println!("📷 {}  [{}]", record.ssid, record.security);
        println!("{}", qr::render(&payload, cfg)?);
    }
    Ok(())
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    // RUST_LOG 优先于 -v
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            )
        })
        .try_init()
        .ok();
}
