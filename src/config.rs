// src/config.rs - 配置加载，支持文件覆盖

use anyhow::{anyhow, Result};
use qrcode::EcLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 二维码纠错等级 (L / M / Q / H)
    pub ec_level: String,
    /// 是否保留静区
    pub quiet_zone: bool,
    /// 每行前导空格数
    pub indent: usize,
    /// 单次 nmcli 调用超时（秒）
    pub nmcli_timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ec_level: "M".into(),
            quiet_zone: true,
            indent: 2,
            nmcli_timeout: 10,
        }
    }
}

impl Config {
    /// 按优先级查找并加载配置文件
    pub fn load() -> Result<Self> {
        for path in &config_candidates() {
            if path.exists() {
                log::debug!("加载配置文件 {}", path.display());
                return Self::load_from(path);
            }
        }
        Ok(Config::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&text)?;
        // 提前校验，避免渲染时才报错
        cfg.ec_level()?;
        Ok(cfg)
    }

    pub fn ec_level(&self) -> Result<EcLevel> {
        match self.ec_level.trim().to_uppercase().as_str() {
            "L" => Ok(EcLevel::L),
            "M" => Ok(EcLevel::M),
            "Q" => Ok(EcLevel::Q),
            "H" => Ok(EcLevel::H),
            other => Err(anyhow!("未知的纠错等级: {other}")),
        }
    }
}

fn config_candidates() -> Vec<PathBuf> {
    let mut v = vec![];
    // 同目录下的 config.toml
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            v.push(dir.join("config.toml"));
        }
    }
    // ~/.config/nm-wifi-barcode/config.toml
    if let Some(dir) = dirs::config_dir() {
        v.push(dir.join("nm-wifi-barcode/config.toml"));
    }
    v
}
