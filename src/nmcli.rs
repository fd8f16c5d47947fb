// src/nmcli.rs - 通过 nmcli 读取已保存的 Wi-Fi 配置与密钥

use crate::config::Config;
use crate::error::EncodeError;
use crate::types::{CredentialRecord, SavedConnection, Security};
use anyhow::{anyhow, Context, Result};
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

const WIRELESS_TYPE: &str = "802-11-wireless";

const SSID_FIELD: &str = "802-11-wireless.ssid";
const KEY_MGMT_FIELD: &str = "802-11-wireless-security.key-mgmt";
const PSK_FIELD: &str = "802-11-wireless-security.psk";
const WEP_KEY_FIELD: &str = "802-11-wireless-security.wep-key0";
const WEP_KEY_TYPE_FIELD: &str = "802-11-wireless-security.wep-key-type";

/// NM_WEP_KEY_TYPE_KEY：wep-key0 是原始 hex/ASCII 密钥而非口令
const WEP_KEY_TYPE_RAW: &str = "1";

// ── 调用封装 ─────────────────────────────────────────────────

/// 执行一次 nmcli，超时或退出码非零都视为失败
async fn run(args: &[&str], cfg: &Config) -> Result<Output> {
    log::debug!("nmcli {}", args.join(" "));
    let mut cmd = Command::new("nmcli");
    cmd.env("LANGUAGE", "C").args(args).kill_on_drop(true);
    let out = tokio::time::timeout(Duration::from_secs(cfg.nmcli_timeout), cmd.output())
        .await
        .map_err(|_| anyhow!("nmcli 超时（{}s）", cfg.nmcli_timeout))?
        .context("无法执行 nmcli")?;

    if !out.status.success() {
        let msg = String::from_utf8_lossy(&out.stderr)
            .lines()
            .last()
            .unwrap_or("未知错误")
            .to_string();
        return Err(anyhow!("nmcli 调用失败: {msg}"));
    }
    Ok(out)
}

// ── 查询 ─────────────────────────────────────────────────────

/// 已保存的所有 Wi-Fi connection
pub async fn saved_connections(cfg: &Config) -> Result<Vec<SavedConnection>> {
    let out = run(&["-t", "-f", "NAME,UUID,TYPE", "connection", "show"], cfg).await?;
    Ok(parse_connection_list(&String::from_utf8_lossy(&out.stdout)))
}

/// 当前活跃的 Wi-Fi connection 名称（None 表示未连接）
pub async fn active_connection(cfg: &Config) -> Option<String> {
    let out = run(
        &["-t", "-f", "NAME,UUID,TYPE", "connection", "show", "--active"],
        cfg,
    )
    .await
    .map_err(|e| log::warn!("读取活跃连接失败: {e}"))
    .ok()?;
    parse_connection_list(&String::from_utf8_lossy(&out.stdout))
        .into_iter()
        .next()
        .map(|c| c.name)
}

/// 读取某个已保存配置的凭据（需要 polkit 授权才能拿到密钥）
pub async fn connection_credentials(name: &str, cfg: &Config) -> Result<CredentialRecord> {
    let fields = [
        SSID_FIELD,
        KEY_MGMT_FIELD,
        PSK_FIELD,
        WEP_KEY_FIELD,
        WEP_KEY_TYPE_FIELD,
    ]
    .join(",");
    let out = run(
        &["-s", "-t", "-f", &fields, "connection", "show", name],
        cfg,
    )
    .await
    .with_context(|| format!("读取「{name}」失败"))?;
    parse_credentials(&String::from_utf8_lossy(&out.stdout))
        .with_context(|| format!("「{name}」的凭据不完整"))
}

// ── 解析 ─────────────────────────────────────────────────────

/// 按未转义的 ':' 切分 nmcli -t 的一行，并还原 `\:` 与 `\\`
pub fn split_terse(line: &str) -> Vec<String> {
    let mut parts = vec![];
    let mut cur = String::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    cur.push(next);
                }
            }
            ':' => parts.push(std::mem::take(&mut cur)),
            _ => cur.push(c),
        }
    }
    parts.push(cur);
    parts
}

/// 解析 NAME:UUID:TYPE 列表，只保留 Wi-Fi
pub fn parse_connection_list(text: &str) -> Vec<SavedConnection> {
    text.lines()
        .map(split_terse)
        .filter(|p| p.len() == 3 && p[2] == WIRELESS_TYPE && !p[0].is_empty())
        .map(|mut p| {
            let uuid = p.swap_remove(1);
            let name = p.swap_remove(0);
            SavedConnection { name, uuid }
        })
        .collect()
}

/// 解析 `connection show` 的字段输出为凭据
///
/// 取不到密钥时直接报错，不返回残缺的记录。
pub fn parse_credentials(text: &str) -> Result<CredentialRecord> {
    let mut ssid = None;
    let mut key_mgmt = String::new();
    let mut psk = None;
    let mut wep_key = None;
    let mut wep_key_type = String::new();

    for line in text.lines() {
        let Some((field, value)) = line.split_once(':') else {
            continue;
        };
        let value = unescape_value(value);
        match field {
            SSID_FIELD => ssid = Some(value),
            KEY_MGMT_FIELD => key_mgmt = value,
            PSK_FIELD => psk = secret(value),
            WEP_KEY_FIELD => wep_key = secret(value),
            // 可能是 "1" 或 "1 (key)"
            WEP_KEY_TYPE_FIELD => {
                wep_key_type = value.split_whitespace().next().unwrap_or("").to_string()
            }
            _ => {}
        }
    }

    let ssid = ssid
        .filter(|s| !s.is_empty())
        .ok_or_else(|| EncodeError::invalid("配置中没有 SSID"))?;

    let (security, key) = match key_mgmt.trim() {
        "" => (Security::Open, None),
        "none" => (Security::Wep, wep_key),
        "wpa-psk" => (Security::Wpa, psk),
        other => return Err(EncodeError::UnsupportedSecurityType(other.to_string()).into()),
    };

    if security == Security::Wep && wep_key_type == WEP_KEY_TYPE_RAW {
        return Err(anyhow!(
            "{ssid} 保存的是原始 WEP 密钥（wep-key-type=1），只支持口令类型的 WEP"
        ));
    }

    if security.needs_password() && key.is_none() {
        return Err(anyhow!("无法读取 {ssid} 的密钥（可能需要授权）"));
    }

    log::debug!("{ssid}: 加密类型 {security}");
    Ok(CredentialRecord::new(ssid, security, key))
}

fn unescape_value(value: &str) -> String {
    split_terse(value).join(":")
}

/// 空值或被隐藏的密钥视为缺失
fn secret(value: String) -> Option<String> {
    if value.is_empty() || value == "<hidden>" {
        None
    } else {
        Some(value)
    }
}
