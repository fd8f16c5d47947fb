// src/qr.rs - 用 qrcode crate 生成 UTF-8 块字符二维码

use crate::config::Config;
use anyhow::Result;
use qrcode::render::unicode;
use qrcode::QrCode;

/// 把二维码文本渲染成终端可显示的块字符图
pub fn render(payload: &str, cfg: &Config) -> Result<String> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), cfg.ec_level()?)?;
    let image = code
        .render::<unicode::Dense1x2>()
        .quiet_zone(cfg.quiet_zone)
        .build();

    let pad = " ".repeat(cfg.indent);
    let padded = image
        .lines()
        .map(|l| format!("{pad}{l}"))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(padded)
}
