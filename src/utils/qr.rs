//! 签到二维码渲染

use qrcode::QrCode;
use qrcode::render::svg;

use crate::errors::PortalError;

/// 把签到地址编码为 SVG 二维码
pub fn render_svg(payload: &str, size: u32) -> Result<String, PortalError> {
    let code = QrCode::new(payload.as_bytes())
        .map_err(|e| PortalError::qr_code(format!("二维码编码失败: {e}")))?;
    Ok(code
        .render::<svg::Color>()
        .min_dimensions(size, size)
        .quiet_zone(true)
        .build())
}

/// 签到地址：前缀 + 签到码
pub fn checkin_url(base_url: &str, code: &str) -> String {
    format!("{base_url}{code}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_svg() {
        let svg = render_svg("/attendance/checkin?code=abc123", 128).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_checkin_url() {
        assert_eq!(
            checkin_url("/attendance/checkin?code=", "XYZ"),
            "/attendance/checkin?code=XYZ"
        );
    }
}
