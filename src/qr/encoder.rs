//! QR code encoder

use crate::error::{Error, Result};
use crate::qr::{QrRequest, QrStyle};
use image::{Rgb, RgbImage, imageops};
use qrcode::types::QrError;
use qrcode::{QrCode, Version};

const MAX_VERSION: i16 = 40;

/// QR code encoder
#[derive(Debug, Clone, Default)]
pub struct QrEncoder {
    style: QrStyle,
}

impl QrEncoder {
    /// Create a new QR encoder with the given rendering style
    pub fn new(style: QrStyle) -> Self {
        Self { style }
    }

    /// The style applied to every image
    pub fn style(&self) -> &QrStyle {
        &self.style
    }

    /// Build the symbol, growing the version until the data fits
    pub fn symbol(&self, request: &QrRequest) -> Result<QrCode> {
        for version in self.style.min_version.max(1)..=MAX_VERSION {
            let attempt = QrCode::with_version(
                request.as_bytes(),
                Version::Normal(version),
                self.style.ec_level,
            );
            match attempt {
                Ok(code) => return Ok(code),
                Err(QrError::DataTooLong) => continue,
                Err(e) => {
                    return Err(Error::QrEncode(format!(
                        "Failed to create QR code at version {version}: {e}"
                    )));
                }
            }
        }

        Err(Error::QrEncode(format!(
            "{} bytes do not fit in a version {MAX_VERSION} symbol",
            request.as_bytes().len()
        )))
    }

    /// Encode a request into an RGB image surrounded by the configured border
    pub fn encode(&self, request: &QrRequest) -> Result<RgbImage> {
        let code = self.symbol(request)?;
        let style = &self.style;

        let modules = code
            .render::<Rgb<u8>>()
            .quiet_zone(false)
            .module_dimensions(style.box_size, style.box_size)
            .dark_color(style.foreground)
            .light_color(style.background)
            .build();

        let side = style.image_side(code.width() as u32);
        let offset = i64::from(style.border * style.box_size);
        let mut canvas = RgbImage::from_pixel(side, side, style.background);
        imageops::replace(&mut canvas, &modules, offset, offset);

        tracing::debug!(
            version = ?code.version(),
            modules = code.width(),
            side,
            "Encoded QR symbol"
        );

        Ok(canvas)
    }

    /// Encode a string into a QR code image
    pub fn encode_string(&self, data: &str) -> Result<RgbImage> {
        self.encode(&QrRequest::new(data))
    }
}
