//! Combining several category icons into one picture.
//!
//! Icons are `<identifier>.jpg` files in a single asset directory. When a category maps to
//! more than one icon, the icons are scaled to the height of the first one and drawn left to
//! right on a transparent canvas, then encoded as PNG.

use std::fs;
use std::io::{Cursor, ErrorKind};
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing::debug;

use crate::ports::{AssetSource, CompositeError};

/// File extension of icon assets.
pub const ASSET_EXTENSION: &str = "jpg";

/// Icon assets stored as files in one directory.
#[derive(Debug, Clone)]
pub struct AssetDirectory {
    root: PathBuf,
}

impl AssetDirectory {
    /// Serve assets from `root`.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the assets.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path for `identifier`, built from its last path component only.
    ///
    /// Returns `None` when that component is empty or a directory reference.
    #[must_use]
    pub fn asset_path(&self, identifier: &str) -> Option<PathBuf> {
        let name = identifier.rsplit(['/', '\\']).next()?;
        if name.is_empty() || name == "." || name == ".." {
            return None;
        }
        Some(self.root.join(format!("{name}.{ASSET_EXTENSION}")))
    }
}

impl AssetSource for AssetDirectory {
    fn load(&self, identifier: &str) -> Result<Option<DynamicImage>, CompositeError> {
        let Some(path) = self.asset_path(identifier) else {
            return Ok(None);
        };
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(image::load_from_memory(&bytes)?))
    }
}

/// Split the comma separated `images` request parameter.
///
/// # Errors
///
/// Returns [`CompositeError::MissingParameter`] when the parameter is absent or empty.
pub fn parse_image_query(images: Option<&str>) -> Result<Vec<String>, CompositeError> {
    match images {
        Some(raw) if !raw.is_empty() => Ok(raw.split(',').map(str::to_owned).collect()),
        _ => Err(CompositeError::MissingParameter),
    }
}

/// Draw the assets of `identifiers` side by side and encode the result as PNG.
///
/// Identifiers without an asset are skipped. A single remaining asset is re-encoded as is.
///
/// # Errors
///
/// Returns [`CompositeError::NoAssets`] when no identifier has an asset and
/// [`CompositeError::Internal`] when loading or encoding fails.
pub fn composite<I, S>(identifiers: &[I], source: &S) -> Result<Vec<u8>, CompositeError>
where
    I: AsRef<str>,
    S: AssetSource + ?Sized,
{
    let mut images = Vec::with_capacity(identifiers.len());
    for identifier in identifiers {
        let identifier = identifier.as_ref();
        if let Some(image) = source.load(identifier)? {
            images.push(image);
        } else {
            debug!(identifier, "Skipping icon without asset");
        }
    }

    match images.as_slice() {
        [] => Err(CompositeError::NoAssets),
        [single] => encode_png(single),
        [first, ..] => {
            let canvas = side_by_side(first.height(), &images)?;
            encode_png(&DynamicImage::ImageRgba8(canvas))
        }
    }
}

fn side_by_side(height: u32, images: &[DynamicImage]) -> Result<RgbaImage, CompositeError> {
    let scaled = images
        .iter()
        .map(|image| scale_to_height(image, height))
        .collect::<Result<Vec<_>, _>>()?;

    let total_width = scaled
        .iter()
        .try_fold(0_u32, |width, image| width.checked_add(image.width()))
        .ok_or_else(|| CompositeError::Internal("Combined image is too wide".to_owned()))?;

    let mut canvas = RgbaImage::new(total_width, height);
    let mut x_offset = 0_i64;
    for image in &scaled {
        imageops::replace(&mut canvas, image, x_offset, 0);
        x_offset += i64::from(image.width());
    }
    Ok(canvas)
}

fn scale_to_height(image: &DynamicImage, height: u32) -> Result<RgbaImage, CompositeError> {
    let rgba = image.to_rgba8();
    if image.height() == height {
        return Ok(rgba);
    }
    let width = (u64::from(image.width()) * u64::from(height))
        .checked_div(u64::from(image.height()))
        .ok_or_else(|| CompositeError::Internal("Icon has zero height".to_owned()))?;
    let width = u32::try_from(width)
        .map_err(|err| CompositeError::Internal(err.to_string()))?
        .max(1);
    Ok(imageops::resize(&rgba, width, height, FilterType::CatmullRom))
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, CompositeError> {
    let mut buffer = Vec::new();
    image.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)?;
    Ok(buffer)
}
