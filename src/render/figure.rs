use std::io::ErrorKind;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageError, ImageReader, RgbaImage};

use crate::data::model::{BoundingBox, LocationTable};
use crate::error::RenderError;

pub const TITLE: &str = "Map of Sensor Locations";
pub const X_LABEL: &str = "Latitude";
pub const Y_LABEL: &str = "Longitude";
/// Marker colour shared by every sink (black).
pub const MARKER_RGB: (u8, u8, u8) = (0, 0, 0);
pub const MARKER_RADIUS: f32 = 3.0;

// ---------------------------------------------------------------------------
// MapImage – the decoded backdrop
// ---------------------------------------------------------------------------

/// Decoded backdrop raster, RGBA8.
#[derive(Debug, Clone)]
pub struct MapImage {
    pixels: RgbaImage,
}

impl MapImage {
    /// Read and decode an image, guessing the format from its contents.
    pub fn open(path: &Path) -> Result<Self, RenderError> {
        let decode_error = |source: ImageError| RenderError::ImageDecode {
            path: path.to_path_buf(),
            source,
        };

        let reader = ImageReader::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => RenderError::ImageNotFound(path.to_path_buf()),
            _ => decode_error(ImageError::IoError(e)),
        })?;
        let image = reader
            .with_guessed_format()
            .map_err(|e| decode_error(ImageError::IoError(e)))?
            .decode()
            .map_err(decode_error)?;

        Ok(MapImage {
            pixels: image.to_rgba8(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Row-major RGBA bytes.
    pub fn rgba(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Stretch to exactly `width` × `height` and drop alpha.
    pub fn resized_rgb(&self, width: u32, height: u32) -> Vec<u8> {
        let resized = imageops::resize(&self.pixels, width, height, FilterType::Triangle);
        DynamicImage::ImageRgba8(resized).to_rgb8().into_raw()
    }
}

// ---------------------------------------------------------------------------
// Figure – everything a sink needs to draw
// ---------------------------------------------------------------------------

/// A composed scatter-over-map figure.
///
/// Points are `[latitude, longitude]`: latitude runs along x, longitude along y.
/// The backdrop spans the whole box on both axes regardless of its own aspect.
#[derive(Debug, Clone)]
pub struct Figure {
    pub title: String,
    pub bbox: BoundingBox,
    pub points: Vec<[f64; 2]>,
    pub backdrop: MapImage,
}

impl Figure {
    /// Collect the plotted points and load the backdrop.
    ///
    /// Nothing is presented here; if the image cannot be loaded the partly
    /// built figure is dropped before the error is returned.
    pub fn compose(
        filtered: &LocationTable,
        image_path: &Path,
        bbox: BoundingBox,
    ) -> Result<Self, RenderError> {
        if !bbox.is_valid() {
            return Err(RenderError::InvalidBounds(bbox));
        }

        let points: Vec<[f64; 2]> = filtered.coordinates().map(|(lat, lon)| [lat, lon]).collect();
        let backdrop = MapImage::open(image_path)?;
        log::debug!(
            "Backdrop {} is {}x{} px",
            image_path.display(),
            backdrop.width(),
            backdrop.height()
        );

        Ok(Figure {
            title: TITLE.to_string(),
            bbox,
            points,
            backdrop,
        })
    }

    /// Plot-space centre of the backdrop.
    pub fn backdrop_center(&self) -> [f64; 2] {
        [
            (self.bbox.lat_min + self.bbox.lat_max) / 2.0,
            (self.bbox.lon_min + self.bbox.lon_max) / 2.0,
        ]
    }

    /// Plot-space extent of the backdrop: latitude span by longitude span.
    pub fn backdrop_size(&self) -> [f64; 2] {
        [self.bbox.lat_span(), self.bbox.lon_span()]
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use image::Rgba;
    use tempfile::TempDir;

    use super::*;
    use crate::data::model::{CellValue, Record, LATITUDE, LONGITUDE};

    fn write_png(dir: &TempDir, name: &str, width: u32, height: u32) -> std::path::PathBuf {
        let path = dir.path().join(name);
        RgbaImage::from_pixel(width, height, Rgba([10, 120, 200, 255]))
            .save(&path)
            .unwrap();
        path
    }

    fn table() -> LocationTable {
        let row = |lat, lon| -> Record {
            [(LATITUDE, CellValue::Float(lat)), (LONGITUDE, CellValue::Float(lon))]
                .into_iter()
                .collect()
        };
        LocationTable::new(
            vec![LATITUDE.into(), LONGITUDE.into()],
            vec![row(-5.0, 52.0), row(0.5, 57.0)],
        )
    }

    fn bbox() -> BoundingBox {
        BoundingBox::new(-10.0, 2.0, 50.0, 58.0)
    }

    #[test]
    fn missing_image_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map7.png");
        let err = Figure::compose(&table(), &path, bbox()).unwrap_err();
        assert!(matches!(err, RenderError::ImageNotFound(p) if p == path));
    }

    #[test]
    fn undecodable_image_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map7.png");
        fs::write(&path, b"definitely not an image").unwrap();
        let err = Figure::compose(&table(), &path, bbox()).unwrap_err();
        assert!(matches!(err, RenderError::ImageDecode { .. }), "got {err:?}");
    }

    #[test]
    fn invalid_box_is_rejected_before_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.png");
        let err = Figure::compose(&table(), &path, BoundingBox::new(1.0, 1.0, 50.0, 58.0))
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidBounds(_)));
    }

    #[test]
    fn points_put_latitude_on_x() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(&dir, "map7.png", 8, 4);
        let figure = Figure::compose(&table(), &path, bbox()).unwrap();

        assert_eq!(figure.title, TITLE);
        assert_eq!(figure.points, vec![[-5.0, 52.0], [0.5, 57.0]]);
        assert_eq!((figure.backdrop.width(), figure.backdrop.height()), (8, 4));
        assert_eq!(figure.backdrop.rgba().len(), 8 * 4 * 4);
    }

    #[test]
    fn backdrop_fills_the_box() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(&dir, "map7.png", 3, 3);
        let figure = Figure::compose(&LocationTable::default(), &path, bbox()).unwrap();

        assert!(figure.points.is_empty());
        assert_eq!(figure.backdrop_center(), [-4.0, 54.0]);
        assert_eq!(figure.backdrop_size(), [12.0, 8.0]);
    }

    #[test]
    fn resize_ignores_native_aspect() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        RgbaImage::from_pixel(4, 2, Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();
        let image = MapImage::open(&path).unwrap();
        let rgb = image.resized_rgb(5, 7);
        assert_eq!(rgb.len(), 5 * 7 * 3);
        assert_eq!(&rgb[..3], &[1, 2, 3]);
    }
}
