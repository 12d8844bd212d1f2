//! Decoding input images and encoding the PNG result.

use std::{
    fs,
    io::{Cursor, Write},
    path::Path,
};

use image::{ImageFormat, ImageReader, RgbaImage};
use tempfile::Builder;

use crate::error::{Error, Result};

/// Decode `path` into an RGBA8 buffer.
///
/// The format is guessed from the file content, not the extension. Images
/// without an alpha channel come back fully opaque.
pub fn load(path: &Path) -> Result<RgbaImage> {
    let not_found = |source: std::io::Error| Error::NotFound {
        path: path.to_path_buf(),
        source,
    };

    let img = ImageReader::open(path)
        .map_err(not_found)?
        .with_guessed_format()
        .map_err(not_found)?
        .decode()
        .map_err(|source| Error::DecodeFailure {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(img.to_rgba8())
}

/// Encode `img` as 8-bit RGBA PNG and write it to `path`.
///
/// Always PNG, whatever the extension says. The bytes go to a temporary
/// file next to `path` which is renamed over it only once fully written,
/// so a failure leaves any existing file at `path` as it was.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .map_err(|source| Error::EncodeFailure {
            path: path.to_path_buf(),
            source,
        })?;

    let write_failure = |source: std::io::Error| Error::WriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = Builder::new();
    builder.prefix(".colorkey-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let mut tmp = builder.tempfile_in(dir).map_err(write_failure)?;
    tmp.write_all(buf.get_ref()).map_err(write_failure)?;
    tmp.persist(path).map_err(|e| write_failure(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage, Rgba};
    use tempfile::TempDir;

    use super::*;
    use crate::error::ErrorKind;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    #[test]
    fn loads_rgb_png_with_opaque_alpha() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("rgb.png");
        RgbImage::from_pixel(3, 2, Rgb([1, 2, 3])).save(&file).unwrap();

        let img = load(&file).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert!(img.pixels().all(|px| *px == Rgba([1, 2, 3, 255])));
    }

    #[test]
    fn loads_jpeg() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("photo.jpg");
        RgbImage::from_pixel(8, 8, Rgb([200, 10, 10])).save(&file).unwrap();

        let img = load(&file).unwrap();
        assert_eq!(img.dimensions(), (8, 8));
        assert!(img.pixels().all(|px| px[3] == 255));
    }

    #[test]
    fn format_comes_from_content_not_extension() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("actually_png.jpg");
        let mut buf = Cursor::new(Vec::new());
        RgbaImage::from_pixel(1, 1, Rgba([9, 9, 9, 9]))
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        fs::write(&file, buf.into_inner()).unwrap();

        assert_eq!(load(&file).unwrap().get_pixel(0, 0), &Rgba([9, 9, 9, 9]));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join("nope.png")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn garbage_is_decode_failure() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("junk.png");
        fs::write(&file, b"definitely not an image").unwrap();

        let err = load(&file).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeFailure);
    }

    #[test]
    fn saves_png_regardless_of_extension() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("out.jpg");
        let img = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 0]));

        save_png(&img, &file).unwrap();

        let bytes = fs::read(&file).unwrap();
        assert!(bytes.starts_with(PNG_MAGIC));
        assert_eq!(load(&file).unwrap(), img);
    }

    #[test]
    fn unwritable_path_is_encode_failure() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("missing_dir").join("out.png");
        let img = RgbaImage::new(1, 1);

        let err = save_png(&img, &file).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncodeFailure);
        assert!(!file.exists());
    }

    #[test]
    fn replaces_existing_output() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("out.png");
        fs::write(&file, b"previous").unwrap();
        let img = RgbaImage::from_pixel(3, 3, Rgba([1, 2, 3, 4]));

        save_png(&img, &file).unwrap();

        assert_eq!(load(&file).unwrap(), img);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn failed_write_keeps_existing_output_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory cannot be replaced by a file rename.
        let target = dir.path().join("out.png");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), b"previous").unwrap();
        let img = RgbaImage::from_fn(64, 64, |x, y| Rgba([x as u8, y as u8, 7, 255]));

        let err = save_png(&img, &target).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::EncodeFailure);
        assert!(matches!(err, Error::WriteFailure { .. }));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(fs::read(target.join("keep")).unwrap(), b"previous");
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("out.png")]);
    }

    #[cfg(unix)]
    #[test]
    fn output_mode_matches_a_plain_write() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let file = dir.path().join("out.png");
        let plain = dir.path().join("plain");
        save_png(&RgbaImage::new(1, 1), &file).unwrap();
        fs::write(&plain, b"").unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&file), mode(&plain));
    }
}
