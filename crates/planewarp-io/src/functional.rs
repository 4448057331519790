use std::path::Path;

use planewarp_image::{Image, ImageSize, Rgba8};

use crate::error::IoError;

/// Reads an image from the given file path as 8-bit RGBA.
///
/// The format is guessed from the file content, so any format enabled in the image crate
/// is accepted. Images without alpha get an opaque alpha channel.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An RGBA image containing the image data.
pub fn read_image_rgba8(file_path: impl AsRef<Path>) -> Result<Rgba8, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, img.into_rgba8().into_raw())?)
}

/// Writes an RGBA image to the given path in PNG format.
///
/// # Arguments
///
/// * `file_path` - The destination path.
/// * `image` - The image to encode.
pub fn write_image_png_rgba8(
    file_path: impl AsRef<Path>,
    image: &Rgba8,
) -> Result<(), IoError> {
    let (width, height) = (image.width(), image.height());
    let unsupported = || IoError::UnsupportedImageSize(width, height);

    let w = u32::try_from(width).map_err(|_| unsupported())?;
    let h = u32::try_from(height).map_err(|_| unsupported())?;

    let buffer =
        image::RgbaImage::from_raw(w, h, image.as_slice().to_vec()).ok_or_else(unsupported)?;
    buffer.save_with_format(file_path, image::ImageFormat::Png)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_read_png_rgba8() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("preview.png");

        let image = Rgba8::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            (0..24).map(|v| (v * 10) as u8).collect(),
        )?;

        write_image_png_rgba8(&file_path, &image)?;
        let back = read_image_rgba8(&file_path)?;

        assert_eq!(back, image);
        Ok(())
    }

    #[test]
    fn read_rgb_png_adds_alpha() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("rgb.png");

        let rgb = image::RgbImage::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6])
            .ok_or(IoError::UnsupportedImageSize(2, 1))?;
        rgb.save(&file_path)?;

        let image = read_image_rgba8(&file_path)?;
        assert_eq!(image.as_slice(), &[1, 2, 3, 255, 4, 5, 6, 255]);
        Ok(())
    }

    #[test]
    fn read_missing_file() {
        let res = read_image_rgba8("does/not/exist.png");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }
}
