use std::fs;
use std::io::Cursor;
use std::path::Path;
use anyhow::{anyhow, bail, Context, Result};
use raylib::prelude::*;
use exif::{Reader, Tag, Value, In};
use tracing::{debug, warn};
use crate::slide::Slide;

/// Loads one texture per slide, in deck order. Slides whose image cannot be loaded get `None`.
pub fn load_slide_textures(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    asset_dir: &Path,
    slides: &[Slide],
) -> Result<Vec<Option<Texture2D>>> {
    if !asset_dir.is_dir() {
        bail!("asset directory {:?} does not exist", asset_dir);
    }

    let mut textures = Vec::with_capacity(slides.len());
    for slide in slides {
        let path = asset_dir.join(slide.image);
        match load_texture_with_exif_rotation(rl, thread, &path) {
            Ok(texture) => {
                debug!("Loaded {:?} ({}x{})", path, texture.width(), texture.height());
                textures.push(Some(texture));
            }
            Err(e) => {
                warn!("Slide {} image unavailable: {:#}", slide.id, e);
                textures.push(None);
            }
        }
    }
    Ok(textures)
}

/// EXIF orientation tag, read only from JPEG containers. 1 means "as stored".
fn exif_orientation(image_path: &Path, file_bytes: &[u8]) -> u16 {
    let extension = extension_of(image_path);
    if extension != "jpg" && extension != "jpeg" {
        return 1;
    }

    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Value::Short(values) = &field.value {
                    if let Some(&orientation) = values.first() {
                        return orientation;
                    }
                }
            }
            1
        }
        Err(e) => {
            // Non-critical: proceed without rotation
            debug!("No EXIF data for {:?}: {}", image_path, e);
            1
        }
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D> {
    let file_bytes = fs::read(image_path)
        .with_context(|| format!("failed to read {:?}", image_path))?;

    let orientation = exif_orientation(image_path, &file_bytes);

    // Extension hint for loading from memory
    let extension = extension_of(image_path);
    let mut image = Image::load_image_from_mem(&format!(".{}", extension), &file_bytes)
        .map_err(|e| anyhow!("failed to decode {:?}: {}", image_path, e))?;

    // 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise.
    // Flipped orientations are ignored.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    if orientation != 1 {
        debug!("Applied EXIF orientation {} to {:?}", orientation, image_path);
    }

    let texture = rl.load_texture_from_image(thread, &image)
        .map_err(|e| anyhow!("failed to create texture for {:?}: {}", image_path, e))?;

    Ok(texture)
}
