use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::{Duration, SystemTime};

use image::{imageops::FilterType, DynamicImage, GenericImageView, ImageFormat};
use reqwest::blocking::Client;
use tracing::{info, warn};

static POSTER_PRUNE_ONCE: Once = Once::new();

const POSTER_RETENTION_DAYS: u64 = 30;
pub const POSTER_RETENTION: Duration = Duration::from_secs(POSTER_RETENTION_DAYS * 24 * 60 * 60);

const ARTWORK_EXTS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// `<cache_dir>/posters`, created on first use and pruned once per run.
pub fn poster_cache_dir(cache_dir: &Path) -> PathBuf {
    let mut path = cache_dir.join("posters");
    if let Err(e) = fs::create_dir_all(&path) {
        warn!("failed to create poster cache dir {}: {e}", path.display());
        path = cache_dir.to_path_buf();
    }

    POSTER_PRUNE_ONCE.call_once({
        let path = path.clone();
        move || match prune_older_than(&path, POSTER_RETENTION) {
            Ok(0) => {}
            Ok(n) => info!("pruned {n} stale posters"),
            Err(err) => warn!("poster cache prune failed: {err}"),
        }
    });

    path
}

pub fn url_to_cache_key(url: &str) -> String {
    format!("{:x}", md5::compute(url.as_bytes()))
}

pub fn find_cached(dir: &Path, key: &str) -> Option<PathBuf> {
    ARTWORK_EXTS
        .iter()
        .map(|ext| dir.join(format!("{key}.{ext}")))
        .find(|p| p.exists())
}

/// Delete artwork files (and stray `.part` files) older than `max_age`.
pub fn prune_older_than(dir: &Path, max_age: Duration) -> std::io::Result<usize> {
    let cutoff = SystemTime::now()
        .checked_sub(max_age)
        .unwrap_or(SystemTime::UNIX_EPOCH);
    let mut removed = 0usize;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let Some(ext) = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase())
        else {
            continue;
        };
        if !(ARTWORK_EXTS.contains(&ext.as_str()) || ext == "part") {
            continue;
        }
        let modified = entry
            .metadata()?
            .modified()
            .unwrap_or(SystemTime::UNIX_EPOCH);
        if modified < cutoff {
            let _ = fs::remove_file(&path);
            removed += 1;
        }
    }
    Ok(removed)
}

/// Return (width, height, RGBA8 bytes) for a cached artwork file.
pub fn load_rgba(path: &Path) -> Result<(u32, u32, Vec<u8>), String> {
    let img = image::ImageReader::open(path)
        .map_err(|e| format!("open image {}: {e}", path.display()))?
        .with_guessed_format()
        .map_err(|e| format!("guess format {}: {e}", path.display()))?
        .decode()
        .map_err(|e| format!("decode {}: {e}", path.display()))?;
    let (w, h) = img.dimensions();
    Ok((w, h, img.to_rgba8().into_raw()))
}

fn resize_to_width(img: DynamicImage, max_width: u32) -> DynamicImage {
    let (w, h) = img.dimensions();
    if w <= max_width {
        return img;
    }
    let new_h = ((h as f32) * (max_width as f32 / w as f32))
        .round()
        .max(1.0) as u32;
    img.resize_exact(max_width, new_h, FilterType::CatmullRom)
}

fn write_atomically(dest: &Path, bytes: &[u8]) -> Result<(), String> {
    if let Some(parent) = dest.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let tmp = dest.with_extension("part");
    {
        let mut f = fs::File::create(&tmp).map_err(|e| format!("create tmp: {e}"))?;
        f.write_all(bytes).map_err(|e| format!("write: {e}"))?;
    }
    fs::rename(&tmp, dest).map_err(|e| format!("rename: {e}"))
}

/// Encode, shrink and store already-downloaded artwork as `<key>.jpg`.
pub fn store_resized(
    dir: &Path,
    body: &[u8],
    key: &str,
    max_width: u32,
    quality: u8,
) -> Result<PathBuf, String> {
    let dest = dir.join(format!("{key}.jpg"));
    let img = image::load_from_memory(body).map_err(|e| format!("decode: {e}"))?;
    let out = resize_to_width(img, max_width);

    let mut jpeg_bytes: Vec<u8> = Vec::new();
    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg_bytes, quality);
    encoder
        .encode_image(&out.to_rgb8())
        .map_err(|e| format!("jpeg encode: {e}"))?;

    write_atomically(&dest, &jpeg_bytes)?;
    Ok(dest)
}

/// Store artwork untouched (as PNG) when JPEG re-encoding is not possible.
pub fn store_original(dir: &Path, body: &[u8], key: &str) -> Result<PathBuf, String> {
    let img = image::load_from_memory(body).map_err(|e| format!("decode: {e}"))?;
    let dest = dir.join(format!("{key}.png"));
    let mut png_bytes: Vec<u8> = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| format!("encode png: {e}"))?;
    write_atomically(&dest, &png_bytes)?;
    Ok(dest)
}

/// Download `url` with a shared client and cache it under `key`.
pub fn download_and_store_resized_with_client(
    client: &Client,
    dir: &Path,
    url: &str,
    key: &str,
    max_width: u32,
    quality: u8,
) -> Result<PathBuf, String> {
    if let Some(found) = find_cached(dir, key) {
        return Ok(found);
    }

    let bytes = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.bytes())
        .map_err(|e| format!("download {url}: {e}"))?;

    store_resized(dir, &bytes, key, max_width, quality)
        .or_else(|_e| store_original(dir, &bytes, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = ImageBuffer::from_pixel(w, h, Rgba([200u8, 10, 10, 255]));
        let mut out = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn cache_key_is_stable_md5_hex() {
        let a = url_to_cache_key("https://example.com/a.jpg");
        assert_eq!(a, url_to_cache_key("https://example.com/a.jpg"));
        assert_ne!(a, url_to_cache_key("https://example.com/b.jpg"));
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn stored_artwork_is_resized_and_found() {
        let dir = tempfile::tempdir().unwrap();
        let key = url_to_cache_key("poster");
        assert!(find_cached(dir.path(), &key).is_none());

        let path = store_resized(dir.path(), &png_bytes(640, 960), &key, 320, 80).unwrap();
        assert_eq!(find_cached(dir.path(), &key), Some(path.clone()));

        let (w, h, rgba) = load_rgba(&path).unwrap();
        assert_eq!((w, h), (320, 480));
        assert_eq!(rgba.len(), (w * h * 4) as usize);
    }

    #[test]
    fn undecodable_bytes_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_resized(dir.path(), b"not an image", "k", 320, 80).is_err());
        assert!(store_original(dir.path(), b"not an image", "k").is_err());
        assert!(find_cached(dir.path(), "k").is_none());
    }

    #[test]
    fn prune_only_touches_artwork() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        fs::write(dir.path().join("b.part"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        assert_eq!(prune_older_than(dir.path(), POSTER_RETENTION).unwrap(), 0);
        assert_eq!(prune_older_than(dir.path(), Duration::ZERO).unwrap(), 2);
        assert!(dir.path().join("notes.txt").exists());
        assert!(!dir.path().join("a.jpg").exists());
    }
}
