use crate::error::QrError;
use crate::options::{EncodeOptions, DEFAULT_FILL};
use crate::qrcode::{Mask, QrCode};

use image::{ImageBuffer, Luma};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::debug;

/// Errors from the one-call helpers, which both encode and render.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Encode(#[from] QrError),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/*---- Utilities ----*/

/// Renders the grid as text, one line per module row, each terminated by `\n`.
///
/// Dark modules become `fill` and light modules become `clear`. No quiet zone is added.
pub fn to_text_string(qr: &QrCode, fill: &str, clear: &str) -> String {
    let size = qr.size();
    let width = fill.len().max(clear.len());
    let mut result = String::with_capacity((size as usize) * ((size as usize) * width + 1));
    for y in 0..size {
        for x in 0..size {
            result += if qr.get_module(x, y) { fill } else { clear };
        }
        result.push('\n');
    }
    result
}

// Returns a string of SVG code for an image depicting
// the given QR Code, with the given number of border modules.
// The string always uses Unix newlines (\n), regardless of the platform.
pub fn to_svg_string(qr: &QrCode, border: u32) -> String {
    let border = border as i32;
    let mut result = String::new();
    result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    result += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
    let dimension = qr.size() + border * 2;
    result += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {0} {0}\" stroke=\"none\">\n",
        dimension
    );
    result += "\t<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n";
    result += "\t<path d=\"";
    let mut first = true;
    for y in 0..qr.size() {
        for x in 0..qr.size() {
            if qr.get_module(x, y) {
                if !first {
                    result += " ";
                }
                first = false;
                result += &format!("M{},{}h1v1h-1z", x + border, y + border);
            }
        }
    }
    result += "\" fill=\"#000000\"/>\n";
    result += "</svg>\n";
    result
}

/// Prints the given QrCode object to the console, with a four module quiet zone.
pub fn print_qr(qr: &QrCode) {
    let border: i32 = 4;
    for y in -border..qr.size() + border {
        for x in -border..qr.size() + border {
            let c: &str = if qr.get_module(x, y) { DEFAULT_FILL } else { " " };
            print!("{0}{0}", c);
        }
        println!();
    }
    println!();
}

/// Draws the QR Code into a grayscale image, one pixel per module, with `border`
/// light modules on every side.
pub fn to_image_buffer(qr: &QrCode, border: u32) -> ImageBuffer<Luma<u8>, Vec<u8>> {
    let size = qr.size() as u32 + 2 * border;
    ImageBuffer::from_fn(size, size, |x, y| {
        let qr_x = x as i32 - border as i32;
        let qr_y = y as i32 - border as i32;
        if qr.get_module(qr_x, qr_y) {
            Luma([0u8]) // Black
        } else {
            Luma([255u8]) // White
        }
    })
}

/// Converts a QR Code object to an image and saves it to a file.
///
/// # Arguments
///
/// * `qr` - The QR Code object to convert.
/// * `directory_path` - Optional. The directory path where the image will be saved. If not provided, the default directory is "generated".
/// * `filename` - Optional. The name of the image file. `.png` is appended unless the name already ends with it,
///   so dots inside the name are kept. If not provided, a timestamp-based filename will be used.
///
/// # Returns
///
/// The path of the written file.
///
/// # Errors
///
/// Returns an `image::ImageError` if the directory cannot be created or the image cannot be saved.
///
/// # Example
///
/// ```rust,no_run
/// use qirust::helper::qr_to_image_and_save;
/// use qirust::qrcode::{Mask, QrCode, QrCodeEcc};
///
/// let qr = QrCode::encode_text("Hello, World!", QrCodeEcc::Low, Mask::new(0)).unwrap();
/// qr_to_image_and_save(&qr, Some("images"), Some("qr_code")).unwrap();
/// ```
pub fn qr_to_image_and_save(
    qr: &QrCode,
    directory_path: Option<&str>,
    filename: Option<&str>,
) -> Result<PathBuf, image::ImageError> {
    let img = to_image_buffer(qr, 4);

    let directory_path = directory_path.unwrap_or("generated");
    let filename = match filename {
        Some(name) => name.to_string(),
        None => {
            let millis = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0);
            format!("qr_{}", millis)
        }
    };
    let file_path = Path::new(directory_path).join(png_file_name(filename));

    // Check if the directory exists, create it if it doesn't
    if !Path::new(directory_path).exists() {
        fs::create_dir_all(directory_path)?;
    }

    img.save(&file_path)?;
    debug!(path = %file_path.display(), "saved QR code image");
    Ok(file_path)
}

fn png_file_name(mut name: String) -> String {
    if !name.ends_with(".png") {
        name.push_str(".png");
    }
    name
}

fn encode_default(content: &str) -> Result<QrCode, QrError> {
    let opts = EncodeOptions::default();
    let mask = Mask::try_from(opts.mask)?;
    QrCode::encode_text(content, opts.ecl, mask)
}

/// Generates a QR Code image from the provided content and saves it to a file.
///
/// Uses the default error correction level and mask of [`EncodeOptions`].
///
/// # Arguments
///
/// * `content` - The content to encode into the QR Code.
/// * `directory` - Optional. The directory path where the image will be saved. If not provided, the default directory is "generated".
/// * `filename` - Optional. The name of the image file. If not provided, a timestamp-based filename will be used.
///
/// # Example
///
/// ```rust,no_run
/// use qirust::helper::generate_image;
///
/// let path = generate_image("Hello, World!", Some("images"), Some("qr_code")).unwrap();
/// println!("{}", path.display());
/// ```
pub fn generate_image(
    content: &str,
    directory: Option<&str>,
    filename: Option<&str>,
) -> Result<PathBuf, RenderError> {
    let qr = encode_default(content)?;
    Ok(qr_to_image_and_save(&qr, directory, filename)?)
}

/// Generates a QR Code SVG from the provided content.
///
/// # Example
///
/// ```
/// use qirust::helper::generate_svg_string;
///
/// let svg_string = generate_svg_string("Hello, World!").unwrap();
/// assert!(svg_string.ends_with("</svg>\n"));
/// ```
pub fn generate_svg_string(content: &str) -> Result<String, QrError> {
    let qr = encode_default(content)?;
    Ok(to_svg_string(&qr, 4))
}

/// Generates a QR Code image buffer from the provided content, with a four module border.
///
/// # Example
///
/// ```
/// use qirust::helper::generate_image_buffer;
///
/// let img_buffer = generate_image_buffer("Hello, World!").unwrap();
/// assert_eq!(img_buffer.dimensions(), (29, 29));
/// ```
pub fn generate_image_buffer(content: &str) -> Result<ImageBuffer<Luma<u8>, Vec<u8>>, QrError> {
    let qr = encode_default(content)?;
    Ok(to_image_buffer(&qr, 4))
}
