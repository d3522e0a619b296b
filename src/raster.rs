use {
    crate::error::*,
    image::{GrayImage, ImageFormat, Luma},
    ndarray::Array2,
    std::path::Path,
};

pub const SET: u8 = 255;
pub const CLEAR: u8 = 0;

/// Test pattern for the marker decoder: a square frame two pixels thick.
pub const FRAME: &str = "\
______________
_XXXXXXXXXXXX_
_XXXXXXXXXXXX_
_XX________XX_
_XX________XX_
_XX________XX_
_XX________XX_
_XX________XX_
_XX________XX_
_XX________XX_
_XX________XX_
_XXXXXXXXXXXX_
_XXXXXXXXXXXX_
______________
";

/// `X` becomes white, anything else black. Blank lines are skipped and
/// trailing whitespace is ignored; all rows must be the same width.
pub fn parse_art(text: &str) -> Result<Array2<u8>> {
    let rows: Vec<Vec<u8>> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().map(|c| if c == 'X' { SET } else { CLEAR }).collect())
        .collect();

    let width = rows.first().ok_or(Error::EmptyArt)?.len();
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
        return Err(Error::RaggedArt {
            line: i + 1,
            expected: width,
            found: row.len(),
        });
    }

    Ok(Array2::from_shape_fn((rows.len(), width), |(r, c)| rows[r][c]))
}

/// Nearest-neighbor upscale by an integer factor.
pub fn upscale(pixels: &Array2<u8>, scale: usize) -> Result<Array2<u8>> {
    if scale == 0 {
        return Err(Error::InvalidConfig("scale must be at least 1".into()));
    }

    let (h, w) = pixels.dim();
    let scaled = |side: usize| {
        side.checked_mul(scale)
            .filter(|&n| u32::try_from(n).is_ok())
            .ok_or_else(|| {
                Error::InvalidConfig(format!("scale {scale} makes a side of {side} too large"))
            })
    };
    let (big_h, big_w) = (scaled(h)?, scaled(w)?);

    Ok(Array2::from_shape_fn((big_h, big_w), |(r, c)| {
        pixels[(r / scale, c / scale)]
    }))
}

pub fn to_image(pixels: &Array2<u8>) -> GrayImage {
    let (h, w) = pixels.dim();
    GrayImage::from_fn(w as u32, h as u32, |x, y| {
        Luma([pixels[(y as usize, x as usize)]])
    })
}

pub fn save_png(pixels: &Array2<u8>, path: &Path) -> Result<()> {
    to_image(pixels).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

#[test]
fn test_parse_frame() {
    let pixels = parse_art(FRAME).unwrap();
    assert_eq!(pixels.dim(), (14, 14));
    assert_eq!(pixels[(0, 0)], CLEAR);
    assert_eq!(pixels[(1, 1)], SET);
    assert_eq!(pixels[(5, 5)], CLEAR);
    assert_eq!(pixels[(12, 12)], SET);
    assert_eq!(pixels.iter().filter(|&&p| p == SET).count(), 2 * 12 * 2 + 2 * 8 * 2);
}

#[test]
fn test_parse_errors() {
    assert!(matches!(parse_art(""), Err(Error::EmptyArt)));
    assert!(matches!(parse_art("\n  \n"), Err(Error::EmptyArt)));
    assert!(matches!(
        parse_art("X_X\nXX\nXXX"),
        Err(Error::RaggedArt {
            line: 2,
            expected: 3,
            found: 2
        })
    ));

    // trailing spaces and blank lines do not count
    let pixels = parse_art("X_  \n\n_X\n\n").unwrap();
    assert_eq!(pixels, ndarray::arr2(&[[SET, CLEAR], [CLEAR, SET]]));
}

#[test]
fn test_upscale() {
    let pixels = parse_art("X_\n__").unwrap();
    let big = upscale(&pixels, 3).unwrap();
    assert_eq!(big.dim(), (6, 6));
    assert!(big.slice(ndarray::s![0..3, 0..3]).iter().all(|&p| p == SET));
    assert_eq!(big.iter().filter(|&&p| p == SET).count(), 9);

    assert_eq!(upscale(&pixels, 1).unwrap(), pixels);
    assert!(upscale(&pixels, 0).is_err());

    // overflowing usize, or past what an image side can hold
    assert!(matches!(
        upscale(&pixels, usize::MAX / 2 + 1),
        Err(Error::InvalidConfig(_))
    ));
    assert!(matches!(
        upscale(&pixels, u32::MAX as usize),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn test_save_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");

    let pixels = parse_art(FRAME).unwrap();
    save_png(&pixels, &path).unwrap();

    let image = image::open(&path).unwrap().into_luma8();
    assert_eq!(image.dimensions(), (14, 14));
    assert_eq!(image.get_pixel(1, 1), &Luma([SET]));
    assert_eq!(image.get_pixel(0, 1), &Luma([CLEAR]));
    assert_eq!(image.get_pixel(5, 5), &Luma([CLEAR]));
}
