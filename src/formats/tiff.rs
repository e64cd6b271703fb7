use std::fs::File;
use std::path::Path;

use ndarray::Array2;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::{TiffEncoder, colortype};

use crate::model::PixelType;

use super::util::{to_u8_samples, to_u16_samples};
use super::{IoError, Result};

pub(crate) fn read_plane_tiff(path: &Path) -> Result<(Array2<f32>, PixelType)> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(file)?;
    let (width, height) = decoder.dimensions()?;
    let (values, pixel_type) = decode_gray_page(&mut decoder, width, height)?;
    if decoder.more_images() {
        return Err(IoError::UnsupportedLayout(
            "expected a single-plane TIFF, found multiple pages".into(),
        ));
    }
    let plane = Array2::from_shape_vec((height as usize, width as usize), values)
        .expect("shape checked");
    Ok((plane, pixel_type))
}

fn decode_gray_page(
    decoder: &mut Decoder<File>,
    width: u32,
    height: u32,
) -> Result<(Vec<f32>, PixelType)> {
    let sample_count = width as usize * height as usize;
    match decoder.read_image()? {
        DecodingResult::U8(buffer) => {
            if buffer.len() != sample_count {
                return Err(IoError::UnsupportedLayout(
                    "TIFF RGB/alpha planes are not supported".into(),
                ));
            }
            let values = buffer
                .into_iter()
                .map(|value| f32::from(value) / 255.0)
                .collect();
            Ok((values, PixelType::U8))
        }
        DecodingResult::U16(buffer) => {
            if buffer.len() != sample_count {
                return Err(IoError::UnsupportedLayout(
                    "TIFF RGB/alpha planes are not supported".into(),
                ));
            }
            let values = buffer
                .into_iter()
                .map(|value| f32::from(value) / 65_535.0)
                .collect();
            Ok((values, PixelType::U16))
        }
        DecodingResult::F32(buffer) => {
            if buffer.len() != sample_count {
                return Err(IoError::UnsupportedLayout(
                    "TIFF RGB/alpha planes are not supported".into(),
                ));
            }
            Ok((buffer, PixelType::F32))
        }
        other => Err(IoError::UnsupportedLayout(format!(
            "unsupported TIFF sample type: {other:?}"
        ))),
    }
}

pub(crate) fn write_pages_tiff(
    path: &Path,
    pixel_type: PixelType,
    pages: &[Array2<f32>],
) -> Result<()> {
    let Some(first) = pages.first() else {
        return Err(IoError::UnsupportedLayout(
            "volume write requires at least one plane".into(),
        ));
    };
    let (height, width) = first.dim();
    let file = File::create(path)?;
    let mut encoder = TiffEncoder::new(file)?;

    for page in pages {
        if page.dim() != (height, width) {
            return Err(IoError::UnsupportedLayout(
                "all planes of a volume must have identical dimensions".into(),
            ));
        }
        let values = page.iter().copied().collect::<Vec<_>>();
        match pixel_type {
            PixelType::U8 => {
                let samples = to_u8_samples(&values);
                let image = encoder.new_image::<colortype::Gray8>(width as u32, height as u32)?;
                image.write_data(&samples)?;
            }
            PixelType::U16 => {
                let samples = to_u16_samples(&values);
                let image = encoder.new_image::<colortype::Gray16>(width as u32, height as u32)?;
                image.write_data(&samples)?;
            }
            PixelType::F32 => {
                let image =
                    encoder.new_image::<colortype::Gray32Float>(width as u32, height as u32)?;
                image.write_data(&values)?;
            }
        }
    }
    Ok(())
}
