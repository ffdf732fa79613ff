use crate::{
    refs::{ObjectReferences, RefType},
    LabelError,
};
use image::GrayImage;
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};

/// A greyscale raster already compressed into the form it is embedded in the PDF.
/// Encoding takes ownership of the raster so its pixel buffer is released as soon
/// as the compressed copy exists.
#[derive(Debug, Clone)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    bytes: Vec<u8>,
}

impl Image {
    pub fn from_gray(raster: GrayImage) -> Result<Image, LabelError> {
        let (width, height) = raster.dimensions();
        if width == 0 || height == 0 {
            return Err(LabelError::CodeImage(format!(
                "raster has no pixels ({width}x{height})"
            )));
        }

        let level = CompressionLevel::DefaultLevel as u8;
        let bytes = compress_to_vec_zlib(raster.as_raw(), level);
        Ok(Image {
            width,
            height,
            bytes,
        })
    }

    /// Size of the compressed pixel data
    pub fn encoded_len(&self) -> usize {
        self.bytes.len()
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::Image(image_index));

        let mut image = writer.image_xobject(id, &self.bytes);
        image.filter(Filter::FlateDecode);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_gray();
        image.bits_per_component(8);
        image.finish();
    }
}
