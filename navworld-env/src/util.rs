//! Conversion utilities for observation payloads.
use image::{
    imageops::{resize, FilterType},
    ImageBuffer, Rgb,
};
use ndarray::{Array3, ArrayD};
use num_traits::cast::AsPrimitive;

/// An array of either of the element types occurring in native observations.
///
/// Entries of dictionary-shaped native observations are wrapped in this type,
/// so that a single observation can mix image frames with float sensors.
#[derive(Clone, Debug)]
pub enum Array {
    /// Unsigned 8-bit elements, used for image frames.
    U8(ArrayD<u8>),

    /// 32-bit floating-point elements.
    F32(ArrayD<f32>),
}

impl Array {
    /// The shape of the array.
    pub fn shape(&self) -> &[usize] {
        match self {
            Array::U8(a) => a.shape(),
            Array::F32(a) => a.shape(),
        }
    }

    /// Flattens the array into a `Vec` of the given element type.
    pub fn to_flat_vec<T>(&self) -> Vec<T>
    where
        T: Copy + 'static,
        u8: AsPrimitive<T>,
        f32: AsPrimitive<T>,
    {
        match self {
            Array::U8(a) => a.iter().map(|x| x.as_()).collect(),
            Array::F32(a) => a.iter().map(|x| x.as_()).collect(),
        }
    }
}

impl From<ArrayD<u8>> for Array {
    fn from(a: ArrayD<u8>) -> Self {
        Array::U8(a)
    }
}

impl From<ArrayD<f32>> for Array {
    fn from(a: ArrayD<f32>) -> Self {
        Array::F32(a)
    }
}

/// Resizes an RGB frame with nearest-neighbor interpolation.
///
/// `frame` has shape `(height, width, 3)`; the returned frame has shape
/// `(height', width', 3)` with the given target dimensions.
pub fn resize_frame(frame: &Array3<u8>, width: u32, height: u32) -> Array3<u8> {
    let (h, w, c) = frame.dim();
    assert_eq!(c, 3, "expected an RGB frame, got {} channels", c);
    let buf: Vec<u8> = frame.iter().copied().collect();
    let img = ImageBuffer::<Rgb<u8>, _>::from_vec(w as u32, h as u32, buf).unwrap();
    let img = resize(&img, width, height, FilterType::Nearest);
    Array3::from_shape_vec((height as usize, width as usize, 3), img.into_raw()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn resize_nearest_doubles_pixels() {
        let mut frame = Array3::<u8>::zeros((2, 2, 3));
        frame[[0, 0, 0]] = 10;
        frame[[0, 1, 0]] = 20;
        frame[[1, 0, 0]] = 30;
        frame[[1, 1, 0]] = 40;

        let resized = resize_frame(&frame, 4, 4);
        assert_eq!(resized.dim(), (4, 4, 3));
        // Each source pixel becomes a 2x2 block.
        assert_eq!(resized[[0, 0, 0]], 10);
        assert_eq!(resized[[1, 1, 0]], 10);
        assert_eq!(resized[[0, 3, 0]], 20);
        assert_eq!(resized[[3, 0, 0]], 30);
        assert_eq!(resized[[3, 3, 0]], 40);
    }

    #[test]
    fn array_flattens_to_f32() {
        let a: Array = arr1(&[1.5f32, -2.0]).into_dyn().into();
        assert_eq!(a.shape(), &[2]);
        assert_eq!(a.to_flat_vec::<f32>(), vec![1.5, -2.0]);
    }
}
