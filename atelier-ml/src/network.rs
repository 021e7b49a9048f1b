use std::path::Path;

use anyhow::anyhow;
use image::{DynamicImage, RgbImage};
use ndarray::{Array4, ArrayViewD};
use ort::{
    inputs,
    session::{Session, builder::GraphOptimizationLevel},
    value::TensorRef,
};
use tracing::debug;

use crate::error::{Error, Result};

/// Input/output intensity scale of a model family.
///
/// The networks shipped with the kiosk were trained on raw 0-255 pixel
/// intensities, so tensors are fed and read back at that scale. A model
/// trained on conventional 0-1 input gets a contract of `1.0`/`1.0`
/// instead; the scale belongs to the artifact, not to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleContract {
    pub input: f32,
    pub output: f32,
}

impl Default for ScaleContract {
    fn default() -> Self {
        Self {
            input: 255.0,
            output: 255.0,
        }
    }
}

/// A loaded style network: one ONNX session with a single image input and
/// a single image output, both `[1, 3, H, W]`.
#[derive(Debug)]
pub struct StyleNetwork {
    session: Session,
    input_name: String,
    output_name: String,
    contract: ScaleContract,
}

impl StyleNetwork {
    /// Load a serialized network. The sole input and output binding names
    /// are read from the graph metadata here, so a graph with any other
    /// signature is rejected before an image is ever decoded.
    pub fn load(path: &Path, contract: ScaleContract) -> Result<Self> {
        let session = Session::builder()
            .and_then(|builder| builder.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|builder| builder.commit_from_file(path))
            .map_err(|source| Error::ModelLoad {
                path: path.to_path_buf(),
                source: source.into(),
            })?;

        if session.inputs.len() != 1 || session.outputs.len() != 1 {
            return Err(Error::ModelLoad {
                path: path.to_path_buf(),
                source: anyhow!(
                    "expected a single input and a single output binding, got {} and {}",
                    session.inputs.len(),
                    session.outputs.len()
                ),
            });
        }

        let input_name = session.inputs[0].name.clone();
        let output_name = session.outputs[0].name.clone();
        debug!(input = %input_name, output = %output_name, "loaded style network");

        Ok(Self {
            session,
            input_name,
            output_name,
            contract,
        })
    }

    pub fn contract(&self) -> ScaleContract {
        self.contract
    }

    /// One forward pass at the image's native resolution. Alpha is dropped
    /// and grayscale promoted to RGB before tensorizing; the caller is
    /// responsible for restoring the original geometry afterwards.
    pub fn stylize(&mut self, image: &DynamicImage) -> Result<RgbImage> {
        let tensor = tensorize(&image.to_rgb8(), self.contract);

        let outputs = self
            .session
            .run(inputs![
                self.input_name.as_str() => TensorRef::from_array_view(tensor.view())
                    .map_err(|source| Error::Inference(source.into()))?,
            ])
            .map_err(|source| Error::Inference(source.into()))?;
        let output = outputs[self.output_name.as_str()]
            .try_extract_array::<f32>()
            .map_err(|source| Error::Inference(source.into()))?;

        detensorize(output, self.contract)
    }
}

/// Lay an RGB bitmap out as a `[1, 3, H, W]` channel-first tensor at the
/// contract's input scale.
pub(crate) fn tensorize(image: &RgbImage, contract: ScaleContract) -> Array4<f32> {
    let (width, height) = image.dimensions();
    let mut tensor = Array4::zeros((1, 3, height as usize, width as usize));
    for (x, y, pixel) in image.enumerate_pixels() {
        for channel in 0..3 {
            tensor[[0, channel, y as usize, x as usize]] =
                pixel[channel] as f32 / 255.0 * contract.input;
        }
    }
    tensor
}

/// Convert a `[1, 3, H, W]` network output back to an interleaved bitmap.
///
/// The network output is unbounded, so values are clamped to the
/// displayable range before the 8-bit conversion; overshoot must darken or
/// saturate, never wrap.
pub(crate) fn detensorize(output: ArrayViewD<'_, f32>, contract: ScaleContract) -> Result<RgbImage> {
    let shape = output.shape();
    if shape.len() != 4 || shape[0] != 1 || shape[1] != 3 {
        return Err(Error::Inference(anyhow!(
            "expected output of shape [1, 3, H, W], got {shape:?}"
        )));
    }
    let (height, width) = (shape[2], shape[3]);

    let mut image = RgbImage::new(width as u32, height as u32);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        for channel in 0..3 {
            let value = output[[0, channel, y as usize, x as usize]] / contract.output;
            pixel[channel] = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_gray_survives_the_scale_contract() {
        let image = RgbImage::from_pixel(4, 3, image::Rgb([128, 128, 128]));
        let tensor = tensorize(&image, ScaleContract::default());
        assert_eq!(tensor.shape(), &[1, 3, 3, 4]);

        // Feed the input straight back, as if the network were the identity.
        let restored = detensorize(tensor.view().into_dyn(), ScaleContract::default()).unwrap();
        assert_eq!(restored.dimensions(), (4, 3));
        assert!(restored.pixels().all(|pixel| pixel.0 == [128, 128, 128]));
    }

    #[test]
    fn out_of_range_output_clamps_instead_of_wrapping() {
        let mut output = Array4::zeros((1, 3, 1, 2));
        for channel in 0..3 {
            output[[0, channel, 0, 0]] = -5.0;
            output[[0, channel, 0, 1]] = 300.0;
        }

        let image = detensorize(output.view().into_dyn(), ScaleContract::default()).unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(image.get_pixel(1, 0).0, [255, 255, 255]);
    }

    #[test]
    fn rejects_outputs_that_are_not_single_rgb_batches() {
        let output = Array4::<f32>::zeros((1, 1, 2, 2));
        assert!(matches!(
            detensorize(output.view().into_dyn(), ScaleContract::default()),
            Err(Error::Inference(_))
        ));
    }
}
