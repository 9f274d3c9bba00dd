//! Inference handle for the trained points-regression model.
//!
//! The ONNX artifact is loaded once at process start into an optimized
//! tract plan and is read-only afterwards. A missing or corrupt artifact is
//! a startup failure, never a per-request one.

use std::path::Path;

use tract_onnx::prelude::*;
use tracing::info;

use crate::error::PredictError;
use crate::features::FeatureVector;

/// Scalar regression over a feature vector.
pub trait Predictor: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictError>;
}

/// Trained points model backed by a tract ONNX plan.
#[derive(Debug)]
pub struct PointsModel {
    plan: TypedRunnableModel<TypedModel>,
}

impl PointsModel {
    /// Load and optimize the artifact at `path`.
    pub fn load(path: &Path) -> Result<Self, PredictError> {
        if !path.exists() {
            return Err(PredictError::ModelMissing(path.to_path_buf()));
        }
        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|m| {
                m.with_input_fact(
                    0,
                    InferenceFact::dt_shape(f32::datum_type(), tvec![1, FeatureVector::LEN]),
                )
            })
            .and_then(|m| m.into_optimized())
            .and_then(|m| m.into_runnable())
            .map_err(|e| PredictError::ModelLoad(e.to_string()))?;
        info!("Loaded points model from {}", path.display());
        Ok(PointsModel { plan })
    }
}

impl Predictor for PointsModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictError> {
        let columns: Vec<f32> = features.to_array().iter().map(|&v| v as f32).collect();
        let input = tract_ndarray::Array2::from_shape_vec((1, FeatureVector::LEN), columns)
            .map_err(|e| PredictError::Inference(e.to_string()))?;

        let outputs = self
            .plan
            .run(tvec![Tensor::from(input).into()])
            .map_err(|e| PredictError::Inference(e.to_string()))?;

        let view = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| PredictError::Inference(e.to_string()))?;
        let scalar = view
            .iter()
            .next()
            .copied()
            .ok_or_else(|| PredictError::Inference("model produced no output".to_string()))?;
        Ok(f64::from(scalar))
    }
}
