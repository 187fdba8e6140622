use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::config::InpaintDefaults;
use crate::error::RelayError;

pub const IMAGE_MODEL: &str = "runware:101@1";
pub const VIDEO_MODEL: &str = "runware:201@1";
pub const INPAINT_MODEL: &str = "civitai:139562@297320";

pub const OUTPUT_SIZE: u32 = 512;
pub const VIDEO_DURATION_SECS: u32 = 5;
pub const VIDEO_OUTPUT_QUALITY: u32 = 95;
pub const DEFAULT_INPAINT_STRENGTH: f64 = 0.8;

// Inbound body for /generate-image and /generate-video
#[derive(Debug, Deserialize, Clone, Default)]
pub struct GenerationRequest {
    #[serde(default)]
    pub prompt: String,
}

// Inbound body for /inpaint-image
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct InpaintRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub seed_image: Option<String>,
    #[serde(default)]
    pub mask_image: Option<String>,
    #[serde(default)]
    pub strength: Option<f64>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TaskType {
    ImageInference,
    VideoInference,
}

// imageInference task; inpainting fills in seed/mask/strength
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ImageTask {
    pub task_type: TaskType,
    #[serde(rename = "taskUUID")]
    pub task_uuid: Uuid,
    pub positive_prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_image: Option<String>,
    pub model: String,
    pub height: u32,
    pub width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
    pub number_results: u32,
}

// videoInference task, processed async by Runware
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VideoTask {
    pub task_type: TaskType,
    #[serde(rename = "taskUUID")]
    pub task_uuid: Uuid,
    pub positive_prompt: String,
    pub model: String,
    pub height: u32,
    pub width: u32,
    pub duration: u32,
    pub number_results: u32,
    pub delivery_method: String,
    pub output_type: String,
    pub output_format: String,
    pub output_quality: u32,
}

impl ImageTask {
    pub fn generate(prompt: String) -> Self {
        Self {
            task_type: TaskType::ImageInference,
            task_uuid: Uuid::new_v4(),
            positive_prompt: prompt,
            seed_image: None,
            mask_image: None,
            model: IMAGE_MODEL.to_string(),
            height: OUTPUT_SIZE,
            width: OUTPUT_SIZE,
            strength: None,
            number_results: 1,
        }
    }

    pub fn inpaint(request: InpaintRequest, defaults: &InpaintDefaults) -> Result<Self, RelayError> {
        let strength = request.strength.unwrap_or(DEFAULT_INPAINT_STRENGTH);
        if !(0.0..=1.0).contains(&strength) {
            return Err(RelayError::InvalidRequest(format!(
                "strength must be between 0 and 1, got {}",
                strength
            )));
        }

        // blank identifiers count as missing
        let seed_image = request
            .seed_image
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| defaults.seed_image.clone());
        let mask_image = request
            .mask_image
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| defaults.mask_image.clone());

        Ok(Self {
            seed_image: Some(seed_image),
            mask_image: Some(mask_image),
            model: INPAINT_MODEL.to_string(),
            strength: Some(strength),
            ..Self::generate(request.prompt)
        })
    }
}

impl VideoTask {
    pub fn generate(prompt: String) -> Self {
        Self {
            task_type: TaskType::VideoInference,
            task_uuid: Uuid::new_v4(),
            positive_prompt: prompt,
            model: VIDEO_MODEL.to_string(),
            height: OUTPUT_SIZE,
            width: OUTPUT_SIZE,
            duration: VIDEO_DURATION_SECS,
            number_results: 1,
            delivery_method: "async".to_string(),
            output_type: "URL".to_string(),
            output_format: "MP4".to_string(),
            output_quality: VIDEO_OUTPUT_QUALITY,
        }
    }
}
