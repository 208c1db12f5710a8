//! Cake commands and their validation.
//!
//! Inbound requests arrive as a multipart form (create, update) or a JSON
//! body (create). Both are normalized into typed commands here; the first
//! failing field wins and is reported as [`CoreError::Validation`].
//!
//! Create checks run in a fixed order: image presence, `title`,
//! `description`, `rating` presence, `rating` parse, `rating` range.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Entity name used in not-found errors.
pub const ENTITY: &str = "Cake";

/// Form field carrying the image file.
pub const IMAGE_FIELD: &str = "image";

// ---------------------------------------------------------------------------
// Raw inbound shapes
// ---------------------------------------------------------------------------

/// Raw image bytes as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
}

/// Text fields and the optional image file collected from a multipart form.
#[derive(Debug, Clone, Default)]
pub struct CakeForm {
    fields: HashMap<String, String>,
    image: Option<ImagePayload>,
}

impl CakeForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a text field. A repeated name keeps the first value.
    pub fn insert_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(name.into()).or_insert_with(|| value.into());
    }

    /// Record the image file. Empty payloads are treated as "no image".
    pub fn set_image(&mut self, bytes: Vec<u8>, file_name: Option<String>) {
        if bytes.is_empty() {
            return;
        }
        self.image = Some(ImagePayload { bytes, file_name });
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Field value, treating an empty string as absent.
    fn non_empty(&self, name: &str) -> Option<&str> {
        self.field(name).filter(|v| !v.is_empty())
    }
}

/// JSON body for `POST /cake/json`. The image is base64 encoded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCakeJson {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub rating: Option<f32>,
    #[serde(default)]
    pub image: String,
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// A validated create command.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCake {
    pub title: String,
    pub description: String,
    pub rating: f32,
    pub image: ImagePayload,
}

impl CreateCake {
    pub fn from_form(mut form: CakeForm) -> Result<Self, CoreError> {
        let image = form
            .image
            .take()
            .ok_or_else(|| validation("image cannot be empty"))?;
        let title = require(&form, "title")?.to_string();
        let description = require(&form, "description")?.to_string();
        let raw_rating = require(&form, "rating")?;
        let rating = parse_rating(raw_rating)?;

        Ok(Self {
            title,
            description,
            rating,
            image,
        })
    }
}

impl CreateCakeJson {
    pub fn into_command(self) -> Result<CreateCake, CoreError> {
        if self.image.is_empty() {
            return Err(validation("image cannot be empty"));
        }
        if self.title.is_empty() {
            return Err(validation("title cannot be empty"));
        }
        if self.description.is_empty() {
            return Err(validation("description cannot be empty"));
        }
        let rating = self
            .rating
            .ok_or_else(|| validation("rating cannot be empty"))?;
        check_rating(rating)?;

        let bytes = decode_image(&self.image)?;

        Ok(CreateCake {
            title: self.title,
            description: self.description,
            rating,
            image: ImagePayload {
                bytes,
                file_name: None,
            },
        })
    }
}

/// A validated partial update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateCake {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `Some(0.0)` is an explicit reset to zero, distinct from `None`.
    pub rating: Option<f32>,
    pub image: Option<ImagePayload>,
}

impl UpdateCake {
    pub fn from_form(mut form: CakeForm) -> Result<Self, CoreError> {
        let rating = form.non_empty("rating").map(parse_rating).transpose()?;

        Ok(Self {
            title: form.non_empty("title").map(str::to_string),
            description: form.non_empty("description").map(str::to_string),
            rating,
            image: form.image.take(),
        })
    }

    /// True when no data field was supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.rating.is_none()
            && self.image.is_none()
    }
}

// ---------------------------------------------------------------------------
// Response projection
// ---------------------------------------------------------------------------

/// External shape of a cake record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CakeResponse {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub image: String,
    pub rating: f32,
    pub created_at: Timestamp,
    /// Omitted until the record has been updated at least once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validation(msg: &str) -> CoreError {
    CoreError::Validation(msg.to_string())
}

fn require<'a>(form: &'a CakeForm, name: &str) -> Result<&'a str, CoreError> {
    form.non_empty(name)
        .ok_or_else(|| CoreError::Validation(format!("{name} cannot be empty")))
}

fn parse_rating(raw: &str) -> Result<f32, CoreError> {
    let rating = raw
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|r| r.is_finite())
        .ok_or_else(|| validation("rating is invalid"))?;
    check_rating(rating)?;
    Ok(rating)
}

fn check_rating(rating: f32) -> Result<(), CoreError> {
    if !rating.is_finite() {
        return Err(validation("rating is invalid"));
    }
    if rating < 0.0 {
        return Err(validation("rating cannot be less than 0"));
    }
    Ok(())
}

/// Decode a base64 image, accepting an optional `data:<mime>;base64,` prefix.
fn decode_image(encoded: &str) -> Result<Vec<u8>, CoreError> {
    let payload = match encoded.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => encoded,
    };
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|_| validation("image is not valid base64"))?;
    if bytes.is_empty() {
        return Err(validation("image cannot be empty"));
    }
    Ok(bytes)
}
