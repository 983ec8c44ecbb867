//! Prompt styles and the prompt enhancer.

use std::fmt;
use std::str::FromStr;

use crate::error::ImagegenError;

/// A named prompt-augmentation profile.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Style {
    /// Plain prompt, generic quality negatives
    #[default]
    Standard,
    /// Photorealistic
    Photo,
    /// 3D render
    ThreeD,
    /// Pen and ink illustration
    Drawing,
}

impl Style {
    /// Every style, in the order they're offered to users.
    pub const ALL: [Style; 4] = [Style::Standard, Style::Photo, Style::ThreeD, Style::Drawing];

    /// The wire key for the style.
    pub fn key(self) -> &'static str {
        match self {
            Style::Standard => "standard",
            Style::Photo => "photo",
            Style::ThreeD => "3d",
            Style::Drawing => "drawing",
        }
    }

    /// Human readable label for the landing page.
    pub fn label(self) -> &'static str {
        match self {
            Style::Standard => "Standard",
            Style::Photo => "Photo",
            Style::ThreeD => "3D",
            Style::Drawing => "Drawing",
        }
    }

    /// Text prepended to the user's prompt.
    pub fn prefix(self) -> &'static str {
        match self {
            Style::Standard => "",
            Style::Photo => {
                "ultra realistic photograph, 4k, highly detailed, professional photography, "
            }
            Style::ThreeD => "3D render, octane render, cinema 4D, blender, highly detailed 3D model, ",
            Style::Drawing => "detailed drawing, illustration, sketch, pen and ink, ",
        }
    }

    /// What the model is asked to steer away from.
    pub fn negative_prompt(self) -> &'static str {
        match self {
            Style::Standard => {
                "blurry, bad quality, distorted, ugly, low resolution, pixelated, disfigured faces, unrealistic proportions"
            }
            Style::Photo => {
                "drawing, painting, illustration, 3d render, cartoon, anime, sketch, digital art, blurry, bad quality"
            }
            Style::ThreeD => {
                "photograph, 2D, flat, drawing, painting, sketch, cartoon, anime, blurry, bad quality"
            }
            Style::Drawing => {
                "photograph, 3d render, bad drawing, blurry, bad quality, realistic, photorealistic"
            }
        }
    }
}

impl FromStr for Style {
    type Err = ImagegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Style::ALL
            .into_iter()
            .find(|style| style.key() == key)
            .ok_or_else(|| ImagegenError::UnknownStyle(s.to_string()))
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Positive and negative prompt pair sent to the inference API.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnhancedPrompt {
    /// Style prefix followed by the user's prompt
    pub positive: String,
    /// Style specific negative prompt
    pub negative: String,
}

/// Applies a style to a prompt.
pub fn enhance(prompt: &str, style: Style) -> EnhancedPrompt {
    EnhancedPrompt {
        positive: format!("{}{}", style.prefix(), prompt),
        negative: style.negative_prompt().to_string(),
    }
}

/// Parses the style key and applies it, failing on unknown keys.
pub fn enhance_with_key(prompt: &str, style: &str) -> Result<EnhancedPrompt, ImagegenError> {
    Ok(enhance(prompt, style.parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_leaves_prompt_alone() {
        let enhanced = enhance("a red fox", Style::Standard);
        assert_eq!(enhanced.positive, "a red fox");
        assert_eq!(
            enhanced.negative,
            "blurry, bad quality, distorted, ugly, low resolution, pixelated, disfigured faces, unrealistic proportions"
        );
    }

    #[test]
    fn photo_style() {
        let enhanced = enhance("a red fox", Style::Photo);
        assert_eq!(
            enhanced.positive,
            "ultra realistic photograph, 4k, highly detailed, professional photography, a red fox"
        );
        assert_eq!(
            enhanced.negative,
            "drawing, painting, illustration, 3d render, cartoon, anime, sketch, digital art, blurry, bad quality"
        );
    }

    #[test]
    fn three_d_style() {
        let enhanced = enhance_with_key("a red fox", "3d").expect("3d is known");
        assert_eq!(
            enhanced.positive,
            "3D render, octane render, cinema 4D, blender, highly detailed 3D model, a red fox"
        );
        assert_eq!(
            enhanced.negative,
            "photograph, 2D, flat, drawing, painting, sketch, cartoon, anime, blurry, bad quality"
        );
    }

    #[test]
    fn drawing_style() {
        let enhanced = enhance_with_key("a red fox", "drawing").expect("drawing is known");
        assert_eq!(
            enhanced.positive,
            "detailed drawing, illustration, sketch, pen and ink, a red fox"
        );
        assert_eq!(
            enhanced.negative,
            "photograph, 3d render, bad drawing, blurry, bad quality, realistic, photorealistic"
        );
    }

    #[test]
    fn keys_round_trip_and_tolerate_case() {
        for style in Style::ALL {
            assert_eq!(style.key().parse::<Style>().expect("known key"), style);
        }
        assert_eq!(" Photo ".parse::<Style>().expect("trimmed"), Style::Photo);
        assert_eq!(Style::default(), Style::Standard);
    }

    #[test]
    fn unknown_style_is_an_error() {
        let err = enhance_with_key("a red fox", "watercolour").expect_err("unknown style");
        assert!(matches!(err, ImagegenError::UnknownStyle(ref s) if s == "watercolour"));
        assert!(err.is_generation_failure());
        assert!("".parse::<Style>().is_err());
    }
}
