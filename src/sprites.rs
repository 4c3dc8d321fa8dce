use crate::components::OpacityMask;
use std::collections::HashMap;

/// One animation frame's collision geometry: dimensions plus the
/// opacity mask sliced from the sheet's alpha channel.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteFrame {
    mask: OpacityMask,
}

impl SpriteFrame {
    pub fn new(mask: OpacityMask) -> Self {
        Self { mask }
    }

    /// Frame from a decoded RGBA buffer; the mask is derived from the
    /// alpha channel. This is the hook an image-backed provider uses.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, AssetError> {
        if rgba.len() != (width * height * 4) as usize {
            return Err(AssetError::InvalidFrameSize { width, height });
        }
        Ok(Self {
            mask: OpacityMask::from_alpha(width, height, rgba),
        })
    }

    pub fn width(&self) -> u32 {
        self.mask.width()
    }

    pub fn height(&self) -> u32 {
        self.mask.height()
    }

    pub fn mask(&self) -> &OpacityMask {
        &self.mask
    }

    /// Horizontally mirrored frame for the left-facing variant.
    pub fn flipped(&self) -> SpriteFrame {
        Self {
            mask: self.mask.flipped(),
        }
    }
}

/// Named animation sequences, keyed "Walk_right", "Jump_left", ...
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimationSet {
    animations: HashMap<String, Vec<SpriteFrame>>,
}

impl AnimationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, frames: Vec<SpriteFrame>) {
        self.animations.insert(key.into(), frames);
    }

    /// Frames for an animation key. A missing or empty sequence is a
    /// broken provider contract, not a runtime physics condition.
    pub fn frames(&self, key: &str) -> Result<&[SpriteFrame], AssetError> {
        match self.animations.get(key) {
            None => Err(AssetError::MissingAnimation(key.to_string())),
            Some(frames) if frames.is_empty() => {
                Err(AssetError::EmptyAnimation(key.to_string()))
            }
            Some(frames) => Ok(frames),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.animations.keys().map(String::as_str)
    }
}

/// Source of animation frames and the ground tile. Injected so the
/// core never touches sheet files directly and tests can use doubles.
pub trait AssetProvider {
    /// `directional = true` produces "_right" and "_left" suffixed keys
    /// for every animation, the left variant mirrored from the right.
    fn load_animation_set(
        &self,
        category: &str,
        variant: &str,
        frame_width: u32,
        frame_height: u32,
        directional: bool,
    ) -> Result<AnimationSet, AssetError>;

    fn load_ground_tile(&self, size: u32) -> Result<SpriteFrame, AssetError>;
}

/// Animation names every player sheet carries.
pub const PLAYER_ANIMATIONS: [&str; 3] = ["Stand", "Walk", "Jump"];

/// Sheet-free provider producing fully opaque frames of the requested
/// size. Decoding real sprite sheets belongs to an outer asset layer.
#[derive(Clone, Copy, Debug)]
pub struct ProceduralAssets {
    pub frames_per_animation: usize,
}

impl Default for ProceduralAssets {
    fn default() -> Self {
        Self {
            frames_per_animation: 4,
        }
    }
}

impl AssetProvider for ProceduralAssets {
    fn load_animation_set(
        &self,
        _category: &str,
        _variant: &str,
        frame_width: u32,
        frame_height: u32,
        directional: bool,
    ) -> Result<AnimationSet, AssetError> {
        if frame_width == 0 || frame_height == 0 {
            return Err(AssetError::InvalidFrameSize {
                width: frame_width,
                height: frame_height,
            });
        }

        let frame = SpriteFrame::new(OpacityMask::filled(frame_width, frame_height));
        let frames = vec![frame; self.frames_per_animation];

        let mut set = AnimationSet::new();
        for name in PLAYER_ANIMATIONS {
            if directional {
                set.insert(format!("{}_right", name), frames.clone());
                set.insert(
                    format!("{}_left", name),
                    frames.iter().map(SpriteFrame::flipped).collect(),
                );
            } else {
                set.insert(name, frames.clone());
            }
        }
        Ok(set)
    }

    fn load_ground_tile(&self, size: u32) -> Result<SpriteFrame, AssetError> {
        if size == 0 {
            return Err(AssetError::InvalidFrameSize {
                width: size,
                height: size,
            });
        }
        Ok(SpriteFrame::new(OpacityMask::filled(size, size)))
    }
}

/// Asset loading errors
#[derive(Debug, Clone, PartialEq)]
pub enum AssetError {
    MissingAnimation(String),
    EmptyAnimation(String),
    InvalidFrameSize { width: u32, height: u32 },
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetError::MissingAnimation(key) => {
                write!(f, "no animation named {:?} in the loaded set", key)
            }
            AssetError::EmptyAnimation(key) => {
                write!(f, "animation {:?} has no frames", key)
            }
            AssetError::InvalidFrameSize { width, height } => {
                write!(f, "invalid frame dimensions {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for AssetError {}
