//! Point cloud generation configuration types

/// Configuration read by the texture post-processor and the point cloud builder.
///
/// The value is passed explicitly into every call; changing it never affects
/// a build that is already running.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloudConfig {
    /// Lower bound of the manual tone-mapping band
    pub texture_min_intensity: f32,
    /// Upper bound of the manual tone-mapping band
    pub texture_max_intensity: f32,
    /// CLAHE clip limit (non-positive disables clipping, not equalization)
    pub clahe_clip_limit: f64,
    /// Number of CLAHE tiles along the X axis
    pub clahe_size_x: i32,
    /// Number of CLAHE tiles along the Y axis
    pub clahe_size_y: i32,
    /// Emit only valid points; the cloud loses its 2D structure
    pub only_valid_points: bool,
}

impl Default for PointCloudConfig {
    fn default() -> Self {
        Self {
            texture_min_intensity: 0.0,
            texture_max_intensity: 0.0,
            clahe_clip_limit: 4.0,
            clahe_size_x: 4,
            clahe_size_y: 4,
            only_valid_points: false,
        }
    }
}

impl PointCloudConfig {
    pub fn builder() -> PointCloudConfigBuilder {
        PointCloudConfigBuilder::default()
    }

    /// True when the manual band is unusable and the texture's own range is used instead.
    pub fn uses_auto_range(&self) -> bool {
        self.texture_min_intensity < 0.0
            || self.texture_max_intensity <= 0.0
            || self.texture_min_intensity >= self.texture_max_intensity
    }

    pub fn clahe_enabled(&self) -> bool {
        self.clahe_size_x > 0 && self.clahe_size_y > 0
    }
}

/// Builder for PointCloudConfig
#[derive(Default)]
pub struct PointCloudConfigBuilder {
    texture_min_intensity: Option<f32>,
    texture_max_intensity: Option<f32>,
    clahe_clip_limit: Option<f64>,
    clahe_size_x: Option<i32>,
    clahe_size_y: Option<i32>,
    only_valid_points: Option<bool>,
}

impl PointCloudConfigBuilder {
    pub fn texture_min_intensity(mut self, min_intensity: f32) -> Self {
        self.texture_min_intensity = Some(min_intensity);
        self
    }

    pub fn texture_max_intensity(mut self, max_intensity: f32) -> Self {
        self.texture_max_intensity = Some(max_intensity);
        self
    }

    pub fn clahe_clip_limit(mut self, clip_limit: f64) -> Self {
        self.clahe_clip_limit = Some(clip_limit);
        self
    }

    pub fn clahe_size(mut self, size_x: i32, size_y: i32) -> Self {
        self.clahe_size_x = Some(size_x);
        self.clahe_size_y = Some(size_y);
        self
    }

    pub fn only_valid_points(mut self, enable: bool) -> Self {
        self.only_valid_points = Some(enable);
        self
    }

    pub fn build(self) -> PointCloudConfig {
        let default = PointCloudConfig::default();
        PointCloudConfig {
            texture_min_intensity: self
                .texture_min_intensity
                .unwrap_or(default.texture_min_intensity),
            texture_max_intensity: self
                .texture_max_intensity
                .unwrap_or(default.texture_max_intensity),
            clahe_clip_limit: self.clahe_clip_limit.unwrap_or(default.clahe_clip_limit),
            clahe_size_x: self.clahe_size_x.unwrap_or(default.clahe_size_x),
            clahe_size_y: self.clahe_size_y.unwrap_or(default.clahe_size_y),
            only_valid_points: self.only_valid_points.unwrap_or(default.only_valid_points),
        }
    }
}
