#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};

    use crate::scan_pipeline::common::config::PointCloudConfig;
    use crate::scan_pipeline::texture::{TexturePostProcessor, tone_map};

    fn manual_config(min: f32, max: f32) -> PointCloudConfig {
        PointCloudConfig::builder()
            .texture_min_intensity(min)
            .texture_max_intensity(max)
            .clahe_size(0, 0)
            .build()
    }

    #[test]
    fn test_missing_texture_yields_nothing() {
        let processor = TexturePostProcessor::new();
        assert!(processor.process(None, &PointCloudConfig::default()).is_none());
    }

    #[test]
    fn test_manual_band_midpoint() {
        let raw = array![[125.0f32]];
        let texture = TexturePostProcessor::new()
            .process(Some(&raw), &manual_config(50.0, 200.0))
            .unwrap();

        let value = texture.get(0, 0).unwrap();
        assert!(value == 127 || value == 128, "got {}", value);
    }

    #[test]
    fn test_manual_band_saturates() {
        let raw = array![[10.0f32, 50.0, 200.0, 4000.0]];
        let texture = TexturePostProcessor::new()
            .process(Some(&raw), &manual_config(50.0, 200.0))
            .unwrap();

        assert_eq!(texture.as_array(), &array![[0u8, 0, 255, 255]]);
    }

    #[test]
    fn test_auto_range_stretches_to_full_scale() {
        let raw = array![[300.0f32, 310.0], [325.0, 400.0]];
        let config = PointCloudConfig::builder()
            .texture_min_intensity(0.0)
            .texture_max_intensity(0.0)
            .clahe_size(0, 4)
            .build();

        let texture = TexturePostProcessor::new().process(Some(&raw), &config).unwrap();

        assert_eq!(texture.get(0, 0), Some(0));
        assert_eq!(texture.get(1, 1), Some(255));
        assert_eq!(texture.get(1, 0), Some(64));
    }

    #[test]
    fn test_auto_range_flat_texture_is_black() {
        let raw = Array2::from_elem((3, 3), 42.0f32);
        let mapped = tone_map::auto_range(&raw);
        assert!(mapped.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_auto_range_ignores_non_finite_samples() {
        let raw = array![[f32::NAN, 0.0], [f32::INFINITY, 100.0]];
        let mapped = tone_map::auto_range(&raw);
        assert_eq!(mapped, array![[0u8, 0], [0, 255]]);
    }

    #[test]
    fn test_clahe_disabled_keeps_tone_mapped_image() {
        let raw = Array2::from_shape_fn((6, 8), |(r, c)| (r * 8 + c) as f32 * 3.0);
        let disabled_x = PointCloudConfig::builder().clahe_size(0, 4).build();
        let disabled_y = PointCloudConfig::builder().clahe_size(4, 0).build();

        let expected = tone_map::tone_map(&raw, &disabled_x);
        let processor = TexturePostProcessor::new();

        assert_eq!(
            processor.process(Some(&raw), &disabled_x).unwrap().as_array(),
            &expected
        );
        assert_eq!(
            processor.process(Some(&raw), &disabled_y).unwrap().as_array(),
            &expected
        );
    }

    #[test]
    fn test_clahe_single_tile_equalizes_histogram() {
        let raw = Array2::from_shape_fn((4, 4), |(r, _)| if r < 2 { 0.0f32 } else { 255.0 });
        let config = PointCloudConfig::builder()
            .texture_min_intensity(0.0)
            .texture_max_intensity(255.0)
            .clahe_clip_limit(0.0)
            .clahe_size(1, 1)
            .build();

        let texture = TexturePostProcessor::new().process(Some(&raw), &config).unwrap();

        // half the pixels sit in the lowest bin, so its CDF is 8/16 of full scale
        assert_eq!(texture.get(0, 0), Some(128));
        assert_eq!(texture.get(3, 3), Some(255));
    }

    #[test]
    fn test_clahe_boosts_low_contrast() {
        let raw = Array2::from_shape_fn((4, 4), |(r, c)| 100.0 + (r * 4 + c) as f32);
        let config = PointCloudConfig::builder()
            .texture_min_intensity(0.0)
            .texture_max_intensity(255.0)
            .clahe_size(1, 1)
            .build();

        let texture = TexturePostProcessor::new().process(Some(&raw), &config).unwrap();
        let min = *texture.as_array().iter().min().unwrap();
        let max = *texture.as_array().iter().max().unwrap();

        assert!(max - min > 15, "range {}..{}", min, max);
        assert_eq!(max, 255);
    }

    #[test]
    fn test_clahe_handles_sizes_not_divisible_by_tiles() {
        let raw = Array2::from_shape_fn((5, 7), |(r, c)| ((r * 31 + c * 17) % 97) as f32);
        let texture = TexturePostProcessor::new()
            .process(Some(&raw), &PointCloudConfig::default())
            .unwrap();

        assert_eq!(texture.width(), 7);
        assert_eq!(texture.height(), 5);
    }

    fn identity_band(tiles: i32, clip_limit: f64) -> PointCloudConfig {
        PointCloudConfig::builder()
            .texture_min_intensity(0.0)
            .texture_max_intensity(255.0)
            .clahe_clip_limit(clip_limit)
            .clahe_size(tiles, tiles)
            .build()
    }

    #[test]
    fn test_clahe_blends_tile_tables() {
        // 3x3 image on 2x2 tiles: 2x2 tiles of 4 pixels, last row and column
        // padded from row and column 1
        let raw = array![
            [10.0f32, 200.0, 30.0],
            [40.0, 50.0, 120.0],
            [250.0, 80.0, 90.0],
        ];
        let texture = TexturePostProcessor::new()
            .process(Some(&raw), &identity_band(2, 0.0))
            .unwrap();

        // corner: top-left table only, 10 is 1 of 4 samples
        assert_eq!(texture.get(0, 0), Some(64));
        // left edge: 40 is 2 of 4 samples in the top-left tile
        assert_eq!(texture.get(1, 0), Some(128));
        // (2, 2) sits between all four tiles: (191 + 128 + 191 + 191) / 4
        assert_eq!(texture.get(2, 2), Some(175));
        assert_eq!(
            texture.as_array(),
            &array![[64u8, 255, 64], [128, 191, 191], [255, 191, 175]]
        );
    }

    #[test]
    fn test_clahe_keeps_flat_image_flat() {
        let raw = Array2::from_elem((3, 3), 100.0f32);
        let texture = TexturePostProcessor::new()
            .process(Some(&raw), &identity_band(2, 4.0))
            .unwrap();

        // clip limit 1 leaves bins 0, 85 and 100 at one sample each: 3/4 of full scale
        assert!(texture.as_array().iter().all(|&v| v == 191));
    }

    #[test]
    fn test_processing_is_deterministic() {
        let raw = Array2::from_shape_fn((16, 12), |(r, c)| (r as f32).sin() * 40.0 + c as f32);
        let config = PointCloudConfig::default();
        let processor = TexturePostProcessor::new();

        assert_eq!(
            processor.process(Some(&raw), &config),
            processor.process(Some(&raw), &config)
        );
    }
}
