//! Tests for color analysis runs

#[cfg(test)]
mod tests {
    use image::{DynamicImage, Rgb, RgbImage};
    use tempfile::tempdir;
    use tilecut::TilecutError;
    use tilecut::io::image::{save_png, write_text};
    use tilecut::io::palette::{BackgroundColors, RgbaColor};
    use tilecut::pipeline::run_colors;

    fn two_tone(major: [u8; 3], minor: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(4, 4, |x, _| {
            Rgb(if x < 3 { major } else { minor })
        }))
    }

    // Tests a single image fills slots from its dominant colors
    // Verified by writing colors in ascending frequency
    #[test]
    fn test_single_image() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("tile.png");
        let output = dir.path().join("out/colors_output.json");
        save_png(&two_tone([200, 10, 10], [10, 10, 200]), &input).unwrap();

        let colors = run_colors(&input, &output, false).unwrap();
        assert_eq!(colors.background_color1, RgbaColor::new(200, 10, 10, 1.0));
        assert_eq!(colors.background_color2, RgbaColor::new(10, 10, 200, 1.0));
        assert_eq!(colors.background_color3, RgbaColor::default());
        assert_eq!(BackgroundColors::load(&output).unwrap(), colors);
    }

    // Tests directories are summarized by votes and bad files skipped
    // Verified by using only the last image
    #[test]
    fn test_directory_votes() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("images");
        let output = dir.path().join("colors.json");
        save_png(&two_tone([0, 0, 0], [90, 90, 90]), &input.join("a.png")).unwrap();
        save_png(&two_tone([255, 255, 255], [90, 90, 90]), &input.join("b.png")).unwrap();
        write_text(&input.join("broken.png"), "nope").unwrap();

        let colors = run_colors(&input, &output, false).unwrap();
        assert_eq!(colors.background_color1, RgbaColor::new(90, 90, 90, 1.0));
        assert_eq!(colors.background_color2, RgbaColor::new(0, 0, 0, 1.0));
        assert_eq!(colors.background_color3, RgbaColor::new(255, 255, 255, 1.0));
    }

    // Tests failure when nothing could be analyzed
    // Verified by writing an all-default document
    #[test]
    fn test_nothing_analyzed() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("colors.json");

        let empty = dir.path().join("empty");
        std::fs::create_dir(&empty).unwrap();
        assert!(matches!(
            run_colors(&empty, &output, false),
            Err(TilecutError::Decode { .. })
        ));
        assert!(!output.exists());

        assert!(matches!(
            run_colors(&dir.path().join("absent"), &output, false),
            Err(TilecutError::InputNotFound { .. })
        ));
    }
}
