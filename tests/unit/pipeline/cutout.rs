//! Tests for applying a mask as alpha

#[cfg(test)]
mod tests {
    use crate::unit::mask_from_rows;
    use image::{DynamicImage, Rgb, RgbImage};
    use tempfile::tempdir;
    use tilecut::TilecutError;
    use tilecut::io::image::{load_image, save_png};
    use tilecut::pipeline::cutout::{CUTOUT_FILE, MASK_FILE};
    use tilecut::pipeline::{CutoutRequest, run_cutout};

    fn solid(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([30, 60, 90])))
    }

    // Tests a single image gets the mask as alpha
    // Verified by binarizing the mask
    #[test]
    fn test_single_cutout() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("photo.png");
        let mask = dir.path().join("seg.png");
        save_png(&solid(2, 2), &input).unwrap();
        save_png(&DynamicImage::ImageLuma8(mask_from_rows(&["#.", ".#"])), &mask).unwrap();

        let request = CutoutRequest {
            input,
            mask,
            output_dir: dir.path().join("cutout"),
            save_mask: true,
            show_progress: false,
        };
        let written = run_cutout(&request).unwrap();
        assert_eq!(written, vec![request.output_dir.join(CUTOUT_FILE)]);
        assert!(request.output_dir.join(MASK_FILE).is_file());

        let rgba = load_image(&written[0]).unwrap().to_rgba8();
        assert_eq!(rgba.get_pixel(0, 0).0, [30, 60, 90, 255]);
        assert_eq!(rgba.get_pixel(1, 0).0, [30, 60, 90, 0]);
    }

    // Tests directory batches skip mismatched images
    // Verified by aborting the batch on the first mismatch
    #[test]
    fn test_batch_skips_mismatch() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("photos");
        let mask = dir.path().join("seg.png");
        save_png(&solid(2, 2), &input.join("a.png")).unwrap();
        save_png(&solid(3, 3), &input.join("b.png")).unwrap();
        save_png(&DynamicImage::ImageLuma8(mask_from_rows(&["##", "##"])), &mask).unwrap();

        let request = CutoutRequest {
            input,
            mask,
            output_dir: dir.path().join("cutout"),
            save_mask: false,
            show_progress: false,
        };
        let written = run_cutout(&request).unwrap();
        assert_eq!(written, vec![request.output_dir.join("a_rgba.png")]);
        assert!(!request.output_dir.join(MASK_FILE).exists());
    }

    // Tests a single mismatched image is an error
    // Verified by skipping it like a batch item
    #[test]
    fn test_single_mismatch_fails() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("photo.png");
        let mask = dir.path().join("seg.png");
        save_png(&solid(3, 3), &input).unwrap();
        save_png(&DynamicImage::ImageLuma8(mask_from_rows(&["#"])), &mask).unwrap();

        let request = CutoutRequest {
            input,
            mask,
            output_dir: dir.path().join("cutout"),
            save_mask: false,
            show_progress: false,
        };
        assert!(matches!(
            run_cutout(&request),
            Err(TilecutError::DimensionMismatch { .. })
        ));
    }
}
