//! Tests for cropping regions into elements with rebuilt alpha

#[cfg(test)]
mod tests {
    use crate::unit::{coordinate_image, mask_from_rows};
    use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
    use tilecut::TilecutError;
    use tilecut::analysis::extraction::{apply_mask_alpha, extract};
    use tilecut::analysis::labeling::{Connectivity, label};
    use tilecut::spatial::GeometryRecord;

    fn sample_mask() -> GrayImage {
        mask_from_rows(&[
            "##....",
            "#.....",
            "...###",
            "...###",
            "#.....",
        ])
    }

    // Tests min_area of zero keeps one element per region
    // Verified by filtering with a strict comparison
    #[test]
    fn test_zero_min_area_keeps_all() {
        let mask = sample_mask();
        let rgba = DynamicImage::ImageRgba8(coordinate_image(6, 5));
        let labeling = label(&mask, Connectivity::Eight);

        let elements = extract(&rgba, &mask, &labeling, 0).unwrap();
        assert_eq!(elements.len(), labeling.regions().len());
        for (element, region) in elements.iter().zip(labeling.regions()) {
            assert_eq!(element.region, *region);
            assert_eq!(
                element.image.dimensions(),
                (region.bbox.width, region.bbox.height)
            );
            assert!(element.tile_record.is_none());
        }
    }

    // Tests the area filter is inclusive and strict below
    // Verified by changing >= to >
    #[test]
    fn test_min_area_filter() {
        let mask = sample_mask();
        let rgba = DynamicImage::ImageRgba8(coordinate_image(6, 5));
        let labeling = label(&mask, Connectivity::Eight);

        let kept = extract(&rgba, &mask, &labeling, 3).unwrap();
        let areas: Vec<usize> = kept.iter().map(|e| e.region.area).collect();
        assert_eq!(areas, vec![3, 6]);

        let none = extract(&rgba, &mask, &labeling, 7).unwrap();
        assert!(none.is_empty());
    }

    // Tests alpha marks only the region's own pixels
    // Verified by copying the binarized mask crop into alpha
    #[test]
    fn test_alpha_is_region_membership() {
        let mask = mask_from_rows(&["#.#", "#..", "###"]);
        let rgba = DynamicImage::ImageRgba8(coordinate_image(3, 3));
        let labeling = label(&mask, Connectivity::Four);

        let elements = extract(&rgba, &mask, &labeling, 0).unwrap();
        assert_eq!(elements.len(), 2);

        let hook = &elements[0];
        assert_eq!(hook.local_record(), GeometryRecord::new(0, 0, 3, 3));
        assert_eq!(hook.image.get_pixel(0, 0).0, [0, 0, 77, 255]);
        assert_eq!(hook.image.get_pixel(2, 2).0, [2, 2, 77, 255]);
        assert_eq!(hook.image.get_pixel(1, 1).0, [1, 1, 77, 0]);
        // Foreground of the other region inside this box
        assert_eq!(hook.image.get_pixel(2, 0).0, [2, 0, 77, 0]);

        let dot = &elements[1];
        assert_eq!(dot.local_record(), GeometryRecord::new(2, 0, 3, 1));
        assert_eq!(dot.image.get_pixel(0, 0).0, [2, 0, 77, 255]);
        assert_eq!(dot.placement(), dot.local_record());
    }

    // Tests RGB inputs gain an alpha channel
    // Verified by skipping alpha synthesis
    #[test]
    fn test_rgb_input_gets_alpha() {
        let mask = mask_from_rows(&[".#", "##"]);
        let rgb = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([9, 8, 7])));
        let labeling = label(&mask, Connectivity::Eight);

        let elements = extract(&rgb, &mask, &labeling, 0).unwrap();
        assert_eq!(elements.len(), 1);
        let image = &elements[0].image;
        assert_eq!(image.get_pixel(0, 0).0, [9, 8, 7, 0]);
        assert_eq!(image.get_pixel(1, 1).0, [9, 8, 7, 255]);
    }

    // Tests size disagreement is fatal
    // Verified by removing the dimension check
    #[test]
    fn test_dimension_mismatch() {
        let mask = sample_mask();
        let rgba = DynamicImage::ImageRgba8(coordinate_image(6, 4));
        let labeling = label(&mask, Connectivity::Eight);

        let result = extract(&rgba, &mask, &labeling, 0);
        assert!(matches!(
            result,
            Err(TilecutError::DimensionMismatch {
                expected: (6, 5),
                found: (6, 4),
                ..
            })
        ));
    }

    // Tests a labeling from another mask is rejected
    // Verified by skipping the labeling size check
    #[test]
    fn test_labeling_mismatch() {
        let mask = sample_mask();
        let other = mask_from_rows(&["#"]);
        let rgba = DynamicImage::ImageRgba8(coordinate_image(6, 5));
        let labeling = label(&other, Connectivity::Eight);

        assert!(extract(&rgba, &mask, &labeling, 0).is_err());
    }

    // Tests mask values are copied verbatim into alpha
    // Verified by binarizing the mask first
    #[test]
    fn test_apply_mask_alpha() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 1, Rgb([1, 2, 3])));
        let mut mask = GrayImage::new(2, 1);
        mask.put_pixel(1, 0, Luma([90]));

        let rgba = apply_mask_alpha(&image, &mask).unwrap();
        assert_eq!(rgba.get_pixel(0, 0).0, [1, 2, 3, 0]);
        assert_eq!(rgba.get_pixel(1, 0).0, [1, 2, 3, 90]);

        let small = GrayImage::new(1, 1);
        assert!(apply_mask_alpha(&image, &small).is_err());
    }
}
