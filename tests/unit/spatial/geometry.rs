//! Tests for pixel boxes and corner records

#[cfg(test)]
mod tests {
    use tilecut::spatial::{GeometryRecord, PixelBox};

    // Tests box edges are exclusive
    // Verified by treating right() as inclusive
    #[test]
    fn test_pixel_box_edges() {
        let bbox = PixelBox::new(2, 3, 4, 5);
        assert_eq!((bbox.right(), bbox.bottom()), (6, 8));
        assert!(bbox.contains(2, 3));
        assert!(bbox.contains(5, 7));
        assert!(!bbox.contains(6, 7));
        assert!(!bbox.contains(5, 8));
        assert_eq!(bbox.to_record(), GeometryRecord::new(2, 3, 6, 8));
    }

    // Tests corners run clockwise from the top-left
    // Verified by swapping the second and fourth corners
    #[test]
    fn test_corners_order() {
        let record = GeometryRecord::new(10, 20, 30, 45);
        assert_eq!(record.corners(), ["10,20", "30,20", "30,45", "10,45"]);
        assert_eq!((record.width(), record.height()), (20, 25));
    }

    // Tests parsing reads the top-left and bottom-right corners
    // Verified by reading the second corner as bottom-right
    #[test]
    fn test_from_corners() {
        let record = GeometryRecord::new(1, 2, 7, 9);
        assert_eq!(GeometryRecord::from_corners(&record.corners()).unwrap(), record);

        let loose = ["1, 2", "ignored", " 7,9 "];
        assert_eq!(GeometryRecord::from_corners(&loose).unwrap(), record);

        let negative = ["-5,-6", "", "3,4", ""];
        assert_eq!(
            GeometryRecord::from_corners(&negative).unwrap(),
            GeometryRecord::new(-5, -6, 3, 4)
        );
    }

    // Tests malformed corner lists are rejected
    // Verified by defaulting missing corners to zero
    #[test]
    fn test_from_corners_errors() {
        let empty: [&str; 0] = [];
        assert!(GeometryRecord::from_corners(&empty).is_err());
        assert!(GeometryRecord::from_corners(&["0,0", "1,0"]).is_err());
        assert!(GeometryRecord::from_corners(&["0;0", "", "1,1"]).is_err());
        assert!(GeometryRecord::from_corners(&["0,0", "", "1,x"]).is_err());
    }

    // Tests degenerate records have no area
    // Verified by using < instead of <=
    #[test]
    fn test_degenerate() {
        assert!(GeometryRecord::new(3, 3, 3, 9).is_degenerate());
        assert!(GeometryRecord::new(3, 9, 9, 2).is_degenerate());
        assert!(!GeometryRecord::new(3, 3, 4, 4).is_degenerate());
    }
}
