//! Tests for the elements manifest and geometry table

#[cfg(test)]
mod tests {
    use crate::unit::coordinate_image;
    use tempfile::tempdir;
    use tilecut::io::manifest::{
        DATA_URI_PREFIX, ElementsManifest, InfoRow, ManifestEntry, decode_data_uri,
        encode_data_uri, render_info_table,
    };
    use tilecut::spatial::GeometryRecord;

    // Tests embedded images carry the PNG data URI prefix and decode back
    // Verified by encoding raw pixels instead of PNG
    #[test]
    fn test_data_uri() {
        let image = coordinate_image(5, 3);
        let uri = encode_data_uri(&image).unwrap();
        assert!(uri.starts_with(DATA_URI_PREFIX));
        assert_eq!(decode_data_uri(&uri).unwrap(), image);

        let bare = uri.trim_start_matches(DATA_URI_PREFIX);
        assert_eq!(decode_data_uri(bare).unwrap(), image);
    }

    // Tests malformed payloads are decode errors
    // Verified by returning an empty image
    #[test]
    fn test_data_uri_errors() {
        assert!(decode_data_uri("data:image/png;base64,@@@").is_err());
        assert!(decode_data_uri("data:image/png;base64,aGVsbG8=").is_err());
    }

    // Tests an entry stores clockwise corners of its placement
    // Verified by storing x/y/width/height instead
    #[test]
    fn test_entry_geometry() {
        let record = GeometryRecord::new(10, 20, 30, 45);
        let entry = ManifestEntry::new(&coordinate_image(20, 25), record).unwrap();

        assert_eq!(entry.bbox, vec!["10,20", "30,20", "30,45", "10,45"]);
        assert_eq!(entry.record().unwrap(), record);
        assert_eq!(entry.image().unwrap().dimensions(), (20, 25));
        assert!(!entry.is_incomplete());
    }

    // Tests entries missing fields deserialize as incomplete
    // Verified by making the fields required
    #[test]
    fn test_incomplete_entries() {
        let manifest: ElementsManifest =
            serde_json::from_str(r#"{ "masks": [ { "bbox": ["0,0", "1,0", "1,1", "0,1"] }, {} ] }"#)
                .unwrap();
        assert_eq!(manifest.masks.len(), 2);
        assert!(manifest.masks.iter().all(ManifestEntry::is_incomplete));

        let empty: ElementsManifest = serde_json::from_str("{}").unwrap();
        assert!(empty.masks.is_empty());
    }

    // Tests the manifest survives a save and load
    // Verified by writing entries in reverse
    #[test]
    fn test_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("merged_output/elements_output.json");
        let manifest = ElementsManifest {
            masks: vec![
                ManifestEntry::new(&coordinate_image(2, 2), GeometryRecord::new(0, 0, 2, 2))
                    .unwrap(),
                ManifestEntry::new(&coordinate_image(1, 3), GeometryRecord::new(4, 4, 5, 7))
                    .unwrap(),
            ],
        };

        manifest.save(&path).unwrap();
        assert_eq!(ElementsManifest::load(&path).unwrap(), manifest);
        assert!(ElementsManifest::load(&dir.path().join("absent.json")).is_err());
    }

    // Tests the table gains composite columns only for tiled runs
    // Verified by always printing composite columns
    #[test]
    fn test_info_table() {
        let single = render_info_table(&[InfoRow {
            index: 0,
            filename: "element_000.png".to_string(),
            placement: GeometryRecord::new(1, 2, 4, 6),
            composite: None,
        }]);
        assert_eq!(
            single,
            "index\tfilename\tx\ty\twidth\theight\n0\telement_000.png\t1\t2\t3\t4\n"
        );

        let tiled = render_info_table(&[InfoRow {
            index: 7,
            filename: "element_007_orig_x10_y95_w3_h5.png".to_string(),
            placement: GeometryRecord::new(10, 95, 13, 100),
            composite: Some(GeometryRecord::new(10, 95, 13, 106)),
        }]);
        let lines: Vec<&str> = tiled.lines().collect();
        assert!(lines[0].ends_with("\tmerged_x\tmerged_y\tmerged_width\tmerged_height"));
        assert_eq!(
            lines[1],
            "7\telement_007_orig_x10_y95_w3_h5.png\t10\t95\t3\t5\t10\t95\t3\t11"
        );
    }
}
