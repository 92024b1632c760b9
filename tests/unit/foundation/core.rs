use super::*;

#[test]
fn canvas_default_matches_asset_size() {
    let c = Canvas::default();
    assert_eq!((c.width, c.height), (320, 320));
    assert_eq!(c.rgba8_len().unwrap(), 320 * 320 * 4);
}

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(
        Canvas {
            width: 0,
            height: 4
        }
        .validate()
        .is_err()
    );
    assert!(
        Canvas {
            width: 4,
            height: 4
        }
        .validate()
        .is_ok()
    );
}

#[test]
fn image_numbers_are_one_based() {
    assert_eq!(ImageNumber::from_index(0), ImageNumber(1));
    assert_eq!(ImageNumber::from_index(9).to_string(), "10");
}
