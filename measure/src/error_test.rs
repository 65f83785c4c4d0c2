use super::*;

#[test]
fn out_of_bounds_message_includes_position() {
    let err = MeasureError::OutOfBounds { x: 12.0, y: 3.5 };
    assert_eq!(err.to_string(), "point (12.0, 3.5) is outside the image bounds");
}

#[test]
fn invalid_dimensions_message_includes_size() {
    let err = MeasureError::InvalidDimensions { width: 0.0, height: 10.0 };
    assert_eq!(err.to_string(), "invalid dimensions 0 x 10");
}

#[test]
fn codes_are_distinct() {
    let errors = [
        MeasureError::OutOfBounds { x: 0.0, y: 0.0 },
        MeasureError::SessionFull,
        MeasureError::DegenerateDistance,
        MeasureError::Incomplete,
        MeasureError::MissingImage,
        MeasureError::InvalidDimensions { width: 0.0, height: 0.0 },
        MeasureError::NoActiveCapture,
        MeasureError::CaptureNotReady,
    ];
    for (i, a) in errors.iter().enumerate() {
        for (j, b) in errors.iter().enumerate() {
            if i != j {
                assert_ne!(a.code(), b.code());
            }
        }
    }
}
