use poster_layout::*;

#[test]
fn test_poster_size_dimensions() {
    assert_eq!(PosterSize::A0.dimensions_cm(), (84.1, 118.9));
    assert_eq!(PosterSize::A1.dimensions_cm(), (59.4, 84.1));
    assert_eq!(PosterSize::A2.dimensions_cm(), (42.0, 59.4));
    assert_eq!(PosterSize::A3.dimensions_cm(), (29.7, 42.0));

    let custom = PosterSize::Custom {
        width_cm: 60.0,
        height_cm: 90.0,
    };
    assert_eq!(custom.dimensions_cm(), (60.0, 90.0));
    assert_eq!(PosterSize::default(), custom);
}

#[test]
fn test_orientation() {
    let a2 = PosterSize::A2;
    assert_eq!(
        a2.dimensions_with_orientation(Orientation::Portrait),
        (42.0, 59.4)
    );
    assert_eq!(
        a2.dimensions_with_orientation(Orientation::Landscape),
        (59.4, 42.0)
    );

    // A custom size given as landscape is reordered for portrait
    let wide = PosterSize::Custom {
        width_cm: 100.0,
        height_cm: 50.0,
    };
    assert_eq!(
        wide.dimensions_with_orientation(Orientation::Portrait),
        (50.0, 100.0)
    );
}

#[test]
fn test_color_parsing() {
    assert_eq!(Color::from_hex("#FFFFFF").unwrap(), Color::WHITE);
    assert_eq!(Color::from_hex("000000").unwrap(), Color::BLACK);
    assert_eq!(
        "#cc8800".parse::<Color>().unwrap(),
        Color::rgb(0xCC, 0x88, 0x00)
    );
    assert_eq!(Color::rgb(0xCC, 0xCC, 0xCC).to_hex(), "#CCCCCC");
    assert_eq!(Color::rgb(1, 2, 3).to_string(), "#010203");
}

#[test]
fn test_color_errors() {
    for bad in ["", "#FFF", "#GGGGGG", "#1234567", "white"] {
        match Color::from_hex(bad) {
            Err(LayoutError::InvalidColor(s)) => assert_eq!(s, bad),
            other => panic!("Expected InvalidColor for {:?}, got {:?}", bad, other),
        }
    }
}

#[test]
fn test_unit_parsing() {
    assert_eq!("px".parse::<Unit>().unwrap(), Unit::Px);
    assert_eq!("cm".parse::<Unit>().unwrap(), Unit::Cm);
    assert!(matches!(
        "mm".parse::<Unit>(),
        Err(LayoutError::UnknownUnit(_))
    ));
}

#[test]
fn test_axis_factors() {
    let a = AxisFactors::new(0.01, 0.2);
    let b = AxisFactors::new(0.1, 0.05);
    assert_eq!(a.max(b), AxisFactors::new(0.1, 0.2));
    assert_eq!(b.scale(2.0), AxisFactors::new(0.2, 0.1));
}

#[test]
fn test_error_messages() {
    let err = LayoutError::DpiMismatch {
        left: 150,
        right: 300,
    };
    assert_eq!(err.to_string(), "DPI mismatch: 150 vs 300");

    let err = LayoutError::CellOutOfRange {
        row: 8,
        col: 0,
        rows: 8,
        columns: 6,
    };
    assert!(err.to_string().contains("outside the 8x6 grid"));
}
