use poster_layout::*;

fn layout_with(configure: impl FnOnce(&mut LayoutConfig)) -> PosterLayout {
    let mut config = LayoutConfig::default();
    configure(&mut config);
    resolve_layout(&config).unwrap()
}

#[test]
fn test_bands_alternate_colors() {
    let red = Color::rgb(0xFF, 0, 0);
    let blue = Color::rgb(0, 0, 0xFF);
    let layout = layout_with(|c| {
        c.year_shading.color1 = red;
        c.year_shading.color2 = blue;
    });

    let keys = [2019, 2019, 2020, 2021, 2021, 2021];
    let bands = layout.shading_bands(&keys).unwrap();
    let colors: Vec<Color> = bands.iter().map(|b| b.color).collect();
    assert_eq!(colors, vec![red, blue, red]);
    assert_eq!(
        bands.iter().map(|b| b.span.group).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[test]
fn test_background_colored_groups_are_skipped() {
    // Defaults: the first color is white, as is the background
    let layout = layout_with(|_| {});
    let keys = [2020, 2020, 2021, 2022];
    let bands = layout.shading_bands(&keys).unwrap();

    assert_eq!(bands.len(), 1);
    assert_eq!(bands[0].span.group, 1);
    assert_eq!(bands[0].color, Color::rgb(0xCC, 0xCC, 0xCC));
}

#[test]
fn test_disabled_shading_has_no_bands() {
    let layout = layout_with(|c| c.year_shading.enable = false);
    let keys = [2020, 2021, 2022];
    assert!(layout.shading_bands(&keys).unwrap().is_empty());
    // Spans are still available for inspection
    assert_eq!(layout.shading_spans(&keys).len(), 3);
}

#[test]
fn test_band_corners_match_position_queries() {
    let layout = layout_with(|c| c.year_shading.color1 = Color::BLACK);
    let keys = [1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
    let bands = layout.shading_bands(&keys).unwrap();

    assert_eq!(bands.len(), 2);
    let first = &bands[0];
    assert_eq!(
        first.start,
        layout.shading_start_position(GridPosition::new(0, 0)).unwrap()
    );
    assert_eq!(
        first.end,
        layout.shading_end_position(GridPosition::new(0, 7)).unwrap()
    );
    let second = &bands[1];
    assert_eq!((second.span.row, second.span.start_col, second.span.end_col), (1, 0, 1));
    assert!(second.end.x() > second.start.x());
    assert!(second.end.y() > second.start.y());
}

#[test]
fn test_overflowing_keys_stay_inside_grid() {
    let layout = layout_with(|c| {
        c.grid.columns = 4;
        c.grid.rows = 3;
        c.year_shading.color1 = Color::BLACK;
    });
    let keys: Vec<i32> = (0..20).map(|i| 2000 + i / 3).collect();
    let bands = layout.shading_bands(&keys).unwrap();

    assert!(!bands.is_empty());
    for band in &bands {
        assert!(band.span.row < 3);
        assert!(band.span.end_col < 4);
        assert!(band.span.start_col <= band.span.end_col);
    }
}

#[test]
fn test_string_keys() {
    let keys = ["a", "a", "b", "b", "a"];
    let spans = shading_spans(&keys, 5, 1);
    // A repeated key after a change opens a new group
    assert_eq!(spans.len(), 3);
    assert_eq!(spans[2].group, 2);
    assert_eq!((spans[2].start_col, spans[2].end_col), (4, 4));
}
