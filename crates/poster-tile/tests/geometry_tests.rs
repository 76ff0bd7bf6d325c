use poster_tile::layout::BlockLayout;
use poster_tile::*;

fn letter_portrait(columns: u32, rows: u32) -> TileGeometryCalculator {
    TileGeometryCalculator::new(
        GridSpec::new(columns, rows),
        PaperFormat::Letter,
        Orientation::Portrait,
    )
}

#[test]
fn test_wide_image_on_two_by_two_letter() {
    let plan = letter_portrait(2, 2).plan("poster.jpg", 3000, 2400).unwrap();

    let res = &plan.resolution;
    assert!((res.canvas.width_in - 15.9).abs() < 1e-9);
    assert!((res.canvas.height_in - 20.9).abs() < 1e-9);
    assert!((res.image_ratio - 0.8).abs() < 1e-9);
    // The canvas is relatively taller than the image, so the width binds
    assert_eq!(res.binding, BindingAxis::Width);
    assert!((plan.dpi() - 3000.0 / 15.9).abs() < 1e-9);

    assert_eq!(plan.block_width, 1509);
    assert_eq!(plan.block_height, 1981);
    assert_eq!(plan.pixel_overlap, 19);

    let expected = [
        ("poster-0-0.jpg", 0, 0, 1509, 1981),
        ("poster-0-1.jpg", 1490, 0, 1509, 1981),
        ("poster-1-0.jpg", 0, 1962, 1509, 438),
        ("poster-1-1.jpg", 1490, 1962, 1509, 438),
    ];
    assert_eq!(plan.len(), expected.len());
    for (tile, (name, left, top, width, height)) in plan.iter().zip(expected) {
        assert_eq!(tile.name, name);
        assert_eq!(
            (tile.left, tile.top, tile.width, tile.height),
            (left, top, width, height)
        );
    }
}

#[test]
fn test_tall_image_lets_last_column_absorb_remainder() {
    let plan = letter_portrait(2, 2).plan("tall.png", 1800, 4000).unwrap();

    assert_eq!(plan.resolution.binding, BindingAxis::Height);
    assert_eq!(plan.last_height, plan.block_height);
    assert_eq!(plan.last_width, 1800 - plan.shift_x);

    let last = plan.tile(GridPosition::new(1, 1)).unwrap();
    assert_eq!(last.right(), 1800);
}

#[test]
fn test_single_sheet_spans_whole_image() {
    for (width, height) in [(800, 1050), (1000, 1000), (640, 480)] {
        let plan = letter_portrait(1, 1).plan("one.png", width, height).unwrap();
        assert_eq!(plan.len(), 1);

        let tile = &plan.tiles[0];
        assert_eq!(tile.name, "one-0-0.png");
        assert_eq!((tile.left, tile.top), (0, 0));

        // The non-binding axis is exact, the binding one is off by rounding only
        let (_, _, w, h) = tile.clamped(width, height);
        assert_eq!((w, h), (width.min(tile.width), height.min(tile.height)));
        assert!(tile.width.abs_diff(width) <= 1);
        assert!(tile.height.abs_diff(height) <= 1);
    }
}

#[test]
fn test_rejects_empty_grid_and_image() {
    let err = letter_portrait(0, 2).plan("a.png", 3000, 2400).unwrap_err();
    assert!(matches!(err, PosterError::Config(_)));

    let err = letter_portrait(2, 0).plan("a.png", 3000, 2400).unwrap_err();
    assert!(matches!(err, PosterError::Config(_)));

    let err = letter_portrait(2, 2).plan("a.png", 3000, 0).unwrap_err();
    assert!(matches!(err, PosterError::Config(_)));

    let err = letter_portrait(2, 2).plan("a.png", 0, 2400).unwrap_err();
    assert!(matches!(err, PosterError::Config(_)));
}

#[test]
fn test_tiny_image_for_large_grid_is_surfaced() {
    // Square image across four sheets in one row: the height binds and the
    // last column would need a negative width.
    let err = letter_portrait(4, 1).plan("a.png", 5000, 5000).unwrap_err();
    assert!(matches!(err, PosterError::DegenerateGeometry(_)));
}

#[test]
fn test_plan_is_deterministic() {
    let calc = TileGeometryCalculator::new(
        GridSpec::new(3, 2),
        PaperFormat::Ledger,
        Orientation::Landscape,
    );
    let first = calc.plan("scan.tif", 7777, 3333).unwrap();
    let second = calc.plan("scan.tif", 7777, 3333).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_landscape_uses_swapped_paper() {
    let calc = TileGeometryCalculator::new(
        GridSpec::new(2, 2),
        PaperFormat::Letter,
        Orientation::Landscape,
    );
    let plan = calc.plan("wide.png", 3000, 2400).unwrap();

    assert_eq!(plan.resolution.paper_width_in, 10.5);
    assert_eq!(plan.resolution.paper_height_in, 8.0);
    assert_eq!(
        plan.block_width as f64,
        (plan.dpi() * 10.5).round()
    );
    assert_eq!(
        plan.block_height as f64,
        (plan.dpi() * 8.0).round()
    );
}

/// Check every geometric promise the plan makes along one axis.
fn check_axis(
    extent: u32,
    count: u32,
    binds: bool,
    origins: &[u32],
    sizes: &[u32],
    block: u32,
    overlap: u32,
) {
    assert_eq!(origins.len(), count as usize);
    assert_eq!(origins[0], 0);

    for i in 0..origins.len() - 1 {
        // Regular tiles have the rounded block size
        assert_eq!(sizes[i], block);
        // Neighbours share exactly the pixel overlap
        assert_eq!(origins[i] + sizes[i] - origins[i + 1], overlap);
    }

    let end = origins[origins.len() - 1] + sizes[sizes.len() - 1];
    if binds {
        // Rounding slack on the binding axis stays below one pixel per tile
        assert!(end.abs_diff(extent) < count, "end {end} vs extent {extent}");
    } else {
        assert_eq!(end, extent);
    }
}

#[test]
fn test_tiles_cover_image_across_inputs() {
    let images = [
        (3000, 2400),
        (2400, 3000),
        (5000, 5000),
        (1200, 900),
        (4000, 1000),
        (1000, 4000),
        (7777, 3333),
    ];
    let mut checked = 0;

    for (width, height) in images {
        for paper in PaperFormat::ALL {
            for orientation in [Orientation::Portrait, Orientation::Landscape] {
                for columns in 1..=4 {
                    for rows in 1..=4 {
                        let calc = TileGeometryCalculator::new(
                            GridSpec::new(columns, rows),
                            paper,
                            orientation,
                        );
                        let plan = match calc.plan("img.png", width, height) {
                            Ok(plan) => plan,
                            Err(PosterError::DegenerateGeometry(_)) => continue,
                            Err(e) => panic!("unexpected error: {e}"),
                        };
                        checked += 1;

                        assert_eq!(plan.len(), (columns * rows) as usize);
                        for (i, tile) in plan.iter().enumerate() {
                            assert_eq!(tile.position.row, i as u32 / columns);
                            assert_eq!(tile.position.col, i as u32 % columns);
                            assert!(tile.width > 0 && tile.height > 0);
                        }

                        let top_row: Vec<_> = plan.tiles[..columns as usize].to_vec();
                        let first_col: Vec<_> = plan
                            .iter()
                            .filter(|t| t.position.col == 0)
                            .cloned()
                            .collect();
                        let width_binds = plan.resolution.binding == BindingAxis::Width;

                        check_axis(
                            width,
                            columns,
                            width_binds,
                            &top_row.iter().map(|t| t.left).collect::<Vec<_>>(),
                            &top_row.iter().map(|t| t.width).collect::<Vec<_>>(),
                            plan.block_width,
                            plan.pixel_overlap,
                        );
                        check_axis(
                            height,
                            rows,
                            !width_binds,
                            &first_col.iter().map(|t| t.top).collect::<Vec<_>>(),
                            &first_col.iter().map(|t| t.height).collect::<Vec<_>>(),
                            plan.block_height,
                            plan.pixel_overlap,
                        );

                        // Every row and column repeats the same geometry
                        for tile in &plan {
                            let reference_x = &top_row[tile.position.col as usize];
                            let reference_y = &first_col[tile.position.row as usize];
                            assert_eq!((tile.left, tile.width), (reference_x.left, reference_x.width));
                            assert_eq!((tile.top, tile.height), (reference_y.top, reference_y.height));
                        }
                    }
                }
            }
        }
    }

    assert!(checked >= 200, "only {checked} plans were checked");
}

#[test]
fn test_block_layout_matches_plan() {
    let plan = letter_portrait(3, 2).plan("a.png", 3000, 2400).unwrap();
    let layout = poster_tile::layout::block_layout(
        3000,
        2400,
        3,
        2,
        &plan.resolution,
        plan.overlap_in,
    )
    .unwrap();

    assert_eq!(
        layout,
        BlockLayout {
            pixel_overlap: plan.pixel_overlap,
            block_width: plan.block_width,
            block_height: plan.block_height,
            shift_x: plan.shift_x,
            shift_y: plan.shift_y,
            last_width: plan.last_width,
            last_height: plan.last_height,
        }
    );
}
