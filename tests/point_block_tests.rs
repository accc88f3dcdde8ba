//! Point block tests - formation, countdown and expiry

use splt::core::{Board, BoardConfig, TileKind};
use splt::types::{Frame, SplitAxis, TileId};

/// Two 2x2 tiles on row 12 and a 4x2 below them; splitting the 4x2 vertically
/// completes a 2x2 square of 2x2 tiles in the bottom-left corner.
fn almost_square() -> Board {
    Board::from_tiles(
        [
            (Frame::new(0, 0, 8, 12), TileKind::Standard),
            (Frame::new(0, 12, 2, 2), TileKind::Standard),
            (Frame::new(2, 12, 2, 2), TileKind::Standard),
            (Frame::new(0, 14, 4, 2), TileKind::Standard),
            (Frame::new(4, 12, 4, 4), TileKind::Standard),
        ],
        BoardConfig::default(),
    )
    .unwrap()
    .with_split_axis(SplitAxis::Vertical)
}

fn square_frames() -> [Frame; 4] {
    [
        Frame::new(0, 12, 2, 2),
        Frame::new(2, 12, 2, 2),
        Frame::new(0, 14, 2, 2),
        Frame::new(2, 14, 2, 2),
    ]
}

#[test]
fn test_square_becomes_point_blocks() {
    let mut board = almost_square().with_split_count(6);

    let report = board.split(3).unwrap();

    assert_eq!(report.update.converted.len(), 4);
    for frame in square_frames() {
        let tile = board.tile_at(frame.x, frame.y).unwrap();
        assert_eq!(tile.frame(), frame);
        assert_eq!(tile.kind(), TileKind::PointBlock { countdown: 6 });
        assert!(!tile.is_splittable());
    }
    assert_eq!(board.point_blocks().len(), 4);
    assert_eq!(board.split_count(), 7);
    assert_eq!(board.score(), 1);

    // The big tiles are untouched.
    assert_eq!(board.tile(0).unwrap().kind(), TileKind::Standard);
    board.check_invariants().unwrap();
}

#[test]
fn test_first_point_blocks_get_at_least_one_tick() {
    let mut board = almost_square();

    board.split(3).unwrap();

    let tile = board.tile_at(0, 12).unwrap();
    assert_eq!(tile.countdown(), Some(1));
    board.check_invariants().unwrap();
}

#[test]
fn test_countdown_and_expiry() {
    let pb = TileKind::PointBlock { countdown: 2 };
    let mut board = Board::from_tiles(
        [
            (Frame::new(0, 12, 2, 2), pb),
            (Frame::new(2, 12, 2, 2), pb),
            (Frame::new(0, 14, 2, 2), pb),
            (Frame::new(2, 14, 2, 2), pb),
            (Frame::new(4, 12, 4, 4), TileKind::Standard),
            (Frame::new(0, 0, 8, 12), TileKind::Standard),
        ],
        BoardConfig::default(),
    )
    .unwrap();

    // First move: every block ticks once and survives.
    let report = board.split(5).unwrap();
    assert_eq!(report.update.countdown_ticks, 4);
    assert!(report.update.expired.is_empty());
    assert!(board
        .iter()
        .filter(|t| t.kind().is_point_block())
        .all(|t| t.countdown() == Some(1)));
    assert_eq!(board.score(), 5);

    // Second move: they reach zero and leave the board.
    let right = board.position(TileId(4)).unwrap();
    let report = board.split(right).unwrap();
    assert_eq!(report.update.countdown_ticks, 4);
    assert_eq!(
        report.update.expired,
        vec![TileId(0), TileId(1), TileId(2), TileId(3)]
    );
    assert!(board.point_blocks().is_empty());
    assert_eq!(board.tile_count(), 4);
    assert_eq!(board.score(), 10);

    // The big tiles above rest on the right-hand column, so the hole stays.
    assert_eq!(board.empty_cells().len(), 16);
    board.check_invariants().unwrap();
}

#[test]
fn test_wide_group_converts_every_covered_tile() {
    // A 3x2 arrangement of 2x2 tiles is two overlapping 2x2 windows.
    let mut board = Board::from_tiles(
        [
            (Frame::new(0, 0, 8, 12), TileKind::Standard),
            (Frame::new(0, 12, 2, 2), TileKind::Standard),
            (Frame::new(2, 12, 2, 2), TileKind::Standard),
            (Frame::new(4, 12, 2, 2), TileKind::Standard),
            (Frame::new(0, 14, 2, 2), TileKind::Standard),
            (Frame::new(2, 14, 2, 2), TileKind::Standard),
            (Frame::new(4, 14, 2, 2), TileKind::Standard),
            (Frame::new(6, 12, 2, 4), TileKind::Standard),
        ],
        BoardConfig::default(),
    )
    .unwrap()
    .with_split_count(3);

    // Splitting the big tile leaves the bottom untouched; the pass still scans it.
    let report = board.split(0).unwrap();

    assert_eq!(report.update.converted.len(), 6);
    assert_eq!(board.point_blocks().len(), 6);
    let column = board.tile_at(6, 12).unwrap();
    assert_eq!(column.kind(), TileKind::Standard);
    board.check_invariants().unwrap();
}

#[test]
fn test_existing_point_blocks_are_not_reconverted() {
    let mut board = almost_square().with_split_count(6);
    board.split(3).unwrap();
    let before: Vec<_> = board.point_blocks().to_vec();

    // Next move: blocks tick from 6 to 5, no new conversion, no duplicates.
    let big = board.tile_at(0, 0).unwrap().id();
    let index = board.position(big).unwrap();
    let report = board.split(index).unwrap();

    assert!(report.update.converted.is_empty());
    assert_eq!(board.point_blocks().len(), before.len());
    assert!(board
        .iter()
        .filter(|t| t.kind().is_point_block())
        .all(|t| t.countdown() == Some(5)));
    board.check_invariants().unwrap();
}
