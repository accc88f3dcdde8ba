//! Point-block group detection
//!
//! Standard tiles of identical size that share full edges form connected groups.
//! A group becomes point blocks wherever a 2x2 arrangement of its tile size fits
//! entirely inside it; larger rectangles and irregular shapes are covered as the
//! union of overlapping 2x2 windows.
//!
//! Neighbor lookup goes through the occupancy grid: the candidate frame's top-left
//! cell names its owner, and the owner is a neighbor only if its frame matches the
//! candidate exactly.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use crate::occupancy::OccupancyGrid;
use crate::tile::Tile;
use crate::types::{Frame, TileId};

/// Maximal groups of edge-adjacent, equal-size standard tiles.
///
/// Groups are listed in the collection order of their first tile, and each
/// group lists frames in breadth-first order from that tile.
pub fn same_size_groups(tiles: &[Tile], grid: &OccupancyGrid) -> Vec<Vec<Frame>> {
    let standard: HashMap<TileId, Frame> = tiles
        .iter()
        .filter(|t| t.kind().is_standard())
        .map(|t| (t.id(), t.frame()))
        .collect();

    let mut visited: HashSet<Frame> = HashSet::with_capacity(standard.len());
    let mut groups = Vec::new();

    for tile in tiles.iter().filter(|t| t.kind().is_standard()) {
        let start = tile.frame();
        if !visited.insert(start) {
            continue;
        }

        let mut group = vec![start];
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for neighbor in current.neighbors() {
                if !is_standard_tile_at(neighbor, &standard, grid) {
                    continue;
                }
                if visited.insert(neighbor) {
                    group.push(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }
        groups.push(group);
    }

    groups
}

fn is_standard_tile_at(
    frame: Frame,
    standard: &HashMap<TileId, Frame>,
    grid: &OccupancyGrid,
) -> bool {
    if !frame.fits_grid() {
        return false;
    }
    grid.owner(frame.x, frame.y)
        .and_then(|id| standard.get(&id))
        .is_some_and(|owned| *owned == frame)
}

/// True if the group's extent spans at least two tiles in both directions
pub fn spans_two_by_two(group: &[Frame]) -> bool {
    let Some(bounds) = Bounds::of(group) else {
        return false;
    };
    bounds.max_x - bounds.min_x >= bounds.width as u16
        && bounds.max_y - bounds.min_y >= bounds.height as u16
}

/// Frames of `group` that take part in at least one complete 2x2 window
pub fn matched_frames(group: &[Frame]) -> BTreeSet<Frame> {
    let mut matched = BTreeSet::new();
    if !spans_two_by_two(group) {
        return matched;
    }
    let Some(bounds) = Bounds::of(group) else {
        return matched;
    };
    let members: HashSet<Frame> = group.iter().copied().collect();
    let (w, h) = (bounds.width, bounds.height);

    for x in (bounds.min_x..bounds.max_x).step_by(w as usize) {
        for y in (bounds.min_y..bounds.max_y).step_by(h as usize) {
            let (x, y) = (x as u8, y as u8);
            let window = [
                Frame::new(x, y, w, h),
                Frame::new(x + w, y, w, h),
                Frame::new(x + w, y + h, w, h),
                Frame::new(x, y + h, w, h),
            ];
            if window.iter().all(|f| members.contains(f)) {
                matched.extend(window);
            }
        }
    }

    matched
}

/// Every standard-tile frame that should become a point block.
///
/// The result is a set, so it does not depend on the order groups or windows
/// are visited in.
pub fn point_block_frames(tiles: &[Tile], grid: &OccupancyGrid) -> BTreeSet<Frame> {
    same_size_groups(tiles, grid)
        .iter()
        .filter(|group| group.len() >= 4)
        .flat_map(|group| matched_frames(group))
        .collect()
}

/// Origin extent of a group of equal-size frames
struct Bounds {
    min_x: u16,
    max_x: u16,
    min_y: u16,
    max_y: u16,
    width: u8,
    height: u8,
}

impl Bounds {
    fn of(group: &[Frame]) -> Option<Self> {
        let first = group.first()?;
        if first.width == 0 || first.height == 0 {
            return None;
        }
        let mut bounds = Bounds {
            min_x: first.x as u16,
            max_x: first.x as u16,
            min_y: first.y as u16,
            max_y: first.y as u16,
            width: first.width,
            height: first.height,
        };
        for f in &group[1..] {
            bounds.min_x = bounds.min_x.min(f.x as u16);
            bounds.max_x = bounds.max_x.max(f.x as u16);
            bounds.min_y = bounds.min_y.min(f.y as u16);
            bounds.max_y = bounds.max_y.max(f.y as u16);
        }
        Some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileKind;

    fn layout(frames: &[(Frame, TileKind)]) -> (Vec<Tile>, OccupancyGrid) {
        let mut grid = OccupancyGrid::new();
        let tiles: Vec<Tile> = frames
            .iter()
            .enumerate()
            .map(|(i, &(frame, kind))| {
                let tile = Tile::with_kind(TileId(i as u32), frame, kind);
                grid.occupy(frame, tile.id()).unwrap();
                tile
            })
            .collect();
        (tiles, grid)
    }

    fn standard(frames: &[Frame]) -> (Vec<Tile>, OccupancyGrid) {
        let with_kind: Vec<_> = frames.iter().map(|&f| (f, TileKind::Standard)).collect();
        layout(&with_kind)
    }

    #[test]
    fn test_two_by_two_is_matched() {
        let frames = [
            Frame::new(0, 12, 2, 2),
            Frame::new(2, 12, 2, 2),
            Frame::new(0, 14, 2, 2),
            Frame::new(2, 14, 2, 2),
        ];
        let (tiles, grid) = standard(&frames);

        let groups = same_size_groups(&tiles, &grid);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 4);

        let marked = point_block_frames(&tiles, &grid);
        assert_eq!(marked, frames.iter().copied().collect());
    }

    #[test]
    fn test_row_of_four_is_not_matched() {
        let frames = [
            Frame::new(0, 15, 2, 1),
            Frame::new(2, 15, 2, 1),
            Frame::new(4, 15, 2, 1),
            Frame::new(6, 15, 2, 1),
        ];
        let (tiles, grid) = standard(&frames);

        let groups = same_size_groups(&tiles, &grid);
        assert_eq!(groups.len(), 1);
        assert!(!spans_two_by_two(&groups[0]));
        assert!(point_block_frames(&tiles, &grid).is_empty());
    }

    #[test]
    fn test_l_shape_spans_but_has_no_full_window() {
        let frames = [
            Frame::new(0, 0, 1, 1),
            Frame::new(0, 1, 1, 1),
            Frame::new(1, 1, 1, 1),
        ];
        let (tiles, grid) = standard(&frames);

        let groups = same_size_groups(&tiles, &grid);
        assert_eq!(groups.len(), 1);
        assert!(spans_two_by_two(&groups[0]));
        assert!(matched_frames(&groups[0]).is_empty());
    }

    #[test]
    fn test_two_by_three_is_union_of_windows() {
        let frames: Vec<Frame> = (0..3u8)
            .flat_map(|row| (0..2u8).map(move |col| Frame::new(col, 10 + row, 1, 1)))
            .collect();
        let (tiles, grid) = standard(&frames);

        let marked = point_block_frames(&tiles, &grid);
        assert_eq!(marked.len(), 6);
    }

    #[test]
    fn test_tail_outside_any_window_is_left_alone() {
        // 2x2 square plus one tile hanging off the right edge.
        let tail = Frame::new(2, 0, 1, 1);
        let frames = [
            Frame::new(0, 0, 1, 1),
            Frame::new(1, 0, 1, 1),
            Frame::new(0, 1, 1, 1),
            Frame::new(1, 1, 1, 1),
            tail,
        ];
        let (tiles, grid) = standard(&frames);

        let marked = point_block_frames(&tiles, &grid);
        assert_eq!(marked.len(), 4);
        assert!(!marked.contains(&tail));
    }

    #[test]
    fn test_offset_same_size_tiles_are_not_neighbors() {
        // Equal size, touching, but shifted by half a tile: no full shared edge.
        let frames = [
            Frame::new(0, 0, 2, 2),
            Frame::new(2, 1, 2, 2),
            Frame::new(0, 2, 2, 2),
            Frame::new(2, 3, 2, 2),
        ];
        let (tiles, grid) = standard(&frames);

        let groups = same_size_groups(&tiles, &grid);
        assert!(groups.iter().all(|g| g.len() < 4));
        assert!(point_block_frames(&tiles, &grid).is_empty());
    }

    #[test]
    fn test_point_blocks_do_not_join_groups() {
        let frames = [
            (Frame::new(0, 0, 1, 1), TileKind::PointBlock { countdown: 2 }),
            (Frame::new(1, 0, 1, 1), TileKind::Standard),
            (Frame::new(0, 1, 1, 1), TileKind::Standard),
            (Frame::new(1, 1, 1, 1), TileKind::Standard),
        ];
        let (tiles, grid) = layout(&frames);

        assert!(point_block_frames(&tiles, &grid).is_empty());
    }

    #[test]
    fn test_result_is_independent_of_tile_order() {
        let mut frames: Vec<Frame> = (0..3u8)
            .flat_map(|row| (0..3u8).map(move |col| Frame::new(col * 2, 10 + row * 2, 2, 2)))
            .collect();
        let (tiles, grid) = standard(&frames);
        let forward = point_block_frames(&tiles, &grid);

        frames.reverse();
        let (tiles, grid) = standard(&frames);
        let backward = point_block_frames(&tiles, &grid);

        assert_eq!(forward.len(), 9);
        assert_eq!(forward, backward);
    }
}
